//! Loaders for compiler input.
//!
//! - **Digester rules** (XML) - `rule` elements into a [`RoleRuleTable`](crate::rules::RoleRuleTable)
//! - **Descriptors** (JSON or YAML) - classes and enums into a [`DescriptorSet`](crate::descriptor::DescriptorSet)
//! - **Options** (JSON or YAML) - [`CompilerOptions`](crate::options::CompilerOptions)
//!
//! ## Usage
//!
//! ```ignore
//! use frankdoc::interchange::{load_descriptors, load_options, load_role_rules};
//!
//! let rules = load_role_rules(Path::new("digester-rules.xml"))?;
//! let descriptors = load_descriptors(Path::new("classes.yaml"))?;
//! let options = load_options(Path::new("frankdoc.json"))?;
//! let model = frankdoc::compile(&descriptors, &rules, &options)?;
//! ```

mod descriptors;
mod error;
mod rules;

pub use descriptors::{DocumentFormat, load_descriptors, load_options, read_descriptors, read_options};
pub use error::InterchangeError;
pub use rules::{load_role_rules, read_role_rules, read_rule_records};
