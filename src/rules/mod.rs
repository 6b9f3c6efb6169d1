//! Role rules: which methods register config children, and where.
//!
//! ## Module Structure
//!
//! - `pattern` - [`RolePattern`], the `*/roleA/roleB` nesting patterns
//! - `table` - [`RoleRuleTable`], method name → [`RoleRule`]

mod pattern;
mod table;

pub use pattern::RolePattern;
pub use table::{Cardinality, ChildKind, RejectedRule, RoleRule, RoleRuleTable, RuleRecord};
