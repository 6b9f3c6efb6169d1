//! # frankdoc-model
//!
//! Compiles introspected class descriptors and digester role rules into the
//! configuration-element model behind configuration documentation and schemas.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! interchange → XML rule and JSON/YAML descriptor loaders (feature "interchange")
//!   ↓
//! compile     → Builder, override analysis, role paths, conflict resolution
//!   ↓
//! model       → Elements, types, roles, role sets, enums, groups, navigation
//!   ↓
//! rules       → Role patterns and the role rule table
//!   ↓
//! descriptor  → Class and enum descriptors, DescriptorSource
//!   ↓
//! base        → Typed arena ids, name conversions
//! ```

// ============================================================================
// MODULES (dependency order: base → descriptor → rules → model → compile)
// ============================================================================

/// Foundation types: arena ids, name conversions
pub mod base;

/// Compiler errors
pub mod error;

/// Diagnostics collected during compilation
pub mod diagnostics;

/// Compiler options
pub mod options;

/// Descriptor source: the introspected input
pub mod descriptor;

/// Role rules: nesting patterns and registering methods
pub mod rules;

/// The compiled model and its queries
pub mod model;

/// The compiler pipeline
pub mod compile;

/// Loaders for role rules and descriptors
#[cfg(feature = "interchange")]
pub mod interchange;

// Re-export the entry point and the most used types
pub use compile::compile;
pub use descriptor::{
    ClassDescriptor, DescriptorSet, DescriptorSource, EnumDescriptor, GetterDescriptor, MemberDescriptor,
};
pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity};
pub use error::{ConfigurationModelError, Result};
pub use model::{ChildFilter, ElementDefinition, ElementRole, ElementType, MemberFilter, Model};
pub use options::CompilerOptions;
pub use rules::{RolePattern, RoleRuleTable};
