//! Compiler tests
//!
//! Tests for the compilation pipeline:
//! - Element, type and role creation from descriptors
//! - Attribute typing: overloads, getters, enum getters
//! - Override analysis
//! - Role-path legality
//! - Conflict resolution: naming collisions, role sets, shared slots
//! - Failure isolation and diagnostics

pub mod tests_attributes;
pub mod tests_conflicts;
pub mod tests_overrides;
pub mod tests_pipeline;
