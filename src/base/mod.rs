//! Foundation types for the model compiler.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`ElementId`], [`TypeId`], [`RoleId`], [`RoleSetId`], [`EnumId`] - typed arena indices
//! - Name conversions between method names, attribute names and external element names
//!
//! This module has NO dependencies on other crate modules.

mod ids;
pub mod naming;

pub use ids::{ElementId, EnumId, RoleId, RoleSetId, TypeId};
