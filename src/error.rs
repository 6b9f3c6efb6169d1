//! Error types for model compilation.

use std::sync::Arc;

use thiserror::Error;

/// Errors raised while compiling descriptors into the model.
///
/// Most variants are authoring errors scoped to one element: the compiler
/// turns them into diagnostics and continues with unrelated elements. The
/// variants for which [`is_fatal`](Self::is_fatal) returns `true` mean the
/// navigator or conflict resolver saw impossible input and abort the run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationModelError {
    /// A qualified name that the descriptor source does not know.
    #[error("unknown descriptor: '{name}'")]
    UnknownDescriptor { name: Arc<str> },

    /// An attribute setter takes a type that is not text, boolean, integer or enum.
    #[error("element '{element}': attribute setter '{member}' has unsupported type '{type_name}'")]
    InvalidAttributeType {
        element: Arc<str>,
        member: Arc<str>,
        type_name: Arc<str>,
    },

    /// The parent chain of a descriptor loops back to itself.
    #[error("element '{element}' inherits from itself")]
    CyclicInheritance { element: Arc<str> },

    /// An element could not be compiled because an element it depends on failed.
    #[error("element '{element}' depends on '{dependency}', which failed to compile")]
    FailedDependency {
        element: Arc<str>,
        dependency: Arc<str>,
    },

    /// A nesting pattern in the role rules is not well-formed.
    #[error("malformed role pattern '{pattern}': {reason}")]
    MalformedPattern { pattern: Arc<str>, reason: String },

    /// A member is both selected and rejected by one filter.
    #[error("element '{element}': member '{member}' is both selected and rejected")]
    SelectorRejectorOverlap {
        element: Arc<str>,
        member: Arc<str>,
    },

    /// A config child set was built without config children.
    #[error("element '{element}': config child set for role '{role_name}' is empty")]
    EmptyConfigChildSet {
        element: Arc<str>,
        role_name: Arc<str>,
    },
}

impl ConfigurationModelError {
    /// Create an unknown descriptor error.
    pub fn unknown(name: impl Into<Arc<str>>) -> Self {
        Self::UnknownDescriptor { name: name.into() }
    }

    /// Create a malformed pattern error.
    pub fn malformed_pattern(pattern: impl Into<Arc<str>>, reason: impl Into<String>) -> Self {
        Self::MalformedPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error aborts the whole compilation run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SelectorRejectorOverlap { .. } | Self::EmptyConfigChildSet { .. }
        )
    }

    /// The qualified name of the element this error is about, if any.
    pub fn element(&self) -> Option<&str> {
        match self {
            Self::UnknownDescriptor { name } => Some(name),
            Self::InvalidAttributeType { element, .. }
            | Self::CyclicInheritance { element }
            | Self::FailedDependency { element, .. }
            | Self::SelectorRejectorOverlap { element, .. }
            | Self::EmptyConfigChildSet { element, .. } => Some(element),
            Self::MalformedPattern { .. } => None,
        }
    }
}

/// Result alias for model compilation.
pub type Result<T, E = ConfigurationModelError> = std::result::Result<T, E>;
