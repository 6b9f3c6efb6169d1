//! Loader errors.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::DocumentFormat;

/// Errors raised while loading rules, descriptors or options.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// The digester rules are not well-formed XML.
    #[error("digester rules, byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// A `rule` element lacks a required attribute.
    #[error("rule #{index} has no '{attribute}' attribute")]
    MissingRuleAttribute { index: usize, attribute: &'static str },

    /// A descriptor or options document does not deserialize.
    #[error("{format} document: {message}")]
    Document { format: DocumentFormat, message: String },

    /// A document deserialized but cannot be used.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InterchangeError {
    pub fn xml(position: u64, message: impl Into<String>) -> Self {
        Self::Xml {
            position,
            message: message.into(),
        }
    }

    pub fn document(format: DocumentFormat, message: impl ToString) -> Self {
        Self::Document {
            format,
            message: message.to_string(),
        }
    }

    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument(message.into())
    }

    /// Wrap a read failure with the path that failed.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read a whole file, keeping the path in the error.
pub(super) fn read_file(path: &Path) -> Result<Vec<u8>, InterchangeError> {
    std::fs::read(path).map_err(|e| InterchangeError::io(path, e))
}
