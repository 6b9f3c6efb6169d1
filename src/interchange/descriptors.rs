//! Descriptor and option documents in JSON or YAML.
//!
//! ## Structure
//!
//! ```yaml
//! classes:
//!   - qualifiedName: org.example.Pipe
//!     isInterface: true
//!   - qualifiedName: org.example.FixedPipe
//!     interfaces: [org.example.Pipe]
//!     members:
//!       - name: setTimeout
//!         parameterType: int
//!         defaultValue: "30"
//! enums:
//!   - qualifiedName: org.example.Mode
//!     values:
//!       - label: FAST
//! ```
//!
//! Options documents deserialize straight into [`CompilerOptions`].

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::descriptor::{ClassDescriptor, DescriptorSet, EnumDescriptor};
use crate::options::CompilerOptions;

use super::InterchangeError;
use super::error::read_file;

/// Document formats accepted by the loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// File extensions for this format.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
        }
    }

    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        [Self::Json, Self::Yaml]
            .into_iter()
            .find(|f| f.extensions().contains(&extension.as_str()))
    }

    fn parse<T: for<'de> Deserialize<'de>>(self, input: &[u8]) -> Result<T, InterchangeError> {
        match self {
            Self::Json => serde_json::from_slice(input).map_err(|e| InterchangeError::document(self, e)),
            Self::Yaml => serde_yaml::from_slice(input).map_err(|e| InterchangeError::document(self, e)),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DescriptorDocument {
    classes: Vec<ClassDescriptor>,
    enums: Vec<EnumDescriptor>,
}

/// Read a descriptor document into a [`DescriptorSet`].
pub fn read_descriptors(input: &[u8], format: DocumentFormat) -> Result<DescriptorSet, InterchangeError> {
    let document: DescriptorDocument = format.parse(input)?;
    let mut set = DescriptorSet::new();
    for class in document.classes {
        if class.qualified_name.is_empty() {
            return Err(InterchangeError::invalid_document("class without qualifiedName"));
        }
        set.add_class(class);
    }
    for descriptor in document.enums {
        set.add_enum(descriptor);
    }
    tracing::debug!(?format, classes = set.len(), "read descriptors");
    Ok(set)
}

/// Load a descriptor file, choosing the format from its extension.
pub fn load_descriptors(path: &Path) -> Result<DescriptorSet, InterchangeError> {
    let format = format_of(path)?;
    tracing::debug!(path = %path.display(), "loading descriptors");
    read_descriptors(&read_file(path)?, format)
}

/// Read compiler options. Absent fields keep their defaults.
pub fn read_options(input: &[u8], format: DocumentFormat) -> Result<CompilerOptions, InterchangeError> {
    format.parse(input)
}

/// Load an options file, choosing the format from its extension.
pub fn load_options(path: &Path) -> Result<CompilerOptions, InterchangeError> {
    let format = format_of(path)?;
    read_options(&read_file(path)?, format)
}

fn format_of(path: &Path) -> Result<DocumentFormat, InterchangeError> {
    DocumentFormat::from_path(path)
        .ok_or_else(|| InterchangeError::invalid_document(format!("unknown document format: {}", path.display())))
}
