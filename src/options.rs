//! Compiler options

use std::sync::Arc;

/// Name of the display group for element types without an explicit group.
pub const DEFAULT_GROUP_NAME: &str = "Other";

/// Options for one model compilation run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Deserialize))]
#[cfg_attr(feature = "interchange", serde(default, rename_all = "camelCase"))]
pub struct CompilerOptions {
    /// Qualified names of the root elements (empty = compile every class, none as a root)
    pub roots: Vec<Arc<str>>,
    /// Move config children whose role path does not match their pattern to the omitted list
    pub check_role_paths: bool,
    /// Group used for element types that name no group
    pub default_group_name: Arc<str>,
    /// Sort position of the default group
    pub default_group_order: i32,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            check_role_paths: true,
            default_group_name: Arc::from(DEFAULT_GROUP_NAME),
            default_group_order: i32::MAX,
        }
    }
}

impl CompilerOptions {
    /// Add a root element by qualified name
    pub fn with_root(mut self, qualified_name: impl Into<Arc<str>>) -> Self {
        self.roots.push(qualified_name.into());
        self
    }

    /// Enable or disable the role-path legality check
    pub fn with_role_path_check(mut self, enabled: bool) -> Self {
        self.check_role_paths = enabled;
        self
    }

    /// Set the name and order of the default display group
    pub fn with_default_group(mut self, name: impl Into<Arc<str>>, order: i32) -> Self {
        self.default_group_name = name.into();
        self.default_group_order = order;
        self
    }
}
