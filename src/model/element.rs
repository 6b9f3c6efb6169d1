//! Compiled elements.

use std::sync::Arc;

use crate::base::ElementId;

use super::member::{Attribute, ConfigChild, ConfigChildRef};
use super::sets::ConfigChildSet;

/// One compiled class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementDefinition {
    pub(crate) id: ElementId,
    pub(crate) simple_name: Arc<str>,
    pub(crate) qualified_name: Arc<str>,
    pub(crate) is_abstract: bool,
    pub(crate) deprecated: bool,
    pub(crate) parent: Option<ElementId>,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) config_children: Vec<ConfigChild>,
    /// Config children whose role path matches no pattern.
    pub(crate) omitted_config_children: Vec<ConfigChild>,
    pub(crate) description: Option<Arc<str>>,
    pub(crate) interface_based: bool,
    pub(crate) root_role: Option<Arc<str>>,
    /// Capabilities this element does not count as a member of. Sorted.
    pub(crate) excluded_from: Vec<Arc<str>>,
    pub(crate) config_child_sets: Vec<ConfigChildSet>,
    pub(crate) config_parents: Vec<ConfigChildRef>,
    pub(crate) external_names: Vec<Arc<str>>,
    pub(crate) statistics: ElementStatistics,
}

impl ElementDefinition {
    pub(crate) fn new(id: ElementId, qualified_name: Arc<str>, simple_name: Arc<str>) -> Self {
        Self {
            id,
            simple_name,
            qualified_name,
            is_abstract: false,
            deprecated: false,
            parent: None,
            attributes: Vec::new(),
            config_children: Vec::new(),
            omitted_config_children: Vec::new(),
            description: None,
            interface_based: false,
            root_role: None,
            excluded_from: Vec::new(),
            config_child_sets: Vec::new(),
            config_parents: Vec::new(),
            external_names: Vec::new(),
            statistics: ElementStatistics::default(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Declared attributes, in declaration order. Includes excluded placeholders.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Declared config children, in declaration order.
    pub fn config_children(&self) -> &[ConfigChild] {
        &self.config_children
    }

    pub fn omitted_config_children(&self) -> &[ConfigChild] {
        &self.omitted_config_children
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the element is a member of some capability type.
    pub fn is_interface_based(&self) -> bool {
        self.interface_based
    }

    /// Role name when the element was compiled as a root.
    pub fn root_role(&self) -> Option<&str> {
        self.root_role.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.root_role.is_some()
    }

    /// Whether the element ignores its membership in `capability`.
    pub fn is_excluded_from(&self, capability: &str) -> bool {
        self.excluded_from.iter().any(|c| &**c == capability)
    }

    pub fn excluded_from(&self) -> &[Arc<str>] {
        &self.excluded_from
    }

    /// Config child sets with at least one config child declared here.
    pub fn config_child_sets(&self) -> &[ConfigChildSet] {
        &self.config_child_sets
    }

    /// Config children elsewhere that can nest this element.
    pub fn config_parents(&self) -> &[ConfigChildRef] {
        &self.config_parents
    }

    /// Sorted, unique names this element appears under in the output.
    pub fn external_names(&self) -> &[Arc<str>] {
        &self.external_names
    }

    pub fn statistics(&self) -> &ElementStatistics {
        &self.statistics
    }
}

/// Per-element member counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElementStatistics {
    pub declared_attributes: usize,
    pub excluded_attributes: usize,
    pub overriding_attributes: usize,
    pub technical_overrides: usize,
    pub declared_config_children: usize,
    pub omitted_config_children: usize,
}
