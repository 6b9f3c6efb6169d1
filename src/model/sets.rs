//! Config child sets and element role sets.

use std::sync::Arc;

use crate::base::{ElementId, RoleId, RoleSetId};

use super::Model;
use super::filter::ChildFilter;
use super::member::{ConfigChild, ConfigChildRef};

/// Kind of a group of config children sharing a role name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigChildSetKind {
    Object,
    Text,
    /// Object and text config children combined. Not supported by renderers.
    Mixed,
}

impl ConfigChildSetKind {
    /// Classify a non-empty group of config children.
    pub fn of<'a>(children: impl IntoIterator<Item = &'a ConfigChild>) -> Self {
        let mut has_text = false;
        let mut has_object = false;
        for child in children {
            if child.is_text() {
                has_text = true;
            } else {
                has_object = true;
            }
        }
        match (has_object, has_text) {
            (true, true) => Self::Mixed,
            (false, true) => Self::Text,
            _ => Self::Object,
        }
    }
}

/// The config children of one element's ancestor chain sharing a role name,
/// at least one of them declared on the element itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigChildSet {
    pub(crate) owner: ElementId,
    pub(crate) role_name: Arc<str>,
    /// Nearest declaring level first, declaration order within a level.
    pub(crate) children: Vec<ConfigChildRef>,
    pub(crate) kind: ConfigChildSetKind,
    /// Distinct roles of the object config children, sorted.
    pub(crate) roles: Vec<RoleId>,
    pub(crate) role_set: Option<RoleSetId>,
}

impl ConfigChildSet {
    pub fn owner(&self) -> ElementId {
        self.owner
    }

    pub fn role_name(&self) -> &str {
        &self.role_name
    }

    pub fn children(&self) -> &[ConfigChildRef] {
        &self.children
    }

    pub fn kind(&self) -> ConfigChildSetKind {
        self.kind
    }

    pub fn roles(&self) -> &[RoleId] {
        &self.roles
    }

    /// Role set shared by all sets with the same roles; `None` unless object kind.
    pub fn role_set(&self) -> Option<RoleSetId> {
        self.role_set
    }

    /// Distinct roles of the object config children that `filter` selects
    /// or rejects, sorted.
    ///
    /// Rejected children count because they still occupy the slot.
    pub fn filtered_roles(&self, model: &Model, filter: ChildFilter) -> Vec<RoleId> {
        let mut result: Vec<RoleId> = self
            .children
            .iter()
            .map(|c| model.config_child(*c))
            .filter(|c| filter.selector.matches(&c.common) || filter.rejector.matches(&c.common))
            .filter_map(ConfigChild::role)
            .collect();
        result.sort();
        result.dedup();
        result
    }
}

/// Roles that share one slot in some parent element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementRoleSet {
    pub(crate) id: RoleSetId,
    /// Sorted. Also the memoization key.
    pub(crate) roles: Vec<RoleId>,
    /// External names produced by more than one role in this set, sorted.
    pub(crate) conflicting_names: Vec<Arc<str>>,
}

impl ElementRoleSet {
    pub fn id(&self) -> RoleSetId {
        self.id
    }

    pub fn roles(&self) -> &[RoleId] {
        &self.roles
    }

    pub fn conflicting_names(&self) -> &[Arc<str>] {
        &self.conflicting_names
    }
}
