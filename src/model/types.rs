//! Element types: the set of elements a config child accepts.

use std::sync::Arc;

use crate::base::{ElementId, TypeId};

/// Either one concrete element or all implementations of a capability.
#[derive(Clone, Debug)]
pub struct ElementType {
    pub(crate) id: TypeId,
    pub(crate) qualified_name: Arc<str>,
    pub(crate) simple_name: Arc<str>,
    pub(crate) from_capability: bool,
    /// Sorted by qualified name.
    pub(crate) members: Vec<ElementId>,
    /// Highest common supertype; the type itself when there is none.
    pub(crate) highest_common_supertype: TypeId,
    pub(crate) group_name: Arc<str>,
    pub(crate) group_order: i32,
    /// Simple name without a leading interface `I`.
    pub(crate) postfix: Arc<str>,
}

impl ElementType {
    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// Built from a capability interface rather than a single class.
    pub fn is_from_capability(&self) -> bool {
        self.from_capability
    }

    pub fn members(&self) -> &[ElementId] {
        &self.members
    }

    pub fn highest_common_supertype(&self) -> TypeId {
        self.highest_common_supertype
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn postfix(&self) -> &str {
        &self.postfix
    }
}
