//! Element roles: an element type in the position of one role name.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::base::{ElementId, RoleId, RoleSetId, TypeId};

/// An (element type, role name) pair.
#[derive(Clone, Debug)]
pub struct ElementRole {
    pub(crate) id: RoleId,
    pub(crate) element_type: TypeId,
    pub(crate) role_name: Arc<str>,
    /// 1 for the first role with this role name, 2 for the second, ...
    pub(crate) sequence: u32,
    pub(crate) promoted: RoleId,
    pub(crate) role_sets: Vec<RoleSetId>,
    /// Members dropped by naming-collision resolution.
    pub(crate) naming_losers: FxHashSet<ElementId>,
    /// Members dropped from shared slots by role-set conflicts.
    pub(crate) shared_slot_conflicts: FxHashSet<ElementId>,
    pub(crate) default_option_conflict: Option<ElementId>,
}

impl ElementRole {
    pub(crate) fn new(id: RoleId, element_type: TypeId, role_name: Arc<str>, sequence: u32) -> Self {
        Self {
            id,
            element_type,
            role_name,
            sequence,
            promoted: id,
            role_sets: Vec::new(),
            naming_losers: FxHashSet::default(),
            shared_slot_conflicts: FxHashSet::default(),
            default_option_conflict: None,
        }
    }

    pub fn id(&self) -> RoleId {
        self.id
    }

    pub fn element_type(&self) -> TypeId {
        self.element_type
    }

    pub fn role_name(&self) -> &str {
        &self.role_name
    }

    /// Disambiguates roles that reuse a role name for different types.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// The role with the promoted type and the same role name, or this role.
    pub fn promoted(&self) -> RoleId {
        self.promoted
    }

    /// Role sets this role takes part in, sorted.
    pub fn role_sets(&self) -> &[RoleSetId] {
        &self.role_sets
    }

    /// Whether naming-collision resolution dropped `element` from this role.
    pub fn is_naming_loser(&self, element: ElementId) -> bool {
        self.naming_losers.contains(&element)
    }

    /// Whether a role-set conflict removed `element` from this role's shared slots.
    pub fn has_shared_slot_conflict(&self, element: ElementId) -> bool {
        self.shared_slot_conflicts.contains(&element)
    }

    /// Member whose external name equals the generic option name of the role.
    pub fn default_option_conflict(&self) -> Option<ElementId> {
        self.default_option_conflict
    }
}
