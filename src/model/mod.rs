//! The compiled model: read-only after compilation.
//!
//! ## Key Data Structures
//!
//! - [`ElementDefinition`] - one compiled class with its declared members
//! - [`ElementType`] - a concrete class or all implementations of a capability
//! - [`ElementRole`] - an element type under one role name
//! - [`ConfigChildSet`] / [`ElementRoleSet`] - shared slots and their roles
//! - [`AttributeEnum`] - enumerated value sets
//! - [`DisplayGroup`] - documentation groups
//!
//! All registries are arenas indexed by the typed ids of [`crate::base`],
//! with `IndexMap` lookups by qualified name.

mod element;
pub mod enums;
mod filter;
pub mod group;
mod member;
pub mod navigation;
mod role;
mod sets;
pub mod stats;
mod types;

use std::collections::BTreeMap;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::base::naming::to_upper_camel_case;
use crate::base::{ElementId, EnumId, RoleId, RoleSetId, TypeId};
use crate::diagnostics::Diagnostic;
use crate::error::Result;

pub use element::{ElementDefinition, ElementStatistics};
pub use enums::{AttributeEnum, EnumRegistry, EnumValue};
pub use filter::{ChildFilter, MemberFilter};
pub use group::DisplayGroup;
pub use member::{
    Attribute, AttributeType, ConfigChild, ConfigChildRef, ConfigChildTarget, ElementChild, MemberCommon,
    MemberKey, MemberRef,
};
pub use navigation::{AncestorChildNavigation, CumulativeChildHandler};
pub use role::ElementRole;
pub use sets::{ConfigChildSet, ConfigChildSetKind, ElementRoleSet};
pub use stats::ModelStatistics;
pub use types::ElementType;

use navigation::CollectingHandler;

// ============================================================================
// MODEL
// ============================================================================

/// The compiled configuration-element model.
#[derive(Clone, Debug, Default)]
pub struct Model {
    pub(crate) elements: Vec<ElementDefinition>,
    pub(crate) element_index: IndexMap<Arc<str>, ElementId>,
    pub(crate) types: Vec<ElementType>,
    pub(crate) type_index: IndexMap<Arc<str>, TypeId>,
    pub(crate) roles: Vec<ElementRole>,
    pub(crate) role_index: IndexMap<(TypeId, Arc<str>), RoleId>,
    pub(crate) role_sets: Vec<ElementRoleSet>,
    pub(crate) role_set_index: FxHashMap<Vec<RoleId>, RoleSetId>,
    pub(crate) enums: EnumRegistry,
    pub(crate) groups: Vec<DisplayGroup>,
    pub(crate) roots: Vec<ElementId>,
    /// Qualified names of descriptors that failed to compile, sorted.
    pub(crate) failed: Vec<Arc<str>>,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) statistics: ModelStatistics,
}

impl Model {
    // ------------------------------------------------------------------------
    // Elements
    // ------------------------------------------------------------------------

    /// Get an element by id.
    ///
    /// Ids are only valid for the model that issued them.
    pub fn element(&self, id: ElementId) -> &ElementDefinition {
        &self.elements[id.index()]
    }

    pub fn find_element(&self, qualified_name: &str) -> Option<&ElementDefinition> {
        self.element_index.get(qualified_name).map(|id| self.element(*id))
    }

    /// All elements in creation order.
    pub fn elements(&self) -> &[ElementDefinition] {
        &self.elements
    }

    /// All elements sorted by simple name, then qualified name.
    pub fn list_all_elements(&self) -> Vec<&ElementDefinition> {
        let mut result: Vec<_> = self.elements.iter().collect();
        result.sort_by(|a, b| (&a.simple_name, &a.qualified_name).cmp(&(&b.simple_name, &b.qualified_name)));
        result
    }

    /// The element followed by its ancestors, nearest first.
    pub fn ancestors_or_self(&self, id: ElementId) -> impl Iterator<Item = &ElementDefinition> + '_ {
        std::iter::successors(Some(self.element(id)), move |e| e.parent.map(|p| self.element(p)))
    }

    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// Qualified names of descriptors that failed to compile.
    pub fn failed_elements(&self) -> &[Arc<str>] {
        &self.failed
    }

    /// Concrete elements that are no member of any element type but do
    /// appear in the output, typically the roots.
    pub fn elements_outside_config_children(&self) -> Vec<&ElementDefinition> {
        self.list_all_elements()
            .into_iter()
            .filter(|e| !e.is_abstract && !e.external_names.is_empty())
            .filter(|e| !self.types.iter().any(|t| self.display_members(t.id).contains(&e.id)))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------------

    pub fn config_child(&self, child: ConfigChildRef) -> &ConfigChild {
        &self.element(child.owner).config_children[child.index]
    }

    /// Declared member of `element` with `key`.
    pub fn find_declared_member(&self, element: ElementId, key: &MemberKey) -> Option<MemberRef<'_>> {
        let element = self.element(element);
        match key {
            MemberKey::Attribute(name) => element
                .attributes
                .iter()
                .find(|a| &a.name == name)
                .map(MemberRef::Attribute),
            MemberKey::ConfigChild { .. } => element
                .config_children
                .iter()
                .find(|c| &c.key() == key)
                .map(MemberRef::ConfigChild),
        }
    }

    /// Declared and inherited attributes, overridden ones reported once.
    pub fn cumulative_attributes(&self, element: ElementId, filter: ChildFilter) -> Result<Vec<&Attribute>> {
        CollectingHandler::new(self, filter).collect(element)
    }

    /// Declared and inherited config children, overridden ones reported once.
    pub fn cumulative_config_children(&self, element: ElementId, filter: ChildFilter) -> Result<Vec<&ConfigChild>> {
        CollectingHandler::new(self, filter).collect(element)
    }

    /// Report the cumulative attributes of `element` to `handler`.
    pub fn walk_cumulative_attributes<'m>(
        &'m self,
        element: ElementId,
        filter: ChildFilter,
        handler: &mut dyn CumulativeChildHandler<'m, Attribute>,
    ) -> Result<()> {
        AncestorChildNavigation::new(self, filter, handler).run(element)
    }

    /// Report the cumulative config children of `element` to `handler`.
    pub fn walk_cumulative_config_children<'m>(
        &'m self,
        element: ElementId,
        filter: ChildFilter,
        handler: &mut dyn CumulativeChildHandler<'m, ConfigChild>,
    ) -> Result<()> {
        AncestorChildNavigation::new(self, filter, handler).run(element)
    }

    /// Config child sets with a config child declared on `element`.
    pub fn config_child_sets(&self, element: ElementId) -> &[ConfigChildSet] {
        &self.element(element).config_child_sets
    }

    /// Config child sets of `element` and its ancestors, one per role name,
    /// sorted by role name. The set of the nearest declaring level wins.
    pub fn cumulative_config_child_sets(&self, element: ElementId) -> Vec<&ConfigChildSet> {
        let mut by_role: BTreeMap<&str, &ConfigChildSet> = BTreeMap::new();
        for level in self.ancestors_or_self(element) {
            for set in &level.config_child_sets {
                by_role.entry(&*set.role_name).or_insert(set);
            }
        }
        by_role.into_values().collect()
    }

    /// Whether a config child set declared on `element` holds a selected or
    /// rejected config child.
    pub fn has_filled_config_child_sets(&self, element: ElementId, filter: ChildFilter) -> bool {
        self.element(element).config_child_sets.iter().any(|set| {
            set.children
                .iter()
                .map(|c| &self.config_child(*c).common)
                .any(|common| filter.selector.matches(common) || filter.rejector.matches(common))
        })
    }

    /// Whether `element` or an ancestor has a config child set with at least
    /// two roles after filtering.
    pub fn has_or_inherits_plural_config_children(&self, element: ElementId, filter: ChildFilter) -> bool {
        let mut current = Some(self.element(element));
        while let Some(level) = current {
            if level
                .config_child_sets
                .iter()
                .any(|set| set.filtered_roles(self, filter).len() >= 2)
            {
                return true;
            }
            current = self.next_ancestor_with_config_children(level.id, filter.selector);
        }
        false
    }

    /// Nearest ancestor whose own config child sets matter for `filter`:
    /// it has filled sets, or nothing above it has plural config children.
    pub fn next_plural_config_children_ancestor(
        &self,
        element: ElementId,
        filter: ChildFilter,
    ) -> Option<&ElementDefinition> {
        let mut ancestor = self.element(element).parent.map(|p| self.element(p));
        while let Some(current) = ancestor {
            let parent_is_plural = current
                .parent
                .is_some_and(|p| self.has_or_inherits_plural_config_children(p, filter));
            if !parent_is_plural || self.has_filled_config_child_sets(current.id, filter) {
                return Some(current);
            }
            ancestor = current.parent.map(|p| self.element(p));
        }
        None
    }

    // ------------------------------------------------------------------------
    // Ancestors with members
    // ------------------------------------------------------------------------

    /// Nearest proper ancestor declaring an attribute matched by `selector`.
    pub fn next_ancestor_with_attributes(&self, element: ElementId, selector: MemberFilter) -> Option<&ElementDefinition> {
        self.next_ancestor_with::<Attribute>(element, selector)
    }

    /// Nearest proper ancestor declaring a config child matched by `selector`.
    pub fn next_ancestor_with_config_children(
        &self,
        element: ElementId,
        selector: MemberFilter,
    ) -> Option<&ElementDefinition> {
        self.next_ancestor_with::<ConfigChild>(element, selector)
    }

    /// Whether some proper ancestor declares an attribute or config child
    /// matched by `selector`.
    pub fn has_ancestor_with_config_children_or_attributes(&self, element: ElementId, selector: MemberFilter) -> bool {
        self.next_ancestor_with_attributes(element, selector).is_some()
            || self.next_ancestor_with_config_children(element, selector).is_some()
    }

    fn next_ancestor_with<T: ElementChild>(&self, element: ElementId, selector: MemberFilter) -> Option<&ElementDefinition> {
        self.ancestors_or_self(element)
            .skip(1)
            .find(|ancestor| T::children_of(ancestor).iter().any(|c| selector.matches(c.common())))
    }

    // ------------------------------------------------------------------------
    // Types and roles
    // ------------------------------------------------------------------------

    pub fn element_type(&self, id: TypeId) -> &ElementType {
        &self.types[id.index()]
    }

    pub fn find_element_type(&self, qualified_name: &str) -> Option<&ElementType> {
        self.type_index.get(qualified_name).map(|id| self.element_type(*id))
    }

    /// All element types sorted by simple name, then qualified name.
    pub fn list_all_element_types(&self) -> Vec<&ElementType> {
        let mut result: Vec<_> = self.types.iter().collect();
        result.sort_by(|a, b| (&a.simple_name, &a.qualified_name).cmp(&(&b.simple_name, &b.qualified_name)));
        result
    }

    /// Members of `element_type` that do not ignore their membership in it.
    pub fn display_members(&self, element_type: TypeId) -> Vec<ElementId> {
        let ty = self.element_type(element_type);
        ty.members
            .iter()
            .copied()
            .filter(|m| !ty.from_capability || !self.element(*m).is_excluded_from(&ty.qualified_name))
            .collect()
    }

    pub fn role(&self, id: RoleId) -> &ElementRole {
        &self.roles[id.index()]
    }

    pub fn find_role(&self, type_name: &str, role_name: &str) -> Option<&ElementRole> {
        let ty = *self.type_index.get(type_name)?;
        self.role_index
            .get(&(ty, Arc::from(role_name)))
            .map(|id| self.role(*id))
    }

    /// All roles sorted by role name, then type simple name and qualified name.
    pub fn list_all_element_roles(&self) -> Vec<&ElementRole> {
        let mut result: Vec<_> = self.roles.iter().collect();
        result.sort_by(|a, b| self.role_sort_key(a).cmp(&self.role_sort_key(b)));
        result
    }

    pub(crate) fn role_sort_key<'a>(&'a self, role: &'a ElementRole) -> (&'a str, &'a str, &'a str) {
        let ty = self.element_type(role.element_type);
        (&role.role_name, &ty.simple_name, &ty.qualified_name)
    }

    /// All members of the role's type.
    pub fn role_raw_members(&self, role: RoleId) -> &[ElementId] {
        &self.element_type(self.role(role).element_type).members
    }

    /// Members of the role after naming-collision resolution.
    pub fn role_members(&self, role: RoleId) -> Vec<ElementId> {
        let r = self.role(role);
        self.role_raw_members(role)
            .iter()
            .copied()
            .filter(|m| !r.is_naming_loser(*m))
            .collect()
    }

    /// Members of the role that may appear in a shared slot.
    pub fn shared_slot_members(&self, role: RoleId) -> Vec<ElementId> {
        let r = self.role(role);
        self.role_members(role)
            .into_iter()
            .filter(|m| !r.has_shared_slot_conflict(*m))
            .collect()
    }

    /// Name of `element` when nested through `role`.
    pub fn external_name(&self, element: ElementId, role: RoleId) -> String {
        let role = self.role(role);
        let ty = self.element_type(role.element_type);
        let role_part = to_upper_camel_case(&role.role_name);
        if !ty.from_capability {
            return role_part;
        }
        let simple = self.element(element).simple_name();
        let stem = simple.strip_suffix(&*ty.postfix).unwrap_or(simple);
        format!("{}{}", stem, role_part)
    }

    /// Name of the generic element that accepts any member of `role`.
    pub fn generic_option_name(&self, role: RoleId) -> String {
        to_upper_camel_case(&self.role(role).role_name)
    }

    pub fn role_set(&self, id: RoleSetId) -> &ElementRoleSet {
        &self.role_sets[id.index()]
    }

    /// All role sets in creation order.
    pub fn role_sets(&self) -> &[ElementRoleSet] {
        &self.role_sets
    }

    /// Role set with exactly these roles.
    pub fn find_role_set(&self, roles: &[RoleId]) -> Option<&ElementRoleSet> {
        let mut key = roles.to_vec();
        key.sort();
        key.dedup();
        self.role_set_index.get(&key).map(|id| self.role_set(*id))
    }

    // ------------------------------------------------------------------------
    // Enums, groups, diagnostics
    // ------------------------------------------------------------------------

    pub fn attribute_enum(&self, id: EnumId) -> Option<&AttributeEnum> {
        self.enums.get(id)
    }

    pub fn find_attribute_enum(&self, qualified_name: &str) -> Option<&AttributeEnum> {
        self.enums.find(qualified_name)
    }

    pub fn attribute_enums(&self) -> &[AttributeEnum] {
        self.enums.all()
    }

    /// Display groups sorted by (order, name).
    pub fn groups(&self) -> &[DisplayGroup] {
        &self.groups
    }

    pub fn find_group(&self, name: &str) -> Option<&DisplayGroup> {
        self.groups.iter().find(|g| &*g.name == name)
    }

    /// Roles whose element type is in the named group, sorted.
    pub fn roles_in_group(&self, group: &str) -> Vec<&ElementRole> {
        let Some(group) = self.find_group(group) else {
            return Vec::new();
        };
        self.list_all_element_roles()
            .into_iter()
            .filter(|r| group.element_types.contains(&r.element_type))
            .collect()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn statistics(&self) -> &ModelStatistics {
        &self.statistics
    }
}
