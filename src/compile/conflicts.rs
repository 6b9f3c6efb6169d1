//! Conflict resolution, run once after all elements and types exist.
//!
//! ## Passes
//!
//! 1. Highest-common-supertype promotion of capability types and roles
//! 2. Naming collisions within one role
//! 3. Config child sets, and the element role sets they share
//! 4. Recursive role set discovery through the members of capability roles
//!
//! Shared-slot collisions inside role sets and default-option conflicts are
//! computed once all role sets exist.

use std::collections::BTreeMap;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::{ElementId, RoleId, RoleSetId, TypeId};
use crate::descriptor::DescriptorSource;
use crate::diagnostics::DiagnosticCollector;
use crate::error::{ConfigurationModelError, Result};
use crate::model::{ChildFilter, ConfigChild, ConfigChildRef, ConfigChildSet, ConfigChildSetKind, ElementRoleSet, Model};

// ============================================================================
// PASS 1: HIGHEST COMMON SUPERTYPE
// ============================================================================

/// Promote every capability type to its highest compiled super-capability.
pub(crate) fn compute_highest_common_supertypes(
    model: &mut Model,
    source: &dyn DescriptorSource,
    diagnostics: &mut DiagnosticCollector,
) {
    let mut promoted: Vec<(TypeId, TypeId)> = Vec::new();
    for ty in model.types.iter().filter(|t| t.from_capability) {
        let mut current = ty.id;
        let mut visited: FxHashSet<TypeId> = FxHashSet::default();
        visited.insert(current);
        loop {
            let candidates = compiled_super_capabilities(model, source, &model.types[current.index()].qualified_name);
            let Some(first) = candidates.first() else {
                break;
            };
            if candidates.len() > 1 {
                let names: Vec<Arc<str>> = candidates.iter().map(|c| model.types[c.index()].qualified_name.clone()).collect();
                tracing::warn!(
                    element_type = %ty.qualified_name,
                    candidates = ?names,
                    chosen = %names[0],
                    "ambiguous highest common supertype"
                );
                diagnostics.ambiguous_promotion(&ty.qualified_name, &names, &names[0]);
            }
            if !visited.insert(*first) {
                break;
            }
            current = *first;
        }
        if current != ty.id {
            tracing::trace!(
                element_type = %ty.qualified_name,
                promoted = %model.types[current.index()].qualified_name,
                "promoted element type"
            );
        }
        promoted.push((ty.id, current));
    }
    for (ty, highest) in promoted {
        model.types[ty.index()].highest_common_supertype = highest;
    }
}

/// Compiled capability types directly above `interface`, passing through
/// interfaces that are no compiled type. Sorted by qualified name.
fn compiled_super_capabilities(model: &Model, source: &dyn DescriptorSource, interface: &str) -> Vec<TypeId> {
    let mut result: Vec<TypeId> = Vec::new();
    let mut visited: FxHashSet<Arc<str>> = FxHashSet::default();
    let mut stack: Vec<Arc<str>> = source
        .find_class(interface)
        .map(|c| c.interfaces.clone())
        .unwrap_or_default();
    while let Some(name) = stack.pop() {
        if !visited.insert(name.clone()) {
            continue;
        }
        match model.type_index.get(&name) {
            Some(id) if model.types[id.index()].from_capability => {
                if !result.contains(id) {
                    result.push(*id);
                }
            }
            _ => {
                if let Some(class) = source.find_class(&name) {
                    stack.extend(class.interfaces.iter().cloned());
                }
            }
        }
    }
    result.sort_by(|a, b| model.types[a.index()].qualified_name.cmp(&model.types[b.index()].qualified_name));
    result
}

/// Point every role at the role with its promoted type and the same role name.
pub(crate) fn promote_roles(model: &mut Model) {
    let mut promotions = Vec::with_capacity(model.roles.len());
    for role in &model.roles {
        let highest = model.types[role.element_type.index()].highest_common_supertype;
        let promoted = model
            .role_index
            .get(&(highest, role.role_name.clone()))
            .copied()
            .unwrap_or(role.id);
        promotions.push(promoted);
    }
    for (role, promoted) in model.roles.iter_mut().zip(promotions) {
        role.promoted = promoted;
    }
}

// ============================================================================
// PASS 2: NAMING COLLISIONS
// ============================================================================

/// Within each role, members sharing an external name are resolved in favour
/// of a single non-deprecated candidate.
pub(crate) fn resolve_naming_collisions(model: &mut Model, diagnostics: &mut DiagnosticCollector) -> usize {
    let mut unresolved = 0usize;
    let mut losers: Vec<(RoleId, ElementId)> = Vec::new();
    for role in model.list_all_element_roles() {
        let mut by_name: BTreeMap<String, Vec<ElementId>> = BTreeMap::new();
        for member in model.role_raw_members(role.id) {
            by_name.entry(model.external_name(*member, role.id)).or_default().push(*member);
        }
        for (name, members) in by_name.into_iter().filter(|(_, m)| m.len() > 1) {
            let (deprecated, current): (Vec<ElementId>, Vec<ElementId>) =
                members.iter().copied().partition(|m| model.element(*m).deprecated);
            if current.len() == 1 {
                for loser in deprecated {
                    tracing::trace!(
                        role = %role.role_name,
                        name = %name,
                        dropped = %model.element(loser).qualified_name,
                        "deprecated member loses naming collision"
                    );
                    losers.push((role.id, loser));
                }
                continue;
            }
            let candidates: Vec<Arc<str>> = members
                .iter()
                .map(|m| model.element(*m).qualified_name.clone())
                .collect();
            let all_deprecated = current.is_empty();
            let role_description = describe_role(model, role.id);
            tracing::warn!(
                role = %role_description,
                name = %name,
                candidates = ?candidates,
                all_deprecated,
                "unresolved naming collision"
            );
            diagnostics.name_collision(&role_description, &name, &candidates, all_deprecated);
            unresolved += 1;
        }
    }
    for (role, loser) in losers {
        model.roles[role.index()].naming_losers.insert(loser);
    }
    tracing::debug!(unresolved, "resolved naming collisions");
    unresolved
}

pub(crate) fn describe_role(model: &Model, role: RoleId) -> String {
    let role = model.role(role);
    format!(
        "({}, {})",
        model.element_type(role.element_type).simple_name,
        role.role_name
    )
}

// ============================================================================
// PASS 3: CONFIG CHILD SETS
// ============================================================================

/// Build the config child sets of every element and their role sets.
pub(crate) fn create_config_child_sets(model: &mut Model, diagnostics: &mut DiagnosticCollector) -> Result<()> {
    let mut all_sets: Vec<(ElementId, Vec<ConfigChildSet>)> = Vec::new();
    for element in model.list_all_elements() {
        let cumulative = model.cumulative_config_children(element.id, ChildFilter::COMPATIBILITY)?;
        let mut by_role_name: IndexMap<Arc<str>, Vec<&ConfigChild>> = IndexMap::new();
        for child in cumulative {
            by_role_name.entry(child.role_name.clone()).or_default().push(child);
        }
        let mut sets = Vec::new();
        for (role_name, children) in by_role_name {
            if children.is_empty() {
                return Err(ConfigurationModelError::EmptyConfigChildSet {
                    element: element.qualified_name.clone(),
                    role_name,
                });
            }
            if !children.iter().any(|c| c.common.owner == element.id) {
                continue;
            }
            let kind = ConfigChildSetKind::of(children.iter().copied());
            if kind == ConfigChildSetKind::Mixed {
                tracing::warn!(element = %element.qualified_name, role = %role_name, "config child set combines object and text config children");
                diagnostics.mixed_config_child_set(&element.qualified_name, &role_name);
            }
            let refs = children.iter().map(|c| child_ref(model, c)).collect();
            let mut roles: Vec<RoleId> = children.iter().filter_map(|c| c.role()).collect();
            roles.sort();
            roles.dedup();
            tracing::trace!(element = %element.qualified_name, role = %role_name, ?kind, "found config child set");
            sets.push(ConfigChildSet {
                owner: element.id,
                role_name,
                children: refs,
                kind,
                roles,
                role_set: None,
            });
        }
        all_sets.push((element.id, sets));
    }

    let mut created = 0usize;
    for (element, mut sets) in all_sets {
        for set in &mut sets {
            if set.kind == ConfigChildSetKind::Object {
                let (id, is_new) = find_or_create_role_set(model, &set.roles);
                set.role_set = Some(id);
                created += usize::from(is_new);
            }
        }
        model.elements[element.index()].config_child_sets = sets;
    }
    tracing::debug!(role_sets = created, "created config child sets");
    Ok(())
}

fn child_ref(model: &Model, child: &ConfigChild) -> ConfigChildRef {
    let owner = child.common.owner;
    let key = child.key();
    let index = model
        .element(owner)
        .config_children
        .iter()
        .position(|c| c.key() == key)
        .unwrap_or_default();
    ConfigChildRef { owner, index }
}

/// Memoized by the exact, sorted set of roles.
fn find_or_create_role_set(model: &mut Model, roles: &[RoleId]) -> (RoleSetId, bool) {
    let mut key = roles.to_vec();
    key.sort();
    key.dedup();
    if let Some(id) = model.role_set_index.get(&key) {
        return (*id, false);
    }
    let id = RoleSetId::from_index(model.role_sets.len());
    tracing::trace!(
        roles = ?key.iter().map(|r| describe_role(model, *r)).collect::<Vec<_>>(),
        "new element role set"
    );
    for role in &key {
        model.roles[role.index()].role_sets.push(id);
    }
    model.role_sets.push(ElementRoleSet {
        id,
        roles: key.clone(),
        conflicting_names: Vec::new(),
    });
    model.role_set_index.insert(key, id);
    (id, true)
}

// ============================================================================
// PASS 4: RECURSIVE ROLE SETS
// ============================================================================

/// Discover role sets through the config children of the members of every
/// capability role, recursing into newly created sets.
pub(crate) fn create_recursive_role_sets(model: &mut Model, diagnostics: &mut DiagnosticCollector) {
    let mut roles: Vec<RoleId> = model
        .list_all_element_roles()
        .into_iter()
        .filter(|r| model.element_type(r.element_type).from_capability)
        .map(|r| r.id)
        .collect();
    sort_roles(model, &mut roles);
    let before = model.role_sets.len();
    for role in roles {
        recurse(model, &[role], 1, diagnostics);
    }
    tracing::debug!(role_sets = model.role_sets.len() - before, "created recursive role sets");
}

fn recurse(model: &mut Model, roles: &[RoleId], depth: usize, diagnostics: &mut DiagnosticCollector) {
    tracing::trace!(roles = roles.len(), depth, "recursive role set discovery");
    let mut members: Vec<ElementId> = Vec::new();
    for role in roles {
        for member in model.role_raw_members(*role) {
            if !members.contains(member) {
                members.push(*member);
            }
        }
    }
    let mut by_role_name: BTreeMap<Arc<str>, Vec<&ConfigChild>> = BTreeMap::new();
    for member in &members {
        for child in model
            .element(*member)
            .config_children
            .iter()
            .filter(|c| ChildFilter::COMPATIBILITY.selector.matches(&c.common))
        {
            by_role_name.entry(child.role_name.clone()).or_default().push(child);
        }
    }

    let mut groups: Vec<Vec<RoleId>> = Vec::new();
    for (role_name, children) in by_role_name {
        match ConfigChildSetKind::of(children.iter().copied()) {
            ConfigChildSetKind::Text => {}
            ConfigChildSetKind::Mixed => {
                let subject = roles.first().map(|r| describe_role(model, *r)).unwrap_or_default();
                tracing::warn!(role = %role_name, %subject, "member config children combine object and text config children");
                diagnostics.mixed_config_child_set(&subject, &role_name);
            }
            ConfigChildSetKind::Object => {
                let mut group: Vec<RoleId> = children.iter().filter_map(|c| c.role()).collect();
                group.sort();
                group.dedup();
                groups.push(group);
            }
        }
    }

    for group in groups {
        let (_, is_new) = find_or_create_role_set(model, &group);
        if is_new {
            let mut next = group;
            sort_roles(model, &mut next);
            recurse(model, &next, depth + 1, diagnostics);
        }
    }
}

fn sort_roles(model: &Model, roles: &mut [RoleId]) {
    roles.sort_by(|a, b| model.role_sort_key(model.role(*a)).cmp(&model.role_sort_key(model.role(*b))));
}

// ============================================================================
// SHARED-SLOT COLLISIONS
// ============================================================================

/// Within a role set, an external name produced by two roles for different
/// elements cannot be told apart in the shared slot. It is removed from the
/// shared-slot members of every role producing it.
pub(crate) fn resolve_shared_slot_conflicts(model: &mut Model) -> usize {
    let mut conflicts: Vec<(RoleId, ElementId)> = Vec::new();
    let mut names_per_set: Vec<Vec<Arc<str>>> = Vec::with_capacity(model.role_sets.len());
    for set in &model.role_sets {
        let mut by_name: BTreeMap<String, Vec<(RoleId, ElementId)>> = BTreeMap::new();
        for role in &set.roles {
            for member in model.role_members(*role) {
                by_name
                    .entry(model.external_name(member, *role))
                    .or_default()
                    .push((*role, member));
            }
        }
        let mut conflicting = Vec::new();
        for (name, producers) in by_name {
            let roles: FxHashSet<RoleId> = producers.iter().map(|(r, _)| *r).collect();
            let elements: FxHashSet<ElementId> = producers.iter().map(|(_, e)| *e).collect();
            if roles.len() < 2 || elements.len() < 2 {
                continue;
            }
            tracing::trace!(role_set = %set.id, name = %name, "shared slot collision, removed from shared slot members");
            conflicts.extend(producers);
            conflicting.push(Arc::from(name));
        }
        names_per_set.push(conflicting);
    }
    let mut count = 0usize;
    for (set, names) in model.role_sets.iter_mut().zip(names_per_set) {
        count += names.len();
        set.conflicting_names = names;
    }
    for (role, element) in conflicts {
        model.roles[role.index()].shared_slot_conflicts.insert(element);
    }
    tracing::debug!(conflicts = count, "resolved shared slot collisions");
    count
}

/// A member named like the generic option of its capability role.
pub(crate) fn compute_default_option_conflicts(model: &mut Model) {
    let mut found: FxHashMap<RoleId, ElementId> = FxHashMap::default();
    for role in &model.roles {
        if !model.element_type(role.element_type).from_capability {
            continue;
        }
        let generic = model.generic_option_name(role.id);
        if let Some(member) = model
            .role_members(role.id)
            .into_iter()
            .find(|m| model.external_name(*m, role.id) == generic)
        {
            tracing::trace!(role = %role.role_name, member = %model.element(member).qualified_name, "default option conflict");
            found.insert(role.id, member);
        }
    }
    for (role, member) in found {
        model.roles[role.index()].default_option_conflict = Some(member);
    }
}
