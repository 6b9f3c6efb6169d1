//! Capability exclusion: "ignore membership in capability X".
//!
//! A class tagged this way must not offer the attributes it only has because
//! it implements X. The rejection set is computed from descriptors before
//! the member pass.

use std::collections::BTreeSet;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::base::naming::attribute_name_of;
use crate::descriptor::{ClassDescriptor, DescriptorSource};
use crate::rules::RoleRuleTable;

/// Attribute names rejected by the capability exclusions of `class`. Sorted.
pub(crate) fn rejected_attribute_names(
    class: &ClassDescriptor,
    source: &dyn DescriptorSource,
    rules: &RoleRuleTable,
) -> Vec<Arc<str>> {
    let mut result: BTreeSet<Arc<str>> = BTreeSet::new();
    for excluded in &class.doc.ignore_type_membership {
        let rejected = rejection_for(class, excluded, source, rules);
        tracing::trace!(
            class = %class.qualified_name,
            capability = %excluded,
            rejected = rejected.len(),
            "computed capability rejection set"
        );
        result.extend(rejected);
    }
    result.into_iter().collect()
}

fn rejection_for(
    class: &ClassDescriptor,
    excluded: &str,
    source: &dyn DescriptorSource,
    rules: &RoleRuleTable,
) -> BTreeSet<Arc<str>> {
    let Some(capability) = source.find_class(excluded) else {
        tracing::warn!(class = %class.qualified_name, capability = excluded, "ignored capability is unknown");
        return BTreeSet::new();
    };
    let excluded_family = super_interfaces_or_self(capability, source);
    let mut rejected: BTreeSet<Arc<str>> = BTreeSet::new();
    for name in &excluded_family {
        if let Some(interface) = source.find_class(name) {
            rejected.extend(declared_attribute_names(interface, rules));
        }
    }

    // Capabilities reached independently of the excluded one keep their attributes.
    for name in interfaces_of_hierarchy(class, source) {
        if excluded_family.contains(&name) {
            continue;
        }
        let Some(interface) = source.find_class(&name) else {
            continue;
        };
        if super_interfaces_or_self(interface, source).contains(excluded) {
            continue;
        }
        for attribute in declared_attribute_names(interface, rules) {
            rejected.remove(&attribute);
        }
    }

    // So do ancestors that do not implement the excluded capability.
    let mut ancestor = class.parent.as_deref().and_then(|p| source.find_class(p));
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    while let Some(current) = ancestor {
        if !visited.insert(&current.qualified_name) {
            break;
        }
        if !interfaces_of_hierarchy(current, source).contains(excluded) {
            for attribute in declared_attribute_names(current, rules) {
                rejected.remove(&attribute);
            }
        }
        ancestor = current.parent.as_deref().and_then(|p| source.find_class(p));
    }
    rejected
}

/// Attribute names of the setters declared directly on `class`.
pub(crate) fn declared_attribute_names(class: &ClassDescriptor, rules: &RoleRuleTable) -> Vec<Arc<str>> {
    class
        .members
        .iter()
        .filter(|m| !rules.contains(&m.name))
        .filter_map(|m| attribute_name_of(&m.name))
        .map(Arc::from)
        .collect()
}

/// `interface` and all interfaces it extends, transitively.
fn super_interfaces_or_self(interface: &ClassDescriptor, source: &dyn DescriptorSource) -> FxHashSet<Arc<str>> {
    let mut result: FxHashSet<Arc<str>> = FxHashSet::default();
    let mut stack = vec![interface.qualified_name.clone()];
    while let Some(name) = stack.pop() {
        if !result.insert(name.clone()) {
            continue;
        }
        if let Some(current) = source.find_class(&name) {
            stack.extend(current.interfaces.iter().cloned());
        }
    }
    result
}

/// Every interface implemented by `class` or one of its ancestors, transitively.
fn interfaces_of_hierarchy(class: &ClassDescriptor, source: &dyn DescriptorSource) -> FxHashSet<Arc<str>> {
    let mut result: FxHashSet<Arc<str>> = FxHashSet::default();
    let mut visited: FxHashSet<Arc<str>> = FxHashSet::default();
    let mut current = Some(class);
    while let Some(c) = current {
        if !visited.insert(c.qualified_name.clone()) {
            break;
        }
        for interface in &c.interfaces {
            match source.find_class(interface) {
                Some(found) => result.extend(super_interfaces_or_self(found, source)),
                None => {
                    result.insert(interface.clone());
                }
            }
        }
        current = c.parent.as_deref().and_then(|p| source.find_class(p));
    }
    result
}
