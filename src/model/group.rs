//! Display groups for documentation tables of contents.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::base::TypeId;

use super::types::ElementType;

/// A named, ordered group of element types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayGroup {
    pub(crate) name: Arc<str>,
    pub(crate) order: i32,
    /// Sorted by simple name, then qualified name.
    pub(crate) element_types: Vec<TypeId>,
}

impl DisplayGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn element_types(&self) -> &[TypeId] {
        &self.element_types
    }
}

/// Group element types by their group name, sorted by (order, name).
///
/// The default group is always present, even when empty.
pub(crate) fn build_groups(types: &[ElementType], default_name: &Arc<str>, default_order: i32) -> Vec<DisplayGroup> {
    let mut groups: IndexMap<Arc<str>, DisplayGroup> = IndexMap::new();
    groups.insert(
        default_name.clone(),
        DisplayGroup {
            name: default_name.clone(),
            order: default_order,
            element_types: Vec::new(),
        },
    );
    for ty in types {
        let group = groups.entry(ty.group_name.clone()).or_insert_with(|| DisplayGroup {
            name: ty.group_name.clone(),
            order: ty.group_order,
            element_types: Vec::new(),
        });
        // The lowest order declared for a group wins.
        group.order = group.order.min(ty.group_order);
        group.element_types.push(ty.id);
    }
    let mut result: Vec<DisplayGroup> = groups.into_values().collect();
    for group in &mut result {
        group.element_types.sort_by(|a, b| {
            let (a, b) = (&types[a.index()], &types[b.index()]);
            (&a.simple_name, &a.qualified_name).cmp(&(&b.simple_name, &b.qualified_name))
        });
    }
    result.sort_by(|a, b| (a.order, &a.name).cmp(&(b.order, &b.name)));
    tracing::debug!(groups = result.len(), "built display groups");
    result
}
