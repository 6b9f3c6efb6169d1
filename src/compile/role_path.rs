//! Role-path legality: config children must be reachable along the
//! nesting pattern they were registered with.
//!
//! The walk starts at the subject config child and goes backward through
//! config parents, consuming one pattern component per step. That bounds
//! the walk on cyclic nesting graphs.

use std::sync::Arc;

use crate::base::ElementId;
use crate::model::{ConfigChildRef, Model};
use crate::rules::{RolePattern, RoleRuleTable};

/// Record, for every element, the object config children that can nest it.
pub(crate) fn compute_config_parents(model: &mut Model) {
    for element in &mut model.elements {
        element.config_parents.clear();
    }
    let mut links: Vec<(ElementId, ConfigChildRef)> = Vec::new();
    for element in &model.elements {
        for (index, child) in element.config_children.iter().enumerate() {
            let Some(element_type) = child.element_type() else {
                continue;
            };
            for member in &model.types[element_type.index()].members {
                links.push((
                    *member,
                    ConfigChildRef {
                        owner: element.id,
                        index,
                    },
                ));
            }
        }
    }
    for (member, parent) in links {
        model.elements[member.index()].config_parents.push(parent);
    }
    for element in &mut model.elements {
        element.config_parents.sort();
        element.config_parents.dedup();
    }
}

/// Move config children whose role path matches no pattern to the omitted list.
pub(crate) fn check_role_paths(model: &mut Model, rules: &RoleRuleTable) {
    let descendants = descendants_or_self(model);
    let mut omitted: Vec<ConfigChildRef> = Vec::new();
    for element in &model.elements {
        for (index, child) in element.config_children.iter().enumerate() {
            let Some(rule) = rules.get(&child.common.method_name) else {
                continue;
            };
            let walk = PathWalk {
                model,
                descendants: &descendants,
            };
            if !walk.matches(element.id, &child.role_name, &rule.pattern) {
                tracing::trace!(
                    element = %element.qualified_name,
                    method = %child.common.method_name,
                    pattern = %rule.pattern,
                    "config child does not match its role path, omitted"
                );
                omitted.push(ConfigChildRef {
                    owner: element.id,
                    index,
                });
            }
        }
    }
    tracing::debug!(omitted = omitted.len(), "checked role paths");

    // Remove from the back so earlier indices stay valid.
    for child in omitted.into_iter().rev() {
        let element = &mut model.elements[child.owner.index()];
        let removed = element.config_children.remove(child.index);
        element.omitted_config_children.insert(0, removed);
    }
    for element in &mut model.elements {
        element.omitted_config_children.sort_by_key(|c| c.common.order);
    }
}

struct PathWalk<'m> {
    model: &'m Model,
    descendants: &'m [Vec<ElementId>],
}

impl PathWalk<'_> {
    fn matches(&self, owner: ElementId, role_name: &str, pattern: &RolePattern) -> bool {
        let components = pattern.components();
        let Some((last, outer)) = components.split_last() else {
            return false;
        };
        if &**last != role_name {
            return false;
        }
        if pattern.is_anchored() {
            match outer.split_first() {
                Some((root, between)) => self.walk(owner, between, Some(root)),
                // A root pattern registers a child that only a root may hold.
                None => self.walk(owner, &[], Some(last)),
            }
        } else {
            self.walk(owner, outer, None)
        }
    }

    /// Match `remaining` (outermost first) against the config parents of
    /// `element` and of the elements inheriting from it.
    fn walk(&self, element: ElementId, remaining: &[Arc<str>], root: Option<&Arc<str>>) -> bool {
        let candidates = &self.descendants[element.index()];
        let Some((next, rest)) = remaining.split_last() else {
            return match root {
                None => true,
                Some(root) => candidates
                    .iter()
                    .any(|c| self.model.element(*c).root_role.as_ref() == Some(root)),
            };
        };
        candidates.iter().any(|candidate| {
            self.model
                .element(*candidate)
                .config_parents
                .iter()
                .map(|parent| (parent.owner, self.model.config_child(*parent)))
                .any(|(owner, parent)| parent.role_name == *next && self.walk(owner, rest, root))
        })
    }
}

/// For every element, the element itself and everything inheriting from it.
fn descendants_or_self(model: &Model) -> Vec<Vec<ElementId>> {
    let mut result: Vec<Vec<ElementId>> = model.elements.iter().map(|e| vec![e.id]).collect();
    for element in &model.elements {
        let mut current = element.parent;
        while let Some(ancestor) = current {
            result[ancestor.index()].push(element.id);
            current = model.elements[ancestor.index()].parent;
        }
    }
    result
}
