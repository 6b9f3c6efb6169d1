//! Ancestor child navigation: cumulative (declared + inherited) members.
//!
//! The walk starts at the subject element and visits ancestors that declare
//! any selected or rejected member. Keys seen at lower levels hide the
//! members with the same key higher up. As soon as no seen key occurs in the
//! rest of the chain, the remaining walk is exactly the cumulative list of
//! that ancestor, and the walk ends with one "cumulative children of"
//! callback. Renderers map the callbacks to declared and cumulative group
//! references.

use std::marker::PhantomData;

use rustc_hash::FxHashSet;

use crate::base::ElementId;
use crate::error::{ConfigurationModelError, Result};

use super::Model;
use super::element::ElementDefinition;
use super::filter::ChildFilter;
use super::member::{ElementChild, MemberKey};

/// Receives the steps of a cumulative walk.
pub trait CumulativeChildHandler<'m, T: ElementChild> {
    /// All selected children declared on `element`.
    fn handle_children_of(&mut self, element: &'m ElementDefinition) -> Result<()>;

    /// These selected children declared on `owner`; the others are overridden.
    fn handle_selected_children(&mut self, children: Vec<&'m T>, owner: &'m ElementDefinition) -> Result<()>;

    /// All cumulative children of `element`.
    fn handle_cumulative_children_of(&mut self, element: &'m ElementDefinition) -> Result<()>;
}

/// Walks the ancestor chain of one subject for one member kind.
pub struct AncestorChildNavigation<'m, 'h, T: ElementChild> {
    model: &'m Model,
    filter: ChildFilter,
    handler: &'h mut dyn CumulativeChildHandler<'m, T>,
    /// Keys selected or rejected at the levels visited so far.
    seen: FxHashSet<MemberKey>,
    _kind: PhantomData<T>,
}

impl<'m, 'h, T: ElementChild + 'm> AncestorChildNavigation<'m, 'h, T> {
    pub fn new(model: &'m Model, filter: ChildFilter, handler: &'h mut dyn CumulativeChildHandler<'m, T>) -> Self {
        Self {
            model,
            filter,
            handler,
            seen: FxHashSet::default(),
            _kind: PhantomData,
        }
    }

    /// Walk from `subject` upward.
    pub fn run(mut self, subject: ElementId) -> Result<()> {
        let mut current = self.model.element(subject);
        self.enter(current)?;
        while let Some(next) = self.next_ancestor_with_children(current) {
            if !self.chain_declares_seen_key(next) {
                tracing::trace!(
                    subject = %self.model.element(subject).qualified_name(),
                    ancestor = %next.qualified_name(),
                    "no overridden keys above, using cumulative children of ancestor"
                );
                return self.handler.handle_cumulative_children_of(next);
            }
            self.enter(next)?;
            current = next;
        }
        Ok(())
    }

    fn enter(&mut self, element: &'m ElementDefinition) -> Result<()> {
        let (selected, rejected) = self.classify(element)?;
        if selected.iter().any(|c| self.seen.contains(&c.key())) {
            let remaining: Vec<&'m T> = selected
                .iter()
                .copied()
                .filter(|c| !self.seen.contains(&c.key()))
                .collect();
            self.handler.handle_selected_children(remaining, element)?;
        } else if !selected.is_empty() {
            self.handler.handle_children_of(element)?;
        }
        self.seen.extend(selected.iter().map(|c| c.key()));
        self.seen.extend(rejected.iter().map(|c| c.key()));
        Ok(())
    }

    /// Split the declared children of `element` into selected and rejected.
    fn classify(&self, element: &'m ElementDefinition) -> Result<(Vec<&'m T>, Vec<&'m T>)> {
        let mut selected = Vec::new();
        let mut rejected = Vec::new();
        for child in T::children_of(element) {
            let is_selected = self.filter.selector.matches(child.common());
            let is_rejected = self.filter.rejector.matches(child.common());
            match (is_selected, is_rejected) {
                (true, true) => {
                    return Err(ConfigurationModelError::SelectorRejectorOverlap {
                        element: element.qualified_name.clone(),
                        member: child.key().to_string().into(),
                    });
                }
                (true, false) => selected.push(child),
                (false, true) => rejected.push(child),
                (false, false) => {}
            }
        }
        Ok((selected, rejected))
    }

    fn is_relevant(&self, child: &T) -> bool {
        self.filter.selector.matches(child.common()) || self.filter.rejector.matches(child.common())
    }

    fn next_ancestor_with_children(&self, element: &'m ElementDefinition) -> Option<&'m ElementDefinition> {
        let mut current = element.parent.map(|p| self.model.element(p));
        while let Some(candidate) = current {
            if T::children_of(candidate).iter().any(|c| self.is_relevant(c)) {
                return Some(candidate);
            }
            current = candidate.parent.map(|p| self.model.element(p));
        }
        None
    }

    fn chain_declares_seen_key(&self, element: &'m ElementDefinition) -> bool {
        self.model.ancestors_or_self(element.id).any(|e| {
            T::children_of(e)
                .iter()
                .any(|c| self.is_relevant(c) && self.seen.contains(&c.key()))
        })
    }
}

/// Handler that flattens the walk into a list.
pub(crate) struct CollectingHandler<'m, T> {
    model: &'m Model,
    filter: ChildFilter,
    result: Vec<&'m T>,
}

impl<'m, T: ElementChild + 'm> CollectingHandler<'m, T> {
    pub(crate) fn new(model: &'m Model, filter: ChildFilter) -> Self {
        Self {
            model,
            filter,
            result: Vec::new(),
        }
    }

    pub(crate) fn collect(mut self, subject: ElementId) -> Result<Vec<&'m T>> {
        let (model, filter) = (self.model, self.filter);
        AncestorChildNavigation::new(model, filter, &mut self).run(subject)?;
        Ok(self.result)
    }
}

impl<'m, T: ElementChild + 'm> CumulativeChildHandler<'m, T> for CollectingHandler<'m, T> {
    fn handle_children_of(&mut self, element: &'m ElementDefinition) -> Result<()> {
        let selector = self.filter.selector;
        self.result
            .extend(T::children_of(element).iter().filter(|c| selector.matches(c.common())));
        Ok(())
    }

    fn handle_selected_children(&mut self, children: Vec<&'m T>, _owner: &'m ElementDefinition) -> Result<()> {
        self.result.extend(children);
        Ok(())
    }

    fn handle_cumulative_children_of(&mut self, element: &'m ElementDefinition) -> Result<()> {
        let (model, filter) = (self.model, self.filter);
        AncestorChildNavigation::new(model, filter, self).run(element.id)
    }
}
