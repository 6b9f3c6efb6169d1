//! Assertion helpers over compiled models.

use std::collections::HashSet;

use frankdoc::model::{Attribute, ConfigChild};
use frankdoc::{Diagnostic, ElementDefinition, ElementRole, Model};

/// The element with `qualified_name`, or panic.
pub fn element<'a>(model: &'a Model, qualified_name: &str) -> &'a ElementDefinition {
    model
        .find_element(qualified_name)
        .unwrap_or_else(|| panic!("Expected element '{}' to exist", qualified_name))
}

/// The role of `type_name` under `role_name`, or panic.
pub fn role<'a>(model: &'a Model, type_name: &str, role_name: &str) -> &'a ElementRole {
    model
        .find_role(type_name, role_name)
        .unwrap_or_else(|| panic!("Expected role ({}, {}) to exist", type_name, role_name))
}

pub fn attribute_names(attributes: &[&Attribute]) -> Vec<String> {
    attributes.iter().map(|a| a.name.to_string()).collect()
}

pub fn role_names(children: &[&ConfigChild]) -> Vec<String> {
    children.iter().map(|c| c.role_name.to_string()).collect()
}

/// Qualified names of `ids`.
pub fn names_of(model: &Model, ids: &[frankdoc::base::ElementId]) -> Vec<String> {
    ids.iter().map(|id| model.element(*id).qualified_name().to_string()).collect()
}

/// Assert that no element declares two members of one kind with the same key.
pub fn assert_unique_member_keys(model: &Model) {
    for element in model.elements() {
        let mut seen = HashSet::new();
        for attribute in element.attributes() {
            assert!(
                seen.insert(attribute.key()),
                "Duplicate attribute '{}' on {}",
                attribute.name,
                element.qualified_name()
            );
        }
        let mut seen = HashSet::new();
        for child in element.config_children() {
            assert!(
                seen.insert(child.key()),
                "Duplicate config child {} on {}",
                child.key(),
                element.qualified_name()
            );
        }
    }
}

/// Diagnostics with `code`.
pub fn diagnostics_with_code<'a>(model: &'a Model, code: &str) -> Vec<&'a Diagnostic> {
    model
        .diagnostics()
        .iter()
        .filter(|d| d.code.as_deref() == Some(code))
        .collect()
}

/// Assert exactly one diagnostic with `code` about `subject`.
pub fn assert_single_diagnostic(model: &Model, code: &str, subject: &str) {
    let found = diagnostics_with_code(model, code);
    assert_eq!(found.len(), 1, "Expected one {} diagnostic, got {:?}", code, model.diagnostics());
    assert_eq!(found[0].subject.as_deref(), Some(subject));
}
