//! Model compilation: descriptors and role rules in, [`Model`] out.
//!
//! ## Pipeline
//!
//! ```text
//! roots → descendants (worklist) → config parents → role-path check
//!       → promotion → overrides → naming collisions → config child sets
//!       → recursive role sets → shared slots → external names → groups
//! ```
//!
//! Authoring errors scoped to one element are recorded as diagnostics and
//! compilation continues. Fatal errors abort the run.

mod builder;
mod conflicts;
mod exclusion;
mod members;
mod overrides;
mod role_path;

use std::sync::Arc;

use crate::base::ElementId;
use crate::descriptor::DescriptorSource;
use crate::diagnostics::Severity;
use crate::error::Result;
use crate::model::{Model, ModelStatistics, group};
use crate::options::CompilerOptions;
use crate::rules::RoleRuleTable;

use builder::ModelBuilder;

/// Compile every element reachable from the configured roots.
///
/// With no roots configured, every class of `source` is compiled.
pub fn compile(source: &dyn DescriptorSource, rules: &RoleRuleTable, options: &CompilerOptions) -> Result<Model> {
    tracing::debug!(roots = options.roots.len(), rules = rules.len(), "compiling model");

    let mut builder = ModelBuilder::new(source, rules, options);
    builder.create_roots();
    builder.build_descendants();
    builder.mark_interface_based();
    let (mut model, mut diagnostics) = builder.finish();
    for rejected in rules.rejected() {
        diagnostics.malformed_role_rule(&rejected.record.pattern, &rejected.reason);
    }

    role_path::compute_config_parents(&mut model);
    if options.check_role_paths {
        role_path::check_role_paths(&mut model, rules);
        role_path::compute_config_parents(&mut model);
    }

    conflicts::compute_highest_common_supertypes(&mut model, source, &mut diagnostics);
    conflicts::promote_roles(&mut model);
    overrides::compute_overrides(&mut model);

    let unresolved = conflicts::resolve_naming_collisions(&mut model, &mut diagnostics);
    conflicts::create_config_child_sets(&mut model, &mut diagnostics)?;
    conflicts::create_recursive_role_sets(&mut model, &mut diagnostics);
    let shared_slot_conflicts = conflicts::resolve_shared_slot_conflicts(&mut model);
    conflicts::compute_default_option_conflicts(&mut model);

    assign_external_names(&mut model);
    model.groups = group::build_groups(&model.types, &options.default_group_name, options.default_group_order);

    model.diagnostics = diagnostics.finish();
    let mut statistics = count(&model);
    statistics.unresolved_name_collisions = unresolved;
    statistics.shared_slot_conflicts = shared_slot_conflicts;
    model.statistics = statistics;

    tracing::debug!(
        elements = model.statistics.elements,
        failed = model.statistics.failed_elements,
        errors = model.statistics.errors,
        warnings = model.statistics.warnings,
        "compiled model"
    );
    Ok(model)
}

/// Names under which each element can appear in a configuration file.
fn assign_external_names(model: &mut Model) {
    let mut names: Vec<(ElementId, Arc<str>)> = Vec::new();
    for root in &model.roots {
        let element = model.element(*root);
        names.push((*root, element.simple_name.clone()));
    }
    for role in &model.roles {
        for member in model.role_members(role.id) {
            names.push((member, Arc::from(model.external_name(member, role.id))));
        }
    }
    for (element, name) in names {
        model.elements[element.index()].external_names.push(name);
    }
    for element in &mut model.elements {
        element.external_names.sort();
        element.external_names.dedup();
    }
}

fn count(model: &Model) -> ModelStatistics {
    let elements = model.elements();
    ModelStatistics {
        elements: elements.len(),
        abstract_elements: elements.iter().filter(|e| e.is_abstract).count(),
        element_types: model.types.len(),
        capability_types: model.types.iter().filter(|t| t.from_capability).count(),
        element_roles: model.roles.len(),
        element_role_sets: model.role_sets.len(),
        attribute_enums: model.enums.len(),
        attributes: elements.iter().map(|e| e.attributes.len()).sum(),
        config_children: elements.iter().map(|e| e.config_children.len()).sum(),
        omitted_config_children: elements.iter().map(|e| e.omitted_config_children.len()).sum(),
        technical_overrides: elements.iter().map(|e| e.statistics.technical_overrides).sum(),
        failed_elements: model.failed.len(),
        errors: model.diagnostics.iter().filter(|d| d.severity == Severity::Error).count(),
        warnings: model.diagnostics.iter().filter(|d| d.severity == Severity::Warning).count(),
        ..ModelStatistics::default()
    }
}
