//! End-to-end compilation of the adapter framework fixture.

use frankdoc::model::{AttributeType, ConfigChildRef, ConfigChildSetKind};
use frankdoc::{ChildFilter, CompilerOptions, compile};
use pretty_assertions::assert_eq;

use crate::helpers::fixtures::*;
use crate::helpers::model_assertions::*;

#[test]
fn test_statistics() {
    let model = compile_frank();
    let stats = model.statistics();
    assert_eq!(stats.elements, 10);
    assert_eq!(stats.abstract_elements, 1);
    assert_eq!(stats.element_types, 7);
    assert_eq!(stats.capability_types, 2);
    assert_eq!(stats.element_roles, 7);
    assert_eq!(stats.element_role_sets, 7);
    assert_eq!(stats.attribute_enums, 2);
    assert_eq!(stats.attributes, 16);
    assert_eq!(stats.config_children, 8);
    assert_eq!(stats.omitted_config_children, 0);
    assert_eq!(stats.technical_overrides, 1);
    assert_eq!(stats.failed_elements, 0);
    assert!(model.diagnostics().is_empty(), "{:?}", model.diagnostics());
}

#[test]
fn test_root_element() {
    let model = compile_frank();
    let configuration = element(&model, &frank("Configuration"));
    assert!(configuration.is_root());
    assert_eq!(configuration.root_role(), Some("configuration"));
    assert_eq!(model.roots(), &[configuration.id()]);
    assert!(!element(&model, &frank("Adapter")).is_root());
}

#[test]
fn test_capability_types_hold_concrete_implementations() {
    let model = compile_frank();
    let pipes = model.find_element_type(&frank("IPipe")).unwrap();
    assert!(pipes.is_from_capability());
    assert_eq!(
        names_of(&model, pipes.members()),
        vec![frank("EchoPipe"), frank("FixedResultPipe")]
    );
    assert!(element(&model, &frank("EchoPipe")).is_interface_based());
    assert!(!element(&model, &frank("Adapter")).is_interface_based());
    assert!(element(&model, &frank("AbstractPipe")).is_abstract());
}

#[test]
fn test_config_children() {
    let model = compile_frank();
    let adapter = element(&model, &frank("Adapter"));
    let children = adapter.config_children();
    assert_eq!(children.len(), 2);
    assert_eq!(&*children[0].role_name, "pipeline");
    assert!(children[0].mandatory);
    assert!(!children[0].allow_multiple);
    assert_eq!(&*children[1].role_name, "receiver");
    assert!(children[1].allow_multiple);

    let configuration = element(&model, &frank("Configuration"));
    let note = &configuration.config_children()[1];
    assert!(note.is_text());
    assert_eq!(note.role(), None);
}

#[test]
fn test_attributes_and_enums() {
    let model = compile_frank();
    let listener = element(&model, &frank("JavaListener"));
    let mode = &listener.attributes()[1];
    assert_eq!(&*mode.name, "mode");
    assert_eq!(mode.value_type, AttributeType::Text);
    let enumeration = model.attribute_enum(mode.enumeration.unwrap()).unwrap();
    assert_eq!(enumeration.name(), "ListenerMode");
    assert_eq!(enumeration.values().len(), 2);
    assert_eq!(model.find_attribute_enum(&frank("ParameterType")).unwrap().name(), "ParameterType");

    let abstract_pipe = element(&model, &frank("AbstractPipe"));
    assert_eq!(abstract_pipe.attributes()[1].value_type, AttributeType::Boolean);
    assert_eq!(abstract_pipe.attributes()[1].default_value.as_deref(), Some("true"));
    assert!(abstract_pipe.attributes()[0].common.documented);
}

#[test]
fn test_external_names() {
    let model = compile_frank();
    let names = |name: &str| -> Vec<String> {
        element(&model, &frank(name))
            .external_names()
            .iter()
            .map(|n| n.to_string())
            .collect()
    };
    assert_eq!(names("Configuration"), vec!["Configuration"]);
    assert_eq!(names("PipeLine"), vec!["Pipeline"]);
    assert_eq!(names("EchoPipe"), vec!["EchoPipe"]);
    assert_eq!(names("FixedResultPipe"), vec!["FixedResultPipe"]);
    assert_eq!(names("JavaListener"), vec!["JavaListener"]);
    assert_eq!(names("Parameter"), vec!["Param"]);
    assert!(names("AbstractPipe").is_empty());

    let outside: Vec<&str> = model
        .elements_outside_config_children()
        .iter()
        .map(|e| e.qualified_name())
        .collect();
    assert_eq!(outside, vec![frank("Configuration").as_str()]);
}

#[test]
fn test_roles_sorted() {
    let model = compile_frank();
    let roles: Vec<&str> = model.list_all_element_roles().iter().map(|r| r.role_name()).collect();
    assert_eq!(
        roles,
        vec!["adapter", "forward", "listener", "param", "pipe", "pipeline", "receiver"]
    );
}

#[test]
fn test_config_parents() {
    let model = compile_frank();
    let adapter = element(&model, &frank("Adapter")).id();
    let pipeline = element(&model, &frank("PipeLine"));
    assert_eq!(pipeline.config_parents(), &[ConfigChildRef { owner: adapter, index: 0 }]);

    let echo = element(&model, &frank("EchoPipe"));
    assert_eq!(echo.config_parents().len(), 1);
    assert_eq!(&*model.config_child(echo.config_parents()[0]).role_name, "pipe");
}

#[test]
fn test_config_child_sets() {
    let model = compile_frank();
    let configuration = element(&model, &frank("Configuration"));
    let sets = configuration.config_child_sets();
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0].role_name(), "adapter");
    assert_eq!(sets[0].kind(), ConfigChildSetKind::Object);
    assert!(sets[0].role_set().is_some());
    assert_eq!(sets[1].kind(), ConfigChildSetKind::Text);
    assert_eq!(sets[1].role_set(), None);

    let echo = element(&model, &frank("EchoPipe"));
    assert!(echo.config_child_sets().is_empty());
    let inherited: Vec<&str> = model
        .cumulative_config_child_sets(echo.id())
        .iter()
        .map(|s| s.role_name())
        .collect();
    assert_eq!(inherited, vec!["forward", "param"]);
}

#[test]
fn test_cumulative_config_children_inherited() {
    let model = compile_frank();
    let echo = element(&model, &frank("EchoPipe")).id();
    let children = model.cumulative_config_children(echo, ChildFilter::STRICT).unwrap();
    assert_eq!(role_names(&children), vec!["forward", "param"]);
}

#[test]
fn test_determinism() {
    let first = compile_frank();
    let second = compile_frank();
    assert_eq!(format!("{:?}", first), format!("{:?}", second));

    for element in first.list_all_elements() {
        let a = first.cumulative_attributes(element.id(), ChildFilter::STRICT).unwrap();
        let b = second.cumulative_attributes(element.id(), ChildFilter::STRICT).unwrap();
        assert_eq!(attribute_names(&a), attribute_names(&b));
    }
}

#[test]
fn test_member_keys_unique() {
    assert_unique_member_keys(&compile_frank());
}

#[test]
fn test_compile_everything_without_roots() {
    let model = compile(&frank_descriptors(), &frank_rules(), &CompilerOptions::default()).unwrap();
    assert!(model.roots().is_empty());
    assert_eq!(model.statistics().elements, 10);
    assert!(model.find_element(&frank("IPipe")).is_none());
}
