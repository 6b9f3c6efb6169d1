//! Attribute typing: setter overloads, getter types and enum getters.

use frankdoc::diagnostics::codes;
use frankdoc::model::AttributeType;
use frankdoc::{ClassDescriptor, DescriptorSet, EnumDescriptor, RoleRuleTable};
use pretty_assertions::assert_eq;

use crate::helpers::fixtures::*;
use crate::helpers::model_assertions::*;

#[test]
fn test_inherited_setter_overload() {
    let set = DescriptorSet::new()
        .with_class(ClassDescriptor::class("a.Base").with_member(member("setTimeout", "int")))
        .with_class(
            ClassDescriptor::class("a.Derived")
                .with_parent("a.Base")
                .with_member(setter("setTimeout")),
        );
    let model = compile_all(&set, &RoleRuleTable::new());

    assert_single_diagnostic(&model, codes::OVERLOADED_ATTRIBUTE_SETTER, "a.Derived");
    let diagnostic = diagnostics_with_code(&model, codes::OVERLOADED_ATTRIBUTE_SETTER)[0];
    assert!(diagnostic.message.contains("String, int"), "{}", diagnostic.message);
    assert!(diagnostics_with_code(&model, codes::DUPLICATE_MEMBER).is_empty());
    assert_eq!(element(&model, "a.Derived").attributes()[0].value_type, AttributeType::Text);
}

#[test]
fn test_redeclared_setter_is_no_overload() {
    let set = DescriptorSet::new()
        .with_class(ClassDescriptor::class("a.Base").with_member(setter("setName")))
        .with_class(ClassDescriptor::class("a.Derived").with_parent("a.Base").with_member(setter("setName")));
    let model = compile_all(&set, &RoleRuleTable::new());
    assert!(model.diagnostics().is_empty(), "{:?}", model.diagnostics());
}

#[test]
fn test_getter_type_conflicts() {
    let set = DescriptorSet::new().with_class(
        ClassDescriptor::class("a.Timer")
            .with_member(member("setInterval", "int"))
            .with_getter("getInterval", "java.lang.Integer")
            .with_member(member("setActive", "boolean"))
            .with_getter("isActive", "Boolean")
            .with_member(setter("setLabel"))
            .with_getter("getLabel", "int"),
    );
    let model = compile_all(&set, &RoleRuleTable::new());

    let conflicts = diagnostics_with_code(&model, codes::GETTER_TYPE_CONFLICT);
    assert_eq!(conflicts.len(), 2, "{:?}", conflicts);
    assert!(conflicts.iter().any(|d| d.message.contains("setActive")));
    assert!(conflicts.iter().any(|d| d.message.contains("setLabel")));
    assert!(conflicts.iter().all(|d| d.subject.as_deref() == Some("a.Timer")));
    // a type conflict does not change the attribute
    assert_eq!(element(&model, "a.Timer").attributes().len(), 3);
}

#[test]
fn test_getter_wins_over_isser() {
    let set = DescriptorSet::new().with_class(
        ClassDescriptor::class("a.Flag")
            .with_member(member("setOn", "boolean"))
            .with_getter("getOn", "Boolean")
            .with_getter("isOn", "String"),
    );
    let model = compile_all(&set, &RoleRuleTable::new());
    assert!(diagnostics_with_code(&model, codes::GETTER_TYPE_CONFLICT).is_empty());
}

#[test]
fn test_enum_values_from_inherited_getter() {
    let set = DescriptorSet::new()
        .with_enum(EnumDescriptor::new("a.Mode").with_value("ON").with_value("OFF"))
        .with_class(ClassDescriptor::class("a.Base").with_getter("getModeEnum", "a.Mode"))
        .with_class(
            ClassDescriptor::class("a.Switch")
                .with_parent("a.Base")
                .with_member(setter("setMode").with_default("ON"))
                .with_member(setter("setLevel").with_default("HIGH")),
        );
    let model = compile_all(&set, &RoleRuleTable::new());

    let switch = element(&model, "a.Switch");
    let mode = &switch.attributes()[0];
    assert_eq!(mode.value_type, AttributeType::Text);
    let enumeration = model.attribute_enum(mode.enumeration.unwrap()).unwrap();
    assert_eq!(enumeration.qualified_name(), "a.Mode");
    assert_eq!(switch.attributes()[1].enumeration, None);
    assert!(model.diagnostics().is_empty(), "{:?}", model.diagnostics());
}

#[test]
fn test_enum_getter_checks_default_value() {
    let set = DescriptorSet::new()
        .with_enum(EnumDescriptor::new("a.Mode").with_value("ON"))
        .with_class(
            ClassDescriptor::class("a.Switch")
                .with_member(setter("setMode").with_default("DIMMED"))
                .with_getter("getModeEnum", "a.Mode"),
        );
    let model = compile_all(&set, &RoleRuleTable::new());
    assert_single_diagnostic(&model, codes::INVALID_DEFAULT, "a.Switch");
}
