//! Override analysis: overridden_from, technical overrides, inherited deprecation.

use frankdoc::{ChildFilter, ClassDescriptor, DescriptorSet, RoleRuleTable};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::helpers::fixtures::*;
use crate::helpers::model_assertions::*;

fn base_and_derived(derived_x: frankdoc::MemberDescriptor) -> DescriptorSet {
    DescriptorSet::new()
        .with_class(ClassDescriptor::class("t.Base").with_member(setter("setX")))
        .with_class(ClassDescriptor::class("t.Derived").with_parent("t.Base").with_member(derived_x))
}

#[test]
fn test_redeclared_setter_is_technical_override() {
    let model = compile_all(&base_and_derived(setter("setX")), &RoleRuleTable::new());
    let base = element(&model, "t.Base").id();
    let derived = element(&model, "t.Derived").id();

    let cumulative = model.cumulative_attributes(derived, ChildFilter::STRICT).unwrap();
    assert_eq!(attribute_names(&cumulative), vec!["x"]);
    let x = cumulative[0];
    assert_eq!(x.common.owner, derived);
    assert!(x.common.technical_override);
    assert_eq!(x.common.overridden_from, Some(base));
}

#[rstest]
#[case::documented(setter("setX").with_documentation("The x"))]
#[case::with_default(setter("setX").with_default("a"))]
#[case::deprecated(setter("setX").deprecated())]
fn test_visible_change_is_real_override(#[case] derived_x: frankdoc::MemberDescriptor) {
    let model = compile_all(&base_and_derived(derived_x), &RoleRuleTable::new());
    let derived = element(&model, "t.Derived");
    let x = &derived.attributes()[0];
    assert!(!x.common.technical_override);
    assert_eq!(x.common.overridden_from, Some(element(&model, "t.Base").id()));
}

#[test]
fn test_technical_override_inherits_deprecation() {
    let set = DescriptorSet::new()
        .with_class(ClassDescriptor::class("t.Base").with_member(setter("setX").deprecated()))
        .with_class(ClassDescriptor::class("t.Derived").with_parent("t.Base").with_member(setter("setX")));
    let model = compile_all(&set, &RoleRuleTable::new());
    let x = &element(&model, "t.Derived").attributes()[0];
    assert!(x.common.technical_override);
    assert!(x.common.deprecated);

    let strict = model
        .cumulative_attributes(element(&model, "t.Derived").id(), ChildFilter::STRICT)
        .unwrap();
    assert!(strict.is_empty());
}

#[test]
fn test_override_from_nearest_declaring_ancestor() {
    let set = DescriptorSet::new()
        .with_class(ClassDescriptor::class("t.Root").with_member(setter("setX")))
        .with_class(ClassDescriptor::class("t.Middle").with_parent("t.Root").with_member(setter("setY")))
        .with_class(ClassDescriptor::class("t.Leaf").with_parent("t.Middle").with_member(setter("setX")));
    let model = compile_all(&set, &RoleRuleTable::new());
    let x = &element(&model, "t.Leaf").attributes()[0];
    assert_eq!(x.common.overridden_from, Some(element(&model, "t.Root").id()));
    assert!(element(&model, "t.Middle").attributes()[0].common.overridden_from.is_none());
}

#[test]
fn test_no_parent_cumulative_equals_declared() {
    let set = DescriptorSet::new().with_class(
        ClassDescriptor::class("t.Alone")
            .with_member(setter("setB"))
            .with_member(setter("setA"))
            .with_member(setter("setC")),
    );
    let model = compile_all(&set, &RoleRuleTable::new());
    let alone = element(&model, "t.Alone");
    let cumulative = model.cumulative_attributes(alone.id(), ChildFilter::ALL).unwrap();
    let declared: Vec<&frankdoc::model::Attribute> = alone.attributes().iter().collect();
    assert_eq!(cumulative, declared);
}

#[test]
fn test_non_overriding_parent_appends() {
    let set = DescriptorSet::new()
        .with_class(ClassDescriptor::class("t.Parent").with_member(setter("setC")))
        .with_class(
            ClassDescriptor::class("t.Child")
                .with_parent("t.Parent")
                .with_member(setter("setB"))
                .with_member(setter("setA")),
        );
    let model = compile_all(&set, &RoleRuleTable::new());
    let child = element(&model, "t.Child").id();
    let cumulative = model.cumulative_attributes(child, ChildFilter::ALL).unwrap();
    assert_eq!(attribute_names(&cumulative), vec!["b", "a", "c"]);
}

#[test]
fn test_config_child_override_with_changed_multiplicity_is_real() {
    let rules = object_rules(&[("*/item", "addItem"), ("*/item", "setItem")]);
    let set = DescriptorSet::new()
        .with_class(ClassDescriptor::class("t.Item"))
        .with_class(ClassDescriptor::class("t.Base").with_member(member("addItem", "t.Item")))
        .with_class(
            ClassDescriptor::class("t.Single")
                .with_parent("t.Base")
                .with_member(member("setItem", "t.Item")),
        )
        .with_class(
            ClassDescriptor::class("t.Same")
                .with_parent("t.Base")
                .with_member(member("addItem", "t.Item")),
        );
    let model = compile_all(&set, &rules);
    let single = &element(&model, "t.Single").config_children()[0];
    assert!(single.common.overridden_from.is_some());
    assert!(!single.common.technical_override);

    let same = &element(&model, "t.Same").config_children()[0];
    assert!(same.common.technical_override);
    assert_eq!(model.statistics().technical_overrides, 1);
}

#[test]
fn test_frank_fixed_result_pipe() {
    let model = compile_frank();
    let fixed = element(&model, &frank("FixedResultPipe"));
    let cumulative = model.cumulative_attributes(fixed.id(), ChildFilter::STRICT).unwrap();
    assert_eq!(attribute_names(&cumulative), vec!["returnString", "name", "active"]);
    assert_eq!(cumulative[1].common.owner, fixed.id());
    assert!(cumulative[1].common.technical_override);
    assert_eq!(fixed.statistics().technical_overrides, 1);
    assert_eq!(fixed.statistics().overriding_attributes, 1);
}
