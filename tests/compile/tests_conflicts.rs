//! Conflict resolution: naming collisions, promotion, role sets, shared slots.

use frankdoc::diagnostics::codes;
use frankdoc::model::ConfigChildSetKind;
use frankdoc::{ClassDescriptor, DescriptorSet};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::helpers::fixtures::*;
use crate::helpers::model_assertions::*;

// ============================================================================
// NAMING COLLISIONS
// ============================================================================

fn echo_pipes(first_deprecated: bool, second_deprecated: bool, reversed: bool) -> DescriptorSet {
    let mut first = ClassDescriptor::class("c.one.EchoPipe").with_interface("c.IPipe");
    if first_deprecated {
        first = first.deprecated();
    }
    let mut second = ClassDescriptor::class("c.two.EchoPipe").with_interface("c.IPipe");
    if second_deprecated {
        second = second.deprecated();
    }
    let (a, b) = if reversed { (second, first) } else { (first, second) };
    DescriptorSet::new()
        .with_class(a)
        .with_class(ClassDescriptor::class("c.PipeLine").with_member(member("addPipe", "c.IPipe")))
        .with_class(ClassDescriptor::interface("c.IPipe"))
        .with_class(b)
}

#[rstest]
#[case::first_deprecated(true, false, false, "c.two.EchoPipe")]
#[case::first_deprecated_reversed(true, false, true, "c.two.EchoPipe")]
#[case::second_deprecated(false, true, false, "c.one.EchoPipe")]
#[case::second_deprecated_reversed(false, true, true, "c.one.EchoPipe")]
fn test_non_deprecated_member_wins(
    #[case] first_deprecated: bool,
    #[case] second_deprecated: bool,
    #[case] reversed: bool,
    #[case] winner: &str,
) {
    let model = compile_all(
        &echo_pipes(first_deprecated, second_deprecated, reversed),
        &object_rules(&[("*/pipe", "addPipe")]),
    );
    let pipe = role(&model, "c.IPipe", "pipe");
    assert_eq!(model.role_raw_members(pipe.id()).len(), 2);
    assert_eq!(names_of(&model, &model.role_members(pipe.id())), vec![winner]);
    assert_eq!(model.external_name(element(&model, winner).id(), pipe.id()), "EchoPipe");
    assert!(model.diagnostics().is_empty(), "{:?}", model.diagnostics());
    assert_eq!(model.statistics().unresolved_name_collisions, 0);
}

#[test]
fn test_unresolved_collision_is_an_error() {
    let model = compile_all(&echo_pipes(false, false, false), &object_rules(&[("*/pipe", "addPipe")]));
    assert_single_diagnostic(&model, codes::UNRESOLVED_NAME_COLLISION, "(IPipe, pipe)");
    let diagnostic = diagnostics_with_code(&model, codes::UNRESOLVED_NAME_COLLISION)[0];
    assert_eq!(diagnostic.related.len(), 2);
    assert_eq!(model.statistics().unresolved_name_collisions, 1);
    // both members stay, the renderer decides
    let pipe = role(&model, "c.IPipe", "pipe");
    assert_eq!(model.role_members(pipe.id()).len(), 2);
}

#[test]
fn test_all_deprecated_collision_is_a_warning() {
    let model = compile_all(&echo_pipes(true, true, false), &object_rules(&[("*/pipe", "addPipe")]));
    assert_single_diagnostic(&model, codes::DEPRECATED_NAME_COLLISION, "(IPipe, pipe)");
    assert_eq!(model.statistics().errors, 0);
    assert_eq!(model.statistics().warnings, 1);
}

// ============================================================================
// PROMOTION
// ============================================================================

#[test]
fn test_highest_common_supertype() {
    let set = DescriptorSet::new()
        .with_class(ClassDescriptor::interface("p.IBase"))
        .with_class(ClassDescriptor::interface("p.IOther"))
        .with_class(
            ClassDescriptor::interface("p.ISpecial")
                .with_interface("p.IBase")
                .with_interface("p.IOther"),
        )
        .with_class(ClassDescriptor::class("p.Impl").with_interface("p.ISpecial"))
        .with_class(
            ClassDescriptor::class("p.Holder")
                .with_member(member("addItem", "p.IBase"))
                .with_member(member("addItem", "p.ISpecial"))
                .with_member(member("addOther", "p.IOther")),
        );
    let model = compile_all(&set, &object_rules(&[("*/item", "addItem"), ("*/other", "addOther")]));

    let base = model.find_element_type("p.IBase").unwrap().id();
    let special = model.find_element_type("p.ISpecial").unwrap();
    assert_eq!(special.highest_common_supertype(), base);
    assert_single_diagnostic(&model, codes::AMBIGUOUS_PROMOTION, "p.ISpecial");

    let special_item = role(&model, "p.ISpecial", "item");
    let base_item = role(&model, "p.IBase", "item");
    assert_eq!(special_item.promoted(), base_item.id());
    assert_eq!(base_item.promoted(), base_item.id());

    // Impl appears in both roles of the item slot under one name
    let set = &model.role_sets()[0];
    assert!(set.conflicting_names().is_empty());
}

// ============================================================================
// ROLE SETS AND SHARED SLOTS
// ============================================================================

fn holder(second_child_type: &str) -> DescriptorSet {
    DescriptorSet::new()
        .with_class(ClassDescriptor::interface("x.IFoo"))
        .with_class(ClassDescriptor::class("x.Foo").with_interface("x.IFoo"))
        .with_class(ClassDescriptor::class("x.OtherFoo").with_interface("x.IFoo"))
        .with_class(ClassDescriptor::class("x.Bar"))
        .with_class(
            ClassDescriptor::class("x.Holder")
                .with_member(member("addChild", "x.IFoo"))
                .with_member(member("addChild", second_child_type)),
        )
}

fn holder_rules() -> frankdoc::RoleRuleTable {
    rules(&[("holder", None, None), ("*/child", Some("addChild"), None)])
}

#[test]
fn test_shared_slot_collision() {
    let model = compile_rooted(&holder("x.Bar"), &holder_rules(), "x.Holder");
    let foo = element(&model, "x.Foo").id();
    let bar = element(&model, "x.Bar").id();
    let foo_child = role(&model, "x.IFoo", "child");
    let bar_child = role(&model, "x.Bar", "child");

    assert_eq!(model.role_sets().len(), 1);
    let set = model.find_role_set(&[foo_child.id(), bar_child.id()]).unwrap();
    assert_eq!(set.conflicting_names().len(), 1);
    assert_eq!(&*set.conflicting_names()[0], "Child");

    let holder = element(&model, "x.Holder");
    assert_eq!(holder.config_child_sets().len(), 1);
    assert_eq!(holder.config_child_sets()[0].kind(), ConfigChildSetKind::Object);
    assert_eq!(holder.config_child_sets()[0].role_set(), Some(set.id()));
    assert_eq!(foo_child.role_sets(), &[set.id()]);

    // colliding members leave the shared slot but stay in their roles
    assert!(foo_child.has_shared_slot_conflict(foo));
    assert!(bar_child.has_shared_slot_conflict(bar));
    assert_eq!(names_of(&model, &model.shared_slot_members(foo_child.id())), vec!["x.OtherFoo"]);
    assert!(model.shared_slot_members(bar_child.id()).is_empty());
    assert_eq!(model.role_members(foo_child.id()).len(), 2);
    assert_eq!(model.statistics().shared_slot_conflicts, 1);

    // Foo takes the generic option name of its capability role
    assert_eq!(foo_child.default_option_conflict(), Some(foo));
    assert_eq!(bar_child.default_option_conflict(), None);
}

#[test]
fn test_same_element_in_two_roles_is_no_collision() {
    let model = compile_rooted(&holder("x.Foo"), &holder_rules(), "x.Holder");
    let set = &model.role_sets()[0];
    assert_eq!(set.roles().len(), 2);
    assert!(set.conflicting_names().is_empty());
}

#[test]
fn test_mixed_config_child_set() {
    let set = DescriptorSet::new()
        .with_class(ClassDescriptor::class("x.Bar"))
        .with_class(
            ClassDescriptor::class("x.Holder")
                .with_member(member("addChild", "x.Bar"))
                .with_member(setter("addChildText")),
        );
    let rules = rules(&[("*/child", Some("addChild"), None), ("*/child", None, Some("addChildText"))]);
    let model = compile_all(&set, &rules);
    let holder = element(&model, "x.Holder");
    assert_eq!(holder.config_child_sets()[0].kind(), ConfigChildSetKind::Mixed);
    assert_eq!(holder.config_child_sets()[0].role_set(), None);
    assert_single_diagnostic(&model, codes::MIXED_CONFIG_CHILD_SET, "x.Holder");
}

#[test]
fn test_recursive_role_sets() {
    let set = DescriptorSet::new()
        .with_class(ClassDescriptor::interface("x.IPipe"))
        .with_class(
            ClassDescriptor::class("x.APipe")
                .with_interface("x.IPipe")
                .with_member(member("addChild", "x.Foo")),
        )
        .with_class(
            ClassDescriptor::class("x.BPipe")
                .with_interface("x.IPipe")
                .with_member(member("addChild", "x.Bar")),
        )
        .with_class(ClassDescriptor::class("x.Foo"))
        .with_class(ClassDescriptor::class("x.Bar"))
        .with_class(ClassDescriptor::class("x.PipeLine").with_member(member("addPipe", "x.IPipe")));
    let rules = object_rules(&[("*/pipe", "addPipe"), ("*/child", "addChild")]);
    let model = compile_all(&set, &rules);

    let foo_child = role(&model, "x.Foo", "child").id();
    let bar_child = role(&model, "x.Bar", "child").id();
    // pipeline/pipe, APipe/child and BPipe/child from the elements,
    // the merged child slot of all pipes from recursion
    assert_eq!(model.role_sets().len(), 4);
    let merged = model.find_role_set(&[bar_child, foo_child]).unwrap();
    assert!(model.role(foo_child).role_sets().contains(&merged.id()));
    assert!(model.role(bar_child).role_sets().contains(&merged.id()));
}
