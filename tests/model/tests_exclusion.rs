//! Ignored capability membership.

use frankdoc::{ChildFilter, ClassDescriptor, DescriptorSet, Model};
use pretty_assertions::assert_eq;

use crate::helpers::fixtures::*;
use crate::helpers::model_assertions::*;

fn listeners() -> Model {
    let set = DescriptorSet::new()
        .with_class(ClassDescriptor::interface("e.IListener").with_member(setter("setPollInterval")))
        .with_class(
            ClassDescriptor::class("e.BaseListener")
                .with_interface("e.IListener")
                .with_member(setter("setPollInterval"))
                .with_member(setter("setName")),
        )
        .with_class(
            ClassDescriptor::class("e.SenderListener")
                .with_parent("e.BaseListener")
                .ignoring_membership("e.IListener"),
        )
        .with_class(ClassDescriptor::class("e.Receiver").with_member(member("setListener", "e.IListener")));
    compile_all(&set, &object_rules(&[("*/listener", "setListener")]))
}

#[test]
fn test_excluded_placeholder_hides_capability_attribute() {
    let model = listeners();
    let sender = element(&model, "e.SenderListener");
    assert_eq!(sender.attributes().len(), 1);
    assert!(sender.attributes()[0].common.excluded);
    assert_eq!(&*sender.attributes()[0].name, "pollInterval");

    let visible = model.cumulative_attributes(sender.id(), ChildFilter::COMPATIBILITY).unwrap();
    assert_eq!(attribute_names(&visible), vec!["name"]);
    let all = model.cumulative_attributes(sender.id(), ChildFilter::ALL).unwrap();
    assert_eq!(attribute_names(&all), vec!["pollInterval", "name"]);
}

#[test]
fn test_base_keeps_capability_attribute() {
    let model = listeners();
    let base = element(&model, "e.BaseListener");
    let visible = model.cumulative_attributes(base.id(), ChildFilter::COMPATIBILITY).unwrap();
    assert_eq!(attribute_names(&visible), vec!["pollInterval", "name"]);
    assert!(!base.is_excluded_from("e.IListener"));
}

#[test]
fn test_excluded_element_leaves_display_members() {
    let model = listeners();
    let sender = element(&model, "e.SenderListener");
    assert!(sender.is_excluded_from("e.IListener"));

    let capability = model.find_element_type("e.IListener").unwrap();
    // still a member for the compiler, not for documentation
    assert_eq!(capability.members().len(), 2);
    assert_eq!(
        names_of(&model, &model.display_members(capability.id())),
        vec!["e.BaseListener"]
    );
}

#[test]
fn test_exclusion_is_inherited() {
    let set = DescriptorSet::new()
        .with_class(ClassDescriptor::interface("e.IListener").with_member(setter("setPollInterval")))
        .with_class(
            ClassDescriptor::class("e.Sender")
                .with_interface("e.IListener")
                .with_member(setter("setPollInterval"))
                .ignoring_membership("e.IListener"),
        )
        .with_class(ClassDescriptor::class("e.FastSender").with_parent("e.Sender"));
    let model = compile_all(&set, &frankdoc::RoleRuleTable::new());
    assert!(element(&model, "e.FastSender").is_excluded_from("e.IListener"));
    let sender = element(&model, "e.Sender");
    assert!(sender.attributes()[0].common.excluded);
    let visible = model
        .cumulative_attributes(element(&model, "e.FastSender").id(), ChildFilter::COMPATIBILITY)
        .unwrap();
    assert!(visible.is_empty());
}
