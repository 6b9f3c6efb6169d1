//! Override analysis: `overridden_from`, technical overrides and
//! deprecation inherited through technical overrides.
//!
//! Element ids are topologically ordered (a parent is created before its
//! children), so one pass in id order sees every ancestor finished first.

use crate::base::ElementId;
use crate::model::{ElementChild, ElementDefinition, ElementStatistics, MemberCommon, Model};

/// How a member relates to the nearest ancestor member with the same key.
struct Override {
    index: usize,
    from: ElementId,
    technical: bool,
    inherit_deprecation: bool,
}

pub(crate) fn compute_overrides(model: &mut Model) {
    let mut technical_overrides = 0usize;
    for i in 0..model.elements.len() {
        let (ancestors, rest) = model.elements.split_at_mut(i);
        let element = &mut rest[0];
        let Some(parent) = element.parent else {
            element.statistics = statistics_of(element);
            continue;
        };

        let attribute_overrides = find_overrides(&element.attributes, parent, ancestors, |own, inherited| {
            !own.common.excluded && !own.common.deprecated && !own.common.documented && !inherited.common.excluded
        });
        let child_overrides = find_overrides(&element.config_children, parent, ancestors, |own, inherited| {
            !own.common.excluded
                && !own.common.deprecated
                && !own.common.documented
                && own.mandatory == inherited.mandatory
                && own.allow_multiple == inherited.allow_multiple
        });

        for o in attribute_overrides {
            apply(&mut element.attributes[o.index].common, &o);
        }
        for o in child_overrides {
            apply(&mut element.config_children[o.index].common, &o);
        }
        element.statistics = statistics_of(element);
        technical_overrides += element.statistics.technical_overrides;
    }
    tracing::debug!(technical_overrides, "computed overrides");
}

fn find_overrides<T: ElementChild>(
    declared: &[T],
    parent: ElementId,
    ancestors: &[ElementDefinition],
    is_technical: impl Fn(&T, &T) -> bool,
) -> Vec<Override> {
    let mut result = Vec::new();
    for (index, member) in declared.iter().enumerate() {
        let key = member.key();
        let mut current = Some(parent);
        while let Some(id) = current {
            let ancestor = &ancestors[id.index()];
            if let Some(inherited) = T::children_of(ancestor).iter().find(|m| m.key() == key) {
                let technical = is_technical(member, inherited);
                result.push(Override {
                    index,
                    from: id,
                    technical,
                    inherit_deprecation: technical && inherited.common().deprecated,
                });
                break;
            }
            current = ancestor.parent;
        }
    }
    result
}

fn apply(common: &mut MemberCommon, o: &Override) {
    common.overridden_from = Some(o.from);
    common.technical_override = o.technical;
    if o.inherit_deprecation {
        common.deprecated = true;
    }
}

fn statistics_of(element: &ElementDefinition) -> ElementStatistics {
    ElementStatistics {
        declared_attributes: element.attributes.len(),
        excluded_attributes: element.attributes.iter().filter(|a| a.common.excluded).count(),
        overriding_attributes: element
            .attributes
            .iter()
            .filter(|a| a.common.overridden_from.is_some())
            .count(),
        technical_overrides: element
            .attributes
            .iter()
            .map(|a| &a.common)
            .chain(element.config_children.iter().map(|c| &c.common))
            .filter(|c| c.technical_override)
            .count(),
        declared_config_children: element.config_children.len(),
        omitted_config_children: element.omitted_config_children.len(),
    }
}
