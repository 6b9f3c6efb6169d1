//! Member compiler: declared members → attributes and config children.

use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::ElementId;
use crate::base::naming::{
    ENUM_GETTER_SUFFIX, GETTER_PREFIX, ISSER_PREFIX, SETTER_PREFIX, attribute_name_of, attribute_name_with_prefix,
    boxed_type_name, to_upper_camel_case,
};
use crate::descriptor::{ClassDescriptor, DescriptorSource, EnumDescriptor, GetterDescriptor, MemberDescriptor};
use crate::diagnostics::DiagnosticCollector;
use crate::error::{ConfigurationModelError, Result};
use crate::model::{Attribute, AttributeType, ConfigChild, EnumRegistry, MemberCommon, MemberKey};
use crate::rules::RoleRuleTable;

/// Attributes of one descriptor, plus the documentation references still to resolve.
pub(crate) struct CompiledAttributes {
    pub attributes: Vec<Attribute>,
    /// (attribute index, class whose documentation is borrowed)
    pub described_by: Vec<(usize, Arc<str>)>,
}

/// Compile the attributes declared on `class`.
///
/// `rejected` holds the attribute names removed by capability exclusion;
/// names that `class` does not declare get an excluded placeholder.
pub(crate) fn compile_attributes(
    class: &ClassDescriptor,
    owner: ElementId,
    source: &dyn DescriptorSource,
    rules: &RoleRuleTable,
    enums: &mut EnumRegistry,
    rejected: &[Arc<str>],
    diagnostics: &mut DiagnosticCollector,
) -> Result<CompiledAttributes> {
    let mut attributes: Vec<Attribute> = Vec::new();
    let mut described_by = Vec::new();
    let mut seen: FxHashSet<Arc<str>> = FxHashSet::default();

    let chain = self_and_superclasses(class, source);
    check_setter_overloads(class, &chain, rules, diagnostics);
    let getters = declared_getters(class);
    let getter_enums = enum_getters(&chain, source);

    for (order, member) in class.members.iter().enumerate() {
        if rules.contains(&member.name) {
            continue;
        }
        let Some(name) = attribute_name_of(&member.name) else {
            tracing::trace!(class = %class.qualified_name, method = %member.name, "not an attribute setter");
            continue;
        };
        let name: Arc<str> = Arc::from(name);
        if !seen.insert(name.clone()) {
            tracing::warn!(class = %class.qualified_name, attribute = %name, "overloaded attribute setter, keeping the first");
            diagnostics.duplicate_member(&class.qualified_name, &name);
            continue;
        }
        if let Some(getter) = getters.get(&*name) {
            check_getter_type(class, member, getter, diagnostics);
        }
        let enum_getter = getter_enums.get(&*name).copied();
        let attribute = compile_attribute(
            class,
            member,
            name,
            owner,
            order,
            source,
            enum_getter,
            enums,
            rejected,
            diagnostics,
        )?;
        if let Some(target) = &member.described_by {
            described_by.push((attributes.len(), target.clone()));
        }
        attributes.push(attribute);
    }

    // Inherited attributes of the ignored capability need an excluded
    // placeholder here, otherwise the navigator would report them.
    let mut order = class.members.len();
    for name in rejected {
        if seen.contains(name) {
            continue;
        }
        tracing::trace!(class = %class.qualified_name, attribute = %name, "excluded placeholder attribute");
        let mut common = MemberCommon::new(
            owner,
            Arc::from(format!("{}{}", SETTER_PREFIX, to_upper_camel_case(name))),
            order,
        );
        common.excluded = true;
        attributes.push(Attribute {
            common,
            name: name.clone(),
            value_type: AttributeType::Text,
            enumeration: None,
            default_value: None,
            describing_element: owner,
        });
        order += 1;
    }

    Ok(CompiledAttributes {
        attributes,
        described_by,
    })
}

#[allow(clippy::too_many_arguments)]
fn compile_attribute(
    class: &ClassDescriptor,
    member: &MemberDescriptor,
    name: Arc<str>,
    owner: ElementId,
    order: usize,
    source: &dyn DescriptorSource,
    enum_getter: Option<&EnumDescriptor>,
    enums: &mut EnumRegistry,
    rejected: &[Arc<str>],
    diagnostics: &mut DiagnosticCollector,
) -> Result<Attribute> {
    let (value_type, enumeration) = match source.find_enum(&member.parameter_type) {
        Some(descriptor) => (AttributeType::Text, Some(enums.find_or_create(descriptor))),
        None => {
            let value_type = AttributeType::from_type_name(&member.parameter_type).ok_or_else(|| {
                ConfigurationModelError::InvalidAttributeType {
                    element: class.qualified_name.clone(),
                    member: member.name.clone(),
                    type_name: member.parameter_type.clone(),
                }
            })?;
            if enum_getter.is_some() {
                tracing::trace!(class = %class.qualified_name, attribute = %name, "enum values from getter");
            }
            (value_type, enum_getter.map(|descriptor| enums.find_or_create(descriptor)))
        }
    };

    let mut common = MemberCommon::new(owner, member.name.clone(), order);
    common.deprecated = member.deprecated;
    common.documented =
        member.documentation.is_some() || member.default_value.is_some() || member.described_by.is_some();
    common.description = member.documentation.clone();
    common.excluded = member.protected || rejected.contains(&name);
    if common.excluded {
        tracing::trace!(class = %class.qualified_name, attribute = %name, "attribute is excluded");
    }

    let attribute = Attribute {
        common,
        name,
        value_type,
        enumeration,
        default_value: member.default_value.clone(),
        describing_element: owner,
    };
    check_default_value(class, &attribute, enums, diagnostics);
    Ok(attribute)
}

/// `class` followed by its superclasses, nearest first.
fn self_and_superclasses<'s>(class: &'s ClassDescriptor, source: &'s dyn DescriptorSource) -> Vec<&'s ClassDescriptor> {
    let mut chain = vec![class];
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    visited.insert(&class.qualified_name);
    let mut ancestor = class.parent.as_deref().and_then(|p| source.find_class(p));
    while let Some(current) = ancestor {
        if !visited.insert(&current.qualified_name) {
            break;
        }
        chain.push(current);
        ancestor = current.parent.as_deref().and_then(|p| source.find_class(p));
    }
    chain
}

/// Warn when the declared and inherited setters of one attribute take
/// different types.
fn check_setter_overloads(
    class: &ClassDescriptor,
    chain: &[&ClassDescriptor],
    rules: &RoleRuleTable,
    diagnostics: &mut DiagnosticCollector,
) {
    let mut types_by_name: IndexMap<String, Vec<Arc<str>>> = IndexMap::new();
    for current in chain {
        for member in &current.members {
            if rules.contains(&member.name) {
                continue;
            }
            let Some(name) = attribute_name_of(&member.name) else {
                continue;
            };
            let types = types_by_name.entry(name).or_default();
            if !types.contains(&member.parameter_type) {
                types.push(member.parameter_type.clone());
            }
        }
    }
    for (name, types) in types_by_name {
        if types.len() >= 2 {
            tracing::warn!(
                class = %class.qualified_name,
                attribute = %name,
                types = ?types,
                "overloaded declared or inherited attribute setters"
            );
            diagnostics.overloaded_attribute_setter(&class.qualified_name, &name, &types);
        }
    }
}

/// Declared getters and issers by attribute name. A getter wins over an isser.
fn declared_getters(class: &ClassDescriptor) -> FxHashMap<String, &GetterDescriptor> {
    let mut getters: FxHashMap<String, &GetterDescriptor> = FxHashMap::default();
    for getter in &class.getters {
        if let Some(name) = attribute_name_with_prefix(&getter.name, GETTER_PREFIX) {
            getters.insert(name, getter);
        }
    }
    for isser in &class.getters {
        let Some(name) = attribute_name_with_prefix(&isser.name, ISSER_PREFIX) else {
            continue;
        };
        if getters.contains_key(&name) {
            tracing::warn!(class = %class.qualified_name, attribute = %name, "attribute has both a getter and an isser");
        } else {
            getters.insert(name, isser);
        }
    }
    getters
}

/// Enums exposed by declared or inherited `getXEnum` getters, by attribute
/// name. The nearest declaration wins.
fn enum_getters<'s>(
    chain: &[&'s ClassDescriptor],
    source: &'s dyn DescriptorSource,
) -> FxHashMap<String, &'s EnumDescriptor> {
    let mut result: FxHashMap<String, &EnumDescriptor> = FxHashMap::default();
    for current in chain {
        for getter in &current.getters {
            let Some(stem) = getter.name.strip_suffix(ENUM_GETTER_SUFFIX) else {
                continue;
            };
            let Some(name) = attribute_name_with_prefix(stem, GETTER_PREFIX) else {
                continue;
            };
            if let Some(descriptor) = source.find_enum(&getter.return_type) {
                result.entry(name).or_insert(descriptor);
            }
        }
    }
    result
}

/// Warn when a getter or isser does not return the setter type.
///
/// Getters may mix primitive and boxed types, issers must match exactly.
fn check_getter_type(
    class: &ClassDescriptor,
    setter: &MemberDescriptor,
    getter: &GetterDescriptor,
    diagnostics: &mut DiagnosticCollector,
) {
    let conflict = if getter.name.starts_with(GETTER_PREFIX) {
        boxed_type_name(&setter.parameter_type) != boxed_type_name(&getter.return_type)
    } else {
        setter.parameter_type != getter.return_type
    };
    if conflict {
        tracing::warn!(
            class = %class.qualified_name,
            setter = %setter.name,
            setter_type = %setter.parameter_type,
            getter_type = %getter.return_type,
            "setter and getter types differ"
        );
        diagnostics.getter_type_conflict(
            &class.qualified_name,
            &setter.name,
            &setter.parameter_type,
            &getter.return_type,
        );
    }
}

/// Warn when the default value is not a literal of the attribute type.
fn check_default_value(
    class: &ClassDescriptor,
    attribute: &Attribute,
    enums: &EnumRegistry,
    diagnostics: &mut DiagnosticCollector,
) {
    let Some(value) = attribute.default_value.as_deref() else {
        return;
    };
    let detail = match attribute.enumeration.and_then(|id| enums.get(id)) {
        Some(enumeration) if !enumeration.values().iter().any(|v| &*v.label == value) => {
            Some(format!("'{}' is not a value of {}", value, enumeration.name()))
        }
        Some(_) => None,
        None => attribute.value_type.check_value(value).err(),
    };
    if let Some(detail) = detail {
        tracing::warn!(
            class = %class.qualified_name,
            attribute = %attribute.name,
            value,
            %detail,
            "attribute has an invalid default value"
        );
        diagnostics.invalid_default(&class.qualified_name, &attribute.name, value, &detail);
    }
}

/// Keep one config child per key and sort by declaration order.
///
/// Between duplicates the repeatable one wins, then the mandatory one, then
/// the first declared.
pub(crate) fn select_config_children(
    element: &str,
    children: Vec<ConfigChild>,
    diagnostics: &mut DiagnosticCollector,
) -> Vec<ConfigChild> {
    let mut by_key: IndexMap<MemberKey, ConfigChild> = IndexMap::new();
    for child in children {
        match by_key.entry(child.key()) {
            Entry::Vacant(slot) => {
                slot.insert(child);
            }
            Entry::Occupied(mut slot) => {
                let kept = slot.get_mut();
                let (winner, loser) = if preferred(&child, kept) {
                    (child, kept.clone())
                } else {
                    (kept.clone(), child)
                };
                tracing::debug!(
                    element,
                    kept = %winner.common.method_name,
                    discarded = %loser.common.method_name,
                    "duplicate config child"
                );
                diagnostics.duplicate_config_child(element, &winner.common.method_name, &loser.common.method_name);
                *kept = winner;
            }
        }
    }
    let mut result: Vec<ConfigChild> = by_key.into_values().collect();
    result.sort_by_key(|c| c.common.order);
    result
}

fn preferred(candidate: &ConfigChild, kept: &ConfigChild) -> bool {
    (candidate.allow_multiple, candidate.mandatory, std::cmp::Reverse(candidate.common.order))
        > (kept.allow_multiple, kept.mandatory, std::cmp::Reverse(kept.common.order))
}
