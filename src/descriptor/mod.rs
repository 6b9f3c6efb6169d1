//! Descriptor source: the introspected input of the compiler.
//!
//! An external introspection adapter turns compiled classes into
//! [`ClassDescriptor`]s and [`EnumDescriptor`]s. The compiler pulls them by
//! qualified name through the [`DescriptorSource`] trait and never inspects
//! classes itself.
//!
//! [`DescriptorSet`] is the in-memory implementation used by the loaders and
//! by tests.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::base::naming::simple_name_of;

// ============================================================================
// DESCRIPTOR TYPES
// ============================================================================

/// Metadata of one class or interface.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Deserialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct ClassDescriptor {
    pub qualified_name: Arc<str>,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub simple_name: Arc<str>,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub is_abstract: bool,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub is_interface: bool,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub deprecated: bool,
    /// Superclass for classes, `None` for interfaces and hierarchy roots.
    #[cfg_attr(feature = "interchange", serde(default))]
    pub parent: Option<Arc<str>>,
    /// Directly implemented (or, for interfaces, extended) interfaces.
    #[cfg_attr(feature = "interchange", serde(default))]
    pub interfaces: Vec<Arc<str>>,
    /// Declared settable members, in declaration order.
    #[cfg_attr(feature = "interchange", serde(default))]
    pub members: Vec<MemberDescriptor>,
    /// Declared public getters and issers.
    #[cfg_attr(feature = "interchange", serde(default))]
    pub getters: Vec<GetterDescriptor>,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub doc: DocTags,
}

impl ClassDescriptor {
    /// Create a concrete class descriptor.
    pub fn class(qualified_name: impl Into<Arc<str>>) -> Self {
        let qualified_name = qualified_name.into();
        Self {
            simple_name: Arc::from(simple_name_of(&qualified_name)),
            qualified_name,
            is_abstract: false,
            is_interface: false,
            deprecated: false,
            parent: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            getters: Vec::new(),
            doc: DocTags::default(),
        }
    }

    /// Create an interface descriptor.
    pub fn interface(qualified_name: impl Into<Arc<str>>) -> Self {
        let mut result = Self::class(qualified_name);
        result.is_interface = true;
        result
    }

    pub fn with_parent(mut self, parent: impl Into<Arc<str>>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<Arc<str>>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_getter(mut self, name: impl Into<Arc<str>>, return_type: impl Into<Arc<str>>) -> Self {
        self.getters.push(GetterDescriptor {
            name: name.into(),
            return_type: return_type.into(),
        });
        self
    }

    pub fn with_description(mut self, description: impl Into<Arc<str>>) -> Self {
        self.doc.description = Some(description.into());
        self
    }

    pub fn with_group(mut self, name: impl Into<Arc<str>>, order: i32) -> Self {
        self.doc.group = Some(GroupTag {
            name: name.into(),
            order,
        });
        self
    }

    /// Tag the class with "ignore membership in capability `capability`".
    pub fn ignoring_membership(mut self, capability: impl Into<Arc<str>>) -> Self {
        self.doc.ignore_type_membership.push(capability.into());
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Simple name, derived from the qualified name when not supplied.
    pub fn simple_name(&self) -> &str {
        if self.simple_name.is_empty() {
            simple_name_of(&self.qualified_name)
        } else {
            &self.simple_name
        }
    }
}

/// One declared settable member.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Deserialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct MemberDescriptor {
    /// Method name, e.g. `setTimeout` or `registerChild`.
    pub name: Arc<str>,
    /// Qualified (or primitive) name of the single parameter type.
    pub parameter_type: Arc<str>,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub deprecated: bool,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub documentation: Option<Arc<str>>,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub default_value: Option<Arc<str>>,
    /// Class whose documentation this member borrows.
    #[cfg_attr(feature = "interchange", serde(default))]
    pub described_by: Option<Arc<str>>,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub mandatory: bool,
    /// Protected members are compiled as excluded.
    #[cfg_attr(feature = "interchange", serde(default))]
    pub protected: bool,
}

impl MemberDescriptor {
    pub fn new(name: impl Into<Arc<str>>, parameter_type: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            parameter_type: parameter_type.into(),
            deprecated: false,
            documentation: None,
            default_value: None,
            described_by: None,
            mandatory: false,
            protected: false,
        }
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn protected(mut self) -> Self {
        self.protected = true;
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<Arc<str>>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn described_by(mut self, class: impl Into<Arc<str>>) -> Self {
        self.described_by = Some(class.into());
        self
    }
}

/// A declared getter (`getX`, `getXEnum`) or isser (`isX`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Deserialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct GetterDescriptor {
    pub name: Arc<str>,
    pub return_type: Arc<str>,
}

/// Free-form documentation tags of a class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Deserialize))]
#[cfg_attr(feature = "interchange", serde(default, rename_all = "camelCase"))]
pub struct DocTags {
    pub description: Option<Arc<str>>,
    /// Capabilities whose membership this class ignores.
    pub ignore_type_membership: Vec<Arc<str>>,
    pub group: Option<GroupTag>,
}

/// Display group declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Deserialize))]
pub struct GroupTag {
    pub name: Arc<str>,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub order: i32,
}

/// An enum type usable as attribute type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Deserialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "camelCase"))]
pub struct EnumDescriptor {
    pub qualified_name: Arc<str>,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub values: Vec<EnumValueDescriptor>,
}

impl EnumDescriptor {
    pub fn new(qualified_name: impl Into<Arc<str>>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, label: impl Into<Arc<str>>) -> Self {
        self.values.push(EnumValueDescriptor {
            label: label.into(),
            description: None,
            deprecated: false,
        });
        self
    }

    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.qualified_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Deserialize))]
pub struct EnumValueDescriptor {
    pub label: Arc<str>,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub description: Option<Arc<str>>,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub deprecated: bool,
}

// ============================================================================
// DESCRIPTOR SOURCE
// ============================================================================

/// Pull-based access to descriptors by qualified name.
pub trait DescriptorSource {
    /// Find a class or interface.
    fn find_class(&self, qualified_name: &str) -> Option<&ClassDescriptor>;

    /// Find an enum type.
    fn find_enum(&self, qualified_name: &str) -> Option<&EnumDescriptor>;

    /// All non-interface classes implementing `interface`, directly, through
    /// a sub-interface or through a superclass. Sorted by qualified name.
    fn implementations_of(&self, interface: &str) -> Vec<Arc<str>>;

    /// Qualified names of all classes, sorted.
    fn class_names(&self) -> Vec<Arc<str>>;
}

/// In-memory [`DescriptorSource`].
#[derive(Clone, Debug, Default)]
pub struct DescriptorSet {
    classes: IndexMap<Arc<str>, ClassDescriptor>,
    enums: IndexMap<Arc<str>, EnumDescriptor>,
}

impl DescriptorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class. A later descriptor with the same name replaces the earlier one.
    pub fn add_class(&mut self, class: ClassDescriptor) {
        self.classes.insert(class.qualified_name.clone(), class);
    }

    pub fn add_enum(&mut self, descriptor: EnumDescriptor) {
        self.enums.insert(descriptor.qualified_name.clone(), descriptor);
    }

    pub fn with_class(mut self, class: ClassDescriptor) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_enum(mut self, descriptor: EnumDescriptor) -> Self {
        self.add_enum(descriptor);
        self
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Whether `class` implements `interface`, following superclasses and
    /// super-interfaces. Cycles in the descriptors are tolerated.
    fn implements(&self, class: &ClassDescriptor, interface: &str) -> bool {
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut stack: Vec<&ClassDescriptor> = vec![class];
        while let Some(current) = stack.pop() {
            if !visited.insert(&current.qualified_name) {
                continue;
            }
            for name in &current.interfaces {
                if &**name == interface {
                    return true;
                }
                if let Some(next) = self.classes.get(name) {
                    stack.push(next);
                }
            }
            if let Some(parent) = current.parent.as_ref().and_then(|p| self.classes.get(p)) {
                stack.push(parent);
            }
        }
        false
    }
}

impl DescriptorSource for DescriptorSet {
    fn find_class(&self, qualified_name: &str) -> Option<&ClassDescriptor> {
        self.classes.get(qualified_name)
    }

    fn find_enum(&self, qualified_name: &str) -> Option<&EnumDescriptor> {
        self.enums.get(qualified_name)
    }

    fn implementations_of(&self, interface: &str) -> Vec<Arc<str>> {
        let mut result: Vec<Arc<str>> = self
            .classes
            .values()
            .filter(|c| !c.is_interface && self.implements(c, interface))
            .map(|c| c.qualified_name.clone())
            .collect();
        result.sort();
        result
    }

    fn class_names(&self) -> Vec<Arc<str>> {
        let mut result: Vec<Arc<str>> = self.classes.keys().cloned().collect();
        result.sort();
        result
    }
}
