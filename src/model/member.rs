//! Members of an element: attributes and config children.
//!
//! Both kinds share [`MemberCommon`]. [`MemberRef`] is the closed sum type
//! used where both kinds are handled together, [`ElementChild`] is the seam
//! the navigator is generic over.

use std::fmt;
use std::sync::Arc;

use crate::base::{ElementId, EnumId, RoleId, TypeId};

use super::element::ElementDefinition;

// ============================================================================
// COMMON MEMBER DATA
// ============================================================================

/// Data shared by attributes and config children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberCommon {
    /// Element declaring the member.
    pub owner: ElementId,
    /// Name of the declaring method.
    pub method_name: Arc<str>,
    pub deprecated: bool,
    /// Has a description, a default value or borrowed documentation.
    pub documented: bool,
    /// Overrides an ancestor member without changing anything visible.
    pub technical_override: bool,
    /// Nearest ancestor declaring a member with the same key.
    pub overridden_from: Option<ElementId>,
    pub excluded: bool,
    /// Declaration position within the owner.
    pub order: usize,
    pub description: Option<Arc<str>>,
}

impl MemberCommon {
    pub(crate) fn new(owner: ElementId, method_name: Arc<str>, order: usize) -> Self {
        Self {
            owner,
            method_name,
            deprecated: false,
            documented: false,
            technical_override: false,
            overridden_from: None,
            excluded: false,
            order,
            description: None,
        }
    }
}

/// Identity of a member among the members of the same kind on one element.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberKey {
    Attribute(Arc<str>),
    ConfigChild {
        role_name: Arc<str>,
        element_type: Option<TypeId>,
    },
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKey::Attribute(name) => write!(f, "{}", name),
            MemberKey::ConfigChild {
                role_name,
                element_type: Some(ty),
            } => write!(f, "({}, {})", role_name, ty),
            MemberKey::ConfigChild {
                role_name,
                element_type: None,
            } => write!(f, "({}, text)", role_name),
        }
    }
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

/// Value type of an attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Text,
    Boolean,
    Integer,
}

impl AttributeType {
    /// Map a parameter type name, primitive or boxed, to an attribute type.
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        let name = type_name.strip_prefix("java.lang.").unwrap_or(type_name);
        match name {
            "String" => Some(Self::Text),
            "boolean" | "Boolean" => Some(Self::Boolean),
            "int" | "Integer" | "long" | "Long" | "short" | "Short" | "byte" | "Byte" => Some(Self::Integer),
            _ => None,
        }
    }

    /// Check that `value` is a valid literal of this type.
    pub fn check_value(self, value: &str) -> Result<(), String> {
        match self {
            Self::Text => Ok(()),
            Self::Boolean => match value {
                "true" | "false" => Ok(()),
                _ => Err(format!("'{}' is not a boolean", value)),
            },
            Self::Integer => value
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| format!("'{}' is not an integer", value)),
        }
    }
}

/// A scalar member, set through `setX(value)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub common: MemberCommon,
    pub name: Arc<str>,
    pub value_type: AttributeType,
    /// Enumerated value set, for enum-typed attributes.
    pub enumeration: Option<EnumId>,
    pub default_value: Option<Arc<str>>,
    /// Element whose documentation the attribute uses; the owner by default.
    pub describing_element: ElementId,
}

impl Attribute {
    pub fn key(&self) -> MemberKey {
        MemberKey::Attribute(self.name.clone())
    }
}

// ============================================================================
// CONFIG CHILDREN
// ============================================================================

/// What a config child nests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigChildTarget {
    /// An element playing a role.
    Object { role: RoleId, element_type: TypeId },
    /// Plain text.
    Text,
}

/// A nested member, registered through a role rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigChild {
    pub common: MemberCommon,
    pub role_name: Arc<str>,
    pub mandatory: bool,
    pub allow_multiple: bool,
    pub target: ConfigChildTarget,
}

impl ConfigChild {
    pub fn key(&self) -> MemberKey {
        MemberKey::ConfigChild {
            role_name: self.role_name.clone(),
            element_type: self.element_type(),
        }
    }

    pub fn role(&self) -> Option<RoleId> {
        match self.target {
            ConfigChildTarget::Object { role, .. } => Some(role),
            ConfigChildTarget::Text => None,
        }
    }

    pub fn element_type(&self) -> Option<TypeId> {
        match self.target {
            ConfigChildTarget::Object { element_type, .. } => Some(element_type),
            ConfigChildTarget::Text => None,
        }
    }

    pub fn is_text(&self) -> bool {
        self.target == ConfigChildTarget::Text
    }
}

/// Position of a config child in its owner's declared list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigChildRef {
    pub owner: ElementId,
    pub index: usize,
}

// ============================================================================
// MEMBER SUM TYPE
// ============================================================================

/// A borrowed member of either kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberRef<'a> {
    Attribute(&'a Attribute),
    ConfigChild(&'a ConfigChild),
}

impl<'a> MemberRef<'a> {
    pub fn common(&self) -> &'a MemberCommon {
        match self {
            MemberRef::Attribute(a) => &a.common,
            MemberRef::ConfigChild(c) => &c.common,
        }
    }

    pub fn key(&self) -> MemberKey {
        match self {
            MemberRef::Attribute(a) => a.key(),
            MemberRef::ConfigChild(c) => c.key(),
        }
    }
}

/// A member kind the ancestor navigator can walk.
pub trait ElementChild: Sized {
    fn common(&self) -> &MemberCommon;

    fn key(&self) -> MemberKey;

    fn as_member(&self) -> MemberRef<'_>;

    /// Declared members of this kind on `element`.
    fn children_of(element: &ElementDefinition) -> &[Self];
}

impl ElementChild for Attribute {
    fn common(&self) -> &MemberCommon {
        &self.common
    }

    fn key(&self) -> MemberKey {
        Attribute::key(self)
    }

    fn as_member(&self) -> MemberRef<'_> {
        MemberRef::Attribute(self)
    }

    fn children_of(element: &ElementDefinition) -> &[Self] {
        element.attributes()
    }
}

impl ElementChild for ConfigChild {
    fn common(&self) -> &MemberCommon {
        &self.common
    }

    fn key(&self) -> MemberKey {
        ConfigChild::key(self)
    }

    fn as_member(&self) -> MemberRef<'_> {
        MemberRef::ConfigChild(self)
    }

    fn children_of(element: &ElementDefinition) -> &[Self] {
        element.config_children()
    }
}
