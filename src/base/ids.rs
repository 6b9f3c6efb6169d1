//! Typed arena indices.
//!
//! Every registry in the model stores its entries in a `Vec` and hands out
//! a small copyable id. Ids are only meaningful for the [`Model`](crate::model::Model)
//! that created them.

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            /// Create an id from a raw arena index.
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            pub(crate) fn from_index(index: usize) -> Self {
                Self(u32::try_from(index).unwrap_or(u32::MAX))
            }

            /// The arena index.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Identifies an [`ElementDefinition`](crate::model::ElementDefinition).
    ElementId,
    "element"
);

arena_id!(
    /// Identifies an [`ElementType`](crate::model::ElementType).
    TypeId,
    "type"
);

arena_id!(
    /// Identifies an [`ElementRole`](crate::model::ElementRole).
    RoleId,
    "role"
);

arena_id!(
    /// Identifies an [`ElementRoleSet`](crate::model::ElementRoleSet).
    RoleSetId,
    "role-set"
);

arena_id!(
    /// Identifies an [`AttributeEnum`](crate::model::AttributeEnum).
    EnumId,
    "enum"
);
