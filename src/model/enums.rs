//! Attribute enums: shared enumerated value sets.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::base::EnumId;
use crate::descriptor::EnumDescriptor;

/// A named, ordered list of enum values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeEnum {
    pub(crate) id: EnumId,
    /// Unique within one model.
    pub(crate) name: Arc<str>,
    pub(crate) qualified_name: Arc<str>,
    pub(crate) values: Vec<EnumValue>,
}

impl AttributeEnum {
    pub fn id(&self) -> EnumId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValue {
    pub label: Arc<str>,
    pub description: Option<Arc<str>>,
    pub deprecated: bool,
}

/// Registry of the attribute enums of one compilation run.
#[derive(Clone, Debug, Default)]
pub struct EnumRegistry {
    enums: Vec<AttributeEnum>,
    by_qualified_name: FxHashMap<Arc<str>, EnumId>,
    /// Simple name → number of enums using it.
    name_counts: FxHashMap<Arc<str>, u32>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the enum for `descriptor`, creating it on first use.
    pub fn find_or_create(&mut self, descriptor: &EnumDescriptor) -> EnumId {
        if let Some(id) = self.by_qualified_name.get(&descriptor.qualified_name) {
            return *id;
        }
        let simple: Arc<str> = Arc::from(descriptor.simple_name());
        let count = self.name_counts.entry(simple.clone()).or_insert(0);
        *count += 1;
        let name = if *count == 1 {
            simple
        } else {
            Arc::from(format!("{}_{}", simple, count))
        };
        let id = EnumId::from_index(self.enums.len());
        tracing::trace!(enum_type = %descriptor.qualified_name, %name, "created attribute enum");
        self.enums.push(AttributeEnum {
            id,
            name,
            qualified_name: descriptor.qualified_name.clone(),
            values: descriptor
                .values
                .iter()
                .map(|v| EnumValue {
                    label: v.label.clone(),
                    description: v.description.clone(),
                    deprecated: v.deprecated,
                })
                .collect(),
        });
        self.by_qualified_name.insert(descriptor.qualified_name.clone(), id);
        id
    }

    pub fn get(&self, id: EnumId) -> Option<&AttributeEnum> {
        self.enums.get(id.index())
    }

    pub fn find(&self, qualified_name: &str) -> Option<&AttributeEnum> {
        self.by_qualified_name.get(qualified_name).and_then(|id| self.get(*id))
    }

    /// All enums in creation order.
    pub fn all(&self) -> &[AttributeEnum] {
        &self.enums
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}
