//! The role rule table.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::base::naming::SETTER_PREFIX;
use crate::error::Result;

use super::pattern::RolePattern;

/// Whether a config child nests an element or carries text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChildKind {
    Object,
    Text,
}

/// How often a config child may occur in its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Single,
    Multiple,
}

impl Cardinality {
    /// `set` methods take one child, any other method collects many.
    pub fn of_method(method_name: &str) -> Self {
        if method_name.starts_with(SETTER_PREFIX) {
            Self::Single
        } else {
            Self::Multiple
        }
    }
}

/// How the member with a given method name becomes a config child.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleRule {
    pub role_name: Arc<str>,
    pub kind: ChildKind,
    pub cardinality: Cardinality,
    pub pattern: RolePattern,
}

/// One raw rule as found in a rules file, before it is registered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleRecord {
    pub pattern: String,
    pub register_method: Option<String>,
    pub register_text_method: Option<String>,
}

/// A raw rule that could not be registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedRule {
    pub record: RuleRecord,
    pub reason: String,
}

/// Flat map method name → [`RoleRule`], plus the root role names.
#[derive(Clone, Debug, Default)]
pub struct RoleRuleTable {
    rules: IndexMap<Arc<str>, RoleRule>,
    root_role_names: FxHashSet<Arc<str>>,
    rejected: Vec<RejectedRule>,
}

impl RoleRuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from raw records.
    ///
    /// A record with a malformed pattern is skipped and kept in
    /// [`rejected`](Self::rejected); the other records are still registered.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a RuleRecord>) -> Self {
        let mut table = Self::new();
        for record in records {
            if let Err(e) = table.add_record(record) {
                tracing::warn!(pattern = %record.pattern, error = %e, "skipping malformed role rule");
                table.rejected.push(RejectedRule {
                    record: record.clone(),
                    reason: e.to_string(),
                });
            }
        }
        table
    }

    /// Register a raw record. `register_method` wins over `register_text_method`.
    pub fn add_record(&mut self, record: &RuleRecord) -> Result<()> {
        let pattern = RolePattern::parse(&record.pattern)?;
        if pattern.is_root() {
            self.root_role_names.insert(pattern.role_name().clone());
        }
        let object_method = record.register_method.as_deref().filter(|m| !m.is_empty());
        let text_method = record.register_text_method.as_deref().filter(|m| !m.is_empty());
        match (object_method, text_method) {
            (Some(method), text) => {
                if text.is_some() {
                    tracing::warn!(
                        role = %pattern.role_name(),
                        "rule has both an object and a text method, ignoring the text method"
                    );
                }
                self.register(method, ChildKind::Object, Cardinality::of_method(method), pattern);
            }
            (None, Some(method)) => {
                self.register(method, ChildKind::Text, Cardinality::of_method(method), pattern);
            }
            (None, None) => {
                tracing::trace!(role = %pattern.role_name(), "rule registers no method, ignored");
            }
        }
        Ok(())
    }

    /// Register an object config child method.
    pub fn register_object(&mut self, method_name: &str, cardinality: Cardinality, pattern: &str) -> Result<()> {
        let pattern = RolePattern::parse(pattern)?;
        self.register(method_name, ChildKind::Object, cardinality, pattern);
        Ok(())
    }

    /// Register a text config child method.
    pub fn register_text(&mut self, method_name: &str, cardinality: Cardinality, pattern: &str) -> Result<()> {
        let pattern = RolePattern::parse(pattern)?;
        self.register(method_name, ChildKind::Text, cardinality, pattern);
        Ok(())
    }

    /// Declare a root role without a registration method.
    pub fn add_root_role(&mut self, role_name: impl Into<Arc<str>>) {
        self.root_role_names.insert(role_name.into());
    }

    fn register(&mut self, method_name: &str, kind: ChildKind, cardinality: Cardinality, pattern: RolePattern) {
        if kind == ChildKind::Text && method_name.starts_with(SETTER_PREFIX) {
            tracing::warn!(
                method = method_name,
                "ignoring text method that starts with \"set\", it would be confused with an attribute"
            );
            return;
        }
        if self.rules.contains_key(method_name) {
            tracing::warn!(
                method = method_name,
                pattern = %pattern,
                "method is already registered, keeping the first registration"
            );
            return;
        }
        tracing::trace!(method = method_name, role = %pattern.role_name(), ?kind, "registered role rule");
        self.rules.insert(
            Arc::from(method_name),
            RoleRule {
                role_name: pattern.role_name().clone(),
                kind,
                cardinality,
                pattern,
            },
        );
    }

    /// Look up the rule of a method.
    pub fn get(&self, method_name: &str) -> Option<&RoleRule> {
        self.rules.get(method_name)
    }

    pub fn contains(&self, method_name: &str) -> bool {
        self.rules.contains_key(method_name)
    }

    /// Whether some single-component pattern declares `role_name` a root.
    pub fn is_root_role(&self, role_name: &str) -> bool {
        self.root_role_names.contains(role_name)
    }

    /// Registered rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &RoleRule)> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Records skipped by [`from_records`](Self::from_records), in input order.
    pub fn rejected(&self) -> &[RejectedRule] {
        &self.rejected
    }
}
