//! Model builder: memoized element, type and role registries.
//!
//! Elements are created depth-first along the parent chain: the parent is
//! compiled before its child, so element ids are topologically ordered.
//! Config children are created later from a work queue. A type is inserted
//! into the registry before its members are looked up, so a type that nests
//! itself is found instead of rebuilt.

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::naming::{capability_postfix, to_lower_camel_case};
use crate::base::{ElementId, RoleId, TypeId};
use crate::descriptor::{ClassDescriptor, DescriptorSource};
use crate::diagnostics::DiagnosticCollector;
use crate::error::{ConfigurationModelError, Result};
use crate::model::{ConfigChild, ConfigChildTarget, ElementDefinition, ElementRole, ElementType, MemberCommon, Model};
use crate::options::CompilerOptions;
use crate::rules::{Cardinality, ChildKind, RoleRuleTable};

use super::exclusion::rejected_attribute_names;
use super::members::{compile_attributes, select_config_children};

pub(crate) struct ModelBuilder<'a> {
    source: &'a dyn DescriptorSource,
    rules: &'a RoleRuleTable,
    options: &'a CompilerOptions,
    pub(crate) model: Model,
    pub(crate) diagnostics: DiagnosticCollector,
    failed: FxHashMap<Arc<str>, ConfigurationModelError>,
    /// Descriptors whose parent chain is being compiled, outermost first.
    in_progress: Vec<Arc<str>>,
    /// Descriptors found on an inheritance cycle.
    on_cycle: FxHashSet<Arc<str>>,
    worklist: VecDeque<ElementId>,
    /// Documentation references resolved when the element leaves the work queue.
    described_by: FxHashMap<ElementId, Vec<(usize, Arc<str>)>>,
    role_name_counts: FxHashMap<Arc<str>, u32>,
}

impl<'a> ModelBuilder<'a> {
    pub(crate) fn new(source: &'a dyn DescriptorSource, rules: &'a RoleRuleTable, options: &'a CompilerOptions) -> Self {
        Self {
            source,
            rules,
            options,
            model: Model::default(),
            diagnostics: DiagnosticCollector::new(),
            failed: FxHashMap::default(),
            in_progress: Vec::new(),
            on_cycle: FxHashSet::default(),
            worklist: VecDeque::new(),
            described_by: FxHashMap::default(),
            role_name_counts: FxHashMap::default(),
        }
    }

    pub(crate) fn source(&self) -> &'a dyn DescriptorSource {
        self.source
    }

    pub(crate) fn rules(&self) -> &'a RoleRuleTable {
        self.rules
    }

    pub(crate) fn options(&self) -> &'a CompilerOptions {
        self.options
    }

    // ========================================================================
    // ROOTS
    // ========================================================================

    /// Compile the configured roots, or every class when none are configured.
    pub(crate) fn create_roots(&mut self) {
        if self.options.roots.is_empty() {
            for name in self.source.class_names() {
                let is_class = self.source.find_class(&name).is_some_and(|c| !c.is_interface);
                if is_class {
                    // failures are recorded as diagnostics
                    let _ = self.find_or_create_element(&name);
                }
            }
            return;
        }
        let options = self.options;
        for name in &options.roots {
            let Ok(id) = self.find_or_create_element(name) else {
                continue;
            };
            let element = &mut self.model.elements[id.index()];
            let role_name: Arc<str> = Arc::from(to_lower_camel_case(&element.simple_name));
            tracing::debug!(root = %name, role = %role_name, "compiled root element");
            if !self.rules.is_root_role(&role_name) {
                tracing::warn!(root = %name, role = %role_name, "root element has no matching root pattern");
                self.diagnostics.root_without_pattern(name, &role_name);
            }
            element.root_role = Some(role_name);
            if !self.model.roots.contains(&id) {
                self.model.roots.push(id);
            }
        }
    }

    // ========================================================================
    // ELEMENTS
    // ========================================================================

    /// Find the element for a qualified name, compiling it on first request.
    ///
    /// Failures are recorded once, as diagnostics, and returned on every request.
    pub(crate) fn find_or_create_element(&mut self, qualified_name: &str) -> Result<ElementId> {
        if let Some(id) = self.model.element_index.get(qualified_name) {
            return Ok(*id);
        }
        if let Some(error) = self.failed.get(qualified_name) {
            return Err(error.clone());
        }
        if let Some(position) = self.in_progress.iter().position(|n| &**n == qualified_name) {
            let cycle = self.in_progress[position..].to_vec();
            tracing::trace!(element = qualified_name, cycle = cycle.len(), "inheritance cycle");
            self.on_cycle.extend(cycle);
            return Err(ConfigurationModelError::CyclicInheritance {
                element: Arc::from(qualified_name),
            });
        }

        let name: Arc<str> = Arc::from(qualified_name);
        self.in_progress.push(name.clone());
        let source = self.source;
        let result = match source.find_class(qualified_name) {
            Some(class) => self.create_element(class),
            None => Err(ConfigurationModelError::unknown(name.clone())),
        };
        self.in_progress.pop();

        result.inspect_err(|error| {
            tracing::error!(element = %name, %error, "element failed to compile");
            self.diagnostics.element_failed(error);
            self.failed.insert(name.clone(), error.clone());
        })
    }

    fn create_element(&mut self, class: &'a ClassDescriptor) -> Result<ElementId> {
        tracing::trace!(element = %class.qualified_name, "creating element");
        let parent = match class.parent.as_deref() {
            None => None,
            Some(parent_name) => match self.find_or_create_element(parent_name) {
                Ok(id) => Some(id),
                Err(_) if self.on_cycle.contains(&class.qualified_name) => {
                    return Err(ConfigurationModelError::CyclicInheritance {
                        element: class.qualified_name.clone(),
                    });
                }
                Err(_) => {
                    return Err(ConfigurationModelError::FailedDependency {
                        element: class.qualified_name.clone(),
                        dependency: Arc::from(parent_name),
                    });
                }
            },
        };

        let id = ElementId::from_index(self.model.elements.len());
        let rejected = rejected_attribute_names(class, self.source, self.rules);
        let compiled = compile_attributes(
            class,
            id,
            self.source,
            self.rules,
            &mut self.model.enums,
            &rejected,
            &mut self.diagnostics,
        )?;

        let mut element = ElementDefinition::new(id, class.qualified_name.clone(), Arc::from(class.simple_name()));
        element.is_abstract = class.is_abstract;
        element.deprecated = class.deprecated;
        element.parent = parent;
        element.description = class.doc.description.clone();
        element.attributes = compiled.attributes;
        let mut excluded_from: Vec<Arc<str>> = class.doc.ignore_type_membership.clone();
        if let Some(parent) = parent {
            excluded_from.extend(self.model.elements[parent.index()].excluded_from.iter().cloned());
        }
        excluded_from.sort();
        excluded_from.dedup();
        element.excluded_from = excluded_from;

        self.model.elements.push(element);
        self.model.element_index.insert(class.qualified_name.clone(), id);
        if !compiled.described_by.is_empty() {
            self.described_by.insert(id, compiled.described_by);
        }
        self.worklist.push_back(id);
        tracing::trace!(element = %class.qualified_name, %id, "created element");
        Ok(id)
    }

    // ========================================================================
    // TYPES AND ROLES
    // ========================================================================

    /// Find the element type for a class or capability, creating it on first request.
    pub(crate) fn find_or_create_type(&mut self, qualified_name: &str) -> Result<TypeId> {
        if let Some(id) = self.model.type_index.get(qualified_name) {
            return Ok(*id);
        }
        let source = self.source;
        let class = source
            .find_class(qualified_name)
            .ok_or_else(|| ConfigurationModelError::unknown(qualified_name))?;

        let concrete_member = if class.is_interface {
            None
        } else {
            Some(self.find_or_create_element(qualified_name)?)
        };

        let id = TypeId::from_index(self.model.types.len());
        let (group_name, group_order) = match &class.doc.group {
            Some(group) => (group.name.clone(), group.order),
            None => (
                self.options.default_group_name.clone(),
                self.options.default_group_order,
            ),
        };
        self.model.types.push(ElementType {
            id,
            qualified_name: class.qualified_name.clone(),
            simple_name: Arc::from(class.simple_name()),
            from_capability: class.is_interface,
            members: concrete_member.into_iter().collect(),
            highest_common_supertype: id,
            group_name,
            group_order,
            postfix: Arc::from(capability_postfix(class.simple_name())),
        });
        self.model.type_index.insert(class.qualified_name.clone(), id);
        tracing::trace!(element_type = qualified_name, %id, capability = class.is_interface, "created element type");

        if class.is_interface {
            let mut members = Vec::new();
            for implementation in self.source.implementations_of(qualified_name) {
                let is_abstract = self.source.find_class(&implementation).is_none_or(|c| c.is_abstract);
                if is_abstract {
                    continue;
                }
                if let Ok(member) = self.find_or_create_element(&implementation) {
                    members.push(member);
                }
            }
            let elements = &self.model.elements;
            members.sort_by(|a, b| elements[a.index()].qualified_name.cmp(&elements[b.index()].qualified_name));
            self.model.types[id.index()].members = members;
        }
        Ok(id)
    }

    /// Find the role of `element_type` under `role_name`, creating it on first request.
    pub(crate) fn find_or_create_role(&mut self, element_type: TypeId, role_name: &Arc<str>) -> RoleId {
        let key = (element_type, role_name.clone());
        if let Some(id) = self.model.role_index.get(&key) {
            return *id;
        }
        let sequence = self.role_name_counts.entry(role_name.clone()).or_insert(0);
        *sequence += 1;
        let id = RoleId::from_index(self.model.roles.len());
        self.model
            .roles
            .push(ElementRole::new(id, element_type, role_name.clone(), *sequence));
        self.model.role_index.insert(key, id);
        tracing::trace!(role = %role_name, element_type = %self.model.types[element_type.index()].qualified_name, "created element role");
        id
    }

    // ========================================================================
    // WORK QUEUE
    // ========================================================================

    /// Create config children until no element is left without them.
    pub(crate) fn build_descendants(&mut self) {
        let mut processed = 0usize;
        while let Some(id) = self.worklist.pop_front() {
            self.resolve_described_by(id);
            self.create_config_children(id);
            processed += 1;
        }
        tracing::debug!(elements = processed, "created config children");
    }

    fn resolve_described_by(&mut self, id: ElementId) {
        let Some(references) = self.described_by.remove(&id) else {
            return;
        };
        for (index, target) in references {
            let element = &self.model.elements[id.index()];
            if self.source.find_class(&target).is_none() {
                let attribute = &element.attributes[index].name;
                tracing::warn!(element = %element.qualified_name, %attribute, %target, "unknown describing class");
                self.diagnostics
                    .unknown_described_by(&element.qualified_name, attribute, &target);
                continue;
            }
            match self.find_or_create_element(&target) {
                Ok(describing) => {
                    self.model.elements[id.index()].attributes[index].describing_element = describing;
                }
                // already reported as a failed element
                Err(e) => {
                    tracing::debug!(%target, error = %e, "describing class failed, keeping the owner");
                }
            }
        }
    }

    fn create_config_children(&mut self, id: ElementId) {
        let qualified_name = self.model.elements[id.index()].qualified_name.clone();
        let (source, rules) = (self.source, self.rules);
        let Some(class) = source.find_class(&qualified_name) else {
            return;
        };
        let mut children = Vec::new();
        for (order, member) in class.members.iter().enumerate() {
            let Some(rule) = rules.get(&member.name) else {
                continue;
            };
            let target = match rule.kind {
                ChildKind::Text => ConfigChildTarget::Text,
                ChildKind::Object => match self.find_or_create_type(&member.parameter_type) {
                    Ok(element_type) => ConfigChildTarget::Object {
                        role: self.find_or_create_role(element_type, &rule.role_name),
                        element_type,
                    },
                    Err(ConfigurationModelError::UnknownDescriptor { .. }) => {
                        tracing::error!(element = %qualified_name, method = %member.name, type_name = %member.parameter_type, "config child has unknown type");
                        self.diagnostics
                            .unknown_child_type(&qualified_name, &member.name, &member.parameter_type);
                        continue;
                    }
                    Err(error) => {
                        tracing::debug!(element = %qualified_name, method = %member.name, %error, "config child dropped");
                        continue;
                    }
                },
            };
            let mut common = MemberCommon::new(id, member.name.clone(), order);
            common.deprecated = member.deprecated;
            common.documented = member.documentation.is_some();
            common.description = member.documentation.clone();
            common.excluded = member.protected;
            children.push(ConfigChild {
                common,
                role_name: rule.role_name.clone(),
                mandatory: member.mandatory,
                allow_multiple: rule.cardinality == Cardinality::Multiple,
                target,
            });
        }
        let children = select_config_children(&qualified_name, children, &mut self.diagnostics);
        tracing::trace!(element = %qualified_name, count = children.len(), "created config children");
        self.model.elements[id.index()].config_children = children;
    }

    // ========================================================================
    // FINISHING
    // ========================================================================

    /// Flag every member of a capability type as interface based.
    pub(crate) fn mark_interface_based(&mut self) {
        for ty in self.model.types.iter().filter(|t| t.from_capability) {
            for member in &ty.members {
                self.model.elements[member.index()].interface_based = true;
            }
        }
    }

    pub(crate) fn finish(mut self) -> (Model, DiagnosticCollector) {
        let mut failed: Vec<Arc<str>> = self.failed.into_keys().collect();
        failed.sort();
        self.model.failed = failed;
        (self.model, self.diagnostics)
    }
}
