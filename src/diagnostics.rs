//! Diagnostics: queryable model compilation problems.
//!
//! Every warning and per-element error the compiler logs is also recorded
//! here, so that a renderer can show them next to the generated output.

use std::sync::Arc;

use crate::error::ConfigurationModelError;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A diagnostic message about an element or member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    /// Qualified name of the element (or role) the diagnostic is about.
    pub subject: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Optional related information.
    pub related: Vec<RelatedInfo>,
}

/// Related information for a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedInfo {
    /// The related element or role.
    pub subject: Arc<str>,
    /// The message.
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create a new informational diagnostic.
    pub fn info(message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Info, message)
    }

    fn new(severity: Severity, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity,
            code: None,
            subject: None,
            message: message.into(),
            related: Vec::new(),
        }
    }

    /// Set the subject.
    pub fn with_subject(mut self, subject: impl Into<Arc<str>>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Add related information.
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Code Ranges
///
/// - **E0001-E0099**: Authoring errors (the affected element or member is dropped)
/// - **W0001-W0099**: Ambiguities the compiler resolved with a fallback
/// - **I0001-I0099**: Informational notes
pub mod codes {
    // ========================================================================
    // ERRORS (E0001-E0099)
    // ========================================================================

    /// Element could not be compiled.
    pub const ELEMENT_FAILED: &str = "E0001";
    /// Two or more non-deprecated members share an external name within a role.
    pub const UNRESOLVED_NAME_COLLISION: &str = "E0002";
    /// Config child refers to a type the descriptor source does not know.
    pub const UNKNOWN_CHILD_TYPE: &str = "E0003";

    // ========================================================================
    // WARNINGS (W0001-W0099)
    // ========================================================================

    /// Default value does not match the attribute type.
    pub const INVALID_DEFAULT: &str = "W0001";
    /// More than one candidate for highest-common-supertype promotion.
    pub const AMBIGUOUS_PROMOTION: &str = "W0002";
    /// All members sharing an external name are deprecated.
    pub const DEPRECATED_NAME_COLLISION: &str = "W0003";
    /// Config child set mixes object and text config children.
    pub const MIXED_CONFIG_CHILD_SET: &str = "W0004";
    /// Documentation reference points to an unknown class.
    pub const UNKNOWN_DESCRIBED_BY: &str = "W0005";
    /// Root element has no matching root pattern in the role rules.
    pub const ROOT_WITHOUT_PATTERN: &str = "W0006";
    /// Two declared members share a key.
    pub const DUPLICATE_MEMBER: &str = "W0007";
    /// Role rule skipped because its pattern is malformed.
    pub const MALFORMED_ROLE_RULE: &str = "W0008";
    /// Declared and inherited setters of one attribute take different types.
    pub const OVERLOADED_ATTRIBUTE_SETTER: &str = "W0009";
    /// Getter or isser type differs from the setter type.
    pub const GETTER_TYPE_CONFLICT: &str = "W0010";

    // ========================================================================
    // INFO (I0001-I0099)
    // ========================================================================

    /// Single-valued and repeatable config child setters for the same key.
    pub const DUPLICATE_CONFIG_CHILD: &str = "I0001";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during compilation.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Record an element that failed to compile.
    pub fn element_failed(&mut self, error: &ConfigurationModelError) {
        let mut diag = Diagnostic::error(error.to_string()).with_code(codes::ELEMENT_FAILED);
        if let Some(element) = error.element() {
            diag = diag.with_subject(element);
        }
        self.add(diag);
    }

    /// Record a default value that does not parse as the attribute type.
    pub fn invalid_default(&mut self, element: &str, attribute: &str, value: &str, detail: &str) {
        self.add(
            Diagnostic::warning(format!(
                "attribute '{}' has an invalid default value '{}': {}",
                attribute, value, detail
            ))
            .with_subject(element)
            .with_code(codes::INVALID_DEFAULT),
        );
    }

    /// Record an ambiguous highest-common-supertype promotion.
    pub fn ambiguous_promotion(&mut self, type_name: &str, candidates: &[Arc<str>], chosen: &str) {
        let mut diag = Diagnostic::warning(format!(
            "type '{}' has multiple candidate supertypes: {}; chose '{}'",
            type_name,
            candidates.join(", "),
            chosen
        ))
        .with_subject(type_name)
        .with_code(codes::AMBIGUOUS_PROMOTION);
        for candidate in candidates {
            diag = diag.with_related(RelatedInfo {
                subject: candidate.clone(),
                message: Arc::from("candidate supertype"),
            });
        }
        self.add(diag);
    }

    /// Record members of one role that share an external name without a single winner.
    pub fn name_collision(&mut self, role: &str, name: &str, candidates: &[Arc<str>], all_deprecated: bool) {
        let (mut diag, code) = if all_deprecated {
            (
                Diagnostic::warning(format!(
                    "role {}: deprecated members share element name '{}': {}",
                    role,
                    name,
                    candidates.join(", ")
                )),
                codes::DEPRECATED_NAME_COLLISION,
            )
        } else {
            (
                Diagnostic::error(format!(
                    "role {}: members share element name '{}': {}",
                    role,
                    name,
                    candidates.join(", ")
                )),
                codes::UNRESOLVED_NAME_COLLISION,
            )
        };
        diag = diag.with_subject(role).with_code(code);
        for candidate in candidates {
            diag = diag.with_related(RelatedInfo {
                subject: candidate.clone(),
                message: Arc::from(format!("candidate for '{}'", name)),
            });
        }
        self.add(diag);
    }

    /// Record a config child set that combines object and text config children.
    pub fn mixed_config_child_set(&mut self, subject: &str, role_name: &str) {
        self.add(
            Diagnostic::warning(format!(
                "config children with role name '{}' combine object and text kinds",
                role_name
            ))
            .with_subject(subject)
            .with_code(codes::MIXED_CONFIG_CHILD_SET),
        );
    }

    /// Record an object config child whose type is unknown.
    pub fn unknown_child_type(&mut self, element: &str, method: &str, type_name: &str) {
        self.add(
            Diagnostic::error(format!(
                "config child setter '{}' takes unknown type '{}'",
                method, type_name
            ))
            .with_subject(element)
            .with_code(codes::UNKNOWN_CHILD_TYPE),
        );
    }

    /// Record a documentation reference to an unknown class.
    pub fn unknown_described_by(&mut self, element: &str, attribute: &str, target: &str) {
        self.add(
            Diagnostic::warning(format!(
                "attribute '{}' borrows documentation from unknown class '{}'",
                attribute, target
            ))
            .with_subject(element)
            .with_code(codes::UNKNOWN_DESCRIBED_BY),
        );
    }

    /// Record a root element whose role name has no root pattern.
    pub fn root_without_pattern(&mut self, element: &str, role_name: &str) {
        self.add(
            Diagnostic::warning(format!(
                "root element has role name '{}' without a matching root pattern",
                role_name
            ))
            .with_subject(element)
            .with_code(codes::ROOT_WITHOUT_PATTERN),
        );
    }

    /// Record two declared members with the same key.
    pub fn duplicate_member(&mut self, element: &str, key: &str) {
        self.add(
            Diagnostic::warning(format!("multiple members with key '{}', keeping the first", key))
                .with_subject(element)
                .with_code(codes::DUPLICATE_MEMBER),
        );
    }

    /// Record a role rule that was not registered.
    pub fn malformed_role_rule(&mut self, pattern: &str, reason: &str) {
        self.add(
            Diagnostic::warning(format!("role rule skipped: {}", reason))
                .with_subject(pattern)
                .with_code(codes::MALFORMED_ROLE_RULE),
        );
    }

    /// Record an attribute whose declared and inherited setters take different types.
    pub fn overloaded_attribute_setter(&mut self, element: &str, attribute: &str, types: &[Arc<str>]) {
        self.add(
            Diagnostic::warning(format!(
                "overloaded declared or inherited setters, attribute '{}' can be any of: {}",
                attribute,
                types.join(", ")
            ))
            .with_subject(element)
            .with_code(codes::OVERLOADED_ATTRIBUTE_SETTER),
        );
    }

    /// Record a getter or isser whose type differs from the setter type.
    pub fn getter_type_conflict(&mut self, element: &str, setter: &str, setter_type: &str, getter_type: &str) {
        self.add(
            Diagnostic::warning(format!(
                "setter '{}' has type '{}' while the getter has type '{}'",
                setter, setter_type, getter_type
            ))
            .with_subject(element)
            .with_code(codes::GETTER_TYPE_CONFLICT),
        );
    }

    /// Record a discarded duplicate config child setter.
    pub fn duplicate_config_child(&mut self, element: &str, kept: &str, discarded: &str) {
        self.add(
            Diagnostic::info(format!(
                "config child setter '{}' duplicates '{}' and is discarded",
                discarded, kept
            ))
            .with_subject(element)
            .with_code(codes::DUPLICATE_CONFIG_CHILD),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics about a specific subject.
    pub fn diagnostics_for(&self, subject: &str) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.subject.as_deref() == Some(subject))
            .collect()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Get the collected diagnostics, deduplicated, in the order they were added.
    pub fn finish(self) -> Vec<Diagnostic> {
        let mut seen = std::collections::HashSet::new();
        self.diagnostics
            .into_iter()
            .filter(|d| {
                // Deduplicate by (code, subject, message)
                let key = (d.code.clone(), d.subject.clone(), d.message.clone());
                seen.insert(key)
            })
            .collect()
    }
}
