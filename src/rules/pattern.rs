//! Nesting patterns of the role rules.
//!
//! A pattern is a `/`-separated list of role names. `*/pipeline/pipe` is
//! wildcard-rooted and matches a `pipe` inside a `pipeline` anywhere.
//! `configuration/module` is anchored at the root role `configuration`.

use std::fmt;
use std::sync::Arc;

use crate::error::{ConfigurationModelError, Result};

const WILDCARD: &str = "*";
const SEPARATOR: char = '/';

/// A parsed nesting pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RolePattern {
    /// Role names, without the leading wildcard.
    components: Vec<Arc<str>>,
    anchored: bool,
}

impl RolePattern {
    /// Parse a pattern like `*/roleA/roleB` or `root/roleA`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ConfigurationModelError::malformed_pattern(text, "empty pattern"));
        }
        let mut parts = text.split(SEPARATOR).peekable();
        let anchored = parts.peek() != Some(&WILDCARD);
        if !anchored {
            parts.next();
        }
        let mut components = Vec::new();
        for part in parts {
            if part.is_empty() {
                return Err(ConfigurationModelError::malformed_pattern(text, "empty component"));
            }
            if part == WILDCARD {
                return Err(ConfigurationModelError::malformed_pattern(
                    text,
                    "wildcard is only allowed as the first component",
                ));
            }
            if !is_role_name(part) {
                return Err(ConfigurationModelError::malformed_pattern(
                    text,
                    format!("'{}' is not a valid role name", part),
                ));
            }
            components.push(Arc::from(part));
        }
        if components.is_empty() {
            return Err(ConfigurationModelError::malformed_pattern(text, "no role name"));
        }
        Ok(Self {
            components,
            anchored,
        })
    }

    /// The role name introduced by this pattern (its last component).
    pub fn role_name(&self) -> &Arc<str> {
        // parse() guarantees at least one component
        &self.components[self.components.len() - 1]
    }

    /// Whether the pattern starts at a root role instead of a wildcard.
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// A single-component anchored pattern declares a root role.
    pub fn is_root(&self) -> bool {
        self.anchored && self.components.len() == 1
    }

    /// Role names from the outermost to the innermost.
    pub fn components(&self) -> &[Arc<str>] {
        &self.components
    }
}

impl fmt::Display for RolePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.anchored {
            write!(f, "{}{}", WILDCARD, SEPARATOR)?;
        }
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            f.write_str(component)?;
        }
        Ok(())
    }
}

/// Role names are identifiers, with `-` allowed after the first character.
fn is_role_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || unicode_ident::is_xid_start(first))
        && chars.all(|c| c == '-' || unicode_ident::is_xid_continue(c))
}
