//! Digester rules reader.
//!
//! ## Structure
//!
//! ```xml
//! <digester-rules>
//!   <rule pattern="configuration"/>
//!   <rule pattern="*/pipe" registerMethod="addPipe"/>
//!   <rule pattern="*/pipeline/exits/exit" registerMethod="registerExit"/>
//!   <rule pattern="*/note" registerTextMethod="addNote"/>
//! </digester-rules>
//! ```
//!
//! Every `rule` element becomes a [`RuleRecord`]. Other elements are ignored.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::rules::{RoleRuleTable, RuleRecord};

use super::InterchangeError;
use super::error::read_file;

const RULE_TAG: &str = "rule";

/// Read the raw rule records of a digester rules document, in document order.
pub fn read_rule_records(input: &[u8]) -> Result<Vec<RuleRecord>, InterchangeError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if let Some(record) = read_rule(e, records.len(), reader.buffer_position())? {
                    records.push(record);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(InterchangeError::xml(reader.error_position(), e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    tracing::debug!(rules = records.len(), "read digester rules");
    Ok(records)
}

/// `index` counts the rule elements before this one.
fn read_rule(e: &BytesStart<'_>, index: usize, position: u64) -> Result<Option<RuleRecord>, InterchangeError> {
    if e.name().as_ref() != RULE_TAG.as_bytes() {
        return Ok(None);
    }

    let mut pattern: Option<String> = None;
    let mut register_method: Option<String> = None;
    let mut register_text_method: Option<String> = None;
    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| InterchangeError::xml(position, e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| InterchangeError::xml(position, e.to_string()))?
            .trim()
            .to_string();
        match attr.key.as_ref() {
            b"pattern" => pattern = Some(value),
            b"registerMethod" if !value.is_empty() => register_method = Some(value),
            b"registerTextMethod" if !value.is_empty() => register_text_method = Some(value),
            _ => {}
        }
    }

    let pattern = pattern.ok_or(InterchangeError::MissingRuleAttribute {
        index,
        attribute: "pattern",
    })?;
    Ok(Some(RuleRecord {
        pattern,
        register_method,
        register_text_method,
    }))
}

/// Read a digester rules document into a rule table.
///
/// Rules with a malformed pattern end up in [`RoleRuleTable::rejected`].
pub fn read_role_rules(input: &[u8]) -> Result<RoleRuleTable, InterchangeError> {
    let records = read_rule_records(input)?;
    Ok(RoleRuleTable::from_records(&records))
}

/// Load a digester rules file into a rule table.
pub fn load_role_rules(path: &Path) -> Result<RoleRuleTable, InterchangeError> {
    tracing::debug!(path = %path.display(), "loading digester rules");
    read_role_rules(&read_file(path)?)
}
