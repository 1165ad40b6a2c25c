//! Acceptance-criteria field model
//!
//! Trackers store acceptance criteria as plain text, as a list of strings,
//! or as a rich document tree (nested nodes carrying `text` and `content`).
//! [`AcField`] classifies the raw JSON once and every rendering dispatches
//! on the variant.

use serde_json::Value;
use thiserror::Error;

const MAX_DOCUMENT_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum AcField {
    Absent,
    PlainText(String),
    /// Entries that were null in the source are kept as `None`.
    BulletList(Vec<Option<String>>),
    RichDocument(Value),
}

/// A rich document that cannot be flattened
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("node text must be a string")]
    NonStringText,

    #[error("node content must be an array")]
    NonArrayContent,

    #[error("document nested deeper than {0} levels")]
    TooDeep(usize),
}

impl AcField {
    /// Classify a raw field value as returned by the tracker.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => AcField::Absent,
            Some(Value::String(s)) => AcField::PlainText(s.clone()),
            Some(Value::Array(items)) => AcField::BulletList(list_entries(items)),
            Some(obj @ Value::Object(_)) => AcField::RichDocument(obj.clone()),
            Some(other) => AcField::PlainText(other.to_string()),
        }
    }

    /// Plain text for the field; empty when nothing usable is present.
    pub fn text(&self) -> String {
        match self {
            AcField::Absent => String::new(),
            AcField::PlainText(s) => s.trim().to_string(),
            AcField::BulletList(items) => bullet_lines(items),
            AcField::RichDocument(doc) => match flatten_document(doc) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!("Ignoring malformed rich document: {}", e);
                    String::new()
                }
            },
        }
    }

    /// Like [`AcField::text`], but an empty result becomes a readable
    /// placeholder naming the field.
    pub fn normalize(&self, field_id: &str) -> String {
        let text = self.text();
        if text.is_empty() {
            no_ac_message(field_id)
        } else {
            text
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

pub fn no_ac_message(field_id: &str) -> String {
    format!("_No Acceptance Criteria found in {}._", field_id)
}

fn list_entries(items: &[Value]) -> Vec<Option<String>> {
    items
        .iter()
        .map(|item| match item {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
        .collect()
}

fn bullet_lines(items: &[Option<String>]) -> String {
    items
        .iter()
        .flatten()
        .filter(|item| !item.is_empty())
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Concatenate every text leaf of a rich document, collapsing whitespace.
pub fn flatten_document(doc: &Value) -> Result<String, DocumentError> {
    let raw = walk(doc, 0)?;
    Ok(raw.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn walk(node: &Value, depth: usize) -> Result<String, DocumentError> {
    if depth > MAX_DOCUMENT_DEPTH {
        return Err(DocumentError::TooDeep(MAX_DOCUMENT_DEPTH));
    }

    match node {
        Value::Object(map) => {
            let mut parts = Vec::new();
            match map.get("text") {
                None | Some(Value::Null) => parts.push(String::new()),
                Some(Value::String(text)) => parts.push(text.clone()),
                Some(_) => return Err(DocumentError::NonStringText),
            }
            match map.get("content") {
                None | Some(Value::Null) => {}
                Some(Value::Array(children)) => {
                    for child in children.iter().filter(|c| is_truthy(c)) {
                        parts.push(walk(child, depth + 1)?);
                    }
                }
                Some(_) => return Err(DocumentError::NonArrayContent),
            }
            Ok(parts.join(" "))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| walk(item, depth + 1))
            .collect::<Result<Vec<_>, _>>()
            .map(|parts| parts.join(" ")),
        _ => Ok(String::new()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(_) => true,
    }
}
