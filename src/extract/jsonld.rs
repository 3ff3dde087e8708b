//! Normalization of CEDAR JSON-LD values.
//!
//! Literals arrive as `{"@value": ...}` and references as `{"@id": ...}`,
//! either alone or in arrays. Missing keys, `null` and empty strings all mean
//! "absent"; only a value of the wrong shape is an error.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::error::ExtractError;
use crate::model::Vocab;

pub const LITERAL_KEY: &str = "@value";
pub const REFERENCE_KEY: &str = "@id";

static YYYY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})\b").expect("year pattern is valid"));

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn malformed(field: &str, expected: &'static str) -> ExtractError {
    ExtractError::Malformed {
        field: field.to_string(),
        expected,
    }
}

/// Unwraps a literal. Bare strings are accepted as already-compacted literals.
pub fn unwrap_literal(field: &str, value: &Value) -> Result<Option<String>, ExtractError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(non_empty(s)),
        Value::Object(obj) => match obj.get(LITERAL_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(non_empty(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(_) => Err(malformed(field, "a scalar @value")),
        },
        _ => Err(malformed(field, "a literal object")),
    }
}

pub fn unwrap_reference(field: &str, value: &Value) -> Result<Option<String>, ExtractError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(non_empty(s)),
        Value::Object(obj) => match obj.get(REFERENCE_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(non_empty(s)),
            Some(_) => Err(malformed(field, "a string @id")),
        },
        _ => Err(malformed(field, "a reference object")),
    }
}

/// Maps the accepted yes/no tokens (case-insensitive, trimmed) to a bool.
pub fn sanitize_boolean(text: &str) -> Result<bool, ExtractError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" => Ok(true),
        "no" | "false" => Ok(false),
        _ => Err(ExtractError::InvalidBoolean(text.to_string())),
    }
}

/// First standalone four digit run, e.g. "2015" from "approximately 2015-2018".
pub fn extract_year(text: &str) -> Option<String> {
    YYYY.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// A named object inside a CEDAR document.
#[derive(Debug, Clone, Copy)]
pub struct Stanza<'a> {
    path: &'a str,
    body: &'a Map<String, Value>,
}

impl<'a> Stanza<'a> {
    pub fn new(path: &'a str, body: &'a Map<String, Value>) -> Self {
        Self { path, body }
    }

    /// Top-level stanza that must be present as a non-empty object.
    pub fn required(document: &'a Value, name: &'a str) -> Result<Self, ExtractError> {
        match document.get(name) {
            Some(Value::Object(body)) if !body.is_empty() => Ok(Self::new(name, body)),
            _ => Err(ExtractError::MissingStanza(name.to_string())),
        }
    }

    pub fn body(&self) -> &'a Map<String, Value> {
        self.body
    }

    fn field_path(&self, key: &str) -> String {
        format!("{}.{}", self.path, key)
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.body.get(key)
    }

    /// Nested object such as `Data Download`; absent or `null` yields `None`.
    pub fn child(&self, key: &'a str) -> Result<Option<Stanza<'a>>, ExtractError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(body)) => Ok(Some(Stanza::new(key, body))),
            Some(_) => Err(malformed(&self.field_path(key), "an object")),
        }
    }

    pub fn literal(&self, key: &str) -> Result<Option<String>, ExtractError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => unwrap_literal(&self.field_path(key), value),
        }
    }

    pub fn require_literal(&self, key: &str) -> Result<String, ExtractError> {
        self.literal(key)?.ok_or_else(|| ExtractError::MissingField {
            stanza: self.path.to_string(),
            field: key.to_string(),
        })
    }

    pub fn reference(&self, key: &str) -> Result<Option<String>, ExtractError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => unwrap_reference(&self.field_path(key), value),
        }
    }

    fn collect<F>(&self, key: &str, unwrap: F) -> Result<Vec<String>, ExtractError>
    where
        F: Fn(&str, &Value) -> Result<Option<String>, ExtractError>,
    {
        let field = self.field_path(key);
        match self.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(v) = unwrap(&field, item)? {
                        values.push(v);
                    }
                }
                Ok(values)
            }
            Some(single) => Ok(unwrap(&field, single)?.into_iter().collect()),
        }
    }

    fn slots<F>(&self, key: &str, unwrap: F) -> Result<Vec<Option<String>>, ExtractError>
    where
        F: Fn(&str, &Value) -> Result<Option<String>, ExtractError>,
    {
        let field = self.field_path(key);
        match self.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items.iter().map(|item| unwrap(&field, item)).collect(),
            Some(single) => Ok(vec![unwrap(&field, single)?]),
        }
    }

    /// Non-empty literals of a list field, in source order.
    pub fn literals(&self, key: &str) -> Result<Vec<String>, ExtractError> {
        self.collect(key, unwrap_literal)
    }

    pub fn references(&self, key: &str) -> Result<Vec<String>, ExtractError> {
        self.collect(key, unwrap_reference)
    }

    /// Every slot of a list field, blanks kept as `None`, for lists paired
    /// by index with another list.
    pub fn positional_literals(&self, key: &str) -> Result<Vec<Option<String>>, ExtractError> {
        self.slots(key, unwrap_literal)
    }

    pub fn positional_references(&self, key: &str) -> Result<Vec<Option<String>>, ExtractError> {
        self.slots(key, unwrap_reference)
    }

    pub fn boolean(&self, key: &str) -> Result<Option<bool>, ExtractError> {
        self.literal(key)?
            .map(|text| sanitize_boolean(&text))
            .transpose()
    }

    pub fn year(&self, key: &str) -> Result<Option<String>, ExtractError> {
        Ok(self.literal(key)?.as_deref().and_then(extract_year))
    }

    /// Controlled list `key` plus its free-text companion list `other_key`.
    pub fn vocab(&self, key: &str, other_key: &str) -> Result<Vocab, ExtractError> {
        Ok(Vocab::new(self.literals(key)?, self.literals(other_key)?))
    }
}
