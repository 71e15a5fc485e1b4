use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

use crate::status::error::{DecodeError, Document};

/// Parse raw response bytes and require a JSON object at the top level.
pub fn parse_document(document: Document, raw: &[u8]) -> Result<Map<String, Value>, DecodeError> {
    let value: Value = serde_json::from_slice(raw).map_err(|e| DecodeError::Parse {
        document,
        message: e.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DecodeError::Parse {
            document,
            message: format!("expected a JSON object, found {}", type_name(&other)),
        }),
    }
}

pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Typed, fail-loud access to the fields of one JSON object.
///
/// Every error names the full path of the field (`instance[0].cardinal.url`),
/// built from the scope the accessor was created with.
pub struct Fields<'a> {
    document: Document,
    scope: String,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn new(document: Document, scope: impl Into<String>, map: &'a Map<String, Value>) -> Self {
        Self {
            document,
            scope: scope.into(),
            map,
        }
    }

    /// Cast `value` to an object; `path` names it in the error and scopes its children.
    pub fn from_value(
        document: Document,
        path: impl Into<String>,
        value: &'a Value,
    ) -> Result<Self, DecodeError> {
        let path = path.into();
        match value {
            Value::Object(map) => Ok(Self::new(document, path, map)),
            other => Err(DecodeError::shape(
                document,
                path,
                format!("expected object, found {}", type_name(other)),
            )),
        }
    }

    pub fn path(&self, key: &str) -> String {
        if self.scope.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.scope, key)
        }
    }

    pub fn error(&self, key: &str, reason: impl Into<String>) -> DecodeError {
        DecodeError::shape(self.document, self.path(key), reason)
    }

    fn get(&self, key: &str) -> Result<&'a Value, DecodeError> {
        match self.map.get(key) {
            None | Some(Value::Null) => Err(self.error(key, "missing")),
            Some(value) => Ok(value),
        }
    }

    fn mismatch(&self, key: &str, expected: &str, found: &Value) -> DecodeError {
        self.error(
            key,
            format!("expected {}, found {}", expected, type_name(found)),
        )
    }

    pub fn string(&self, key: &str) -> Result<&'a str, DecodeError> {
        let value = self.get(key)?;
        value
            .as_str()
            .ok_or_else(|| self.mismatch(key, "string", value))
    }

    /// Numbers are truncated toward zero, so `3.0` and `3` both read as `3`.
    pub fn integer(&self, key: &str) -> Result<i64, DecodeError> {
        let value = self.get(key)?;
        value
            .as_i64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            })
            .ok_or_else(|| self.mismatch(key, "integer", value))
    }

    pub fn boolean(&self, key: &str) -> Result<bool, DecodeError> {
        let value = self.get(key)?;
        value
            .as_bool()
            .ok_or_else(|| self.mismatch(key, "boolean", value))
    }

    pub fn object(&self, key: &str) -> Result<Fields<'a>, DecodeError> {
        let value = self.get(key)?;
        Fields::from_value(self.document, self.path(key), value)
    }

    pub fn timestamp(&self, key: &str) -> Result<DateTime<FixedOffset>, DecodeError> {
        let raw = self.string(key)?;
        DateTime::parse_from_rfc3339(raw)
            .map_err(|e| self.error(key, format!("invalid RFC3339 timestamp '{}': {}", raw, e)))
    }
}
