//! Raw field reader
//!
//! Pulls typed values out of a JSON object, applies a field rule to each and
//! keeps going after a failure so that a record reports every bad field at once.

use serde_json::{Map, Value};
use tracing::debug;

use super::error::{FieldValidationError, UserValidationError, ValidationErrors};
use super::record::RecordKind;

/// Accumulating reader over one JSON object
pub struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
    prefix: String,
    errors: Vec<FieldValidationError>,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self::with_prefix(fields, "")
    }

    /// Reader whose error paths are nested under `prefix` (e.g. `items[0]`)
    pub fn with_prefix(fields: &'a Map<String, Value>, prefix: impl Into<String>) -> Self {
        Self {
            fields,
            prefix: prefix.into(),
            errors: Vec::new(),
        }
    }

    fn path(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.prefix, name)
        }
    }

    fn reject(&mut self, name: &str, reason: UserValidationError) {
        let field = self.path(name);
        self.errors.push(FieldValidationError::new(field, reason));
    }

    /// `null` counts as absent
    fn present(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    fn string(&mut self, name: &str, value: &'a Value) -> Option<&'a str> {
        match value.as_str() {
            Some(s) => Some(s),
            None => {
                self.reject(name, UserValidationError::InvalidType("a string"));
                None
            }
        }
    }

    fn apply<T>(
        &mut self,
        name: &str,
        raw: &'a str,
        rule: impl FnOnce(&'a str) -> Result<T, UserValidationError>,
    ) -> Option<T> {
        match rule(raw) {
            Ok(value) => Some(value),
            Err(reason) => {
                self.reject(name, reason);
                None
            }
        }
    }

    /// Required string field checked by `rule`
    pub fn required<T>(
        &mut self,
        name: &str,
        rule: impl FnOnce(&'a str) -> Result<T, UserValidationError>,
    ) -> Option<T> {
        let Some(value) = self.present(name) else {
            self.reject(name, UserValidationError::Missing);
            return None;
        };

        let raw = self.string(name, value)?;
        self.apply(name, raw, rule)
    }

    /// Optional string field checked by `rule` when present
    ///
    /// The outer `Option` is `None` when the field failed; the inner one is
    /// `None` when it was absent.
    pub fn optional<T>(
        &mut self,
        name: &str,
        rule: impl FnOnce(&'a str) -> Result<T, UserValidationError>,
    ) -> Option<Option<T>> {
        let Some(value) = self.present(name) else {
            return Some(None);
        };

        let raw = self.string(name, value)?;
        self.apply(name, raw, rule).map(Some)
    }

    /// Required non-negative integer
    pub fn required_count(&mut self, name: &str) -> Option<u64> {
        let Some(value) = self.present(name) else {
            self.reject(name, UserValidationError::Missing);
            return None;
        };

        match value.as_u64() {
            Some(n) => Some(n),
            None => {
                self.reject(name, UserValidationError::InvalidType("a non-negative integer"));
                None
            }
        }
    }

    /// Array of nested objects, each parsed by `parse` under `name[i]`
    ///
    /// Nested failures are merged into this reader.
    pub fn nested_list<T>(
        &mut self,
        name: &str,
        required: bool,
        parse: impl Fn(&mut FieldReader<'a>) -> Option<T>,
    ) -> Option<Vec<T>> {
        let Some(value) = self.present(name) else {
            if required {
                self.reject(name, UserValidationError::Missing);
                return None;
            }
            return Some(Vec::new());
        };

        let Some(items) = value.as_array() else {
            self.reject(name, UserValidationError::InvalidType("an array"));
            return None;
        };

        let mut parsed = Vec::with_capacity(items.len());
        let mut failed = false;

        for (index, item) in items.iter().enumerate() {
            let item_name = format!("{}[{}]", name, index);

            let Some(object) = item.as_object() else {
                self.reject(&item_name, UserValidationError::InvalidType("an object"));
                failed = true;
                continue;
            };

            let mut nested = FieldReader::with_prefix(object, self.path(&item_name));
            match parse(&mut nested) {
                Some(value) if nested.is_clean() => parsed.push(value),
                _ => failed = true,
            }
            self.errors.append(&mut nested.errors);
        }

        if failed { None } else { Some(parsed) }
    }

    /// Log fields that no rule looked at
    pub fn note_unknown(&self, known: &[&str]) {
        for name in self.fields.keys().filter(|k| !known.contains(&k.as_str())) {
            debug!(field = %self.path(name), "Ignoring unknown field");
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Collected failures for `record`
    pub fn into_errors(self, record: RecordKind) -> ValidationErrors {
        ValidationErrors::new(record, self.errors)
    }
}
