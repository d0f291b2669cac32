//! Attribute sets: named, loosely typed values destined for an entity

use std::collections::hash_map::{IntoIter, Iter};
use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::error::{FactoryError, FactoryResult};

/// Mapping from attribute name to value, before and after transformation.
///
/// Values are `serde_json::Value`s: scalars, lists, nested objects (a
/// resolved related entity), plain strings (a shorthand reference or an
/// RFC 3339 timestamp) and null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    values: HashMap<String, Value>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, returning the value it replaced
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.values.iter()
    }

    /// Attribute names in sorted order
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Merge `overrides` on top of this set. Overrides win on every shared key.
    pub fn merge(&mut self, overrides: AttributeSet) {
        self.values.extend(overrides.values);
    }

    /// Consuming variant of [`AttributeSet::merge`]
    pub fn merged(mut self, overrides: AttributeSet) -> Self {
        self.merge(overrides);
        self
    }

    /// Required string attribute
    pub fn string(&self, name: &str) -> FactoryResult<String> {
        match self.get(name) {
            Some(Value::String(s)) => Ok(s.clone()),
            _ => Err(FactoryError::invalid_attribute(name, "a string")),
        }
    }

    /// String attribute where null and absence both mean `None`
    pub fn optional_string(&self, name: &str) -> FactoryResult<Option<String>> {
        match self.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(FactoryError::invalid_attribute(name, "a string or null")),
        }
    }

    pub fn bool(&self, name: &str) -> FactoryResult<bool> {
        match self.get(name) {
            Some(Value::Bool(b)) => Ok(*b),
            _ => Err(FactoryError::invalid_attribute(name, "a boolean")),
        }
    }

    pub fn optional_datetime(&self, name: &str) -> FactoryResult<Option<DateTime<Utc>>> {
        match self.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => parse_datetime(value).map(Some).ok_or_else(|| {
                FactoryError::invalid_attribute(name, "an RFC 3339 timestamp or null")
            }),
        }
    }
}

/// Encode a timestamp as an attribute value at full (nanosecond) precision.
pub fn datetime_value(datetime: DateTime<Utc>) -> Value {
    Value::String(datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// Decode a timestamp written by [`datetime_value`] or any RFC 3339 string.
pub fn parse_datetime(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

impl From<HashMap<String, Value>> for AttributeSet {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

impl TryFrom<Value> for AttributeSet {
    type Error = FactoryError;

    fn try_from(value: Value) -> FactoryResult<Self> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(FactoryError::Serialization {
                name: "<attributes>".to_string(),
                message: format!("expected an object, got {}", other),
            }),
        }
    }
}

impl From<AttributeSet> for Value {
    fn from(attributes: AttributeSet) -> Self {
        Value::Object(attributes.values.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AttributeSet {
    type Item = (String, Value);
    type IntoIter = IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use serde_json::json;

    #[test]
    fn test_merge_overrides_win() {
        let mut defaults = AttributeSet::new()
            .with("code", json!("default"))
            .with("enabled", json!(true));
        let overrides = AttributeSet::new().with("code", json!("DHL"));

        defaults.merge(overrides);

        assert_eq!(defaults.get("code"), Some(&json!("DHL")));
        assert_eq!(defaults.get("enabled"), Some(&json!(true)));
        assert_eq!(defaults.len(), 2);
    }

    #[test]
    fn test_typed_readers() {
        let attrs = AttributeSet::try_from(json!({
            "name": "Express",
            "description": null,
            "enabled": false,
            "position": 3,
        }))
        .unwrap();

        assert_eq!(attrs.string("name").unwrap(), "Express");
        assert_eq!(attrs.optional_string("description").unwrap(), None);
        assert_eq!(attrs.optional_string("missing").unwrap(), None);
        assert!(!attrs.bool("enabled").unwrap());
        assert!(attrs.bool("name").is_err());
        assert_eq!(
            attrs.optional_string("position"),
            Err(FactoryError::invalid_attribute("position", "a string or null"))
        );
    }

    #[test]
    fn test_datetime_keeps_nanoseconds() {
        let at = Utc
            .with_ymd_and_hms(2024, 2, 29, 23, 59, 59)
            .unwrap()
            .with_nanosecond(123_456_789)
            .unwrap();

        let attrs = AttributeSet::new().with("archived_at", datetime_value(at));

        assert_eq!(attrs.optional_datetime("archived_at").unwrap(), Some(at));
    }

    #[test]
    fn test_datetime_normalizes_offsets() {
        let attrs = AttributeSet::new().with("archived_at", json!("2024-01-01T02:00:00+02:00"));
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(attrs.optional_datetime("archived_at").unwrap(), Some(expected));
        assert!(AttributeSet::new()
            .with("archived_at", json!("yesterday"))
            .optional_datetime("archived_at")
            .is_err());
    }

    #[test]
    fn test_try_from_rejects_non_objects() {
        assert!(AttributeSet::try_from(json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_keys_sorted() {
        let attrs = AttributeSet::new()
            .with("zone", Value::Null)
            .with("code", Value::Null)
            .with("name", Value::Null);

        assert_eq!(attrs.keys(), vec!["code", "name", "zone"]);
    }
}
