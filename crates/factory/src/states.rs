//! Factory states for common attribute variations
//!
//! States are reusable modifier bundles. A factory applies its states in
//! the order they were added, so a later state overrides an earlier one.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::attributes::{datetime_value, AttributeSet};
use crate::error::{FactoryError, FactoryResult};
use crate::traits::FactoryState;

/// Attribute written by the toggle states
pub const ENABLED: &str = "enabled";

/// Attribute written by [`ArchivedState`]
pub const ARCHIVED_AT: &str = "archived_at";

/// Sets a single attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeState {
    name: String,
    value: Value,
}

impl AttributeState {
    /// Fails on an empty attribute name
    pub fn new(name: impl Into<String>, value: Value) -> FactoryResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FactoryError::InvalidAttributeName { name });
        }
        Ok(Self { name, value })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl FactoryState for AttributeState {
    fn apply(&self, attributes: &mut AttributeSet) -> FactoryResult<()> {
        attributes.insert(self.name.clone(), self.value.clone());
        Ok(())
    }

    fn state_name(&self) -> &str {
        "Attribute"
    }
}

/// Enabled toggle state
#[derive(Debug, Clone, Copy)]
pub struct EnabledState;

impl FactoryState for EnabledState {
    fn apply(&self, attributes: &mut AttributeSet) -> FactoryResult<()> {
        attributes.insert(ENABLED, json!(true));
        Ok(())
    }

    fn state_name(&self) -> &str {
        "Enabled"
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DisabledState;

impl FactoryState for DisabledState {
    fn apply(&self, attributes: &mut AttributeSet) -> FactoryResult<()> {
        attributes.insert(ENABLED, json!(false));
        Ok(())
    }

    fn state_name(&self) -> &str {
        "Disabled"
    }
}

/// Archived as of an exact timestamp
#[derive(Debug, Clone, Copy)]
pub struct ArchivedState {
    at: DateTime<Utc>,
}

impl ArchivedState {
    pub fn at(at: DateTime<Utc>) -> Self {
        Self { at }
    }
}

impl FactoryState for ArchivedState {
    fn apply(&self, attributes: &mut AttributeSet) -> FactoryResult<()> {
        attributes.insert(ARCHIVED_AT, datetime_value(self.at));
        Ok(())
    }

    fn state_name(&self) -> &str {
        "Archived"
    }
}

/// Custom state builder for flexible state creation
#[derive(Debug, Clone)]
pub struct CustomState {
    modifications: AttributeSet,
    name: String,
}

impl CustomState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            modifications: AttributeSet::new(),
            name: name.into(),
        }
    }

    /// State carrying a ready-made bundle of attributes
    pub fn from_attributes(name: impl Into<String>, modifications: AttributeSet) -> Self {
        Self {
            modifications,
            name: name.into(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.modifications.insert(key, value);
        self
    }

    pub fn with_bool_flag(self, flag: impl Into<String>, value: bool) -> Self {
        self.with(flag, json!(value))
    }

    pub fn with_timestamp(self, field: impl Into<String>, datetime: DateTime<Utc>) -> Self {
        self.with(field, datetime_value(datetime))
    }

    pub fn with_null(self, field: impl Into<String>) -> Self {
        self.with(field, Value::Null)
    }
}

impl FactoryState for CustomState {
    fn apply(&self, attributes: &mut AttributeSet) -> FactoryResult<()> {
        if let Some(name) = self.modifications.keys().into_iter().find(|k| k.trim().is_empty()) {
            return Err(FactoryError::InvalidAttributeName {
                name: name.to_string(),
            });
        }
        attributes.merge(self.modifications.clone());
        Ok(())
    }

    fn state_name(&self) -> &str {
        &self.name
    }
}
