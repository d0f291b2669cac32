//! Populates a shipping method from transformed attributes

use serde_json::{Map, Value};
use seedling_factory::{AttributeSet, EntityUpdater, FactoryError, FactoryResult};
use tracing::trace;

use crate::model::fields::{
    ARCHIVED_AT, CALCULATOR, CATEGORY, CHANNELS, CODE, CONFIGURATION, DESCRIPTION, ENABLED, NAME,
    TAX_CATEGORY, ZONE,
};
use crate::model::{Channel, Reference, ShippingMethod};

/// Assigns every known attribute to its field.
///
/// References must already be objects (or null); a leftover code string
/// means the transformer was bypassed and is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShippingMethodUpdater;

impl EntityUpdater<ShippingMethod> for ShippingMethodUpdater {
    fn update(&self, method: &mut ShippingMethod, attributes: &AttributeSet) -> FactoryResult<()> {
        // Sorted so the first reported error does not depend on hash order
        for name in attributes.keys() {
            match name {
                CODE => method.code = attributes.optional_string(CODE)?,
                NAME => method.name = attributes.optional_string(NAME)?,
                DESCRIPTION => method.description = attributes.optional_string(DESCRIPTION)?,
                ENABLED => method.enabled = attributes.bool(ENABLED)?,
                ARCHIVED_AT => method.archived_at = attributes.optional_datetime(ARCHIVED_AT)?,
                ZONE => method.zone = reference(attributes, ZONE)?,
                TAX_CATEGORY => method.tax_category = reference(attributes, TAX_CATEGORY)?,
                CATEGORY => method.category = reference(attributes, CATEGORY)?,
                CHANNELS => {
                    method.channels.clear();
                    for channel in channels(attributes)? {
                        method.add_channel(channel);
                    }
                }
                CALCULATOR => method.calculator = attributes.optional_string(CALCULATOR)?,
                CONFIGURATION => method.configuration = configuration(attributes)?,
                unknown => {
                    return Err(FactoryError::UnknownAttribute {
                        name: unknown.to_string(),
                    })
                }
            }
            trace!(attribute = name, "assigned shipping method attribute");
        }
        Ok(())
    }
}

fn reference<T: Reference>(attributes: &AttributeSet, name: &str) -> FactoryResult<Option<T>> {
    match attributes.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Object(_)) => decode::<T>(name, value).map(Some),
        Some(_) => Err(FactoryError::invalid_attribute(
            name,
            format!("a resolved {} or null", T::KIND),
        )),
    }
}

fn channels(attributes: &AttributeSet) -> FactoryResult<Vec<Channel>> {
    match attributes.get(CHANNELS) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| match entry {
                Value::Object(_) => decode::<Channel>(CHANNELS, entry),
                _ => Err(FactoryError::invalid_attribute(CHANNELS, "a list of resolved channels")),
            })
            .collect(),
        Some(_) => Err(FactoryError::invalid_attribute(CHANNELS, "a list of resolved channels")),
    }
}

fn configuration(attributes: &AttributeSet) -> FactoryResult<Map<String, Value>> {
    match attributes.get(CONFIGURATION) {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(_) => Err(FactoryError::invalid_attribute(CONFIGURATION, "an object or null")),
    }
}

fn decode<T: Reference>(name: &str, value: &Value) -> FactoryResult<T> {
    serde_json::from_value(value.clone()).map_err(|_| {
        FactoryError::invalid_attribute(name, format!("a {} with a code and a name", T::KIND))
    })
}
