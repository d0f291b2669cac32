//! Resolves shorthand references in shipping method attributes

use std::sync::Arc;

use serde_json::{json, Value};
use seedling_factory::{AttributeSet, FactoryError, FactoryResult, Transformer};
use tracing::trace;

use crate::catalog::{reference_value, ReferenceCatalog};
use crate::model::fields::{CATEGORY, CHANNELS, CODE, NAME, TAX_CATEGORY, ZONE};
use crate::model::{Reference, ShippingMethod};

/// Turn a display name into a code: spaces, hyphens and apostrophes become underscores
pub fn name_to_code(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' | '\'' => '_',
            c => c,
        })
        .collect()
}

/// Expands codes into catalog entities and derives a missing code from the name.
///
/// - `zone`, `tax_category`, `category`: a code string becomes the entity
///   object; objects and null pass through.
/// - `channels`: a single value or a list, each entry resolved the same way.
/// - `code`: derived from `name` when null or absent.
#[derive(Debug, Clone)]
pub struct ShippingMethodTransformer {
    catalog: Arc<ReferenceCatalog>,
}

impl ShippingMethodTransformer {
    pub fn new(catalog: Arc<ReferenceCatalog>) -> Self {
        Self { catalog }
    }
}

impl Transformer<ShippingMethod> for ShippingMethodTransformer {
    fn transform(&self, mut attributes: AttributeSet) -> FactoryResult<AttributeSet> {
        let catalog = &self.catalog;

        if let Some(value) = attributes.remove(ZONE) {
            let zone = resolve(ZONE, value, |code| catalog.zone(code))?;
            attributes.insert(ZONE, zone);
        }
        if let Some(value) = attributes.remove(TAX_CATEGORY) {
            let tax_category = resolve(TAX_CATEGORY, value, |code| catalog.tax_category(code))?;
            attributes.insert(TAX_CATEGORY, tax_category);
        }
        if let Some(value) = attributes.remove(CATEGORY) {
            let category = resolve(CATEGORY, value, |code| catalog.category(code))?;
            attributes.insert(CATEGORY, category);
        }
        if let Some(value) = attributes.remove(CHANNELS) {
            let entries = match value {
                Value::Null => Vec::new(),
                Value::Array(entries) => entries,
                single => vec![single],
            };
            let channels = entries
                .into_iter()
                .map(|entry| resolve(CHANNELS, entry, |code| catalog.channel(code)))
                .collect::<FactoryResult<Vec<_>>>()?;
            attributes.insert(CHANNELS, Value::Array(channels));
        }

        let derived_code = match (attributes.get(CODE), attributes.get(NAME)) {
            (None | Some(Value::Null), Some(Value::String(name))) => Some(name_to_code(name)),
            _ => None,
        };
        if let Some(code) = derived_code {
            trace!(%code, "derived shipping method code from name");
            attributes.insert(CODE, json!(code));
        }

        Ok(attributes)
    }
}

fn resolve<'a, T, F>(field: &str, value: Value, lookup: F) -> FactoryResult<Value>
where
    T: Reference + 'a,
    F: Fn(&str) -> Option<&'a T>,
{
    match value {
        Value::String(code) => {
            let entity =
                lookup(&code).ok_or_else(|| FactoryError::unresolved(T::KIND, code.as_str()))?;
            trace!(field, code = %code, "resolved reference");
            reference_value(entity)
        }
        value @ (Value::Object(_) | Value::Null) => Ok(value),
        _ => Err(FactoryError::invalid_attribute(
            field,
            format!("a {} code, a {} object or null", T::KIND, T::KIND),
        )),
    }
}
