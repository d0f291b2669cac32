//! Default attributes for a shipping method

use std::sync::Arc;

use serde_json::{json, Map, Value};
use seedling_factory::{AttributeSet, DefaultValues, Faker, FactoryResult};

use crate::catalog::{reference_value, ReferenceCatalog};
use crate::model::fields::{
    ARCHIVED_AT, CALCULATOR, CATEGORY, CHANNELS, CODE, CONFIGURATION, DESCRIPTION, ENABLED, NAME,
    TAX_CATEGORY, ZONE,
};
use crate::model::{ShippingMethod, Zone, FLAT_RATE};
use crate::transformer::name_to_code;

/// Generates an enabled flat-rate method with a fake name, a zone and every
/// catalog channel.
///
/// Related entities are emitted as objects, never as codes, so the
/// transformer leaves them untouched.
#[derive(Debug, Clone)]
pub struct ShippingMethodDefaults {
    catalog: Arc<ReferenceCatalog>,
}

impl ShippingMethodDefaults {
    pub fn new(catalog: Arc<ReferenceCatalog>) -> Self {
        Self { catalog }
    }

    fn zone(&self, faker: &mut Faker) -> FactoryResult<Value> {
        let zones = self.catalog.zones();
        match faker.element(&zones) {
            Some(zone) => reference_value(*zone),
            None => {
                let zone = Zone::new(faker.code("zone"), faker.words(2));
                reference_value(&zone)
            }
        }
    }
}

impl DefaultValues<ShippingMethod> for ShippingMethodDefaults {
    fn defaults(&self, faker: &mut Faker) -> FactoryResult<AttributeSet> {
        let name = faker.words(3);
        let code = name_to_code(&name);
        let description = faker.sentence();
        let zone = self.zone(faker)?;
        let channels = self
            .catalog
            .channels()
            .into_iter()
            .map(reference_value)
            .collect::<FactoryResult<Vec<_>>>()?;

        Ok(AttributeSet::new()
            .with(CODE, json!(code))
            .with(NAME, json!(name))
            .with(DESCRIPTION, json!(description))
            .with(ENABLED, json!(true))
            .with(ZONE, zone)
            .with(TAX_CATEGORY, Value::Null)
            .with(CATEGORY, Value::Null)
            .with(ARCHIVED_AT, Value::Null)
            .with(CHANNELS, Value::Array(channels))
            .with(CALCULATOR, json!(FLAT_RATE))
            .with(CONFIGURATION, Value::Object(Map::new())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Channel;

    fn catalog() -> ReferenceCatalog {
        ReferenceCatalog::new()
            .with_zone(Zone::new("EU", "European Union"))
            .with_zone(Zone::new("US", "United States"))
            .with_channel(Channel::new("WEB", "Web Store"))
            .with_channel(Channel::new("APP", "Mobile App"))
    }

    #[test]
    fn test_defaults_shape() {
        let defaults = ShippingMethodDefaults::new(Arc::new(catalog()));
        let attrs = defaults.defaults(&mut Faker::seeded(7)).unwrap();

        let name = attrs.string(NAME).unwrap();
        assert_eq!(name.split(' ').count(), 3);
        assert_eq!(attrs.string(CODE).unwrap(), name_to_code(&name));
        assert!(attrs.bool(ENABLED).unwrap());
        assert_eq!(attrs.get(ARCHIVED_AT), Some(&Value::Null));
        assert_eq!(attrs.get(TAX_CATEGORY), Some(&Value::Null));
        assert_eq!(attrs.get(CALCULATOR), Some(&json!("flat_rate")));
        assert_eq!(
            attrs.get(CHANNELS),
            Some(&json!([
                {"code": "APP", "name": "Mobile App"},
                {"code": "WEB", "name": "Web Store"},
            ]))
        );

        let zone_code = attrs.get(ZONE).and_then(|z| z.get("code")).and_then(Value::as_str);
        assert!(matches!(zone_code, Some("EU") | Some("US")));
    }

    #[test]
    fn test_defaults_deterministic_for_seed() {
        let defaults = ShippingMethodDefaults::new(Arc::new(catalog()));

        let first = defaults.defaults(&mut Faker::seeded(99)).unwrap();
        let second = defaults.defaults(&mut Faker::seeded(99)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_generated_zone_without_catalog() {
        let defaults = ShippingMethodDefaults::new(Arc::new(ReferenceCatalog::new()));
        let attrs = defaults.defaults(&mut Faker::seeded(1)).unwrap();

        let zone = attrs.get(ZONE).unwrap();
        assert!(zone["code"].as_str().unwrap().starts_with("zone_"));
        assert_eq!(attrs.get(CHANNELS), Some(&json!([])));
    }
}
