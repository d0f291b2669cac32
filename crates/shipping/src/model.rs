//! Shipping method entity and the reference entities it points at

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute names understood by the shipping method collaborators
pub mod fields {
    pub use seedling_factory::states::{ARCHIVED_AT, ENABLED};

    pub const CODE: &str = "code";
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const ZONE: &str = "zone";
    pub const TAX_CATEGORY: &str = "tax_category";
    pub const CATEGORY: &str = "category";
    pub const CHANNELS: &str = "channels";
    pub const CALCULATOR: &str = "calculator";
    pub const CONFIGURATION: &str = "configuration";
}

/// Calculator assigned by default
pub const FLAT_RATE: &str = "flat_rate";

/// An entity a shipping method can reference by code
pub trait Reference: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Human-readable kind used in error messages
    const KIND: &'static str;

    fn code(&self) -> &str;
}

macro_rules! reference_entity {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            pub code: String,
            pub name: String,
        }

        impl $name {
            pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
                Self {
                    code: code.into(),
                    name: name.into(),
                }
            }
        }

        impl Reference for $name {
            const KIND: &'static str = $kind;

            fn code(&self) -> &str {
                &self.code
            }
        }

        impl From<$name> for Ref<$name> {
            fn from(entity: $name) -> Self {
                Ref::Entity(entity)
            }
        }

        impl From<&$name> for Ref<$name> {
            fn from(entity: &$name) -> Self {
                Ref::Entity(entity.clone())
            }
        }

        impl From<&str> for Ref<$name> {
            fn from(code: &str) -> Self {
                Ref::Code(code.to_string())
            }
        }

        impl From<String> for Ref<$name> {
            fn from(code: String) -> Self {
                Ref::Code(code)
            }
        }
    };
}

reference_entity!(
    /// Geographical zone a shipping method serves
    Zone,
    "zone"
);
reference_entity!(TaxCategory, "tax category");
reference_entity!(
    /// Shipping category (e.g. "oversized") restricting which products can use a method
    ShippingCategory,
    "shipping category"
);
reference_entity!(Channel, "channel");

/// A related entity given either by code (shorthand) or as a concrete value.
///
/// Serializes as a bare string for a code and as an object for an entity,
/// which is the shape the transformer expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Code(String),
    Entity(T),
}

impl<T: Reference> Ref<T> {
    pub fn code(&self) -> &str {
        match self {
            Ref::Code(code) => code,
            Ref::Entity(entity) => entity.code(),
        }
    }
}

/// A shipping method as assembled by the factory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub archived_at: Option<DateTime<Utc>>,
    pub enabled: bool,
    pub zone: Option<Zone>,
    pub tax_category: Option<TaxCategory>,
    pub category: Option<ShippingCategory>,
    pub channels: Vec<Channel>,
    pub calculator: Option<String>,
    pub configuration: Map<String, Value>,
}

impl ShippingMethod {
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    pub fn has_channel(&self, code: &str) -> bool {
        self.channels.iter().any(|c| c.code == code)
    }

    /// Attach a channel; a channel with the same code is only kept once
    pub fn add_channel(&mut self, channel: Channel) {
        if !self.has_channel(&channel.code) {
            self.channels.push(channel);
        }
    }

    pub fn remove_channel(&mut self, code: &str) {
        self.channels.retain(|c| c.code != code);
    }

    pub fn channel_codes(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.code.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ref_serializes_by_shape() {
        let by_code: Ref<Zone> = "EU".into();
        let by_entity: Ref<Zone> = Zone::new("US", "United States").into();

        assert_eq!(serde_json::to_value(&by_code).unwrap(), json!("EU"));
        assert_eq!(
            serde_json::to_value(&by_entity).unwrap(),
            json!({"code": "US", "name": "United States"})
        );
        assert_eq!(by_code.code(), "EU");
        assert_eq!(by_entity.code(), "US");
    }

    #[test]
    fn test_channels_are_deduplicated() {
        let mut method = ShippingMethod::default();
        method.add_channel(Channel::new("WEB", "Web Store"));
        method.add_channel(Channel::new("WEB", "Web Store again"));
        method.add_channel(Channel::new("POS", "Point of Sale"));

        assert_eq!(method.channel_codes(), vec!["WEB", "POS"]);
        assert_eq!(method.channels[0].name, "Web Store");

        method.remove_channel("WEB");
        assert!(!method.has_channel("WEB"));
    }

    #[test]
    fn test_zero_valued_method() {
        let method = ShippingMethod::default();

        assert!(method.code.is_none());
        assert!(!method.enabled);
        assert!(!method.is_archived());
        assert!(method.channels.is_empty());
        assert!(method.configuration.is_empty());
    }

    #[test]
    fn test_reference_kinds() {
        assert_eq!(Zone::KIND, "zone");
        assert_eq!(TaxCategory::KIND, "tax category");
        assert_eq!(ShippingCategory::KIND, "shipping category");
        assert_eq!(Channel::KIND, "channel");
    }
}
