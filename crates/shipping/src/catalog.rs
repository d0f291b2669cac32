//! In-memory registry of the reference entities shorthand codes resolve to

use std::collections::BTreeMap;

use serde_json::Value;
use seedling_factory::{FactoryError, FactoryResult};

use crate::model::{Channel, Reference, ShippingCategory, TaxCategory, Zone};

/// Known zones, tax categories, shipping categories and channels, keyed by code.
///
/// Maps are ordered so that picking a "random" entry with a seeded faker is
/// reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceCatalog {
    zones: BTreeMap<String, Zone>,
    tax_categories: BTreeMap<String, TaxCategory>,
    categories: BTreeMap<String, ShippingCategory>,
    channels: BTreeMap<String, Channel>,
}

impl ReferenceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zones.insert(zone.code.clone(), zone);
        self
    }

    pub fn with_tax_category(mut self, tax_category: TaxCategory) -> Self {
        self.tax_categories.insert(tax_category.code.clone(), tax_category);
        self
    }

    pub fn with_category(mut self, category: ShippingCategory) -> Self {
        self.categories.insert(category.code.clone(), category);
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channels.insert(channel.code.clone(), channel);
        self
    }

    pub fn zone(&self, code: &str) -> Option<&Zone> {
        self.zones.get(code)
    }

    pub fn tax_category(&self, code: &str) -> Option<&TaxCategory> {
        self.tax_categories.get(code)
    }

    pub fn category(&self, code: &str) -> Option<&ShippingCategory> {
        self.categories.get(code)
    }

    pub fn channel(&self, code: &str) -> Option<&Channel> {
        self.channels.get(code)
    }

    /// Zones ordered by code
    pub fn zones(&self) -> Vec<&Zone> {
        self.zones.values().collect()
    }

    /// Channels ordered by code
    pub fn channels(&self) -> Vec<&Channel> {
        self.channels.values().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
            && self.tax_categories.is_empty()
            && self.categories.is_empty()
            && self.channels.is_empty()
    }
}

/// Serialize a reference entity into its attribute form
pub(crate) fn reference_value<T: Reference>(entity: &T) -> FactoryResult<Value> {
    serde_json::to_value(entity).map_err(|err| FactoryError::Serialization {
        name: T::KIND.to_string(),
        message: err.to_string(),
    })
}
