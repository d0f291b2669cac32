//! Shipping method factory with domain-specific modifiers

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use seedling_factory::states::{ArchivedState, DisabledState, EnabledState};
use seedling_factory::{
    AttributeSet, Collaborators, DefaultCreator, EntityCreator, Factory, FactoryConfig,
    FactoryResult, FactoryState,
};

use crate::catalog::ReferenceCatalog;
use crate::defaults::ShippingMethodDefaults;
use crate::model::fields::{
    CALCULATOR, CATEGORY, CHANNELS, CODE, CONFIGURATION, DESCRIPTION, NAME, TAX_CATEGORY, ZONE,
};
use crate::model::{Channel, Ref, ShippingCategory, ShippingMethod, TaxCategory, Zone, FLAT_RATE};
use crate::transformer::ShippingMethodTransformer;
use crate::updater::ShippingMethodUpdater;

/// Builds [`ShippingMethod`]s.
///
/// Every modifier returns a new factory and leaves the receiver untouched:
///
/// ```rust
/// use seedling_shipping::{Channel, ReferenceCatalog, ShippingMethodFactory, Zone};
///
/// let catalog = ReferenceCatalog::new()
///     .with_zone(Zone::new("EU", "European Union"))
///     .with_channel(Channel::new("WEB", "Web Store"));
///
/// let base = ShippingMethodFactory::new(catalog).with_seed(42);
/// let dhl = base.clone().with_code("DHL").with_zone("EU").build().unwrap();
///
/// assert_eq!(dhl.code.as_deref(), Some("DHL"));
/// assert_eq!(dhl.zone.unwrap().name, "European Union");
/// assert_ne!(base.build().unwrap().code.as_deref(), Some("DHL"));
/// ```
#[derive(Debug, Clone)]
pub struct ShippingMethodFactory {
    inner: Factory<ShippingMethod>,
}

impl ShippingMethodFactory {
    /// Factory wired with the shipping collaborators over `catalog`
    pub fn new(catalog: ReferenceCatalog) -> Self {
        let catalog = Arc::new(catalog);
        Self::from_factory(Factory::new(Collaborators::new(
            ShippingMethodDefaults::new(Arc::clone(&catalog)),
            ShippingMethodTransformer::new(catalog),
            DefaultCreator,
            ShippingMethodUpdater,
        )))
    }

    /// Wrap a generic factory, e.g. one with custom collaborators
    pub fn from_factory(inner: Factory<ShippingMethod>) -> Self {
        Self { inner }
    }

    pub fn with_collaborators(collaborators: Collaborators<ShippingMethod>) -> Self {
        Self::from_factory(Factory::new(collaborators))
    }

    pub fn with_code(self, code: impl Into<String>) -> Self {
        self.map(|f| f.with_attribute(CODE, json!(code.into())))
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.map(|f| f.with_attribute(NAME, json!(name.into())))
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        self.map(|f| f.with_attribute(DESCRIPTION, json!(description.into())))
    }

    /// Zone by code (resolved through the catalog) or as an entity
    pub fn with_zone(self, zone: impl Into<Ref<Zone>>) -> Self {
        let zone: Ref<Zone> = zone.into();
        self.map(|f| f.with(ZONE, zone))
    }

    pub fn with_tax_category(self, tax_category: impl Into<Ref<TaxCategory>>) -> Self {
        let tax_category: Ref<TaxCategory> = tax_category.into();
        self.map(|f| f.with(TAX_CATEGORY, tax_category))
    }

    pub fn with_category(self, category: impl Into<Ref<ShippingCategory>>) -> Self {
        let category: Ref<ShippingCategory> = category.into();
        self.map(|f| f.with(CATEGORY, category))
    }

    /// Replace the channel list
    pub fn with_channels<I, C>(self, channels: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Ref<Channel>>,
    {
        let channels: Vec<Ref<Channel>> = channels.into_iter().map(Into::into).collect();
        self.map(|f| f.with(CHANNELS, channels))
    }

    /// Replace the channel list with a single channel
    pub fn with_channel(self, channel: impl Into<Ref<Channel>>) -> Self {
        let channel: Ref<Channel> = channel.into();
        self.with_channels([channel])
    }

    pub fn enabled(self) -> Self {
        self.state(EnabledState)
    }

    pub fn disabled(self) -> Self {
        self.state(DisabledState)
    }

    /// Archived as of exactly `archived_at`
    pub fn with_archive_date(self, archived_at: DateTime<Utc>) -> Self {
        self.state(ArchivedState::at(archived_at))
    }

    pub fn with_calculator(self, calculator: impl Into<String>, configuration: Value) -> Self {
        let calculator = calculator.into();
        self.map(|f| {
            f.with_attribute(CALCULATOR, json!(calculator))
                .with_attribute(CONFIGURATION, configuration)
        })
    }

    /// Flat rate calculator with an amount (in minor units) per channel code
    pub fn with_flat_rate<I, S>(self, amounts: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let configuration: Map<String, Value> = amounts
            .into_iter()
            .map(|(channel, amount)| (channel.into(), json!({ "amount": amount })))
            .collect();
        self.with_calculator(FLAT_RATE, Value::Object(configuration))
    }

    pub fn with_attribute(self, name: impl Into<String>, value: Value) -> Self {
        self.map(|f| f.with_attribute(name, value))
    }

    pub fn try_with_attribute(self, name: impl Into<String>, value: Value) -> FactoryResult<Self> {
        self.inner.try_with_attribute(name, value).map(Self::from_factory)
    }

    pub fn with_attributes(self, attributes: AttributeSet) -> Self {
        self.map(|f| f.with_attributes(attributes))
    }

    pub fn state<S: FactoryState + 'static>(self, state: S) -> Self {
        self.map(|f| f.state(state))
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.map(|f| f.with_seed(seed))
    }

    pub fn with_config(self, config: FactoryConfig) -> Self {
        self.map(|f| f.with_config(config))
    }

    pub fn with_creator(self, creator: impl EntityCreator<ShippingMethod> + 'static) -> Self {
        self.map(|f| f.with_creator(creator))
    }

    pub fn resolve_attributes(&self) -> FactoryResult<AttributeSet> {
        self.inner.resolve_attributes()
    }

    pub fn build(&self) -> FactoryResult<ShippingMethod> {
        self.inner.build()
    }

    pub fn build_many(&self, count: usize) -> FactoryResult<Vec<ShippingMethod>> {
        self.inner.build_many(count)
    }

    pub fn inner(&self) -> &Factory<ShippingMethod> {
        &self.inner
    }

    pub fn into_inner(self) -> Factory<ShippingMethod> {
        self.inner
    }

    fn map(self, f: impl FnOnce(Factory<ShippingMethod>) -> Factory<ShippingMethod>) -> Self {
        Self::from_factory(f(self.inner))
    }
}

impl From<Factory<ShippingMethod>> for ShippingMethodFactory {
    fn from(inner: Factory<ShippingMethod>) -> Self {
        Self::from_factory(inner)
    }
}
