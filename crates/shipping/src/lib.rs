//! # seedling-shipping
//!
//! Fixture factory for shipping methods, built on [`seedling_factory`].
//!
//! [`ShippingMethodFactory`] produces enabled flat-rate methods with fake
//! names by default. Related entities (zone, tax category, shipping
//! category, channels) can be given as a code, which is resolved against a
//! [`ReferenceCatalog`], or as a concrete entity.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use seedling_shipping::prelude::*;
//!
//! let catalog = ReferenceCatalog::new()
//!     .with_zone(Zone::new("US", "United States"))
//!     .with_channel(Channel::new("WEB", "Web Store"));
//!
//! let archived_at = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
//! let method = ShippingMethodFactory::new(catalog)
//!     .with_code("UPS_GROUND")
//!     .with_name("UPS Ground")
//!     .disabled()
//!     .with_archive_date(archived_at)
//!     .build()
//!     .unwrap();
//!
//! assert!(!method.enabled);
//! assert_eq!(method.archived_at, Some(archived_at));
//! assert_eq!(method.channel_codes(), vec!["WEB"]);
//! ```

pub mod catalog;
pub mod defaults;
pub mod factory;
pub mod model;
pub mod transformer;
pub mod updater;

pub use catalog::ReferenceCatalog;
pub use defaults::ShippingMethodDefaults;
pub use factory::ShippingMethodFactory;
pub use model::{
    fields, Channel, Ref, Reference, ShippingCategory, ShippingMethod, TaxCategory, Zone, FLAT_RATE,
};
pub use transformer::{name_to_code, ShippingMethodTransformer};
pub use updater::ShippingMethodUpdater;

pub mod prelude {
    pub use crate::{
        catalog::ReferenceCatalog,
        factory::ShippingMethodFactory,
        model::{Channel, Ref, ShippingCategory, ShippingMethod, TaxCategory, Zone},
    };
    pub use seedling_factory::prelude::*;
}
