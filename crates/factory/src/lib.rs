//! # seedling-factory: entity test-data factories
//!
//! Builds fully-populated domain entities for tests and seed data. A
//! [`Factory`] merges caller overrides over computed defaults, runs the
//! merged attributes through a transformer, creates an empty entity and
//! writes the attributes onto it. Each step is an injected collaborator:
//!
//! - [`DefaultValues`]: default attributes from a seeded [`Faker`]
//! - [`Transformer`]: expands shorthand values (e.g. a code for a related entity)
//! - [`EntityCreator`]: returns a fresh, empty entity
//! - [`EntityUpdater`]: populates the entity, validating each attribute
//!
//! ## Quick Start
//!
//! ```rust
//! use seedling_factory::prelude::*;
//! use serde_json::json;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Carrier {
//!     code: String,
//! }
//!
//! struct CarrierDefaults;
//!
//! impl DefaultValues<Carrier> for CarrierDefaults {
//!     fn defaults(&self, faker: &mut Faker) -> FactoryResult<AttributeSet> {
//!         Ok(AttributeSet::new().with("code", json!(faker.code("carrier"))))
//!     }
//! }
//!
//! struct CarrierUpdater;
//!
//! impl EntityUpdater<Carrier> for CarrierUpdater {
//!     fn update(&self, carrier: &mut Carrier, attributes: &AttributeSet) -> FactoryResult<()> {
//!         carrier.code = attributes.string("code")?;
//!         Ok(())
//!     }
//! }
//!
//! let factory = Factory::new(Collaborators::new(
//!     CarrierDefaults,
//!     IdentityTransformer,
//!     DefaultCreator,
//!     CarrierUpdater,
//! ));
//!
//! let carrier = factory.with_attribute("code", json!("DHL")).build().unwrap();
//! assert_eq!(carrier.code, "DHL");
//! ```

pub mod attributes;
pub mod config;
pub mod error;
pub mod factory;
pub mod fake_data;
pub mod seeder;
pub mod states;
pub mod traits;

// Re-export commonly used types
pub use attributes::{datetime_value, parse_datetime, AttributeSet};
pub use config::FactoryConfig;
pub use error::{FactoryError, FactoryResult};
pub use factory::{Collaborators, Factory};
pub use fake_data::Faker;
pub use seeder::{Environment, FactorySeeder, Seeder, SeederManager};
pub use traits::{
    DefaultCreator, DefaultValues, EntityCreator, EntityUpdater, FactoryState,
    IdentityTransformer, Transformer,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        attributes::AttributeSet,
        config::FactoryConfig,
        error::{FactoryError, FactoryResult},
        factory::{Collaborators, Factory},
        fake_data::Faker,
        states::{ArchivedState, AttributeState, CustomState, DisabledState, EnabledState},
        traits::{
            DefaultCreator, DefaultValues, EntityCreator, EntityUpdater, FactoryState,
            IdentityTransformer, Transformer,
        },
    };
}
