//! The entity test-data builder
//!
//! A [`Factory`] is an immutable configuration: collaborators, config and an
//! ordered list of states. Every modifier consumes the factory and returns a
//! new one; clone first to branch. Building runs a fixed pipeline:
//!
//! 1. defaults from the [`DefaultValues`] provider
//! 2. states applied in order on top of the defaults (last write wins)
//! 3. [`Transformer::transform`]
//! 4. [`EntityCreator::create_new`]
//! 5. [`EntityUpdater::update`]
//!
//! Collaborator errors are returned exactly as raised.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::attributes::AttributeSet;
use crate::config::FactoryConfig;
use crate::error::{FactoryError, FactoryResult};
use crate::fake_data::Faker;
use crate::states::{AttributeState, CustomState};
use crate::traits::{DefaultValues, EntityCreator, EntityUpdater, FactoryState, Transformer};

/// The four collaborators a factory delegates to
pub struct Collaborators<E> {
    pub defaults: Arc<dyn DefaultValues<E>>,
    pub transformer: Arc<dyn Transformer<E>>,
    pub creator: Arc<dyn EntityCreator<E>>,
    pub updater: Arc<dyn EntityUpdater<E>>,
}

impl<E> Collaborators<E> {
    pub fn new(
        defaults: impl DefaultValues<E> + 'static,
        transformer: impl Transformer<E> + 'static,
        creator: impl EntityCreator<E> + 'static,
        updater: impl EntityUpdater<E> + 'static,
    ) -> Self {
        Self {
            defaults: Arc::new(defaults),
            transformer: Arc::new(transformer),
            creator: Arc::new(creator),
            updater: Arc::new(updater),
        }
    }
}

impl<E> Clone for Collaborators<E> {
    fn clone(&self) -> Self {
        Self {
            defaults: Arc::clone(&self.defaults),
            transformer: Arc::clone(&self.transformer),
            creator: Arc::clone(&self.creator),
            updater: Arc::clone(&self.updater),
        }
    }
}

/// Builder for entities with defaults, states and injected collaborators
pub struct Factory<E> {
    collaborators: Collaborators<E>,
    config: FactoryConfig,
    states: Vec<Arc<dyn FactoryState>>,
    pending_error: Option<FactoryError>,
}

impl<E> Factory<E> {
    pub fn new(collaborators: Collaborators<E>) -> Self {
        Self {
            collaborators,
            config: FactoryConfig::default(),
            states: Vec::new(),
            pending_error: None,
        }
    }

    pub fn with_config(mut self, config: FactoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Make every build deterministic
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Replace the entity creator, e.g. to build a subtype-like variant
    pub fn with_creator(mut self, creator: impl EntityCreator<E> + 'static) -> Self {
        self.collaborators.creator = Arc::new(creator);
        self
    }

    /// Set an attribute value, overriding defaults and earlier overrides.
    ///
    /// An empty name does not panic here; the next `build` fails with
    /// [`FactoryError::InvalidAttributeName`]. Use
    /// [`Factory::try_with_attribute`] to fail at the call site instead.
    pub fn with_attribute(self, name: impl Into<String>, value: Value) -> Self {
        match AttributeState::new(name, value) {
            Ok(state) => self.state(state),
            Err(err) => self.defer(err),
        }
    }

    pub fn try_with_attribute(self, name: impl Into<String>, value: Value) -> FactoryResult<Self> {
        let state = AttributeState::new(name, value)?;
        Ok(self.state(state))
    }

    /// Set an attribute from any serializable value
    pub fn with<V: Serialize>(self, name: impl Into<String>, value: V) -> Self {
        let name = name.into();
        match serde_json::to_value(value) {
            Ok(value) => self.with_attribute(name, value),
            Err(err) => {
                let err = FactoryError::Serialization {
                    name,
                    message: err.to_string(),
                };
                self.defer(err)
            }
        }
    }

    /// Set multiple attributes
    pub fn with_attributes(self, attributes: AttributeSet) -> Self {
        self.state(CustomState::from_attributes("Attributes", attributes))
    }

    /// Apply a factory state
    pub fn state<S: FactoryState + 'static>(mut self, state: S) -> Self {
        self.states.push(Arc::new(state));
        self
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Names of the applied states, in order
    pub fn state_names(&self) -> Vec<&str> {
        self.states.iter().map(|s| s.state_name()).collect()
    }

    /// Pending overrides: every state applied to an empty set
    pub fn overrides(&self) -> FactoryResult<AttributeSet> {
        self.check_pending()?;
        let mut attributes = AttributeSet::new();
        self.apply_states(&mut attributes)?;
        Ok(attributes)
    }

    /// Defaults merged with overrides and transformed, without building
    pub fn resolve_attributes(&self) -> FactoryResult<AttributeSet> {
        let mut faker = self.config.faker();
        self.resolve_with(&mut faker)
    }

    /// Build a single entity
    pub fn build(&self) -> FactoryResult<E> {
        let mut faker = self.config.faker();
        self.build_with(&mut faker)
    }

    /// Build multiple entities sharing one randomness source.
    ///
    /// Seeded batches are reproducible while items still differ from each
    /// other. The batch fails as a whole on the first error.
    pub fn build_many(&self, count: usize) -> FactoryResult<Vec<E>> {
        let mut faker = self.config.faker();
        let mut results = Vec::with_capacity(count);
        for _ in 0..count {
            results.push(self.build_with(&mut faker)?);
        }
        debug!(entity = type_name::<E>(), count, "built entity batch");
        Ok(results)
    }

    fn build_with(&self, faker: &mut Faker) -> FactoryResult<E> {
        let attributes = self.resolve_with(faker)?;

        let mut entity = self.collaborators.creator.create_new()?;
        self.collaborators.updater.update(&mut entity, &attributes)?;

        debug!(
            entity = type_name::<E>(),
            attributes = attributes.len(),
            states = self.states.len(),
            "built entity"
        );
        Ok(entity)
    }

    fn resolve_with(&self, faker: &mut Faker) -> FactoryResult<AttributeSet> {
        self.check_pending()?;

        let mut attributes = self.collaborators.defaults.defaults(faker)?;
        trace!(entity = type_name::<E>(), defaults = attributes.len(), "computed defaults");

        self.apply_states(&mut attributes)?;
        self.collaborators.transformer.transform(attributes)
    }

    fn apply_states(&self, attributes: &mut AttributeSet) -> FactoryResult<()> {
        for state in &self.states {
            state.apply(attributes)?;
            trace!(state = state.state_name(), "applied state");
        }
        Ok(())
    }

    fn check_pending(&self) -> FactoryResult<()> {
        match &self.pending_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn defer(mut self, err: FactoryError) -> Self {
        debug!(error = %err, "deferring factory configuration error to build");
        self.pending_error.get_or_insert(err);
        self
    }
}

impl<E> Clone for Factory<E> {
    fn clone(&self) -> Self {
        Self {
            collaborators: self.collaborators.clone(),
            config: self.config.clone(),
            states: self.states.clone(),
            pending_error: self.pending_error.clone(),
        }
    }
}

impl<E> fmt::Debug for Factory<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("entity", &type_name::<E>())
            .field("config", &self.config)
            .field("states", &self.state_names())
            .field("pending_error", &self.pending_error)
            .finish()
    }
}
