//! Collaborator contracts for the build pipeline

use crate::attributes::AttributeSet;
use crate::error::FactoryResult;
use crate::fake_data::Faker;

/// Supplies the default attributes for an entity
pub trait DefaultValues<E>: Send + Sync {
    /// Must be deterministic for a deterministic faker
    fn defaults(&self, faker: &mut Faker) -> FactoryResult<AttributeSet>;
}

/// Normalizes merged attributes before the entity is populated
pub trait Transformer<E>: Send + Sync {
    /// Pure mapping; may expand shorthand references into richer values
    fn transform(&self, attributes: AttributeSet) -> FactoryResult<AttributeSet>;
}

/// Creates a new, unpopulated entity
pub trait EntityCreator<E>: Send + Sync {
    fn create_new(&self) -> FactoryResult<E>;
}

/// Writes attributes onto an entity
pub trait EntityUpdater<E>: Send + Sync {
    /// Assign every attribute, failing on values that do not fit their field
    fn update(&self, entity: &mut E, attributes: &AttributeSet) -> FactoryResult<()>;
}

/// Trait for factory states that modify pending attributes
pub trait FactoryState: Send + Sync {
    /// Apply state modifications to the attributes
    fn apply(&self, attributes: &mut AttributeSet) -> FactoryResult<()>;

    /// Get the name of this state for debugging
    fn state_name(&self) -> &str;
}

/// Passes attributes through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransformer;

impl<E> Transformer<E> for IdentityTransformer {
    fn transform(&self, attributes: AttributeSet) -> FactoryResult<AttributeSet> {
        Ok(attributes)
    }
}

/// Creates entities through their `Default` impl
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCreator;

impl<E: Default> EntityCreator<E> for DefaultCreator {
    fn create_new(&self) -> FactoryResult<E> {
        Ok(E::default())
    }
}

impl<E, F> EntityCreator<E> for F
where
    F: Fn() -> FactoryResult<E> + Send + Sync,
{
    fn create_new(&self) -> FactoryResult<E> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_transformer() {
        let attrs = AttributeSet::new().with("code", json!("DHL"));
        let out = Transformer::<()>::transform(&IdentityTransformer, attrs.clone()).unwrap();
        assert_eq!(out, attrs);
    }

    #[test]
    fn test_closure_creator() {
        let creator = || -> FactoryResult<Vec<u8>> { Ok(vec![1, 2, 3]) };
        assert_eq!(creator.create_new().unwrap(), vec![1, 2, 3]);

        let default = EntityCreator::<String>::create_new(&DefaultCreator).unwrap();
        assert!(default.is_empty());
    }
}
