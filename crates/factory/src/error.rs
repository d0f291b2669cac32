//! Error types for the factory pipeline
//!
//! Configuration errors come from the caller composing a factory. Every
//! other variant is raised by a collaborator (defaults, transformer,
//! creator or updater) and travels through `build` untouched.

use thiserror::Error;

/// Factory result type alias
pub type FactoryResult<T> = Result<T, FactoryError>;

/// Errors raised while composing or building an entity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    /// Attribute names must be non-empty
    #[error("Invalid attribute name: '{name}'")]
    InvalidAttributeName { name: String },

    /// A typed value could not be turned into an attribute
    #[error("Serialization error for attribute '{name}': {message}")]
    Serialization { name: String, message: String },

    /// Invalid factory configuration
    #[error("Invalid value for {field}: '{value}', expected {expected}")]
    Configuration {
        field: String,
        value: String,
        expected: String,
    },

    /// A shorthand reference did not match any known entity
    #[error("Unresolved {kind} reference: '{code}'")]
    UnresolvedReference { kind: String, code: String },

    /// An attribute value has the wrong shape for its field
    #[error("Invalid value for attribute '{name}': expected {expected}")]
    InvalidAttribute { name: String, expected: String },

    /// The updater does not know this attribute
    #[error("Unknown attribute: '{name}'")]
    UnknownAttribute { name: String },

    /// Seeder ordering or environment failure
    #[error("Seeding error: {message}")]
    Seeding { message: String },

    /// Free-form failure raised by a user-supplied collaborator
    #[error("Collaborator error: {message}")]
    Collaborator { message: String },
}

impl FactoryError {
    pub fn invalid_attribute(name: impl Into<String>, expected: impl Into<String>) -> Self {
        FactoryError::InvalidAttribute {
            name: name.into(),
            expected: expected.into(),
        }
    }

    pub fn unresolved(kind: impl Into<String>, code: impl Into<String>) -> Self {
        FactoryError::UnresolvedReference {
            kind: kind.into(),
            code: code.into(),
        }
    }

    pub fn collaborator(message: impl Into<String>) -> Self {
        FactoryError::Collaborator {
            message: message.into(),
        }
    }

    /// True for errors introduced by the caller's configuration rather than a collaborator
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FactoryError::InvalidAttributeName { .. }
                | FactoryError::Serialization { .. }
                | FactoryError::Configuration { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FactoryError::unresolved("zone", "MARS");
        assert_eq!(err.to_string(), "Unresolved zone reference: 'MARS'");

        let err = FactoryError::invalid_attribute("enabled", "a boolean");
        assert_eq!(
            err.to_string(),
            "Invalid value for attribute 'enabled': expected a boolean"
        );
    }

    #[test]
    fn test_configuration_classification() {
        assert!(FactoryError::InvalidAttributeName {
            name: String::new()
        }
        .is_configuration());
        assert!(!FactoryError::UnknownAttribute {
            name: "foo".to_string()
        }
        .is_configuration());
        assert!(!FactoryError::collaborator("boom").is_configuration());
    }
}
