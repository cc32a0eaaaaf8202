use thiserror::Error;

use crate::graph::EntityId;

/// Main error type for Kinship
#[derive(Error, Debug)]
pub enum KinshipError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse errors (config and population files)
    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Entity not present in the registry
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient Result type using KinshipError
pub type Result<T> = std::result::Result<T, KinshipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KinshipError::Config("Test error".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_error_entity_not_found() {
        let err = KinshipError::EntityNotFound(42);
        assert_eq!(err.to_string(), "Entity not found: 42");
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Table>("not = [valid").unwrap_err();
        let err: KinshipError = toml_err.into();
        assert!(matches!(err, KinshipError::Toml(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: KinshipError = io_err.into();
        assert!(matches!(err, KinshipError::Io(_)));
    }
}
