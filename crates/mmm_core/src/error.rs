use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    InvalidParameter(String),
    NotFound(String),
    SerializationError(String),
    DeserializationError(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CoreError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            CoreError::NotFound(msg) => write!(f, "Not found: {}", msg),
            CoreError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            CoreError::DeserializationError(msg) => write!(f, "Deserialization error: {}", msg),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            CoreError::DeserializationError(err.to_string())
        } else {
            CoreError::SerializationError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Failures while loading or validating a [`crate::config::MatchConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unsupported config format: {path}")]
    UnsupportedFormat { path: String },
}

impl ConfigError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            ConfigError::Io(_) => true,
            ConfigError::UnsupportedFormat { .. } => true,
            ConfigError::Json(_) | ConfigError::Yaml(_) => false,
            ConfigError::Validation(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_display() {
        let err = CoreError::NotFound("player p9".to_string());
        assert_eq!(err.to_string(), "Not found: player p9");
    }

    #[test]
    fn test_bad_json_maps_to_deserialization_error() {
        let err: CoreError = serde_json::from_str::<u32>("{oops").unwrap_err().into();
        assert!(matches!(err, CoreError::DeserializationError(_)));
    }

    #[test]
    fn test_unsupported_format_is_recoverable() {
        let err = ConfigError::UnsupportedFormat { path: "match.toml".to_string() };
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "Unsupported config format: match.toml");
    }
}
