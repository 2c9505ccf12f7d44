//! Error types for Glade

use thiserror::Error;

/// The main error type for Glade operations
#[derive(Debug, Error)]
pub enum GladeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Malformed level: {0}")]
    MalformedLevel(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Result type alias for Glade operations
pub type Result<T> = std::result::Result<T, GladeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_and_json_errors_convert() {
        let io: GladeError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(matches!(io, GladeError::IoError(_)));

        let json: GladeError = serde_json::from_str::<u32>("x").unwrap_err().into();
        assert!(matches!(json, GladeError::JsonError(_)));
    }

    #[test]
    fn messages_name_the_kind() {
        let err = GladeError::MalformedLevel("road 0: odd spine".into());
        assert_eq!(err.to_string(), "Malformed level: road 0: odd spine");
    }
}
