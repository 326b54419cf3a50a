#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SwipeError>;

#[derive(Debug, Error)]
pub enum SwipeError {
    #[error("invalid swipe config: {message}")]
    InvalidConfig { message: String },

    #[error("I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[cfg(feature = "config-file")]
    #[error("TOML parse error: {0}")]
    ConfigToml(#[source] toml::de::Error),

    #[cfg(feature = "config-file")]
    #[error("TOML serialize error: {0}")]
    ConfigTomlSer(#[source] toml::ser::Error),

    #[cfg(feature = "config-file")]
    #[error("JSON error: {0}")]
    ConfigJson(#[source] serde_json::Error),

    #[error("restoring a swipe cell from an archive is not supported")]
    ArchiveUnsupported,
}

impl SwipeError {
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SwipeError;

    #[test]
    fn invalid_constructor_preserves_message() {
        let error = SwipeError::invalid("boom");
        assert_eq!(error.to_string(), "invalid swipe config: boom");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: SwipeError = io.into();
        assert!(matches!(error, SwipeError::ConfigIo(_)));
    }

    #[test]
    fn archive_unsupported_message() {
        assert!(
            SwipeError::ArchiveUnsupported
                .to_string()
                .contains("not supported")
        );
    }
}
