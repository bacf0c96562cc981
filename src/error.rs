use thiserror::Error;

pub type Result<T> = std::result::Result<T, HoaxError>;

#[derive(Error, Debug)]
pub enum HoaxError {
    /// The URL could not be parsed or has no usable host.
    #[error("invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

impl HoaxError {
    pub(crate) fn invalid_url(input: &str, reason: impl Into<String>) -> Self {
        HoaxError::InvalidUrl {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failure of an optional external signal. Always absorbed by the composer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollaboratorError {
    #[error("collaborator did not answer in time")]
    Timeout,

    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}
