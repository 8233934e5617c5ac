use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the dashboard
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(eventboard::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(eventboard::config))]
    Config(String),

    #[error("Feed error: {0}")]
    #[diagnostic(code(eventboard::feed))]
    Feed(String),

    #[error("{0}")]
    #[diagnostic(code(eventboard::routing))]
    Routing(String),

    #[error("Estimate store error: {0}")]
    #[diagnostic(code(eventboard::store))]
    Store(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(eventboard::component))]
    Component(String),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(eventboard::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(eventboard::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type BoardResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create feed errors
pub fn feed_error(message: &str) -> Error {
    Error::Feed(message.to_string())
}

/// Helper to create routing errors.
///
/// The message is shown verbatim in the ETA slot, so it carries no prefix.
pub fn routing_error(message: &str) -> Error {
    Error::Routing(message.to_string())
}

/// Helper to create estimate store errors
pub fn store_error(message: &str) -> Error {
    Error::Store(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}
