use thiserror::Error;

/// Everything that can go wrong between reading a line and printing a reply.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Missing or unusable configuration, detected before any network use.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// DNS, connection, timeout or body read failure.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Success status, but the body was not the shape we expect.
    #[error("malformed response: {0}")]
    Parse(String),
}

impl ChatError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Per-turn failures are reported and the session carries on;
    /// configuration failures end the process.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Configuration(_))
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("request timed out: {}", err))
        } else {
            Self::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
