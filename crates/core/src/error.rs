use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

/// User-facing message shown for every report fetch failure.
pub const REPORT_UNAVAILABLE: &str = "Weekly report could not be loaded";

/// Default message when the login exchange fails without a usable reason.
pub const LOGIN_FAILED: &str = "Google login failed. Please try again.";

/// Failure to retrieve the weekly report. The variants only exist for
/// diagnostics; callers surface [`FetchError::user_message`] for all of them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("report request failed: {0}")]
    Transport(String),

    #[error("report endpoint returned HTTP {0}")]
    Status(u16),

    #[error("malformed report body: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        REPORT_UNAVAILABLE
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization code is required")]
    MissingCode,

    /// The backend refused the exchange; carries the message it gave.
    #[error("{0}")]
    Rejected(String),

    #[error("login request failed: {0}")]
    Transport(String),

    #[error("malformed login response: {0}")]
    Decode(String),
}

impl AuthError {
    pub fn user_message(&self) -> &str {
        match self {
            AuthError::MissingCode => "Authorization code is required",
            AuthError::Rejected(message) => message,
            AuthError::Transport(_) | AuthError::Decode(_) => LOGIN_FAILED,
        }
    }
}

#[derive(Error, Debug)]
pub enum TokenStoreError {
    #[error("token file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("token file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for DashboardError {
    fn from(err: config::ConfigError) -> Self {
        DashboardError::Config(err.to_string())
    }
}
