use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("user has no credentials on file")]
    #[diagnostic(code(calbot::not_logged_in))]
    NotLoggedIn,

    #[error("user is already logged in")]
    #[diagnostic(code(calbot::already_logged_in))]
    AlreadyLoggedIn,

    #[error("invalid command argument: {0}")]
    #[diagnostic(code(calbot::invalid_argument))]
    InvalidArgument(#[from] ArgumentError),

    #[error("authorization code was rejected")]
    #[diagnostic(code(calbot::invalid_auth_code))]
    InvalidAuthCode,

    #[error("Telegram API error: {0}")]
    #[diagnostic(code(calbot::telegram_api))]
    Telegram(#[from] teloxide::RequestError),

    #[error("HTTP error: {0}")]
    #[diagnostic(code(calbot::http))]
    Http(#[from] reqwest::Error),

    #[error("Google API error: {0}")]
    #[diagnostic(code(calbot::google_api))]
    GoogleApi(String),

    #[error(transparent)]
    #[diagnostic(code(calbot::io))]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    #[diagnostic(code(calbot::serialization))]
    Serialization(String),

    #[error("configuration error: {0}")]
    #[diagnostic(code(calbot::config))]
    Config(String),

    #[error("other error: {0}")]
    #[diagnostic(code(calbot::other))]
    Other(String),
}

/// Validation failures for the argument text of a command
#[derive(Debug, Error, Diagnostic, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("argument is not a number")]
    NotANumber,

    #[error("event count must be positive")]
    NonPositive,

    #[error("event count is above the maximum")]
    TooLarge,

    #[error("date is not in YYYY-MM-DD format")]
    BadDateFormat,

    #[error("end date precedes start date")]
    RangeInverted,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type BotResult<T> = Result<T, Error>;

/// Helper to create Google API errors
pub fn google_api_error(message: &str) -> Error {
    Error::GoogleApi(message.to_string())
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}
