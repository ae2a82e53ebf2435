use thiserror::Error;

#[derive(Error, Debug)]
pub enum BootcampError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// 遠端回傳非預期的狀態碼，payload 保留原始回應內容
    #[error("{operation} failed with status {status}. Response: {payload}")]
    RemoteError {
        operation: String,
        status: u16,
        payload: String,
    },

    #[error("{operation} returned GraphQL errors: {errors}")]
    GraphQlError { operation: String, errors: String },

    #[error("User {handle} does not exist")]
    UnknownHandle { handle: String },

    #[error("Ticket field missing or empty: {field}")]
    MissingFieldError { field: String },

    #[error("Environment variable {name} is not set")]
    MissingCredentialError { name: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Remote,
    Ticket,
    Configuration,
}

impl BootcampError {
    pub fn remote(operation: impl Into<String>, status: u16, payload: impl Into<String>) -> Self {
        Self::RemoteError {
            operation: operation.into(),
            status,
            payload: payload.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Transport
            }
            Self::RemoteError { .. } | Self::GraphQlError { .. } | Self::UnknownHandle { .. } => {
                ErrorCategory::Remote
            }
            Self::MissingFieldError { .. } => ErrorCategory::Ticket,
            Self::MissingCredentialError { .. }
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::UnknownHandle { .. } => "Check the attendee and facilitator handles in the ticket",
            Self::MissingFieldError { .. } => {
                "Make sure the ticket was opened from the bootcamp template and every section is filled in"
            }
            Self::MissingCredentialError { .. } => "Export GITHUB_TOKEN and ADMIN_TOKEN before running",
            Self::GraphQlError { .. } => "Verify the enterprise slug and that ADMIN_TOKEN is an enterprise owner",
            Self::RemoteError { .. } => "See the response payload above and the token's scopes",
            Self::HttpError(_) => "Check network connectivity and the configured api-url",
            Self::IoError(_) | Self::SerializationError(_) => "Re-run with --verbose for details",
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "Fix the configuration file and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, BootcampError>;
