use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Tenant listing failed: {endpoint} returned HTTP {status}")]
    ListingFailed { endpoint: String, status: u16 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Storage,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DiscoverError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) | Self::ListingFailed { .. } => ErrorCategory::Network,
            Self::Io(_) => ErrorCategory::Storage,
            Self::Serialization(_) => ErrorCategory::Data,
            Self::UrlParse(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Http(e) if e.is_timeout() => {
                "The API did not answer in time; raise request_timeout_seconds or try again"
            }
            Self::Http(_) => "Check that the API is reachable at the configured api_url",
            Self::ListingFailed { status, .. } if *status >= 500 => {
                "The API is having trouble; try again in a moment"
            }
            Self::ListingFailed { .. } => "Check api_url and the pagination parameters",
            Self::Io(_) => "Check permissions on the session directory",
            Self::Serialization(_) => "The API returned an unexpected payload; check the API version",
            Self::UrlParse(_) => "Fix api_url so it is an absolute http(s) URL",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Review the configuration file and CLI flags",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Http(_) | Self::ListingFailed { .. } => {
                "Failed to load stores. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DiscoverError>;
