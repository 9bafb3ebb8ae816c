use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid CSS selector '{selector}': {message}")]
    SelectorError { selector: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Parsing,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code used by the CLI.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ScrapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrapeError::HttpError(_) => ErrorCategory::Network,
            ScrapeError::UrlError(_)
            | ScrapeError::TomlError(_)
            | ScrapeError::ConfigError { .. }
            | ScrapeError::InvalidConfigValueError { .. }
            | ScrapeError::MissingConfigError { .. }
            | ScrapeError::SelectorError { .. } => ErrorCategory::Configuration,
            ScrapeError::ProcessingError { .. } => ErrorCategory::Parsing,
            ScrapeError::CsvError(_)
            | ScrapeError::IoError(_)
            | ScrapeError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Parsing => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ScrapeError::HttpError(e) if e.is_timeout() => {
                "The retailer did not answer in time; raise --timeout-secs or try again later".to_string()
            }
            ScrapeError::HttpError(e) if e.is_status() => format!(
                "The retailer answered with status {}; check --listing-url",
                e.status().map(|s| s.to_string()).unwrap_or_default()
            ),
            ScrapeError::HttpError(_) => "Check your network connection and try again".to_string(),
            ScrapeError::UrlError(_) => "Use an absolute http(s) URL".to_string(),
            ScrapeError::TomlError(_) | ScrapeError::ConfigError { .. } => {
                "Check the configuration file path and syntax".to_string()
            }
            ScrapeError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration or on the command line", field)
            }
            ScrapeError::MissingConfigError { field } => format!("Provide a value for '{}'", field),
            ScrapeError::SelectorError { .. } => {
                "The page layout may have changed; update the [selectors] section".to_string()
            }
            ScrapeError::ProcessingError { .. } => "Run again with --verbose for details".to_string(),
            ScrapeError::CsvError(_) | ScrapeError::IoError(_) | ScrapeError::SerializationError(_) => {
                "Check that the output directory is writable and has free space".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the retailer: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Parsing => format!("Could not process scraped data: {}", self),
            ErrorCategory::Output => format!("Could not write results: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
