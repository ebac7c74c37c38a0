use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error("Symptom catalog unavailable: {message}")]
    CatalogUnavailable { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Upstream service returned status {status}")]
    UpstreamError { status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    HashError(#[from] bcrypt::BcryptError),

    #[error("Storage error: {message}")]
    StorageError { message: String },

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

    #[error("Missing required field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Client,
    Auth,
    Upstream,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HealthError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn catalog_unavailable(message: impl Into<String>) -> Self {
        Self::CatalogUnavailable {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            HealthError::InvalidInput { .. } | HealthError::Conflict { .. } => {
                ErrorCategory::Client
            }
            HealthError::InvalidCredentials
            | HealthError::Unauthorized { .. }
            | HealthError::TokenError(_)
            | HealthError::HashError(_) => ErrorCategory::Auth,
            HealthError::ApiError(_) | HealthError::UpstreamError { .. } => {
                ErrorCategory::Upstream
            }
            HealthError::CatalogUnavailable { .. }
            | HealthError::CsvError(_)
            | HealthError::IoError(_)
            | HealthError::SerializationError(_)
            | HealthError::StorageError { .. } => ErrorCategory::Storage,
            HealthError::ConfigError { .. }
            | HealthError::ConfigValidationError { .. }
            | HealthError::InvalidConfigValueError { .. }
            | HealthError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Client | ErrorCategory::Auth => ErrorSeverity::Low,
            ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 是否屬於呼叫端的錯誤 (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Client | ErrorCategory::Auth
        ) && !matches!(
            self,
            HealthError::Unauthorized { .. } | HealthError::TokenError(_) | HealthError::HashError(_)
        )
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            HealthError::InvalidInput { .. } => "Check the request body fields".to_string(),
            HealthError::CatalogUnavailable { .. } => {
                "Verify storage.catalog_file exists and is valid JSON/CSV/TSV".to_string()
            }
            HealthError::Conflict { .. } => "Use a different email address".to_string(),
            HealthError::InvalidCredentials => "Check the email and password".to_string(),
            HealthError::ApiError(_) | HealthError::UpstreamError { .. } => {
                "Check nutrition.endpoint, nutrition.api_key and network connectivity".to_string()
            }
            HealthError::TokenError(_) | HealthError::Unauthorized { .. } => {
                "Log in again to obtain a fresh token".to_string()
            }
            HealthError::HashError(_) => "Check auth.bcrypt_cost (4..=31)".to_string(),
            HealthError::CsvError(_) | HealthError::SerializationError(_) => {
                "Check the data file format".to_string()
            }
            HealthError::IoError(_) | HealthError::StorageError { .. } => {
                "Check storage.data_dir permissions and free disk space".to_string()
            }
            HealthError::ConfigError { .. }
            | HealthError::ConfigValidationError { .. }
            | HealthError::InvalidConfigValueError { .. } => {
                "Review the TOML configuration file".to_string()
            }
            HealthError::MissingConfigError { field } => {
                format!("Set '{}' in the configuration or environment", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Client | ErrorCategory::Auth => self.to_string(),
            ErrorCategory::Upstream => format!("Nutrition service failed: {}", self),
            ErrorCategory::Storage => format!("Storage failure: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, HealthError>;
