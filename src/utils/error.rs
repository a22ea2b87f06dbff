use serde::Serialize;
use thiserror::Error;

/// 單一遠端呼叫的失敗分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchErrorKind {
    Transport,
    Status,
    Decode,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Transport failure for {address}: {message}")]
    Transport { address: String, message: String },

    #[error("Unexpected HTTP status {code} from {address}")]
    Status { address: String, code: u16 },

    #[error("Failed to decode response from {address}: {message}")]
    Decode { address: String, message: String },
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport { .. } => FetchErrorKind::Transport,
            FetchError::Status { .. } => FetchErrorKind::Status,
            FetchError::Decode { .. } => FetchErrorKind::Decode,
        }
    }

    pub fn address(&self) -> &str {
        match self {
            FetchError::Transport { address, .. }
            | FetchError::Status { address, .. }
            | FetchError::Decode { address, .. } => address,
        }
    }

    /// 只有 status 失敗帶有 HTTP 狀態碼
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AggregateReason {
    #[serde(rename = "no-dependents")]
    NoDependents,
    #[serde(rename = "fetch-failed")]
    FetchFailed,
}

impl AggregateReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateReason::NoDependents => "no-dependents",
            AggregateReason::FetchFailed => "fetch-failed",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Person {id} references no films")]
    NoDependents { id: u64 },

    #[error("Failed to fetch person {id}: {source}")]
    RootFetch {
        id: u64,
        #[source]
        source: FetchError,
    },

    #[error("Failed to fetch film {address} for person {id}: {source}")]
    DependentFetch {
        id: u64,
        address: String,
        #[source]
        source: FetchError,
    },
}

impl AggregateError {
    pub fn reason(&self) -> AggregateReason {
        match self {
            AggregateError::NoDependents { .. } => AggregateReason::NoDependents,
            AggregateError::RootFetch { .. } | AggregateError::DependentFetch { .. } => {
                AggregateReason::FetchFailed
            }
        }
    }

    pub fn fetch_error(&self) -> Option<&FetchError> {
        match self {
            AggregateError::NoDependents { .. } => None,
            AggregateError::RootFetch { source, .. }
            | AggregateError::DependentFetch { source, .. } => Some(source),
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            AggregateError::NoDependents { id }
            | AggregateError::RootFetch { id, .. }
            | AggregateError::DependentFetch { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 輸入被拒絕，沒有任何網路活動
    Rejected,
    /// 設定或系統層級錯誤
    Critical,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Validation { .. } => ErrorSeverity::Rejected,
            _ => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::Validation { .. } => {
                "give valid input: unique integers greater than 0".to_string()
            }
            AppError::Config { message } => format!("Configuration problem: {}", message),
            AppError::InvalidConfigValue { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            AppError::Io(e) => format!("Could not read or write a file: {}", e),
            AppError::Serialization(e) => format!("Could not render the report: {}", e),
            AppError::HttpClient(e) => format!("Could not set up the HTTP client: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
