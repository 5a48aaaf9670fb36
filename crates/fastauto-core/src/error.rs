use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FastautoError {
    #[error("Directory for {kind} does not exist: {path}")]
    DirectoryNotFound { kind: &'static str, path: PathBuf },

    #[error("Invalid route: '{route}' - must be a file path with optional :param or {{{{param}}}} segments and a .ts/.js extension")]
    InvalidRoute { route: String },

    #[error("Invalid security name: '{name}' - must be a name with extension .ts or .js (example: bearerToken.ts)")]
    InvalidSecurityName { name: String },

    #[error("Unknown security type: '{value}' (expected bearer or basic)")]
    InvalidSecurityType { value: String },

    #[error("Unsupported file extension: {path} (expected .ts or .js)")]
    UnsupportedExtension { path: PathBuf },

    #[error("Invalid HTTP method: '{method}'")]
    InvalidMethod { method: String },

    #[error("File already exists: {path}")]
    AlreadyExists { path: PathBuf },

    #[error("Config file already exists: {path}")]
    ConfigAlreadyExists { path: PathBuf },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidConfigValue { key: String, value: String },

    #[error("Formatter failed: {message}")]
    FormatterFailed { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, FastautoError>;

impl FastautoError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DirectoryNotFound { .. } => 3,
            Self::InvalidRoute { .. }
            | Self::InvalidSecurityName { .. }
            | Self::InvalidSecurityType { .. }
            | Self::UnsupportedExtension { .. }
            | Self::InvalidMethod { .. } => 5,
            Self::AlreadyExists { .. } | Self::ConfigAlreadyExists { .. } => 6,
            _ => 1,
        }
    }
}
