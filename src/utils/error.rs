use crate::domain::model::EntityKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("{entity} must have a {field}")]
    RequiredField {
        entity: EntityKind,
        field: &'static str,
    },

    #[error("{}", dangling_message(.kind, .id))]
    DanglingReference { kind: EntityKind, id: Option<u64> },

    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: u64 },

    #[error("Store error: {message}")]
    Store { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

fn dangling_message(kind: &EntityKind, id: &Option<u64>) -> String {
    match id {
        Some(id) => format!(
            "{} id {} must reference an existing {}",
            kind,
            id,
            kind.singular()
        ),
        None => format!("Missions must have a {}", kind.singular()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Storage,
    Io,
}

impl RegistryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RegistryError::RequiredField { .. } | RegistryError::DanglingReference { .. } => {
                ErrorCategory::Validation
            }
            RegistryError::NotFound { .. } => ErrorCategory::NotFound,
            RegistryError::Store { .. } => ErrorCategory::Storage,
            RegistryError::ConfigError { .. }
            | RegistryError::InvalidConfigValueError { .. }
            | RegistryError::TomlError(_) => ErrorCategory::Configuration,
            RegistryError::IoError(_) | RegistryError::SerializationError(_) => ErrorCategory::Io,
        }
    }

    /// Rejected mutations are reported as-is; everything else gets a short prefix.
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound => self.to_string(),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Storage => format!("Storage failure: {}", self),
            ErrorCategory::Io => format!("I/O failure: {}", self),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Validation => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Storage | ErrorCategory::Io => 1,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
