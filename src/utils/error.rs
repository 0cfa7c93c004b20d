use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Failed to read {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    InvalidJsonError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Input document is empty: {path}")]
    EmptyInputError { path: PathBuf },

    #[error("Invalid record '{ingredient}': {source}")]
    InvalidRecordError {
        ingredient: String,
        #[source]
        source: serde_json::Error,
    },

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
    Input,
    Output,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FilterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FilterError::FileReadError { .. }
            | FilterError::InvalidJsonError { .. }
            | FilterError::EmptyInputError { .. } => ErrorCategory::Input,
            FilterError::FileWriteError { .. } | FilterError::IoError(_) => ErrorCategory::Output,
            FilterError::SerializationError(_)
            | FilterError::CsvError(_)
            | FilterError::InvalidRecordError { .. } => ErrorCategory::Data,
            FilterError::ConfigError { .. }
            | FilterError::ConfigValidationError { .. }
            | FilterError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FilterError::FileReadError { .. } => {
                "Check that the input file exists and is readable, or pass --input"
            }
            FilterError::FileWriteError { .. } | FilterError::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
            FilterError::InvalidJsonError { .. }
            | FilterError::SerializationError(_)
            | FilterError::InvalidRecordError { .. } => {
                "Make sure the input is valid UTF-8 JSON in the canonical or progress format"
            }
            FilterError::CsvError(_) => "Check the disk space and the CSV output path",
            FilterError::EmptyInputError { .. } => {
                "The input must be a non-empty JSON object keyed by ingredient name"
            }
            FilterError::ConfigError { .. }
            | FilterError::ConfigValidationError { .. }
            | FilterError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Could not load the ingredient file: {}", self),
            ErrorCategory::Output => format!("Could not save the results: {}", self),
            ErrorCategory::Data => format!("The ingredient data could not be processed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
