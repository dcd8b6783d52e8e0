use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Target document is not valid UTF-8: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("start marker `{marker}` not found in target document")]
    StartMarkerMissing { marker: String },

    #[error("end anchor `{anchor}` not found after the data block")]
    AnchorMissing { anchor: String },

    #[error("end anchor `{anchor}` found {count} times after the data block, expected exactly one")]
    AnchorAmbiguous { anchor: String, count: usize },

    #[error("no closing `}};` between start marker `{marker}` and the end anchor")]
    CloseMarkerMissing { marker: String },

    #[error("target document `{path}` is out of date")]
    CheckFailed { path: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} (`{value}`): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Config,
    Target,
    Serialization,
    Processing,
}

impl SpliceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SpliceError::IoError(_) => ErrorCategory::Io,
            SpliceError::Utf8Error(_) => ErrorCategory::Target,
            SpliceError::SerializationError(_) | SpliceError::TomlError(_) => {
                ErrorCategory::Serialization
            }
            SpliceError::StartMarkerMissing { .. }
            | SpliceError::AnchorMissing { .. }
            | SpliceError::AnchorAmbiguous { .. }
            | SpliceError::CloseMarkerMissing { .. }
            | SpliceError::CheckFailed { .. } => ErrorCategory::Target,
            SpliceError::ConfigError { .. }
            | SpliceError::MissingConfigError { .. }
            | SpliceError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            SpliceError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SpliceError::IoError(_) => ErrorSeverity::Critical,
            SpliceError::CheckFailed { .. } => ErrorSeverity::Medium,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SpliceError::IoError(_) => {
                "Check that the fragment and target paths exist and are writable".to_string()
            }
            SpliceError::Utf8Error(_) => {
                "The target document must be UTF-8 text; re-generate it before splicing".to_string()
            }
            SpliceError::SerializationError(_) => {
                "Report output could not be serialized; check the report path".to_string()
            }
            SpliceError::TomlError(_) => {
                "Fix the TOML syntax in the job configuration file".to_string()
            }
            SpliceError::StartMarkerMissing { marker } => format!(
                "Make sure the target page still contains the `{}` data block",
                marker
            ),
            SpliceError::AnchorMissing { anchor } => format!(
                "Add the `{}` anchor after the data block, or configure a different end anchor",
                anchor
            ),
            SpliceError::AnchorAmbiguous { anchor, .. } => format!(
                "Pick an end anchor that appears exactly once after the data block (`{}` is not unique)",
                anchor
            ),
            SpliceError::CloseMarkerMissing { .. } => {
                "The data block is missing its closing `};`; re-generate the target page".to_string()
            }
            SpliceError::CheckFailed { .. } => {
                "Re-run without --check to rewrite the target document".to_string()
            }
            SpliceError::ConfigError { .. }
            | SpliceError::MissingConfigError { .. }
            | SpliceError::InvalidConfigValueError { .. } => {
                "Review the command line flags or the TOML job file".to_string()
            }
            SpliceError::ProcessingError { .. } => {
                "Inspect the fragment files listed in the warnings above".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SpliceError::StartMarkerMissing { marker } => {
                format!("The target document has no `{}` block to replace", marker)
            }
            SpliceError::AnchorMissing { anchor } => {
                format!("The end anchor `{}` was not found after the data block", anchor)
            }
            SpliceError::AnchorAmbiguous { anchor, count } => format!(
                "The end anchor `{}` is ambiguous ({} occurrences after the data block)",
                anchor, count
            ),
            SpliceError::CheckFailed { path } => format!(
                "`{}` is out of date with the current fragments",
                path
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpliceError>;
