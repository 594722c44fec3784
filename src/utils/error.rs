use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("TOML parsing error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error on '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Slot {number} not found at venue {venue_id}")]
    SlotNotFound { venue_id: String, number: String },

    #[error("Slot {number} is already occupied")]
    SlotUnavailable { number: String },

    #[error("Booking {booking_id} not found")]
    BookingNotFound { booking_id: String },

    #[error("Booking {booking_id} is already cancelled")]
    AlreadyCancelled { booking_id: String },

    #[error("Booking service unavailable: {message}")]
    TransientError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    System,
    Configuration,
    Validation,
    Booking,
    Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::SerializationError(_) | Self::CsvError(_) => {
                ErrorCategory::System
            }
            Self::ConfigError { .. }
            | Self::ConfigParseError(_)
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::SlotNotFound { .. }
            | Self::SlotUnavailable { .. }
            | Self::BookingNotFound { .. }
            | Self::AlreadyCancelled { .. } => ErrorCategory::Booking,
            Self::TransientError { .. } => ErrorCategory::Network,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyCancelled { .. } => ErrorSeverity::Low,
            Self::TransientError { .. } => ErrorSeverity::Medium,
            Self::IoError(_) | Self::SerializationError(_) | Self::CsvError(_) => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::High,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientError { .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check file permissions and available disk space",
            Self::SerializationError(_) | Self::CsvError(_) => {
                "Retry with --format text or report the output problem"
            }
            Self::ConfigError { .. } | Self::ConfigParseError(_) => {
                "Check the configuration file syntax and required sections"
            }
            Self::InvalidConfigValueError { .. } => "Correct the value and run again",
            Self::ValidationError { .. } => "Adjust the booking details and try again",
            Self::SlotNotFound { .. } => "Pick a slot number shown in the venue grid",
            Self::SlotUnavailable { .. } => "Choose a slot marked as available",
            Self::BookingNotFound { .. } => "Check the booking id",
            Self::AlreadyCancelled { .. } => "No action needed",
            Self::TransientError { .. } => "Wait a moment and retry the booking",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::TransientError { .. } => {
                "The booking service is temporarily unavailable. Please try again.".to_string()
            }
            Self::SlotUnavailable { number } => {
                format!("Slot {} was just taken. Please choose another slot.", number)
            }
            Self::ValidationError { reason, .. } => format!("Invalid booking: {}", reason),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
