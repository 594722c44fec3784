use crate::utils::error::{BookingError, Result};

pub const MIN_DURATION_HOURS: u32 = 1;
pub const MAX_DURATION_HOURS: u32 = 12;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number >= 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_log_level(field_name: &str, level: &str) -> Result<()> {
    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    if !LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: level.to_string(),
            reason: format!("Log level must be one of: {}", LEVELS.join(", ")),
        });
    }
    Ok(())
}

/// 預約時數必須在 1 到 max_hours 小時之間 (max_hours 不超過 12)
pub fn validate_duration(duration: u32, max_hours: u32) -> Result<()> {
    let max_hours = max_hours.min(MAX_DURATION_HOURS);
    if !(MIN_DURATION_HOURS..=max_hours).contains(&duration) {
        return Err(BookingError::ValidationError {
            field: "duration".to_string(),
            reason: format!(
                "duration must be between {} and {} hours, got {}",
                MIN_DURATION_HOURS, max_hours, duration
            ),
        });
    }
    Ok(())
}
