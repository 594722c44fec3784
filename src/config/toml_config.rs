use crate::core::layout::MAX_SLOTS;
use crate::core::ConfigProvider;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_DELAY_MS: u64 = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub venue: VenueConfig,
    pub booking: Option<BookingConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    pub id: String,
    pub name: Option<String>,
    pub capacity: Option<i64>,
    pub base_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    pub retry_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub max_duration_hours: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
    pub level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${BASE_RATE})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookingError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn venue_name(&self) -> &str {
        self.venue.name.as_deref().unwrap_or(&self.venue.id)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn venue_id(&self) -> &str {
        &self.venue.id
    }

    fn capacity(&self) -> i64 {
        self.venue.capacity.unwrap_or(MAX_SLOTS as i64)
    }

    fn base_rate(&self) -> f64 {
        self.venue.base_rate
    }

    fn retry_attempts(&self) -> u32 {
        self.booking
            .as_ref()
            .and_then(|b| b.retry_attempts)
            .unwrap_or(DEFAULT_RETRY_ATTEMPTS)
    }

    fn retry_delay_ms(&self) -> u64 {
        self.booking
            .as_ref()
            .and_then(|b| b.retry_delay_ms)
            .unwrap_or(DEFAULT_RETRY_DELAY_MS)
    }

    fn max_duration_hours(&self) -> u32 {
        self.booking
            .as_ref()
            .and_then(|b| b.max_duration_hours)
            .unwrap_or(validation::MAX_DURATION_HOURS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("venue.id", &self.venue.id)?;
        validation::validate_non_negative("venue.base_rate", self.venue.base_rate)?;
        validation::validate_range("venue.capacity", self.capacity(), 0, MAX_SLOTS as i64)?;
        validation::validate_range("booking.retry_attempts", self.retry_attempts(), 1, 10)?;
        validation::validate_range(
            "booking.max_duration_hours",
            self.max_duration_hours(),
            validation::MIN_DURATION_HOURS,
            validation::MAX_DURATION_HOURS,
        )?;
        if let Some(level) = self.log_level() {
            validation::validate_log_level("logging.level", level)?;
        }
        Ok(())
    }
}
