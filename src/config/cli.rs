use crate::core::layout::{DEFAULT_CAPACITY, MAX_SLOTS};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::output::OutputFormat;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "park-reserve")]
#[command(about = "Browse a venue's parking grid, price a slot and book it")]
pub struct CliConfig {
    #[arg(long, default_value = "venue-1")]
    pub venue: String,

    #[arg(long, default_value_t = DEFAULT_CAPACITY, allow_negative_numbers = true)]
    pub capacity: i64,

    #[arg(long, default_value_t = 50.0)]
    pub base_rate: f64,

    #[arg(long, default_value_t = 2, help = "Booking length in hours (1-12)")]
    pub duration: u32,

    #[arg(long, help = "Start time, e.g. 2026-10-18T18:30")]
    pub start: Option<String>,

    #[arg(long, help = "Slot number to price or book, e.g. A-04")]
    pub slot: Option<String>,

    #[arg(long, help = "Confirm the booking for the selected slot")]
    pub book: bool,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[arg(long, default_value_t = 3)]
    pub retry_attempts: u32,

    #[arg(long, default_value_t = 200)]
    pub retry_delay_ms: u64,

    #[arg(short, long, help = "Load venue and retry settings from a TOML file")]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn venue_id(&self) -> &str {
        &self.venue
    }

    fn capacity(&self) -> i64 {
        self.capacity
    }

    fn base_rate(&self) -> f64 {
        self.base_rate
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn retry_delay_ms(&self) -> u64 {
        self.retry_delay_ms
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("venue", &self.venue)?;
        validation::validate_non_negative("base_rate", self.base_rate)?;
        validation::validate_range("capacity", self.capacity, 0, MAX_SLOTS as i64)?;
        validation::validate_range("retry_attempts", self.retry_attempts, 1, 10)?;
        if self.book && self.slot.is_none() {
            return Err(crate::utils::error::BookingError::ValidationError {
                field: "slot".to_string(),
                reason: "--book requires --slot".to_string(),
            });
        }
        Ok(())
    }
}
