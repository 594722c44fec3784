pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::InMemoryBookingService;
pub use core::booking::BookingWorkflow;
pub use core::layout::{generate_default_slots, generate_slots};
pub use core::pricing::compute_quote;
pub use utils::error::{BookingError, Result};
