pub mod booking;
pub mod layout;
pub mod pricing;
pub mod stats;

pub use crate::domain::model::{LineItem, LineKind, ParkingSlot, PriceQuote, SlotStats, SlotStatus};
pub use crate::domain::ports::{BookingService, ConfigProvider};
pub use crate::utils::error::Result;
