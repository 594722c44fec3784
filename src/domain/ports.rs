use crate::domain::model::{Booking, BookingRequest, PriceQuote};
use crate::utils::error::Result;
use crate::utils::validation::MAX_DURATION_HOURS;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn venue_id(&self) -> &str;
    fn capacity(&self) -> i64;
    fn base_rate(&self) -> f64;
    fn retry_attempts(&self) -> u32;
    fn retry_delay_ms(&self) -> u64;

    fn max_duration_hours(&self) -> u32 {
        MAX_DURATION_HOURS
    }
}

/// 預約的遠端服務。失敗時可能回傳暫時性錯誤 (例如 gateway timeout)，由呼叫端決定是否重試。
#[async_trait]
pub trait BookingService: Send + Sync {
    async fn submit(&self, request: &BookingRequest, quote: &PriceQuote, slot_id: &str)
        -> Result<Booking>;
    async fn cancel(&self, booking_id: &str) -> Result<Booking>;
}
