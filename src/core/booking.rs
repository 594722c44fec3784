use crate::core::layout::{find_slot, generate_slots};
use crate::core::pricing::compute_quote;
use crate::core::{BookingService, ConfigProvider};
use crate::domain::model::{
    Booking, BookingRequest, ParkingSlot, PriceQuote, SlotStats, SlotStatus,
};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::validate_duration;
use std::future::Future;
use std::time::Duration;

/// 預約流程：選場地 -> 產生車位 -> 選車位報價 -> 確認送出
pub struct BookingWorkflow<S: BookingService, C: ConfigProvider> {
    service: S,
    config: C,
    venue_id: String,
    slots: Vec<ParkingSlot>,
}

impl<S: BookingService, C: ConfigProvider> BookingWorkflow<S, C> {
    pub fn new(service: S, config: C) -> Self {
        let venue_id = config.venue_id().to_string();
        let slots = generate_slots(&venue_id, config.capacity());
        Self {
            service,
            config,
            venue_id,
            slots,
        }
    }

    pub fn select_venue(&mut self, venue_id: &str) -> &[ParkingSlot] {
        self.venue_id = venue_id.to_string();
        self.slots = generate_slots(venue_id, self.config.capacity());
        tracing::debug!(
            "Generated {} slots for venue {}",
            self.slots.len(),
            self.venue_id
        );
        &self.slots
    }

    pub fn venue_id(&self) -> &str {
        &self.venue_id
    }

    pub fn slots(&self) -> &[ParkingSlot] {
        &self.slots
    }

    pub fn stats(&self) -> SlotStats {
        SlotStats::from_layout(&self.slots)
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn slot(&self, number: &str) -> Result<&ParkingSlot> {
        find_slot(&self.slots, number).ok_or_else(|| BookingError::SlotNotFound {
            venue_id: self.venue_id.clone(),
            number: number.to_string(),
        })
    }

    pub fn quote_for(&self, slot_number: &str, duration: u32) -> Result<PriceQuote> {
        validate_duration(duration, self.config.max_duration_hours())?;
        let slot = self.slot(slot_number)?;
        Ok(compute_quote(
            self.config.base_rate(),
            duration,
            slot.price_modifier,
        ))
    }

    /// 送出預約，成功後把持有的車位標記為已占用，避免同一流程重複預約
    pub async fn confirm(&mut self, request: &BookingRequest) -> Result<Booking> {
        if request.venue_id != self.venue_id {
            return Err(BookingError::ValidationError {
                field: "venue_id".to_string(),
                reason: format!(
                    "request is for venue {} but {} is selected",
                    request.venue_id, self.venue_id
                ),
            });
        }

        let slot = self.slot(&request.slot_number)?.clone();
        if !slot.is_available() {
            return Err(BookingError::SlotUnavailable {
                number: slot.number.clone(),
            });
        }
        let quote = self.quote_for(&slot.number, request.duration)?;

        tracing::info!(
            "Submitting booking for slot {} ({}h, total {:.2})",
            slot.number,
            request.duration,
            quote.total
        );

        let booking = self
            .with_retry("submit", || self.service.submit(request, &quote, &slot.id))
            .await?;
        self.set_slot_status(&booking.slot_id, SlotStatus::Occupied);
        tracing::info!(
            "✅ Booking {} confirmed ({})",
            booking.id,
            booking.confirmation_code
        );
        Ok(booking)
    }

    pub async fn cancel(&mut self, booking_id: &str) -> Result<Booking> {
        let booking = self
            .with_retry("cancel", || self.service.cancel(booking_id))
            .await?;
        self.set_slot_status(&booking.slot_id, SlotStatus::Available);
        tracing::info!("Booking {} cancelled", booking.id);
        Ok(booking)
    }

    fn set_slot_status(&mut self, slot_id: &str, status: SlotStatus) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.id == slot_id) {
            slot.status = status;
        }
    }

    async fn with_retry<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.config.retry_attempts().max(1);
        let mut attempt = 1;

        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < attempts => {
                    let delay = self.config.retry_delay_ms() * u64::from(attempt);
                    tracing::warn!(
                        "⚠️ {} attempt {}/{} failed: {}, retrying in {}ms",
                        operation,
                        attempt,
                        attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!("❌ {} failed after {} attempt(s): {}", operation, attempt, e);
                    return Err(e);
                }
            }
        }
    }
}
