use crate::domain::model::{Booking, BookingRequest, BookingStatus, PriceQuote};
use crate::domain::ports::BookingService;
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const CODE_LENGTH: usize = 6;

/// 本地記憶體版的預約服務，不模擬延遲或隨機失敗
#[derive(Debug, Default)]
pub struct InMemoryBookingService {
    bookings: RwLock<HashMap<String, Booking>>,
    sequence: AtomicU64,
}

impl InMemoryBookingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, booking_id: &str) -> Option<Booking> {
        self.bookings.read().await.get(booking_id).cloned()
    }

    /// 依建立順序列出所有預約
    pub async fn list(&self) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = self.bookings.read().await.values().cloned().collect();
        bookings.sort_by_key(|b| id_sequence(&b.id));
        bookings
    }
}

fn id_sequence(booking_id: &str) -> u64 {
    booking_id
        .strip_prefix("bk-")
        .and_then(|n| n.parse().ok())
        .unwrap_or(u64::MAX)
}

fn confirmation_code(sequence: u64, timestamp_millis: i64) -> String {
    let mut value = (timestamp_millis as u64)
        .wrapping_mul(31)
        .wrapping_add(sequence.wrapping_mul(7919));
    let base = CODE_ALPHABET.len() as u64;

    let mut code = Vec::with_capacity(CODE_LENGTH);
    for _ in 0..CODE_LENGTH {
        code.push(CODE_ALPHABET[(value % base) as usize]);
        value /= base;
    }
    code.reverse();

    format!("PK-{}", String::from_utf8_lossy(&code))
}

#[async_trait]
impl BookingService for InMemoryBookingService {
    async fn submit(
        &self,
        request: &BookingRequest,
        quote: &PriceQuote,
        slot_id: &str,
    ) -> Result<Booking> {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let created_at = Utc::now();

        let booking = Booking {
            id: format!("bk-{}", sequence),
            confirmation_code: confirmation_code(sequence, created_at.timestamp_millis()),
            venue_id: request.venue_id.clone(),
            slot_id: slot_id.to_string(),
            slot_number: request.slot_number.clone(),
            start: request.start,
            end: request.start + Duration::hours(i64::from(request.duration)),
            total: quote.total,
            status: BookingStatus::Confirmed,
            created_at,
        };

        tracing::debug!("Stored booking {} ({})", booking.id, booking.confirmation_code);
        self.bookings
            .write()
            .await
            .insert(booking.id.clone(), booking.clone());

        Ok(booking)
    }

    async fn cancel(&self, booking_id: &str) -> Result<Booking> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings
            .get_mut(booking_id)
            .ok_or_else(|| BookingError::BookingNotFound {
                booking_id: booking_id.to_string(),
            })?;

        if booking.status == BookingStatus::Cancelled {
            return Err(BookingError::AlreadyCancelled {
                booking_id: booking_id.to_string(),
            });
        }

        booking.status = BookingStatus::Cancelled;
        Ok(booking.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pricing::compute_quote;
    use chrono::NaiveDate;

    fn request() -> BookingRequest {
        BookingRequest {
            venue_id: "venue-7".to_string(),
            slot_number: "A-02".to_string(),
            start: NaiveDate::from_ymd_opt(2026, 10, 18)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
            duration: 3,
        }
    }

    #[tokio::test]
    async fn test_submit_assigns_id_code_and_end_time() {
        let service = InMemoryBookingService::new();
        let quote = compute_quote(50.0, 3, 1.0);

        let booking = service
            .submit(&request(), &quote, "slot-venue-7-A-02")
            .await
            .unwrap();

        assert_eq!(booking.id, "bk-1");
        assert!(booking.confirmation_code.starts_with("PK-"));
        assert_eq!(booking.confirmation_code.len(), 9);
        assert_eq!(booking.end.format("%H:%M").to_string(), "21:00");
        assert_eq!(booking.total, quote.total);
        assert_eq!(service.get("bk-1").await, Some(booking));
    }

    #[tokio::test]
    async fn test_cancel_twice() {
        let service = InMemoryBookingService::new();
        let quote = compute_quote(50.0, 3, 1.0);
        service.submit(&request(), &quote, "slot").await.unwrap();

        let cancelled = service.cancel("bk-1").await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        let err = service.cancel("bk-1").await.unwrap_err();
        assert!(matches!(err, BookingError::AlreadyCancelled { .. }));

        let err = service.cancel("bk-99").await.unwrap_err();
        assert!(matches!(err, BookingError::BookingNotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_keeps_creation_order() {
        let service = InMemoryBookingService::new();
        let quote = compute_quote(50.0, 3, 1.0);
        for _ in 0..11 {
            service.submit(&request(), &quote, "slot").await.unwrap();
        }

        let ids: Vec<String> = service.list().await.into_iter().map(|b| b.id).collect();
        assert_eq!(ids.first().map(String::as_str), Some("bk-1"));
        assert_eq!(ids.last().map(String::as_str), Some("bk-11"));
        assert_eq!(ids.len(), 11);
    }

    #[test]
    fn test_confirmation_code_shape() {
        let code = confirmation_code(1, 1_760_000_000_000);
        assert!(code.starts_with("PK-"));
        assert!(code[3..].bytes().all(|b| CODE_ALPHABET.contains(&b)));
    }
}
