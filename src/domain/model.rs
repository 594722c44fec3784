use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Charge,
    Modifier,
    Tax,
    Fee,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub amount: f64,
    pub kind: LineKind,
}

/// 價格報價：每次輸入變更時重新計算，不做持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub base_rate: f64,
    pub duration: u32,
    pub price_modifier: f64,
    pub subtotal: f64,
    pub modifier_amount: f64,
    pub tax: f64,
    pub platform_fee: f64,
    pub total: f64,
    pub breakdown: Vec<LineItem>,
}

impl PriceQuote {
    pub fn has_modifier_line(&self) -> bool {
        self.breakdown
            .iter()
            .any(|item| item.kind == LineKind::Modifier)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    Available,
    Occupied,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSlot {
    pub id: String,
    pub number: String,
    pub row: char,
    pub status: SlotStatus,
    pub price_modifier: f64,
    pub is_premium: bool,
}

impl ParkingSlot {
    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }

    /// 列內序號 (A-04 -> 4)
    pub fn ordinal(&self) -> Option<u32> {
        self.number.split_once('-')?.1.parse().ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub venue_id: String,
    pub slot_number: String,
    pub start: NaiveDateTime,
    pub duration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub confirmation_code: String,
    pub venue_id: String,
    pub slot_id: String,
    pub slot_number: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub total: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotStats {
    pub total_slots: usize,
    pub occupied_slots: usize,
    pub free_slots: usize,
    pub occupancy_rate: f64,
    pub daily_revenue: u64,
}
