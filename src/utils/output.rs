use crate::core::pricing::CURRENCY_SYMBOL;
use crate::domain::model::{Booking, ParkingSlot, PriceQuote, SlotStats, SlotStatus};
use crate::utils::error::{BookingError, Result};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport<'a> {
    pub venue: &'a str,
    pub slots: &'a [ParkingSlot],
    pub stats: SlotStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<&'a PriceQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<&'a Booking>,
}

pub fn render(report: &SessionReport<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => render_csv(report.slots),
    }
}

pub fn render_text(report: &SessionReport<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Venue {}", report.venue);

    let mut current_row = None;
    for slot in report.slots {
        if current_row != Some(slot.row) {
            if current_row.is_some() {
                out.push('\n');
            }
            let _ = write!(out, "{} |", slot.row);
            current_row = Some(slot.row);
        }
        let cell = match (slot.status, slot.is_premium) {
            (SlotStatus::Occupied, _) => "  xx  ".to_string(),
            (SlotStatus::Available, true) => format!("[{}*]", slot.number),
            (SlotStatus::Available, false) => format!("[{}]", slot.number),
        };
        let _ = write!(out, " {}", cell);
    }
    if current_row.is_some() {
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "Occupied {}/{} ({:.1}%), free {}",
        report.stats.occupied_slots,
        report.stats.total_slots,
        report.stats.occupancy_rate,
        report.stats.free_slots
    );
    let _ = writeln!(
        out,
        "Estimated daily revenue {}{}",
        CURRENCY_SYMBOL, report.stats.daily_revenue
    );

    if let Some(quote) = report.quote {
        let _ = writeln!(out, "Quote:");
        for line in &quote.breakdown {
            let _ = writeln!(out, "  {:<24} {:>10.2}", line.label, line.amount);
        }
        let _ = writeln!(out, "  {:<24} {:>10.2}", "Total", quote.total);
    }

    if let Some(booking) = report.booking {
        let _ = writeln!(
            out,
            "Booking {} confirmed: slot {} from {} to {} (code {})",
            booking.id, booking.slot_number, booking.start, booking.end, booking.confirmation_code
        );
    }

    out
}

pub fn render_csv(slots: &[ParkingSlot]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["id", "number", "row", "status", "price_modifier", "is_premium"])?;

    for slot in slots {
        let status = match slot.status {
            SlotStatus::Available => "AVAILABLE",
            SlotStatus::Occupied => "OCCUPIED",
        };
        let row = slot.row.to_string();
        let modifier = slot.price_modifier.to_string();
        let premium = slot.is_premium.to_string();
        writer.write_record([
            slot.id.as_str(),
            slot.number.as_str(),
            row.as_str(),
            status,
            modifier.as_str(),
            premium.as_str(),
        ])?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| BookingError::IoError(e.into_error()))?;
    String::from_utf8(data).map_err(|e| BookingError::ConfigError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}
