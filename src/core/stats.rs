use crate::domain::model::{ParkingSlot, SlotStats};

const REVENUE_PER_VEHICLE: f64 = 150.0;
const REVENUE_REALIZATION: f64 = 0.8;

impl SlotStats {
    pub fn from_counts(occupied: usize, free: usize) -> Self {
        let total = occupied + free;
        let occupancy_rate = if total > 0 {
            round_tenths_half_even(occupied as f64 / total as f64 * 100.0)
        } else {
            0.0
        };

        Self {
            total_slots: total,
            occupied_slots: occupied,
            free_slots: free,
            occupancy_rate,
            daily_revenue: estimated_daily_revenue(occupied),
        }
    }

    pub fn from_layout(slots: &[ParkingSlot]) -> Self {
        let free = slots.iter().filter(|slot| slot.is_available()).count();
        Self::from_counts(slots.len() - free, free)
    }
}

/// 以在場車輛數估算當日營收
pub fn estimated_daily_revenue(occupied: usize) -> u64 {
    (occupied as f64 * REVENUE_PER_VEHICLE * REVENUE_REALIZATION).round_ties_even() as u64
}

/// 取到小數一位，依 double 的精確值判斷，剛好一半時取偶數 (6.25 -> 6.2)
fn round_tenths_half_even(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }

    let bits = value.to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if exp_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exp_bits - 1075)
    };

    if exponent >= 0 {
        return value;
    }
    let shift = -exponent;
    if shift > 120 {
        return 0.0;
    }

    // value * 10 = mantissa * 10 / 2^shift
    let scaled = u128::from(mantissa) * 10;
    let denominator = 1u128 << shift;
    let quotient = scaled / denominator;
    let twice_remainder = (scaled % denominator) * 2;
    let tenths = if twice_remainder > denominator
        || (twice_remainder == denominator && quotient % 2 == 1)
    {
        quotient + 1
    } else {
        quotient
    };

    tenths as f64 / 10.0
}
