use crate::domain::model::{ParkingSlot, SlotStatus};

pub const ROW_LABELS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
pub const SLOTS_PER_ROW: usize = 8;
pub const MAX_SLOTS: usize = ROW_LABELS.len() * SLOTS_PER_ROW;
pub const DEFAULT_CAPACITY: i64 = MAX_SLOTS as i64;

const OCCUPANCY_THRESHOLD: f64 = 0.68;
const PREMIUM_INTERVAL: usize = 9;
const PREMIUM_MODIFIER: f64 = 1.2;
const STANDARD_MODIFIER: f64 = 1.0;

/// 以場地 ID 為種子的 sin 雜湊，只求可重現，不是密碼學等級的亂數。
#[derive(Debug, Clone, Copy)]
pub struct SlotRng {
    seed: u64,
}

impl SlotRng {
    /// 種子 = 所有 UTF-16 code unit 的總和，空字串為 0
    pub fn from_venue(venue_id: &str) -> Self {
        let seed = venue_id.encode_utf16().map(u64::from).sum();
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// frac(sin(seed + i) * 10000)，落在 [0, 1)
    pub fn value(&self, index: usize) -> f64 {
        let x = ((self.seed + index as u64) as f64).sin() * 10000.0;
        x - x.floor()
    }
}

pub fn generate_slots(venue_id: &str, capacity: i64) -> Vec<ParkingSlot> {
    let effective_count = capacity.clamp(0, MAX_SLOTS as i64) as usize;
    let rng = SlotRng::from_venue(venue_id);

    (0..effective_count)
        .map(|i| {
            let row = ROW_LABELS[i / SLOTS_PER_ROW];
            let ordinal = i % SLOTS_PER_ROW + 1;
            let number = format!("{}-{:02}", row, ordinal);

            let status = if rng.value(i) < OCCUPANCY_THRESHOLD {
                SlotStatus::Occupied
            } else {
                SlotStatus::Available
            };
            let is_premium = ordinal == 1 || i % PREMIUM_INTERVAL == 0;
            let price_modifier = if is_premium {
                PREMIUM_MODIFIER
            } else {
                STANDARD_MODIFIER
            };

            ParkingSlot {
                id: format!("slot-{}-{}", venue_id, number),
                number,
                row,
                status,
                price_modifier,
                is_premium,
            }
        })
        .collect()
}

pub fn generate_default_slots(venue_id: &str) -> Vec<ParkingSlot> {
    generate_slots(venue_id, DEFAULT_CAPACITY)
}

pub fn find_slot<'a>(slots: &'a [ParkingSlot], number: &str) -> Option<&'a ParkingSlot> {
    slots.iter().find(|slot| slot.number.eq_ignore_ascii_case(number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_full_grid_for_single_letter_venue() {
        let slots = generate_slots("A", 48);
        assert_eq!(slots.len(), 48);

        for (row_index, row) in ROW_LABELS.iter().enumerate() {
            let in_row: Vec<&ParkingSlot> = slots.iter().filter(|s| s.row == *row).collect();
            assert_eq!(in_row.len(), SLOTS_PER_ROW, "row {}", row);
            assert_eq!(in_row[0].number, format!("{}-01", row));
            assert_eq!(slots[row_index * SLOTS_PER_ROW].row, *row);
        }

        assert_eq!(slots[0].number, "A-01");
        assert_eq!(slots[0].id, "slot-A-A-01");
        assert!(slots[0].is_premium);
        assert_eq!(slots[47].number, "F-08");
    }

    #[test]
    fn test_slot_count_is_bounded() {
        assert_eq!(generate_slots("venue-7", 10).len(), 10);
        assert_eq!(generate_slots("venue-7", 48).len(), 48);
        assert_eq!(generate_slots("venue-7", 100).len(), 48);
        assert!(generate_slots("venue-7", 0).is_empty());
        assert!(generate_slots("venue-7", -5).is_empty());
    }

    #[test]
    fn test_row_ordinal_pairs_are_unique() {
        let slots = generate_slots("venue-7", 48);
        let pairs: HashSet<(char, u32)> = slots
            .iter()
            .map(|s| (s.row, s.ordinal().unwrap()))
            .collect();
        assert_eq!(pairs.len(), slots.len());

        let ids: HashSet<&str> = slots.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), slots.len());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let first = generate_slots("venue-7", 48);
        let second = generate_slots("venue-7", 48);
        assert_eq!(first, second);
    }

    #[test]
    fn test_premium_rule() {
        let slots = generate_slots("venue-7", 48);
        for (i, slot) in slots.iter().enumerate() {
            let ordinal = slot.ordinal().unwrap();
            let expected = ordinal == 1 || i % 9 == 0;
            assert_eq!(slot.is_premium, expected, "slot {}", slot.number);
            assert_eq!(slot.is_premium, slot.price_modifier > 1.0);
        }
        // index 9 = B-02, index 18 = C-03
        assert!(slots[9].is_premium);
        assert_eq!(slots[9].number, "B-02");
        assert!(slots[18].is_premium);
        assert!(!slots[2].is_premium);
    }

    #[test]
    fn test_occupancy_pattern_is_pinned() {
        use SlotStatus::{Available, Occupied};

        let statuses: Vec<SlotStatus> = generate_slots("A", 8).iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![Occupied, Occupied, Available, Available, Occupied, Available, Occupied, Occupied]
        );
    }

    #[test]
    fn test_rng_reference_values() {
        let rng = SlotRng::from_venue("venue-7");
        assert_eq!(rng.seed(), 647);
        assert!((rng.value(0) - 0.03738431174588186).abs() < 1e-9);

        let rng = SlotRng::from_venue("A");
        assert!((rng.value(0) - 0.2867949010342272).abs() < 1e-9);
        // sin(67) < 0，必須用 x - floor(x) 而非 x % 1
        assert!((rng.value(2) - 0.8002102467780787).abs() < 1e-9);
        assert!((rng.value(5) - 0.906815578890928).abs() < 1e-9);
    }

    #[test]
    fn test_rng_seed_and_range() {
        assert_eq!(SlotRng::from_venue("").seed(), 0);
        assert_eq!(SlotRng::from_venue("A").seed(), 65);
        assert_eq!(SlotRng::from_venue("AB").seed(), 131);
        // UTF-16 code unit，不是 UTF-8 bytes
        assert_eq!(SlotRng::from_venue("₹A").seed(), 0x20B9 + 65);

        let rng = SlotRng::from_venue("venue-7");
        for i in 0..200 {
            let v = rng.value(i);
            assert!((0.0..1.0).contains(&v));
            assert_eq!(v, rng.value(i));
        }
    }

    #[test]
    fn test_empty_venue_still_generates() {
        let slots = generate_slots("", 8);
        assert_eq!(slots.len(), 8);
        assert_eq!(slots[0].id, "slot--A-01");
    }

    #[test]
    fn test_find_slot() {
        let slots = generate_default_slots("venue-7");
        assert_eq!(find_slot(&slots, "c-03").map(|s| s.number.as_str()), Some("C-03"));
        assert!(find_slot(&slots, "G-01").is_none());
    }
}
