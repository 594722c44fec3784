use crate::domain::model::{LineItem, LineKind, PriceQuote};

pub const TAX_RATE: f64 = 0.18;
pub const PLATFORM_FEE: f64 = 10.0;
pub const STANDARD_MODIFIER: f64 = 1.0;
pub const CURRENCY_SYMBOL: &str = "₹";

/// 四捨五入到小數兩位 (half-up)
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// 計算報價。每一步各自取整，不延後到最後才取整。
///
/// 不檢查輸入範圍：duration 的 1..=12 限制由呼叫端負責。
pub fn compute_quote(base_rate: f64, duration: u32, price_modifier: f64) -> PriceQuote {
    let subtotal = base_rate * f64::from(duration);
    let modifier_amount = round_to_cents((price_modifier - 1.0) * subtotal);
    let adjusted_subtotal = subtotal + modifier_amount;
    let tax = round_to_cents(adjusted_subtotal * TAX_RATE);
    let total = round_to_cents(adjusted_subtotal + tax + PLATFORM_FEE);

    let mut breakdown = vec![LineItem {
        label: format!("{}{}/hr × {}h", CURRENCY_SYMBOL, base_rate, duration),
        amount: subtotal,
        kind: LineKind::Charge,
    }];

    if price_modifier > STANDARD_MODIFIER {
        let percent = ((price_modifier - 1.0) * 100.0).round();
        breakdown.push(LineItem {
            label: format!("Premium slot (+{}%)", percent),
            amount: modifier_amount,
            kind: LineKind::Modifier,
        });
    }

    breakdown.push(LineItem {
        label: format!("GST ({}%)", (TAX_RATE * 100.0).round()),
        amount: tax,
        kind: LineKind::Tax,
    });
    breakdown.push(LineItem {
        label: "Platform fee".to_string(),
        amount: PLATFORM_FEE,
        kind: LineKind::Fee,
    });

    PriceQuote {
        base_rate,
        duration,
        price_modifier,
        subtotal,
        modifier_amount,
        tax,
        platform_fee: PLATFORM_FEE,
        total,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_standard_quote() {
        let quote = compute_quote(50.0, 2, STANDARD_MODIFIER);

        assert!(approx(quote.subtotal, 100.0));
        assert!(approx(quote.modifier_amount, 0.0));
        assert!(approx(quote.tax, 18.0));
        assert!(approx(quote.total, 128.0));

        let kinds: Vec<LineKind> = quote.breakdown.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LineKind::Charge, LineKind::Tax, LineKind::Fee]);
        assert_eq!(quote.breakdown[0].label, "₹50/hr × 2h");
        assert!(approx(quote.breakdown[0].amount, 100.0));
        assert!(approx(quote.breakdown[1].amount, 18.0));
        assert!(approx(quote.breakdown[2].amount, 10.0));
    }

    #[test]
    fn test_premium_quote() {
        let quote = compute_quote(50.0, 2, 1.2);

        assert!(approx(quote.subtotal, 100.0));
        assert!(approx(quote.modifier_amount, 20.0));
        assert!(approx(quote.tax, 21.6));
        assert!(approx(quote.total, 151.6));

        let kinds: Vec<LineKind> = quote.breakdown.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![LineKind::Charge, LineKind::Modifier, LineKind::Tax, LineKind::Fee]
        );
        assert_eq!(quote.breakdown[1].label, "Premium slot (+20%)");
        assert!(approx(quote.breakdown[1].amount, 20.0));
    }

    #[test]
    fn test_rounding_happens_per_step() {
        // 延後取整會得到 10.04
        let quote = compute_quote(0.03, 1, 1.2);

        assert!(approx(quote.modifier_amount, 0.01));
        assert!(approx(quote.tax, 0.01));
        assert!(approx(quote.total, 10.05));
    }

    #[test]
    fn test_components_sum_to_total() {
        let rates = [0.0, 0.03, 12.5, 33.33, 40.0, 49.99, 50.0, 75.25, 120.0];
        let modifiers = [1.0, 1.05, 1.2, 1.5];

        for &rate in &rates {
            for duration in 1..=12 {
                for &modifier in &modifiers {
                    let q = compute_quote(rate, duration, modifier);
                    let sum = q.subtotal + q.modifier_amount + q.tax + q.platform_fee;
                    assert!(
                        (sum - q.total).abs() <= 0.005 + 1e-9,
                        "rate={} duration={} modifier={} sum={} total={}",
                        rate,
                        duration,
                        modifier,
                        sum,
                        q.total
                    );
                }
            }
        }
    }

    #[test]
    fn test_modifier_line_only_for_premium() {
        assert!(!compute_quote(40.0, 3, 1.0).has_modifier_line());
        assert!(compute_quote(40.0, 3, 1.2).has_modifier_line());
    }

    #[test]
    fn test_platform_fee_is_fixed() {
        for (rate, duration, modifier) in [(0.0, 1, 1.0), (50.0, 12, 1.2), (999.0, 7, 1.0)] {
            let quote = compute_quote(rate, duration, modifier);
            assert_eq!(quote.platform_fee, 10.0);
            assert_eq!(quote.breakdown.last().map(|l| l.amount), Some(10.0));
        }
    }

    #[test]
    fn test_zero_duration_is_consistent() {
        let quote = compute_quote(50.0, 0, 1.2);
        assert!(approx(quote.subtotal, 0.0));
        assert!(approx(quote.total, 10.0));
    }

    #[test]
    fn test_round_to_cents_half_up() {
        assert!(approx(round_to_cents(1.005 + 1e-12), 1.01));
        assert!(approx(round_to_cents(2.675 + 1e-12), 2.68));
        assert!(approx(round_to_cents(0.004), 0.0));
        assert!(approx(round_to_cents(21.599999999999998), 21.6));
    }
}
