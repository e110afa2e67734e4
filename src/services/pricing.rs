//! Proposal pricing calculator.
//!
//! Pure, deterministic arithmetic over a proposal's line items. None of these
//! functions clamp or reject out-of-range input; the validator is expected to
//! have run before any save path reaches them, so a zero or negative term
//! simply produces a zero or negative production total.

use rust_decimal::Decimal;

use crate::models::proposal::{ProposalItem, ProposalTotals};

/// Unit value times quantity for one line. Display only; not part of totals.
pub fn item_total(item: &ProposalItem) -> Decimal {
    item.unit_value * Decimal::from(item.quantity)
}

/// One month's consumption-based cost for a line: page volumes times the
/// per-page costs of each class.
pub fn item_production_monthly(item: &ProposalItem) -> Decimal {
    Decimal::from(item.monthly_volume_pb) * item.cost_pb
        + Decimal::from(item.monthly_volume_color) * item.cost_color
}

/// Flat monthly fixed charge for a line.
///
/// This sums the per-unit cost *rates* (not volume-scaled amounts) and is
/// independent of quantity and volume. That is the intended business
/// semantics carried over from the system this replaces, not a derivation
/// error.
pub fn item_fixed_rate(item: &ProposalItem) -> Decimal {
    item.cost_pb + item.cost_color + item.cost_labor + item.cost_parts
}

/// Aggregate totals over a proposal's items for a contract of `term_months`.
///
/// Fixed rate is not scaled by the term; production is. An empty item list
/// yields all-zero totals.
pub fn proposal_totals(items: &[ProposalItem], term_months: i32) -> ProposalTotals {
    let fixed_rate_total: Decimal = items.iter().map(item_fixed_rate).sum();
    let monthly_production: Decimal = items.iter().map(item_production_monthly).sum();

    let production_total = monthly_production * Decimal::from(term_months);
    let grand_total = fixed_rate_total + production_total;

    ProposalTotals {
        fixed_rate_total,
        production_total,
        grand_total,
    }
}

/// Render an amount using Brazilian Real conventions: "R$ 1.234,56".
/// Presentation only; stored values are untouched.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded.is_sign_negative();
    let abs = rounded.abs();

    let as_text = format!("{:.2}", abs);
    let (int_part, frac_part) = as_text
        .split_once('.')
        .expect("two decimal places were just formatted");

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    let digits = int_part.as_bytes();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*digit as char);
    }

    if negative {
        format!("-R$ {},{}", grouped, frac_part)
    } else {
        format!("R$ {},{}", grouped, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn sample_item() -> ProposalItem {
        ProposalItem {
            unit_value: dec!(1200),
            quantity: 10,
            monthly_volume_pb: 15_000,
            monthly_volume_color: 0,
            cost_pb: dec!(0.05),
            cost_color: dec!(0),
            cost_labor: dec!(400),
            cost_parts: dec!(300),
            ..ProposalItem::new()
        }
    }

    #[test]
    fn item_total_is_unit_value_times_quantity() {
        assert_eq!(item_total(&sample_item()), dec!(12000));
    }

    #[test]
    fn fixed_rate_sums_rates_not_volumes() {
        // 0.05 + 0 + 400 + 300; quantity and volume play no part.
        assert_eq!(item_fixed_rate(&sample_item()), dec!(700.05));
    }

    #[test]
    fn production_monthly_weighs_both_classes() {
        let mut item = sample_item();
        item.monthly_volume_color = 2000;
        item.cost_color = dec!(0.15);
        assert_eq!(item_production_monthly(&item), dec!(1050)); // 750 + 300
    }

    #[test]
    fn totals_match_reference_scenario() {
        // Single item, 24-month term: the worked example from the business side.
        let totals = proposal_totals(&[sample_item()], 24);
        assert_eq!(totals.fixed_rate_total, dec!(700.05));
        assert_eq!(totals.production_total, dec!(18000));
        assert_eq!(totals.grand_total, dec!(18700.05));
    }

    #[test]
    fn empty_items_yield_zero_totals() {
        for term in [-3, 0, 1, 36] {
            let totals = proposal_totals(&[], term);
            assert_eq!(totals, ProposalTotals::default());
        }
    }

    #[test]
    fn zero_term_zeroes_production_only() {
        let totals = proposal_totals(&[sample_item()], 0);
        assert_eq!(totals.production_total, dec!(0));
        assert_eq!(totals.grand_total, totals.fixed_rate_total);
    }

    #[test]
    fn fixed_rate_total_is_additive_over_concatenation() {
        let a = vec![sample_item(), sample_item()];
        let b = vec![sample_item()];
        let mut ab = a.clone();
        ab.extend(b.clone());

        let term = 12;
        assert_eq!(
            proposal_totals(&ab, term).fixed_rate_total,
            proposal_totals(&a, term).fixed_rate_total
                + proposal_totals(&b, term).fixed_rate_total
        );
    }

    #[test]
    fn totals_are_idempotent() {
        let items = vec![sample_item()];
        assert_eq!(proposal_totals(&items, 24), proposal_totals(&items, 24));
    }

    proptest! {
        #[test]
        fn doubling_the_term_doubles_production(
            volume_pb in 0i64..1_000_000,
            volume_color in 0i64..1_000_000,
            term in 1i32..120,
        ) {
            let mut item = sample_item();
            item.monthly_volume_pb = volume_pb;
            item.monthly_volume_color = volume_color;
            item.cost_color = dec!(0.15);
            let items = vec![item];

            let single = proposal_totals(&items, term);
            let double = proposal_totals(&items, term * 2);
            prop_assert_eq!(
                double.production_total,
                single.production_total * dec!(2)
            );
            // Fixed rate never scales with the term.
            prop_assert_eq!(double.fixed_rate_total, single.fixed_rate_total);
        }
    }

    #[test]
    fn brl_formatting_groups_thousands() {
        assert_eq!(format_brl(dec!(0)), "R$ 0,00");
        assert_eq!(format_brl(dec!(8.5)), "R$ 8,50");
        assert_eq!(format_brl(dec!(1234.56)), "R$ 1.234,56");
        assert_eq!(format_brl(dec!(18700.05)), "R$ 18.700,05");
        assert_eq!(format_brl(dec!(1234567.891)), "R$ 1.234.567,89");
        assert_eq!(format_brl(dec!(-950.1)), "-R$ 950,10");
    }
}
