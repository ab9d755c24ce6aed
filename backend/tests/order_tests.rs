//! Order total tests
//!
//! Tests for order line-item arithmetic: the stored total must always
//! equal the sum of quantity times unit price over the line items.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::order_total;
use shared::validation::{validate_item_quantity, validate_price};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_empty_order_totals_zero() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_single_line_total() {
        let total = order_total(&[(3, dec("150.00"))]);
        assert_eq!(total, dec("450.00"));
    }

    #[test]
    fn test_multi_line_total() {
        let total = order_total(&[
            (2, dec("1200000.00")), // two dining tables
            (8, dec("350000.00")),  // eight chairs
        ]);
        assert_eq!(total, dec("5200000.00"));
    }

    #[test]
    fn test_item_quantity_validation() {
        assert!(validate_item_quantity(1).is_ok());
        assert!(validate_item_quantity(0).is_err());
        assert!(validate_item_quantity(-3).is_err());
    }

    #[test]
    fn test_price_validation() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(dec("99.99")).is_ok());
        assert!(validate_price(dec("-0.01")).is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn quantity_strategy() -> impl Strategy<Value = i32> {
        1i32..=100
    }

    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=10_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    fn items_strategy() -> impl Strategy<Value = Vec<(i32, Decimal)>> {
        prop::collection::vec((quantity_strategy(), price_strategy()), 0..10)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The total is the sum of the per-line subtotals
        #[test]
        fn prop_total_is_line_sum(items in items_strategy()) {
            let expected: Decimal = items
                .iter()
                .map(|(qty, price)| Decimal::from(*qty) * price)
                .sum();

            prop_assert_eq!(order_total(&items), expected);
        }

        /// Totals are never negative for valid lines
        #[test]
        fn prop_total_non_negative(items in items_strategy()) {
            prop_assert!(order_total(&items) >= Decimal::ZERO);
        }

        /// Appending a line increases the total by that line's subtotal
        #[test]
        fn prop_total_additive(
            items in items_strategy(),
            qty in quantity_strategy(),
            price in price_strategy()
        ) {
            let before = order_total(&items);

            let mut extended = items;
            extended.push((qty, price));

            prop_assert_eq!(order_total(&extended), before + Decimal::from(qty) * price);
        }
    }
}
