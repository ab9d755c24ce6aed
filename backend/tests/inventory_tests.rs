//! Stock ledger tests
//!
//! Tests for material stock tracking including:
//! - Running-total accuracy (cached stock equals ledger replay)
//! - Three-way stock classification against the minimum threshold
//! - Export floor and quantity validation

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{replay_stock, sort_newest_first, StockStatus, StockTransaction, TransactionType};
use shared::validation::validate_transaction_quantity;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Import adds, export subtracts
    #[test]
    fn test_transaction_signs() {
        let qty = dec("10.0");
        assert_eq!(TransactionType::Import.signed(qty), dec("10.0"));
        assert_eq!(TransactionType::Export.signed(qty), dec("-10.0"));
    }

    /// Import then export from a known starting stock
    #[test]
    fn test_import_export_sequence() {
        let history = vec![
            (TransactionType::Import, dec("20.0")),
            (TransactionType::Export, dec("55.0")),
        ];

        // 50 + 20 - 55 = 15
        assert_eq!(replay_stock(dec("50.0"), &history), dec("15.0"));
    }

    /// Intermediate totals along the same sequence
    #[test]
    fn test_running_total_steps() {
        let start = dec("50.0");

        let after_import = replay_stock(start, &[(TransactionType::Import, dec("20.0"))]);
        assert_eq!(after_import, dec("70.0"));
        assert_eq!(StockStatus::classify(after_import, dec("10.0")), StockStatus::Sufficient);

        let after_export = replay_stock(after_import, &[(TransactionType::Export, dec("55.0"))]);
        assert_eq!(after_export, dec("15.0"));
    }

    /// Classification boundaries around the minimum
    #[test]
    fn test_classification_boundaries() {
        let min = dec("10.0");

        // At the minimum exactly: deficient
        assert_eq!(StockStatus::classify(dec("10.0"), min), StockStatus::Deficient);
        assert_eq!(StockStatus::classify(dec("9.999"), min), StockStatus::Deficient);

        // Between min and 1.5x min: low, inclusive at the ceiling
        assert_eq!(StockStatus::classify(dec("10.001"), min), StockStatus::Low);
        assert_eq!(StockStatus::classify(dec("15.0"), min), StockStatus::Low);

        // Above 1.5x min: sufficient
        assert_eq!(StockStatus::classify(dec("15.001"), min), StockStatus::Sufficient);
    }

    /// A fully drawn-down stock sits at the deficient floor
    #[test]
    fn test_deficient_after_drawdown() {
        let stock = replay_stock(
            dec("50.0"),
            &[
                (TransactionType::Import, dec("20.0")),
                (TransactionType::Export, dec("55.0")),
            ],
        );
        assert_eq!(StockStatus::classify(stock, dec("10.0")), StockStatus::Low);
        assert_eq!(StockStatus::classify(stock, dec("20.0")), StockStatus::Deficient);
    }

    /// Zero minimum collapses low into sufficient
    #[test]
    fn test_zero_minimum() {
        let min = Decimal::ZERO;
        assert_eq!(StockStatus::classify(Decimal::ZERO, min), StockStatus::Deficient);
        assert_eq!(StockStatus::classify(dec("0.001"), min), StockStatus::Sufficient);
    }

    /// Quantity validation rejects zero and negatives
    #[test]
    fn test_quantity_validation() {
        assert!(validate_transaction_quantity(dec("0.001")).is_ok());
        assert!(validate_transaction_quantity(Decimal::ZERO).is_err());
        assert!(validate_transaction_quantity(dec("-5.0")).is_err());
    }

    /// Exporting more than the stock on hand must be detectable
    #[test]
    fn test_insufficient_stock_detection() {
        let current = dec("50.0");
        let requested = dec("60.0");
        assert!(current - requested < Decimal::ZERO);
    }

    /// Draining the stock exactly leaves zero, which is allowed
    #[test]
    fn test_export_to_zero() {
        let stock = replay_stock(dec("40.0"), &[(TransactionType::Export, dec("40.0"))]);
        assert_eq!(stock, Decimal::ZERO);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating valid quantities (positive decimals)
    fn quantity_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10000i64).prop_map(|n| Decimal::new(n, 1)) // 0.1 to 1000.0
    }

    /// Strategy for generating minimum thresholds (non-negative)
    fn min_stock_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=5000i64).prop_map(|n| Decimal::new(n, 1))
    }

    /// Strategy for generating transaction types
    fn transaction_type_strategy() -> impl Strategy<Value = TransactionType> {
        prop_oneof![Just(TransactionType::Import), Just(TransactionType::Export)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Replaying the ledger equals initial + signed sum, in any order of folding
        #[test]
        fn prop_replay_matches_signed_sum(
            initial in quantity_strategy(),
            history in prop::collection::vec(
                (transaction_type_strategy(), quantity_strategy()),
                0..20
            )
        ) {
            let signed_sum: Decimal = history
                .iter()
                .map(|(t, q)| t.signed(*q))
                .sum();

            prop_assert_eq!(replay_stock(initial, &history), initial + signed_sum);
        }

        /// Imports alone never decrease the stock
        #[test]
        fn prop_imports_monotonic(
            initial in quantity_strategy(),
            amounts in prop::collection::vec(quantity_strategy(), 1..20)
        ) {
            let history: Vec<_> = amounts
                .iter()
                .map(|q| (TransactionType::Import, *q))
                .collect();

            prop_assert!(replay_stock(initial, &history) >= initial);
        }

        /// An import followed by an export of the same amount is a no-op
        #[test]
        fn prop_import_export_cancels(
            initial in quantity_strategy(),
            amount in quantity_strategy()
        ) {
            let history = [
                (TransactionType::Import, amount),
                (TransactionType::Export, amount),
            ];

            prop_assert_eq!(replay_stock(initial, &history), initial);
        }

        /// Classification is total: every stock level maps to exactly one status
        #[test]
        fn prop_classification_total(
            stock in quantity_strategy(),
            min in min_stock_strategy()
        ) {
            let status = StockStatus::classify(stock, min);
            let low_ceiling = min * Decimal::new(15, 1);

            match status {
                StockStatus::Deficient => prop_assert!(stock <= min),
                StockStatus::Low => {
                    prop_assert!(stock > min);
                    prop_assert!(stock <= low_ceiling);
                }
                StockStatus::Sufficient => prop_assert!(stock > low_ceiling),
            }
        }

        /// Raising the stock never worsens the classification
        #[test]
        fn prop_classification_monotone(
            stock in quantity_strategy(),
            extra in quantity_strategy(),
            min in min_stock_strategy()
        ) {
            fn rank(s: StockStatus) -> u8 {
                match s {
                    StockStatus::Deficient => 0,
                    StockStatus::Low => 1,
                    StockStatus::Sufficient => 2,
                }
            }

            let before = rank(StockStatus::classify(stock, min));
            let after = rank(StockStatus::classify(stock + extra, min));
            prop_assert!(after >= before);
        }

        /// Positive quantities always pass validation, non-positive never do
        #[test]
        fn prop_quantity_validation(quantity in quantity_strategy()) {
            prop_assert!(validate_transaction_quantity(quantity).is_ok());
            prop_assert!(validate_transaction_quantity(-quantity).is_err());
        }
    }
}

// ============================================================================
// History Ordering
// ============================================================================

#[cfg(test)]
mod ordering_tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    fn transaction(offset_secs: i64, quantity: &str) -> StockTransaction {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).single().unwrap();
        let timestamp = base + chrono::Duration::seconds(offset_secs);
        StockTransaction {
            id: Uuid::new_v4(),
            material_id: Uuid::new_v4(),
            transaction_type: TransactionType::Import,
            quantity: dec(quantity),
            reference_number: None,
            note: None,
            transaction_date: timestamp,
            created_at: timestamp,
        }
    }

    fn dates(history: &[StockTransaction]) -> Vec<DateTime<Utc>> {
        history.iter().map(|t| t.transaction_date).collect()
    }

    /// The end-to-end listing order: export recorded after import comes first
    #[test]
    fn test_later_export_listed_before_earlier_import() {
        let mut import = transaction(0, "20");
        let mut export = transaction(3600, "55");
        import.transaction_type = TransactionType::Import;
        export.transaction_type = TransactionType::Export;

        let mut history = vec![import, export];
        sort_newest_first(&mut history);

        assert_eq!(history[0].transaction_type, TransactionType::Export);
        assert_eq!(history[0].quantity, dec("55"));
        assert_eq!(history[1].transaction_type, TransactionType::Import);
        assert_eq!(history[1].quantity, dec("20"));
    }

    #[test]
    fn test_shuffled_history_comes_back_descending() {
        let mut history = vec![
            transaction(30, "3"),
            transaction(10, "1"),
            transaction(40, "4"),
            transaction(20, "2"),
        ];
        sort_newest_first(&mut history);

        let quantities: Vec<_> = history.iter().map(|t| t.quantity).collect();
        assert_eq!(quantities, vec![dec("4"), dec("3"), dec("2"), dec("1")]);
    }

    #[test]
    fn test_empty_history_stays_empty() {
        let mut history: Vec<StockTransaction> = Vec::new();
        sort_newest_first(&mut history);
        assert!(history.is_empty());
    }

    proptest! {
        /// Sorted output is always timestamp-descending, whatever the input order
        #[test]
        fn prop_sorted_history_is_descending(
            offsets in prop::collection::vec(0i64..=1_000_000, 0..30)
        ) {
            let mut history: Vec<_> = offsets
                .iter()
                .map(|&o| transaction(o, "1"))
                .collect();
            sort_newest_first(&mut history);

            for pair in dates(&history).windows(2) {
                prop_assert!(pair[0] >= pair[1]);
            }
        }

        /// Sorting an already-sorted history changes nothing
        #[test]
        fn prop_sort_is_idempotent(
            offsets in prop::collection::vec(0i64..=1_000_000, 0..30)
        ) {
            let mut history: Vec<_> = offsets
                .iter()
                .map(|&o| transaction(o, "1"))
                .collect();
            sort_newest_first(&mut history);
            let once = dates(&history);

            sort_newest_first(&mut history);
            prop_assert_eq!(dates(&history), once);
        }
    }
}

// ============================================================================
// Ledger Simulation (mirrors the service-side floor check)
// ============================================================================

#[cfg(test)]
mod ledger_simulation {
    use super::*;

    /// Apply one transaction against a running total, rejecting overdrafts
    pub fn apply(
        current_stock: Decimal,
        transaction_type: TransactionType,
        quantity: Decimal,
    ) -> Result<Decimal, &'static str> {
        validate_transaction_quantity(quantity)?;

        let next = current_stock + transaction_type.signed(quantity);
        if next < Decimal::ZERO {
            return Err("Insufficient stock");
        }
        Ok(next)
    }

    #[test]
    fn test_apply_import() {
        let next = apply(dec("50.0"), TransactionType::Import, dec("20.0")).unwrap();
        assert_eq!(next, dec("70.0"));
    }

    #[test]
    fn test_apply_export() {
        let next = apply(dec("70.0"), TransactionType::Export, dec("55.0")).unwrap();
        assert_eq!(next, dec("15.0"));
    }

    #[test]
    fn test_apply_overdraft_rejected() {
        let result = apply(dec("15.0"), TransactionType::Export, dec("20.0"));
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_zero_quantity_rejected() {
        let result = apply(dec("15.0"), TransactionType::Import, Decimal::ZERO);
        assert!(result.is_err());
    }

    proptest! {
        /// A sequence of accepted transactions never drives the stock negative
        #[test]
        fn prop_accepted_history_never_negative(
            initial in (0i64..=10000i64).prop_map(|n| Decimal::new(n, 1)),
            history in prop::collection::vec(
                (
                    prop_oneof![Just(TransactionType::Import), Just(TransactionType::Export)],
                    (1i64..=10000i64).prop_map(|n| Decimal::new(n, 1)),
                ),
                0..30
            )
        ) {
            let mut stock = initial;
            for (transaction_type, quantity) in history {
                if let Ok(next) = apply(stock, transaction_type, quantity) {
                    stock = next;
                }
            }
            prop_assert!(stock >= Decimal::ZERO);
        }
    }
}
