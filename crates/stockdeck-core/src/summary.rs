// ── Derived aggregates ──
//
// Pure folds over the current snapshots. No state of their own: absent
// snapshots yield zeros, and computing twice over the same inputs gives
// the same answer. Formatting is presentation-only and never feeds back
// into stored values.

use std::sync::Arc;

use serde::Serialize;

use crate::model::{Movement, Product};

/// Summary figures for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InventorySummary {
    /// Number of registered products.
    pub product_count: usize,
    /// Total units on hand across all products.
    pub total_units: u64,
    /// Total inventory value: Σ quantity × unit price.
    pub total_value: f64,
    /// Total inbound units across all movements.
    pub inbound_units: u64,
    /// Total outbound units across all movements.
    pub outbound_units: u64,
}

impl InventorySummary {
    /// Fold the snapshots into summary figures.
    pub fn compute(products: &[Arc<Product>], movements: &[Arc<Movement>]) -> Self {
        Self {
            product_count: products.len(),
            total_units: products.iter().map(|p| p.quantity).sum(),
            total_value: products.iter().map(|p| p.value()).sum(),
            inbound_units: movements.iter().map(|m| m.inbound).sum(),
            outbound_units: movements.iter().map(|m| m.outbound).sum(),
        }
    }
}

/// Format a value as rupiah: fixed symbol, dot thousands grouping, comma
/// decimals -- `Rp 1.234.567,89`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}Rp {grouped},{frac:02}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::EntityId;

    fn product(id: &str, quantity: u64, price: f64) -> Arc<Product> {
        Arc::new(Product {
            id: EntityId::from(id),
            name: format!("product-{id}"),
            quantity,
            price,
        })
    }

    fn movement(id: &str, inbound: u64, outbound: u64) -> Arc<Movement> {
        Arc::new(Movement {
            id: EntityId::from(id),
            product_id: EntityId::from("p"),
            inbound,
            outbound,
            created_at: None,
        })
    }

    #[test]
    fn empty_snapshots_yield_zeros() {
        let summary = InventorySummary::compute(&[], &[]);
        assert_eq!(summary.product_count, 0);
        assert_eq!(summary.total_units, 0);
        assert!(summary.total_value.abs() < f64::EPSILON);
        assert_eq!(summary.inbound_units, 0);
        assert_eq!(summary.outbound_units, 0);
    }

    #[test]
    fn totals_fold_both_collections() {
        let products = vec![product("a", 10, 2000.0), product("b", 4, 15000.0)];
        let movements = vec![movement("m1", 20, 0), movement("m2", 5, 8)];

        let summary = InventorySummary::compute(&products, &movements);

        assert_eq!(summary.product_count, 2);
        assert_eq!(summary.total_units, 14);
        assert!((summary.total_value - 80_000.0).abs() < f64::EPSILON);
        assert_eq!(summary.inbound_units, 25);
        assert_eq!(summary.outbound_units, 8);
    }

    #[test]
    fn compute_is_idempotent() {
        let products = vec![product("a", 3, 500.0)];
        let movements = vec![movement("m1", 1, 2)];

        let first = InventorySummary::compute(&products, &movements);
        let second = InventorySummary::compute(&products, &movements);

        assert_eq!(first, second);
    }

    #[test]
    fn currency_grouping() {
        assert_eq!(format_currency(0.0), "Rp 0,00");
        assert_eq!(format_currency(950.0), "Rp 950,00");
        assert_eq!(format_currency(1_234_567.0), "Rp 1.234.567,00");
        assert_eq!(format_currency(2500.5), "Rp 2.500,50");
    }

    #[test]
    fn currency_negative_values() {
        assert_eq!(format_currency(-1500.0), "-Rp 1.500,00");
    }
}
