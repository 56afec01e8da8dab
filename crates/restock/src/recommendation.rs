use serde::{Deserialize, Serialize};

use replen_core::Sku;

/// One flagged SKU in a restock plan.
///
/// Field order is the column order of the persisted report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockRecommendation {
    pub sku: Sku,
    /// Units per selling day, rounded to 2 decimals.
    pub avg_daily_sales: f64,
    pub current_inventory: u64,
    /// Rounded to 2 decimals.
    pub days_of_supply: f64,
    pub restock_needed_in_days: u32,
    pub recommendation: String,
}

impl RestockRecommendation {
    /// Build a recommendation from unrounded metrics.
    ///
    /// `restock_needed_in_days` truncates `threshold - days_of_supply` toward zero
    /// and clamps at 0; the text embeds the floor of `days_of_supply`.
    pub(crate) fn from_metrics(
        sku: Sku,
        avg_daily_sales: f64,
        current_inventory: u64,
        days_of_supply: f64,
        threshold_days: u32,
    ) -> Self {
        let restock_needed_in_days = (f64::from(threshold_days) - days_of_supply).trunc().max(0.0) as u32;
        let remaining_days = days_of_supply.floor() as u64;

        Self {
            sku,
            avg_daily_sales: round2(avg_daily_sales),
            current_inventory,
            days_of_supply: round2(days_of_supply),
            restock_needed_in_days,
            recommendation: format!("Restock recommended. {remaining_days} days of supply remaining."),
        }
    }
}

/// Round to two decimal places, ties to even.
fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_display_values_but_not_derived_days() {
        let rec = RestockRecommendation::from_metrics(
            Sku::parse("SKU1").unwrap(),
            7.5,
            10,
            10.0 / 7.5,
            30,
        );

        assert_eq!(rec.avg_daily_sales, 7.5);
        assert_eq!(rec.days_of_supply, 1.33);
        // 30 - 1.333.. = 28.66.. truncated
        assert_eq!(rec.restock_needed_in_days, 28);
        assert_eq!(rec.recommendation, "Restock recommended. 1 days of supply remaining.");
    }

    #[test]
    fn round2_rounds_ties_to_even() {
        assert_eq!(round2(1.125), 1.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(0.625), 0.62);
        assert_eq!(round2(2.345_000_1), 2.35);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(1.0 / 3.0), 0.33);
    }
}
