use replen_inventory::InventorySnapshot;
use replen_sales::{SalesLedger, SalesVelocity};

use crate::config::RestockConfig;
use crate::plan::{RestockError, RestockPlan};
use crate::recommendation::RestockRecommendation;

/// Deterministic restock planning job.
///
/// Model:
/// - Average daily sales = units sold / distinct selling days.
/// - Days of supply = on-hand units / average daily sales (unknown SKUs hold 0 units).
/// - Flag a SKU if days of supply is below `restock_threshold_days`.
/// - Order flagged SKUs by how soon they need restocking.
#[derive(Debug, Clone)]
pub struct RestockJob<'a> {
    sales: &'a SalesLedger,
    inventory: &'a InventorySnapshot,
    config: RestockConfig,
}

impl<'a> RestockJob<'a> {
    pub fn new(sales: &'a SalesLedger, inventory: &'a InventorySnapshot) -> Self {
        Self {
            sales,
            inventory,
            config: RestockConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RestockConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_threshold_days(mut self, days: u32) -> Self {
        self.config.restock_threshold_days = days;
        self
    }

    pub fn run(&self) -> Result<RestockPlan, RestockError> {
        self.config.validate()?;
        let threshold = self.config.restock_threshold_days;

        let mut recommendations: Vec<RestockRecommendation> = self
            .sales
            .iter()
            .filter_map(|velocity| evaluate_sku(velocity, self.inventory, threshold))
            .collect();

        // Stable: ties keep the ledger's SKU order.
        recommendations.sort_by_key(|r| r.restock_needed_in_days);

        tracing::debug!(
            evaluated = self.sales.len(),
            flagged = recommendations.len(),
            threshold,
            "restock plan computed"
        );

        Ok(RestockPlan {
            restock_threshold_days: threshold,
            skus_evaluated: self.sales.len(),
            recommendations,
        })
    }
}

fn evaluate_sku(
    velocity: &SalesVelocity,
    inventory: &InventorySnapshot,
    threshold_days: u32,
) -> Option<RestockRecommendation> {
    let days_with_sales = velocity.distinct_days_with_sales();
    if days_with_sales == 0 {
        return None;
    }

    let avg_daily_sales = velocity.total_quantity_sold() as f64 / days_with_sales as f64;
    if !(avg_daily_sales.is_finite() && avg_daily_sales > 0.0) {
        return None;
    }

    let current_inventory = inventory.available(velocity.sku());
    let days_of_supply = current_inventory as f64 / avg_daily_sales;

    if days_of_supply >= f64::from(threshold_days) {
        return None;
    }

    Some(RestockRecommendation::from_metrics(
        velocity.sku().clone(),
        avg_daily_sales,
        current_inventory,
        days_of_supply,
        threshold_days,
    ))
}
