use serde::Serialize;
use thiserror::Error;

use crate::recommendation::RestockRecommendation;

/// Output of one restock run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestockPlan {
    pub restock_threshold_days: u32,
    /// SKUs with sales that were considered (flagged or not).
    pub skus_evaluated: usize,
    /// Flagged SKUs, ascending by `restock_needed_in_days`.
    pub recommendations: Vec<RestockRecommendation>,
}

impl RestockPlan {
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn explanation(&self) -> String {
        format!(
            "{} of {} selling SKU(s) below {} day(s) of supply",
            self.recommendations.len(),
            self.skus_evaluated,
            self.restock_threshold_days
        )
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RestockError {
    #[error("invalid restock configuration: {0}")]
    InvalidConfig(String),
}
