use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status bucket for rows without a `status` value.
pub const UNKNOWN_STATUS: &str = "UNKNOWN";

/// One raw row of a listing report. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRow {
    pub price: Option<String>,
    pub status: Option<String>,
    pub open_date: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// Earliest/latest `open-date`, compared as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenDateRange {
    pub earliest: String,
    pub latest: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub total_items: usize,
    pub price: PriceStats,
    pub status_counts: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_date_range: Option<OpenDateRange>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListingError {
    #[error("no data found in listing report")]
    Empty,
}

impl ListingSummary {
    pub fn from_rows(rows: &[ListingRow]) -> Result<Self, ListingError> {
        if rows.is_empty() {
            return Err(ListingError::Empty);
        }

        let prices: Vec<f64> = rows
            .iter()
            .filter_map(|r| r.price.as_deref().and_then(parse_price))
            .collect();

        let mut status_counts: BTreeMap<String, usize> = BTreeMap::new();
        for row in rows {
            let status = row
                .status
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(UNKNOWN_STATUS);
            *status_counts.entry(status.to_string()).or_default() += 1;
        }

        let open_dates = rows
            .iter()
            .filter_map(|r| r.open_date.as_deref())
            .filter(|d| !d.is_empty());
        let open_date_range = open_dates.fold(None, |range: Option<OpenDateRange>, d| {
            Some(match range {
                None => OpenDateRange {
                    earliest: d.to_string(),
                    latest: d.to_string(),
                },
                Some(mut r) => {
                    if d < r.earliest.as_str() {
                        r.earliest = d.to_string();
                    }
                    if d > r.latest.as_str() {
                        r.latest = d.to_string();
                    }
                    r
                }
            })
        });

        Ok(Self {
            total_items: rows.len(),
            price: price_stats(&prices),
            status_counts,
            open_date_range,
        })
    }
}

/// Parse a price, ignoring thousands separators (`1,299.00`).
fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|p| p.is_finite())
}

fn price_stats(prices: &[f64]) -> PriceStats {
    if prices.is_empty() {
        return PriceStats::default();
    }
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let average = prices.iter().sum::<f64>() / prices.len() as f64;
    PriceStats { min, max, average }
}
