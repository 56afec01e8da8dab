//! Run configuration: where the reports live and the engine settings.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use replen_restock::RestockConfig;

pub const DEFAULT_SALES_PATH: &str = "reports/sales/sales.csv";
pub const DEFAULT_INVENTORY_PATH: &str = "reports/inventory/inventory.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "recommendations/restock_recommendations.csv";

/// Directory holding one sub-directory per brand.
pub const BRANDS_DIR: &str = "BRANDS";

/// All-listings report inside a brand directory.
pub const LISTING_REPORT_FILE: &str = "all-listing-report.tsv";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid brand name {0:?}: expected a single directory name")]
    InvalidBrand(String),
}

/// Inputs, output, and engine settings for one restock run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub sales_path: PathBuf,
    pub inventory_path: PathBuf,
    pub output_path: PathBuf,
    #[serde(default)]
    pub restock: RestockConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::rooted_at(Path::new(""))
    }
}

impl RunConfig {
    /// The conventional report layout under `root`.
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            sales_path: root.join(DEFAULT_SALES_PATH),
            inventory_path: root.join(DEFAULT_INVENTORY_PATH),
            output_path: root.join(DEFAULT_OUTPUT_PATH),
            restock: RestockConfig::default(),
        }
    }

    /// The conventional layout under `<root>/BRANDS/<brand>/`.
    pub fn for_brand(root: &Path, brand: &str) -> Result<Self, ConfigError> {
        Ok(Self::rooted_at(&brand_dir(root, brand)?))
    }

    pub fn with_restock(mut self, restock: RestockConfig) -> Self {
        self.restock = restock;
        self
    }
}

/// `<root>/BRANDS/<brand>`, where `brand` must be a single plain directory name.
pub fn brand_dir(root: &Path, brand: &str) -> Result<PathBuf, ConfigError> {
    let brand = brand.trim();
    let mut components = Path::new(brand).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(root.join(BRANDS_DIR).join(brand)),
        _ => Err(ConfigError::InvalidBrand(brand.to_string())),
    }
}

/// `<root>/BRANDS/<brand>/all-listing-report.tsv`.
pub fn listing_report_for_brand(root: &Path, brand: &str) -> Result<PathBuf, ConfigError> {
    Ok(brand_dir(root, brand)?.join(LISTING_REPORT_FILE))
}
