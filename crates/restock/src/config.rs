use serde::{Deserialize, Serialize};

use crate::plan::RestockError;

pub const DEFAULT_RESTOCK_THRESHOLD_DAYS: u32 = 30;

/// Engine configuration, passed in explicitly at call time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestockConfig {
    /// Target days of supply; SKUs below it are flagged.
    ///
    /// Raising it flags more SKUs, lowering it flags fewer.
    pub restock_threshold_days: u32,
}

impl Default for RestockConfig {
    fn default() -> Self {
        Self {
            restock_threshold_days: DEFAULT_RESTOCK_THRESHOLD_DAYS,
        }
    }
}

impl RestockConfig {
    pub fn with_threshold_days(days: u32) -> Self {
        Self {
            restock_threshold_days: days,
        }
    }

    pub fn validate(&self) -> Result<(), RestockError> {
        if self.restock_threshold_days == 0 {
            return Err(RestockError::InvalidConfig(
                "restock_threshold_days must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
