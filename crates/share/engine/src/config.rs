//! Session configuration.

use serde::{Deserialize, Serialize};
use share_types::{AddCategory, ShareError, ShareResult};

use crate::pool::MoneyPool;

/// Total pool a fresh session starts with.
pub const DEFAULT_TOTAL_POOL: f64 = 500_000_000_000_000.0;

/// Starting state of a [`crate::ShareSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Initial total pool
    #[serde(default = "default_total_pool")]
    pub initial_total_pool: f64,

    /// Initial reserved sub-pool
    #[serde(default)]
    pub initial_reserved_pool: f64,

    /// Category used when an add does not choose one
    #[serde(default)]
    pub default_category: AddCategory,
}

fn default_total_pool() -> f64 {
    DEFAULT_TOTAL_POOL
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_total_pool: DEFAULT_TOTAL_POOL,
            initial_reserved_pool: 0.0,
            default_category: AddCategory::default(),
        }
    }
}

impl SessionConfig {
    /// Check the initial amounts against the pool bounds.
    pub fn validate(&self) -> ShareResult<()> {
        self.initial_pool().map(|_| ())
    }

    pub(crate) fn initial_pool(&self) -> ShareResult<MoneyPool> {
        MoneyPool::new(self.initial_total_pool, self.initial_reserved_pool)
            .map_err(|e| ShareError::Config(e.to_string()))
    }
}
