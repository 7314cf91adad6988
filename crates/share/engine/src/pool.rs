//! Money pool: the three aggregate amounts and their bounds.

use serde::{Deserialize, Serialize};
use share_types::{ShareError, ShareResult};

use crate::config::DEFAULT_TOTAL_POOL;

/// Rounding allowance on a sum compared against `limit`: four ulps.
pub(crate) fn rounding_slack(limit: f64) -> f64 {
    4.0 * f64::EPSILON * limit.abs()
}

/// `true` when the sum `value` is above `limit` by more than its rounding.
pub(crate) fn exceeds(value: f64, limit: f64) -> bool {
    value - limit > rounding_slack(limit)
}

/// Aggregate amounts of a share session.
///
/// Bounds held at all times:
/// - `total > 0`
/// - `0 <= reserved <= total`
/// - `0 <= manual` and `reserved + manual <= total`, so the unallocated
///   remainder handed to `Allocated` participants is never negative
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoneyPool {
    total: f64,
    reserved: f64,
    manual: f64,
}

impl MoneyPool {
    /// Build a pool with no manual entries.
    pub fn new(total: f64, reserved: f64) -> ShareResult<Self> {
        let mut pool = Self {
            total: DEFAULT_TOTAL_POOL,
            reserved: 0.0,
            manual: 0.0,
        };
        pool.set_total(total)?;
        pool.set_reserved(reserved)?;
        Ok(pool)
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn reserved(&self) -> f64 {
        self.reserved
    }

    pub fn manual(&self) -> f64 {
        self.manual
    }

    /// Amount split among `Allocated` participants.
    ///
    /// Rounding can put `reserved + manual` a few ulps above `total`; the
    /// remainder is floored at zero rather than going negative.
    pub fn remainder(&self) -> f64 {
        (self.total - self.reserved - self.manual).max(0.0)
    }

    pub fn set_total(&mut self, value: f64) -> ShareResult<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ShareError::NonPositiveTotal(value));
        }
        let committed = self.reserved + self.manual;
        if self.reserved > value || self.manual > value || exceeds(committed, value) {
            return Err(ShareError::TotalBelowCommitted {
                requested: value,
                committed,
            });
        }
        self.total = value;
        Ok(())
    }

    pub fn set_reserved(&mut self, value: f64) -> ShareResult<()> {
        let max = self.total - self.manual;
        if !value.is_finite()
            || value < 0.0
            || value > self.total
            || exceeds(value + self.manual, self.total)
        {
            return Err(ShareError::ReservedOutOfRange {
                requested: value,
                max,
            });
        }
        self.reserved = value;
        Ok(())
    }

    /// Manual total that would result from adding `delta`, if it fits.
    ///
    /// Does not modify the pool.
    pub fn propose_manual(&self, delta: f64) -> ShareResult<f64> {
        let proposed = (self.manual + delta).max(0.0);
        let available = self.total - self.reserved;
        if !proposed.is_finite()
            || proposed > self.total
            || exceeds(proposed + self.reserved, self.total)
        {
            return Err(ShareError::ManualOverflow {
                proposed,
                available,
            });
        }
        Ok(proposed)
    }

    /// Install a value previously returned by [`MoneyPool::propose_manual`].
    pub(crate) fn commit_manual(&mut self, proposed: f64) {
        self.manual = proposed;
    }

    /// Unchecked constructor for building broken snapshots in tests.
    #[cfg(test)]
    pub(crate) fn from_parts_unchecked(total: f64, reserved: f64, manual: f64) -> Self {
        Self {
            total,
            reserved,
            manual,
        }
    }

    /// Take a manual estimate back out of the manual pool.
    pub fn retract_manual(&mut self, amount: f64) {
        self.manual = (self.manual - amount).max(0.0);
    }
}

impl Default for MoneyPool {
    fn default() -> Self {
        Self {
            total: DEFAULT_TOTAL_POOL,
            reserved: 0.0,
            manual: 0.0,
        }
    }
}
