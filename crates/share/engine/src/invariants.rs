//! Snapshot invariant checker.
//!
//! Run on every candidate snapshot before it replaces the current one.

use std::collections::HashSet;

use share_types::{Category, Participant, ShareError, ShareResult, MAX_SCORE};

use crate::allocation::GroupTotals;
use crate::pool::{exceeds, MoneyPool};

/// Relative tolerance for sums of recomputed estimates.
const SUM_TOLERANCE: f64 = 1e-9;

/// Absolute floor below zero an estimate may reach through rounding.
const ESTIMATE_FLOOR: f64 = -1e-9;

fn violation(what: impl Into<String>) -> ShareError {
    ShareError::InvariantViolation(what.into())
}

fn close(a: f64, b: f64, scale: f64) -> bool {
    (a - b).abs() <= SUM_TOLERANCE * scale.abs().max(1.0)
}

/// Check all invariants. Returns `Err` on the first violation.
pub fn check(pool: &MoneyPool, participants: &[Participant]) -> ShareResult<()> {
    // PoolBounds
    if !(pool.total() > 0.0 && pool.total().is_finite()) {
        return Err(violation("total pool must be positive"));
    }
    if pool.reserved() < 0.0 || pool.manual() < 0.0 {
        return Err(violation("sub-pools must be non-negative"));
    }
    if pool.reserved() > pool.total() {
        return Err(violation(format!(
            "reserved pool {} exceeds total pool {}",
            pool.reserved(),
            pool.total()
        )));
    }
    if pool.manual() > pool.total() {
        return Err(violation(format!(
            "manual pool {} exceeds total pool {}",
            pool.manual(),
            pool.total()
        )));
    }
    if exceeds(pool.reserved() + pool.manual(), pool.total()) {
        return Err(violation("reserved + manual exceed total pool"));
    }

    // UniqueNames
    let mut seen = HashSet::with_capacity(participants.len());
    for p in participants {
        if p.name.trim().is_empty() || p.name.trim() != p.name {
            return Err(violation(format!("malformed name {:?}", p.name)));
        }
        if !seen.insert(p.name.as_str()) {
            return Err(violation(format!("duplicate name {:?}", p.name)));
        }
    }

    // ScoreDomain, ManualScoreZero, EstimateNonNegative
    for p in participants {
        if p.score > MAX_SCORE {
            return Err(violation(format!("score of {:?} out of range", p.name)));
        }
        if p.category == Category::Manual && p.score != 0 {
            return Err(violation(format!("manual participant {:?} has a score", p.name)));
        }
        if !p.estimate.is_finite() || p.estimate < ESTIMATE_FLOOR {
            return Err(violation(format!("estimate of {:?} is negative", p.name)));
        }
    }

    let totals = GroupTotals::of(participants);

    // ManualPoolMatchesEntries
    if !close(totals.manual_sum, pool.manual(), pool.total()) {
        return Err(violation(format!(
            "manual pool {} differs from manual entries {}",
            pool.manual(),
            totals.manual_sum
        )));
    }

    // AllocatedConservation
    if totals.allocated_score > 0 && !close(totals.allocated_sum, pool.remainder(), pool.total()) {
        return Err(violation(format!(
            "allocated estimates {} differ from remainder {}",
            totals.allocated_sum,
            pool.remainder()
        )));
    }

    // ReservedConservation
    if totals.reserved_score > 0 && !close(totals.reserved_sum, pool.reserved(), pool.total()) {
        return Err(violation(format!(
            "reserved estimates {} differ from reserved pool {}",
            totals.reserved_sum,
            pool.reserved()
        )));
    }

    Ok(())
}
