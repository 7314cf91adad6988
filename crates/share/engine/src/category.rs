//! Category state machine.
//!
//! ```text
//!   Allocated <--cycle--> Reserved
//!      |   ^                 |
//!  edit|   |cycle            |edit
//!      v   |                 |
//!     Manual <---------------+
//! ```
//!
//! `Manual` is entered only by editing an estimate and left only by the
//! cycle action, which always lands on `Allocated`.

use serde::{Deserialize, Serialize};
use share_types::{Category, Participant, ShareResult};
use tracing::debug;

use crate::pool::MoneyPool;

/// Score given to a participant cycled out of `Manual`.
pub const SCORE_AFTER_MANUAL: u32 = 1;

/// What a category transition did.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// Allocated <-> Reserved; no side effects
    Toggled { from: Category, to: Category },
    /// Manual -> Allocated; `retracted` left the manual pool
    LeftManual { retracted: f64 },
    /// Allocated/Reserved -> Manual, or a Manual re-entry
    ManualSet { estimate: f64, delta: f64 },
}

/// Apply the cycle action to one participant.
pub fn cycle(pool: &mut MoneyPool, participant: &mut Participant) -> Transition {
    let from = participant.category;
    let to = from.cycled();
    participant.category = to;

    if from == Category::Manual {
        pool.retract_manual(participant.estimate);
        participant.score = SCORE_AFTER_MANUAL;
        debug!(
            participant = %participant.id,
            retracted = participant.estimate,
            manual_pool = pool.manual(),
            "Participant left manual entry"
        );
        Transition::LeftManual {
            retracted: participant.estimate,
        }
    } else {
        Transition::Toggled { from, to }
    }
}

/// Entered estimate as stored: `NaN` and non-positive values become `0`.
pub fn coerce_manual_estimate(raw: f64) -> f64 {
    if raw.is_nan() || raw <= 0.0 {
        0.0
    } else {
        raw
    }
}

/// Commit a directly entered estimate, moving the participant to `Manual`.
///
/// The manual pool grows by the difference from the participant's previous
/// manual estimate (zero if it was not manual yet). If that would overflow
/// the pool, nothing changes at all: category, score, estimate and manual
/// pool keep their values.
pub fn set_manual_estimate(
    pool: &mut MoneyPool,
    participant: &mut Participant,
    raw: f64,
) -> ShareResult<Transition> {
    let estimate = coerce_manual_estimate(raw);
    let previous = if participant.is_manual() {
        participant.estimate
    } else {
        0.0
    };
    let delta = estimate - previous;
    let proposed = pool.propose_manual(delta)?;

    pool.commit_manual(proposed);
    participant.category = Category::Manual;
    participant.score = 0;
    participant.estimate = estimate;

    debug!(
        participant = %participant.id,
        estimate,
        delta,
        manual_pool = proposed,
        "Manual estimate committed"
    );
    Ok(Transition::ManualSet { estimate, delta })
}
