use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::ParticipantId;

/// Lowest accepted score.
pub const MIN_SCORE: u32 = 0;

/// Highest accepted score.
pub const MAX_SCORE: u32 = 10_000;

/// Clamp a raw score into `[MIN_SCORE, MAX_SCORE]`.
pub fn clamp_score(raw: i64) -> u32 {
    raw.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u32
}

/// How a participant's estimate is determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Proportional share of `total - reserved - manual`
    Allocated,
    /// Proportional share of the reserved sub-pool
    Reserved,
    /// Estimate entered directly; excluded from proportional splits
    Manual,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Allocated => "allocated",
            Category::Reserved => "reserved",
            Category::Manual => "manual",
        }
    }

    /// Target of the "cycle category" action.
    ///
    /// Leaving `Manual` always lands on `Allocated`; there is no direct
    /// path from `Manual` to `Reserved`.
    pub fn cycled(&self) -> Category {
        match self {
            Category::Allocated => Category::Reserved,
            Category::Reserved => Category::Allocated,
            Category::Manual => Category::Allocated,
        }
    }

    pub fn is_proportional(&self) -> bool {
        !matches!(self, Category::Manual)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category chosen by the add-mode toggle when creating a participant.
///
/// `Manual` is deliberately absent: it is only reachable by editing an
/// estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddCategory {
    #[default]
    Allocated,
    Reserved,
}

impl From<AddCategory> for Category {
    fn from(value: AddCategory) -> Self {
        match value {
            AddCategory::Allocated => Category::Allocated,
            AddCategory::Reserved => Category::Reserved,
        }
    }
}

/// A roster member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Trimmed, unique within the roster (exact, case-sensitive match)
    pub name: String,
    pub category: Category,
    /// Always within `[MIN_SCORE, MAX_SCORE]`; `0` while `Manual`
    pub score: u32,
    /// Monetary share at full precision. Display truncates it.
    pub estimate: f64,
}

impl Participant {
    pub fn new(name: impl Into<String>, score: u32, category: Category) -> Self {
        Self {
            id: ParticipantId::generate(),
            name: name.into(),
            category,
            score,
            estimate: 0.0,
        }
    }

    pub fn is_manual(&self) -> bool {
        self.category == Category::Manual
    }
}
