//! # share-engine
//!
//! The allocation core of the share calculator.
//!
//! - **Money pool** ([`MoneyPool`]): total pool, reserved sub-pool and the
//!   running manual sub-pool, with their bounds
//! - **Roster** ([`Roster`]): ordered participants, name uniqueness,
//!   toggling stable sort
//! - **Category state machine** ([`category`]): cycle and manual-entry
//!   transitions with their pool side effects
//! - **Allocation** ([`allocation::recompute`]): pure, idempotent
//!   proportional split of both sub-pools
//! - **Session** ([`ShareSession`]): owns the snapshot; every mutation is
//!   validated, recomputed, invariant-checked and swapped in whole
//!
//! ## Invariants
//!
//! - Allocated estimates sum to `total - reserved - manual` and reserved
//!   estimates sum to `reserved`, unless the group's score total is zero
//!   (estimates then keep their last value).
//! - `manual` equals the sum of manual estimates and never pushes the
//!   unallocated remainder below zero.
//! - A refused operation leaves the snapshot untouched.

pub mod action;
pub mod allocation;
pub mod category;
pub mod config;
pub mod input;
pub mod invariants;
pub mod pool;
pub mod roster;
pub mod session;

pub use action::{Action, Applied};
pub use allocation::{recompute, GroupTotals};
pub use category::Transition;
pub use config::{SessionConfig, DEFAULT_TOTAL_POOL};
pub use input::{parse_number, parse_score};
pub use pool::MoneyPool;
pub use roster::Roster;
pub use session::ShareSession;

pub use share_types::*;
