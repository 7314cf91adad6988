//! # share-types
//!
//! Domain types for the share calculator:
//!
//! - **Participant**: a named member of the roster with a score, a
//!   category and a monetary estimate
//! - **Category**: `Allocated` (splits the unreserved remainder),
//!   `Reserved` (splits the reserved sub-pool) or `Manual` (fixed by
//!   direct entry)
//! - **Sort keys**: the four sortable columns and their direction
//! - **ShareError**: every reason an operation can be refused
//!
//! Participants are addressed by [`ParticipantId`], which is assigned at
//! creation and survives renames, sorts and deletes of other entries.

pub mod error;
pub mod ids;
pub mod participant;
pub mod sort;

pub use error::{ShareError, ShareResult};
pub use ids::ParticipantId;
pub use participant::{clamp_score, AddCategory, Category, Participant, MAX_SCORE, MIN_SCORE};
pub use sort::{SortDirection, SortField};
