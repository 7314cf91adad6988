//! Share session: the single owner of the pool and roster snapshot.
//!
//! Each mutating operation works on a copy of the snapshot, recomputes all
//! estimates, checks the invariants and only then replaces the current
//! snapshot. A rejected operation therefore has no visible effect.

use share_types::{
    clamp_score, AddCategory, Participant, ParticipantId, ShareResult, SortDirection, SortField,
};
use tracing::{debug, info};

use crate::allocation::{recompute, GroupTotals};
use crate::category::{self, Transition};
use crate::config::SessionConfig;
use crate::invariants;
use crate::pool::MoneyPool;
use crate::roster::Roster;

#[derive(Clone, Debug, Default)]
pub struct ShareSession {
    config: SessionConfig,
    pool: MoneyPool,
    roster: Roster,
}

impl ShareSession {
    /// Session with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SessionConfig) -> ShareResult<Self> {
        let pool = config.initial_pool()?;
        info!(
            total_pool = pool.total(),
            reserved_pool = pool.reserved(),
            "Share session created"
        );
        Ok(Self {
            config,
            pool,
            roster: Roster::new(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn pool(&self) -> &MoneyPool {
        &self.pool
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn participants(&self) -> &[Participant] {
        self.roster.participants()
    }

    pub fn participant(&self, id: ParticipantId) -> ShareResult<&Participant> {
        self.roster.get(id)
    }

    /// Id of the participant currently at a zero-based row.
    pub fn id_at(&self, index: usize) -> Option<ParticipantId> {
        self.roster.at(index).map(|p| p.id)
    }

    pub fn totals(&self) -> GroupTotals {
        GroupTotals::of(self.participants())
    }

    /// Run `op` against a copy of the snapshot and swap the result in.
    fn transition<T>(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut MoneyPool, &mut Roster) -> ShareResult<T>,
    ) -> ShareResult<T> {
        let mut pool = self.pool.clone();
        let mut roster = self.roster.clone();

        let outcome = f(&mut pool, &mut roster).map_err(|e| {
            debug!(op, error = %e, "Operation rejected");
            e
        })?;

        let recomputed = recompute(&pool, roster.participants());
        roster.replace_participants(recomputed);
        invariants::check(&pool, roster.participants()).map_err(|e| {
            debug!(op, error = %e, "Snapshot failed invariant check");
            e
        })?;

        self.pool = pool;
        self.roster = roster;
        debug!(
            op,
            participants = self.roster.len(),
            total_pool = self.pool.total(),
            reserved_pool = self.pool.reserved(),
            manual_pool = self.pool.manual(),
            "Snapshot committed"
        );
        Ok(outcome)
    }

    pub fn set_total_pool(&mut self, value: f64) -> ShareResult<()> {
        self.transition("set_total_pool", |pool, _| pool.set_total(value))
    }

    pub fn set_reserved_pool(&mut self, value: f64) -> ShareResult<()> {
        self.transition("set_reserved_pool", |pool, _| pool.set_reserved(value))
    }

    /// Add a participant with a raw score (clamped to the score range).
    pub fn add_participant(
        &mut self,
        name: &str,
        score: i64,
        category: AddCategory,
    ) -> ShareResult<ParticipantId> {
        let score = clamp_score(score);
        self.transition("add_participant", |_, roster| {
            roster.insert(name, score, category.into())
        })
    }

    /// Add a participant in the configured default category.
    pub fn add_with_default_category(
        &mut self,
        name: &str,
        score: i64,
    ) -> ShareResult<ParticipantId> {
        let category = self.config.default_category;
        self.add_participant(name, score, category)
    }

    pub fn rename_participant(&mut self, id: ParticipantId, name: &str) -> ShareResult<()> {
        self.transition("rename_participant", |_, roster| roster.rename(id, name))
    }

    /// Set a raw score (clamped). Refused for manual participants.
    pub fn set_score(&mut self, id: ParticipantId, score: i64) -> ShareResult<()> {
        let score = clamp_score(score);
        self.transition("set_score", |_, roster| roster.set_score(id, score))
    }

    /// Enter an estimate directly, making the participant manual.
    pub fn set_estimate(&mut self, id: ParticipantId, estimate: f64) -> ShareResult<Transition> {
        self.transition("set_estimate", |pool, roster| {
            let participant = roster.get_mut(id)?;
            category::set_manual_estimate(pool, participant, estimate)
        })
    }

    pub fn cycle_category(&mut self, id: ParticipantId) -> ShareResult<Transition> {
        self.transition("cycle_category", |pool, roster| {
            let participant = roster.get_mut(id)?;
            Ok(category::cycle(pool, participant))
        })
    }

    /// Remove a participant, retracting a manual estimate from the pool.
    pub fn delete_participant(&mut self, id: ParticipantId) -> ShareResult<Participant> {
        self.transition("delete_participant", |pool, roster| {
            let removed = roster.remove(id)?;
            if removed.is_manual() {
                pool.retract_manual(removed.estimate);
            }
            Ok(removed)
        })
    }

    /// Reorder the roster. Amounts are untouched, so no allocation pass runs.
    pub fn sort_by(&mut self, field: SortField) -> SortDirection {
        let direction = self.roster.sort_by(field);
        debug!(field = %field, direction = %direction, "Roster sorted");
        direction
    }
}
