//! Roster: ordered participants with unique names.
//!
//! The roster never touches money amounts on its own. Estimates are written
//! back wholesale by the session after each allocation pass.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use share_types::{
    Category, Participant, ParticipantId, ShareError, ShareResult, SortDirection, SortField,
};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
    /// Last sort applied; any other field starts ascending again
    last_sort: Option<(SortField, SortDirection)>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn get(&self, id: ParticipantId) -> ShareResult<&Participant> {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .ok_or(ShareError::UnknownParticipant(id))
    }

    pub(crate) fn get_mut(&mut self, id: ParticipantId) -> ShareResult<&mut Participant> {
        self.participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ShareError::UnknownParticipant(id))
    }

    /// Current position of a participant. Shifts on delete and sort.
    pub fn position(&self, id: ParticipantId) -> Option<usize> {
        self.participants.iter().position(|p| p.id == id)
    }

    /// Participant at a zero-based position.
    pub fn at(&self, index: usize) -> Option<&Participant> {
        self.participants.get(index)
    }

    pub fn last_sort(&self) -> Option<(SortField, SortDirection)> {
        self.last_sort
    }

    /// Trim `raw` and check it against every participant except `except`.
    fn validate_name(&self, raw: &str, except: Option<ParticipantId>) -> ShareResult<String> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ShareError::EmptyName);
        }
        let taken = self
            .participants
            .iter()
            .any(|p| Some(p.id) != except && p.name == name);
        if taken {
            return Err(ShareError::DuplicateName(name.to_string()));
        }
        Ok(name.to_string())
    }

    /// Append a participant. The score must already be clamped.
    pub fn insert(
        &mut self,
        name: &str,
        score: u32,
        category: Category,
    ) -> ShareResult<ParticipantId> {
        let name = self.validate_name(name, None)?;
        let participant = Participant::new(name, score, category);
        let id = participant.id;
        self.participants.push(participant);
        Ok(id)
    }

    pub fn rename(&mut self, id: ParticipantId, raw: &str) -> ShareResult<()> {
        let name = self.validate_name(raw, Some(id))?;
        self.get_mut(id)?.name = name;
        Ok(())
    }

    /// Set a clamped score. Manual participants keep their locked score.
    pub fn set_score(&mut self, id: ParticipantId, score: u32) -> ShareResult<()> {
        let participant = self.get_mut(id)?;
        if participant.is_manual() {
            return Err(ShareError::ScoreLocked(id));
        }
        participant.score = score;
        Ok(())
    }

    pub fn remove(&mut self, id: ParticipantId) -> ShareResult<Participant> {
        let index = self
            .position(id)
            .ok_or(ShareError::UnknownParticipant(id))?;
        Ok(self.participants.remove(index))
    }

    /// Stable sort on `field`.
    ///
    /// Ascending the first time a field is chosen, then alternating while
    /// the same field is chosen again.
    pub fn sort_by(&mut self, field: SortField) -> SortDirection {
        let direction = match self.last_sort {
            Some((last, dir)) if last == field => dir.flipped(),
            _ => SortDirection::Ascending,
        };

        match direction {
            SortDirection::Ascending => self.participants.sort_by(|a, b| compare(field, a, b)),
            SortDirection::Descending => self.participants.sort_by(|a, b| compare(field, b, a)),
        }

        self.last_sort = Some((field, direction));
        direction
    }

    /// Swap in recomputed participants. Order and ids must be unchanged.
    pub(crate) fn replace_participants(&mut self, participants: Vec<Participant>) {
        debug_assert_eq!(participants.len(), self.participants.len());
        self.participants = participants;
    }
}

fn compare(field: SortField, a: &Participant, b: &Participant) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Category => a.category.as_str().cmp(b.category.as_str()),
        SortField::Score => a.score.cmp(&b.score),
        SortField::Estimate => a.estimate.total_cmp(&b.estimate),
    }
}
