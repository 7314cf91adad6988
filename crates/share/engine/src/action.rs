//! User-facing commands carrying raw field input.
//!
//! A presentation layer builds an [`Action`] from whatever the user typed
//! and hands it to [`ShareSession::apply`]. Numeric fields stay strings
//! until here so that coercion rules live in one place.

use serde::{Deserialize, Serialize};
use share_types::{
    AddCategory, Participant, ParticipantId, ShareError, ShareResult, SortDirection, SortField,
};

use crate::category::Transition;
use crate::input::{parse_number, parse_score};
use crate::session::ShareSession;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    EditTotalPool {
        value: String,
    },
    EditReservedPool {
        value: String,
    },
    AddParticipant {
        name: String,
        score: String,
        /// Falls back to the session's configured default
        #[serde(default)]
        category: Option<AddCategory>,
    },
    RenameParticipant {
        participant: ParticipantId,
        name: String,
    },
    EditScore {
        participant: ParticipantId,
        score: String,
    },
    EditEstimate {
        participant: ParticipantId,
        estimate: String,
    },
    CycleCategory {
        participant: ParticipantId,
    },
    DeleteParticipant {
        participant: ParticipantId,
    },
    SortColumn {
        field: SortField,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::EditTotalPool { .. } => "edit_total_pool",
            Action::EditReservedPool { .. } => "edit_reserved_pool",
            Action::AddParticipant { .. } => "add_participant",
            Action::RenameParticipant { .. } => "rename_participant",
            Action::EditScore { .. } => "edit_score",
            Action::EditEstimate { .. } => "edit_estimate",
            Action::CycleCategory { .. } => "cycle_category",
            Action::DeleteParticipant { .. } => "delete_participant",
            Action::SortColumn { .. } => "sort_column",
        }
    }
}

/// Result of a successfully applied action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Applied {
    Changed,
    Added { participant: ParticipantId },
    Removed { participant: Participant },
    CategoryChanged { transition: Transition },
    Sorted { field: SortField, direction: SortDirection },
}

impl ShareSession {
    /// Dispatch an action to the matching typed operation.
    pub fn apply(&mut self, action: &Action) -> ShareResult<Applied> {
        match action {
            Action::EditTotalPool { value } => {
                self.set_total_pool(parse_number(value))?;
                Ok(Applied::Changed)
            }
            Action::EditReservedPool { value } => {
                self.set_reserved_pool(parse_number(value))?;
                Ok(Applied::Changed)
            }
            Action::AddParticipant {
                name,
                score,
                category,
            } => {
                let score = i64::from(parse_score(score)?);
                let category = category.unwrap_or(self.config().default_category);
                let participant = self.add_participant(name, score, category)?;
                Ok(Applied::Added { participant })
            }
            Action::RenameParticipant { participant, name } => {
                self.rename_participant(*participant, name)?;
                Ok(Applied::Changed)
            }
            Action::EditScore { participant, score } => {
                // Lock check comes first so a manual row never reports a parse error
                if self.participant(*participant)?.is_manual() {
                    return Err(ShareError::ScoreLocked(*participant));
                }
                let score = i64::from(parse_score(score)?);
                self.set_score(*participant, score)?;
                Ok(Applied::Changed)
            }
            Action::EditEstimate {
                participant,
                estimate,
            } => {
                let transition = self.set_estimate(*participant, parse_number(estimate))?;
                Ok(Applied::CategoryChanged { transition })
            }
            Action::CycleCategory { participant } => {
                let transition = self.cycle_category(*participant)?;
                Ok(Applied::CategoryChanged { transition })
            }
            Action::DeleteParticipant { participant } => {
                let participant = self.delete_participant(*participant)?;
                Ok(Applied::Removed { participant })
            }
            Action::SortColumn { field } => {
                let direction = self.sort_by(*field);
                Ok(Applied::Sorted {
                    field: *field,
                    direction,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use share_types::Category;

    fn session() -> ShareSession {
        ShareSession::with_config(SessionConfig {
            initial_total_pool: 1000.0,
            ..Default::default()
        })
        .unwrap()
    }

    fn add(s: &mut ShareSession, name: &str, score: &str) -> ParticipantId {
        match s
            .apply(&Action::AddParticipant {
                name: name.into(),
                score: score.into(),
                category: None,
            })
            .unwrap()
        {
            Applied::Added { participant } => participant,
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let mut s = session();
        s.apply(&Action::EditTotalPool {
            value: "2,000".into(),
        })
        .unwrap();
        assert_eq!(s.pool().total(), 2000.0);

        assert!(s
            .apply(&Action::EditTotalPool { value: "".into() })
            .is_err());
        assert!(s
            .apply(&Action::EditReservedPool {
                value: "lots".into()
            })
            .is_err());
        assert_eq!(s.pool().total(), 2000.0);
        assert_eq!(s.pool().reserved(), 0.0);
    }

    #[test]
    fn garbage_estimate_becomes_zero_manual() {
        let mut s = session();
        let a = add(&mut s, "A", "2");
        s.apply(&Action::EditEstimate {
            participant: a,
            estimate: "n/a".into(),
        })
        .unwrap();
        let p = s.participant(a).unwrap();
        assert_eq!(p.category, Category::Manual);
        assert_eq!(p.estimate, 0.0);
    }

    #[test]
    fn score_edit_on_manual_reports_lock() {
        let mut s = session();
        let a = add(&mut s, "A", "2");
        s.apply(&Action::EditEstimate {
            participant: a,
            estimate: "10".into(),
        })
        .unwrap();
        assert_eq!(
            s.apply(&Action::EditScore {
                participant: a,
                score: "junk".into()
            }),
            Err(ShareError::ScoreLocked(a))
        );
    }

    #[test]
    fn sort_reports_direction() {
        let mut s = session();
        add(&mut s, "A", "1");
        let action = Action::SortColumn {
            field: SortField::Score,
        };
        assert_eq!(
            s.apply(&action).unwrap(),
            Applied::Sorted {
                field: SortField::Score,
                direction: SortDirection::Ascending
            }
        );
        assert_eq!(
            s.apply(&action).unwrap(),
            Applied::Sorted {
                field: SortField::Score,
                direction: SortDirection::Descending
            }
        );
    }

    #[test]
    fn actions_deserialize_from_script_json() {
        let json = r#"[
            {"action": "edit_total_pool", "value": "1000"},
            {"action": "add_participant", "name": "A", "score": "1"},
            {"action": "add_participant", "name": "B", "score": "3", "category": "allocated"},
            {"action": "sort_column", "field": "estimate"}
        ]"#;
        let actions: Vec<Action> = serde_json::from_str(json).unwrap();
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[1].name(), "add_participant");

        let mut s = ShareSession::new();
        for action in &actions {
            s.apply(action).unwrap();
        }
        let estimates: Vec<f64> = s.participants().iter().map(|p| p.estimate).collect();
        assert_eq!(estimates, vec![250.0, 750.0]);
    }
}
