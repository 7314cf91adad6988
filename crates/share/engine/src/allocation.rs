//! Proportional allocation of the money pool over the roster.

use serde::{Deserialize, Serialize};
use share_types::{Category, Participant};

use crate::pool::MoneyPool;

/// Recompute every proportional estimate in one pass.
///
/// - `Allocated`: `score / allocated_score * (total - reserved - manual)`
/// - `Reserved`: `score / reserved_score * reserved`
/// - `Manual`: untouched
///
/// A group whose score total is zero keeps its previous estimates. The
/// output depends only on the pool, the scores and the categories, so a
/// second pass over the result changes nothing.
pub fn recompute(pool: &MoneyPool, participants: &[Participant]) -> Vec<Participant> {
    let totals = GroupTotals::of(participants);
    let remainder = pool.remainder();
    let reserved = pool.reserved();

    participants
        .iter()
        .map(|p| {
            let mut next = p.clone();
            match p.category {
                Category::Allocated if totals.allocated_score > 0 => {
                    next.estimate = share(p.score, totals.allocated_score, remainder);
                }
                Category::Reserved if totals.reserved_score > 0 => {
                    next.estimate = share(p.score, totals.reserved_score, reserved);
                }
                _ => {}
            }
            next
        })
        .collect()
}

fn share(score: u32, group_score: u64, amount: f64) -> f64 {
    score as f64 / group_score as f64 * amount
}

/// Per-category score and estimate sums.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupTotals {
    pub allocated_score: u64,
    pub reserved_score: u64,
    pub allocated_sum: f64,
    pub reserved_sum: f64,
    pub manual_sum: f64,
    pub manual_count: usize,
}

impl GroupTotals {
    pub fn of(participants: &[Participant]) -> Self {
        participants
            .iter()
            .fold(GroupTotals::default(), |mut acc, p| {
                match p.category {
                    Category::Allocated => {
                        acc.allocated_score += u64::from(p.score);
                        acc.allocated_sum += p.estimate;
                    }
                    Category::Reserved => {
                        acc.reserved_score += u64::from(p.score);
                        acc.reserved_sum += p.estimate;
                    }
                    Category::Manual => {
                        acc.manual_sum += p.estimate;
                        acc.manual_count += 1;
                    }
                }
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(name: &str, score: u32, category: Category) -> Participant {
        Participant::new(name, score, category)
    }

    #[test]
    fn splits_allocated_by_score() {
        let pool = MoneyPool::new(1000.0, 0.0).unwrap();
        let out = recompute(
            &pool,
            &[
                participant("A", 1, Category::Allocated),
                participant("B", 3, Category::Allocated),
            ],
        );
        assert_eq!(out[0].estimate, 250.0);
        assert_eq!(out[1].estimate, 750.0);
    }

    #[test]
    fn reserved_group_splits_reserved_pool() {
        let pool = MoneyPool::new(1000.0, 400.0).unwrap();
        let out = recompute(
            &pool,
            &[
                participant("A", 1, Category::Allocated),
                participant("B", 1, Category::Reserved),
                participant("C", 3, Category::Reserved),
            ],
        );
        assert_eq!(out[0].estimate, 600.0);
        assert_eq!(out[1].estimate, 100.0);
        assert_eq!(out[2].estimate, 300.0);
    }

    #[test]
    fn zero_score_group_keeps_previous_estimates() {
        let pool = MoneyPool::new(1000.0, 500.0).unwrap();
        let mut stale = participant("A", 0, Category::Reserved);
        stale.estimate = 42.0;
        let out = recompute(&pool, &[stale]);
        assert_eq!(out[0].estimate, 42.0);
    }

    #[test]
    fn manual_estimates_are_untouched() {
        let pool = MoneyPool::new(1000.0, 0.0).unwrap();
        let mut manual = participant("M", 0, Category::Manual);
        manual.estimate = 123.5;
        let out = recompute(&pool, &[manual, participant("A", 2, Category::Allocated)]);
        assert_eq!(out[0].estimate, 123.5);
    }

    #[test]
    fn recompute_is_idempotent() {
        let pool = MoneyPool::new(999.0, 333.0).unwrap();
        let roster = vec![
            participant("A", 7, Category::Allocated),
            participant("B", 2, Category::Reserved),
            participant("C", 5, Category::Allocated),
        ];
        let once = recompute(&pool, &roster);
        let twice = recompute(&pool, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn totals_fold_by_category() {
        let mut m = participant("M", 0, Category::Manual);
        m.estimate = 10.0;
        let totals = GroupTotals::of(&[
            participant("A", 4, Category::Allocated),
            participant("B", 6, Category::Reserved),
            m,
        ]);
        assert_eq!(totals.allocated_score, 4);
        assert_eq!(totals.reserved_score, 6);
        assert_eq!(totals.manual_sum, 10.0);
        assert_eq!(totals.manual_count, 1);
    }
}
