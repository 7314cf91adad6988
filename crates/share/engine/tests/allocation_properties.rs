//! Property tests: conservation, idempotence and roster bookkeeping.

use proptest::prelude::*;
use share_engine::{
    recompute, AddCategory, Category, GroupTotals, ParticipantId, SessionConfig, ShareSession,
    SortField,
};

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

fn arb_add_category() -> impl Strategy<Value = AddCategory> {
    prop_oneof![Just(AddCategory::Allocated), Just(AddCategory::Reserved)]
}

/// Session with a random pool and up to `max` participants.
fn arb_session(max: usize) -> impl Strategy<Value = ShareSession> {
    (
        1.0f64..1.0e9,
        0.0f64..1.0,
        prop::collection::vec((0i64..=10_000, arb_add_category()), 0..max),
    )
        .prop_map(|(total, reserved_share, entries)| {
            let mut s = ShareSession::with_config(SessionConfig {
                initial_total_pool: total,
                initial_reserved_pool: total * reserved_share,
                ..Default::default()
            })
            .unwrap();
            for (i, (score, category)) in entries.into_iter().enumerate() {
                s.add_participant(&format!("p{}", i), score, category).unwrap();
            }
            s
        })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Each proportional group sums to its sub-pool.
    #[test]
    fn groups_conserve_their_pools(s in arb_session(12)) {
        let totals = GroupTotals::of(s.participants());
        if totals.allocated_score > 0 {
            prop_assert!(close(totals.allocated_sum, s.pool().remainder()));
        }
        if totals.reserved_score > 0 {
            prop_assert!(close(totals.reserved_sum, s.pool().reserved()));
        }
    }

    /// A second allocation pass changes nothing.
    #[test]
    fn recompute_is_idempotent(s in arb_session(12)) {
        let once = recompute(s.pool(), s.participants());
        let twice = recompute(s.pool(), &once);
        prop_assert_eq!(once, twice);
    }

    /// Adding an existing name leaves the roster as it was.
    #[test]
    fn duplicate_add_is_refused(s in arb_session(8), score in 0i64..100) {
        let mut s = s;
        prop_assume!(!s.participants().is_empty());
        let before = s.participants().to_vec();
        let name = before[0].name.clone();

        prop_assert!(s.add_participant(&name, score, AddCategory::Allocated).is_err());
        prop_assert_eq!(s.participants(), before.as_slice());
    }

    /// Deleting shrinks the roster by one and retracts manual estimates exactly.
    #[test]
    fn delete_accounts_for_manual(
        s in arb_session(8),
        pick in any::<prop::sample::Index>(),
        fraction in 0.0f64..1.0,
    ) {
        let mut s = s;
        prop_assume!(!s.participants().is_empty());
        let id = s.participants()[pick.index(s.participants().len())].id;

        let room = s.pool().total() - s.pool().reserved() - s.pool().manual();
        s.set_estimate(id, room * fraction).unwrap();
        prop_assert_eq!(s.participant(id).unwrap().category, Category::Manual);

        let n = s.participants().len();
        let manual_before = s.pool().manual();
        let removed = s.delete_participant(id).unwrap();

        prop_assert_eq!(s.participants().len(), n - 1);
        prop_assert!(close(s.pool().manual(), (manual_before - removed.estimate).max(0.0)));
    }

    /// Cycling twice from a proportional category returns to it; leaving
    /// manual lands on allocated with score one.
    #[test]
    fn cycle_round_trips(s in arb_session(8), pick in any::<prop::sample::Index>()) {
        let mut s = s;
        prop_assume!(!s.participants().is_empty());
        let id = s.participants()[pick.index(s.participants().len())].id;
        let start = s.participant(id).unwrap().category;

        s.cycle_category(id).unwrap();
        s.cycle_category(id).unwrap();
        prop_assert_eq!(s.participant(id).unwrap().category, start);

        s.set_estimate(id, 0.0).unwrap();
        let manual_before = s.pool().manual();
        s.cycle_category(id).unwrap();
        let p = s.participant(id).unwrap();
        prop_assert_eq!(p.category, Category::Allocated);
        prop_assert_eq!(p.score, 1);
        prop_assert!(close(s.pool().manual(), manual_before));
    }

    /// Sorting by score twice yields ascending then descending order,
    /// stable among equal scores.
    #[test]
    fn score_sort_toggles_and_is_stable(s in arb_session(16)) {
        let mut s = s;
        let initial: Vec<_> = s.participants().iter().map(|p| (p.id, p.score)).collect();
        let rank = |id: ParticipantId| initial.iter().position(|(o, _)| *o == id).unwrap();

        s.sort_by(SortField::Score);
        for w in s.participants().windows(2) {
            prop_assert!(w[0].score <= w[1].score);
            if w[0].score == w[1].score {
                prop_assert!(rank(w[0].id) < rank(w[1].id));
            }
        }

        let ascending: Vec<_> = s.participants().iter().map(|p| p.id).collect();
        let asc_rank = |id: ParticipantId| ascending.iter().position(|o| *o == id).unwrap();
        s.sort_by(SortField::Score);
        for w in s.participants().windows(2) {
            prop_assert!(w[0].score >= w[1].score);
            if w[0].score == w[1].score {
                prop_assert!(asc_rank(w[0].id) < asc_rank(w[1].id));
            }
        }
    }
}
