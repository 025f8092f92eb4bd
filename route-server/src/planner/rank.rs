//! Route scoring and ranking.
//!
//! A completed route is scored from three sub-scores, each in `(0, 1]`:
//! time `1/(1 + hours)`, cost `1/(1 + cost/scale)`, and reliability. The
//! preference decides how they are weighted.

use crate::domain::{RouteCandidate, ScoreWeights};

/// Weighted sum of the time, cost and reliability sub-scores.
///
/// Higher is better.
pub fn score(
    total_duration_hours: f64,
    total_cost: f64,
    reliability: f64,
    weights: ScoreWeights,
    cost_scale: f64,
) -> f64 {
    let time_score = 1.0 / (1.0 + total_duration_hours);
    let cost_score = 1.0 / (1.0 + total_cost / cost_scale);
    weights.time * time_score + weights.cost * cost_score + weights.reliability * reliability
}

/// Rank candidates by score, best first.
///
/// The sort is stable: equal scores keep their input order, which is the
/// order paths were enumerated in.
pub fn rank_candidates(mut candidates: Vec<RouteCandidate>) -> Vec<RouteCandidate> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{NodeId, Preference, Route, Segment, TransportMode};
    use proptest::prelude::*;

    fn candidate(tag: usize, score: f64) -> RouteCandidate {
        let segment = Segment {
            mode: TransportMode::Road,
            from: NodeId::parse("A").unwrap(),
            to: NodeId::parse(&format!("B{tag}")).unwrap(),
            distance_km: 1.0,
            duration_hours: 1.0,
            cost: 1.0,
        };
        RouteCandidate {
            route: Route::new(vec![segment]).unwrap(),
            reliability_score: 0.96,
            score,
        }
    }

    fn preference_strategy() -> impl Strategy<Value = Preference> {
        prop_oneof![
            Just(Preference::Time),
            Just(Preference::Cost),
            Just(Preference::Balanced),
        ]
    }

    proptest! {
        #[test]
        fn rank_is_sorted(scores in prop::collection::vec(0.0f64..1.0, 0..20)) {
            let candidates = scores
                .iter()
                .enumerate()
                .map(|(i, &s)| candidate(i, s))
                .collect();
            let ranked = rank_candidates(candidates);

            prop_assert_eq!(ranked.len(), scores.len());
            for window in ranked.windows(2) {
                prop_assert!(window[0].score >= window[1].score);
            }
        }

        /// Score is within (0, 1] for non-negative totals and reliability in [0.5, 1]
        #[test]
        fn score_bounded(
            hours in 0.0f64..1000.0,
            cost in 0.0f64..1e7,
            reliability in 0.5f64..=1.0,
            preference in preference_strategy(),
        ) {
            let s = score(hours, cost, reliability, preference.score_weights(), 1000.0);
            prop_assert!(s > 0.0);
            prop_assert!(s <= 1.0 + 1e-12);
        }

        /// Slower is never better, all else equal
        #[test]
        fn score_monotone_in_time(
            hours in 0.0f64..100.0,
            extra in 0.0f64..100.0,
            cost in 0.0f64..1e5,
            preference in preference_strategy(),
        ) {
            let weights = preference.score_weights();
            prop_assert!(
                score(hours + extra, cost, 0.9, weights, 1000.0)
                    <= score(hours, cost, 0.9, weights, 1000.0)
            );
        }
    }
}
