//! Cross-checks between the roll, evaluate, explain and probability paths.

use hf_dice::{FixedSeedSource, SeedDirective, SeedResolver};
use hf_duality::{
    DualityRollRequest, DualityRoller, DualityRules, Outcome, OutcomeRequest, ProbabilityRequest,
    SAMPLE_SPACE, compute_probability, evaluate_outcome, explain_outcome,
};
use proptest::prelude::*;

fn outcome_requests() -> impl Strategy<Value = OutcomeRequest> {
    (
        1i32..=12,
        1i32..=12,
        -20i32..=20,
        prop::option::of(0i32..=40),
    )
        .prop_map(|(hope, fear, modifier, difficulty)| OutcomeRequest {
            hope,
            fear,
            modifier,
            difficulty,
        })
}

proptest! {
    #[test]
    fn explain_agrees_with_evaluate(request in outcome_requests()) {
        let evaluated = evaluate_outcome(&request).unwrap();
        let explained = explain_outcome(&request).unwrap();
        prop_assert_eq!(explained.outcome(), evaluated.outcome);
        prop_assert_eq!(&explained.result, &evaluated);
    }

    #[test]
    fn ties_are_exactly_the_crits(request in outcome_requests()) {
        let result = evaluate_outcome(&request).unwrap();
        prop_assert_eq!(
            request.hope == request.fear,
            result.outcome == Outcome::CriticalSuccess
        );
    }

    #[test]
    fn result_invariants(request in outcome_requests()) {
        let r = evaluate_outcome(&request).unwrap();
        prop_assert_eq!(r.total, i64::from(r.hope + r.fear + r.modifier));
        prop_assert_eq!(r.is_crit, r.hope == r.fear);
        prop_assert_eq!(r.meets_difficulty.is_some(), r.difficulty.is_some());
        if let (Some(d), Some(meets)) = (r.difficulty, r.meets_difficulty) {
            prop_assert_eq!(meets, r.total >= i64::from(d));
        }
    }

    #[test]
    fn probability_is_conserved(modifier in -30i32..=30, difficulty in 0i32..=40) {
        let r = compute_probability(&ProbabilityRequest { modifier, difficulty }).unwrap();
        prop_assert_eq!(r.total_outcomes, SAMPLE_SPACE);
        prop_assert_eq!(r.crit_count, 12);
        prop_assert_eq!(r.success_count + r.failure_count, SAMPLE_SPACE);
        prop_assert_eq!(
            r.outcome_counts.iter().map(|c| c.count).sum::<u32>(),
            SAMPLE_SPACE
        );
    }

    #[test]
    fn probability_tallies_the_evaluator(modifier in -30i32..=30, difficulty in 0i32..=40) {
        let r = compute_probability(&ProbabilityRequest { modifier, difficulty }).unwrap();
        for outcome in Outcome::ALL {
            let mut expected = 0;
            for hope in 1..=12 {
                for fear in 1..=12 {
                    let request = OutcomeRequest::new(hope, fear)
                        .with_modifier(modifier)
                        .with_difficulty(difficulty);
                    if evaluate_outcome(&request).unwrap().outcome == outcome {
                        expected += 1;
                    }
                }
            }
            prop_assert_eq!(r.count_of(outcome), expected);
        }
    }

    #[test]
    fn replay_reproduces_rolls(seed in 0i64..=i64::MAX, modifier in -5i32..=5) {
        let roller = DualityRoller::new(
            DualityRules::default(),
            SeedResolver::with_source(FixedSeedSource(seed)),
        );
        let request = DualityRollRequest {
            modifier,
            difficulty: Some(12),
            seed: SeedDirective::random(),
        };
        let first = roller.roll(&request).unwrap();
        let replayed = roller
            .roll(&DualityRollRequest {
                seed: SeedDirective::replay(seed as u64),
                ..request
            })
            .unwrap();
        prop_assert_eq!(first.outcome, replayed.outcome);
    }
}

#[test]
fn worked_examples() {
    let r = evaluate_outcome(
        &OutcomeRequest::new(8, 8)
            .with_modifier(2)
            .with_difficulty(15),
    )
    .unwrap();
    assert_eq!((r.total, r.is_crit, r.meets_difficulty), (18, true, Some(true)));
    assert_eq!(r.outcome, Outcome::CriticalSuccess);

    let r = evaluate_outcome(&OutcomeRequest::new(10, 4).with_difficulty(12)).unwrap();
    assert_eq!((r.total, r.meets_difficulty), (14, Some(true)));
    assert_eq!(r.outcome, Outcome::SuccessWithHope);

    let r = evaluate_outcome(
        &OutcomeRequest::new(3, 9)
            .with_modifier(-2)
            .with_difficulty(10),
    )
    .unwrap();
    assert_eq!((r.total, r.meets_difficulty), (10, Some(true)));
    assert_eq!(r.outcome, Outcome::SuccessWithFear);

    let r = evaluate_outcome(&OutcomeRequest::new(2, 5)).unwrap();
    assert_eq!(r.outcome, Outcome::RollWithFear);
    assert_eq!(r.meets_difficulty, None);
}

#[test]
fn every_pair_agrees_across_entry_points() {
    let rules = DualityRules::default();
    for difficulty in [None, Some(0), Some(12), Some(24)] {
        for hope in 1..=12 {
            for fear in 1..=12 {
                let request = OutcomeRequest {
                    hope,
                    fear,
                    modifier: 1,
                    difficulty,
                };
                let evaluated = rules.evaluate(&request).unwrap();
                let explained = rules.explain(&request).unwrap();
                assert_eq!(evaluated.outcome, explained.outcome());
                assert_eq!(hope == fear, evaluated.outcome.is_critical());
            }
        }
    }
}
