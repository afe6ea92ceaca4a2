use std::sync::Arc;

use parley::negotiation::{
    Decision, ExchangeScores, NegotiationErrorKind, NegotiationKind, NegotiationTuning,
    OFFERED_PRICE_SLOT, SessionStatus, TerminationReason, TurnOutcome,
};

use super::{
    FailingScoreProvider, ScriptedScoreProvider, categorical_claim, numeric_claim,
    orchestrator_with, report, scores,
};

fn wide_tuning(turn_budget: u32) -> NegotiationTuning {
    // Thresholds pushed out so only the rule under test can fire.
    NegotiationTuning {
        success_threshold: 0.01,
        failure_threshold: 0.99,
        provisional_accept_threshold: 0.10,
        turn_budget,
        ..NegotiationTuning::interrogation_defaults()
    }
}

#[tokio::test]
async fn given_turn_budget_n_when_advanced_n_times_then_session_is_resolved() {
    let provider = Arc::new(ScriptedScoreProvider::new(Vec::new()));
    let orchestrator = orchestrator_with(provider, wide_tuning(3), wide_tuning(3));
    let mut session = orchestrator.open_session("budget-case", NegotiationKind::Interrogation);
    session.suspicion = 0.5;
    session.personality.base_suspicion = 0.5;

    for turn in 1..3 {
        let outcome = orchestrator
            .advance(&mut session, "I'm here for my ship, like I said.")
            .await
            .expect("advance should succeed");
        assert!(
            matches!(outcome, TurnOutcome::Continue { .. }),
            "turn {turn} should continue"
        );
    }

    let outcome = orchestrator
        .advance(&mut session, "I'm here for my ship, like I said.")
        .await
        .expect("advance should succeed");
    match outcome {
        TurnOutcome::Resolved(result) => {
            assert_eq!(result.reason, TerminationReason::TurnBudgetExhausted);
            assert_eq!(result.summary.turns_taken, 3);
        }
        TurnOutcome::Continue { .. } => panic!("budget must force termination"),
    }
    assert!(!session.is_open());
}

#[tokio::test]
async fn given_resolved_session_when_advanced_then_invalid_state_error() {
    let provider = Arc::new(ScriptedScoreProvider::new(Vec::new()));
    let orchestrator = orchestrator_with(provider, wide_tuning(1), wide_tuning(1));
    let mut session = orchestrator.open_session("frozen-case", NegotiationKind::Interrogation);
    session.suspicion = 0.5;
    session.personality.base_suspicion = 0.5;

    orchestrator
        .advance(&mut session, "Final answer.")
        .await
        .expect("advance should succeed");
    assert!(matches!(session.status, SessionStatus::Resolved(_)));
    let turns_before = session.turns.len();

    let err = orchestrator
        .advance(&mut session, "One more thing...")
        .await
        .expect_err("resolved sessions must reject turns");
    assert_eq!(err.kind, NegotiationErrorKind::SessionResolved);
    assert_eq!(session.turns.len(), turns_before, "no re-scoring allowed");
}

#[tokio::test]
async fn given_empty_response_when_advanced_then_rejected_without_consuming_turn() {
    let provider = Arc::new(ScriptedScoreProvider::new(Vec::new()));
    let orchestrator = orchestrator_with(provider, wide_tuning(3), wide_tuning(3));
    let mut session = orchestrator.open_session("empty-case", NegotiationKind::Interrogation);
    let budget_before = session.turn_budget;

    let err = orchestrator
        .advance(&mut session, "   ")
        .await
        .expect_err("empty input must be rejected");
    assert_eq!(err.kind, NegotiationErrorKind::InvalidResponse);
    assert!(session.turns.is_empty());
    assert_eq!(session.turn_budget, budget_before);
    assert!(session.is_open());
}

#[tokio::test]
async fn given_oversized_response_when_advanced_then_rejected_without_mutation() {
    let provider = Arc::new(ScriptedScoreProvider::new(Vec::new()));
    let orchestrator = orchestrator_with(provider, wide_tuning(3), wide_tuning(3));
    let mut session = orchestrator.open_session("oversize-case", NegotiationKind::Interrogation);

    let oversized = "a".repeat(2001);
    let err = orchestrator
        .advance(&mut session, &oversized)
        .await
        .expect_err("oversized input must be rejected");
    assert_eq!(err.kind, NegotiationErrorKind::InvalidResponse);
    assert!(session.turns.is_empty());
}

#[tokio::test]
async fn given_three_contradictions_in_one_turn_then_immediate_unfavorable_outcome() {
    let turn_one = report(
        scores(0.8, 0.8, 0.9, 0.9),
        vec![
            categorical_claim("claimed-identity", "reyes"),
            categorical_claim("claimed-identity", "vale"),
            categorical_claim("claimed-ship-type", "scout ship"),
            categorical_claim("claimed-ship-type", "cargo freighter"),
            categorical_claim("claimed-registration", "tx-100"),
            categorical_claim("claimed-registration", "tx-200"),
        ],
    );
    let provider = Arc::new(ScriptedScoreProvider::new(vec![turn_one]));
    let orchestrator = orchestrator_with(provider, wide_tuning(5), wide_tuning(5));
    let mut session = orchestrator.open_session("overload-case", NegotiationKind::Interrogation);
    session.suspicion = 0.5;
    session.personality.base_suspicion = 0.5;

    let outcome = orchestrator
        .advance(&mut session, "I'm Captain Reyes. No wait, Vale.")
        .await
        .expect("advance should succeed");
    match outcome {
        TurnOutcome::Resolved(result) => {
            assert_eq!(result.decision, Decision::Denied);
            assert_eq!(result.reason, TerminationReason::ContradictionOverload);
            assert_eq!(result.summary.turns_taken, 1, "no waiting for the budget");
        }
        TurnOutcome::Continue { .. } => panic!("hard cap breach must terminate immediately"),
    }
}

#[tokio::test]
async fn given_haggling_scenario_when_budget_runs_out_then_rejected() {
    // Turn 1: strong consistency, weak persuasion, an opening offer.
    // Turn 2: conflicting offer triggers one contradiction and firmness
    // rises. Turns 3-5: steady but never good enough.
    let script = vec![
        report(
            scores(0.2, 0.3, 0.9, 0.8),
            vec![numeric_claim(OFFERED_PRICE_SLOT, 100.0)],
        ),
        report(
            scores(0.3, 0.3, 0.4, 0.4),
            vec![numeric_claim(OFFERED_PRICE_SLOT, 150.0)],
        ),
        report(scores(0.5, 0.5, 0.9, 0.8), Vec::new()),
        report(scores(0.5, 0.5, 0.9, 0.8), Vec::new()),
        report(scores(0.5, 0.5, 0.9, 0.8), Vec::new()),
    ];
    let provider = Arc::new(ScriptedScoreProvider::new(script));
    let haggling_tuning = NegotiationTuning {
        success_threshold: 0.30,
        failure_threshold: 0.95,
        provisional_accept_threshold: 0.10,
        turn_budget: 5,
        ..NegotiationTuning::haggling_defaults()
    };
    let orchestrator = orchestrator_with(
        provider,
        NegotiationTuning::interrogation_defaults(),
        haggling_tuning,
    );
    let mut session = orchestrator.open_session("haggle-demo", NegotiationKind::Haggling);
    session.suspicion = 0.6;
    session.personality.base_suspicion = 0.5;

    let outcome = orchestrator
        .advance(&mut session, "I'll give you 100 credits for the lot.")
        .await
        .expect("turn 1 should apply");
    assert!(matches!(outcome, TurnOutcome::Continue { .. }));
    let after_turn_one = session.suspicion;
    assert!(after_turn_one < 0.6, "firmness should ease off slightly");

    let outcome = orchestrator
        .advance(&mut session, "Fine, 150 credits, that was always my offer.")
        .await
        .expect("turn 2 should apply");
    assert!(matches!(outcome, TurnOutcome::Continue { .. }));
    assert_eq!(session.turns[1].contradictions.len(), 1);
    assert!(
        session.suspicion > after_turn_one,
        "a contradicted offer should harden the trader"
    );

    for _ in 0..2 {
        let outcome = orchestrator
            .advance(&mut session, "It's a fair price for dock-grade goods.")
            .await
            .expect("mid turns should apply");
        assert!(matches!(outcome, TurnOutcome::Continue { .. }));
    }

    let outcome = orchestrator
        .advance(&mut session, "Take it or leave it.")
        .await
        .expect("final turn should apply");
    match outcome {
        TurnOutcome::Resolved(result) => {
            assert_eq!(result.decision, Decision::Rejected);
            assert_eq!(result.reason, TerminationReason::TurnBudgetExhausted);
        }
        TurnOutcome::Continue { .. } => panic!("budget exhaustion must settle the session"),
    }
}

#[tokio::test]
async fn given_failing_provider_when_advanced_then_fallback_scores_the_turn() {
    let orchestrator = orchestrator_with(
        Arc::new(FailingScoreProvider),
        wide_tuning(3),
        wide_tuning(3),
    );
    let mut session = orchestrator.open_session("fallback-case", NegotiationKind::Interrogation);
    session.suspicion = 0.5;
    session.personality.base_suspicion = 0.5;

    let outcome = orchestrator
        .advance(&mut session, "My registration is ZX-4410, check your records.")
        .await
        .expect("fallback must keep the negotiation moving");
    assert!(matches!(outcome, TurnOutcome::Continue { .. }));
    assert_eq!(session.turns[0].provider_id, "heuristic");
    let turn_scores: ExchangeScores = session.turns[0].scores;
    for value in [
        turn_scores.persuasiveness,
        turn_scores.confidence,
        turn_scores.consistency,
        turn_scores.believability,
    ] {
        assert!((0.0..=1.0).contains(&value), "scores must always be set");
    }
}
