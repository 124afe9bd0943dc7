//! Result Aggregator: confidence is the mean of the top three scored
//! outcomes (fewer if fewer agents ran), and failed outcomes never enter
//! the scoring set even though they still appear in `agents_used`.

use orchestrator_core::aggregator::AgentOutcome;
use orchestrator_core::aggregate;

fn outcome(name: &str, confidence: f32, failed: bool) -> AgentOutcome {
    AgentOutcome {
        agent_name: name.to_string(),
        failed,
        text: format!("{name} reply"),
        self_confidence: confidence,
        declared_skills: Vec::new(),
        tool_calls_made: 0,
    }
}

#[test]
fn confidence_is_the_weighted_mean_of_the_top_three_scores() {
    let outcomes = vec![
        outcome("a", 0.9, false),
        outcome("b", 0.8, false),
        outcome("c", 0.5, false),
        outcome("d", 0.1, false),
    ];
    let result = aggregate(&outcomes, &[]).unwrap();

    let expected = (0.9 + 0.8 + 0.5) / 3.0;
    assert!(
        (result.confidence - expected).abs() < 1e-6,
        "expected {expected}, got {}",
        result.confidence
    );
    assert_eq!(result.primary_text, "a reply");
}

#[test]
fn confidence_averages_over_fewer_than_three_when_only_two_outcomes_ran() {
    let outcomes = vec![outcome("a", 0.6, false), outcome("b", 0.4, false)];
    let result = aggregate(&outcomes, &[]).unwrap();

    let expected = (0.6 + 0.4) / 2.0;
    assert!((result.confidence - expected).abs() < 1e-6);
}

#[test]
fn failed_outcomes_are_excluded_from_the_score_but_kept_in_agents_used() {
    let outcomes = vec![outcome("flaky", 0.99, true), outcome("solid", 0.4, false)];
    let result = aggregate(&outcomes, &[]).unwrap();

    assert_eq!(result.primary_text, "solid reply");
    assert!((result.confidence - 0.4).abs() < 1e-6);
    assert_eq!(result.agents_used, vec!["flaky".to_string(), "solid".to_string()]);
}
