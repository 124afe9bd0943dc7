//! Result Aggregator: combines the outputs of one or more agents into a
//! single user-facing result. Pure given its inputs.

const TIE_EPSILON: f32 = 0.01;
const MAX_SUPPORTING_BULLETS: usize = 5;

#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub agent_name: String,
    pub failed: bool,
    pub text: String,
    pub self_confidence: f32,
    pub declared_skills: Vec<String>,
    pub tool_calls_made: u32,
}

#[derive(Debug, Clone)]
pub struct AggregatedResult {
    pub primary_text: String,
    pub supporting: Vec<String>,
    pub confidence: f32,
    pub agents_used: Vec<String>,
    pub aggregation: &'static str,
}

#[derive(Debug, Clone, Copy)]
struct Scored<'a> {
    outcome: &'a AgentOutcome,
    score: f32,
}

/// Scores each non-failed outcome as `self_confidence * task_relevance`,
/// picks the top scorer as primary, and folds deduped bullets from the rest
/// into `supporting`.
pub fn aggregate(outcomes: &[AgentOutcome], selected_skills: &[String]) -> Option<AggregatedResult> {
    let mut scored: Vec<Scored> = outcomes
        .iter()
        .filter(|o| !o.failed)
        .map(|o| Scored {
            outcome: o,
            score: o.self_confidence * task_relevance(&o.declared_skills, selected_skills),
        })
        .collect();

    if scored.is_empty() {
        return None;
    }

    scored.sort_by(|a, b| {
        let score_cmp = b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal);
        if score_cmp != std::cmp::Ordering::Equal && (a.score - b.score).abs() >= TIE_EPSILON {
            return score_cmp;
        }
        b.outcome
            .tool_calls_made
            .cmp(&a.outcome.tool_calls_made)
            .then_with(|| a.outcome.agent_name.cmp(&b.outcome.agent_name))
    });

    let primary = scored[0];
    let supporting = collect_supporting(&scored[1..]);

    let top_n = scored.len().min(3);
    let weighted_mean = scored[..top_n].iter().map(|s| s.score).sum::<f32>() / top_n as f32;

    Some(AggregatedResult {
        primary_text: primary.outcome.text.clone(),
        supporting,
        confidence: weighted_mean,
        agents_used: outcomes.iter().map(|o| o.agent_name.clone()).collect(),
        aggregation: "weighted_merge",
    })
}

fn task_relevance(declared: &[String], selected: &[String]) -> f32 {
    if selected.is_empty() {
        return 1.0;
    }
    let overlap = declared.iter().filter(|s| selected.contains(s)).count();
    let denom = (declared.len().max(selected.len())) as f32;
    if denom == 0.0 {
        1.0
    } else {
        (overlap as f32 / denom).clamp(0.0, 1.0)
    }
}

fn collect_supporting(rest: &[Scored]) -> Vec<String> {
    let mut seen_shingles: Vec<String> = Vec::new();
    let mut supporting = Vec::new();

    for scored in rest {
        for line in scored.outcome.text.lines().filter(|l| !l.trim().is_empty()) {
            if supporting.len() >= MAX_SUPPORTING_BULLETS {
                return supporting;
            }
            let shingle = shingle_key(line);
            if seen_shingles.contains(&shingle) {
                continue;
            }
            seen_shingles.push(shingle);
            supporting.push(line.trim().to_string());
        }
    }
    supporting
}

/// Cheap dedup key: lowercased, whitespace-collapsed first few words.
fn shingle_key(line: &str) -> String {
    line.to_lowercase()
        .split_whitespace()
        .take(6)
        .collect::<Vec<_>>()
        .join(" ")
}
