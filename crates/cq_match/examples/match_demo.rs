//! Minimal end-to-end demo: build a tiny in-memory model, answer two
//! statements, and print the ranked outcome.
//!
//! Run with: `cargo run -p cq_match --example match_demo`

use cq_match::{AnswerSet, MatchOutcome, MatchRequest, Matcher, QuizMatcher};
use cq_model::{EmbeddingStore, RelationshipGraph};

fn main() {
    let store = EmbeddingStore::from_entries(
        3,
        vec![
            ("A:Agree:Q1".to_string(), vec![1.0, 0.0, 0.0]),
            ("A:Disagree:Q1".to_string(), vec![-1.0, 0.0, 0.0]),
            ("A:Agree:Q2".to_string(), vec![0.0, 1.0, 0.0]),
            ("C:Alice".to_string(), vec![0.8, 0.6, 0.0]),
            ("C:Bob".to_string(), vec![-0.9, 0.1, 0.4]),
        ],
    )
    .expect("store entries are well-formed");

    let graph = RelationshipGraph::from_parts(
        vec![
            "A:Agree:Q1".to_string(),
            "A:Disagree:Q1".to_string(),
            "A:Agree:Q2".to_string(),
            "C:Alice".to_string(),
            "C:Bob".to_string(),
        ],
        vec![
            ("A:Agree:Q1".to_string(), "C:Alice".to_string()),
            ("A:Disagree:Q1".to_string(), "C:Bob".to_string()),
        ],
    )
    .expect("graph parts are well-formed");

    let matcher = QuizMatcher::new(store, graph);

    let mut answers = AnswerSet::new();
    answers.insert("Q1".to_string(), "Agree".to_string());
    answers.insert("Q2".to_string(), "Agree".to_string());

    let report = matcher
        .match_answers(&MatchRequest::new(answers))
        .expect("default config is valid");

    println!(
        "resolved {}/{} answers",
        report.resolved_answers, report.total_answers
    );
    match report.outcome {
        MatchOutcome::Match {
            character,
            similarity,
        } => println!("best match: {character} (similarity {similarity:.3})"),
        MatchOutcome::NoMatch => println!("no character could be ranked"),
    }
}
