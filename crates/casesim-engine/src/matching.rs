//! Scoring of learner input against a case's answer key.
//!
//! Every matcher is a total function: malformed or missing case content
//! degrades to "no match" instead of an error.

pub mod decision;
pub mod diagnosis;
pub mod differential;

pub use decision::{EmgDecisionOutcome, evaluate_emg_decision};
pub use diagnosis::{FinalDiagnosisResult, evaluate_final_diagnosis, final_diagnosis_result};
pub use differential::{DifferentialResult, analyze_differential};

/// Trimmed, lower-cased form used by every matcher.
pub(crate) fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Containment in either direction or agreement through the synonym table.
/// Empty inputs never match.
pub(crate) fn names_agree(expected: &str, learner: &str) -> bool {
    if expected.is_empty() || learner.is_empty() {
        return false;
    }
    learner.contains(expected)
        || expected.contains(learner)
        || crate::synonyms::share_group(expected, learner)
}
