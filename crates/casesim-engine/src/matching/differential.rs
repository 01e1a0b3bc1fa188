use casesim_core::Case;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{names_agree, normalize};

/// Which expected differential entries the learner named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DifferentialResult {
    pub matched: Vec<String>,
    pub unmatched: Vec<String>,
    pub total_expected: usize,
    /// The learner submitted nothing; the UI should prompt for a retry.
    pub empty_submission: bool,
}

impl DifferentialResult {
    pub fn all_matched(&self) -> bool {
        self.unmatched.is_empty()
    }
}

/// Match free text against the case's expected differential.
///
/// An entry matches when its name and the whole learner text contain one
/// another, or when both mention the same synonym group. There is no partial
/// credit; an entry is either matched or not.
pub fn analyze_differential(case: &Case, learner_text: &str) -> DifferentialResult {
    let text = normalize(learner_text);
    let mut matched = Vec::new();
    let mut unmatched = Vec::new();

    for name in case.expected_differentials() {
        if names_agree(&normalize(name), &text) {
            matched.push(name.to_string());
        } else {
            unmatched.push(name.to_string());
        }
    }

    DifferentialResult {
        total_expected: matched.len() + unmatched.len(),
        matched,
        unmatched,
        empty_submission: text.is_empty(),
    }
}
