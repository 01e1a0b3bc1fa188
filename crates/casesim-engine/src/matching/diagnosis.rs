use casesim_core::Case;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{names_agree, normalize};

/// Verdict on the final diagnosis plus the authored debrief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FinalDiagnosisResult {
    pub is_correct: bool,
    pub submitted: String,
    pub correct_diagnosis: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub educational_note: Option<String>,
}

/// Lenient comparison of the learner's diagnosis with the authored one.
///
/// Equality, containment either way, or a shared synonym group all count.
/// False positives are preferred over false negatives.
pub fn evaluate_final_diagnosis(case: &Case, learner_text: &str) -> bool {
    names_agree(&normalize(&case.correct_diagnosis), &normalize(learner_text))
}

pub fn final_diagnosis_result(case: &Case, learner_text: &str) -> FinalDiagnosisResult {
    FinalDiagnosisResult {
        is_correct: evaluate_final_diagnosis(case, learner_text),
        submitted: learner_text.trim().to_string(),
        correct_diagnosis: case.correct_diagnosis.clone(),
        explanation: case.explanation.clone(),
        educational_note: case.educational_note.clone(),
    }
}
