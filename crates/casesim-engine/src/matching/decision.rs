use casesim_core::Case;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The four cells of the indication truth table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "outcome", rename_all = "snake_case")]
#[ts(export)]
pub enum EmgDecisionOutcome {
    /// Learner ordered studies and they are indicated.
    Correct,
    /// Learner declined studies and they are not indicated.
    CorrectClinical { educational_note: Option<String> },
    /// Learner declined studies that are indicated.
    IncorrectIndicated,
    /// Learner ordered studies that are not indicated.
    IncorrectNotIndicated { educational_note: Option<String> },
}

impl EmgDecisionOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(
            self,
            EmgDecisionOutcome::Correct | EmgDecisionOutcome::CorrectClinical { .. }
        )
    }

    pub fn educational_note(&self) -> Option<&str> {
        match self {
            EmgDecisionOutcome::CorrectClinical { educational_note }
            | EmgDecisionOutcome::IncorrectNotIndicated { educational_note } => {
                educational_note.as_deref()
            }
            _ => None,
        }
    }

    /// Fixed learner-facing message for this outcome.
    pub fn feedback(&self) -> &'static str {
        match self {
            EmgDecisionOutcome::Correct => {
                "Correct. Electrodiagnostic testing is indicated for this presentation."
            }
            EmgDecisionOutcome::CorrectClinical { .. } => {
                "Correct. This is a clinical diagnosis and EMG/NCS is not indicated."
            }
            EmgDecisionOutcome::IncorrectIndicated => {
                "Testing is indicated here. Review the studies to see what they would have shown."
            }
            EmgDecisionOutcome::IncorrectNotIndicated { .. } => {
                "EMG/NCS is not indicated for this presentation."
            }
        }
    }
}

/// Evaluate the learner's test-ordering decision.
pub fn evaluate_emg_decision(case: &Case, learner_says_indicated: bool) -> EmgDecisionOutcome {
    let note = case.educational_note.clone();
    match (learner_says_indicated, case.testing_indicated()) {
        (true, true) => EmgDecisionOutcome::Correct,
        (false, false) => EmgDecisionOutcome::CorrectClinical {
            educational_note: note,
        },
        (false, true) => EmgDecisionOutcome::IncorrectIndicated,
        (true, false) => EmgDecisionOutcome::IncorrectNotIndicated {
            educational_note: note,
        },
    }
}
