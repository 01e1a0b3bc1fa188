//! What each stage may show the learner.
//!
//! The UI renders a [`StageView`] and nothing else, so the answer key cannot
//! leak into an earlier stage and no default values are invented outside the
//! standardizer.

use casesim_core::{Difficulty, EmgStudy, ExamFinding, NcsStudy, Presentation};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::EngineError;
use crate::matching::{DifferentialResult, EmgDecisionOutcome, FinalDiagnosisResult};
use crate::session::{CaseSession, Stage};

const DIFFERENTIAL_PROMPT: &str =
    "List the diagnoses you are considering, separated by commas.";
const DECISION_PROMPT: &str = "Is EMG/NCS indicated for this patient?";
const FINAL_PROMPT: &str = "What is your final diagnosis?";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "stage", rename_all = "snake_case")]
#[ts(export)]
pub enum StageView {
    Presentation {
        case_id: String,
        title: String,
        difficulty: Difficulty,
        presentation: Presentation,
    },
    PhysicalExam {
        findings: Vec<ExamFinding>,
    },
    DifferentialBuilder {
        prompt: String,
        submitted: Option<DifferentialResult>,
    },
    EmgDecision {
        prompt: String,
        outcome: Option<EmgDecisionOutcome>,
        feedback: Option<String>,
    },
    StudyResults {
        /// `None` when testing is not indicated; the note explains why.
        evidence: Option<StudyEvidence>,
        educational_note: Option<String>,
        /// The learner declined studies that were indicated.
        shown_educationally: bool,
    },
    FinalDiagnosis {
        prompt: String,
        result: Option<FinalDiagnosisResult>,
    },
}

/// Standardized study data shown at the study results stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StudyEvidence {
    pub ncs: Vec<NcsStudy>,
    pub emg: Vec<EmgStudy>,
}

impl CaseSession {
    /// The view for the current stage.
    pub fn view(&self) -> Result<StageView, EngineError> {
        let (Some(stage), Some(case)) = (self.stage(), self.case()) else {
            return Err(EngineError::NoActiveCase);
        };

        let view = match stage {
            Stage::Presentation => StageView::Presentation {
                case_id: case.id.clone(),
                title: case.title.clone(),
                difficulty: case.difficulty,
                presentation: case.presentation.clone(),
            },
            Stage::PhysicalExam => StageView::PhysicalExam {
                findings: case.physical_exam.clone(),
            },
            Stage::DifferentialBuilder => StageView::DifferentialBuilder {
                prompt: DIFFERENTIAL_PROMPT.to_string(),
                submitted: self.differential().cloned(),
            },
            Stage::EmgDecision => {
                let outcome = self.decision_outcome().cloned();
                StageView::EmgDecision {
                    prompt: DECISION_PROMPT.to_string(),
                    feedback: outcome.as_ref().map(|o| o.feedback().to_string()),
                    outcome,
                }
            }
            Stage::StudyResults => {
                if case.testing_indicated() {
                    StageView::StudyResults {
                        evidence: Some(StudyEvidence {
                            ncs: case.ncs_studies.clone(),
                            emg: case.emg_studies.clone(),
                        }),
                        educational_note: None,
                        shown_educationally: self.emg_decision() == Some(false),
                    }
                } else {
                    StageView::StudyResults {
                        evidence: None,
                        educational_note: case.educational_note.clone(),
                        shown_educationally: false,
                    }
                }
            }
            Stage::FinalDiagnosis => StageView::FinalDiagnosis {
                prompt: FINAL_PROMPT.to_string(),
                result: self.final_diagnosis().cloned(),
            },
        };
        Ok(view)
    }
}
