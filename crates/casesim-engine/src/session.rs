//! One learner's attempt at one case.
//!
//! Stages run in a fixed order with a single fork after the test-ordering
//! decision:
//!
//! ```text
//! Presentation → PhysicalExam → DifferentialBuilder → EmgDecision
//!     → StudyResults → FinalDiagnosis
//!     → FinalDiagnosis            (testing not indicated, learner said no)
//! ```
//!
//! Only forward transitions exist. A session owns its own standardized copy
//! of the case, so two sessions on the same case never observe each other.

use std::fmt;

use casesim_core::Case;
use casesim_standards::UnresolvedReferenceWarning;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::StandardizedCase;
use crate::error::EngineError;
use crate::matching::{
    DifferentialResult, EmgDecisionOutcome, FinalDiagnosisResult, analyze_differential,
    evaluate_emg_decision, final_diagnosis_result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Stage {
    Presentation,
    PhysicalExam,
    DifferentialBuilder,
    EmgDecision,
    StudyResults,
    FinalDiagnosis,
}

impl Stage {
    /// Stages reachable in one step, ignoring learner input.
    pub fn successors(self) -> &'static [Stage] {
        match self {
            Stage::Presentation => &[Stage::PhysicalExam],
            Stage::PhysicalExam => &[Stage::DifferentialBuilder],
            Stage::DifferentialBuilder => &[Stage::EmgDecision],
            Stage::EmgDecision => &[Stage::StudyResults, Stage::FinalDiagnosis],
            Stage::StudyResults => &[Stage::FinalDiagnosis],
            Stage::FinalDiagnosis => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Presentation => "presentation",
            Stage::PhysicalExam => "physical exam",
            Stage::DifferentialBuilder => "differential builder",
            Stage::EmgDecision => "EMG decision",
            Stage::StudyResults => "study results",
            Stage::FinalDiagnosis => "final diagnosis",
        };
        f.write_str(label)
    }
}

/// Record of a finished attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AttemptSummary {
    pub case_id: String,
    pub title: String,
    pub stages_visited: Vec<Stage>,
    pub differential: Option<DifferentialResult>,
    pub emg_decision: Option<bool>,
    pub decision_outcome: Option<EmgDecisionOutcome>,
    pub final_diagnosis: Option<FinalDiagnosisResult>,
    pub started_at: jiff::Timestamp,
    pub completed_at: Option<jiff::Timestamp>,
}

#[derive(Debug, Clone)]
struct Attempt {
    case: Case,
    warnings: Vec<UnresolvedReferenceWarning>,
    stage: Stage,
    visited: Vec<Stage>,
    differential_text: Option<String>,
    differential: Option<DifferentialResult>,
    emg_decision: Option<bool>,
    decision_outcome: Option<EmgDecisionOutcome>,
    final_diagnosis: Option<FinalDiagnosisResult>,
    started_at: jiff::Timestamp,
    completed_at: Option<jiff::Timestamp>,
}

impl Attempt {
    /// The single legal next stage given what has been submitted so far.
    fn next_stage(&self) -> Result<Stage, EngineError> {
        match self.stage {
            Stage::Presentation => Ok(Stage::PhysicalExam),
            Stage::PhysicalExam => Ok(Stage::DifferentialBuilder),
            Stage::DifferentialBuilder => match self.differential {
                Some(_) => Ok(Stage::EmgDecision),
                None => Err(EngineError::SubmissionRequired { stage: self.stage }),
            },
            Stage::EmgDecision => match self.emg_decision {
                Some(indicated) => Ok(fork(indicated, self.case.testing_indicated())),
                None => Err(EngineError::SubmissionRequired { stage: self.stage }),
            },
            Stage::StudyResults => Ok(Stage::FinalDiagnosis),
            Stage::FinalDiagnosis => Err(EngineError::SessionComplete),
        }
    }

    fn require_stage(&self, operation: &'static str, stage: Stage) -> Result<(), EngineError> {
        if self.completed_at.is_some() {
            return Err(EngineError::SessionComplete);
        }
        if self.stage != stage {
            return Err(EngineError::WrongStage {
                operation,
                stage: self.stage,
            });
        }
        Ok(())
    }
}

/// Where the test-ordering decision leads.
///
/// Only a correct "not indicated" answer skips the study results. A learner
/// who wrongly declines sees the studies they would have missed; a learner
/// who wrongly orders studies for a not-indicated case reaches the study
/// stage but is shown the educational note instead of study data.
pub fn fork(learner_says_indicated: bool, testing_indicated: bool) -> Stage {
    if !learner_says_indicated && !testing_indicated {
        Stage::FinalDiagnosis
    } else {
        Stage::StudyResults
    }
}

/// A learner's attempt. Starts unloaded; `start` loads a case.
#[derive(Debug, Clone, Default)]
pub struct CaseSession {
    attempt: Option<Attempt>,
}

impl CaseSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session already holding `case` at the presentation stage.
    pub fn with_case(case: StandardizedCase) -> Self {
        let mut session = Self::new();
        session.start(case);
        session
    }

    /// Load a case, discarding any attempt in progress.
    pub fn start(&mut self, case: StandardizedCase) {
        tracing::info!(case_id = %case.case.id, "starting case attempt");
        self.attempt = Some(Attempt {
            case: case.case,
            warnings: case.warnings,
            stage: Stage::Presentation,
            visited: vec![Stage::Presentation],
            differential_text: None,
            differential: None,
            emg_decision: None,
            decision_outcome: None,
            final_diagnosis: None,
            started_at: jiff::Timestamp::now(),
            completed_at: None,
        });
    }

    /// Abandon the attempt and return to the unloaded state.
    pub fn reset(&mut self) {
        if let Some(attempt) = self.attempt.take() {
            tracing::debug!(
                case_id = %attempt.case.id,
                stage = ?attempt.stage,
                "session reset"
            );
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.attempt.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.attempt
            .as_ref()
            .is_some_and(|a| a.completed_at.is_some())
    }

    pub fn stage(&self) -> Option<Stage> {
        self.attempt.as_ref().map(|a| a.stage)
    }

    pub fn case(&self) -> Option<&Case> {
        self.attempt.as_ref().map(|a| &a.case)
    }

    /// Reference lookups the standardizer could not resolve for this case.
    pub fn warnings(&self) -> &[UnresolvedReferenceWarning] {
        self.attempt
            .as_ref()
            .map(|a| a.warnings.as_slice())
            .unwrap_or_default()
    }

    pub fn differential_text(&self) -> Option<&str> {
        self.attempt.as_ref()?.differential_text.as_deref()
    }

    pub fn differential(&self) -> Option<&DifferentialResult> {
        self.attempt.as_ref()?.differential.as_ref()
    }

    pub fn emg_decision(&self) -> Option<bool> {
        self.attempt.as_ref()?.emg_decision
    }

    pub fn decision_outcome(&self) -> Option<&EmgDecisionOutcome> {
        self.attempt.as_ref()?.decision_outcome.as_ref()
    }

    pub fn final_diagnosis(&self) -> Option<&FinalDiagnosisResult> {
        self.attempt.as_ref()?.final_diagnosis.as_ref()
    }

    pub fn visited(&self) -> &[Stage] {
        self.attempt
            .as_ref()
            .map(|a| a.visited.as_slice())
            .unwrap_or_default()
    }

    /// The single legal successor of the current stage.
    pub fn next_stage(&self) -> Result<Stage, EngineError> {
        self.attempt()?.next_stage()
    }

    /// Move to `target`, which must be the single legal successor.
    ///
    /// Any other target is an `InvalidTransition`, including while the
    /// current stage still awaits its submission; `next_stage` tells the two
    /// apart.
    pub fn advance_to(&mut self, target: Stage) -> Result<Stage, EngineError> {
        let attempt = self.attempt_mut()?;
        let from = attempt.stage;

        let next = match attempt.next_stage() {
            Ok(next) if next == target => next,
            _ => return Err(EngineError::InvalidTransition { from, to: target }),
        };

        attempt.stage = next;
        attempt.visited.push(next);
        tracing::debug!(case_id = %attempt.case.id, from = ?from, to = ?next, "stage advanced");
        Ok(next)
    }

    /// Advance to whatever the legal successor is.
    pub fn advance(&mut self) -> Result<Stage, EngineError> {
        let next = self.next_stage()?;
        self.advance_to(next)
    }

    /// Score the learner's differential. Any submission, even an empty one,
    /// unlocks the next stage; resubmitting replaces the previous answer.
    pub fn submit_differential(&mut self, text: &str) -> Result<DifferentialResult, EngineError> {
        let attempt = self.attempt_mut()?;
        attempt.require_stage("submit_differential", Stage::DifferentialBuilder)?;

        let result = analyze_differential(&attempt.case, text);
        tracing::debug!(
            case_id = %attempt.case.id,
            matched = result.matched.len(),
            expected = result.total_expected,
            empty = result.empty_submission,
            "differential submitted"
        );
        attempt.differential_text = Some(text.to_string());
        attempt.differential = Some(result.clone());
        Ok(result)
    }

    /// Record the learner's test-ordering decision. It can be made once.
    pub fn submit_emg_decision(
        &mut self,
        indicated: bool,
    ) -> Result<EmgDecisionOutcome, EngineError> {
        let attempt = self.attempt_mut()?;
        attempt.require_stage("submit_emg_decision", Stage::EmgDecision)?;
        if attempt.emg_decision.is_some() {
            return Err(EngineError::AlreadySubmitted {
                stage: Stage::EmgDecision,
            });
        }

        let outcome = evaluate_emg_decision(&attempt.case, indicated);
        tracing::debug!(
            case_id = %attempt.case.id,
            indicated,
            correct = outcome.is_correct(),
            "EMG decision submitted"
        );
        attempt.emg_decision = Some(indicated);
        attempt.decision_outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Score the final diagnosis and retire the attempt.
    pub fn submit_final_diagnosis(
        &mut self,
        text: &str,
    ) -> Result<FinalDiagnosisResult, EngineError> {
        let attempt = self.attempt_mut()?;
        attempt.require_stage("submit_final_diagnosis", Stage::FinalDiagnosis)?;
        if text.trim().is_empty() {
            return Err(EngineError::EmptySubmission);
        }

        let result = final_diagnosis_result(&attempt.case, text);
        attempt.final_diagnosis = Some(result.clone());
        attempt.completed_at = Some(jiff::Timestamp::now());
        tracing::info!(
            case_id = %attempt.case.id,
            correct = result.is_correct,
            "case attempt completed"
        );
        Ok(result)
    }

    /// Summary of the attempt once the final diagnosis is in.
    pub fn summary(&self) -> Option<AttemptSummary> {
        let attempt = self.attempt.as_ref()?;
        attempt.completed_at?;
        Some(AttemptSummary {
            case_id: attempt.case.id.clone(),
            title: attempt.case.title.clone(),
            stages_visited: attempt.visited.clone(),
            differential: attempt.differential.clone(),
            emg_decision: attempt.emg_decision,
            decision_outcome: attempt.decision_outcome.clone(),
            final_diagnosis: attempt.final_diagnosis.clone(),
            started_at: attempt.started_at,
            completed_at: attempt.completed_at,
        })
    }

    fn attempt(&self) -> Result<&Attempt, EngineError> {
        self.attempt.as_ref().ok_or(EngineError::NoActiveCase)
    }

    fn attempt_mut(&mut self) -> Result<&mut Attempt, EngineError> {
        self.attempt.as_mut().ok_or(EngineError::NoActiveCase)
    }
}
