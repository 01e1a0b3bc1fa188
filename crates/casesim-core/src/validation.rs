//! Authored-content checks.
//!
//! Case content is hand written and not always self-consistent. These checks
//! never reject a case; they produce a list of issues the repository logs so
//! authors can fix the content.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::models::case::{Case, EmgIndication};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CaseIssueKind {
    MissingCorrectDiagnosis,
    EmptyDifferential,
    /// `requires_emg` disagrees with `emg_indication`.
    IndicationMismatch,
    /// Testing is indicated but no studies were authored.
    MissingStudies,
    /// Testing is not indicated and there is no note explaining why.
    MissingEducationalNote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("case '{case_id}': {message}")]
pub struct CaseIssue {
    pub case_id: String,
    pub kind: CaseIssueKind,
    pub message: String,
}

impl Case {
    /// Check the authored content for internal inconsistencies.
    pub fn validate(&self) -> Vec<CaseIssue> {
        let mut issues = Vec::new();
        let mut push = |kind, message: &str| {
            issues.push(CaseIssue {
                case_id: self.id.clone(),
                kind,
                message: message.to_string(),
            })
        };

        if self.correct_diagnosis.trim().is_empty() {
            push(
                CaseIssueKind::MissingCorrectDiagnosis,
                "correct_diagnosis is empty",
            );
        }
        if self.differential_diagnosis.is_empty() {
            push(
                CaseIssueKind::EmptyDifferential,
                "differential_diagnosis has no entries",
            );
        }

        match self.emg_indication {
            EmgIndication::Indicated => {
                if !self.has_studies() {
                    push(
                        CaseIssueKind::MissingStudies,
                        "testing is indicated but no NCS or EMG studies are authored",
                    );
                }
            }
            EmgIndication::NotIndicated => {
                if self.requires_emg {
                    push(
                        CaseIssueKind::IndicationMismatch,
                        "requires_emg is true but emg_indication is not_indicated",
                    );
                }
                if self
                    .educational_note
                    .as_deref()
                    .is_none_or(|note| note.trim().is_empty())
                {
                    push(
                        CaseIssueKind::MissingEducationalNote,
                        "testing is not indicated but no educational_note is authored",
                    );
                }
            }
        }

        issues
    }
}
