use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::differential::DifferentialEntry;
use super::emg::EmgStudy;
use super::ncs::NcsStudy;
use crate::error::CoreError;

/// One authored diagnostic scenario together with its answer key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Case {
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub presentation: Presentation,
    #[serde(default)]
    pub physical_exam: Vec<ExamFinding>,
    /// Expected differential. Answer key, never shown before the final stage.
    #[serde(default)]
    pub differential_diagnosis: Vec<DifferentialEntry>,
    #[serde(default)]
    pub ncs_studies: Vec<NcsStudy>,
    #[serde(default)]
    pub emg_studies: Vec<EmgStudy>,
    /// Presentation hint only. `emg_indication` decides the flow.
    #[serde(default)]
    pub requires_emg: bool,
    #[serde(default)]
    pub emg_indication: EmgIndication,
    pub correct_diagnosis: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub educational_note: Option<String>,
}

impl Case {
    /// Parse a single authored case from JSON.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let case: Case = serde_json::from_str(json)?;
        case.check_id()?;
        Ok(case)
    }

    /// Fails when the id is empty or whitespace.
    pub fn check_id(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::MissingField("id".to_string()));
        }
        Ok(())
    }

    /// Ground truth for the test-ordering decision.
    pub fn testing_indicated(&self) -> bool {
        self.emg_indication != EmgIndication::NotIndicated
    }

    /// Names of the expected differential entries, in authored order.
    pub fn expected_differentials(&self) -> impl Iterator<Item = &str> {
        self.differential_diagnosis.iter().map(DifferentialEntry::name)
    }

    pub fn has_studies(&self) -> bool {
        !self.ncs_studies.is_empty() || !self.emg_studies.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Expert => "expert",
        };
        f.write_str(label)
    }
}

/// Whether electrodiagnostic testing is clinically warranted for a case.
///
/// Legacy content spells the values in upper case with a space
/// (`"NOT INDICATED"`); both spellings are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EmgIndication {
    #[default]
    #[serde(alias = "INDICATED")]
    Indicated,
    #[serde(alias = "NOT INDICATED")]
    NotIndicated,
}

/// Demographics and narrative history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Presentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    pub chief_complaint: String,
    #[serde(default)]
    pub history_of_present_illness: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_medical_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_of_systems: Option<String>,
}

/// A named physical exam category (e.g. "Strength", "Reflexes").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExamFinding {
    pub category: String,
    pub finding: String,
}
