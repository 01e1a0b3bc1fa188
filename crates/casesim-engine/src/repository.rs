//! The authored case repository.
//!
//! Holds the template cases for the life of the process. Loading a case
//! standardizes a copy; the templates themselves are never mutated by a
//! session.

use std::collections::HashSet;

use casesim_core::{Case, Difficulty};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::StandardizedCase;
use crate::error::EngineError;

/// Cases bundled with the engine, in catalogue order.
const BUILTIN_CASES: &[(&str, &str)] = &[
    (
        "carpal_tunnel.json",
        include_str!("../cases/carpal_tunnel.json"),
    ),
    (
        "ulnar_elbow.json",
        include_str!("../cases/ulnar_elbow.json"),
    ),
    (
        "l5_radiculopathy.json",
        include_str!("../cases/l5_radiculopathy.json"),
    ),
    (
        "plantar_fasciitis.json",
        include_str!("../cases/plantar_fasciitis.json"),
    ),
    (
        "c6_radiculopathy.json",
        include_str!("../cases/c6_radiculopathy.json"),
    ),
];

/// Learner-safe catalogue entry. Carries no part of the answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CaseSummary {
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub chief_complaint: String,
}

impl From<&Case> for CaseSummary {
    fn from(case: &Case) -> Self {
        Self {
            id: case.id.clone(),
            title: case.title.clone(),
            difficulty: case.difficulty,
            chief_complaint: case.presentation.chief_complaint.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaseRepository {
    cases: Vec<Case>,
}

impl CaseRepository {
    /// An empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// The repository of bundled cases.
    pub fn builtin() -> Result<Self, EngineError> {
        let mut repository = Self::new();
        for (file, json) in BUILTIN_CASES {
            let case = Case::from_json(json).inspect_err(|e| {
                tracing::error!(file = %file, error = %e, "bundled case failed to parse");
            })?;
            repository.insert(case)?;
        }
        Ok(repository)
    }

    /// A repository from a JSON array of cases.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let mut repository = Self::new();
        repository.extend_from_json(json)?;
        Ok(repository)
    }

    /// Add every case in a JSON array. Returns how many were added.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize, EngineError> {
        let cases: Vec<Case> = serde_json::from_str(json)?;
        self.extend(cases)
    }

    /// Add a batch of cases. Either every case is added or, on a blank or
    /// duplicate id, none is.
    pub fn extend(&mut self, cases: Vec<Case>) -> Result<usize, EngineError> {
        {
            let mut seen = HashSet::new();
            for case in &cases {
                case.check_id()?;
                if self.get(&case.id).is_some() || !seen.insert(case.id.as_str()) {
                    return Err(EngineError::DuplicateCase(case.id.clone()));
                }
            }
        }

        let count = cases.len();
        for case in cases {
            self.push(case);
        }
        Ok(count)
    }

    /// Add one case. Content issues are logged; blank and duplicate ids are
    /// rejected.
    pub fn insert(&mut self, case: Case) -> Result<(), EngineError> {
        case.check_id()?;
        if self.get(&case.id).is_some() {
            return Err(EngineError::DuplicateCase(case.id));
        }
        self.push(case);
        Ok(())
    }

    fn push(&mut self, case: Case) {
        for issue in case.validate() {
            tracing::warn!(case_id = %issue.case_id, kind = ?issue.kind, "{}", issue.message);
        }
        self.cases.push(case);
    }

    pub fn get(&self, case_id: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.id == case_id)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Catalogue of every case, in insertion order.
    pub fn summaries(&self) -> Vec<CaseSummary> {
        self.cases.iter().map(CaseSummary::from).collect()
    }

    pub fn by_difficulty(&self, difficulty: Difficulty) -> Vec<CaseSummary> {
        self.cases
            .iter()
            .filter(|c| c.difficulty == difficulty)
            .map(CaseSummary::from)
            .collect()
    }

    /// Look up a case and return a standardized copy of it.
    pub fn load_case(&self, case_id: &str) -> Result<StandardizedCase, EngineError> {
        let case = self.get(case_id).ok_or_else(|| EngineError::CaseNotFound {
            case_id: case_id.to_string(),
        })?;
        let standardized = casesim_standards::standardize(case);
        tracing::info!(
            case_id = %case_id,
            warnings = standardized.warnings.len(),
            "case loaded"
        );
        Ok(standardized)
    }
}
