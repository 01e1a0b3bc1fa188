//! casesim-core
//!
//! Pure domain types for the electrodiagnostic case simulator: authored
//! cases, nerve conduction and needle EMG study records, differential
//! entries, and normal-range strings. No engine logic lives here; this is
//! the shared vocabulary of the casesim workspace.

pub mod error;
pub mod models;
pub mod range;
pub mod validation;

pub use crate::error::CoreError;
pub use crate::models::case::{Case, Difficulty, EmgIndication, ExamFinding, Presentation};
pub use crate::models::differential::DifferentialEntry;
pub use crate::models::emg::{EmgField, EmgStudy};
pub use crate::models::ncs::{Measurement, NcsField, NcsStudy, StudyKind, StudyResult};
pub use crate::range::NormalRange;
pub use crate::validation::{CaseIssue, CaseIssueKind};
