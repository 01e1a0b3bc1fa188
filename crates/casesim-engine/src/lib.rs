//! casesim-engine
//!
//! The case simulation engine: the authored case repository, the matchers
//! that score learner input against a case's answer key, and the session
//! state machine that walks one attempt from presentation to final
//! diagnosis. Single threaded and synchronous; nothing here performs I/O.
//!
//! Public API:
//! - `CaseRepository::load_case()`: look up and standardize a case
//! - `CaseSession::advance_to()`: move to the single legal next stage
//! - `CaseSession::submit_differential()` / `submit_emg_decision()` /
//!   `submit_final_diagnosis()`: score learner input for the current stage
//! - `CaseSession::reset()`: abandon the attempt

pub mod error;
pub mod matching;
pub mod repository;
pub mod session;
pub mod synonyms;
pub mod view;

pub use crate::error::EngineError;
pub use crate::matching::{
    DifferentialResult, EmgDecisionOutcome, FinalDiagnosisResult, analyze_differential,
    evaluate_emg_decision, evaluate_final_diagnosis,
};
pub use crate::repository::{CaseRepository, CaseSummary};
pub use crate::session::{AttemptSummary, CaseSession, Stage};
pub use crate::view::StageView;

/// A case as held by a session: standardized copy plus any reference
/// lookups that could not be resolved.
pub type StandardizedCase = casesim_standards::Standardized;
