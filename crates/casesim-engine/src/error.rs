use casesim_core::CoreError;
use thiserror::Error;

use crate::session::Stage;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("case not found: {case_id}")]
    CaseNotFound { case_id: String },

    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: Stage, to: Stage },

    #[error("{stage} needs a submission before the case can continue")]
    SubmissionRequired { stage: Stage },

    #[error("{operation} is not available during {stage}")]
    WrongStage { operation: &'static str, stage: Stage },

    #[error("{stage} has already been answered")]
    AlreadySubmitted { stage: Stage },

    #[error("submission is empty")]
    EmptySubmission,

    #[error("no case is loaded")]
    NoActiveCase,

    #[error("the attempt is complete; start a new case")]
    SessionComplete,

    #[error("duplicate case id: {0}")]
    DuplicateCase(String),

    #[error("case content error: {0}")]
    Core(#[from] CoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
