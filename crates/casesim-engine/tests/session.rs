use casesim_engine::session::fork;
use casesim_engine::view::StageView;
use casesim_engine::{CaseRepository, CaseSession, EmgDecisionOutcome, EngineError, Stage};

fn session(case_id: &str) -> CaseSession {
    let repository = CaseRepository::builtin().unwrap();
    CaseSession::with_case(repository.load_case(case_id).unwrap())
}

/// Walk a fresh session up to and including the test-ordering decision.
fn decide(case_id: &str, differential: &str, indicated: bool) -> CaseSession {
    let mut session = session(case_id);
    session.advance_to(Stage::PhysicalExam).unwrap();
    session.advance_to(Stage::DifferentialBuilder).unwrap();
    session.submit_differential(differential).unwrap();
    session.advance_to(Stage::EmgDecision).unwrap();
    session.submit_emg_decision(indicated).unwrap();
    session
}

#[test]
fn full_walkthrough() {
    let mut session = session("carpal-tunnel");
    assert_eq!(session.stage(), Some(Stage::Presentation));

    session.advance().unwrap();
    session.advance().unwrap();
    let differential = session
        .submit_differential("CTS, cervical radiculopathy, pronator syndrome")
        .unwrap();
    assert_eq!(differential.matched.len(), 2);
    assert_eq!(session.differential_text(), Some("CTS, cervical radiculopathy, pronator syndrome"));

    session.advance().unwrap();
    let outcome = session.submit_emg_decision(true).unwrap();
    assert_eq!(outcome, EmgDecisionOutcome::Correct);

    assert_eq!(session.advance().unwrap(), Stage::StudyResults);
    assert_eq!(session.advance().unwrap(), Stage::FinalDiagnosis);

    let result = session.submit_final_diagnosis("carpal tunnel syndrome").unwrap();
    assert!(result.is_correct);
    assert_eq!(result.correct_diagnosis, "Carpal Tunnel Syndrome");
    assert!(!result.explanation.is_empty());
    assert!(session.is_complete());

    assert_eq!(
        session.visited(),
        &[
            Stage::Presentation,
            Stage::PhysicalExam,
            Stage::DifferentialBuilder,
            Stage::EmgDecision,
            Stage::StudyResults,
            Stage::FinalDiagnosis,
        ]
    );
}

#[test]
fn stages_cannot_be_skipped() {
    let mut session = session("carpal-tunnel");
    let err = session.advance_to(Stage::EmgDecision).unwrap_err();
    assert!(matches!(
        err,
        EngineError::InvalidTransition {
            from: Stage::Presentation,
            to: Stage::EmgDecision
        }
    ));
    assert!(matches!(
        session.advance_to(Stage::FinalDiagnosis),
        Err(EngineError::InvalidTransition {
            from: Stage::Presentation,
            to: Stage::FinalDiagnosis
        })
    ));
    assert_eq!(session.stage(), Some(Stage::Presentation));
}

#[test]
fn stages_cannot_go_backwards() {
    let mut session = session("carpal-tunnel");
    session.advance().unwrap();
    let err = session.advance_to(Stage::Presentation).unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition { .. }));
    assert_eq!(session.stage(), Some(Stage::PhysicalExam));
}

#[test]
fn differential_required_before_decision() {
    let mut session = session("carpal-tunnel");
    session.advance().unwrap();
    session.advance().unwrap();

    let err = session.advance_to(Stage::EmgDecision).unwrap_err();
    assert!(matches!(
        err,
        EngineError::InvalidTransition {
            from: Stage::DifferentialBuilder,
            to: Stage::EmgDecision
        }
    ));
    assert!(matches!(
        session.next_stage(),
        Err(EngineError::SubmissionRequired {
            stage: Stage::DifferentialBuilder
        })
    ));
    assert!(matches!(
        session.advance(),
        Err(EngineError::SubmissionRequired { .. })
    ));
    assert_eq!(session.stage(), Some(Stage::DifferentialBuilder));
}

#[test]
fn undecided_fork_rejects_either_target() {
    let mut session = session("carpal-tunnel");
    session.advance().unwrap();
    session.advance().unwrap();
    session.submit_differential("cts").unwrap();
    session.advance().unwrap();

    for target in [Stage::StudyResults, Stage::FinalDiagnosis] {
        let err = session.advance_to(target).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidTransition {
                from: Stage::EmgDecision,
                ..
            }
        ));
    }
    assert_eq!(session.stage(), Some(Stage::EmgDecision));
}

#[test]
fn decision_required_before_results() {
    let mut session = session("carpal-tunnel");
    session.advance().unwrap();
    session.advance().unwrap();
    session.submit_differential("cts").unwrap();
    session.advance().unwrap();

    assert!(matches!(
        session.advance(),
        Err(EngineError::SubmissionRequired {
            stage: Stage::EmgDecision
        })
    ));
}

#[test]
fn empty_differential_still_unlocks_next_stage() {
    let mut session = session("carpal-tunnel");
    session.advance().unwrap();
    session.advance().unwrap();

    let result = session.submit_differential("").unwrap();
    assert!(result.empty_submission);
    assert!(result.matched.is_empty());
    assert_eq!(session.advance().unwrap(), Stage::EmgDecision);
}

#[test]
fn differential_can_be_resubmitted_in_its_stage() {
    let mut session = session("carpal-tunnel");
    session.advance().unwrap();
    session.advance().unwrap();

    session.submit_differential("stroke").unwrap();
    let second = session.submit_differential("carpal tunnel").unwrap();
    assert_eq!(second.matched, vec!["Carpal Tunnel Syndrome"]);
    assert_eq!(session.differential(), Some(&second));
}

#[test]
fn submissions_outside_their_stage_are_rejected() {
    let mut session = session("carpal-tunnel");
    assert!(matches!(
        session.submit_differential("cts"),
        Err(EngineError::WrongStage {
            stage: Stage::Presentation,
            ..
        })
    ));
    assert!(matches!(
        session.submit_emg_decision(true),
        Err(EngineError::WrongStage { .. })
    ));
    assert!(matches!(
        session.submit_final_diagnosis("cts"),
        Err(EngineError::WrongStage { .. })
    ));

    let mut session = decide("carpal-tunnel", "cts", true);
    assert!(matches!(
        session.submit_differential("cts"),
        Err(EngineError::WrongStage {
            stage: Stage::EmgDecision,
            ..
        })
    ));
}

#[test]
fn decision_is_made_once() {
    let mut session = decide("carpal-tunnel", "cts", false);
    let err = session.submit_emg_decision(true).unwrap_err();
    assert!(matches!(
        err,
        EngineError::AlreadySubmitted {
            stage: Stage::EmgDecision
        }
    ));
    assert_eq!(session.emg_decision(), Some(false));
}

#[test]
fn indicated_and_ordered_shows_studies() {
    let mut session = decide("carpal-tunnel", "cts", true);
    assert_eq!(session.next_stage().unwrap(), Stage::StudyResults);
    assert!(matches!(
        session.advance_to(Stage::FinalDiagnosis),
        Err(EngineError::InvalidTransition { .. })
    ));
    session.advance_to(Stage::StudyResults).unwrap();

    let StageView::StudyResults {
        evidence,
        educational_note,
        shown_educationally,
    } = session.view().unwrap()
    else {
        panic!("expected study results view");
    };
    let evidence = evidence.unwrap();
    assert_eq!(evidence.ncs.len(), 6);
    assert_eq!(evidence.emg.len(), 4);
    assert!(educational_note.is_none());
    assert!(!shown_educationally);
}

#[test]
fn indicated_but_declined_shows_studies_educationally() {
    let mut session = decide("carpal-tunnel", "cts", false);
    assert_eq!(
        session.decision_outcome(),
        Some(&EmgDecisionOutcome::IncorrectIndicated)
    );
    assert_eq!(session.advance().unwrap(), Stage::StudyResults);

    let StageView::StudyResults {
        evidence,
        shown_educationally,
        ..
    } = session.view().unwrap()
    else {
        panic!("expected study results view");
    };
    assert!(evidence.is_some());
    assert!(shown_educationally);
}

#[test]
fn not_indicated_and_declined_skips_studies() {
    let mut session = decide("plantar-fasciitis", "plantar fasciitis", false);
    assert!(session.decision_outcome().unwrap().is_correct());

    assert!(matches!(
        session.advance_to(Stage::StudyResults),
        Err(EngineError::InvalidTransition { .. })
    ));
    assert_eq!(session.advance_to(Stage::FinalDiagnosis).unwrap(), Stage::FinalDiagnosis);
    assert!(!session.visited().contains(&Stage::StudyResults));
}

#[test]
fn not_indicated_but_ordered_shows_note_only() {
    let mut session = decide("plantar-fasciitis", "pf", true);
    let outcome = session.decision_outcome().unwrap();
    assert!(!outcome.is_correct());
    assert!(outcome.educational_note().is_some());

    assert_eq!(session.advance().unwrap(), Stage::StudyResults);
    let StageView::StudyResults {
        evidence,
        educational_note,
        shown_educationally,
    } = session.view().unwrap()
    else {
        panic!("expected study results view");
    };
    assert!(evidence.is_none());
    assert!(educational_note.is_some());
    assert!(!shown_educationally);

    assert_eq!(session.advance().unwrap(), Stage::FinalDiagnosis);
}

#[test]
fn fork_table() {
    assert_eq!(fork(true, true), Stage::StudyResults);
    assert_eq!(fork(false, true), Stage::StudyResults);
    assert_eq!(fork(true, false), Stage::StudyResults);
    assert_eq!(fork(false, false), Stage::FinalDiagnosis);
}

#[test]
fn empty_final_diagnosis_keeps_session_open() {
    let mut session = decide("plantar-fasciitis", "pf", false);
    session.advance().unwrap();

    let err = session.submit_final_diagnosis("  ").unwrap_err();
    assert!(matches!(err, EngineError::EmptySubmission));
    assert!(!session.is_complete());
    assert!(session.summary().is_none());

    let result = session.submit_final_diagnosis("Plantar fasciitis").unwrap();
    assert!(result.is_correct);
    assert!(result.educational_note.is_some());
}

#[test]
fn wrong_final_diagnosis_reveals_answer() {
    let mut session = decide("ulnar-elbow", "une", true);
    session.advance().unwrap();
    session.advance().unwrap();

    let result = session.submit_final_diagnosis("C8 radiculopathy").unwrap();
    assert!(!result.is_correct);
    assert_eq!(result.submitted, "C8 radiculopathy");
    assert_eq!(result.correct_diagnosis, "Ulnar neuropathy at the elbow");
}

#[test]
fn completed_session_accepts_nothing_more() {
    let mut session = decide("plantar-fasciitis", "pf", false);
    session.advance().unwrap();
    session.submit_final_diagnosis("plantar fasciitis").unwrap();

    assert!(matches!(
        session.submit_final_diagnosis("again"),
        Err(EngineError::SessionComplete)
    ));
    assert!(matches!(session.advance(), Err(EngineError::SessionComplete)));
}

#[test]
fn summary_records_the_attempt() {
    let mut session = decide("carpal-tunnel", "cts", true);
    session.advance().unwrap();
    session.advance().unwrap();
    session.submit_final_diagnosis("CTS").unwrap();

    let summary = session.summary().unwrap();
    assert_eq!(summary.case_id, "carpal-tunnel");
    assert_eq!(summary.stages_visited.len(), 6);
    assert_eq!(summary.emg_decision, Some(true));
    assert!(summary.final_diagnosis.unwrap().is_correct);
    let completed_at = summary.completed_at.unwrap();
    assert!(completed_at >= summary.started_at);
}

#[test]
fn reset_returns_to_unloaded() {
    let mut session = decide("carpal-tunnel", "cts", true);
    session.reset();

    assert!(!session.is_loaded());
    assert_eq!(session.stage(), None);
    assert!(session.visited().is_empty());
    assert!(matches!(session.view(), Err(EngineError::NoActiveCase)));
    assert!(matches!(session.advance(), Err(EngineError::NoActiveCase)));
}

#[test]
fn start_replaces_attempt_in_progress() {
    let repository = CaseRepository::builtin().unwrap();
    let mut session = decide("carpal-tunnel", "cts", true);

    session.start(repository.load_case("ulnar-elbow").unwrap());
    assert_eq!(session.stage(), Some(Stage::Presentation));
    assert_eq!(session.case().unwrap().id, "ulnar-elbow");
    assert_eq!(session.emg_decision(), None);
    assert_eq!(session.differential(), None);
}

#[test]
fn unloaded_session_rejects_operations() {
    let mut session = CaseSession::new();
    assert!(matches!(
        session.submit_differential("cts"),
        Err(EngineError::NoActiveCase)
    ));
    assert!(matches!(session.next_stage(), Err(EngineError::NoActiveCase)));
    assert!(session.warnings().is_empty());
}

#[test]
fn sessions_on_the_same_case_are_isolated() {
    let repository = CaseRepository::builtin().unwrap();
    let mut first = CaseSession::with_case(repository.load_case("carpal-tunnel").unwrap());
    let second = CaseSession::with_case(repository.load_case("carpal-tunnel").unwrap());

    first.advance().unwrap();
    first.advance().unwrap();
    first.submit_differential("cts").unwrap();

    assert_eq!(second.stage(), Some(Stage::Presentation));
    assert_eq!(second.differential_text(), None);
    assert_eq!(first.case(), second.case());
}

#[test]
fn warnings_travel_with_the_session() {
    let session = session("c6-radiculopathy");
    assert_eq!(session.warnings().len(), 1);
    assert_eq!(session.warnings()[0].study, "Lateral Antebrachial Cutaneous");
}

#[test]
fn early_views_do_not_reveal_the_answer_key() {
    let mut session = session("carpal-tunnel");
    let mut rendered = Vec::new();

    rendered.push(serde_json::to_string(&session.view().unwrap()).unwrap());
    session.advance().unwrap();
    rendered.push(serde_json::to_string(&session.view().unwrap()).unwrap());
    session.advance().unwrap();
    rendered.push(serde_json::to_string(&session.view().unwrap()).unwrap());
    session.submit_differential("cts").unwrap();
    session.advance().unwrap();
    rendered.push(serde_json::to_string(&session.view().unwrap()).unwrap());

    let explanation = session.case().unwrap().explanation.clone();
    for json in rendered {
        assert!(!json.contains("correct_diagnosis"), "{json}");
        assert!(!json.contains("emg_indication"), "{json}");
        assert!(!json.contains(&explanation), "{json}");
    }
}

#[test]
fn stage_views_follow_the_stage() {
    let mut session = session("l5-radiculopathy");
    assert!(matches!(
        session.view().unwrap(),
        StageView::Presentation { ref case_id, .. } if case_id == "l5-radiculopathy"
    ));
    session.advance().unwrap();
    let StageView::PhysicalExam { findings } = session.view().unwrap() else {
        panic!("expected physical exam view");
    };
    assert!(!findings.is_empty());

    session.advance().unwrap();
    assert!(matches!(
        session.view().unwrap(),
        StageView::DifferentialBuilder { submitted: None, .. }
    ));
    session.submit_differential("L5 radic, foot drop from peroneal neuropathy").unwrap();
    let StageView::DifferentialBuilder {
        submitted: Some(result),
        ..
    } = session.view().unwrap()
    else {
        panic!("expected submitted differential");
    };
    assert_eq!(result.matched, vec!["Fibular neuropathy at the fibular head"]);

    session.advance().unwrap();
    session.submit_emg_decision(true).unwrap();
    let StageView::EmgDecision { outcome, feedback, .. } = session.view().unwrap() else {
        panic!("expected decision view");
    };
    assert_eq!(outcome, Some(EmgDecisionOutcome::Correct));
    assert!(feedback.is_some());
}

#[test]
fn stage_successors() {
    assert_eq!(Stage::Presentation.successors(), &[Stage::PhysicalExam]);
    assert_eq!(
        Stage::EmgDecision.successors(),
        &[Stage::StudyResults, Stage::FinalDiagnosis]
    );
    assert!(Stage::FinalDiagnosis.is_terminal());
    assert!(!Stage::StudyResults.is_terminal());
}
