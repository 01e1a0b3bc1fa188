use casesim_core::{
    Case, CaseIssueKind, DifferentialEntry, Difficulty, EmgField, EmgIndication, EmgStudy,
    Measurement, NcsField, NcsStudy, NormalRange, StudyKind, StudyResult,
};

const MINIMAL_CASE: &str = r#"{
    "id": "cts-basic",
    "title": "Numb fingers at night",
    "difficulty": "beginner",
    "presentation": {
        "age": 52,
        "sex": "female",
        "chief_complaint": "Numbness in the right hand",
        "history_of_present_illness": "Wakes at night shaking the hand."
    },
    "physical_exam": [
        { "category": "Special tests", "finding": "Positive Phalen sign" }
    ],
    "differential_diagnosis": [
        "Carpal Tunnel Syndrome",
        { "name": "C6 radiculopathy", "rationale": "Thumb numbness overlaps C6" }
    ],
    "ncs_studies": [
        {
            "nerve": "Median Motor (APB)",
            "result": "abnormal",
            "onset_latency": { "value": 5.8 }
        }
    ],
    "emg_studies": [
        { "muscle": "Abductor pollicis brevis", "fibrillations": "0" }
    ],
    "requires_emg": true,
    "correct_diagnosis": "Carpal Tunnel Syndrome",
    "explanation": "Prolonged median distal latency."
}"#;

#[test]
fn parses_minimal_case_with_defaults() {
    let case = Case::from_json(MINIMAL_CASE).unwrap();

    assert_eq!(case.id, "cts-basic");
    assert_eq!(case.difficulty, Difficulty::Beginner);
    assert_eq!(case.emg_indication, EmgIndication::Indicated);
    assert!(case.testing_indicated());
    assert_eq!(case.presentation.age, Some(52));
    assert_eq!(case.ncs_studies[0].kind, None);
    assert_eq!(case.ncs_studies[0].onset_latency.value, Some(5.8));
    assert!(case.ncs_studies[0].amplitude.is_empty());
    assert_eq!(case.educational_note, None);
}

#[test]
fn differential_entries_are_read_by_name() {
    let case = Case::from_json(MINIMAL_CASE).unwrap();
    let names: Vec<&str> = case.expected_differentials().collect();
    assert_eq!(names, vec!["Carpal Tunnel Syndrome", "C6 radiculopathy"]);
    assert_eq!(
        case.differential_diagnosis[1].rationale(),
        Some("Thumb numbness overlaps C6")
    );
    assert_eq!(DifferentialEntry::from("Stroke").name(), "Stroke");
}

#[test]
fn legacy_indication_spelling_is_accepted() {
    let json = MINIMAL_CASE.replace(
        "\"requires_emg\": true,",
        "\"requires_emg\": false, \"emg_indication\": \"NOT INDICATED\",",
    );
    let case = Case::from_json(&json).unwrap();
    assert_eq!(case.emg_indication, EmgIndication::NotIndicated);
    assert!(!case.testing_indicated());
}

#[test]
fn blank_id_is_rejected() {
    let json = MINIMAL_CASE.replace("\"cts-basic\"", "\"  \"");
    assert!(Case::from_json(&json).is_err());
}

#[test]
fn serialization_omits_empty_measurements() {
    let mut study = NcsStudy::new("Sural", StudyResult::Normal);
    study.kind = Some(StudyKind::Sensory);
    study.peak_latency = Measurement::value(3.1);

    let json = serde_json::to_value(&study).unwrap();
    assert!(json.get("peak_latency").is_some());
    assert!(json.get("amplitude").is_none());

    let back: NcsStudy = serde_json::from_value(json).unwrap();
    assert_eq!(back, study);
}

#[test]
fn measurement_field_accessors_cover_every_field() {
    let mut study = NcsStudy::new("Ulnar Motor (ADM)", StudyResult::Normal);
    for (i, field) in NcsField::ALL.iter().enumerate() {
        study.measurement_mut(*field).value = Some(i as f64);
    }
    for (i, field) in NcsField::ALL.iter().enumerate() {
        assert_eq!(study.measurement(*field).value, Some(i as f64));
    }
}

#[test]
fn emg_study_without_fields_has_no_findings() {
    let mut study = EmgStudy::new("Tibialis anterior");
    assert!(study.has_no_findings());

    *study.field_mut(EmgField::Fibrillations) = Some("0".to_string());
    assert!(!study.has_no_findings());
    assert_eq!(study.field(EmgField::Fibrillations), Some("0"));
}

#[test]
fn normal_range_parses_report_notation() {
    assert_eq!(
        NormalRange::parse("<4.4").unwrap(),
        NormalRange::Below { limit: 4.4 }
    );
    assert_eq!(
        NormalRange::parse(" >= 50 m/s").unwrap(),
        NormalRange::AtLeast { limit: 50.0 }
    );
    assert_eq!(
        NormalRange::parse("3.0-4.5").unwrap(),
        NormalRange::Between { min: 3.0, max: 4.5 }
    );
    assert!(NormalRange::parse("normal").is_err());
    assert!(NormalRange::parse("<").is_err());
    assert!(NormalRange::parse("5-3").is_err());
}

#[test]
fn normal_range_bounds_are_strict_where_written_strict() {
    let below = NormalRange::parse("<4.2").unwrap();
    assert!(below.contains(4.1));
    assert!(!below.contains(4.2));

    let at_most = NormalRange::parse("<=4.2").unwrap();
    assert!(at_most.contains(4.2));

    let between = NormalRange::parse("3.0-4.5").unwrap();
    assert!(between.contains(3.0));
    assert!(between.contains(4.5));
    assert!(!between.contains(4.6));
}

#[test]
fn normal_range_display_matches_report_notation() {
    assert_eq!(NormalRange::Below { limit: 4.2 }.to_string(), "<4.2");
    assert_eq!(NormalRange::Above { limit: 5.0 }.to_string(), ">5.0");
    assert_eq!(NormalRange::Above { limit: 50.0 }.to_string(), ">50");
    assert_eq!(NormalRange::Above { limit: 49.5 }.to_string(), ">49.5");
}

#[test]
fn within_normal_needs_value_and_range() {
    assert_eq!(Measurement::new(3.7, "<4.4").within_normal(), Some(true));
    assert_eq!(Measurement::new(5.8, "<4.4").within_normal(), Some(false));
    assert_eq!(Measurement::value(5.8).within_normal(), None);
    assert_eq!(Measurement::new(5.8, "n/a").within_normal(), None);
}

#[test]
fn validate_flags_inconsistent_not_indicated_case() {
    let json = MINIMAL_CASE.replace(
        "\"requires_emg\": true,",
        "\"requires_emg\": true, \"emg_indication\": \"not_indicated\",",
    );
    let case = Case::from_json(&json).unwrap();
    let kinds: Vec<CaseIssueKind> = case.validate().iter().map(|i| i.kind).collect();

    assert!(kinds.contains(&CaseIssueKind::IndicationMismatch));
    assert!(kinds.contains(&CaseIssueKind::MissingEducationalNote));
    assert!(!kinds.contains(&CaseIssueKind::MissingStudies));
}

#[test]
fn validate_accepts_consistent_case() {
    let case = Case::from_json(MINIMAL_CASE).unwrap();
    assert!(case.validate().is_empty());
}
