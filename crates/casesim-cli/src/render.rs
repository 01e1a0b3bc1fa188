//! Plain-text rendering of stage views and study tables.

use std::fmt;

use casesim_core::{EmgField, EmgStudy, Measurement, NcsField, NcsStudy, Presentation, StudyResult};
use casesim_engine::view::StudyEvidence;
use casesim_engine::{
    CaseSummary, DifferentialResult, EmgDecisionOutcome, FinalDiagnosisResult, StageView,
};
use casesim_standards::standardize::effective_kind;

use crate::config::CliConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_reference_ranges: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_reference_ranges: true,
        }
    }
}

impl From<&CliConfig> for RenderOptions {
    fn from(config: &CliConfig) -> Self {
        Self {
            show_reference_ranges: config.show_reference_ranges,
        }
    }
}

/// Displays a [`StageView`] as a terminal screen.
pub struct ViewDisplay<'a> {
    pub view: &'a StageView,
    pub options: RenderOptions,
}

impl fmt::Display for ViewDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.view {
            StageView::Presentation {
                case_id,
                title,
                difficulty,
                presentation,
            } => {
                writeln!(f, "== {title} ==")?;
                writeln!(f, "case {case_id}, {difficulty}")?;
                writeln!(f)?;
                write_presentation(f, presentation)
            }
            StageView::PhysicalExam { findings } => {
                writeln!(f, "== Physical exam ==")?;
                for finding in findings {
                    writeln!(f, "{}: {}", finding.category, finding.finding)?;
                }
                Ok(())
            }
            StageView::DifferentialBuilder { prompt, submitted } => {
                writeln!(f, "== Differential diagnosis ==")?;
                match submitted {
                    Some(result) => write!(f, "{}", DifferentialDisplay(result)),
                    None => writeln!(f, "{prompt}"),
                }
            }
            StageView::EmgDecision {
                prompt, outcome, ..
            } => {
                writeln!(f, "== Electrodiagnostic testing ==")?;
                match outcome {
                    Some(outcome) => write!(f, "{}", OutcomeDisplay(outcome)),
                    None => writeln!(f, "{prompt}"),
                }
            }
            StageView::StudyResults {
                evidence,
                educational_note,
                shown_educationally,
            } => {
                writeln!(f, "== Study results ==")?;
                if *shown_educationally {
                    writeln!(
                        f,
                        "You did not order these studies. This is what they would have shown."
                    )?;
                }
                if let Some(evidence) = evidence {
                    write_evidence(f, evidence, self.options)?;
                }
                if let Some(note) = educational_note {
                    writeln!(f, "{note}")?;
                }
                Ok(())
            }
            StageView::FinalDiagnosis { prompt, result } => {
                writeln!(f, "== Final diagnosis ==")?;
                match result {
                    Some(result) => write!(f, "{}", FinalDisplay(result)),
                    None => writeln!(f, "{prompt}"),
                }
            }
        }
    }
}

fn write_presentation(f: &mut fmt::Formatter<'_>, p: &Presentation) -> fmt::Result {
    let mut demographics = Vec::new();
    if let Some(age) = p.age {
        demographics.push(format!("{age} years"));
    }
    if let Some(sex) = &p.sex {
        demographics.push(sex.clone());
    }
    if let Some(occupation) = &p.occupation {
        demographics.push(occupation.clone());
    }
    if !demographics.is_empty() {
        writeln!(f, "{}", demographics.join(", "))?;
    }

    writeln!(f, "Chief complaint: {}", p.chief_complaint)?;
    if !p.history_of_present_illness.is_empty() {
        writeln!(f, "History: {}", p.history_of_present_illness)?;
    }
    let optional = [
        ("Past medical history", &p.past_medical_history),
        ("Medications", &p.medications),
        ("Social history", &p.social_history),
        ("Family history", &p.family_history),
        ("Review of systems", &p.review_of_systems),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            writeln!(f, "{label}: {value}")?;
        }
    }
    Ok(())
}

fn write_evidence(
    f: &mut fmt::Formatter<'_>,
    evidence: &StudyEvidence,
    options: RenderOptions,
) -> fmt::Result {
    write!(
        f,
        "{}",
        StudiesDisplay {
            ncs: &evidence.ncs,
            emg: &evidence.emg,
            options,
        }
    )
}

/// NCS and EMG tables for one case.
pub struct StudiesDisplay<'a> {
    pub ncs: &'a [NcsStudy],
    pub emg: &'a [EmgStudy],
    pub options: RenderOptions,
}

impl fmt::Display for StudiesDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.ncs.is_empty() {
            writeln!(f, "Nerve conduction studies")?;
            for study in self.ncs {
                let result = match study.result {
                    StudyResult::Normal => "normal",
                    StudyResult::Abnormal => "ABNORMAL",
                };
                writeln!(f, "  {} [{}] {result}", study.nerve, effective_kind(study))?;
                for field in NcsField::ALL {
                    let measurement = study.measurement(field);
                    if measurement.is_empty() {
                        continue;
                    }
                    writeln!(
                        f,
                        "    {:<24}{}",
                        field.label(),
                        measurement_text(measurement, self.options)
                    )?;
                }
                if let Some(comment) = &study.comment {
                    writeln!(f, "    {comment}")?;
                }
            }
        }

        if !self.emg.is_empty() {
            writeln!(f, "Needle EMG")?;
            for study in self.emg {
                let innervation: Vec<&str> = [study.nerve.as_deref(), study.root.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect();
                if innervation.is_empty() {
                    writeln!(f, "  {}", study.muscle)?;
                } else {
                    writeln!(f, "  {} ({})", study.muscle, innervation.join(", "))?;
                }
                let findings: Vec<String> = EmgField::ALL
                    .into_iter()
                    .filter_map(|field| {
                        study
                            .field(field)
                            .map(|value| format!("{}: {value}", field.label()))
                    })
                    .collect();
                if !findings.is_empty() {
                    writeln!(f, "    {}", findings.join("; "))?;
                }
            }
        }
        Ok(())
    }
}

fn measurement_text(measurement: &Measurement, options: RenderOptions) -> String {
    let value = measurement
        .value
        .map_or_else(|| "-".to_string(), |v| format!("{v:.1}"));
    match (&measurement.normal_range, options.show_reference_ranges) {
        (Some(range), true) => format!("{value} (normal {range})"),
        _ => value,
    }
}

pub struct DifferentialDisplay<'a>(pub &'a DifferentialResult);

impl fmt::Display for DifferentialDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        if result.empty_submission {
            writeln!(f, "No diagnoses entered.")?;
        }
        writeln!(
            f,
            "You named {} of {} expected diagnoses.",
            result.matched.len(),
            result.total_expected
        )?;
        for name in &result.matched {
            writeln!(f, "  + {name}")?;
        }
        for name in &result.unmatched {
            writeln!(f, "  - {name}")?;
        }
        Ok(())
    }
}

pub struct OutcomeDisplay<'a>(pub &'a EmgDecisionOutcome);

impl fmt::Display for OutcomeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.0.feedback())?;
        if let Some(note) = self.0.educational_note() {
            writeln!(f, "{note}")?;
        }
        Ok(())
    }
}

pub struct FinalDisplay<'a>(pub &'a FinalDiagnosisResult);

impl fmt::Display for FinalDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        if result.is_correct {
            writeln!(f, "Correct: {}", result.correct_diagnosis)?;
        } else {
            writeln!(
                f,
                "Not quite. You said \"{}\"; the diagnosis is {}.",
                result.submitted, result.correct_diagnosis
            )?;
        }
        if !result.explanation.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", result.explanation)?;
        }
        if let Some(note) = &result.educational_note {
            writeln!(f, "{note}")?;
        }
        Ok(())
    }
}

pub struct CatalogueDisplay<'a>(pub &'a [CaseSummary]);

impl fmt::Display for CatalogueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No cases found.");
        }
        for summary in self.0 {
            writeln!(
                f,
                "{:<20} {:<13} {}",
                summary.id,
                summary.difficulty.to_string(),
                summary.title
            )?;
            writeln!(f, "{:<35}{}", "", summary.chief_complaint)?;
        }
        Ok(())
    }
}
