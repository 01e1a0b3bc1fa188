//! The data standardizer.
//!
//! Authored cases often describe a study only as "normal". Before a case is
//! shown to a learner every normal NCS study gets plausible numbers and every
//! field with a known reference gets a comparison range, and every normal EMG
//! muscle gets its normal tokens. This is the only place default values are
//! invented; authored values are never overwritten.

use casesim_core::{
    Case, EmgField, EmgStudy, NcsField, NcsStudy, NormalRange, StudyKind, StudyResult,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::reference::{ReferenceValues, latency_field};
use crate::resolve_nerve;

const LATENCY_RATIO: f64 = 0.85;
const MOTOR_AMPLITUDE_RATIO: f64 = 1.8;
const SENSORY_AMPLITUDE_RATIO: f64 = 2.5;
const VELOCITY_RATIO: f64 = 1.1;

/// A standardized copy of a case plus the studies that could not be
/// completed from the reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Standardized {
    pub case: Case,
    pub warnings: Vec<UnresolvedReferenceWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum UnresolvedReason {
    /// The study label names no nerve in the reference vocabulary.
    UnknownNerve,
    /// The nerve is known but has no standard study of this kind.
    NoReferenceForKind,
    /// The authored range admits no plausible value, so a normal field was
    /// left unset.
    UnsatisfiableRange,
}

/// Not fatal: the study is passed through with its authored fields only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct UnresolvedReferenceWarning {
    pub case_id: String,
    pub study: String,
    pub kind: StudyKind,
    pub reason: UnresolvedReason,
    pub message: String,
}

/// Produce a standardized copy of `case`. The input is left untouched.
pub fn standardize(case: &Case) -> Standardized {
    let mut standardized = case.clone();
    let mut warnings = Vec::new();

    for study in &mut standardized.ncs_studies {
        for warning in standardize_ncs(&case.id, study) {
            tracing::warn!(
                case_id = %case.id,
                study = %warning.study,
                reason = ?warning.reason,
                "{}",
                warning.message
            );
            warnings.push(warning);
        }
    }

    let mut filled_muscles = 0usize;
    for study in &mut standardized.emg_studies {
        if standardize_emg(study) {
            filled_muscles += 1;
        }
    }

    tracing::debug!(
        case_id = %case.id,
        ncs = standardized.ncs_studies.len(),
        emg = standardized.emg_studies.len(),
        filled_muscles,
        warnings = warnings.len(),
        "case standardized"
    );

    Standardized {
        case: standardized,
        warnings,
    }
}

/// Explicit kind, else "motor" anywhere in the label, else sensory.
pub fn effective_kind(study: &NcsStudy) -> StudyKind {
    study.kind.unwrap_or_else(|| {
        if study.nerve.to_lowercase().contains("motor") {
            StudyKind::Motor
        } else {
            StudyKind::Sensory
        }
    })
}

fn standardize_ncs(case_id: &str, study: &mut NcsStudy) -> Vec<UnresolvedReferenceWarning> {
    let kind = effective_kind(study);
    let label = study.nerve.clone();
    let unresolved = |reason, detail: &str| UnresolvedReferenceWarning {
        case_id: case_id.to_string(),
        study: label.clone(),
        kind,
        reason,
        message: format!("case '{case_id}': {detail} for study '{label}'"),
    };

    let Some(nerve) = resolve_nerve(&study.nerve) else {
        return vec![unresolved(UnresolvedReason::UnknownNerve, "unknown nerve")];
    };
    let Some(reference) = nerve.reference(kind) else {
        return vec![unresolved(
            UnresolvedReason::NoReferenceForKind,
            &format!("no {kind} reference for {}", nerve.name()),
        )];
    };

    let mut warnings = Vec::new();

    let normal = study.result == StudyResult::Normal;
    let fields = [
        latency_field(kind),
        NcsField::Amplitude,
        NcsField::ConductionVelocity,
    ];
    for field in fields {
        let Some(reference_range) = reference.range_for(kind, field) else {
            continue;
        };
        let measurement = study.measurement_mut(field);

        if normal && measurement.value.is_none() {
            // An authored range wins over the table so the synthesized value
            // always satisfies the range it is displayed with.
            let range = measurement
                .normal_range
                .as_deref()
                .and_then(|text| NormalRange::parse(text).ok())
                .unwrap_or(reference_range);
            match synthesize(range, kind, field, &reference) {
                Some(value) => measurement.value = Some(value),
                None => warnings.push(unresolved(
                    UnresolvedReason::UnsatisfiableRange,
                    &format!(
                        "no plausible {} inside range '{range}'",
                        field.label().to_lowercase()
                    ),
                )),
            }
        }
        if measurement.normal_range.is_none() {
            measurement.normal_range = Some(reference_range.to_string());
        }
    }

    warnings
}

/// A typical positive value inside `range`, rounded to one decimal when
/// rounding keeps it inside. `None` when the range excludes every candidate.
fn synthesize(
    range: NormalRange,
    kind: StudyKind,
    field: NcsField,
    reference: &ReferenceValues,
) -> Option<f64> {
    let ratio = match field {
        NcsField::Amplitude if kind == StudyKind::Motor => MOTOR_AMPLITUDE_RATIO,
        NcsField::Amplitude => SENSORY_AMPLITUDE_RATIO,
        NcsField::ConductionVelocity => VELOCITY_RATIO,
        _ => LATENCY_RATIO,
    };

    let from_range = match range {
        NormalRange::Below { limit } | NormalRange::AtMost { limit } => limit * LATENCY_RATIO,
        NormalRange::Above { limit } | NormalRange::AtLeast { limit } => limit * ratio,
        NormalRange::Between { min, max } => (min + max) / 2.0,
    };
    // Used when the authored range yields nothing positive, e.g. ">0".
    let from_table = match field {
        NcsField::Amplitude => reference.amplitude_lower * ratio,
        NcsField::ConductionVelocity => reference.velocity_lower * ratio,
        _ => reference.latency_upper * LATENCY_RATIO,
    };

    [from_range, from_table]
        .into_iter()
        .flat_map(|raw| [(raw * 10.0).round() / 10.0, raw])
        .find(|&candidate| candidate > 0.0 && range.contains(candidate))
}

/// Fill normal tokens into an EMG record declared (or implied) normal.
/// Returns whether any field was filled.
fn standardize_emg(study: &mut EmgStudy) -> bool {
    if !study.normal && !study.has_no_findings() {
        return false;
    }

    let mut filled = false;
    for field in EmgField::ALL {
        let slot = study.field_mut(field);
        if slot.is_none() {
            *slot = Some(normal_token(field).to_string());
            filled = true;
        }
    }
    filled
}

/// The report-sheet token for a normal finding.
pub fn normal_token(field: EmgField) -> &'static str {
    match field {
        EmgField::InsertionalActivity => "Nml",
        EmgField::Fibrillations => "0",
        EmgField::PositiveSharpWaves => "0",
        EmgField::Amplitude => "Nml",
        EmgField::Duration => "Nml",
        EmgField::Polyphasia => "0",
        EmgField::Recruitment => "Nml",
        EmgField::InterferencePattern => "Full",
    }
}
