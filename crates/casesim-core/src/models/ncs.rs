use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::range::NormalRange;

/// One nerve conduction measurement as authored in a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NcsStudy {
    /// Study label as authored, e.g. "Median Motor (APB)" or "Sural".
    pub nerve: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<StudyKind>,
    pub result: StudyResult,
    #[serde(default, skip_serializing_if = "Measurement::is_empty")]
    pub onset_latency: Measurement,
    #[serde(default, skip_serializing_if = "Measurement::is_empty")]
    pub peak_latency: Measurement,
    #[serde(default, skip_serializing_if = "Measurement::is_empty")]
    pub amplitude: Measurement,
    #[serde(default, skip_serializing_if = "Measurement::is_empty")]
    pub conduction_velocity: Measurement,
    #[serde(default, skip_serializing_if = "Measurement::is_empty")]
    pub distance: Measurement,
    #[serde(default, skip_serializing_if = "Measurement::is_empty")]
    pub negative_peak_duration: Measurement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl NcsStudy {
    pub fn new(nerve: &str, result: StudyResult) -> Self {
        Self {
            nerve: nerve.to_string(),
            kind: None,
            result,
            onset_latency: Measurement::default(),
            peak_latency: Measurement::default(),
            amplitude: Measurement::default(),
            conduction_velocity: Measurement::default(),
            distance: Measurement::default(),
            negative_peak_duration: Measurement::default(),
            comment: None,
        }
    }

    pub fn measurement(&self, field: NcsField) -> &Measurement {
        match field {
            NcsField::OnsetLatency => &self.onset_latency,
            NcsField::PeakLatency => &self.peak_latency,
            NcsField::Amplitude => &self.amplitude,
            NcsField::ConductionVelocity => &self.conduction_velocity,
            NcsField::Distance => &self.distance,
            NcsField::NegativePeakDuration => &self.negative_peak_duration,
        }
    }

    pub fn measurement_mut(&mut self, field: NcsField) -> &mut Measurement {
        match field {
            NcsField::OnsetLatency => &mut self.onset_latency,
            NcsField::PeakLatency => &mut self.peak_latency,
            NcsField::Amplitude => &mut self.amplitude,
            NcsField::ConductionVelocity => &mut self.conduction_velocity,
            NcsField::Distance => &mut self.distance,
            NcsField::NegativePeakDuration => &mut self.negative_peak_duration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StudyKind {
    Motor,
    Sensory,
    /// Side-to-side or nerve-to-nerve comparison (e.g. palmar mixed).
    Comparison,
}

impl fmt::Display for StudyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StudyKind::Motor => "motor",
            StudyKind::Sensory => "sensory",
            StudyKind::Comparison => "comparison",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StudyResult {
    Normal,
    Abnormal,
}

/// The measurable fields of an NCS study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NcsField {
    OnsetLatency,
    PeakLatency,
    Amplitude,
    ConductionVelocity,
    Distance,
    NegativePeakDuration,
}

impl NcsField {
    pub const ALL: [NcsField; 6] = [
        NcsField::OnsetLatency,
        NcsField::PeakLatency,
        NcsField::Amplitude,
        NcsField::ConductionVelocity,
        NcsField::Distance,
        NcsField::NegativePeakDuration,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NcsField::OnsetLatency => "Onset latency",
            NcsField::PeakLatency => "Peak latency",
            NcsField::Amplitude => "Amplitude",
            NcsField::ConductionVelocity => "Conduction velocity",
            NcsField::Distance => "Distance",
            NcsField::NegativePeakDuration => "Negative peak duration",
        }
    }
}

/// A numeric value paired with its normal-range display string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Measurement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Display string such as `"<4.4"` or `">50"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_range: Option<String>,
}

impl Measurement {
    pub fn new(value: f64, normal_range: &str) -> Self {
        Self {
            value: Some(value),
            normal_range: Some(normal_range.to_string()),
        }
    }

    pub fn value(value: f64) -> Self {
        Self {
            value: Some(value),
            normal_range: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.normal_range.is_none()
    }

    /// Whether the value satisfies its own normal range.
    ///
    /// `None` when either side is missing or the range string does not parse.
    pub fn within_normal(&self) -> Option<bool> {
        let value = self.value?;
        let range = NormalRange::parse(self.normal_range.as_deref()?).ok()?;
        Some(range.contains(value))
    }
}
