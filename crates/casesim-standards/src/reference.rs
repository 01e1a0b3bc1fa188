use casesim_core::{NcsField, NormalRange, StudyKind};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Typical normal limits for one nerve and study kind.
///
/// Latency is an upper bound (onset latency for motor studies, peak latency
/// for sensory studies); amplitude and conduction velocity are lower bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReferenceValues {
    /// ms
    pub latency_upper: f64,
    /// mV for motor, µV for sensory
    pub amplitude_lower: f64,
    /// m/s
    pub velocity_lower: f64,
}

impl ReferenceValues {
    pub const fn new(latency_upper: f64, amplitude_lower: f64, velocity_lower: f64) -> Self {
        Self {
            latency_upper,
            amplitude_lower,
            velocity_lower,
        }
    }

    /// The normal range this table implies for a field, if any.
    pub fn range_for(&self, kind: StudyKind, field: NcsField) -> Option<NormalRange> {
        if field == latency_field(kind) {
            return Some(NormalRange::Below {
                limit: self.latency_upper,
            });
        }
        match field {
            NcsField::Amplitude => Some(NormalRange::Above {
                limit: self.amplitude_lower,
            }),
            NcsField::ConductionVelocity => Some(NormalRange::Above {
                limit: self.velocity_lower,
            }),
            _ => None,
        }
    }
}

/// Motor studies report onset (distal) latency, sensory studies peak latency.
pub fn latency_field(kind: StudyKind) -> NcsField {
    match kind {
        StudyKind::Motor => NcsField::OnsetLatency,
        StudyKind::Sensory | StudyKind::Comparison => NcsField::PeakLatency,
    }
}
