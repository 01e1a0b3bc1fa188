use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One needle examination muscle record.
///
/// Qualitative fields are authored as the short tokens used on EMG report
/// sheets ("Nml", "0", "+2", "Reduced", "Full"). A muscle authored with no
/// qualitative fields at all is a normal muscle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmgStudy {
    pub muscle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nerve: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    /// Explicit authored declaration that the muscle is normal.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub normal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insertional_activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fibrillations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positive_sharp_waves: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyphasia: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruitment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interference_pattern: Option<String>,
}

impl EmgStudy {
    pub fn new(muscle: &str) -> Self {
        Self {
            muscle: muscle.to_string(),
            ..Self::default()
        }
    }

    pub fn field(&self, field: EmgField) -> Option<&str> {
        match field {
            EmgField::InsertionalActivity => self.insertional_activity.as_deref(),
            EmgField::Fibrillations => self.fibrillations.as_deref(),
            EmgField::PositiveSharpWaves => self.positive_sharp_waves.as_deref(),
            EmgField::Amplitude => self.amplitude.as_deref(),
            EmgField::Duration => self.duration.as_deref(),
            EmgField::Polyphasia => self.polyphasia.as_deref(),
            EmgField::Recruitment => self.recruitment.as_deref(),
            EmgField::InterferencePattern => self.interference_pattern.as_deref(),
        }
    }

    pub fn field_mut(&mut self, field: EmgField) -> &mut Option<String> {
        match field {
            EmgField::InsertionalActivity => &mut self.insertional_activity,
            EmgField::Fibrillations => &mut self.fibrillations,
            EmgField::PositiveSharpWaves => &mut self.positive_sharp_waves,
            EmgField::Amplitude => &mut self.amplitude,
            EmgField::Duration => &mut self.duration,
            EmgField::Polyphasia => &mut self.polyphasia,
            EmgField::Recruitment => &mut self.recruitment,
            EmgField::InterferencePattern => &mut self.interference_pattern,
        }
    }

    /// True when no qualitative field was authored.
    pub fn has_no_findings(&self) -> bool {
        EmgField::ALL.iter().all(|f| self.field(*f).is_none())
    }
}

/// The qualitative fields of a needle EMG record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EmgField {
    InsertionalActivity,
    Fibrillations,
    PositiveSharpWaves,
    Amplitude,
    Duration,
    Polyphasia,
    Recruitment,
    InterferencePattern,
}

impl EmgField {
    pub const ALL: [EmgField; 8] = [
        EmgField::InsertionalActivity,
        EmgField::Fibrillations,
        EmgField::PositiveSharpWaves,
        EmgField::Amplitude,
        EmgField::Duration,
        EmgField::Polyphasia,
        EmgField::Recruitment,
        EmgField::InterferencePattern,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmgField::InsertionalActivity => "Insertional activity",
            EmgField::Fibrillations => "Fibrillations",
            EmgField::PositiveSharpWaves => "Positive sharp waves",
            EmgField::Amplitude => "MUAP amplitude",
            EmgField::Duration => "MUAP duration",
            EmgField::Polyphasia => "Polyphasia",
            EmgField::Recruitment => "Recruitment",
            EmgField::InterferencePattern => "Interference pattern",
        }
    }
}
