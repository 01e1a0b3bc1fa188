use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An expected differential diagnosis. Authored either as a bare string or
/// as a record with a rationale; matching only ever looks at the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum DifferentialEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rationale: Option<String>,
    },
}

impl DifferentialEntry {
    pub fn name(&self) -> &str {
        match self {
            DifferentialEntry::Name(name) => name,
            DifferentialEntry::Detailed { name, .. } => name,
        }
    }

    pub fn rationale(&self) -> Option<&str> {
        match self {
            DifferentialEntry::Name(_) => None,
            DifferentialEntry::Detailed { rationale, .. } => rationale.as_deref(),
        }
    }
}

impl From<&str> for DifferentialEntry {
    fn from(name: &str) -> Self {
        DifferentialEntry::Name(name.to_string())
    }
}
