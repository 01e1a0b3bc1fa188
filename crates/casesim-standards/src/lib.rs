//! casesim-standards
//!
//! Reference normal values for nerve conduction studies and the data
//! standardizer that fills in what authored case content leaves implicit.
//! Pure data and pure functions, no I/O.

pub mod nerves;
pub mod reference;
pub mod standardize;

use casesim_core::StudyKind;
use reference::ReferenceValues;

pub use standardize::{Standardized, UnresolvedReason, UnresolvedReferenceWarning, standardize};

/// Trait implemented by each nerve in the reference vocabulary.
pub trait NerveReference: Send + Sync {
    /// Unique identifier for this nerve (e.g., "median", "fibular").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "Median", "Fibular (peroneal)").
    fn name(&self) -> &str;

    /// Lower-case fragments that identify this nerve inside a study label.
    fn aliases(&self) -> &[&str];

    /// Typical normal values for the motor study, if one is standard.
    fn motor(&self) -> Option<ReferenceValues>;

    /// Typical normal values for the sensory study, if one is standard.
    fn sensory(&self) -> Option<ReferenceValues>;

    /// Reference values for a study kind. Comparison studies have none.
    fn reference(&self, kind: StudyKind) -> Option<ReferenceValues> {
        match kind {
            StudyKind::Motor => self.motor(),
            StudyKind::Sensory => self.sensory(),
            StudyKind::Comparison => None,
        }
    }

    /// Case-insensitive substring match against the aliases.
    fn matches(&self, label: &str) -> bool {
        let label = label.to_lowercase();
        self.aliases().iter().any(|alias| label.contains(alias))
    }
}

static NERVES: std::sync::LazyLock<Vec<Box<dyn NerveReference>>> =
    std::sync::LazyLock::new(|| {
        // Order matters: a label such as "Fibular Motor (Tibialis Anterior)"
        // mentions two nerves and the first match wins.
        vec![
            Box::new(nerves::median::Median),
            Box::new(nerves::ulnar::Ulnar),
            Box::new(nerves::radial::Radial),
            Box::new(nerves::fibular::Fibular),
            Box::new(nerves::tibial::Tibial),
            Box::new(nerves::sural::Sural),
        ]
    });

/// Return all nerves in the reference vocabulary.
pub fn all_nerves() -> &'static [Box<dyn NerveReference>] {
    &NERVES
}

/// Look up a nerve by ID.
pub fn get_nerve(id: &str) -> Option<&'static dyn NerveReference> {
    all_nerves().iter().find(|n| n.id() == id).map(|n| &**n)
}

/// Resolve a free-form study label to a nerve in the vocabulary.
pub fn resolve_nerve(label: &str) -> Option<&'static dyn NerveReference> {
    all_nerves()
        .iter()
        .find(|n| n.matches(label))
        .map(|n| &**n)
}

/// Reference values for a study label and kind, or `None` when the label is
/// outside the vocabulary or the nerve has no standard study of that kind.
pub fn reference_for(kind: StudyKind, label: &str) -> Option<ReferenceValues> {
    resolve_nerve(label)?.reference(kind)
}
