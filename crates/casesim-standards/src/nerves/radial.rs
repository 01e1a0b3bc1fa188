use crate::NerveReference;
use crate::reference::ReferenceValues;

/// Radial nerve. Sensory values are for the superficial radial branch.
pub struct Radial;

impl NerveReference for Radial {
    fn id(&self) -> &str {
        "radial"
    }

    fn name(&self) -> &str {
        "Radial"
    }

    fn aliases(&self) -> &[&str] {
        &["radial"]
    }

    fn motor(&self) -> Option<ReferenceValues> {
        Some(ReferenceValues::new(2.9, 2.0, 49.0))
    }

    fn sensory(&self) -> Option<ReferenceValues> {
        Some(ReferenceValues::new(2.9, 15.0, 50.0))
    }
}
