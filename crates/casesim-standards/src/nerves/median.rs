use crate::NerveReference;
use crate::reference::ReferenceValues;

/// Median nerve. Motor recorded at abductor pollicis brevis, sensory
/// antidromic to digit 2.
pub struct Median;

impl NerveReference for Median {
    fn id(&self) -> &str {
        "median"
    }

    fn name(&self) -> &str {
        "Median"
    }

    fn aliases(&self) -> &[&str] {
        &["median"]
    }

    fn motor(&self) -> Option<ReferenceValues> {
        Some(ReferenceValues::new(4.4, 4.0, 49.0))
    }

    fn sensory(&self) -> Option<ReferenceValues> {
        Some(ReferenceValues::new(3.5, 20.0, 50.0))
    }
}
