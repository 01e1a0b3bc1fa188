use crate::NerveReference;
use crate::reference::ReferenceValues;

/// Ulnar nerve. Motor recorded at abductor digiti minimi, sensory to digit 5.
pub struct Ulnar;

impl NerveReference for Ulnar {
    fn id(&self) -> &str {
        "ulnar"
    }

    fn name(&self) -> &str {
        "Ulnar"
    }

    fn aliases(&self) -> &[&str] {
        &["ulnar"]
    }

    fn motor(&self) -> Option<ReferenceValues> {
        Some(ReferenceValues::new(3.3, 6.0, 49.0))
    }

    fn sensory(&self) -> Option<ReferenceValues> {
        Some(ReferenceValues::new(3.1, 17.0, 50.0))
    }
}
