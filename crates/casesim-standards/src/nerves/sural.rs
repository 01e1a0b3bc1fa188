use crate::NerveReference;
use crate::reference::ReferenceValues;

/// Sural nerve. Sensory only.
pub struct Sural;

impl NerveReference for Sural {
    fn id(&self) -> &str {
        "sural"
    }

    fn name(&self) -> &str {
        "Sural"
    }

    fn aliases(&self) -> &[&str] {
        &["sural"]
    }

    fn motor(&self) -> Option<ReferenceValues> {
        None
    }

    fn sensory(&self) -> Option<ReferenceValues> {
        Some(ReferenceValues::new(4.4, 6.0, 40.0))
    }
}
