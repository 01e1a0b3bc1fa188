use crate::NerveReference;
use crate::reference::ReferenceValues;

/// Tibial nerve. Motor only; recorded at abductor hallucis.
pub struct Tibial;

impl NerveReference for Tibial {
    fn id(&self) -> &str {
        "tibial"
    }

    fn name(&self) -> &str {
        "Tibial"
    }

    fn aliases(&self) -> &[&str] {
        &["tibial"]
    }

    fn motor(&self) -> Option<ReferenceValues> {
        Some(ReferenceValues::new(5.8, 4.0, 41.0))
    }

    fn sensory(&self) -> Option<ReferenceValues> {
        None
    }
}
