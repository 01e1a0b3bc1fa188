use crate::NerveReference;
use crate::reference::ReferenceValues;

/// Fibular (peroneal) nerve. Motor recorded at extensor digitorum brevis,
/// sensory values are for the superficial fibular branch.
pub struct Fibular;

impl NerveReference for Fibular {
    fn id(&self) -> &str {
        "fibular"
    }

    fn name(&self) -> &str {
        "Fibular (peroneal)"
    }

    fn aliases(&self) -> &[&str] {
        &["fibular", "peroneal"]
    }

    fn motor(&self) -> Option<ReferenceValues> {
        Some(ReferenceValues::new(6.5, 2.0, 44.0))
    }

    fn sensory(&self) -> Option<ReferenceValues> {
        Some(ReferenceValues::new(4.4, 6.0, 40.0))
    }
}
