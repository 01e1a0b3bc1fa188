pub mod fibular;
pub mod median;
pub mod radial;
pub mod sural;
pub mod tibial;
pub mod ulnar;
