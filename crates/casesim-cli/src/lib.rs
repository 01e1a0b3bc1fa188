//! casesim-cli
//!
//! Terminal front end for the case simulator: user config, case catalogue
//! loading, text rendering and the interactive play loop.

pub mod catalogue;
pub mod config;
pub mod play;
pub mod render;
