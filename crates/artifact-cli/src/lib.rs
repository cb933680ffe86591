//! CLI library components for the artifact evaluator.

pub mod logging;
pub mod render;
pub mod session;
