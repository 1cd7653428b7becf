//! SE(2) global planning on a costmap
//!
//! Bridges a sampling-based search engine to the robot's footprint and
//! costmap, and turns its sparse solution into a dense sequence of poses.

pub mod algorithm;
pub mod config;
pub mod conversions;
pub mod diagnostics;
pub mod interpolation;
pub mod planner;
pub mod state_space;
pub mod validity;

#[cfg(test)]
pub(crate) mod testing;

pub use algorithm::*;
pub use config::*;
pub use conversions::*;
pub use diagnostics::*;
pub use interpolation::*;
pub use planner::*;
pub use state_space::*;
pub use validity::*;
