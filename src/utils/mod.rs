//! Utility modules for the planner

pub mod visualization;

pub use visualization::{Visualizer, PathStyle, PointStyle, colors, plot_interpolation};
