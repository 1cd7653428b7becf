//! SE(2) global planner
//!
//! Plans collision-free paths for a mobile base by handing a bounded SE(2)
//! search space and a footprint-cost validity oracle to a sampling-based
//! search engine, then interpolating the solution into a dense path.

// Core modules
pub mod common;
pub mod utils;

// Planning
pub mod path_planning;

// Re-export common types for convenience
pub use common::{Point2D, Point3D, Pose2D, Pose, PoseStamped, Header, Path2D, SE2State};
pub use common::{Costmap, StateValidityChecker, SearchAlgorithm, PlanningEngine, PlanPublisher};
pub use common::{PlannerError, PlannerResult, ConfigLoadError, Endpoint};
pub use path_planning::{GlobalPlanner, PlannerConfig, AlgorithmKind, interpolate_path};
