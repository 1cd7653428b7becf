//! Common traits defining the seams between the planner and its collaborators

use std::sync::Arc;
use std::time::Duration;

use crate::common::types::*;
use crate::path_planning::algorithm::AlgorithmKind;
use crate::path_planning::diagnostics::{PlanMessage, PlannerDiagnostics, PlannerStats};
use crate::path_planning::state_space::SpaceInformation;

/// Live occupancy-cost map the planner plans against
///
/// Implementations answer from their current map; the planner reads the
/// extents once at the start of every request.
pub trait Costmap: Send + Sync {
    /// Map width in meters
    fn size_in_meters_x(&self) -> f64;

    /// Map height in meters
    fn size_in_meters_y(&self) -> f64;

    fn origin_x(&self) -> f64;

    fn origin_y(&self) -> f64;

    /// Frame every goal must be expressed in
    fn global_frame_id(&self) -> String;

    /// Robot outline, in the robot frame
    fn robot_footprint(&self) -> Vec<Point2D>;

    fn inscribed_radius(&self) -> f64;

    fn circumscribed_radius(&self) -> f64;

    /// Cost of placing `footprint` at (x, y, theta)
    ///
    /// A negative value means the pose is outside the map, the footprint is
    /// unusable, or it hits a lethal obstacle.
    fn footprint_cost(
        &self,
        x: f64,
        y: f64,
        theta: f64,
        footprint: &[Point2D],
        inscribed_radius: f64,
        circumscribed_radius: f64,
    ) -> f64;
}

/// Predicate the search engine consults for every candidate state
///
/// Multi-threaded algorithms call this concurrently.
pub trait StateValidityChecker: Send + Sync {
    fn is_valid(&self, state: &SE2State) -> bool;
}

/// A sampling-based search algorithm bound to one search space
pub trait SearchAlgorithm: Send {
    /// Search for a path from `start` to `goal`, giving up after `max_time`
    fn solve(&mut self, start: &SE2State, goal: &SE2State, max_time: Duration) -> bool;

    /// Best-effort shortening of the last solution
    fn simplify(&mut self);

    /// States of the last solution, in order
    fn solution(&self) -> Option<Vec<SE2State>>;
}

/// Factory for search algorithms, supplied by the planning engine
pub trait PlanningEngine: Send + Sync {
    fn create(&self, kind: AlgorithmKind, space: Arc<SpaceInformation>) -> Box<dyn SearchAlgorithm>;
}

/// Outbound channel for plans and planner records
pub trait PlanPublisher: Send + Sync {
    fn publish_plan(&self, plan: &PlanMessage) -> anyhow::Result<()>;

    fn publish_diagnostics(&self, diagnostics: &PlannerDiagnostics) -> anyhow::Result<()>;

    fn publish_statistics(&self, stats: &PlannerStats) -> anyhow::Result<()>;
}

impl<T: PlanPublisher + ?Sized> PlanPublisher for Arc<T> {
    fn publish_plan(&self, plan: &PlanMessage) -> anyhow::Result<()> {
        (**self).publish_plan(plan)
    }

    fn publish_diagnostics(&self, diagnostics: &PlannerDiagnostics) -> anyhow::Result<()> {
        (**self).publish_diagnostics(diagnostics)
    }

    fn publish_statistics(&self, stats: &PlannerStats) -> anyhow::Result<()> {
        (**self).publish_statistics(stats)
    }
}
