//! Error types for the global planner

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Which end of the planning request a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Error loading planner parameters
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    Io(String),
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Main error type for a planning request
#[derive(Debug, Error)]
pub enum PlannerError {
    /// `make_plan` called before `initialize`
    #[error("the planner has not been initialized, call initialize() to use the planner")]
    NotInitialized,

    /// Goal expressed in a frame other than the costmap's global frame
    #[error("planner only accepts goals in the {expected} frame, but a goal was sent in the {actual} frame")]
    FrameMismatch { expected: String, actual: String },

    /// Robot footprint at the start or goal pose is in collision
    #[error("collision on {0}: planning aborted")]
    EndpointCollision(Endpoint),

    /// Start or goal lies outside the map bounds
    #[error("{0} pose lies outside the bounds of the map")]
    OutOfBounds(Endpoint),

    /// Solver found no solution within its time budget
    #[error("no path found within {max_time:?}")]
    NoPathFound { max_time: Duration },

    /// Solution too short to interpolate
    #[error("path has only {0} poses, interpolation not possible")]
    DegeneratePath(usize),

    /// `global_planner_type` names no known algorithm
    #[error("the planner named [{0}] passed in global_planner_type is not supported")]
    UnknownAlgorithm(String),

    /// Costmap reports no positive extent on one of its axes
    #[error("map of size ({width}, {height}) has no area to plan in")]
    EmptyMap { width: f64, height: f64 },

    /// Solution spacing that is not a positive distance or would need too many poses
    #[error("cannot interpolate path with a spacing of {0}")]
    InvalidSpacing(f64),

    /// Robot footprint polygon has fewer than three vertices
    #[error("robot footprint has {0} points, at least 3 are required")]
    DegenerateFootprint(usize),

    /// Parameters could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigLoadError),
}

impl PlannerError {
    /// Short, stable tag identifying the failure
    pub fn kind(&self) -> &'static str {
        match self {
            PlannerError::NotInitialized => "not-initialized",
            PlannerError::FrameMismatch { .. } => "frame-mismatch",
            PlannerError::EndpointCollision(Endpoint::Start) => "endpoint-collision(start)",
            PlannerError::EndpointCollision(Endpoint::Goal) => "endpoint-collision(goal)",
            PlannerError::OutOfBounds(Endpoint::Start) => "out-of-bounds(start)",
            PlannerError::OutOfBounds(Endpoint::Goal) => "out-of-bounds(goal)",
            PlannerError::NoPathFound { .. } => "search-timeout",
            PlannerError::DegeneratePath(_) => "degenerate-result",
            PlannerError::UnknownAlgorithm(_)
            | PlannerError::EmptyMap { .. }
            | PlannerError::InvalidSpacing(_)
            | PlannerError::DegenerateFootprint(_)
            | PlannerError::Config(_) => "misconfiguration",
        }
    }

    /// True for errors caused by the planner's setup rather than the request
    pub fn is_misconfiguration(&self) -> bool {
        self.kind() == "misconfiguration"
    }
}

/// Result type alias for planning operations
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlannerError::EndpointCollision(Endpoint::Start);
        assert_eq!(format!("{}", err), "collision on start: planning aborted");

        let err = PlannerError::OutOfBounds(Endpoint::Goal);
        assert_eq!(format!("{}", err), "goal pose lies outside the bounds of the map");
    }

    #[test]
    fn test_error_kind_distinguishes_endpoints() {
        assert_eq!(
            PlannerError::EndpointCollision(Endpoint::Start).kind(),
            "endpoint-collision(start)"
        );
        assert_ne!(
            PlannerError::OutOfBounds(Endpoint::Start).kind(),
            PlannerError::OutOfBounds(Endpoint::Goal).kind()
        );
    }

    #[test]
    fn test_error_from_config() {
        let err: PlannerError = ConfigLoadError::Parse("bad yaml".to_string()).into();
        assert!(matches!(err, PlannerError::Config(_)));
        assert!(err.is_misconfiguration());
        assert_eq!(format!("{}", err), "failed to parse config: bad yaml");
    }
}
