//! Planner parameters
//!
//! Loaded from YAML; every field falls back to its default when absent.

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::common::ConfigLoadError;

const DEFAULT_MAX_DIST_BETWEEN_PATHFRAMES: f64 = 0.10;
const DEFAULT_RELATIVE_VALIDITY_CHECK_RESOLUTION: f64 = 0.004;
const DEFAULT_SOLVER_MAXTIME: f64 = 1.0;

/// Smallest spacing accepted for path-frame interpolation (meters)
pub const MIN_MAX_DIST_BETWEEN_PATHFRAMES: f64 = 0.001;
/// Smallest motion-check resolution accepted, as a fraction of the space extent
pub const MIN_RELATIVE_VALIDITY_CHECK_RESOLUTION: f64 = 1e-5;
/// Longest search budget accepted (seconds)
pub const MAX_SOLVER_MAXTIME: f64 = 3600.0;

mod defaults {
    pub fn max_dist_between_pathframes() -> f64 {
        super::DEFAULT_MAX_DIST_BETWEEN_PATHFRAMES
    }

    pub fn max_footprint_cost() -> i32 {
        256
    }

    pub fn relative_validity_check_resolution() -> f64 {
        super::DEFAULT_RELATIVE_VALIDITY_CHECK_RESOLUTION
    }

    pub fn enabled() -> bool {
        true
    }

    pub fn solver_maxtime() -> f64 {
        super::DEFAULT_SOLVER_MAXTIME
    }

    pub fn global_planner_type() -> String {
        "LBKPIECE".to_string()
    }
}

/// Parameters read at the start of every planning request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Maximum distance between consecutive poses of the output path (meters)
    #[serde(default = "defaults::max_dist_between_pathframes")]
    pub max_dist_between_pathframes: f64,

    /// Highest footprint cost still considered free
    #[serde(default = "defaults::max_footprint_cost")]
    pub max_footprint_cost: i32,

    /// Motion-check step as a fraction of the search space extent
    #[serde(default = "defaults::relative_validity_check_resolution")]
    pub relative_validity_check_resolution: f64,

    /// Densify the solution before returning it
    #[serde(default = "defaults::enabled")]
    pub interpolate_path: bool,

    /// Time budget of the search (seconds)
    #[serde(default = "defaults::solver_maxtime")]
    pub solver_maxtime: f64,

    /// Publish diagnostics and statistics records
    #[serde(default = "defaults::enabled")]
    pub publish_diagnostics: bool,

    /// Search algorithm identifier
    #[serde(default = "defaults::global_planner_type")]
    pub global_planner_type: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_dist_between_pathframes: defaults::max_dist_between_pathframes(),
            max_footprint_cost: defaults::max_footprint_cost(),
            relative_validity_check_resolution: defaults::relative_validity_check_resolution(),
            interpolate_path: true,
            solver_maxtime: defaults::solver_maxtime(),
            publish_diagnostics: true,
            global_planner_type: defaults::global_planner_type(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        serde_yaml::to_string(self).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Replace invalid values with defaults or clamp them into range,
    /// returning a warning for each
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        let spacing = self.max_dist_between_pathframes;
        if spacing <= 0.0 || spacing.is_nan() {
            warnings.push(format!(
                "Assigned distance for interpolation of path-frames ({}) invalid. Distance must be greater than 0. Distance set to default value: {:.2}",
                spacing, DEFAULT_MAX_DIST_BETWEEN_PATHFRAMES
            ));
            self.max_dist_between_pathframes = DEFAULT_MAX_DIST_BETWEEN_PATHFRAMES;
        } else if spacing < MIN_MAX_DIST_BETWEEN_PATHFRAMES {
            warnings.push(format!(
                "Assigned distance for interpolation of path-frames ({}) too small. Distance set to minimum value: {}",
                spacing, MIN_MAX_DIST_BETWEEN_PATHFRAMES
            ));
            self.max_dist_between_pathframes = MIN_MAX_DIST_BETWEEN_PATHFRAMES;
        }

        let resolution = self.relative_validity_check_resolution;
        if resolution.is_nan() || resolution < MIN_RELATIVE_VALIDITY_CHECK_RESOLUTION {
            warnings.push(format!(
                "Validity check resolution ({}) must be at least {}. Resolution set to default value: {}",
                resolution, MIN_RELATIVE_VALIDITY_CHECK_RESOLUTION, DEFAULT_RELATIVE_VALIDITY_CHECK_RESOLUTION
            ));
            self.relative_validity_check_resolution = DEFAULT_RELATIVE_VALIDITY_CHECK_RESOLUTION;
        }

        let maxtime = self.solver_maxtime;
        if maxtime < 0.0 || maxtime.is_nan() {
            warnings.push(format!(
                "Solver time ({}) invalid. Time must not be negative. Time set to default value: {:.1}s",
                maxtime, DEFAULT_SOLVER_MAXTIME
            ));
            self.solver_maxtime = DEFAULT_SOLVER_MAXTIME;
        } else if maxtime > MAX_SOLVER_MAXTIME {
            warnings.push(format!(
                "Solver time ({}) too large. Time set to maximum value: {:.1}s",
                maxtime, MAX_SOLVER_MAXTIME
            ));
            self.solver_maxtime = MAX_SOLVER_MAXTIME;
        }

        for msg in &warnings {
            warn!("{}", msg);
        }
        warnings
    }
}

/// Where the planner reads its parameters from on each request
pub trait ParameterSource: Send + Sync {
    fn planner_config(&self) -> Result<PlannerConfig, ConfigLoadError>;
}

impl ParameterSource for PlannerConfig {
    fn planner_config(&self) -> Result<PlannerConfig, ConfigLoadError> {
        Ok(self.clone())
    }
}

/// YAML file re-read on every request, so edits apply to the next plan
#[derive(Debug, Clone)]
pub struct YamlParameterFile {
    path: PathBuf,
}

impl YamlParameterFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ParameterSource for YamlParameterFile {
    fn planner_config(&self) -> Result<PlannerConfig, ConfigLoadError> {
        PlannerConfig::load(&self.path)
    }
}
