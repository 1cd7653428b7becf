//! Outbound records: the visualizable plan, per-call diagnostics and
//! planning statistics

use log::{debug, info};

use crate::common::{Header, PlanPublisher, Pose, PoseStamped};

/// Plan as published for visualization
#[derive(Debug, Clone, PartialEq)]
pub struct PlanMessage {
    pub header: Header,
    pub poses: Vec<PoseStamped>,
}

impl PlanMessage {
    /// Message for `path`, using the header of its first pose
    ///
    /// Returns `None` for an empty path.
    pub fn from_path(path: &[PoseStamped]) -> Option<Self> {
        let first = path.first()?;
        Some(PlanMessage {
            header: first.header.clone(),
            poses: path.to_vec(),
        })
    }
}

/// Summary of one call to the search engine
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerDiagnostics {
    pub summary: String,
    pub group: String,
    pub planner: String,
    pub result: String,
    /// Seconds spent in `solve`
    pub planning_time: f64,
    /// States in the solution before interpolation
    pub trajectory_size: usize,
    pub trajectory_duration: f64,
}

impl PlannerDiagnostics {
    pub fn new(planner: &str, solved: bool, planning_time: f64) -> Self {
        PlannerDiagnostics {
            summary: if solved { "Planning success" } else { "Planning Failed" }.to_string(),
            group: "base".to_string(),
            planner: planner.to_string(),
            result: if solved { "success" } else { "failed" }.to_string(),
            planning_time,
            trajectory_size: 0,
            trajectory_duration: 0.0,
        }
    }
}

/// Statistics of a successful planning request
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerStats {
    pub start: Pose,
    pub goal: Pose,
    /// Straight-line distance between start and goal
    pub start_goal_dist: f64,
    /// Length of the simplified solution in the search space metric
    pub path_length: f64,
    /// Seconds from request to publication, post-processing included
    pub total_planning_time: f64,
}

/// Publisher that writes every record to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPublisher;

impl PlanPublisher for LogPublisher {
    fn publish_plan(&self, plan: &PlanMessage) -> anyhow::Result<()> {
        info!("Plan with {} poses in frame {}", plan.poses.len(), plan.header.frame_id);
        for (i, pose) in plan.poses.iter().enumerate() {
            debug!(
                "  [{}] ({:.3}, {:.3})",
                i, pose.pose.position.x, pose.pose.position.y
            );
        }
        Ok(())
    }

    fn publish_diagnostics(&self, d: &PlannerDiagnostics) -> anyhow::Result<()> {
        info!(
            "{} [{}/{}]: result={} planning_time={:.4}s trajectory_size={}",
            d.summary, d.group, d.planner, d.result, d.planning_time, d.trajectory_size
        );
        Ok(())
    }

    fn publish_statistics(&self, s: &PlannerStats) -> anyhow::Result<()> {
        info!(
            "Planner statistics: start_goal_dist={:.3} path_length={:.3} total_planning_time={:.4}s",
            s.start_goal_dist, s.path_length, s.total_planning_time
        );
        Ok(())
    }
}
