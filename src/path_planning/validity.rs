//! Footprint-based validity oracle
//!
//! A pose is free when the costmap's footprint cost for it is non-negative
//! and does not exceed the configured maximum.

use std::sync::Arc;

use log::error;

use crate::common::{Costmap, Point2D, Pose2D, SE2State, StateValidityChecker};
use crate::path_planning::conversions::state_to_pose2d;

/// Robot outline and radii, read from the costmap once at initialization
#[derive(Debug, Clone, PartialEq)]
pub struct RobotGeometry {
    pub footprint: Vec<Point2D>,
    pub inscribed_radius: f64,
    pub circumscribed_radius: f64,
}

impl RobotGeometry {
    pub fn new(footprint: Vec<Point2D>, inscribed_radius: f64, circumscribed_radius: f64) -> Self {
        RobotGeometry {
            footprint,
            inscribed_radius,
            circumscribed_radius,
        }
    }

    pub fn from_costmap(costmap: &dyn Costmap) -> Self {
        Self::new(
            costmap.robot_footprint(),
            costmap.inscribed_radius(),
            costmap.circumscribed_radius(),
        )
    }

    /// A polygon needs at least three vertices
    pub fn is_degenerate(&self) -> bool {
        self.footprint.len() < 3
    }
}

/// Validity oracle backed by the costmap's footprint cost
#[derive(Clone)]
pub struct FootprintValidityChecker {
    costmap: Arc<dyn Costmap>,
    geometry: Arc<RobotGeometry>,
    max_footprint_cost: f64,
}

impl FootprintValidityChecker {
    pub fn new(costmap: Arc<dyn Costmap>, geometry: Arc<RobotGeometry>, max_footprint_cost: f64) -> Self {
        FootprintValidityChecker {
            costmap,
            geometry,
            max_footprint_cost,
        }
    }

    pub fn geometry(&self) -> &RobotGeometry {
        &self.geometry
    }

    /// Footprint cost at `pose`, -1.0 when there is no usable footprint
    pub fn footprint_cost(&self, pose: &Pose2D) -> f64 {
        if self.geometry.is_degenerate() {
            error!("We have no footprint... do nothing");
            return -1.0;
        }

        self.costmap.footprint_cost(
            pose.x,
            pose.y,
            pose.yaw,
            &self.geometry.footprint,
            self.geometry.inscribed_radius,
            self.geometry.circumscribed_radius,
        )
    }

    pub fn is_pose_valid(&self, pose: &Pose2D) -> bool {
        let cost = self.footprint_cost(pose);
        cost >= 0.0 && cost <= self.max_footprint_cost
    }
}

impl StateValidityChecker for FootprintValidityChecker {
    fn is_valid(&self, state: &SE2State) -> bool {
        self.is_pose_valid(&state_to_pose2d(state))
    }
}
