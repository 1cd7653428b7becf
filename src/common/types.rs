//! Common types used throughout the planner

use std::f64::consts::PI;
use std::time::SystemTime;

use nalgebra::UnitQuaternion;

/// Normalize an angle to (-pi, pi]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if a <= -PI {
        a + 2.0 * PI
    } else {
        a
    }
}

/// 2D point representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// 3D point representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Planar pose (position + heading)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, yaw: f64) -> Self {
        Self { x, y, yaw }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0, yaw: 0.0 }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Euclidean distance in the plane, heading ignored
    pub fn distance(&self, other: &Pose2D) -> f64 {
        self.position().distance(&other.position())
    }

    /// Normalize yaw to (-pi, pi]
    pub fn normalize_yaw(&mut self) {
        self.yaw = normalize_angle(self.yaw);
    }
}

/// State of the SE(2) search space sampled by the search engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SE2State {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

impl SE2State {
    pub fn new(x: f64, y: f64, yaw: f64) -> Self {
        Self { x, y, yaw }
    }
}

/// Full pose with 3D position and quaternion orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Point3D,
    pub orientation: UnitQuaternion<f64>,
}

impl Pose {
    pub fn new(position: Point3D, orientation: UnitQuaternion<f64>) -> Self {
        Self { position, orientation }
    }

    /// Pose on the ground plane with a pure yaw rotation
    pub fn from_xy_yaw(x: f64, y: f64, yaw: f64) -> Self {
        Self {
            position: Point3D::new(x, y, 0.0),
            orientation: UnitQuaternion::from_euler_angles(0.0, 0.0, yaw),
        }
    }
}

/// Message header: timestamp and coordinate frame
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub stamp: SystemTime,
    pub frame_id: String,
}

impl Header {
    pub fn new(frame_id: &str, stamp: SystemTime) -> Self {
        Self {
            stamp,
            frame_id: frame_id.to_string(),
        }
    }

    /// Header stamped with the current time
    pub fn now(frame_id: &str) -> Self {
        Self::new(frame_id, SystemTime::now())
    }
}

/// Pose tagged with the frame it is expressed in
#[derive(Debug, Clone, PartialEq)]
pub struct PoseStamped {
    pub header: Header,
    pub pose: Pose,
}

impl PoseStamped {
    pub fn new(header: Header, pose: Pose) -> Self {
        Self { header, pose }
    }
}

/// Path represented as a sequence of planar poses
#[derive(Debug, Clone, PartialEq)]
pub struct Path2D {
    pub poses: Vec<Pose2D>,
}

impl Path2D {
    pub fn from_poses(poses: Vec<Pose2D>) -> Self {
        Self { poses }
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn x_coords(&self) -> Vec<f64> {
        self.poses.iter().map(|p| p.x).collect()
    }

    pub fn y_coords(&self) -> Vec<f64> {
        self.poses.iter().map(|p| p.y).collect()
    }

    /// Planar length of the polyline
    pub fn total_length(&self) -> f64 {
        if self.poses.len() < 2 {
            return 0.0;
        }
        self.poses.windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point2d_distance() {
        let p1 = Point2D::new(0.0, 0.0);
        let p2 = Point2D::new(3.0, 4.0);
        assert!((p1.distance(&p2) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(4.0) - (4.0 - 2.0 * PI)).abs() < 1e-12);
        assert!((normalize_angle(-4.0) - (2.0 * PI - 4.0)).abs() < 1e-12);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-12);
        assert!((normalize_angle(7.0 * PI) - PI).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_angle_maps_minus_pi_to_pi() {
        assert_eq!(normalize_angle(-PI), PI);
        assert_eq!(normalize_angle(PI), PI);
    }

    #[test]
    fn test_pose2d_normalize_yaw() {
        let mut pose = Pose2D::new(0.0, 0.0, 4.0);
        pose.normalize_yaw();
        assert!(pose.yaw > -PI && pose.yaw <= PI);
    }

    #[test]
    fn test_pose2d_distance_ignores_heading() {
        let a = Pose2D::new(0.0, 0.0, 0.0);
        let b = Pose2D::new(3.0, 4.0, 2.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_path2d_total_length() {
        let path = Path2D::from_poses(vec![
            Pose2D::new(0.0, 0.0, 0.0),
            Pose2D::new(1.0, 0.0, 0.0),
            Pose2D::new(1.0, 1.0, 0.0),
        ]);
        assert!((path.total_length() - 2.0).abs() < 1e-10);
        assert_eq!(path.len(), 3);
        assert!(!path.is_empty());
        assert_eq!(Path2D::from_poses(Vec::new()).total_length(), 0.0);
    }
}
