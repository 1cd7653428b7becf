//! Conversions between boundary poses, planar poses and search-space states
//!
//! The world is treated as flat: roll and pitch of an incoming pose are
//! dropped, outgoing poses sit at z = 0 with a pure yaw rotation.

use std::time::SystemTime;

use nalgebra::UnitQuaternion;

use crate::common::{normalize_angle, Header, Point3D, Pose, Pose2D, PoseStamped, SE2State};

/// Project a full pose onto the ground plane
pub fn pose_to_pose2d(pose: &Pose) -> Pose2D {
    let (_roll, _pitch, yaw) = pose.orientation.euler_angles();
    Pose2D::new(pose.position.x, pose.position.y, normalize_angle(yaw))
}

/// Lift a planar pose to a full pose
pub fn pose2d_to_pose(pose2d: &Pose2D) -> Pose {
    Pose::new(
        Point3D::new(pose2d.x, pose2d.y, 0.0),
        UnitQuaternion::from_euler_angles(0.0, 0.0, pose2d.yaw),
    )
}

pub fn pose2d_to_state(pose2d: &Pose2D) -> SE2State {
    SE2State::new(pose2d.x, pose2d.y, pose2d.yaw)
}

pub fn state_to_pose2d(state: &SE2State) -> Pose2D {
    // normalize angle - just in case
    Pose2D::new(state.x, state.y, normalize_angle(state.yaw))
}

/// Stamp a planar pose for output
pub fn stamp_pose2d(pose2d: &Pose2D, frame_id: &str, stamp: SystemTime) -> PoseStamped {
    PoseStamped::new(Header::new(frame_id, stamp), pose2d_to_pose(pose2d))
}
