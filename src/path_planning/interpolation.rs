//! Path interpolation
//!
//! Densifies a sparse sequence of planar poses so that no two consecutive
//! poses are further apart than a maximum distance. Only insertion: every
//! input pose survives unchanged and in order.

use log::{debug, error};

use crate::common::{normalize_angle, PlannerError, PlannerResult, Pose2D};

/// Upper limit on the poses inserted into a single gap
pub const MAX_INSERTIONS_PER_SEGMENT: f64 = 1_000_000.0;

/// Insert evenly spaced poses between waypoints further apart than `max_spacing`
///
/// Distance is planar (heading excluded). For a gap `d > max_spacing`,
/// `n = ceil(d / max_spacing)` poses are inserted, splitting the gap and the
/// normalized heading change into `n + 1` equal steps. A spacing that is
/// not positive, or one that would need more than
/// [`MAX_INSERTIONS_PER_SEGMENT`] poses in a gap, is rejected.
pub fn interpolate_path(path: &[Pose2D], max_spacing: f64) -> PlannerResult<Vec<Pose2D>> {
    if path.len() < 2 {
        error!(
            "Path is not valid. It has only {} Elements. Interpolation not possible. Aborting.",
            path.len()
        );
        return Err(PlannerError::DegeneratePath(path.len()));
    }
    if max_spacing.is_nan() || max_spacing <= 0.0 {
        error!("Interpolation spacing {} is not a positive distance", max_spacing);
        return Err(PlannerError::InvalidSpacing(max_spacing));
    }

    let mut ipo_path = Vec::with_capacity(path.len());
    ipo_path.push(path[0]);

    for curr in &path[1..] {
        let last = ipo_path[ipo_path.len() - 1];

        let dx = curr.x - last.x;
        let dy = curr.y - last.y;
        let dyaw = normalize_angle(curr.yaw - last.yaw);
        let distance = (dx * dx + dy * dy).sqrt();

        if distance > max_spacing {
            let num_insertions = (distance / max_spacing).ceil();
            if num_insertions > MAX_INSERTIONS_PER_SEGMENT {
                error!(
                    "Gap of {:.3}m would need {} poses at spacing {}. Aborting.",
                    distance, num_insertions, max_spacing
                );
                return Err(PlannerError::InvalidSpacing(max_spacing));
            }
            // n insertions create n + 1 intervals
            let step_x = dx / (num_insertions + 1.0);
            let step_y = dy / (num_insertions + 1.0);
            let step_yaw = dyaw / (num_insertions + 1.0);

            for j in 1..=num_insertions as usize {
                let j = j as f64;
                ipo_path.push(Pose2D::new(
                    last.x + j * step_x,
                    last.y + j * step_y,
                    normalize_angle(last.yaw + j * step_yaw),
                ));
            }
        }

        ipo_path.push(*curr);
    }

    debug!("Interpolated path from {} to {} frames", path.len(), ipo_path.len());
    Ok(ipo_path)
}
