//! SE(2) search space derived from the costmap extents
//!
//! The space is a bounded rectangle in (x, y) with an unbounded heading. A
//! [`SpaceInformation`] couples it with the validity oracle and the
//! discretization used to check motions, and is what search algorithms
//! receive.

use std::f64::consts::PI;
use std::sync::Arc;

use itertools::Itertools;
use log::{info, warn};

use crate::common::{normalize_angle, Endpoint, PlannerError, PlannerResult, SE2State, StateValidityChecker};

/// Weight of the heading component in the SE(2) distance
const YAW_WEIGHT: f64 = 0.5;

/// Rectangular extents of the search space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl SearchBounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        SearchBounds { x_min, x_max, y_min, y_max }
    }

    /// Bounds covering a map of the given size and origin
    ///
    /// Per axis, `upper = size - origin` and `lower = upper - size`. A map
    /// without positive extent on both axes has no room to plan in.
    pub fn from_map(size_x: f64, size_y: f64, origin_x: f64, origin_y: f64) -> PlannerResult<Self> {
        if size_x.is_nan() || size_y.is_nan() || size_x <= 0.0 || size_y <= 0.0 {
            warn!("Map of size ({}, {}) has no area, cannot set search bounds", size_x, size_y);
            return Err(PlannerError::EmptyMap { width: size_x, height: size_y });
        }

        let (x_min, x_max) = axis_bounds(size_x, origin_x);
        info!("Setting upper and lower bounds of map x-coordinate to ({}, {}).", x_max, x_min);
        let (y_min, y_max) = axis_bounds(size_y, origin_y);
        info!("Setting upper and lower bounds of map y-coordinate to ({}, {}).", y_max, y_min);
        Ok(SearchBounds { x_min, x_max, y_min, y_max })
    }

    /// Inclusive containment test
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

fn axis_bounds(size: f64, origin: f64) -> (f64, f64) {
    let upper = size - origin;
    let lower = upper - size;
    (lower, upper)
}

/// Planar position plus heading, bounded in position only
#[derive(Debug, Clone)]
pub struct SE2StateSpace {
    bounds: SearchBounds,
}

impl SE2StateSpace {
    pub fn new(bounds: SearchBounds) -> Self {
        SE2StateSpace { bounds }
    }

    pub fn bounds(&self) -> &SearchBounds {
        &self.bounds
    }

    pub fn satisfies_bounds(&self, state: &SE2State) -> bool {
        self.bounds.contains(state.x, state.y)
    }

    /// Planar distance plus the weighted heading difference
    pub fn distance(&self, a: &SE2State, b: &SE2State) -> f64 {
        let planar = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
        planar + YAW_WEIGHT * normalize_angle(b.yaw - a.yaw).abs()
    }

    /// Largest distance between two states of the space
    pub fn maximum_extent(&self) -> f64 {
        self.bounds.width().hypot(self.bounds.height()) + YAW_WEIGHT * PI
    }

    /// State at fraction `t` of the way from `from` to `to`
    ///
    /// Position is interpolated linearly, heading along the shorter arc.
    pub fn interpolate(&self, from: &SE2State, to: &SE2State, t: f64) -> SE2State {
        let dyaw = normalize_angle(to.yaw - from.yaw);
        SE2State::new(
            from.x + t * (to.x - from.x),
            from.y + t * (to.y - from.y),
            normalize_angle(from.yaw + t * dyaw),
        )
    }
}

/// Search space together with its validity oracle
///
/// Shared with the search algorithm, possibly across threads.
pub struct SpaceInformation {
    space: SE2StateSpace,
    validity_checker: Arc<dyn StateValidityChecker>,
    resolution: f64,
}

impl SpaceInformation {
    /// `resolution` is the motion-check step as a fraction of the space's
    /// maximum extent
    pub fn new(space: SE2StateSpace, validity_checker: Arc<dyn StateValidityChecker>, resolution: f64) -> Self {
        SpaceInformation {
            space,
            validity_checker,
            resolution,
        }
    }

    pub fn space(&self) -> &SE2StateSpace {
        &self.space
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Longest segment that is checked without intermediate states
    pub fn longest_valid_segment(&self) -> f64 {
        self.resolution * self.space.maximum_extent()
    }

    pub fn satisfies_bounds(&self, state: &SE2State) -> bool {
        self.space.satisfies_bounds(state)
    }

    /// In bounds and accepted by the validity oracle
    pub fn is_valid(&self, state: &SE2State) -> bool {
        self.space.satisfies_bounds(state) && self.validity_checker.is_valid(state)
    }

    /// Check the straight motion between two states
    ///
    /// `from` is assumed valid. `to` and every intermediate state at
    /// `longest_valid_segment` spacing must be valid.
    pub fn check_motion(&self, from: &SE2State, to: &SE2State) -> bool {
        if !self.is_valid(to) {
            return false;
        }

        let longest = self.longest_valid_segment();
        let distance = self.space.distance(from, to);
        let segments = if longest > 0.0 {
            (distance / longest).ceil() as usize
        } else {
            1
        };

        (1..segments).all(|i| {
            let state = self.space.interpolate(from, to, i as f64 / segments as f64);
            self.is_valid(&state)
        })
    }

    /// Length of a state sequence under the space metric
    pub fn path_length(&self, states: &[SE2State]) -> f64 {
        states.iter()
            .tuple_windows()
            .map(|(a, b)| self.space.distance(a, b))
            .sum()
    }
}

/// Reject a start or goal state outside the space, start first
pub fn check_endpoint_bounds(space: &SE2StateSpace, start: &SE2State, goal: &SE2State) -> PlannerResult<()> {
    if !space.satisfies_bounds(start) {
        return Err(PlannerError::OutOfBounds(Endpoint::Start));
    }
    if !space.satisfies_bounds(goal) {
        return Err(PlannerError::OutOfBounds(Endpoint::Goal));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingChecker {
        calls: AtomicUsize,
        wall_x: Option<f64>,
    }

    impl StateValidityChecker for CountingChecker {
        fn is_valid(&self, state: &SE2State) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.wall_x {
                Some(wall) => (state.x - wall).abs() > 0.05,
                None => true,
            }
        }
    }

    fn create_space_information(wall_x: Option<f64>, resolution: f64) -> (SpaceInformation, Arc<CountingChecker>) {
        let checker = Arc::new(CountingChecker { calls: AtomicUsize::new(0), wall_x });
        let space = SE2StateSpace::new(SearchBounds::new(0.0, 10.0, 0.0, 10.0));
        let si = SpaceInformation::new(space, checker.clone(), resolution);
        (si, checker)
    }

    #[test]
    fn test_bounds_from_map_at_origin() {
        let bounds = SearchBounds::from_map(10.0, 10.0, 0.0, 0.0).unwrap();
        assert_eq!(bounds, SearchBounds::new(0.0, 10.0, 0.0, 10.0));
    }

    #[test]
    fn test_bounds_from_map_with_offset_origin() {
        let bounds = SearchBounds::from_map(10.0, 8.0, 2.0, 3.0).unwrap();
        assert_eq!(bounds, SearchBounds::new(-2.0, 8.0, -3.0, 5.0));
        assert!(bounds.x_min < bounds.x_max);
        assert!(bounds.y_min < bounds.y_max);
    }

    #[test]
    fn test_bounds_from_map_without_area() {
        for (size_x, size_y) in [(0.0, 10.0), (10.0, 0.0), (-5.0, 10.0), (10.0, f64::NAN)] {
            let result = SearchBounds::from_map(size_x, size_y, 0.0, 0.0);
            assert!(matches!(result, Err(PlannerError::EmptyMap { .. })));
        }
    }

    #[test]
    fn test_space_information_exposes_space() {
        let (si, _) = create_space_information(None, 0.004);
        assert_eq!(*si.space().bounds(), SearchBounds::new(0.0, 10.0, 0.0, 10.0));
        assert_eq!(si.resolution(), 0.004);
        assert!(si.satisfies_bounds(&SE2State::new(10.0, 0.0, 3.0)));
        assert!(!si.satisfies_bounds(&SE2State::new(10.1, 0.0, 0.0)));
    }

    #[test]
    fn test_bounds_contains_is_inclusive() {
        let bounds = SearchBounds::new(0.0, 10.0, -5.0, 5.0);
        assert!(bounds.contains(5.0, 0.0));
        assert!(bounds.contains(0.0, -5.0));
        assert!(bounds.contains(10.0, 5.0));
        assert!(!bounds.contains(-0.001, 0.0));
        assert!(!bounds.contains(5.0, 5.001));
    }

    #[test]
    fn test_check_endpoint_bounds_distinguishes_start_and_goal() {
        let space = SE2StateSpace::new(SearchBounds::new(0.0, 10.0, 0.0, 10.0));
        let inside = SE2State::new(1.0, 1.0, 0.0);
        let outside = SE2State::new(11.0, 1.0, 0.0);

        assert!(check_endpoint_bounds(&space, &inside, &inside).is_ok());
        assert!(matches!(
            check_endpoint_bounds(&space, &outside, &inside),
            Err(PlannerError::OutOfBounds(Endpoint::Start))
        ));
        assert!(matches!(
            check_endpoint_bounds(&space, &inside, &outside),
            Err(PlannerError::OutOfBounds(Endpoint::Goal))
        ));
        // start is reported first when both are out
        assert!(matches!(
            check_endpoint_bounds(&space, &outside, &outside),
            Err(PlannerError::OutOfBounds(Endpoint::Start))
        ));
    }

    #[test]
    fn test_heading_is_unbounded() {
        let space = SE2StateSpace::new(SearchBounds::new(0.0, 1.0, 0.0, 1.0));
        assert!(space.satisfies_bounds(&SE2State::new(0.5, 0.5, 100.0)));
    }

    #[test]
    fn test_distance_wraps_heading() {
        let space = SE2StateSpace::new(SearchBounds::new(0.0, 10.0, 0.0, 10.0));
        let a = SE2State::new(0.0, 0.0, PI - 0.1);
        let b = SE2State::new(3.0, 4.0, -PI + 0.1);
        assert!((space.distance(&a, &b) - (5.0 + 0.5 * 0.2)).abs() < 1e-9);
    }

    #[test]
    fn test_interpolate_takes_short_arc() {
        let space = SE2StateSpace::new(SearchBounds::new(0.0, 10.0, 0.0, 10.0));
        let a = SE2State::new(0.0, 0.0, PI - 0.2);
        let b = SE2State::new(2.0, 0.0, -PI + 0.2);
        let mid = space.interpolate(&a, &b, 0.5);
        assert!((mid.x - 1.0).abs() < 1e-12);
        assert!((mid.yaw.abs() - PI).abs() < 1e-9);
    }

    #[test]
    fn test_check_motion_free_space() {
        let (si, checker) = create_space_information(None, 0.01);
        let from = SE2State::new(1.0, 1.0, 0.0);
        let to = SE2State::new(9.0, 1.0, 0.0);
        assert!(si.check_motion(&from, &to));

        // 8m at ~0.157m per segment
        let expected_segments = (8.0 / si.longest_valid_segment()).ceil() as usize;
        assert_eq!(checker.calls.load(Ordering::SeqCst), expected_segments);
    }

    #[test]
    fn test_check_motion_detects_wall_between_valid_endpoints() {
        let (si, _) = create_space_information(Some(5.0), 0.004);
        let from = SE2State::new(1.0, 1.0, 0.0);
        let to = SE2State::new(9.0, 1.0, 0.0);
        assert!(si.is_valid(&from));
        assert!(si.is_valid(&to));
        assert!(!si.check_motion(&from, &to));
    }

    #[test]
    fn test_check_motion_rejects_out_of_bounds_target() {
        let (si, _) = create_space_information(None, 0.004);
        assert!(!si.check_motion(&SE2State::new(1.0, 1.0, 0.0), &SE2State::new(11.0, 1.0, 0.0)));
    }

    #[test]
    fn test_path_length() {
        let (si, _) = create_space_information(None, 0.004);
        let states = vec![
            SE2State::new(0.0, 0.0, 0.0),
            SE2State::new(3.0, 4.0, 0.0),
            SE2State::new(3.0, 5.0, 1.0),
        ];
        assert!((si.path_length(&states) - 6.5).abs() < 1e-12);
        assert_eq!(si.path_length(&states[..1]), 0.0);
    }
}
