//! Global planner: plans a collision-free SE(2) path on a costmap
//!
//! A request runs straight through: load parameters, check the goal frame,
//! derive the search space from the map, validate both endpoints, run the
//! selected search algorithm, simplify, extract, interpolate and publish.
//! Every step either hands over to the next or ends the request with a
//! [`PlannerError`]; nothing is retried.

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use log::{debug, error, info, warn};

use crate::common::{
    Costmap, Endpoint, PlanPublisher, PlannerError, PlannerResult, PlanningEngine, Pose2D,
    PoseStamped, SE2State,
};
use crate::path_planning::algorithm::select;
use crate::path_planning::config::{ParameterSource, PlannerConfig};
use crate::path_planning::conversions::{pose2d_to_state, pose_to_pose2d, stamp_pose2d, state_to_pose2d};
use crate::path_planning::diagnostics::{LogPublisher, PlanMessage, PlannerDiagnostics, PlannerStats};
use crate::path_planning::interpolation::interpolate_path;
use crate::path_planning::state_space::{check_endpoint_bounds, SE2StateSpace, SearchBounds, SpaceInformation};
use crate::path_planning::validity::{FootprintValidityChecker, RobotGeometry};

/// State bound by `initialize`
struct PlannerContext {
    costmap: Arc<dyn Costmap>,
    geometry: Arc<RobotGeometry>,
}

/// Sampling-based global planner for a mobile base
pub struct GlobalPlanner {
    name: String,
    engine: Arc<dyn PlanningEngine>,
    parameters: Box<dyn ParameterSource>,
    publisher: Box<dyn PlanPublisher>,
    context: Option<PlannerContext>,
}

impl GlobalPlanner {
    /// Create an uninitialized planner
    ///
    /// Plans and records go to a [`LogPublisher`] until
    /// [`with_publisher`](Self::with_publisher) replaces it.
    pub fn new(
        name: &str,
        engine: Arc<dyn PlanningEngine>,
        parameters: impl ParameterSource + 'static,
    ) -> Self {
        GlobalPlanner {
            name: name.to_string(),
            engine,
            parameters: Box::new(parameters),
            publisher: Box::new(LogPublisher),
            context: None,
        }
    }

    pub fn with_publisher(mut self, publisher: impl PlanPublisher + 'static) -> Self {
        self.publisher = Box::new(publisher);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_initialized(&self) -> bool {
        self.context.is_some()
    }

    /// Bind the planner to a costmap; later calls are ignored
    pub fn initialize(&mut self, costmap: Arc<dyn Costmap>) {
        if self.context.is_some() {
            warn!("This planner has already been initialized... doing nothing");
            return;
        }

        let geometry = RobotGeometry::from_costmap(costmap.as_ref());
        info!(
            "Initialized planner {} with a {}-point footprint (inscribed {:.3}m, circumscribed {:.3}m)",
            self.name,
            geometry.footprint.len(),
            geometry.inscribed_radius,
            geometry.circumscribed_radius
        );
        self.context = Some(PlannerContext {
            costmap,
            geometry: Arc::new(geometry),
        });
    }

    /// Plan from `start` to `goal`
    ///
    /// On success the returned poses are stamped with the costmap's global
    /// frame and the current time.
    pub fn make_plan(&self, start: &PoseStamped, goal: &PoseStamped) -> PlannerResult<Vec<PoseStamped>> {
        let result = self.run(start, goal);
        match &result {
            Ok(_) => info!("Global planning finished: Path Found."),
            Err(PlannerError::NoPathFound { .. }) => warn!("No path found"),
            Err(e) => error!("Global planning aborted: {}", e),
        }
        result
    }

    fn run(&self, start: &PoseStamped, goal: &PoseStamped) -> PlannerResult<Vec<PoseStamped>> {
        let context = self.context.as_ref().ok_or(PlannerError::NotInitialized)?;
        let start_time = Instant::now();

        let config = self.load_config()?;

        debug!(
            "Got a start: {:.2}, {:.2}, and a goal: {:.2}, {:.2}",
            start.pose.position.x, start.pose.position.y, goal.pose.position.x, goal.pose.position.y
        );

        let global_frame = context.costmap.global_frame_id();
        if goal.header.frame_id != global_frame {
            return Err(PlannerError::FrameMismatch {
                expected: global_frame,
                actual: goal.header.frame_id.clone(),
            });
        }

        let costmap = &context.costmap;
        let space = SE2StateSpace::new(SearchBounds::from_map(
            costmap.size_in_meters_x(),
            costmap.size_in_meters_y(),
            costmap.origin_x(),
            costmap.origin_y(),
        )?);

        if context.geometry.is_degenerate() {
            return Err(PlannerError::DegenerateFootprint(context.geometry.footprint.len()));
        }
        let checker = Arc::new(FootprintValidityChecker::new(
            Arc::clone(costmap),
            Arc::clone(&context.geometry),
            f64::from(config.max_footprint_cost),
        ));

        let start2d = pose_to_pose2d(&start.pose);
        let goal2d = pose_to_pose2d(&goal.pose);

        if !checker.is_pose_valid(&goal2d) {
            return Err(PlannerError::EndpointCollision(Endpoint::Goal));
        }
        if !checker.is_pose_valid(&start2d) {
            return Err(PlannerError::EndpointCollision(Endpoint::Start));
        }

        debug!(
            "Converting Start ({}, {}, {}) and Goal State ({}, {}, {}) to search states",
            start2d.x, start2d.y, start2d.yaw, goal2d.x, goal2d.y, goal2d.yaw
        );
        let start_state = pose2d_to_state(&start2d);
        let goal_state = pose2d_to_state(&goal2d);
        check_endpoint_bounds(&space, &start_state, &goal_state)?;

        let si = Arc::new(SpaceInformation::new(
            space,
            checker,
            config.relative_validity_check_resolution,
        ));
        let mut algorithm = select(&config.global_planner_type, self.engine.as_ref(), Arc::clone(&si))?;

        // solver_maxtime is sanitized into [0, MAX_SOLVER_MAXTIME]
        let max_time = Duration::try_from_secs_f64(config.solver_maxtime).unwrap_or(Duration::MAX);
        debug!("Requesting Plan");
        let solve_start = Instant::now();
        let solved = algorithm.solve(&start_state, &goal_state, max_time);
        // measured before simplification so it covers the search only
        let mut diagnostics = PlannerDiagnostics::new(
            &config.global_planner_type,
            solved,
            solve_start.elapsed().as_secs_f64(),
        );

        if !solved {
            if config.publish_diagnostics {
                self.publish_diagnostics(&diagnostics);
            }
            return Err(PlannerError::NoPathFound { max_time });
        }

        algorithm.simplify();
        let solution = algorithm.solution();

        if config.publish_diagnostics {
            diagnostics.trajectory_size = solution.as_ref().map_or(0, Vec::len);
            self.publish_diagnostics(&diagnostics);
        }

        let states = solution.ok_or(PlannerError::DegeneratePath(0))?;

        let mut path = extract_path(&states);

        if config.interpolate_path {
            debug!("Interpolating path to increase density of frames for local planning");
            path = interpolate_path(&path, config.max_dist_between_pathframes)?;
            debug!("Interpolated Path has {} frames", path.len());
        }

        let stamp = SystemTime::now();
        let plan: Vec<PoseStamped> = path.iter()
            .map(|pose| stamp_pose2d(pose, &global_frame, stamp))
            .collect();

        self.publish_plan(&plan);

        if config.publish_diagnostics {
            let stats = PlannerStats {
                start: start.pose,
                goal: goal.pose,
                start_goal_dist: start2d.distance(&goal2d),
                path_length: si.path_length(&states),
                total_planning_time: start_time.elapsed().as_secs_f64(),
            };
            if let Err(e) = self.publisher.publish_statistics(&stats) {
                warn!("Failed to publish planner statistics: {:#}", e);
            }
        }

        Ok(plan)
    }

    fn load_config(&self) -> PlannerResult<PlannerConfig> {
        let mut config = self.parameters.planner_config()?;
        config.sanitize();
        Ok(config)
    }

    fn publish_plan(&self, plan: &[PoseStamped]) {
        match PlanMessage::from_path(plan) {
            Some(msg) => {
                if let Err(e) = self.publisher.publish_plan(&msg) {
                    warn!("Failed to publish plan: {:#}", e);
                }
            }
            None => info!("Plan is empty - Nothing to display"),
        }
    }

    fn publish_diagnostics(&self, diagnostics: &PlannerDiagnostics) {
        if let Err(e) = self.publisher.publish_diagnostics(diagnostics) {
            warn!("Failed to publish planner diagnostics: {:#}", e);
        }
    }
}

/// Solution states as planar poses, order preserved
fn extract_path(states: &[SE2State]) -> Vec<Pose2D> {
    states.iter()
        .enumerate()
        .map(|(i, state)| {
            let pose = state_to_pose2d(state);
            debug!("Coordinates of {}th frame: (x, y, theta) = ({}, {}, {}).", i, pose.x, pose.y, pose.yaw);
            pose
        })
        .collect()
}
