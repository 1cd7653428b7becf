//! Test doubles for the planner's collaborators

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::common::{Costmap, PlanPublisher, Point2D, SE2State, SearchAlgorithm, PlanningEngine};
use crate::path_planning::algorithm::AlgorithmKind;
use crate::path_planning::diagnostics::{PlanMessage, PlannerDiagnostics, PlannerStats};
use crate::path_planning::state_space::SpaceInformation;

type CostFn = Box<dyn Fn(f64, f64, f64) -> f64 + Send + Sync>;

/// Costmap whose footprint cost is an arbitrary function of the pose
pub struct MockCostmap {
    pub size_x: f64,
    pub size_y: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub frame_id: String,
    pub footprint: Vec<Point2D>,
    cost: CostFn,
}

impl MockCostmap {
    /// 10m x 10m map in the "map" frame, free everywhere
    pub fn free() -> Self {
        MockCostmap {
            size_x: 10.0,
            size_y: 10.0,
            origin_x: 0.0,
            origin_y: 0.0,
            frame_id: "map".to_string(),
            footprint: vec![
                Point2D::new(0.2, 0.2),
                Point2D::new(-0.2, 0.2),
                Point2D::new(-0.2, -0.2),
                Point2D::new(0.2, -0.2),
            ],
            cost: Box::new(|_, _, _| 0.0),
        }
    }

    pub fn with_cost<F>(mut self, cost: F) -> Self
    where
        F: Fn(f64, f64, f64) -> f64 + Send + Sync + 'static,
    {
        self.cost = Box::new(cost);
        self
    }

    pub fn with_footprint(mut self, footprint: Vec<Point2D>) -> Self {
        self.footprint = footprint;
        self
    }

    pub fn with_origin(mut self, origin_x: f64, origin_y: f64) -> Self {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self
    }
}

impl Costmap for MockCostmap {
    fn size_in_meters_x(&self) -> f64 {
        self.size_x
    }

    fn size_in_meters_y(&self) -> f64 {
        self.size_y
    }

    fn origin_x(&self) -> f64 {
        self.origin_x
    }

    fn origin_y(&self) -> f64 {
        self.origin_y
    }

    fn global_frame_id(&self) -> String {
        self.frame_id.clone()
    }

    fn robot_footprint(&self) -> Vec<Point2D> {
        self.footprint.clone()
    }

    fn inscribed_radius(&self) -> f64 {
        0.2
    }

    fn circumscribed_radius(&self) -> f64 {
        0.2 * std::f64::consts::SQRT_2
    }

    fn footprint_cost(
        &self,
        x: f64,
        y: f64,
        theta: f64,
        _footprint: &[Point2D],
        _inscribed_radius: f64,
        _circumscribed_radius: f64,
    ) -> f64 {
        (self.cost)(x, y, theta)
    }
}

/// What a [`ScriptedAlgorithm`] does when asked to solve
#[derive(Debug, Clone)]
pub enum Script {
    /// Connect start and goal through these waypoints, if every motion is valid
    Via(Vec<SE2State>),
    /// Report success but hand back only the start state
    Degenerate,
    /// Report success without keeping a solution
    Vanished,
    /// Never find a solution
    Timeout,
}

/// Engine that replays a fixed script and records what it was asked for
pub struct ScriptedEngine {
    script: Script,
    pub created: Mutex<Vec<AlgorithmKind>>,
    pub simplified: Arc<Mutex<bool>>,
}

impl ScriptedEngine {
    pub fn new(script: Script) -> Self {
        ScriptedEngine {
            script,
            created: Mutex::new(Vec::new()),
            simplified: Arc::new(Mutex::new(false)),
        }
    }

    pub fn straight_line() -> Self {
        Self::new(Script::Via(Vec::new()))
    }

    pub fn created_kinds(&self) -> Vec<AlgorithmKind> {
        self.created.lock().unwrap().clone()
    }

    pub fn was_simplified(&self) -> bool {
        *self.simplified.lock().unwrap()
    }
}

impl PlanningEngine for ScriptedEngine {
    fn create(&self, kind: AlgorithmKind, space: Arc<SpaceInformation>) -> Box<dyn SearchAlgorithm> {
        self.created.lock().unwrap().push(kind);
        Box::new(ScriptedAlgorithm {
            space,
            script: self.script.clone(),
            solution: None,
            simplified: Arc::clone(&self.simplified),
        })
    }
}

pub struct ScriptedAlgorithm {
    space: Arc<SpaceInformation>,
    script: Script,
    solution: Option<Vec<SE2State>>,
    simplified: Arc<Mutex<bool>>,
}

impl SearchAlgorithm for ScriptedAlgorithm {
    fn solve(&mut self, start: &SE2State, goal: &SE2State, _max_time: Duration) -> bool {
        match &self.script {
            Script::Via(waypoints) => {
                let mut states = vec![*start];
                states.extend(waypoints.iter().copied());
                states.push(*goal);
                let feasible = states.windows(2).all(|w| self.space.check_motion(&w[0], &w[1]));
                if feasible {
                    self.solution = Some(states);
                }
                feasible
            }
            Script::Degenerate => {
                self.solution = Some(vec![*start]);
                true
            }
            Script::Vanished => true,
            Script::Timeout => false,
        }
    }

    fn simplify(&mut self) {
        *self.simplified.lock().unwrap() = true;
        // line-of-sight shortcutting
        if let Some(states) = &self.solution {
            if states.len() <= 2 {
                return;
            }
            let mut shortened = vec![states[0]];
            let mut i = 0;
            while i < states.len() - 1 {
                let mut furthest = i + 1;
                for j in (i + 2)..states.len() {
                    if self.space.check_motion(&states[i], &states[j]) {
                        furthest = j;
                    }
                }
                shortened.push(states[furthest]);
                i = furthest;
            }
            self.solution = Some(shortened);
        }
    }

    fn solution(&self) -> Option<Vec<SE2State>> {
        self.solution.clone()
    }
}

/// Publisher that keeps everything it is given
#[derive(Default)]
pub struct RecordingPublisher {
    pub plans: Mutex<Vec<PlanMessage>>,
    pub diagnostics: Mutex<Vec<PlannerDiagnostics>>,
    pub statistics: Mutex<Vec<PlannerStats>>,
    pub fail: bool,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        RecordingPublisher {
            fail: true,
            ..Default::default()
        }
    }
}

impl PlanPublisher for RecordingPublisher {
    fn publish_plan(&self, plan: &PlanMessage) -> anyhow::Result<()> {
        self.plans.lock().unwrap().push(plan.clone());
        Ok(())
    }

    fn publish_diagnostics(&self, diagnostics: &PlannerDiagnostics) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("diagnostics topic unavailable");
        }
        self.diagnostics.lock().unwrap().push(diagnostics.clone());
        Ok(())
    }

    fn publish_statistics(&self, stats: &PlannerStats) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("statistics topic unavailable");
        }
        self.statistics.lock().unwrap().push(stats.clone());
        Ok(())
    }
}
