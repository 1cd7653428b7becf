//! Search algorithm identifiers and selection
//!
//! The planner never searches itself: it maps the configured identifier to
//! an [`AlgorithmKind`] and asks the planning engine for an instance bound
//! to the current search space.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, error};

use crate::common::{PlannerError, PlannerResult, PlanningEngine, SearchAlgorithm};
use crate::path_planning::state_space::SpaceInformation;

/// Algorithms the planning engine can provide
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    /// Expansive space trees
    EST,
    /// Kinodynamic planning by interior-exterior cell exploration
    KPIECE,
    /// Lazy bidirectional KPIECE with one level of discretization
    LBKPIECE,
    LazyRRT,
    /// Multi-threaded RRT
    PRRT,
    RRT,
    /// Bidirectional RRT growing one tree from each end
    RRTConnect,
    /// Multi-threaded SBL
    PSBL,
    /// Single-query bidirectional lazy planner
    SBL,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 9] = [
        AlgorithmKind::EST,
        AlgorithmKind::KPIECE,
        AlgorithmKind::LBKPIECE,
        AlgorithmKind::LazyRRT,
        AlgorithmKind::PRRT,
        AlgorithmKind::RRT,
        AlgorithmKind::RRTConnect,
        AlgorithmKind::PSBL,
        AlgorithmKind::SBL,
    ];

    /// Identifier as it appears in `global_planner_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmKind::EST => "EST",
            AlgorithmKind::KPIECE => "KPIECE",
            AlgorithmKind::LBKPIECE => "LBKPIECE",
            AlgorithmKind::LazyRRT => "LazyRRT",
            AlgorithmKind::PRRT => "pRRT",
            AlgorithmKind::RRT => "RRT",
            AlgorithmKind::RRTConnect => "RRTConnect",
            AlgorithmKind::PSBL => "pSBL",
            AlgorithmKind::SBL => "SBL",
        }
    }

    /// Whether the engine samples from several threads
    pub fn is_multi_threaded(&self) -> bool {
        matches!(self, AlgorithmKind::PRRT | AlgorithmKind::PSBL)
    }
}

impl Default for AlgorithmKind {
    fn default() -> Self {
        AlgorithmKind::LBKPIECE
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlgorithmKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PlannerError::UnknownAlgorithm(s.to_string()))
    }
}

/// Instantiate the algorithm named `name` for `space`
pub fn select(
    name: &str,
    engine: &dyn PlanningEngine,
    space: Arc<SpaceInformation>,
) -> PlannerResult<Box<dyn SearchAlgorithm>> {
    let kind = name.parse::<AlgorithmKind>().map_err(|e| {
        error!("The planner named [{}] passed in global_planner_type is not supported", name);
        e
    })?;
    debug!("Using {} (multi-threaded: {})", kind, kind.is_multi_threaded());
    Ok(engine.create(kind, space))
}
