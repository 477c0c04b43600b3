mod action;
mod distances;
mod fingerprint;
mod frontier;
mod goal;
pub mod heuristics;
mod plan;
pub mod search_engines;
mod state;
mod successor_generator;
mod task;
mod validate;
mod verbosity;

pub use action::Action;
pub use distances::DistanceTable;
pub use fingerprint::{ClosedSet, StateKey};
pub use frontier::Frontier;
pub use goal::Goal;
pub use heuristics::Heuristic;
pub use plan::{Plan, PlanStep};
pub use state::{Mode, RoverState, State, WaypointState};
pub use successor_generator::applicable_actions;
pub use task::{
    CameraInfo, ObjectiveInfo, RoverInfo, StoreInfo, Task, ValidationError, WaypointInfo,
    MAX_CAMERAS, MAX_MODES, MAX_OBJECTIVES, MAX_ROVERS, MAX_STORES, MAX_WAYPOINTS,
};
pub use validate::{verify_plan, PlanVerificationError, VerificationReport};
pub use verbosity::Verbosity;

/// Costs are integral energy units. Action costs, travel distances and
/// heuristic values all share this type.
pub type Cost = i32;

/// Sentinel for "unreachable" in the distance table and the heuristic. Large
/// enough to dominate any real plan cost, small enough that sums of a handful
/// of these never overflow.
pub const INFINITE_COST: Cost = 100_000;
