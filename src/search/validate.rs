//! Re-simulation of a saved solution against a problem.
//!
//! The verifier replays every action of the solution file from the initial
//! state, failing on the first inapplicable one with its line number, and
//! finally checks that the reached state satisfies the goal.

use crate::parsers::plan::{parse_solution, PlanParseError};
use crate::search::{Action, Cost, Task};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanVerificationError {
    #[error(transparent)]
    Parse(#[from] PlanParseError),
    #[error("{file}:{line}: action `{action}` is not applicable")]
    NotApplicable {
        file: String,
        line: usize,
        action: String,
    },
    #[error("plan executed successfully, but the final state is not a goal state")]
    GoalNotReached,
}

/// Statistics of a successfully verified plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationReport {
    /// Number of actions applied.
    pub actions: usize,
    /// Recharge counter of the final state.
    pub total_recharges: u32,
    /// Energy consumed by the applied actions.
    pub total_energy: Cost,
}

/// True iff every object index of `action` names an object of `task`. A
/// solution file may reference objects the problem never declared; those
/// actions are inapplicable by definition rather than indexing hazards.
fn within_bounds(task: &Task, action: Action) -> bool {
    let rovers = task.num_rovers();
    let waypoints = task.num_waypoints();
    match action {
        Action::Navigate { rover, from, to } => rover < rovers && from < waypoints && to < waypoints,
        Action::Recharge { rover, waypoint } => rover < rovers && waypoint < waypoints,
        Action::SampleSoil {
            rover,
            store,
            waypoint,
        }
        | Action::SampleRock {
            rover,
            store,
            waypoint,
        } => rover < rovers && store < task.num_stores() && waypoint < waypoints,
        Action::Drop { rover, store } => rover < rovers && store < task.num_stores(),
        Action::Calibrate {
            rover,
            camera,
            objective,
            waypoint,
        } => {
            rover < rovers
                && camera < task.num_cameras()
                && objective < task.num_objectives()
                && waypoint < waypoints
        }
        Action::TakeImage {
            rover,
            waypoint,
            objective,
            camera,
            ..
        } => {
            rover < rovers
                && waypoint < waypoints
                && objective < task.num_objectives()
                && camera < task.num_cameras()
        }
        Action::CommunicateSoil {
            rover,
            sample,
            location,
            lander,
        }
        | Action::CommunicateRock {
            rover,
            sample,
            location,
            lander,
        } => rover < rovers && sample < waypoints && location < waypoints && lander < waypoints,
        Action::CommunicateImage {
            rover,
            objective,
            location,
            lander,
            ..
        } => {
            rover < rovers
                && objective < task.num_objectives()
                && location < waypoints
                && lander < waypoints
        }
    }
}

/// Replays the solution in `text` against `task`.
pub fn verify_plan(
    task: &Task,
    file: &str,
    text: &str,
) -> Result<VerificationReport, PlanVerificationError> {
    let steps = parse_solution(file, text)?;
    let mut state = task.initial_state.clone();
    let mut total_energy = 0;
    for step in &steps {
        if !within_bounds(task, step.action) {
            return Err(PlanVerificationError::NotApplicable {
                file: file.to_string(),
                line: step.line,
                action: step.action.to_string(),
            });
        }
        match state.apply(task, step.action) {
            Some((next, energy_spent)) => {
                state = next;
                total_energy += energy_spent;
            }
            None => {
                return Err(PlanVerificationError::NotApplicable {
                    file: file.to_string(),
                    line: step.line,
                    action: step.action.to_string(),
                })
            }
        }
    }
    if !task.goal.is_satisfied(&state) {
        return Err(PlanVerificationError::GoalNotReached);
    }
    Ok(VerificationReport {
        actions: steps.len(),
        total_recharges: state.recharges,
        total_energy,
    })
}
