//! A plan is the sequence of actions leading from the initial state to a
//! goal state, together with the statistics reported in the solution file.

use crate::search::{Action, Cost};
use std::fmt::Write as _;

/// One plan step. `h` and `f` are the values of the search node the action
/// produced; they are written into the solution file for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanStep {
    pub action: Action,
    pub h: Cost,
    pub f: Cost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<PlanStep>,
    /// Sum of action energy costs along the plan.
    pub total_energy: Cost,
    /// Number of recharge actions in the plan.
    pub total_recharges: u32,
}

impl Plan {
    pub fn empty() -> Self {
        Self {
            steps: vec![],
            total_energy: 0,
            total_recharges: 0,
        }
    }

    pub fn new(steps: Vec<PlanStep>, total_energy: Cost, total_recharges: u32) -> Self {
        Self {
            steps,
            total_energy,
            total_recharges,
        }
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Renders the plan in solution-file syntax: two header lines, then one
    /// action per line with its `h` and `f` values.
    pub fn to_file_string(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Solution length: {}", self.len());
        let _ = writeln!(out, "Total recharges uses: {}", self.total_recharges);
        for step in &self.steps {
            let _ = writeln!(out, "{} h={} f={}", step.action, step.h, step.f);
        }
        out
    }
}

impl IntoIterator for Plan {
    type Item = PlanStep;
    type IntoIter = std::vec::IntoIter<PlanStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Mode;

    #[test]
    fn renders_headers_and_annotated_actions() {
        let plan = Plan::new(
            vec![
                PlanStep {
                    action: Action::Recharge {
                        rover: 0,
                        waypoint: 0,
                    },
                    h: 15,
                    f: 15,
                },
                PlanStep {
                    action: Action::CommunicateImage {
                        rover: 0,
                        objective: 1,
                        mode: Mode::LowRes,
                        location: 2,
                        lander: 3,
                    },
                    h: 0,
                    f: 15,
                },
            ],
            15,
            1,
        );
        assert_eq!(
            plan.to_file_string(),
            "Solution length: 2\n\
             Total recharges uses: 1\n\
             ( recharge rover0 waypoint0 ) h=15 f=15\n\
             ( communicate_image_data rover0 objective1 low_res waypoint2 waypoint3 general ) h=0 f=15\n"
        );
    }

    #[test]
    fn empty_plan_renders_headers_only() {
        assert_eq!(
            Plan::empty().to_file_string(),
            "Solution length: 0\nTotal recharges uses: 0\n"
        );
    }

    #[test]
    fn solution_file_round_trips_through_disk() {
        let plan = Plan::new(
            vec![
                PlanStep {
                    action: Action::Navigate {
                        rover: 0,
                        from: 0,
                        to: 1,
                    },
                    h: 7,
                    f: 15,
                },
                PlanStep {
                    action: Action::CommunicateSoil {
                        rover: 0,
                        sample: 1,
                        location: 1,
                        lander: 2,
                    },
                    h: 0,
                    f: 15,
                },
            ],
            12,
            0,
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.soln");
        std::fs::write(&path, plan.to_file_string()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let steps = crate::parsers::plan::parse_solution("plan.soln", &text).unwrap();
        assert_eq!(steps.len(), plan.len());
        assert!(steps
            .iter()
            .zip(plan.steps())
            .all(|(parsed, step)| parsed.action == step.action));
    }
}
