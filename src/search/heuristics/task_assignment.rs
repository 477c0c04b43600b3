//! The task-assignment heuristic: an admissible estimate built from relaxed
//! per-goal costs and a greedy one-task-per-rover assignment.

use crate::search::state::{
    image_bit, CALIBRATE_COST, COMMUNICATE_IMAGE_COST, COMMUNICATE_ROCK_COST,
    COMMUNICATE_SOIL_COST, SAMPLE_ROCK_COST, SAMPLE_SOIL_COST, TAKE_IMAGE_COST,
};
use crate::search::{Cost, DistanceTable, Heuristic, Mode, State, Task, INFINITE_COST};

/// A way a single rover could finish a single outstanding goal, priced under
/// the relaxation that the rover acts alone.
#[derive(Debug, Clone, Copy)]
struct GoalCost {
    cost: Cost,
    rover: usize,
}

#[derive(Debug)]
pub struct TaskAssignment {
    distances: DistanceTable,
}

impl TaskAssignment {
    pub fn new(task: &Task) -> Self {
        Self {
            distances: DistanceTable::new(task),
        }
    }

    /// Relaxed costs of every feasible (goal, rover) pairing in `state`.
    ///
    /// Each estimate ignores resource contention: travel to wherever the
    /// datum is (unless already on board), acquire it, travel to the nearest
    /// communication point, transmit. Infeasible pairings are dropped.
    fn goal_costs(&self, state: &State, task: &Task) -> Vec<GoalCost> {
        let mut costs = vec![];

        for waypoint in 0..task.num_waypoints() {
            if !task.goal.wants_soil(waypoint) || state.waypoints[waypoint].communicated_soil {
                continue;
            }
            for (rover, rs) in state.rovers.iter().enumerate() {
                let mut cost = INFINITE_COST;
                if rs.soil_analyses & (1 << waypoint) != 0 {
                    if let Some(cp) = self.distances.nearest_comm_point(task, rover, rs.position) {
                        cost = self.distances.travel(rover, rs.position, cp)
                            + COMMUNICATE_SOIL_COST;
                    }
                } else if task.rovers[rover].equipped_soil
                    && state.waypoints[waypoint].has_soil_sample
                {
                    let to_sample = self.distances.travel(rover, rs.position, waypoint);
                    if to_sample != INFINITE_COST {
                        if let Some(cp) = self.distances.nearest_comm_point(task, rover, waypoint)
                        {
                            cost = to_sample
                                + SAMPLE_SOIL_COST
                                + self.distances.travel(rover, waypoint, cp)
                                + COMMUNICATE_SOIL_COST;
                        }
                    }
                }
                if cost != INFINITE_COST {
                    costs.push(GoalCost { cost, rover });
                }
            }
        }

        for waypoint in 0..task.num_waypoints() {
            if !task.goal.wants_rock(waypoint) || state.waypoints[waypoint].communicated_rock {
                continue;
            }
            for (rover, rs) in state.rovers.iter().enumerate() {
                let mut cost = INFINITE_COST;
                if rs.rock_analyses & (1 << waypoint) != 0 {
                    if let Some(cp) = self.distances.nearest_comm_point(task, rover, rs.position) {
                        cost = self.distances.travel(rover, rs.position, cp)
                            + COMMUNICATE_ROCK_COST;
                    }
                } else if task.rovers[rover].equipped_rock
                    && state.waypoints[waypoint].has_rock_sample
                {
                    let to_sample = self.distances.travel(rover, rs.position, waypoint);
                    if to_sample != INFINITE_COST {
                        if let Some(cp) = self.distances.nearest_comm_point(task, rover, waypoint)
                        {
                            cost = to_sample
                                + SAMPLE_ROCK_COST
                                + self.distances.travel(rover, waypoint, cp)
                                + COMMUNICATE_ROCK_COST;
                        }
                    }
                }
                if cost != INFINITE_COST {
                    costs.push(GoalCost { cost, rover });
                }
            }
        }

        for objective in 0..task.num_objectives() {
            for mode in Mode::ALL {
                if !task.goal.wants_image(objective, mode)
                    || state.communicated_images[objective] & (1 << mode.index()) != 0
                {
                    continue;
                }
                for (rover, rs) in state.rovers.iter().enumerate() {
                    let mut cost = INFINITE_COST;
                    if rs.images & image_bit(objective, mode) != 0 {
                        if let Some(cp) =
                            self.distances.nearest_comm_point(task, rover, rs.position)
                        {
                            cost = self.distances.travel(rover, rs.position, cp)
                                + COMMUNICATE_IMAGE_COST;
                        }
                    } else if task.rovers[rover].equipped_imaging {
                        let has_camera = task.cameras.iter().any(|camera| {
                            camera.rover == rover
                                && camera.supported_modes & (1 << mode.index()) != 0
                        });
                        if !has_camera {
                            continue;
                        }
                        for shoot in 0..task.num_waypoints() {
                            if task.objectives[objective].visible_from & (1 << shoot) == 0 {
                                continue;
                            }
                            let to_shoot = self.distances.travel(rover, rs.position, shoot);
                            if to_shoot == INFINITE_COST {
                                continue;
                            }
                            if let Some(cp) = self.distances.nearest_comm_point(task, rover, shoot)
                            {
                                let total = to_shoot
                                    + CALIBRATE_COST
                                    + TAKE_IMAGE_COST
                                    + self.distances.travel(rover, shoot, cp)
                                    + COMMUNICATE_IMAGE_COST;
                                cost = cost.min(total);
                            }
                        }
                    }
                    if cost != INFINITE_COST {
                        costs.push(GoalCost { cost, rover });
                    }
                }
            }
        }

        costs
    }

    /// Lower bound on extra energy needed for recharging: rovers whose
    /// assigned task outprices their remaining energy must at least reach
    /// sunlight. Counting only that travel, never the recharge round-trip,
    /// keeps the bound admissible.
    fn recharge_bound(&self, state: &State, task: &Task, assigned: &[Cost]) -> Cost {
        let mut total = 0;
        for (rover, &work) in assigned.iter().enumerate() {
            if work == 0 || work <= state.rovers[rover].energy {
                continue;
            }
            let to_sun =
                self.distances
                    .nearest_sun_travel(task, rover, state.rovers[rover].position);
            if to_sun == INFINITE_COST {
                return INFINITE_COST;
            }
            total += to_sun;
        }
        total
    }
}

impl Heuristic for TaskAssignment {
    fn evaluate(&mut self, state: &State, task: &Task) -> Cost {
        if task.goal.is_satisfied(state) {
            return 0;
        }

        let mut costs = self.goal_costs(state, task);
        if costs.is_empty() {
            return 0;
        }

        // Most expensive tasks first; the sort is stable, so ties keep the
        // soil < rock < image, waypoint-major generation order.
        costs.sort_by(|a, b| b.cost.cmp(&a.cost));

        let mut h_tasks = 0;
        let mut assigned = vec![0; task.num_rovers()];
        for GoalCost { cost, rover } in costs {
            if assigned[rover] == 0 {
                assigned[rover] = cost;
                h_tasks += cost;
            }
        }

        let h_energy = self.recharge_bound(state, task, &assigned);
        if h_energy == INFINITE_COST {
            return INFINITE_COST;
        }

        (h_tasks + h_energy).clamp(0, INFINITE_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn zero_on_goal_states() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let mut heuristic = TaskAssignment::new(&task);
        let mut state = task.initial_state.clone();
        state.waypoints[1].communicated_soil = true;
        assert_eq!(heuristic.evaluate(&state, &task), 0);
    }

    #[test]
    fn prices_the_full_soil_pipeline() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let mut heuristic = TaskAssignment::new(&task);
        // Travel to the sample (8), sample (3), communicate in place (4).
        assert_eq!(heuristic.evaluate(&task.initial_state, &task), 15);
    }

    #[test]
    fn prices_communication_only_once_the_analysis_is_on_board() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let mut heuristic = TaskAssignment::new(&task);
        let mut state = task.initial_state.clone();
        state.rovers[0].position = 1;
        state.rovers[0].soil_analyses = 1 << 1;
        state.waypoints[1].has_soil_sample = false;
        assert_eq!(heuristic.evaluate(&state, &task), COMMUNICATE_SOIL_COST);
    }

    #[test]
    fn assigns_independent_goals_to_distinct_rovers() {
        let task = Task::from_text(TWO_ROVERS_PROBLEM_TEXT).unwrap();
        let mut heuristic = TaskAssignment::new(&task);
        // Each rover can only do its own goal, 15 energy apiece.
        assert_eq!(heuristic.evaluate(&task.initial_state, &task), 30);
    }

    #[test]
    fn adds_travel_to_sunlight_under_an_energy_deficit() {
        let task = Task::from_text(RECHARGE_PROBLEM_TEXT).unwrap();
        let mut heuristic = TaskAssignment::new(&task);
        // Task costs 15 against 7 energy; the rover is already in sunlight,
        // so the deficit adds zero travel and the bound stays 15.
        assert_eq!(heuristic.evaluate(&task.initial_state, &task), 15);
    }

    #[test]
    fn infinite_when_a_deficit_cannot_reach_sunlight() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let mut heuristic = TaskAssignment::new(&task);
        let mut state = task.initial_state.clone();
        state.rovers[0].energy = 5;
        // No sunlit waypoint exists in this fixture.
        assert_eq!(heuristic.evaluate(&state, &task), INFINITE_COST);
    }

    #[test]
    fn unreachable_goals_contribute_no_candidates() {
        let task = Task::from_text(ISOLATED_PROBLEM_TEXT).unwrap();
        let mut heuristic = TaskAssignment::new(&task);
        // The rover cannot reach any communication point, so no pairing is
        // feasible and the estimate collapses to zero.
        assert_eq!(heuristic.evaluate(&task.initial_state, &task), 0);
    }

    #[test]
    fn image_goal_prices_calibration_shot_and_transmission() {
        let task = Task::from_text(IMAGE_PROBLEM_TEXT).unwrap();
        let mut heuristic = TaskAssignment::new(&task);
        // Travel 0->1 (8), calibrate (2), shoot (1), communicate from the
        // shooting waypoint (6).
        assert_eq!(heuristic.evaluate(&task.initial_state, &task), 17);
    }
}
