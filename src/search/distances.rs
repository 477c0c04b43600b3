//! Precomputed minimum-energy travel costs.
//!
//! For each rover the waypoints form a directed graph with an edge `u -> v`
//! iff the rover may traverse `u -> v` and `v` is visible from `u`; every
//! edge costs one navigation. All-pairs distances are filled once with
//! Floyd-Warshall before the search starts and shared read-only afterwards.

use crate::search::state::NAVIGATE_COST;
use crate::search::{Cost, Task, INFINITE_COST};

#[derive(Debug)]
pub struct DistanceTable {
    num_waypoints: usize,
    /// Indexed `[rover][from * num_waypoints + to]`.
    dist: Vec<Vec<Cost>>,
}

impl DistanceTable {
    pub fn new(task: &Task) -> Self {
        let n = task.num_waypoints();
        let mut dist = Vec::with_capacity(task.num_rovers());
        for rover in &task.rovers {
            let mut table = vec![INFINITE_COST; n * n];
            for from in 0..n {
                for to in 0..n {
                    if from == to {
                        table[from * n + to] = 0;
                    } else if rover.can_traverse[from] & (1 << to) != 0
                        && task.waypoints[from].visible & (1 << to) != 0
                    {
                        table[from * n + to] = NAVIGATE_COST;
                    }
                }
            }
            for k in 0..n {
                for i in 0..n {
                    if table[i * n + k] == INFINITE_COST {
                        continue;
                    }
                    for j in 0..n {
                        if table[k * n + j] == INFINITE_COST {
                            continue;
                        }
                        let through_k = table[i * n + k] + table[k * n + j];
                        if through_k < table[i * n + j] {
                            table[i * n + j] = through_k;
                        }
                    }
                }
            }
            dist.push(table);
        }
        Self {
            num_waypoints: n,
            dist,
        }
    }

    /// Minimum travel cost for `rover` from `from` to `to`, or
    /// [`INFINITE_COST`] if unreachable.
    pub fn travel(&self, rover: usize, from: usize, to: usize) -> Cost {
        self.dist[rover][from * self.num_waypoints + to]
    }

    /// The reachable waypoint closest to `from` (possibly `from` itself) with
    /// line of sight to the lander.
    pub fn nearest_comm_point(&self, task: &Task, rover: usize, from: usize) -> Option<usize> {
        let lander = task.lander_position;
        if task.waypoints[from].visible & (1 << lander) != 0 {
            return Some(from);
        }
        let mut best = None;
        let mut best_dist = INFINITE_COST;
        for waypoint in 0..self.num_waypoints {
            if task.waypoints[waypoint].visible & (1 << lander) == 0 {
                continue;
            }
            let d = self.travel(rover, from, waypoint);
            if d < best_dist {
                best_dist = d;
                best = Some(waypoint);
            }
        }
        best
    }

    /// Travel cost to the nearest sunlit waypoint, or [`INFINITE_COST`] if
    /// none is reachable.
    pub fn nearest_sun_travel(&self, task: &Task, rover: usize, from: usize) -> Cost {
        let mut best = INFINITE_COST;
        for (waypoint, info) in task.waypoints.iter().enumerate() {
            if info.in_sun {
                best = best.min(self.travel(rover, from, waypoint));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn chains_navigation_costs() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let distances = DistanceTable::new(&task);
        assert_eq!(distances.travel(0, 0, 0), 0);
        assert_eq!(distances.travel(0, 0, 1), NAVIGATE_COST);
        // Waypoint 2 hosts the lander but has no traversal edge to it.
        assert_eq!(distances.travel(0, 0, 2), INFINITE_COST);
    }

    #[test]
    fn respects_per_rover_traversal_rights() {
        let task = Task::from_text(TWO_ROVERS_PROBLEM_TEXT).unwrap();
        let distances = DistanceTable::new(&task);
        assert_eq!(distances.travel(0, 0, 1), NAVIGATE_COST);
        assert_eq!(distances.travel(1, 0, 1), INFINITE_COST);
        assert_eq!(distances.travel(1, 3, 2), NAVIGATE_COST);
    }

    #[test]
    fn comm_point_is_the_current_waypoint_when_it_sees_the_lander() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let distances = DistanceTable::new(&task);
        assert_eq!(distances.nearest_comm_point(&task, 0, 1), Some(1));
        // From waypoint 0 the only waypoint seeing the lander is waypoint 1.
        assert_eq!(distances.nearest_comm_point(&task, 0, 0), Some(1));
    }

    #[test]
    fn isolated_rover_has_no_comm_point() {
        let task = Task::from_text(ISOLATED_PROBLEM_TEXT).unwrap();
        let distances = DistanceTable::new(&task);
        assert_eq!(distances.nearest_comm_point(&task, 0, 0), None);
        assert_eq!(distances.nearest_sun_travel(&task, 0, 0), INFINITE_COST);
    }
}
