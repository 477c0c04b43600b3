use crate::search::{Cost, State, Task};
use std::fmt::Debug;

pub trait Heuristic: Debug {
    /// Estimate the remaining energy cost from `state` to the goal. Returns 0
    /// on goal states and [`INFINITE_COST`](crate::search::INFINITE_COST)
    /// when the goal is provably unreachable from `state`.
    fn evaluate(&mut self, state: &State, task: &Task) -> Cost;
}
