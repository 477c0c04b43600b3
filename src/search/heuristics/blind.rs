use crate::search::{Cost, Heuristic, State, Task};

/// The zero heuristic. Degrades A* to uniform-cost search; useful as a
/// baseline and for checking the informed heuristic against true optima.
#[derive(Debug)]
pub struct Blind {}

impl Blind {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for Blind {
    fn default() -> Self {
        Self::new()
    }
}

impl Heuristic for Blind {
    fn evaluate(&mut self, _state: &State, _task: &Task) -> Cost {
        0
    }
}
