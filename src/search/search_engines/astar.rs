//! A* search: the frontier is ordered by `f = g + h`. With the admissible
//! task-assignment heuristic the first goal node popped carries a plan of
//! minimum total energy.

use crate::search::search_engines::{
    SearchEngine, SearchResult, SearchSpace, SearchStatistics, TerminationCondition,
};
use crate::search::{applicable_actions, ClosedSet, Frontier, Heuristic, Task};

#[derive(Debug)]
pub struct AStar {}

impl AStar {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for AStar {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine for AStar {
    fn search(
        &mut self,
        task: &Task,
        mut heuristic: Box<dyn Heuristic>,
        mut termination: TerminationCondition,
    ) -> (SearchResult, SearchStatistics) {
        let mut statistics = SearchStatistics::new();
        let mut space = SearchSpace::new();
        let mut closed = ClosedSet::new();
        let mut frontier = Frontier::new();

        let initial = task.initial_state.clone();
        closed.insert(&initial);
        let h = heuristic.evaluate(&initial, task);
        statistics.increment_evaluated_nodes();
        statistics.register_heuristic_value(h);
        let root = space.push_root(initial, h, h);
        frontier.push(h, root);

        while let Some((_, node_id)) = frontier.pop() {
            let node = space.node(node_id);
            let state = node.state.clone();
            let g = node.g;
            statistics.increment_expanded_nodes();

            if task.goal.is_satisfied(&state) {
                statistics.finalise_search();
                termination.finalise();
                return (SearchResult::Success(space.extract_plan(node_id)), statistics);
            }

            for action in applicable_actions(task, &state) {
                statistics.increment_generated_actions();
                if let Some(result) = termination.check(statistics.generated_actions()) {
                    statistics.finalise_search();
                    termination.finalise();
                    return (result, statistics);
                }

                let Some((successor, energy_spent)) = state.apply(task, action) else {
                    continue;
                };
                if !closed.insert(&successor) {
                    statistics.increment_duplicate_nodes();
                    continue;
                }
                let h = heuristic.evaluate(&successor, task);
                statistics.increment_evaluated_nodes();
                statistics.register_heuristic_value(h);
                let f = g + energy_spent + h;
                let child = space.push_child(node_id, action, successor, energy_spent, h, f);
                statistics.increment_generated_nodes();
                frontier.push(f, child);
            }
        }

        statistics.finalise_search();
        termination.finalise();
        (SearchResult::ProvablyUnsolvable, statistics)
    }
}
