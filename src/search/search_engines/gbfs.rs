//! Greedy best-first search: the frontier is ordered by `h` alone, so the
//! first solution found is returned as quickly as possible with no optimality
//! guarantee.

use crate::search::search_engines::{
    SearchEngine, SearchResult, SearchSpace, SearchStatistics, TerminationCondition,
};
use crate::search::{applicable_actions, ClosedSet, Frontier, Heuristic, Task};

#[derive(Debug)]
pub struct GBFS {}

impl GBFS {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for GBFS {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine for GBFS {
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
                let child = space.push_child(node_id, action, successor, energy_spent, h, h);
                statistics.increment_generated_nodes();
                frontier.push(h, child);
            }
        }

        statistics.finalise_search();
        termination.finalise();
        (SearchResult::ProvablyUnsolvable, statistics)
    }
}
