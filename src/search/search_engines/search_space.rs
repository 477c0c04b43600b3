use crate::search::search_engines::{NodeId, SearchNode, NO_NODE};
use crate::search::{Action, Cost, Plan, PlanStep, State};
use segvec::{Linear, SegVec};

/// Arena of search nodes. A `SegVec` keeps node addresses stable as the arena
/// grows, parents are integer handles, and nothing is freed until the whole
/// search space is dropped after plan extraction.
#[derive(Debug)]
pub struct SearchSpace {
    nodes: SegVec<SearchNode, Linear>,
}

impl SearchSpace {
    pub fn new() -> Self {
        Self {
            nodes: SegVec::new(),
        }
    }

    pub fn push_root(&mut self, state: State, h: Cost, f: Cost) -> NodeId {
        debug_assert!(self.nodes.is_empty(), "the root must be the first node");
        self.push_node(SearchNode {
            state,
            depth: 0,
            g: 0,
            h,
            f,
            parent: NO_NODE,
            action: None,
        })
    }

    pub fn push_child(
        &mut self,
        parent: NodeId,
        action: Action,
        state: State,
        energy_spent: Cost,
        h: Cost,
        f: Cost,
    ) -> NodeId {
        let parent_node = self.node(parent);
        let depth = parent_node.depth + 1;
        let g = parent_node.g + energy_spent;
        self.push_node(SearchNode {
            state,
            depth,
            g,
            h,
            f,
            parent,
            action: Some(action),
        })
    }

    fn push_node(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Reconstructs the plan ending in `goal_node` by walking parent handles
    /// back to the root.
    pub fn extract_plan(&self, goal_node: NodeId) -> Plan {
        let goal = self.node(goal_node);
        let mut steps = vec![];
        let mut current = goal;
        while let Some(action) = current.action {
            steps.push(PlanStep {
                action,
                h: current.h,
                f: current.f,
            });
            current = self.node(current.parent);
        }
        steps.reverse();
        debug_assert_eq!(steps.len(), goal.depth as usize);
        Plan::new(steps, goal.g, goal.state.recharges)
    }
}

impl Default for SearchSpace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Task;
    use crate::test_utils::*;

    #[test]
    fn extract_plan_walks_back_to_the_root() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let mut space = SearchSpace::new();
        let root = space.push_root(task.initial_state.clone(), 15, 15);

        let navigate = Action::Navigate {
            rover: 0,
            from: 0,
            to: 1,
        };
        let (state, energy) = task.initial_state.apply(&task, navigate).unwrap();
        let child = space.push_child(root, navigate, state.clone(), energy, 7, 15);

        let sample = Action::SampleSoil {
            rover: 0,
            store: 0,
            waypoint: 1,
        };
        let (state, energy) = state.apply(&task, sample).unwrap();
        let grandchild = space.push_child(child, sample, state, energy, 4, 15);

        let plan = space.extract_plan(grandchild);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.steps()[0].action, navigate);
        assert_eq!(plan.steps()[1].action, sample);
        assert_eq!(plan.total_energy, 11);

        // The root alone yields the empty plan.
        let plan = space.extract_plan(root);
        assert!(plan.is_empty());
        assert_eq!(plan.total_energy, 0);
    }

    #[test]
    fn child_bookkeeping_accumulates_g_and_depth() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let mut space = SearchSpace::new();
        let root = space.push_root(task.initial_state.clone(), 0, 0);
        let navigate = Action::Navigate {
            rover: 0,
            from: 0,
            to: 1,
        };
        let (state, energy) = task.initial_state.apply(&task, navigate).unwrap();
        let child = space.push_child(root, navigate, state, energy, 0, 0);
        assert_eq!(space.node(child).depth, 1);
        assert_eq!(space.node(child).g, 8);
        assert_eq!(space.node(child).parent, root);
    }
}
