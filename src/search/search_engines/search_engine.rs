use crate::search::search_engines::{AStar, SearchStatistics, TerminationCondition, GBFS};
use crate::search::{Heuristic, Plan, Task};

#[derive(Debug)]
pub enum SearchResult {
    /// A plan reaching the goal was found
    Success(Plan),
    /// The reachable state space was exhausted without reaching the goal
    ProvablyUnsolvable,
    /// The search engine ran out of time
    TimeLimitExceeded,
    /// The search engine ran out of memory
    MemoryLimitExceeded,
}

pub trait SearchEngine {
    fn search(
        &mut self,
        task: &Task,
        heuristic: Box<dyn Heuristic>,
        termination: TerminationCondition,
    ) -> (SearchResult, SearchStatistics);
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum SearchEngineName {
    #[clap(name = "best", help = "Greedy best-first search on f = h (satisficing)")]
    Best,
    #[clap(name = "astar", help = "A* on f = g + h (minimum total energy)")]
    AStar,
}

impl SearchEngineName {
    pub fn create(&self) -> Box<dyn SearchEngine> {
        match self {
            SearchEngineName::Best => Box::new(GBFS::new()),
            SearchEngineName::AStar => Box::new(AStar::new()),
        }
    }
}
