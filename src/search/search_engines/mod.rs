mod astar;
mod gbfs;
mod search_engine;
mod search_node;
mod search_space;
mod search_statistics;
mod termination_condition;

pub use astar::AStar;
pub use gbfs::GBFS;
pub use search_engine::{SearchEngine, SearchEngineName, SearchResult};
pub use search_node::{NodeId, SearchNode, NO_NODE};
pub use search_space::SearchSpace;
pub use search_statistics::SearchStatistics;
pub use termination_condition::TerminationCondition;
