mod blind;
mod heuristic;
mod task_assignment;

pub use blind::Blind;
pub use heuristic::Heuristic;
pub use task_assignment::TaskAssignment;
