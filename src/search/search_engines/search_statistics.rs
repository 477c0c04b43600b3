use crate::search::{Cost, INFINITE_COST};
use std::time::Instant;
use tracing::info;

#[derive(Debug)]
pub struct SearchStatistics {
    /// Number of nodes expanded
    expanded_nodes: i64,
    /// Number of nodes evaluated by the heuristic
    evaluated_nodes: i64,
    /// Number of unique nodes admitted to the frontier
    generated_nodes: i64,
    /// Number of generated states discarded as duplicates
    duplicate_nodes: i64,
    /// Number of candidate actions generated
    generated_actions: i64,
    /// Best heuristic value found so far
    best_heuristic_value: Cost,
    /// Time when the search started
    search_start_time: Instant,
    /// Time when the last log was printed, used for periodic logging
    last_log_time: Instant,
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStatistics {
    pub fn new() -> Self {
        info!("starting search");
        Self {
            expanded_nodes: 0,
            evaluated_nodes: 0,
            generated_nodes: 0,
            duplicate_nodes: 0,
            generated_actions: 0,
            best_heuristic_value: INFINITE_COST,
            search_start_time: Instant::now(),
            last_log_time: Instant::now(),
        }
    }

    pub fn register_heuristic_value(&mut self, heuristic_value: Cost) {
        if heuristic_value < self.best_heuristic_value {
            self.best_heuristic_value = heuristic_value;
            self.last_log_time = Instant::now();
            self.log();
        }
    }

    pub fn increment_expanded_nodes(&mut self) {
        self.expanded_nodes += 1;
        self.log_if_needed();
    }

    pub fn increment_evaluated_nodes(&mut self) {
        self.evaluated_nodes += 1;
    }

    pub fn increment_generated_nodes(&mut self) {
        self.generated_nodes += 1;
    }

    pub fn increment_duplicate_nodes(&mut self) {
        self.duplicate_nodes += 1;
    }

    pub fn increment_generated_actions(&mut self) {
        self.generated_actions += 1;
    }

    pub fn generated_actions(&self) -> i64 {
        self.generated_actions
    }

    pub fn expanded_nodes(&self) -> i64 {
        self.expanded_nodes
    }

    pub fn generated_nodes(&self) -> i64 {
        self.generated_nodes
    }

    fn log_if_needed(&mut self) {
        if self.last_log_time.elapsed().as_secs() > 10 {
            self.last_log_time = Instant::now();
            self.log();
        }
    }

    fn log(&self) {
        info!(
            expanded_nodes = self.expanded_nodes,
            evaluated_nodes = self.evaluated_nodes,
            generated_nodes = self.generated_nodes,
            duplicate_nodes = self.duplicate_nodes,
            generated_actions = self.generated_actions,
            best_heuristic_value = self.best_heuristic_value,
        );
    }

    pub fn finalise_search(&self) {
        info!("finalising search");
        self.log();
        info!(search_duration = self.search_start_time.elapsed().as_secs_f64());
    }
}
