/// How much of the search's progress reporting reaches stderr. The planner
/// distinguishes three levels: errors only, the periodic statistics the
/// engines emit while searching, and full per-expansion detail.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Debug,
}

impl Verbosity {
    pub fn level(self) -> tracing::Level {
        match self {
            Verbosity::Quiet => tracing::Level::ERROR,
            Verbosity::Normal => tracing::Level::INFO,
            Verbosity::Debug => tracing::Level::TRACE,
        }
    }
}
