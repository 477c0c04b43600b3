pub const TRIVIAL_PROBLEM_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/rover/trivial.pddl"
));

pub const NAVIGATE_SAMPLE_PROBLEM_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/rover/navigate_sample.pddl"
));

pub const RECHARGE_PROBLEM_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/rover/recharge.pddl"
));

pub const TWO_ROVERS_PROBLEM_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/rover/two_rovers.pddl"
));

pub const IMAGE_PROBLEM_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/rover/image.pddl"
));

pub const ISOLATED_PROBLEM_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/rover/isolated.pddl"
));

pub const EMPTY_GOAL_PROBLEM_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/rover/empty_goal.pddl"
));

pub const MIXED_PROBLEM_TEXT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benchmarks/rover/mixed.pddl"
));
