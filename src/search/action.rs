use crate::search::Mode;
use std::fmt;

/// A ground action: a kind plus its object indices. Parameter order matches
/// the action syntax of the solution file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Navigate {
        rover: usize,
        from: usize,
        to: usize,
    },
    Recharge {
        rover: usize,
        waypoint: usize,
    },
    SampleSoil {
        rover: usize,
        store: usize,
        waypoint: usize,
    },
    SampleRock {
        rover: usize,
        store: usize,
        waypoint: usize,
    },
    Drop {
        rover: usize,
        store: usize,
    },
    Calibrate {
        rover: usize,
        camera: usize,
        objective: usize,
        waypoint: usize,
    },
    TakeImage {
        rover: usize,
        waypoint: usize,
        objective: usize,
        camera: usize,
        mode: Mode,
    },
    CommunicateSoil {
        rover: usize,
        sample: usize,
        location: usize,
        lander: usize,
    },
    CommunicateRock {
        rover: usize,
        sample: usize,
        location: usize,
        lander: usize,
    },
    CommunicateImage {
        rover: usize,
        objective: usize,
        mode: Mode,
        location: usize,
        lander: usize,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Navigate { .. } => "navigate",
            Action::Recharge { .. } => "recharge",
            Action::SampleSoil { .. } => "sample_soil",
            Action::SampleRock { .. } => "sample_rock",
            Action::Drop { .. } => "drop",
            Action::Calibrate { .. } => "calibrate",
            Action::TakeImage { .. } => "take_image",
            Action::CommunicateSoil { .. } => "communicate_soil_data",
            Action::CommunicateRock { .. } => "communicate_rock_data",
            Action::CommunicateImage { .. } => "communicate_image_data",
        }
    }

    /// Parameters in solution-file syntax. The communicate actions carry a
    /// trailing `general` parameter, a legacy of the domain schema.
    pub fn params(&self) -> Vec<String> {
        match *self {
            Action::Navigate { rover, from, to } => {
                vec![
                    format!("rover{rover}"),
                    format!("waypoint{from}"),
                    format!("waypoint{to}"),
                ]
            }
            Action::Recharge { rover, waypoint } => {
                vec![format!("rover{rover}"), format!("waypoint{waypoint}")]
            }
            Action::SampleSoil {
                rover,
                store,
                waypoint,
            }
            | Action::SampleRock {
                rover,
                store,
                waypoint,
            } => {
                vec![
                    format!("rover{rover}"),
                    format!("store{store}"),
                    format!("waypoint{waypoint}"),
                ]
            }
            Action::Drop { rover, store } => {
                vec![format!("rover{rover}"), format!("store{store}")]
            }
            Action::Calibrate {
                rover,
                camera,
                objective,
                waypoint,
            } => {
                vec![
                    format!("rover{rover}"),
                    format!("camera{camera}"),
                    format!("objective{objective}"),
                    format!("waypoint{waypoint}"),
                ]
            }
            Action::TakeImage {
                rover,
                waypoint,
                objective,
                camera,
                mode,
            } => {
                vec![
                    format!("rover{rover}"),
                    format!("waypoint{waypoint}"),
                    format!("objective{objective}"),
                    format!("camera{camera}"),
                    mode.name().to_string(),
                ]
            }
            Action::CommunicateSoil {
                rover,
                sample,
                location,
                lander,
            }
            | Action::CommunicateRock {
                rover,
                sample,
                location,
                lander,
            } => {
                vec![
                    format!("rover{rover}"),
                    format!("waypoint{sample}"),
                    format!("waypoint{location}"),
                    format!("waypoint{lander}"),
                    "general".to_string(),
                ]
            }
            Action::CommunicateImage {
                rover,
                objective,
                mode,
                location,
                lander,
            } => {
                vec![
                    format!("rover{rover}"),
                    format!("objective{objective}"),
                    mode.name().to_string(),
                    format!("waypoint{location}"),
                    format!("waypoint{lander}"),
                    "general".to_string(),
                ]
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "( {}", self.name())?;
        for param in self.params() {
            write!(f, " {param}")?;
        }
        write!(f, " )")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_renders_in_solution_syntax() {
        let action = Action::Navigate {
            rover: 0,
            from: 2,
            to: 5,
        };
        assert_eq!(action.to_string(), "( navigate rover0 waypoint2 waypoint5 )");
    }

    #[test]
    fn communicate_actions_carry_the_general_parameter() {
        let action = Action::CommunicateImage {
            rover: 1,
            objective: 0,
            mode: Mode::HighRes,
            location: 3,
            lander: 4,
        };
        assert_eq!(
            action.to_string(),
            "( communicate_image_data rover1 objective0 high_res waypoint3 waypoint4 general )"
        );
    }

    #[test]
    fn take_image_spells_the_mode_by_name() {
        let action = Action::TakeImage {
            rover: 0,
            waypoint: 1,
            objective: 0,
            camera: 0,
            mode: Mode::Colour,
        };
        assert_eq!(
            action.to_string(),
            "( take_image rover0 waypoint1 objective0 camera0 colour )"
        );
    }
}
