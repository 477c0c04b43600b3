//! The mutable world state and the ground action semantics.
//!
//! Static problem data (maps, visibility, equipment, ownership) lives in
//! [`Task`](crate::search::Task); a [`State`] carries only the fields that
//! actions mutate, so cloning one per successor stays cheap.

use crate::search::{Action, Cost, Task};

pub const NAVIGATE_COST: Cost = 8;
pub const SAMPLE_SOIL_COST: Cost = 3;
pub const SAMPLE_ROCK_COST: Cost = 5;
pub const CALIBRATE_COST: Cost = 2;
pub const TAKE_IMAGE_COST: Cost = 1;
pub const COMMUNICATE_SOIL_COST: Cost = 4;
pub const COMMUNICATE_ROCK_COST: Cost = 4;
pub const COMMUNICATE_IMAGE_COST: Cost = 6;

/// Energy granted by a single recharge action.
pub const RECHARGE_GAIN: Cost = 20;

/// A rover recharges only while its energy is below this threshold (which is
/// also the navigation cost, so a rover never strands itself by one move).
pub const RECHARGE_THRESHOLD: Cost = 8;

/// An imaging mode. Exactly three exist in the domain; the indices match the
/// problem-file names `colour`, `high_res` and `low_res`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Colour = 0,
    HighRes = 1,
    LowRes = 2,
}

impl Mode {
    pub const COUNT: usize = 3;

    pub const ALL: [Mode; Mode::COUNT] = [Mode::Colour, Mode::HighRes, Mode::LowRes];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Mode> {
        Mode::ALL.get(index).copied()
    }

    pub fn from_name(name: &str) -> Option<Mode> {
        match name {
            "colour" => Some(Mode::Colour),
            "high_res" => Some(Mode::HighRes),
            "low_res" => Some(Mode::LowRes),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Colour => "colour",
            Mode::HighRes => "high_res",
            Mode::LowRes => "low_res",
        }
    }
}

/// Bit for objective `objective` in mode `mode` inside a per-rover image
/// bitmap, and inside the goal's image table.
pub(crate) fn image_bit(objective: usize, mode: Mode) -> u32 {
    1 << (objective * Mode::COUNT + mode.index())
}

/// Per-rover dynamic fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoverState {
    /// Waypoint the rover currently occupies.
    pub position: usize,
    /// Remaining energy. Never negative; every action checks its cost first.
    pub energy: Cost,
    /// Bitmap over waypoints: soil analyses held on board.
    pub soil_analyses: u32,
    /// Bitmap over waypoints: rock analyses held on board.
    pub rock_analyses: u32,
    /// Bitmap over objective-mode pairs (see [`image_bit`]): images on board.
    pub images: u32,
}

/// Per-waypoint dynamic fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaypointState {
    pub has_soil_sample: bool,
    pub has_rock_sample: bool,
    pub communicated_soil: bool,
    pub communicated_rock: bool,
}

/// The world state at one node of the search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub rovers: Vec<RoverState>,
    pub waypoints: Vec<WaypointState>,
    /// Per-camera calibration flag. Set by `calibrate`, cleared by the next
    /// `take_image` on the same camera.
    pub calibrated: Vec<bool>,
    /// Per-store fullness flag.
    pub store_full: Vec<bool>,
    /// Per-objective bitmap over modes: image data already communicated.
    pub communicated_images: Vec<u32>,
    /// Number of recharge actions taken on the path to this state.
    pub recharges: u32,
}

impl State {
    /// Applies `action` to `self`, returning the successor state and the
    /// energy the action consumed, or `None` if any precondition fails.
    pub fn apply(&self, task: &Task, action: Action) -> Option<(State, Cost)> {
        match action {
            Action::Navigate { rover, from, to } => {
                if !task.rovers[rover].available {
                    return None;
                }
                if self.rovers[rover].energy < NAVIGATE_COST {
                    return None;
                }
                if task.waypoints[from].visible & (1 << to) == 0 {
                    return None;
                }
                if task.rovers[rover].can_traverse[from] & (1 << to) == 0 {
                    return None;
                }
                if self.rovers[rover].position != from || from == to {
                    return None;
                }
                let mut next = self.clone();
                next.rovers[rover].position = to;
                next.rovers[rover].energy -= NAVIGATE_COST;
                Some((next, NAVIGATE_COST))
            }
            Action::Recharge { rover, waypoint } => {
                if !task.waypoints[waypoint].in_sun {
                    return None;
                }
                if self.rovers[rover].position != waypoint {
                    return None;
                }
                if self.rovers[rover].energy >= RECHARGE_THRESHOLD {
                    return None;
                }
                let mut next = self.clone();
                next.rovers[rover].energy += RECHARGE_GAIN;
                next.recharges += 1;
                Some((next, 0))
            }
            Action::SampleSoil {
                rover,
                store,
                waypoint,
            } => {
                if self.rovers[rover].position != waypoint {
                    return None;
                }
                if self.rovers[rover].energy < SAMPLE_SOIL_COST {
                    return None;
                }
                if !self.waypoints[waypoint].has_soil_sample {
                    return None;
                }
                if !task.rovers[rover].equipped_soil {
                    return None;
                }
                if task.stores[store].rover != rover || self.store_full[store] {
                    return None;
                }
                if !task.goal.wants_soil(waypoint) || self.waypoints[waypoint].communicated_soil {
                    return None;
                }
                let mut next = self.clone();
                next.store_full[store] = true;
                next.rovers[rover].energy -= SAMPLE_SOIL_COST;
                next.rovers[rover].soil_analyses |= 1 << waypoint;
                next.waypoints[waypoint].has_soil_sample = false;
                Some((next, SAMPLE_SOIL_COST))
            }
            Action::SampleRock {
                rover,
                store,
                waypoint,
            } => {
                if self.rovers[rover].position != waypoint {
                    return None;
                }
                if self.rovers[rover].energy < SAMPLE_ROCK_COST {
                    return None;
                }
                if !self.waypoints[waypoint].has_rock_sample {
                    return None;
                }
                if !task.rovers[rover].equipped_rock {
                    return None;
                }
                if task.stores[store].rover != rover || self.store_full[store] {
                    return None;
                }
                if !task.goal.wants_rock(waypoint) || self.waypoints[waypoint].communicated_rock {
                    return None;
                }
                let mut next = self.clone();
                next.store_full[store] = true;
                next.rovers[rover].energy -= SAMPLE_ROCK_COST;
                next.rovers[rover].rock_analyses |= 1 << waypoint;
                next.waypoints[waypoint].has_rock_sample = false;
                Some((next, SAMPLE_ROCK_COST))
            }
            Action::Drop { rover, store } => {
                if task.stores[store].rover != rover || !self.store_full[store] {
                    return None;
                }
                let mut next = self.clone();
                next.store_full[store] = false;
                Some((next, 0))
            }
            Action::Calibrate {
                rover,
                camera,
                objective,
                waypoint,
            } => {
                if !task.rovers[rover].equipped_imaging {
                    return None;
                }
                if self.rovers[rover].energy < CALIBRATE_COST {
                    return None;
                }
                if task.cameras[camera].calibration_targets & (1 << objective) == 0 {
                    return None;
                }
                if self.rovers[rover].position != waypoint {
                    return None;
                }
                if task.objectives[objective].visible_from & (1 << waypoint) == 0 {
                    return None;
                }
                if task.cameras[camera].rover != rover {
                    return None;
                }
                let mut next = self.clone();
                next.rovers[rover].energy -= CALIBRATE_COST;
                next.calibrated[camera] = true;
                Some((next, CALIBRATE_COST))
            }
            Action::TakeImage {
                rover,
                waypoint,
                objective,
                camera,
                mode,
            } => {
                if !self.calibrated[camera] || task.cameras[camera].rover != rover {
                    return None;
                }
                if !task.rovers[rover].equipped_imaging {
                    return None;
                }
                if task.cameras[camera].supported_modes & (1 << mode.index()) == 0 {
                    return None;
                }
                if task.objectives[objective].visible_from & (1 << waypoint) == 0 {
                    return None;
                }
                if self.rovers[rover].position != waypoint {
                    return None;
                }
                if self.rovers[rover].energy < TAKE_IMAGE_COST {
                    return None;
                }
                if !task.goal.wants_image(objective, mode) {
                    return None;
                }
                if self.communicated_images[objective] & (1 << mode.index()) != 0 {
                    return None;
                }
                let mut next = self.clone();
                next.rovers[rover].images |= image_bit(objective, mode);
                next.calibrated[camera] = false;
                next.rovers[rover].energy -= TAKE_IMAGE_COST;
                Some((next, TAKE_IMAGE_COST))
            }
            Action::CommunicateSoil {
                rover,
                sample,
                location,
                lander,
            } => {
                if self.rovers[rover].position != location {
                    return None;
                }
                if task.lander_position != lander {
                    return None;
                }
                if self.rovers[rover].soil_analyses & (1 << sample) == 0 {
                    return None;
                }
                if task.waypoints[location].visible & (1 << lander) == 0 {
                    return None;
                }
                if !task.rovers[rover].available || !task.channel_free {
                    return None;
                }
                if self.rovers[rover].energy < COMMUNICATE_SOIL_COST {
                    return None;
                }
                if !task.goal.wants_soil(sample) || self.waypoints[sample].communicated_soil {
                    return None;
                }
                let mut next = self.clone();
                next.waypoints[sample].communicated_soil = true;
                next.rovers[rover].energy -= COMMUNICATE_SOIL_COST;
                Some((next, COMMUNICATE_SOIL_COST))
            }
            Action::CommunicateRock {
                rover,
                sample,
                location,
                lander,
            } => {
                if self.rovers[rover].position != location {
                    return None;
                }
                if task.lander_position != lander {
                    return None;
                }
                if self.rovers[rover].rock_analyses & (1 << sample) == 0 {
                    return None;
                }
                if task.waypoints[location].visible & (1 << lander) == 0 {
                    return None;
                }
                if !task.rovers[rover].available || !task.channel_free {
                    return None;
                }
                if self.rovers[rover].energy < COMMUNICATE_ROCK_COST {
                    return None;
                }
                if !task.goal.wants_rock(sample) || self.waypoints[sample].communicated_rock {
                    return None;
                }
                let mut next = self.clone();
                next.waypoints[sample].communicated_rock = true;
                next.rovers[rover].energy -= COMMUNICATE_ROCK_COST;
                Some((next, COMMUNICATE_ROCK_COST))
            }
            Action::CommunicateImage {
                rover,
                objective,
                mode,
                location,
                lander,
            } => {
                if self.rovers[rover].position != location {
                    return None;
                }
                if task.lander_position != lander {
                    return None;
                }
                if self.rovers[rover].images & image_bit(objective, mode) == 0 {
                    return None;
                }
                if task.waypoints[location].visible & (1 << lander) == 0 {
                    return None;
                }
                if !task.rovers[rover].available || !task.channel_free {
                    return None;
                }
                if self.rovers[rover].energy < COMMUNICATE_IMAGE_COST {
                    return None;
                }
                if !task.goal.wants_image(objective, mode) {
                    return None;
                }
                if self.communicated_images[objective] & (1 << mode.index()) != 0 {
                    return None;
                }
                let mut next = self.clone();
                next.communicated_images[objective] |= 1 << mode.index();
                next.rovers[rover].energy -= COMMUNICATE_IMAGE_COST;
                Some((next, COMMUNICATE_IMAGE_COST))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn navigate_moves_and_spends_energy() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let state = task.initial_state.clone();
        let (next, spent) = state
            .apply(
                &task,
                Action::Navigate {
                    rover: 0,
                    from: 0,
                    to: 1,
                },
            )
            .unwrap();
        assert_eq!(spent, NAVIGATE_COST);
        assert_eq!(next.rovers[0].position, 1);
        assert_eq!(next.rovers[0].energy, state.rovers[0].energy - NAVIGATE_COST);
    }

    #[test]
    fn navigate_rejects_wrong_origin() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let state = task.initial_state.clone();
        assert!(state
            .apply(
                &task,
                Action::Navigate {
                    rover: 0,
                    from: 1,
                    to: 0,
                }
            )
            .is_none());
    }

    #[test]
    fn recharge_only_below_threshold() {
        let task = Task::from_text(RECHARGE_PROBLEM_TEXT).unwrap();
        let mut state = task.initial_state.clone();
        // Fixture starts at energy 7, under the threshold and in sun.
        let (next, spent) = state
            .apply(
                &task,
                Action::Recharge {
                    rover: 0,
                    waypoint: 0,
                },
            )
            .unwrap();
        assert_eq!(spent, 0);
        assert_eq!(next.rovers[0].energy, 7 + RECHARGE_GAIN);
        assert_eq!(next.recharges, 1);

        state.rovers[0].energy = RECHARGE_THRESHOLD;
        assert!(state
            .apply(
                &task,
                Action::Recharge {
                    rover: 0,
                    waypoint: 0,
                }
            )
            .is_none());
    }

    #[test]
    fn sample_soil_fills_store_and_takes_sample() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let mut state = task.initial_state.clone();
        state.rovers[0].position = 1;
        let (next, spent) = state
            .apply(
                &task,
                Action::SampleSoil {
                    rover: 0,
                    store: 0,
                    waypoint: 1,
                },
            )
            .unwrap();
        assert_eq!(spent, SAMPLE_SOIL_COST);
        assert!(next.store_full[0]);
        assert!(!next.waypoints[1].has_soil_sample);
        assert_eq!(next.rovers[0].soil_analyses, 1 << 1);

        // A full store blocks a second sample.
        assert!(next
            .apply(
                &task,
                Action::SampleSoil {
                    rover: 0,
                    store: 0,
                    waypoint: 1,
                }
            )
            .is_none());
    }

    #[test]
    fn take_image_consumes_calibration() {
        let task = Task::from_text(IMAGE_PROBLEM_TEXT).unwrap();
        let mut state = task.initial_state.clone();
        state.rovers[0].position = 1;
        let (state, _) = state
            .apply(
                &task,
                Action::Calibrate {
                    rover: 0,
                    camera: 0,
                    objective: 0,
                    waypoint: 1,
                },
            )
            .unwrap();
        assert!(state.calibrated[0]);
        let (state, spent) = state
            .apply(
                &task,
                Action::TakeImage {
                    rover: 0,
                    waypoint: 1,
                    objective: 0,
                    camera: 0,
                    mode: Mode::HighRes,
                },
            )
            .unwrap();
        assert_eq!(spent, TAKE_IMAGE_COST);
        assert!(!state.calibrated[0]);
        assert_eq!(state.rovers[0].images, image_bit(0, Mode::HighRes));
    }

    #[test]
    fn communicate_soil_needs_line_of_sight() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let mut state = task.initial_state.clone();
        state.rovers[0].soil_analyses = 1 << 1;
        // Waypoint 0 does not see the lander at waypoint 2.
        assert!(state
            .apply(
                &task,
                Action::CommunicateSoil {
                    rover: 0,
                    sample: 1,
                    location: 0,
                    lander: 2,
                }
            )
            .is_none());
        state.rovers[0].position = 1;
        let (next, spent) = state
            .apply(
                &task,
                Action::CommunicateSoil {
                    rover: 0,
                    sample: 1,
                    location: 1,
                    lander: 2,
                }
            )
            .unwrap();
        assert_eq!(spent, COMMUNICATE_SOIL_COST);
        assert!(next.waypoints[1].communicated_soil);
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_name(mode.name()), Some(mode));
            assert_eq!(Mode::from_index(mode.index()), Some(mode));
        }
        assert_eq!(Mode::from_name("sepia"), None);
    }
}
