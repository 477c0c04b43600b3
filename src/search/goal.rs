use crate::search::{Mode, State};

/// The communication goals of a problem: which soil and rock data (per
/// waypoint) and which images (per objective and mode) must reach the lander.
/// Read-only after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    /// Bitmap over waypoints.
    soil: u32,
    /// Bitmap over waypoints.
    rock: u32,
    /// Per-objective bitmap over modes.
    images: Vec<u32>,
}

impl Goal {
    pub fn new(num_objectives: usize) -> Self {
        Self {
            soil: 0,
            rock: 0,
            images: vec![0; num_objectives],
        }
    }

    pub fn add_soil(&mut self, waypoint: usize) {
        self.soil |= 1 << waypoint;
    }

    pub fn add_rock(&mut self, waypoint: usize) {
        self.rock |= 1 << waypoint;
    }

    pub fn add_image(&mut self, objective: usize, mode: Mode) {
        self.images[objective] |= 1 << mode.index();
    }

    pub fn wants_soil(&self, waypoint: usize) -> bool {
        self.soil & (1 << waypoint) != 0
    }

    pub fn wants_rock(&self, waypoint: usize) -> bool {
        self.rock & (1 << waypoint) != 0
    }

    pub fn wants_image(&self, objective: usize, mode: Mode) -> bool {
        self.images[objective] & (1 << mode.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.soil == 0 && self.rock == 0 && self.images.iter().all(|&modes| modes == 0)
    }

    /// True iff every goal datum has been communicated in `state`.
    pub fn is_satisfied(&self, state: &State) -> bool {
        for (waypoint, ws) in state.waypoints.iter().enumerate() {
            if self.wants_soil(waypoint) && !ws.communicated_soil {
                return false;
            }
            if self.wants_rock(waypoint) && !ws.communicated_rock {
                return false;
            }
        }
        for (objective, &wanted) in self.images.iter().enumerate() {
            if wanted & !state.communicated_images[objective] != 0 {
                return false;
            }
        }
        true
    }
}
