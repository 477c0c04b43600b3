//! Duplicate detection over canonical state fingerprints.
//!
//! A [`StateKey`] packs the dynamic fields of a state into a few integers and
//! bitmaps. The packing deliberately collapses some per-object detail — a
//! rover contributes one bit for "holds at least one soil analysis" rather
//! than its full per-waypoint bitmap, and an objective one bit for "some
//! image mode communicated". Two states with the same key are treated as
//! equal, and this exact packing must be kept to reproduce the search's
//! deduplication behaviour.

use crate::search::{Cost, State, MAX_ROVERS};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    rover_positions: [u8; MAX_ROVERS],
    energy_levels: [Cost; MAX_ROVERS],
    /// Bit per rover: holds at least one soil analysis.
    has_soil_analysis: u16,
    /// Bit per rover: holds at least one rock analysis.
    has_rock_analysis: u16,
    /// Per rover, bitmap over objective-mode pairs.
    have_image: [u32; MAX_ROVERS],
    /// Bitmaps over waypoints.
    soil_samples: u32,
    rock_samples: u32,
    communicated_soil: u32,
    communicated_rock: u32,
    /// Bitmap over cameras.
    calibrated: u16,
    /// Bitmap over stores.
    full_stores: u16,
    /// Bit per objective: at least one image mode communicated.
    communicated_images: u16,
    /// The recharge counter discriminates otherwise-identical states reached
    /// with different g.
    recharges: u32,
}

impl StateKey {
    pub fn pack(state: &State) -> Self {
        let mut key = StateKey {
            rover_positions: [0; MAX_ROVERS],
            energy_levels: [0; MAX_ROVERS],
            has_soil_analysis: 0,
            has_rock_analysis: 0,
            have_image: [0; MAX_ROVERS],
            soil_samples: 0,
            rock_samples: 0,
            communicated_soil: 0,
            communicated_rock: 0,
            calibrated: 0,
            full_stores: 0,
            communicated_images: 0,
            recharges: state.recharges,
        };

        for (rover, rs) in state.rovers.iter().enumerate() {
            key.rover_positions[rover] = rs.position as u8;
            key.energy_levels[rover] = rs.energy;
            if rs.soil_analyses != 0 {
                key.has_soil_analysis |= 1 << rover;
            }
            if rs.rock_analyses != 0 {
                key.has_rock_analysis |= 1 << rover;
            }
            key.have_image[rover] = rs.images;
        }

        for (waypoint, ws) in state.waypoints.iter().enumerate() {
            if ws.has_soil_sample {
                key.soil_samples |= 1 << waypoint;
            }
            if ws.has_rock_sample {
                key.rock_samples |= 1 << waypoint;
            }
            if ws.communicated_soil {
                key.communicated_soil |= 1 << waypoint;
            }
            if ws.communicated_rock {
                key.communicated_rock |= 1 << waypoint;
            }
        }

        for (camera, &calibrated) in state.calibrated.iter().enumerate() {
            if calibrated {
                key.calibrated |= 1 << camera;
            }
        }

        for (store, &full) in state.store_full.iter().enumerate() {
            if full {
                key.full_stores |= 1 << store;
            }
        }

        for (objective, &modes) in state.communicated_images.iter().enumerate() {
            if modes != 0 {
                key.communicated_images |= 1 << objective;
            }
        }

        key
    }
}

/// The closed set: fingerprints of every state ever generated. Insertion on
/// generation means a duplicate is discarded before it costs a heuristic
/// evaluation or a frontier slot.
#[derive(Debug, Default)]
pub struct ClosedSet {
    seen: HashSet<StateKey>,
}

impl ClosedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true iff the state's fingerprint was not seen before.
    pub fn insert(&mut self, state: &State) -> bool {
        self.seen.insert(StateKey::pack(state))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Action, Task};
    use crate::test_utils::*;

    #[test]
    fn repeated_insert_reports_a_duplicate() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let mut closed = ClosedSet::new();
        assert!(closed.insert(&task.initial_state));
        assert!(!closed.insert(&task.initial_state));
        assert_eq!(closed.len(), 1);
    }

    #[test]
    fn moving_a_rover_changes_the_key() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let state = task.initial_state.clone();
        let (moved, _) = state
            .apply(
                &task,
                Action::Navigate {
                    rover: 0,
                    from: 0,
                    to: 1,
                },
            )
            .unwrap();
        assert_ne!(StateKey::pack(&state), StateKey::pack(&moved));
    }

    #[test]
    fn analysis_bits_collapse_per_rover() {
        let task = Task::from_text(TWO_ROVERS_PROBLEM_TEXT).unwrap();
        let mut a = task.initial_state.clone();
        a.rovers[0].soil_analyses = 1 << 1;
        let mut b = task.initial_state.clone();
        b.rovers[0].soil_analyses = 1 << 2;
        // Which waypoint the analysis covers is collapsed away.
        assert_eq!(StateKey::pack(&a), StateKey::pack(&b));
        let mut c = task.initial_state.clone();
        c.rovers[1].soil_analyses = 1 << 1;
        assert_ne!(StateKey::pack(&a), StateKey::pack(&c));
    }

    #[test]
    fn communicated_image_modes_collapse_per_objective() {
        let task = Task::from_text(IMAGE_PROBLEM_TEXT).unwrap();
        let mut a = task.initial_state.clone();
        a.communicated_images[0] = 0b01;
        let mut b = task.initial_state.clone();
        b.communicated_images[0] = 0b10;
        assert_eq!(StateKey::pack(&a), StateKey::pack(&b));
    }

    #[test]
    fn recharge_counter_is_part_of_identity() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let mut recharged = task.initial_state.clone();
        recharged.recharges += 1;
        assert_ne!(
            StateKey::pack(&task.initial_state),
            StateKey::pack(&recharged)
        );
    }
}
