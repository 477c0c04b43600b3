//! Enumeration of candidate ground actions for a state.
//!
//! Candidates are guarded by the cheap static checks below and re-checked by
//! [`State::apply`](crate::search::State::apply) when the search driver
//! builds the successor. The enumeration order is fixed — it decides
//! tie-breaking among equal-f nodes in the frontier and therefore which of
//! several equally good plans a run produces.

use crate::search::state::{
    image_bit, CALIBRATE_COST, COMMUNICATE_IMAGE_COST, COMMUNICATE_ROCK_COST,
    COMMUNICATE_SOIL_COST, NAVIGATE_COST, RECHARGE_THRESHOLD, SAMPLE_ROCK_COST, SAMPLE_SOIL_COST,
    TAKE_IMAGE_COST,
};
use crate::search::{Action, Mode, State, Task};

/// Lists the candidate actions of `state`, per rover: recharge, sampling,
/// imaging, communication, drop, navigation.
pub fn applicable_actions(task: &Task, state: &State) -> Vec<Action> {
    let mut actions = vec![];
    let lander = task.lander_position;

    for (rover, info) in task.rovers.iter().enumerate() {
        if !info.available {
            continue;
        }
        let rs = &state.rovers[rover];
        let position = rs.position;

        if task.waypoints[position].in_sun && rs.energy < RECHARGE_THRESHOLD {
            actions.push(Action::Recharge {
                rover,
                waypoint: position,
            });
        }

        if info.equipped_soil
            && rs.energy >= SAMPLE_SOIL_COST
            && task.goal.wants_soil(position)
            && !state.waypoints[position].communicated_soil
            && state.waypoints[position].has_soil_sample
        {
            for (store, owner) in task.stores.iter().enumerate() {
                if owner.rover == rover && !state.store_full[store] {
                    actions.push(Action::SampleSoil {
                        rover,
                        store,
                        waypoint: position,
                    });
                }
            }
        }

        if info.equipped_rock
            && rs.energy >= SAMPLE_ROCK_COST
            && task.goal.wants_rock(position)
            && !state.waypoints[position].communicated_rock
            && state.waypoints[position].has_rock_sample
        {
            for (store, owner) in task.stores.iter().enumerate() {
                if owner.rover == rover && !state.store_full[store] {
                    actions.push(Action::SampleRock {
                        rover,
                        store,
                        waypoint: position,
                    });
                }
            }
        }

        if info.equipped_imaging {
            for (camera, cam) in task.cameras.iter().enumerate() {
                if cam.rover != rover {
                    continue;
                }
                for (objective, obj) in task.objectives.iter().enumerate() {
                    if rs.energy >= CALIBRATE_COST
                        && obj.visible_from & (1 << position) != 0
                        && cam.calibration_targets & (1 << objective) != 0
                    {
                        actions.push(Action::Calibrate {
                            rover,
                            camera,
                            objective,
                            waypoint: position,
                        });
                    }

                    for mode in Mode::ALL {
                        if state.calibrated[camera]
                            && rs.energy >= TAKE_IMAGE_COST
                            && cam.supported_modes & (1 << mode.index()) != 0
                            && obj.visible_from & (1 << position) != 0
                            && task.goal.wants_image(objective, mode)
                            && state.communicated_images[objective] & (1 << mode.index()) == 0
                        {
                            actions.push(Action::TakeImage {
                                rover,
                                waypoint: position,
                                objective,
                                camera,
                                mode,
                            });
                        }
                    }
                }
            }
        }

        if task.channel_free && task.waypoints[position].visible & (1 << lander) != 0 {
            if rs.energy >= COMMUNICATE_SOIL_COST {
                for waypoint in 0..task.num_waypoints() {
                    if task.goal.wants_soil(waypoint)
                        && !state.waypoints[waypoint].communicated_soil
                        && rs.soil_analyses & (1 << waypoint) != 0
                    {
                        actions.push(Action::CommunicateSoil {
                            rover,
                            sample: waypoint,
                            location: position,
                            lander,
                        });
                    }
                }
            }

            if rs.energy >= COMMUNICATE_ROCK_COST {
                for waypoint in 0..task.num_waypoints() {
                    if task.goal.wants_rock(waypoint)
                        && !state.waypoints[waypoint].communicated_rock
                        && rs.rock_analyses & (1 << waypoint) != 0
                    {
                        actions.push(Action::CommunicateRock {
                            rover,
                            sample: waypoint,
                            location: position,
                            lander,
                        });
                    }
                }
            }

            if rs.energy >= COMMUNICATE_IMAGE_COST {
                for objective in 0..task.num_objectives() {
                    for mode in Mode::ALL {
                        if task.goal.wants_image(objective, mode)
                            && state.communicated_images[objective] & (1 << mode.index()) == 0
                            && rs.images & image_bit(objective, mode) != 0
                        {
                            actions.push(Action::CommunicateImage {
                                rover,
                                objective,
                                mode,
                                location: position,
                                lander,
                            });
                        }
                    }
                }
            }
        }

        for (store, owner) in task.stores.iter().enumerate() {
            if owner.rover == rover && state.store_full[store] {
                actions.push(Action::Drop { rover, store });
            }
        }

        for to in 0..task.num_waypoints() {
            if to != position
                && rs.energy >= NAVIGATE_COST
                && task.waypoints[position].visible & (1 << to) != 0
                && info.can_traverse[position] & (1 << to) != 0
            {
                actions.push(Action::Navigate {
                    rover,
                    from: position,
                    to,
                });
            }
        }
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn initial_candidates_for_the_sampling_problem() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        // No sample underfoot, nothing to communicate: only navigation.
        assert_eq!(
            applicable_actions(&task, &task.initial_state),
            vec![Action::Navigate {
                rover: 0,
                from: 0,
                to: 1,
            }]
        );
    }

    #[test]
    fn sampling_precedes_navigation_at_the_sample_site() {
        let task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        let mut state = task.initial_state.clone();
        state.rovers[0].position = 1;
        assert_eq!(
            applicable_actions(&task, &state),
            vec![
                Action::SampleSoil {
                    rover: 0,
                    store: 0,
                    waypoint: 1,
                },
                Action::Navigate {
                    rover: 0,
                    from: 1,
                    to: 0,
                },
            ]
        );
    }

    #[test]
    fn recharge_offered_only_under_the_threshold() {
        let task = Task::from_text(RECHARGE_PROBLEM_TEXT).unwrap();
        let actions = applicable_actions(&task, &task.initial_state);
        assert_eq!(
            actions.first(),
            Some(&Action::Recharge {
                rover: 0,
                waypoint: 0,
            })
        );

        let mut state = task.initial_state.clone();
        state.rovers[0].energy = 20;
        let actions = applicable_actions(&task, &state);
        assert!(!actions
            .iter()
            .any(|action| matches!(action, Action::Recharge { .. })));
    }

    #[test]
    fn every_candidate_survives_apply() {
        let task = Task::from_text(MIXED_PROBLEM_TEXT).unwrap();
        let mut state = task.initial_state.clone();
        // Walk a few expansion levels, applying every candidate as we go.
        for _ in 0..4 {
            let actions = applicable_actions(&task, &state);
            assert!(!actions.is_empty());
            for &action in &actions {
                assert!(
                    state.apply(&task, action).is_some(),
                    "candidate {action} failed its own preconditions"
                );
            }
            state = state.apply(&task, actions[0]).unwrap().0;
        }
    }

    #[test]
    fn unavailable_rover_generates_nothing() {
        let mut task = Task::from_text(NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        task.rovers[0].available = false;
        assert!(applicable_actions(&task, &task.initial_state).is_empty());
    }
}
