//! Reader for Rover problem files.
//!
//! The format is the problem half of the domain's PDDL rendition: typed
//! objects, `:init` atoms over a fixed predicate vocabulary, and `:goal`
//! atoms over the three communication predicates. Object identity comes from
//! the trailing integer in the object name; modes are named.

use crate::parsers::{object_index, tokenize};
use crate::search::{
    CameraInfo, Goal, Mode, ObjectiveInfo, RoverInfo, RoverState, State, StoreInfo, Task,
    WaypointInfo, WaypointState, MAX_CAMERAS, MAX_MODES, MAX_OBJECTIVES, MAX_ROVERS, MAX_STORES,
    MAX_WAYPOINTS,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("{file}: cannot read problem file: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{file}:{line}: unknown predicate `{name}`")]
    UnknownPredicate {
        file: String,
        line: usize,
        name: String,
    },
    #[error("{file}:{line}: atom `{name}` is missing arguments")]
    MissingArguments {
        file: String,
        line: usize,
        name: String,
    },
    #[error("{file}:{line}: object `{name}` has no index")]
    MissingObjectIndex {
        file: String,
        line: usize,
        name: String,
    },
    #[error("{file}:{line}: object `{name}` is out of range")]
    ObjectIndexOutOfRange {
        file: String,
        line: usize,
        name: String,
    },
    #[error("{file}:{line}: unknown imaging mode `{name}`")]
    UnknownMode {
        file: String,
        line: usize,
        name: String,
    },
    #[error("{file}:{line}: malformed numeric value `{name}`")]
    MalformedValue {
        file: String,
        line: usize,
        name: String,
    },
    #[error("{file}:{line}: store{store} is claimed by a second rover")]
    DuplicateStoreOwner {
        file: String,
        line: usize,
        store: usize,
    },
    #[error("{file}: problem declares {count} {kind}s, the planner supports at most {max}")]
    CapacityExceeded {
        file: String,
        kind: &'static str,
        count: usize,
        max: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Objects,
    Init,
    Goal,
    /// `:metric` and anything else we deliberately skip.
    Ignored,
}

#[derive(Debug, Default)]
struct Counts {
    rovers: usize,
    waypoints: usize,
    cameras: usize,
    stores: usize,
    objectives: usize,
    modes: usize,
}

impl Counts {
    fn record(&mut self, type_name: &str, batch: usize) {
        match type_name {
            "rover" => self.rovers += batch,
            "waypoint" => self.waypoints += batch,
            "camera" => self.cameras += batch,
            "store" => self.stores += batch,
            "objective" => self.objectives += batch,
            "mode" => self.modes += batch,
            // Unknown object types carry no state; ignore them.
            _ => {}
        }
    }

    fn check_caps(&self, file: &str) -> Result<(), ProblemError> {
        let limits = [
            ("rover", self.rovers, MAX_ROVERS),
            ("waypoint", self.waypoints, MAX_WAYPOINTS),
            ("camera", self.cameras, MAX_CAMERAS),
            ("store", self.stores, MAX_STORES),
            ("objective", self.objectives, MAX_OBJECTIVES),
            ("mode", self.modes, MAX_MODES),
        ];
        for (kind, count, max) in limits {
            if count > max {
                return Err(ProblemError::CapacityExceeded {
                    file: file.to_string(),
                    kind,
                    count,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// Switches `section` if `token` is a section marker. Returns true if it was.
fn section_marker(token: &str, section: &mut Section) -> bool {
    match token {
        ":objects" => *section = Section::Objects,
        ":init" => *section = Section::Init,
        ":goal" => *section = Section::Goal,
        ":metric" => *section = Section::Ignored,
        _ => return false,
    }
    true
}

/// First pass: count objects per type from the `:objects` section.
fn count_objects(file: &str, text: &str) -> Result<Counts, ProblemError> {
    let mut counts = Counts::default();
    let mut section = Section::Preamble;
    for line in text.lines() {
        let mut batch = 0usize;
        for token in tokenize(line) {
            if section_marker(token, &mut section) {
                batch = 0;
                continue;
            }
            if section != Section::Objects || token == "(" || token == ")" {
                continue;
            }
            if token == "-" {
                // The type name follows; the batch before the dash gets it.
                continue;
            }
            if batch > 0 && object_index(token).is_none() && Mode::from_name(token).is_none() {
                // Typed-list type name closing a batch.
                counts.record(token, batch);
                batch = 0;
            } else {
                batch += 1;
            }
        }
    }
    counts.check_caps(file)?;
    Ok(counts)
}

struct LineReader<'a> {
    file: &'a str,
    line_no: usize,
    tokens: Vec<&'a str>,
    next: usize,
}

impl<'a> LineReader<'a> {
    /// Next non-parenthesis token, if any.
    fn next_token(&mut self) -> Option<&'a str> {
        while self.next < self.tokens.len() {
            let token = self.tokens[self.next];
            self.next += 1;
            if token != "(" && token != ")" {
                return Some(token);
            }
        }
        None
    }

    fn arg(&mut self, atom: &str) -> Result<&'a str, ProblemError> {
        self.next_token().ok_or_else(|| ProblemError::MissingArguments {
            file: self.file.to_string(),
            line: self.line_no,
            name: atom.to_string(),
        })
    }

    fn indexed_arg(&mut self, atom: &str, limit: usize) -> Result<usize, ProblemError> {
        let name = self.arg(atom)?;
        let index = object_index(name).ok_or_else(|| ProblemError::MissingObjectIndex {
            file: self.file.to_string(),
            line: self.line_no,
            name: name.to_string(),
        })?;
        if index >= limit {
            return Err(ProblemError::ObjectIndexOutOfRange {
                file: self.file.to_string(),
                line: self.line_no,
                name: name.to_string(),
            });
        }
        Ok(index)
    }

    fn mode_arg(&mut self, atom: &str) -> Result<Mode, ProblemError> {
        let name = self.arg(atom)?;
        Mode::from_name(name).ok_or_else(|| ProblemError::UnknownMode {
            file: self.file.to_string(),
            line: self.line_no,
            name: name.to_string(),
        })
    }

    fn numeric_arg(&mut self, atom: &str) -> Result<i64, ProblemError> {
        let name = self.arg(atom)?;
        name.parse().map_err(|_| ProblemError::MalformedValue {
            file: self.file.to_string(),
            line: self.line_no,
            name: name.to_string(),
        })
    }
}

/// Parses a problem file into a [`Task`]. `file` labels error messages.
pub fn parse_problem(file: &str, text: &str) -> Result<Task, ProblemError> {
    let counts = count_objects(file, text)?;

    let mut rovers = vec![
        RoverInfo {
            available: false,
            equipped_soil: false,
            equipped_rock: false,
            equipped_imaging: false,
            can_traverse: vec![0; counts.waypoints],
        };
        counts.rovers
    ];
    let mut waypoints = vec![
        WaypointInfo {
            in_sun: false,
            visible: 0,
        };
        counts.waypoints
    ];
    let mut cameras = vec![
        CameraInfo {
            rover: 0,
            calibration_targets: 0,
            supported_modes: 0,
        };
        counts.cameras
    ];
    let mut store_owners: Vec<Option<usize>> = vec![None; counts.stores];
    let mut objectives = vec![ObjectiveInfo { visible_from: 0 }; counts.objectives];
    let mut lander_position = 0;
    let mut channel_free = false;
    let mut goal = Goal::new(counts.objectives);
    let mut state = State {
        rovers: vec![
            RoverState {
                position: 0,
                energy: 0,
                soil_analyses: 0,
                rock_analyses: 0,
                images: 0,
            };
            counts.rovers
        ],
        waypoints: vec![
            WaypointState {
                has_soil_sample: false,
                has_rock_sample: false,
                communicated_soil: false,
                communicated_rock: false,
            };
            counts.waypoints
        ],
        calibrated: vec![false; counts.cameras],
        store_full: vec![false; counts.stores],
        communicated_images: vec![0; counts.objectives],
        recharges: 0,
    };

    let mut section = Section::Preamble;
    for (index, line) in text.lines().enumerate() {
        let mut reader = LineReader {
            file,
            line_no: index + 1,
            tokens: tokenize(line),
            next: 0,
        };
        loop {
            // Peek through parens and markers by hand: markers switch the
            // section and atom names drive arity-based consumption.
            let Some(name) = reader.next_token() else {
                break;
            };
            if section_marker(name, &mut section) {
                continue;
            }
            match section {
                Section::Preamble | Section::Objects | Section::Ignored => {}
                Section::Init => match name {
                    "=" => {
                        let fluent = reader.arg(name)?;
                        match fluent {
                            "energy" => {
                                let rover = reader.indexed_arg(fluent, counts.rovers)?;
                                state.rovers[rover].energy = reader.numeric_arg(fluent)? as i32;
                            }
                            "recharges" => {
                                state.recharges = reader.numeric_arg(fluent)? as u32;
                            }
                            _ => {
                                return Err(ProblemError::UnknownPredicate {
                                    file: file.to_string(),
                                    line: reader.line_no,
                                    name: fluent.to_string(),
                                })
                            }
                        }
                    }
                    "visible" => {
                        let from = reader.indexed_arg(name, counts.waypoints)?;
                        let to = reader.indexed_arg(name, counts.waypoints)?;
                        waypoints[from].visible |= 1 << to;
                    }
                    "at_soil_sample" => {
                        let waypoint = reader.indexed_arg(name, counts.waypoints)?;
                        state.waypoints[waypoint].has_soil_sample = true;
                    }
                    "at_rock_sample" => {
                        let waypoint = reader.indexed_arg(name, counts.waypoints)?;
                        state.waypoints[waypoint].has_rock_sample = true;
                    }
                    "in_sun" => {
                        let waypoint = reader.indexed_arg(name, counts.waypoints)?;
                        waypoints[waypoint].in_sun = true;
                    }
                    "at_lander" => {
                        let _lander = reader.arg(name)?;
                        lander_position = reader.indexed_arg(name, counts.waypoints)?;
                    }
                    "channel_free" => {
                        channel_free = true;
                    }
                    "in" => {
                        let rover = reader.indexed_arg(name, counts.rovers)?;
                        state.rovers[rover].position =
                            reader.indexed_arg(name, counts.waypoints)?;
                    }
                    "available" => {
                        let rover = reader.indexed_arg(name, counts.rovers)?;
                        rovers[rover].available = true;
                    }
                    "can_traverse" => {
                        let rover = reader.indexed_arg(name, counts.rovers)?;
                        let from = reader.indexed_arg(name, counts.waypoints)?;
                        let to = reader.indexed_arg(name, counts.waypoints)?;
                        rovers[rover].can_traverse[from] |= 1 << to;
                    }
                    "equipped_for_soil_analysis" => {
                        let rover = reader.indexed_arg(name, counts.rovers)?;
                        rovers[rover].equipped_soil = true;
                    }
                    "equipped_for_rock_analysis" => {
                        let rover = reader.indexed_arg(name, counts.rovers)?;
                        rovers[rover].equipped_rock = true;
                    }
                    "equipped_for_imaging" => {
                        let rover = reader.indexed_arg(name, counts.rovers)?;
                        rovers[rover].equipped_imaging = true;
                    }
                    "empty" => {
                        let store = reader.indexed_arg(name, counts.stores)?;
                        state.store_full[store] = false;
                    }
                    "store_of" => {
                        let store = reader.indexed_arg(name, counts.stores)?;
                        let rover = reader.indexed_arg(name, counts.rovers)?;
                        if store_owners[store].is_some_and(|owner| owner != rover) {
                            return Err(ProblemError::DuplicateStoreOwner {
                                file: file.to_string(),
                                line: reader.line_no,
                                store,
                            });
                        }
                        store_owners[store] = Some(rover);
                    }
                    "calibration_target" => {
                        let camera = reader.indexed_arg(name, counts.cameras)?;
                        let objective = reader.indexed_arg(name, counts.objectives)?;
                        cameras[camera].calibration_targets |= 1 << objective;
                    }
                    "on_board" => {
                        let camera = reader.indexed_arg(name, counts.cameras)?;
                        cameras[camera].rover = reader.indexed_arg(name, counts.rovers)?;
                    }
                    "calibrated" => {
                        let camera = reader.indexed_arg(name, counts.cameras)?;
                        state.calibrated[camera] = true;
                    }
                    "supports" => {
                        let camera = reader.indexed_arg(name, counts.cameras)?;
                        let mode = reader.mode_arg(name)?;
                        cameras[camera].supported_modes |= 1 << mode.index();
                    }
                    "visible_from" => {
                        let objective = reader.indexed_arg(name, counts.objectives)?;
                        let waypoint = reader.indexed_arg(name, counts.waypoints)?;
                        objectives[objective].visible_from |= 1 << waypoint;
                    }
                    _ => {
                        return Err(ProblemError::UnknownPredicate {
                            file: file.to_string(),
                            line: reader.line_no,
                            name: name.to_string(),
                        })
                    }
                },
                Section::Goal => match name {
                    "and" => {}
                    "communicated_soil_data" => {
                        let waypoint = reader.indexed_arg(name, counts.waypoints)?;
                        goal.add_soil(waypoint);
                    }
                    "communicated_rock_data" => {
                        let waypoint = reader.indexed_arg(name, counts.waypoints)?;
                        goal.add_rock(waypoint);
                    }
                    "communicated_image_data" => {
                        let objective = reader.indexed_arg(name, counts.objectives)?;
                        let mode = reader.mode_arg(name)?;
                        goal.add_image(objective, mode);
                    }
                    _ => {
                        return Err(ProblemError::UnknownPredicate {
                            file: file.to_string(),
                            line: reader.line_no,
                            name: name.to_string(),
                        })
                    }
                },
            }
        }
    }

    let stores = store_owners
        .into_iter()
        .map(|owner| StoreInfo {
            rover: owner.unwrap_or(0),
        })
        .collect();

    Ok(Task {
        rovers,
        waypoints,
        cameras,
        stores,
        objectives,
        lander_position,
        channel_free,
        goal,
        initial_state: state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn parses_the_navigate_sample_fixture() {
        let task = parse_problem("test", NAVIGATE_SAMPLE_PROBLEM_TEXT).unwrap();
        assert_eq!(task.num_rovers(), 1);
        assert_eq!(task.num_waypoints(), 3);
        assert_eq!(task.num_stores(), 1);
        assert_eq!(task.lander_position, 2);
        assert!(task.channel_free);
        assert!(task.rovers[0].available);
        assert!(task.rovers[0].equipped_soil);
        assert_eq!(task.rovers[0].can_traverse[0], 1 << 1);
        assert_eq!(task.initial_state.rovers[0].energy, 20);
        assert!(task.initial_state.waypoints[1].has_soil_sample);
        assert!(task.goal.wants_soil(1));
        assert!(!task.goal.wants_rock(1));
    }

    #[test]
    fn parses_camera_and_image_goal() {
        let task = parse_problem("test", IMAGE_PROBLEM_TEXT).unwrap();
        assert_eq!(task.num_cameras(), 1);
        assert_eq!(task.cameras[0].rover, 0);
        assert_eq!(task.cameras[0].calibration_targets, 1 << 0);
        assert_eq!(task.cameras[0].supported_modes, 1 << Mode::HighRes.index());
        assert_eq!(task.objectives[0].visible_from, 1 << 1);
        assert!(task.goal.wants_image(0, Mode::HighRes));
        assert!(!task.goal.wants_image(0, Mode::Colour));
    }

    #[test]
    fn unknown_init_predicate_is_an_error_with_its_line() {
        let text = "(:init\n(launches rover0)\n)";
        match parse_problem("bad", text) {
            Err(ProblemError::UnknownPredicate { line, name, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(name, "launches");
            }
            other => panic!("expected UnknownPredicate, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_object_is_an_error() {
        let text = "(:objects rover0 - rover waypoint0 - waypoint)\n(:init\n(in rover0 waypoint5)\n)";
        assert!(matches!(
            parse_problem("bad", text),
            Err(ProblemError::ObjectIndexOutOfRange { line: 3, .. })
        ));
    }

    #[test]
    fn second_store_owner_is_rejected() {
        let text = "(:objects rover0 rover1 - rover waypoint0 - waypoint store0 - store)\n\
                    (:init\n(store_of store0 rover0)\n(store_of store0 rover1)\n)";
        assert!(matches!(
            parse_problem("bad", text),
            Err(ProblemError::DuplicateStoreOwner { line: 4, store: 0, .. })
        ));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let text = "(:objects rover0 - rover waypoint0 - waypoint camera0 - camera)\n\
                    (:init\n(supports camera0 sepia)\n)";
        assert!(matches!(
            parse_problem("bad", text),
            Err(ProblemError::UnknownMode { line: 3, .. })
        ));
    }

    #[test]
    fn goal_atoms_may_share_a_line_with_the_marker() {
        let text = "(:objects rover0 - rover waypoint0 - waypoint)\n\
                    (:goal (and (communicated_soil_data waypoint0)))";
        let task = parse_problem("test", text).unwrap();
        assert!(task.goal.wants_soil(0));
    }

    #[test]
    fn too_many_waypoints_is_rejected() {
        let names: Vec<String> = (0..31).map(|i| format!("waypoint{i}")).collect();
        let text = format!("(:objects rover0 - rover {} - waypoint)", names.join(" "));
        assert!(matches!(
            parse_problem("bad", &text),
            Err(ProblemError::CapacityExceeded {
                kind: "waypoint",
                count: 31,
                ..
            })
        ));
    }
}
