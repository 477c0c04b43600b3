use crate::search::{Goal, State};
use crate::parsers::problem::{parse_problem, ProblemError};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

pub const MAX_ROVERS: usize = 10;
pub const MAX_WAYPOINTS: usize = 30;
pub const MAX_CAMERAS: usize = 10;
pub const MAX_STORES: usize = 10;
pub const MAX_OBJECTIVES: usize = 10;
pub const MAX_MODES: usize = 3;

/// Static per-rover data.
#[derive(Debug, Clone)]
pub struct RoverInfo {
    pub available: bool,
    pub equipped_soil: bool,
    pub equipped_rock: bool,
    pub equipped_imaging: bool,
    /// Indexed by origin waypoint; bitmap over destination waypoints.
    pub can_traverse: Vec<u32>,
}

/// Static per-waypoint data.
#[derive(Debug, Clone)]
pub struct WaypointInfo {
    pub in_sun: bool,
    /// Bitmap over waypoints visible from here.
    pub visible: u32,
}

/// Static per-camera data.
#[derive(Debug, Clone)]
pub struct CameraInfo {
    /// Owning rover; fixed at parse time.
    pub rover: usize,
    /// Bitmap over objectives.
    pub calibration_targets: u32,
    /// Bitmap over modes.
    pub supported_modes: u32,
}

/// Static per-store data.
#[derive(Debug, Clone)]
pub struct StoreInfo {
    /// Owning rover; only this rover may fill or empty the store.
    pub rover: usize,
}

/// Static per-objective data.
#[derive(Debug, Clone)]
pub struct ObjectiveInfo {
    /// Bitmap over waypoints the objective can be observed from.
    pub visible_from: u32,
}

/// Everything about a problem instance that never changes during search: the
/// object universe, the static maps, the goal and the initial state.
#[derive(Debug, Clone)]
pub struct Task {
    pub rovers: Vec<RoverInfo>,
    pub waypoints: Vec<WaypointInfo>,
    pub cameras: Vec<CameraInfo>,
    pub stores: Vec<StoreInfo>,
    pub objectives: Vec<ObjectiveInfo>,
    pub lander_position: usize,
    pub channel_free: bool,
    pub goal: Goal,
    pub initial_state: State,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("problem has {count} {kind}s, the planner supports at most {max}")]
    TooManyObjects {
        kind: &'static str,
        count: usize,
        max: usize,
    },
    #[error("problem declares no {kind}s")]
    NoObjects { kind: &'static str },
    #[error("rover{rover} starts at waypoint{position}, which does not exist")]
    RoverPositionOutOfRange { rover: usize, position: usize },
    #[error("rover{rover} starts with negative energy")]
    NegativeEnergy { rover: usize },
    #[error("lander position waypoint{position} does not exist")]
    LanderPositionOutOfRange { position: usize },
    #[error(
        "rover{rover} may traverse waypoint{from} -> waypoint{to}, but waypoint{to} is not \
         visible from waypoint{from}"
    )]
    TraverseWithoutVisibility {
        rover: usize,
        from: usize,
        to: usize,
    },
    #[error("camera{camera} is mounted on rover{rover}, which does not exist")]
    CameraRoverOutOfRange { camera: usize, rover: usize },
    #[error("camera{camera} has no calibration target")]
    CameraWithoutCalibrationTarget { camera: usize },
    #[error("camera{camera} supports no imaging mode")]
    CameraWithoutMode { camera: usize },
    #[error("store{store} belongs to rover{rover}, which does not exist")]
    StoreRoverOutOfRange { store: usize, rover: usize },
    #[error("objective{objective} is not visible from any waypoint")]
    ObjectiveNotVisible { objective: usize },
}

impl Task {
    pub fn from_path(path: &Path) -> Result<Self, ProblemError> {
        let text = std::fs::read_to_string(path).map_err(|source| ProblemError::Io {
            file: path.display().to_string(),
            source,
        })?;
        parse_problem(&path.display().to_string(), &text)
    }

    pub fn from_text(text: &str) -> Result<Self, ProblemError> {
        parse_problem("<text>", text)
    }

    pub fn num_rovers(&self) -> usize {
        self.rovers.len()
    }

    pub fn num_waypoints(&self) -> usize {
        self.waypoints.len()
    }

    pub fn num_cameras(&self) -> usize {
        self.cameras.len()
    }

    pub fn num_stores(&self) -> usize {
        self.stores.len()
    }

    pub fn num_objectives(&self) -> usize {
        self.objectives.len()
    }

    /// Post-parse consistency checks. Fails closed on the first violation.
    /// Store double-ownership is caught during parsing, where both claimants
    /// are still known; see [`parse_problem`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        Self::check_count("rover", self.num_rovers(), MAX_ROVERS, true)?;
        Self::check_count("waypoint", self.num_waypoints(), MAX_WAYPOINTS, true)?;
        Self::check_count("camera", self.num_cameras(), MAX_CAMERAS, false)?;
        Self::check_count("store", self.num_stores(), MAX_STORES, false)?;
        Self::check_count("objective", self.num_objectives(), MAX_OBJECTIVES, false)?;

        for (rover, rs) in self.initial_state.rovers.iter().enumerate() {
            if rs.position >= self.num_waypoints() {
                return Err(ValidationError::RoverPositionOutOfRange {
                    rover,
                    position: rs.position,
                });
            }
            if rs.energy < 0 {
                return Err(ValidationError::NegativeEnergy { rover });
            }
        }

        if self.lander_position >= self.num_waypoints() {
            return Err(ValidationError::LanderPositionOutOfRange {
                position: self.lander_position,
            });
        }

        for (rover, info) in self.rovers.iter().enumerate() {
            for (from, &targets) in info.can_traverse.iter().enumerate() {
                let invisible = targets & !self.waypoints[from].visible;
                if invisible != 0 {
                    return Err(ValidationError::TraverseWithoutVisibility {
                        rover,
                        from,
                        to: invisible.trailing_zeros() as usize,
                    });
                }
            }
        }

        for (camera, info) in self.cameras.iter().enumerate() {
            if info.rover >= self.num_rovers() {
                return Err(ValidationError::CameraRoverOutOfRange {
                    camera,
                    rover: info.rover,
                });
            }
            if info.calibration_targets == 0 {
                return Err(ValidationError::CameraWithoutCalibrationTarget { camera });
            }
            if info.supported_modes == 0 {
                return Err(ValidationError::CameraWithoutMode { camera });
            }
        }

        for (store, info) in self.stores.iter().enumerate() {
            if info.rover >= self.num_rovers() {
                return Err(ValidationError::StoreRoverOutOfRange {
                    store,
                    rover: info.rover,
                });
            }
        }

        for (objective, info) in self.objectives.iter().enumerate() {
            if info.visible_from == 0 {
                return Err(ValidationError::ObjectiveNotVisible { objective });
            }
        }

        if self.goal.is_empty() {
            warn!("problem declares no goals; the empty plan is a solution");
        }

        Ok(())
    }

    fn check_count(
        kind: &'static str,
        count: usize,
        max: usize,
        required: bool,
    ) -> Result<(), ValidationError> {
        if required && count == 0 {
            return Err(ValidationError::NoObjects { kind });
        }
        if count > max {
            return Err(ValidationError::TooManyObjects { kind, count, max });
        }
        Ok(())
    }
}
