//! Reader for solution files, used by the verifier.
//!
//! Only lines opening with `(` are actions; the two header lines, blanks and
//! the `h=`/`f=` annotations after the closing parenthesis are skipped.

use crate::parsers::{object_index, tokenize};
use crate::search::{Action, Mode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanParseError {
    #[error("{file}: cannot read solution file: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{file}:{line}: unknown action `{name}`")]
    UnknownAction {
        file: String,
        line: usize,
        name: String,
    },
    #[error("{file}:{line}: action `{name}` is missing parameters")]
    MissingParameters {
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
    #[error("{file}:{line}: unknown imaging mode `{name}`")]
    UnknownMode {
        file: String,
        line: usize,
        name: String,
    },
}

/// One action of a solution file, with the line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedStep {
    pub line: usize,
    pub action: Action,
}

struct StepReader<'a> {
    file: &'a str,
    line_no: usize,
    name: &'a str,
    params: std::slice::Iter<'a, &'a str>,
}

impl<'a> StepReader<'a> {
    fn param(&mut self) -> Result<&'a str, PlanParseError> {
        self.params
            .next()
            .copied()
            .filter(|&token| token != ")")
            .ok_or_else(|| PlanParseError::MissingParameters {
                file: self.file.to_string(),
                line: self.line_no,
                name: self.name.to_string(),
            })
    }

    fn indexed(&mut self) -> Result<usize, PlanParseError> {
        let name = self.param()?;
        object_index(name).ok_or_else(|| PlanParseError::MissingObjectIndex {
            file: self.file.to_string(),
            line: self.line_no,
            name: name.to_string(),
        })
    }

    fn mode(&mut self) -> Result<Mode, PlanParseError> {
        let name = self.param()?;
        Mode::from_name(name).ok_or_else(|| PlanParseError::UnknownMode {
            file: self.file.to_string(),
            line: self.line_no,
            name: name.to_string(),
        })
    }
}

/// Parses the action lines of a solution file.
pub fn parse_solution(file: &str, text: &str) -> Result<Vec<ParsedStep>, PlanParseError> {
    let mut steps = vec![];
    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let tokens = tokenize(line);
        let &[first, name, ref params @ ..] = tokens.as_slice() else {
            continue;
        };
        if first != "(" {
            continue;
        }
        let mut reader = StepReader {
            file,
            line_no,
            name,
            params: params.iter(),
        };
        let action = match name {
            "navigate" => Action::Navigate {
                rover: reader.indexed()?,
                from: reader.indexed()?,
                to: reader.indexed()?,
            },
            "recharge" => Action::Recharge {
                rover: reader.indexed()?,
                waypoint: reader.indexed()?,
            },
            "sample_soil" => Action::SampleSoil {
                rover: reader.indexed()?,
                store: reader.indexed()?,
                waypoint: reader.indexed()?,
            },
            "sample_rock" => Action::SampleRock {
                rover: reader.indexed()?,
                store: reader.indexed()?,
                waypoint: reader.indexed()?,
            },
            "drop" => Action::Drop {
                rover: reader.indexed()?,
                store: reader.indexed()?,
            },
            "calibrate" => Action::Calibrate {
                rover: reader.indexed()?,
                camera: reader.indexed()?,
                objective: reader.indexed()?,
                waypoint: reader.indexed()?,
            },
            "take_image" => Action::TakeImage {
                rover: reader.indexed()?,
                waypoint: reader.indexed()?,
                objective: reader.indexed()?,
                camera: reader.indexed()?,
                mode: reader.mode()?,
            },
            "communicate_soil_data" => Action::CommunicateSoil {
                rover: reader.indexed()?,
                sample: reader.indexed()?,
                location: reader.indexed()?,
                lander: reader.indexed()?,
            },
            "communicate_rock_data" => Action::CommunicateRock {
                rover: reader.indexed()?,
                sample: reader.indexed()?,
                location: reader.indexed()?,
                lander: reader.indexed()?,
            },
            "communicate_image_data" => Action::CommunicateImage {
                rover: reader.indexed()?,
                objective: reader.indexed()?,
                mode: reader.mode()?,
                location: reader.indexed()?,
                lander: reader.indexed()?,
            },
            _ => {
                return Err(PlanParseError::UnknownAction {
                    file: file.to_string(),
                    line: line_no,
                    name: name.to_string(),
                })
            }
        };
        steps.push(ParsedStep {
            line: line_no,
            action,
        });
    }
    Ok(steps)
}
