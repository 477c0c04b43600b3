//! Tokenization shared by the problem-file and solution-file readers.
//!
//! The Rover formats are line-oriented: every atom sits on one line, and
//! section markers (`:objects`, `:init`, `:goal`) introduce what follows.
//! Lines are tokenized with nom; parentheses are tokens of their own so the
//! readers can consume atoms by predicate arity without balancing brackets
//! across lines.

pub mod plan;
pub mod problem;

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::multispace0,
    multi::many0,
    sequence::preceded,
    IResult,
};

fn token(input: &str) -> IResult<&str, &str> {
    alt((tag("("), tag(")"), is_not(" \t\r\n()")))(input)
}

/// Splits one line into tokens. `;` starts a comment running to end of line.
pub fn tokenize(line: &str) -> Vec<&str> {
    let line = line.split(';').next().unwrap_or("");
    many0(preceded(multispace0, token))(line)
        .map(|(_, tokens)| tokens)
        .unwrap_or_default()
}

/// Extracts the object index from a name like `waypoint7` or `rover12`: the
/// first run of digits, read as a decimal number.
pub fn object_index(name: &str) -> Option<usize> {
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let digits: String = name[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parens_are_their_own_tokens() {
        assert_eq!(
            tokenize("(visible waypoint0 waypoint1)"),
            vec!["(", "visible", "waypoint0", "waypoint1", ")"]
        );
    }

    #[test]
    fn nested_fluents_tokenize_flat() {
        assert_eq!(
            tokenize("(= (energy rover0) 50)"),
            vec!["(", "=", "(", "energy", "rover0", ")", "50", ")"]
        );
    }

    #[test]
    fn comments_are_stripped() {
        assert_eq!(tokenize("(in_sun waypoint0) ; charging spot"), vec![
            "(", "in_sun", "waypoint0", ")"
        ]);
        assert!(tokenize("; full-line comment").is_empty());
    }

    #[test]
    fn object_index_reads_the_first_digit_run() {
        assert_eq!(object_index("waypoint7"), Some(7));
        assert_eq!(object_index("rover12"), Some(12));
        assert_eq!(object_index("general"), None);
    }
}
