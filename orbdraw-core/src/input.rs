//! Parser for plain-text position files
//!
//! One position per line, as `x, y, z` or `x y z`. Blank lines and lines starting with
//! `#` are skipped.
use nalgebra::Point3;
use nom::{
    branch::alt,
    character::complete::{char, space0, space1},
    combinator::{all_consuming, value},
    number::complete::double,
    sequence::{delimited, tuple},
    IResult,
};
use std::io::Read;

use crate::error::{Error, Result};

fn separator(input: &str) -> IResult<&str, ()> {
    alt((value((), delimited(space0, char(','), space0)), value((), space1)))(input)
}

fn position(input: &str) -> IResult<&str, Point3<f64>> {
    let (input, (_, x, _, y, _, z, _)) =
        tuple((space0, double, separator, double, separator, double, space0))(input)?;
    Ok((input, Point3::new(x, y, z)))
}

/// Parse every position in `text`, in file order
pub fn parse_positions(text: &str) -> Result<Vec<Point3<f64>>> {
    let mut positions = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match all_consuming(position)(trimmed) {
            Ok((_, p)) if p.coords.iter().all(|c| c.is_finite()) => positions.push(p),
            Ok(_) => {
                return Err(Error::Parse {
                    line: index + 1,
                    message: format!("non-finite coordinate in `{}`", trimmed),
                })
            }
            Err(e) => {
                return Err(Error::Parse {
                    line: index + 1,
                    message: format!("expected `x, y, z`, found `{}` ({:?})", trimmed, e),
                })
            }
        }
    }
    Ok(positions)
}

/// Read and parse a whole positions stream
pub fn read_positions<R: Read>(mut reader: R) -> Result<Vec<Point3<f64>>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_positions(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_and_space_separated() {
        let text = "1.0, 2.0, 3.0\n-4.5 5e3\t-6\n";
        let positions = parse_positions(text).unwrap();
        assert_eq!(
            positions,
            vec![Point3::new(1.0, 2.0, 3.0), Point3::new(-4.5, 5000.0, -6.0)]
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let text = "# x, y, z in km\n\n  6678.0,0.0,0.0  \n# end\n";
        let positions = parse_positions(text).unwrap();
        assert_eq!(positions, vec![Point3::new(6678.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let text = "1, 2, 3\n\n4, five, 6\n";
        match parse_positions(text) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let text = "1 0 0\nnan 0 0\ninf 1 0\n0 2 3\n";
        match parse_positions(text) {
            Err(Error::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("non-finite"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(matches!(
            parse_positions("0, 0, 0\n1, -infinity, 2\n"),
            Err(Error::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_trailing_values_rejected() {
        assert!(parse_positions("1 2 3 4\n").is_err());
    }

    #[test]
    fn test_read_positions() {
        let positions = read_positions("0 0 1\n0 1 0\n".as_bytes()).unwrap();
        assert_eq!(positions.len(), 2);
    }
}
