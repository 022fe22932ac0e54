//! Parser for the line-oriented treasure map configuration.
//!
//! ```text
//! # comment
//! C - width - height
//! M - column - row
//! T - column - row - amount
//! A - name - column - row - orientation - movements
//! ```
//!
//! Spaces are insignificant and blank lines are skipped.

use thiserror::Error;
use treasure_hunt_core::{AdventurerSpec, CellCoord, GridSpec, Movement, Orientation, TreasureSpec};

const FIELD_DELIMITER: char = '-';
const COMMENT_PREFIX: char = '#';

/// Map and adventurers described by a configuration file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Configuration {
    /// Playing field description.
    pub(crate) grid: GridSpec,
    /// Adventurers in declaration order, which is also the turn order.
    pub(crate) adventurers: Vec<AdventurerSpec>,
}

/// Errors that can occur while reading a configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum ConfigurationError {
    /// A line started with a character other than `#`, `C`, `M`, `T` or `A`.
    #[error("line {line}: a line cannot start with '{tag}', expected one of #, C, M, T or A")]
    UnknownTag {
        /// 1-based line number.
        line: usize,
        /// Offending leading character.
        tag: char,
    },
    /// A line carried the wrong number of `-` separated fields.
    #[error("line {line}: {kind} line must contain {expected} parts separated with '-', found {found}")]
    FieldCount {
        /// 1-based line number.
        line: usize,
        /// Human readable line kind.
        kind: &'static str,
        /// Number of fields the line kind requires.
        expected: usize,
        /// Number of fields found.
        found: usize,
    },
    /// A numeric field could not be parsed.
    #[error("line {line}: '{value}' is not a non-negative integer")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// Offending field.
        value: String,
    },
    /// An orientation field was not one of the four compass letters.
    #[error("line {line}: adventurer orientation cannot be '{value}', it must be either N, S, E or W")]
    InvalidOrientation {
        /// 1-based line number.
        line: usize,
        /// Offending field.
        value: String,
    },
    /// A movement letter was not `A`, `G` or `D`.
    #[error("line {line}: adventurer movement cannot be '{letter}', it must be either A, D or G")]
    InvalidMovement {
        /// 1-based line number.
        line: usize,
        /// Offending letter.
        letter: char,
    },
    /// An adventurer line had an empty name field.
    #[error("line {line}: adventurer name must not be empty")]
    EmptyName {
        /// 1-based line number.
        line: usize,
    },
    /// The dimensions line appeared more than once.
    #[error("line {line}: map dimensions must be defined once")]
    DuplicateDimensions {
        /// 1-based line number of the repeated definition.
        line: usize,
    },
    /// No dimensions line was found.
    #[error("configuration must contain a map dimensions line")]
    MissingDimensions,
}

/// Parses a whole configuration document.
pub(crate) fn parse(text: &str) -> Result<Configuration, ConfigurationError> {
    let mut dimensions: Option<(u32, u32)> = None;
    let mut mountains = Vec::new();
    let mut treasures = Vec::new();
    let mut adventurers = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let Some(tag) = compact.chars().next() else {
            continue;
        };
        if tag == COMMENT_PREFIX {
            continue;
        }

        let fields: Vec<&str> = compact.split(FIELD_DELIMITER).collect();
        match tag {
            'C' => {
                if dimensions.is_some() {
                    return Err(ConfigurationError::DuplicateDimensions { line });
                }
                expect_fields(line, "map dimensions", &fields, 3)?;
                let width = parse_number(line, fields[1])?;
                let height = parse_number(line, fields[2])?;
                dimensions = Some((height, width));
            }
            'M' => {
                expect_fields(line, "mountain", &fields, 3)?;
                mountains.push(parse_cell(line, fields[1], fields[2])?);
            }
            'T' => {
                expect_fields(line, "treasure", &fields, 4)?;
                treasures.push(TreasureSpec {
                    cell: parse_cell(line, fields[1], fields[2])?,
                    amount: parse_number(line, fields[3])?,
                });
            }
            'A' => {
                expect_fields(line, "adventurer", &fields, 6)?;
                adventurers.push(parse_adventurer(line, &fields)?);
            }
            other => return Err(ConfigurationError::UnknownTag { line, tag: other }),
        }
    }

    let (height, width) = dimensions.ok_or(ConfigurationError::MissingDimensions)?;
    Ok(Configuration {
        grid: GridSpec {
            height,
            width,
            mountains,
            treasures,
        },
        adventurers,
    })
}

fn expect_fields(
    line: usize,
    kind: &'static str,
    fields: &[&str],
    expected: usize,
) -> Result<(), ConfigurationError> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(ConfigurationError::FieldCount {
            line,
            kind,
            expected,
            found: fields.len(),
        })
    }
}

fn parse_number(line: usize, value: &str) -> Result<u32, ConfigurationError> {
    value
        .parse::<u32>()
        .map_err(|_| ConfigurationError::InvalidNumber {
            line,
            value: value.to_owned(),
        })
}

// Files list the column before the row.
fn parse_cell(line: usize, column: &str, row: &str) -> Result<CellCoord, ConfigurationError> {
    let column = parse_number(line, column)?;
    let row = parse_number(line, row)?;
    Ok(CellCoord::new(row, column))
}

fn parse_adventurer(line: usize, fields: &[&str]) -> Result<AdventurerSpec, ConfigurationError> {
    let name = fields[1];
    if name.is_empty() {
        return Err(ConfigurationError::EmptyName { line });
    }
    let start = parse_cell(line, fields[2], fields[3])?;

    let mut letters = fields[4].chars();
    let orientation = match (letters.next(), letters.next()) {
        (Some(letter), None) => Orientation::from_letter(letter),
        _ => None,
    }
    .ok_or_else(|| ConfigurationError::InvalidOrientation {
        line,
        value: fields[4].to_owned(),
    })?;

    let movements = fields[5]
        .chars()
        .map(|letter| {
            Movement::from_letter(letter)
                .ok_or(ConfigurationError::InvalidMovement { line, letter })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AdventurerSpec::new(name, orientation, start, movements))
}
