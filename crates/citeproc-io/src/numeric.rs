// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `NumberVar` and its string parsing (spec.md §3 "NumberVar", §4.3
//! `get_as_number`). Grounded on `crates/io/src/numeric.rs`'s use of
//! `nom` to split a numeric item-data string into a range.

use nom::{
    branch::alt,
    character::complete::{char as nom_char, digit1, multispace0},
    combinator::{all_consuming, map_res},
    sequence::delimited,
    IResult,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericSeparator {
    Hyphen,
    Ampersand,
    Comma,
}

impl NumericSeparator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(NumericSeparator::Hyphen),
            '&' => Some(NumericSeparator::Ampersand),
            ',' => Some(NumericSeparator::Comma),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NumericSeparator::Hyphen => '-',
            NumericSeparator::Ampersand => '&',
            NumericSeparator::Comma => ',',
        }
    }
}

/// A numeric item-data value, possibly a range (spec.md §3 "NumberVar").
/// `min == max` represents a single number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberVar {
    pub min: u32,
    pub max: u32,
    pub separator: NumericSeparator,
}

impl NumberVar {
    pub fn single(n: u32) -> Self {
        NumberVar {
            min: n,
            max: n,
            separator: NumericSeparator::Hyphen,
        }
    }

    pub fn is_single(&self) -> bool {
        self.min == self.max
    }
}

fn number(inp: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>())(inp)
}

fn separator(inp: &str) -> IResult<&str, NumericSeparator> {
    map_res(alt((nom_char('-'), nom_char('&'), nom_char(','))), |c| {
        NumericSeparator::from_char(c).ok_or(())
    })(inp)
}

fn range(inp: &str) -> IResult<&str, NumberVar> {
    let (rest, min) = number(inp)?;
    let (rest, sep) = delimited(multispace0, separator, multispace0)(rest)?;
    let (rest, max) = number(rest)?;
    Ok((
        rest,
        NumberVar {
            min,
            max,
            separator: sep,
        },
    ))
}

/// Parses a numeric item-data string into a [`NumberVar`]: either a bare
/// integer, or `<min><sep><max>` with `sep` one of `-`, `&`, `,`
/// (optionally surrounded by whitespace). Returns `None` for anything
/// else (non-numeric content), matching spec.md §4.3: "`get_as_number`
/// parses a string variable into a `NumberVar` when the content is
/// numeric with an optional single separator."
pub fn parse_number_var(s: &str) -> Option<NumberVar> {
    let trimmed = s.trim();
    if let Ok((_, n)) = all_consuming(number)(trimmed) {
        return Some(NumberVar::single(n));
    }
    if let Ok((_, nv)) = all_consuming(range)(trimmed) {
        return Some(nv);
    }
    None
}
