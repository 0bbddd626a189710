// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `DateVar` (spec.md §3 "DateVar", §4.8 Date Renderer). Grounded on
//! `crates/io/src/date.rs`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// `season-01`..`season-04`, the locale term bucket (spec.md §4.8).
    pub fn term_bucket(self) -> u8 {
        match self {
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Autumn => 3,
            Season::Winter => 4,
        }
    }
}

/// How much of a date is actually known (spec.md §4.8: "Filter parts by
/// the date's `precision`").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePrecision {
    Year,
    YearMonth,
    YearMonthDay,
}

/// One endpoint of a date or date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateParts {
    pub year: i32,
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub season: Option<Season>,
    /// CSL-JSON `circa`: the item data's own claim that this date is
    /// approximate (spec.md §4.5 `is-uncertain-date`).
    pub circa: bool,
}

impl DateParts {
    pub fn year_only(year: i32) -> Self {
        DateParts {
            year,
            ..Default::default()
        }
    }

    /// Lexicographic ordering key used by spec.md §3 invariant 4 and by
    /// range-collapsing to find the highest differing part.
    fn sort_tuple(&self) -> (i32, i32, i32) {
        (
            self.year,
            self.month.map(|m| m as i32).unwrap_or(0),
            self.day.map(|d| d as i32).unwrap_or(0),
        )
    }
}

impl PartialOrd for DateParts {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.sort_tuple().cmp(&other.sort_tuple()))
    }
}
impl Ord for DateParts {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_tuple().cmp(&other.sort_tuple())
    }
}

/// A date or date-range item-data value (spec.md §3 "DateVar"). The
/// structured form's `precision` is derived, not stored: it's whatever
/// the finest populated part is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateOrRange {
    /// Free-text date the item data couldn't structure.
    Literal(String),
    Single(DateParts),
    Range(DateParts, DateParts),
}

impl DateOrRange {
    pub fn precision(&self) -> Option<DatePrecision> {
        let finest = |d: &DateParts| {
            if d.day.is_some() {
                DatePrecision::YearMonthDay
            } else if d.month.is_some() || d.season.is_some() {
                DatePrecision::YearMonth
            } else {
                DatePrecision::Year
            }
        };
        match self {
            DateOrRange::Literal(_) => None,
            DateOrRange::Single(d) => Some(finest(d)),
            DateOrRange::Range(from, to) => {
                let (a, b) = (finest(from), finest(to));
                Some(if a >= b { a } else { b })
            }
        }
    }

    /// spec.md §3 invariant 4: `from <= to` lexicographically; violated
    /// ranges fall back to `Expanded` page-range-style behavior upstream,
    /// in the number renderer, not here.
    pub fn is_well_ordered(&self) -> bool {
        match self {
            DateOrRange::Range(from, to) => from <= to,
            _ => true,
        }
    }

    /// spec.md §4.5 `is-uncertain-date`: true if the item data marked
    /// either endpoint `circa`. A literal date is never uncertain in
    /// this sense -- it carries no structured `circa` flag.
    pub fn is_uncertain_date(&self) -> bool {
        match self {
            DateOrRange::Literal(_) => false,
            DateOrRange::Single(d) => d.circa,
            DateOrRange::Range(from, to) => from.circa || to.circa,
        }
    }
}

impl std::cmp::PartialOrd for DatePrecision {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl std::cmp::Ord for DatePrecision {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        fn rank(p: &DatePrecision) -> u8 {
            match p {
                DatePrecision::Year => 0,
                DatePrecision::YearMonth => 1,
                DatePrecision::YearMonthDay => 2,
            }
        }
        rank(self).cmp(&rank(other))
    }
}
