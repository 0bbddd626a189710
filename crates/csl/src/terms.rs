// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Localized term vocabulary (spec.md §3 "Term", §4.2 Locale Provider).
//!
//! Simplified relative to a full `OrdinalTerm`/`OrdinalMatch`
//! cross-product (which would also track CSL-M `match="whole-number"`
//! locale quirks): ordinals here are keyed directly by their
//! `01..04`/`01..10` locale bucket, which is all spec.md §4.8's
//! day-ordinal and §4.2's `LongOrdinal` number format need.

use crate::NameVariable;
use strum_macros::{Display, EnumString};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Neuter
    }
}

/// `cs:text term=".."` / plural forms a term may be requested in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum TermForm {
    Long,
    Short,
    Symbol,
    Verb,
    VerbShort,
}

impl Default for TermForm {
    fn default() -> Self {
        TermForm::Long
    }
}

/// Closed, non-exhaustive set of fixed (non-numbered) term names this core
/// needs to look up. Role terms (the localized label for a name variable,
/// e.g. "editor"/"editors") are a separate variant since they key off
/// [`NameVariable`] rather than a fixed string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum FixedTerm {
    And,
    EtAl,
    Ibid,
    Page,
    PageRangeDelimiter,
    Bc,
    Ad,
    /// The merged role term for an `editor`+`translator` group that
    /// renders identically (spec.md §4.9 "Variable Grouping and
    /// Merging").
    EditorTranslator,
}

/// Any term this core may ask the locale provider for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TermName {
    Fixed(FixedTerm),
    Role(NameVariable),
    /// `month-01`..`month-12`
    Month(u8),
    /// `season-01`..`season-04`
    Season(u8),
    /// `ordinal-01`..`ordinal-04`, the last-two-digits bucket CSL uses for
    /// short ordinal suffixes ("1st", "2nd", "3rd", "4th"/"11th"/"12th"...).
    Ordinal(u8),
    /// `long-ordinal-01`..`long-ordinal-10`, spelled-out ordinals ("first").
    LongOrdinal(u8),
}

/// A term plus the requested format/plurality — the full lookup key for
/// [`crate::Locale::term`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TermSelector {
    pub name: TermName,
    pub form: TermForm,
    pub plural: bool,
}

impl TermSelector {
    pub fn new(name: TermName, form: TermForm, plural: bool) -> Self {
        TermSelector { name, form, plural }
    }
}

/// CSL's bucketing of `n % 100` into an ordinal-suffix term, per
/// <https://docs.citationstyles.org/en/stable/specification.html#appendix-vi-numbers>.
/// English: 1/21/31/... -> `ordinal-01` ("st"), 2/22/32 -> `ordinal-02`
/// ("nd"), 3/23/33 -> `ordinal-03` ("rd"), everything else -> `ordinal-04`
/// ("th"), with 11/12/13 (and their `x11`/`x12`/`x13` continuations)
/// special-cased to `ordinal-04` ("th") rather than following the
/// last-digit rule.
pub fn ordinal_bucket(n: u32) -> u8 {
    let last_two = n % 100;
    if (11..=13).contains(&last_two) {
        return 4;
    }
    match n % 10 {
        1 => 1,
        2 => 2,
        3 => 3,
        _ => 4,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ordinal_buckets() {
        assert_eq!(ordinal_bucket(1), 1);
        assert_eq!(ordinal_bucket(2), 2);
        assert_eq!(ordinal_bucket(3), 3);
        assert_eq!(ordinal_bucket(4), 4);
        assert_eq!(ordinal_bucket(11), 4);
        assert_eq!(ordinal_bucket(12), 4);
        assert_eq!(ordinal_bucket(13), 4);
        assert_eq!(ordinal_bucket(21), 1);
        assert_eq!(ordinal_bucket(22), 2);
        assert_eq!(ordinal_bucket(23), 3);
        assert_eq!(ordinal_bucket(101), 1);
        assert_eq!(ordinal_bucket(111), 4);
    }
}
