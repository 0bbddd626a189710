// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Closed vocabularies for CSL variables (spec.md §3, "Item (external)").
//!
//! Non-exhaustive: representative of the CSL 1.0.1 variable list rather
//! than a full transcription, since the variable *names* are an external
//! (item data) concern and the core only needs enough of them to exercise
//! every rendering element and edge case.

use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// Plain text/string variables (may also be requested in a `-short` form).
#[derive(Debug, Eq, Copy, Clone, PartialEq, Hash, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Variable {
    Abstract,
    Annote,
    Archive,
    ArchiveLocation,
    Authority,
    CallNumber,
    CollectionTitle,
    ContainerTitle,
    Dimensions,
    Doi,
    Genre,
    Isbn,
    Issn,
    Jurisdiction,
    Keyword,
    Language,
    Medium,
    Note,
    OriginalPublisher,
    OriginalPublisherPlace,
    OriginalTitle,
    PartTitle,
    Publisher,
    PublisherPlace,
    References,
    ReviewedTitle,
    Scale,
    Source,
    Status,
    Title,
    Url,
    Version,
    YearSuffix,
}

/// Variables holding a name list.
#[derive(Debug, Eq, Copy, Clone, PartialEq, Hash, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum NameVariable {
    Author,
    CollectionEditor,
    Composer,
    ContainerAuthor,
    Director,
    Editor,
    EditorialDirector,
    Illustrator,
    Interviewer,
    OriginalAuthor,
    Recipient,
    ReviewedAuthor,
    Translator,
}

/// Variables holding a date (possibly a range).
#[derive(Debug, Eq, Copy, Clone, PartialEq, Hash, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum DateVariable {
    Accessed,
    Container,
    EventDate,
    Issued,
    OriginalDate,
    Submitted,
}

/// Variables that should be coerced to a [`crate::NumberVar`] where possible
/// (spec.md §4.3, `get_as_number`).
#[derive(Debug, Eq, Copy, Clone, PartialEq, Hash, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum NumberVariable {
    ChapterNumber,
    CitationNumber,
    CollectionNumber,
    Edition,
    Issue,
    Locator,
    Number,
    NumberOfPages,
    NumberOfVolumes,
    Page,
    PageFirst,
    Volume,
}

/// A number variable may also be referenced via a plain `<text variable>`
/// (spec.md §4.6, "Text by variable"); `StandardVariable` captures that.
#[derive(Debug, Eq, Copy, Clone, PartialEq, Hash)]
pub enum StandardVariable {
    Ordinary(Variable),
    Number(NumberVariable),
}

impl From<StandardVariable> for AnyVariable {
    fn from(sv: StandardVariable) -> Self {
        match sv {
            StandardVariable::Ordinary(v) => AnyVariable::Ordinary(v),
            StandardVariable::Number(n) => AnyVariable::Number(n),
        }
    }
}

/// Any of the four variable kinds, keyed by their external name.
#[derive(Debug, Eq, Copy, Clone, PartialEq, Hash)]
pub enum AnyVariable {
    Ordinary(Variable),
    Name(NameVariable),
    Date(DateVariable),
    Number(NumberVariable),
}

impl FromStr for AnyVariable {
    type Err = strum::ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(v) = Variable::from_str(s) {
            return Ok(AnyVariable::Ordinary(v));
        }
        if let Ok(v) = NameVariable::from_str(s) {
            return Ok(AnyVariable::Name(v));
        }
        if let Ok(v) = DateVariable::from_str(s) {
            return Ok(AnyVariable::Date(v));
        }
        if let Ok(v) = NumberVariable::from_str(s) {
            return Ok(AnyVariable::Number(v));
        }
        Err(strum::ParseError::VariantNotFound)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_each_kind() {
        assert_eq!(
            AnyVariable::from_str("title").unwrap(),
            AnyVariable::Ordinary(Variable::Title)
        );
        assert_eq!(
            AnyVariable::from_str("author").unwrap(),
            AnyVariable::Name(NameVariable::Author)
        );
        assert_eq!(
            AnyVariable::from_str("issued").unwrap(),
            AnyVariable::Date(DateVariable::Issued)
        );
        assert_eq!(
            AnyVariable::from_str("page").unwrap(),
            AnyVariable::Number(NumberVariable::Page)
        );
        assert!(AnyVariable::from_str("not-a-variable").is_err());
    }
}
