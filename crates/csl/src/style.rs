// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The compiled-style data model (spec.md §3 "Parameters", §4.1-§4.11).
//!
//! Grounded on `crates/csl/src/lib.rs` and `crates/csl/src/style/mod.rs`,
//! minus all `FromNode`/XML-attribute parsing: compiling a style is an
//! external concern (spec.md §1), so these are plain, directly
//! constructible data types. Anything that builds a [`Style`] (today:
//! test fixtures; eventually, an external compiler) populates this tree
//! however it likes.

use crate::variables::{AnyVariable, DateVariable, NameVariable, NumberVariable, StandardVariable, Variable};
use std::collections::HashMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Italic,
    Oblique,
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontVariant {
    Normal,
    SmallCaps,
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
    Light,
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDecoration {
    None,
    Underline,
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Baseline,
    Sup,
    Sub,
}

/// Inherited formatting parameters (spec.md §3 "Parameters": formatting).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Formatting {
    pub font_style: Option<FontStyle>,
    pub font_variant: Option<FontVariant>,
    pub font_weight: Option<FontWeight>,
    pub text_decoration: Option<TextDecoration>,
    pub vertical_align: Option<VerticalAlign>,
}

impl Formatting {
    /// Child formatting overrides parent formatting field-by-field; an
    /// unset child field keeps the parent's value.
    pub fn inherit(&self, child: Formatting) -> Formatting {
        Formatting {
            font_style: child.font_style.or(self.font_style),
            font_variant: child.font_variant.or(self.font_variant),
            font_weight: child.font_weight.or(self.font_weight),
            text_decoration: child.text_decoration.or(self.text_decoration),
            vertical_align: child.vertical_align.or(self.vertical_align),
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCase {
    Lowercase,
    Uppercase,
    CapitalizeFirst,
    CapitalizeAll,
    Title,
    Sentence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericForm {
    Numeric,
    Ordinal,
    LongOrdinal,
    Roman,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRangeFormat {
    Chicago,
    Minimal,
    MinimalTwo,
    Expanded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameForm {
    Long,
    Short,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameAsSortOrder {
    None,
    First,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoteNonDroppingParticle {
    DisplayAndSort,
    SortOnly,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AndType {
    Text,
    Symbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterPrecedes {
    Always,
    Never,
    Contextual,
    AfterInvertedName,
}

/// `cs:names`/`cs:name` settings (spec.md §3 "Parameters": name settings).
#[derive(Debug, Clone, PartialEq)]
pub struct NameOptions {
    pub name_format: NameForm,
    pub name_as_sort_order: NameAsSortOrder,
    pub and: Option<AndType>,
    pub et_al_min: u32,
    pub et_al_use_first: u32,
    pub et_al_use_last: bool,
    pub delimiter_precedes_last: DelimiterPrecedes,
    pub delimiter_precedes_et_al: DelimiterPrecedes,
    pub initialize: bool,
    pub initialize_with: Option<String>,
    pub initialize_with_hyphen: bool,
    pub demote_non_dropping_particle: DemoteNonDroppingParticle,
    pub sort_separator: String,
    pub name_delimiter: String,
    pub names_delimiter: String,
    pub given_text_case: Option<TextCase>,
    pub family_text_case: Option<TextCase>,
}

impl Default for NameOptions {
    fn default() -> Self {
        NameOptions {
            name_format: NameForm::Long,
            name_as_sort_order: NameAsSortOrder::None,
            and: None,
            et_al_min: 0,
            et_al_use_first: 1,
            et_al_use_last: false,
            delimiter_precedes_last: DelimiterPrecedes::Contextual,
            delimiter_precedes_et_al: DelimiterPrecedes::Contextual,
            initialize: true,
            initialize_with: None,
            initialize_with_hyphen: true,
            demote_non_dropping_particle: DemoteNonDroppingParticle::DisplayAndSort,
            sort_separator: ", ".to_string(),
            name_delimiter: ", ".to_string(),
            names_delimiter: ", ".to_string(),
            given_text_case: None,
            family_text_case: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPlural {
    Always,
    Contextual,
    Never,
}

/// A rendering element of the compiled style tree. Only the elements
/// spec.md §4 gives semantics for are modeled; anything else an external
/// compiler might produce (e.g. `cs:layout`'s own affixes) is folded into
/// [`Layout`].
#[derive(Debug, Clone)]
pub enum Element {
    /// Literal text (spec.md §4.6 "Text by value").
    TextValue {
        value: String,
        formatting: Formatting,
        prefix: String,
        suffix: String,
        text_case: Option<TextCase>,
    },
    /// `cs:text variable=".."` (spec.md §4.6 "Text by variable").
    TextVariable {
        variable: StandardVariable,
        formatting: Formatting,
        prefix: String,
        suffix: String,
        text_case: Option<TextCase>,
        quotes: bool,
    },
    /// `cs:text macro=".."` (spec.md §4.6 "Text by macro").
    TextMacro {
        name: String,
        formatting: Formatting,
        prefix: String,
        suffix: String,
        text_case: Option<TextCase>,
        quotes: bool,
    },
    /// `cs:text term=".."` (spec.md §4.6 "Text by term").
    TextTerm {
        term: crate::terms::TermName,
        form: crate::terms::TermForm,
        plural: bool,
        formatting: Formatting,
        prefix: String,
        suffix: String,
        text_case: Option<TextCase>,
    },
    /// `cs:label` (spec.md §4.6).
    Label {
        variable: NumberOrNameVariable,
        form: crate::terms::TermForm,
        plural: LabelPlural,
        formatting: Formatting,
        prefix: String,
        suffix: String,
        text_case: Option<TextCase>,
    },
    /// `cs:number` (spec.md §4.7).
    Number {
        variable: NumberVariable,
        form: NumericForm,
        formatting: Formatting,
        prefix: String,
        suffix: String,
        text_case: Option<TextCase>,
    },
    /// `cs:date` (spec.md §4.8). `form` selects the localized date-part
    /// list (`Numeric`/`Text`) from the locale; `None` means a
    /// non-localized date using only `parts_override`.
    Date {
        variable: DateVariable,
        form: Option<crate::locale::DateForm>,
        parts_override: Vec<DatePartOverride>,
        delimiter: String,
        formatting: Formatting,
        prefix: String,
        suffix: String,
        text_case: Option<TextCase>,
    },
    /// `cs:names` (spec.md §4.9).
    Names {
        variables: Vec<NameVariable>,
        options: NameOptions,
        label: Option<Box<Element>>,
        substitute: Vec<Element>,
        formatting: Formatting,
        prefix: String,
        suffix: String,
        delimiter: String,
    },
    /// `cs:group` (spec.md §4.5).
    Group {
        children: Vec<Element>,
        delimiter: String,
        formatting: Formatting,
        prefix: String,
        suffix: String,
    },
    /// `cs:choose` (spec.md §4.5).
    Choose(Vec<IfThen>, Vec<Element>),
}

/// An override for one named date part inside a `cs:date` element
/// (spec.md §4.8): `format`/`text_case` replace the locale's, `prefix`/
/// `suffix` stay the locale's own.
#[derive(Debug, Clone)]
pub struct DatePartOverride {
    pub name: crate::locale::DatePartName,
    pub format: crate::locale::DatePartFormat,
    pub text_case: Option<TextCase>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberOrNameVariable {
    Number(NumberVariable),
    Name(NameVariable),
    Locator,
}

/// One `cs:if`/`cs:else-if` branch: a set of conditions plus the elements
/// to render when they match (spec.md §4.5 "Choose").
#[derive(Debug, Clone)]
pub struct IfThen {
    pub conditions: Conditions,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    All,
    Any,
    None,
}

#[derive(Debug, Clone)]
pub struct Conditions {
    pub match_type: Match,
    pub conds: Vec<Cond>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorType {
    Page,
    Paragraph,
    Section,
    Chapter,
    Verse,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    First,
    Subsequent,
    Ibid,
    IbidWithLocator,
    NearNote,
}

impl Position {
    /// "Whenever position=ibid-with-locator tests true, position=ibid
    /// also tests true. And whenever position=ibid or position=near-note
    /// test true, position=subsequent also tests true" (CSL 1.0.1 spec,
    /// `cs:choose`). `self` is the cite's actual position; `in_cond` is
    /// what a `position` condition asked for.
    pub fn matches(self, in_cond: Position) -> bool {
        use Position::*;
        match (self, in_cond) {
            (IbidWithLocator, Ibid) => true,
            (IbidWithLocator, Subsequent) => true,
            (Ibid, Subsequent) => true,
            (NearNote, Subsequent) => true,
            (x, y) => x == y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CslType(pub &'static str);

/// A single `cs:choose` test (spec.md §4.5).
#[derive(Debug, Clone)]
pub enum Cond {
    Variable(AnyVariable),
    IsNumeric(AnyVariable),
    IsUncertainDate(DateVariable),
    Type(CslType),
    Locator(LocatorType),
    Position(Position),
    Disambiguate(bool),
}

/// Top-level rendering element for a citation or bibliography block
/// (spec.md §3 "Entry": layout), assembled by the orchestrator, not by
/// this crate.
#[derive(Debug, Clone)]
pub struct Layout {
    pub elements: Vec<Element>,
    pub delimiter: String,
    pub formatting: Formatting,
    pub prefix: String,
    pub suffix: String,
}

/// `cs:key` inside `cs:sort` (spec.md §4.11).
#[derive(Debug, Clone)]
pub enum SortKey {
    Variable(AnyVariable),
    Macro(String),
}

#[derive(Debug, Clone, Default)]
pub struct Sort {
    pub keys: Vec<SortKey>,
}

/// A fully compiled style: macros, and the citation/bibliography layouts
/// that consult them. Macro bodies are resolved by name at render time
/// (spec.md §4.6 "Text by macro"; §5 cycle detection).
#[derive(Debug, Clone, Default)]
pub struct Style {
    pub macros: HashMap<String, Vec<Element>>,
    pub citation_layout: Option<Layout>,
    pub citation_sort: Sort,
    pub bibliography_layout: Option<Layout>,
    pub bibliography_sort: Sort,
    pub default_locale: Option<crate::locale::Lang>,
    pub page_range_format: Option<PageRangeFormat>,
    /// `cs:citation`'s own name options, inherited by every `cs:names` in
    /// the citation layout unless locally overridden.
    pub name_options: NameOptions,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn formatting_inherits_field_by_field() {
        let parent = Formatting {
            font_style: Some(FontStyle::Italic),
            ..Default::default()
        };
        let child = Formatting {
            font_weight: Some(FontWeight::Bold),
            ..Default::default()
        };
        let merged = parent.inherit(child);
        assert_eq!(merged.font_style, Some(FontStyle::Italic));
        assert_eq!(merged.font_weight, Some(FontWeight::Bold));
    }
}
