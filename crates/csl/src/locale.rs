// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Locale data and the Locale Provider contract (spec.md §4.2).
//!
//! Grounded on `crates/csl/src/locale.rs`, minus `FromNode`/`roxmltree`
//! (parsing locale XML is out of scope, spec.md §1) and minus
//! `LocaleOptionsNode`'s optional-field cascade (no locale-merge feature
//! in the distilled spec) — `LocaleOptions` here is just the resolved
//! values a compiled locale carries.

use crate::style::NumericForm;
use crate::terms::{ordinal_bucket, Gender, TermForm, TermName, TermSelector};
use fnv::FnvHashMap;
use std::fmt;

/// A BCP-47-ish language tag: `language` plus an optional `region`
/// ("en" / "en-GB" / "fr-FR"). `Lang::root()` is the mandatory invariant
/// fallback (spec.md §3 invariant 5).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lang {
    pub language: Option<String>,
    pub region: Option<String>,
}

impl Lang {
    pub fn new(language: &str) -> Self {
        Lang {
            language: Some(language.to_string()),
            region: None,
        }
    }

    pub fn with_region(language: &str, region: &str) -> Self {
        Lang {
            language: Some(language.to_string()),
            region: Some(region.to_string()),
        }
    }

    /// The mandatory final-fallback locale (spec.md §3 invariant 5).
    pub fn root() -> Self {
        Lang {
            language: None,
            region: None,
        }
    }

    pub fn is_english(&self) -> bool {
        self.language.as_deref() == Some("en")
    }

    /// The language-only tag this dialect falls back to ("en-GB" -> "en").
    pub fn language_only(&self) -> Option<Lang> {
        self.language.as_ref().map(|l| Lang::new(l))
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.language, &self.region) {
            (Some(l), Some(r)) => write!(f, "{}-{}", l, r),
            (Some(l), None) => write!(f, "{}", l),
            (None, _) => write!(f, "root"),
        }
    }
}

/// Whole-locale formatting quirks (spec.md §4.2, §4.8 day ordinals).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleOptions {
    pub limit_day_ordinals_to_day1: bool,
    pub punctuation_in_quote: bool,
}

impl Default for LocaleOptions {
    fn default() -> Self {
        LocaleOptions {
            limit_day_ordinals_to_day1: false,
            punctuation_in_quote: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quotes {
    pub open: &'static str,
    pub close: &'static str,
    pub open_inner: &'static str,
    pub close_inner: &'static str,
}

impl Default for Quotes {
    fn default() -> Self {
        // CSL's built-in en-US defaults.
        Quotes {
            open: "\u{201C}",
            close: "\u{201D}",
            open_inner: "\u{2018}",
            close_inner: "\u{2019}",
        }
    }
}

/// Which order/selection of date parts a localized date uses
/// (spec.md §4.8); `date_parts(format, ..)` returns one of these lists.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DateForm {
    Numeric,
    Text,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DatePartName {
    Year,
    Month,
    Day,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DatePartFormat {
    Numeric,
    NumericLeadingZeros,
    Long,
    Short,
    Ordinal,
}

/// One entry of a locale's date-part ordering for a given [`DateForm`]
/// (spec.md §3 "DatePart").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleDatePart {
    pub name: DatePartName,
    pub format: DatePartFormat,
    pub prefix: String,
    pub suffix: String,
}

type DateMapping = FnvHashMap<DateForm, Vec<LocaleDatePart>>;

/// One loaded locale's resolved data. Holds no resolution logic itself —
/// see [`LocaleProvider`] for the dialect -> language -> root cascade.
#[derive(Debug, Clone, Default)]
pub struct Locale {
    pub lang: Option<Lang>,
    pub options: LocaleOptions,
    pub quotes: Quotes,
    pub terms: FnvHashMap<(TermName, TermForm, bool), String>,
    pub genders: FnvHashMap<TermName, Gender>,
    pub dates: DateMapping,
}

impl Locale {
    pub fn new(lang: Option<Lang>) -> Self {
        Locale {
            lang,
            ..Default::default()
        }
    }

    pub fn with_term(mut self, name: TermName, form: TermForm, plural: bool, text: &str) -> Self {
        self.terms.insert((name, form, plural), text.to_string());
        self
    }

    pub fn with_gender(mut self, name: TermName, gender: Gender) -> Self {
        self.genders.insert(name, gender);
        self
    }

    pub fn with_dates(mut self, form: DateForm, parts: Vec<LocaleDatePart>) -> Self {
        self.dates.insert(form, parts);
        self
    }

    /// Exact lookup against only this locale's own term table -- no
    /// fallback to other variants of the same term, only the plural/form
    /// match requested. Used by [`LocaleProvider`] to build its cascade.
    fn term_here(&self, sel: TermSelector) -> Option<&str> {
        self.terms
            .get(&(sel.name, sel.form, sel.plural))
            .map(|s| s.as_str())
            .or_else(|| {
                // CSL: an unset plural form falls back to the singular of
                // the same term/format before trying another locale.
                if sel.plural {
                    self.terms
                        .get(&(sel.name, sel.form, false))
                        .map(|s| s.as_str())
                } else {
                    None
                }
            })
    }
}

/// Contract a rendering element consults for localized text, numbers, and
/// date-part layout (spec.md §4.2). `LocaleProvider` performs the
/// dialect -> language-only -> invariant cascade (spec.md §3 invariant 5);
/// [`Locale`] itself holds no fallback logic.
pub trait LocaleProvider {
    /// The locale loaded for exactly this tag, if any (no fallback).
    fn loaded(&self, lang: &Lang) -> Option<&Locale>;
    /// The mandatory invariant ("root") locale -- always present.
    fn root(&self) -> &Locale;

    /// dialect -> language-only -> root, skipping tags that aren't loaded.
    fn cascade(&self, lang: Option<&Lang>) -> Vec<&Locale> {
        let mut out = Vec::with_capacity(3);
        if let Some(l) = lang {
            if let Some(loc) = self.loaded(l) {
                out.push(loc);
            }
            if let Some(lang_only) = l.language_only() {
                if lang_only != *l {
                    if let Some(loc) = self.loaded(&lang_only) {
                        out.push(loc);
                    }
                }
            }
        }
        out.push(self.root());
        out
    }

    fn term(&self, lang: Option<&Lang>, sel: TermSelector) -> Option<&str> {
        self.cascade(lang).into_iter().find_map(|l| l.term_here(sel))
    }

    fn term_gender(&self, lang: Option<&Lang>, name: TermName) -> Option<Gender> {
        self.cascade(lang)
            .into_iter()
            .find_map(|l| l.genders.get(&name).copied())
    }

    fn limit_day_ordinals_to_day1(&self, lang: Option<&Lang>) -> bool {
        self.cascade(lang)
            .first()
            .map(|l| l.options.limit_day_ordinals_to_day1)
            .unwrap_or(false)
    }

    fn quotes(&self, lang: Option<&Lang>) -> Quotes {
        self.cascade(lang).into_iter().next().map(|l| l.quotes).unwrap_or_default()
    }

    fn date_parts(&self, lang: Option<&Lang>, form: DateForm) -> Vec<LocaleDatePart> {
        self.cascade(lang)
            .into_iter()
            .find_map(|l| l.dates.get(&form).cloned())
            .unwrap_or_default()
    }

    /// spec.md §4.2 `format_ordinal`: the bare numeral with its
    /// last-two-digits ordinal suffix term appended (`"1st"`, `"22nd"`).
    /// `gender` is accepted per the contract for locales whose ordinal
    /// terms vary by the grammatical gender of the thing being counted;
    /// this provider's term table does not yet carry gendered variants.
    fn format_ordinal(&self, lang: Option<&Lang>, n: u32, _gender: Option<Gender>) -> String {
        let sel = TermSelector::new(TermName::Ordinal(ordinal_bucket(n)), TermForm::Long, false);
        match self.term(lang, sel) {
            Some(suffix) => format!("{}{}", n, suffix),
            None => n.to_string(),
        }
    }

    /// spec.md §4.2 `format_number(.., LongOrdinal, ..)`: spelled-out
    /// ordinals ("first".."tenth") for 1..=10, falling back to the
    /// numeral+suffix form outside that range (CSL only defines
    /// `long-ordinal-01`..`long-ordinal-10`).
    fn format_long_ordinal(&self, lang: Option<&Lang>, n: u32, gender: Option<Gender>) -> String {
        if (1..=10).contains(&n) {
            let sel = TermSelector::new(TermName::LongOrdinal(n as u8), TermForm::Long, false);
            if let Some(word) = self.term(lang, sel) {
                return word.to_string();
            }
        }
        self.format_ordinal(lang, n, gender)
    }

    /// spec.md §4.2 `format_number`.
    fn format_number(&self, lang: Option<&Lang>, n: u32, form: NumericForm, gender: Option<Gender>) -> String {
        match form {
            NumericForm::Numeric => n.to_string(),
            NumericForm::Ordinal => self.format_ordinal(lang, n, gender),
            NumericForm::LongOrdinal => self.format_long_ordinal(lang, n, gender),
            NumericForm::Roman => to_roman(n),
        }
    }
}

/// Classic subtractive-notation Roman numerals; numbers outside `1..=3999`
/// (CSL's practical range) fall back to plain Arabic digits.
fn to_roman(n: u32) -> String {
    const TABLE: &[(u32, &str)] = &[
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    if n == 0 || n > 3999 {
        return n.to_string();
    }
    let mut remaining = n;
    let mut out = String::new();
    for &(value, sym) in TABLE {
        while remaining >= value {
            out.push_str(sym);
            remaining -= value;
        }
    }
    out
}

/// The ambient, in-memory [`LocaleProvider`] implementation this crate
/// ships (spec.md §5: "a locale provider may cache resolved terms
/// internally" -- this one just holds them all, already resolved, from
/// construction time, and is `Send + Sync` so callers may share it behind
/// an `Arc` across parallel top-level calls).
#[derive(Debug, Clone)]
pub struct InMemoryLocaleProvider {
    root: Locale,
    loaded: FnvHashMap<Lang, Locale>,
}

impl InMemoryLocaleProvider {
    pub fn new(root: Locale) -> Self {
        InMemoryLocaleProvider {
            root,
            loaded: FnvHashMap::default(),
        }
    }

    pub fn insert(&mut self, lang: Lang, locale: Locale) {
        self.loaded.insert(lang, locale);
    }
}

impl LocaleProvider for InMemoryLocaleProvider {
    fn loaded(&self, lang: &Lang) -> Option<&Locale> {
        self.loaded.get(lang)
    }
    fn root(&self) -> &Locale {
        &self.root
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::terms::FixedTerm;

    fn sample_provider() -> InMemoryLocaleProvider {
        let root = Locale::new(None).with_term(
            TermName::Fixed(FixedTerm::EtAl),
            TermForm::Long,
            false,
            "et al",
        );
        let mut p = InMemoryLocaleProvider::new(root);
        let en = Locale::new(Some(Lang::new("en"))).with_term(
            TermName::Fixed(FixedTerm::And),
            TermForm::Text,
            false,
            "and",
        );
        p.insert(Lang::new("en"), en);
        let en_gb = Locale::new(Some(Lang::with_region("en", "GB"))).with_term(
            TermName::Fixed(FixedTerm::And),
            TermForm::Text,
            false,
            "and (GB)",
        );
        p.insert(Lang::with_region("en", "GB"), en_gb);
        p
    }

    #[test]
    fn dialect_before_language_before_root() {
        let p = sample_provider();
        let sel = TermSelector::new(TermName::Fixed(FixedTerm::And), TermForm::Text, false);
        assert_eq!(
            p.term(Some(&Lang::with_region("en", "GB")), sel),
            Some("and (GB)")
        );
        assert_eq!(p.term(Some(&Lang::new("en")), sel), Some("and"));
        // fr isn't loaded at all -> falls all the way to root, where "and"
        // isn't defined either, but "et al" is found via a different term.
        let etal_sel = TermSelector::new(TermName::Fixed(FixedTerm::EtAl), TermForm::Long, false);
        assert_eq!(p.term(Some(&Lang::new("fr")), etal_sel), Some("et al"));
        assert_eq!(p.term(Some(&Lang::new("fr")), sel), None);
    }

    #[test]
    fn invariant_locale_is_the_final_fallback() {
        let p = sample_provider();
        let sel = TermSelector::new(TermName::Fixed(FixedTerm::EtAl), TermForm::Long, false);
        assert_eq!(p.term(None, sel), Some("et al"));
    }

    #[test]
    fn roman_numerals_round_trip_known_values() {
        assert_eq!(to_roman(1994), "mcmxciv");
        assert_eq!(to_roman(58), "lviii");
        assert_eq!(to_roman(3999), "mmmcmxcix");
    }

    #[test]
    fn ordinal_falls_back_to_bare_number_without_a_term() {
        let p = InMemoryLocaleProvider::new(Locale::new(None));
        assert_eq!(p.format_ordinal(None, 21, None), "21");
    }
}
