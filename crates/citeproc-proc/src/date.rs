// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `cs:date` (spec.md §4.8): localized/non-localized dates, per-part
//! formatting, and range collapsing.
//!
//! The range-collapsing walk is grounded on `crates/proc/src/date.rs`'s
//! `DateRangePartsIter`/`WhichDelim::diff`: find the coarsest differing
//! part, walk the part list emitting the `from` endpoint throughout, and
//! splice in the `to` endpoint's same-or-finer parts right after the
//! differing part is reached. This reproduces spec.md §8 Scenario 3
//! ("March–May 1999") exactly, which the prose in spec.md §4.8 alone
//! under-specifies.

use citeproc_io::date::{DateOrRange, DateParts, DatePrecision, Season};
use citeproc_io::{compose_finalized, Run, TextRun};
use csl::locale::{DatePartFormat, DatePartName, LocaleDatePart};
use csl::terms::{FixedTerm, Gender, TermForm, TermName, TermSelector};
use csl::{DatePartOverride, Formatting, Lang, LocaleProvider, TextCase};

/// A locale date-part merged with any scope-local override (spec.md
/// §4.8: "overrides take `format` and `text_case`, the locale keeps
/// `prefix` and `suffix`").
#[derive(Debug, Clone)]
pub struct ResolvedPart {
    pub name: DatePartName,
    pub format: DatePartFormat,
    pub prefix: String,
    pub suffix: String,
    pub text_case: Option<TextCase>,
}

fn within_precision(name: DatePartName, precision: DatePrecision) -> bool {
    match name {
        DatePartName::Year => true,
        DatePartName::Month => precision >= DatePrecision::YearMonth,
        DatePartName::Day => precision >= DatePrecision::YearMonthDay,
    }
}

/// Merges a locale's date-part list with local overrides, filtered down
/// to the parts the date's own `precision` actually has content for.
pub fn resolve_localized_parts(
    locale_parts: Vec<LocaleDatePart>,
    overrides: &[DatePartOverride],
    precision: DatePrecision,
) -> Vec<ResolvedPart> {
    locale_parts
        .into_iter()
        .filter(|lp| within_precision(lp.name, precision))
        .map(|lp| match overrides.iter().find(|o| o.name == lp.name) {
            Some(o) => ResolvedPart {
                name: lp.name,
                format: o.format,
                prefix: lp.prefix,
                suffix: lp.suffix,
                text_case: o.text_case,
            },
            None => ResolvedPart {
                name: lp.name,
                format: lp.format,
                prefix: lp.prefix,
                suffix: lp.suffix,
                text_case: None,
            },
        })
        .collect()
}

/// A non-localized `cs:date` has no locale part list to merge with --
/// its `parts_override` list, in document order, IS the part list
/// (spec.md §4.8 "Non-localized date").
pub fn resolve_non_localized_parts(overrides: &[DatePartOverride], precision: DatePrecision) -> Vec<ResolvedPart> {
    overrides
        .iter()
        .filter(|o| within_precision(o.name, precision))
        .map(|o| ResolvedPart {
            name: o.name,
            format: o.format,
            prefix: String::new(),
            suffix: String::new(),
            text_case: o.text_case,
        })
        .collect()
}

fn render_year(year: i32, format: DatePartFormat, locale: &dyn LocaleProvider, lang: Option<&Lang>) -> String {
    if year == 0 {
        return String::new();
    }
    if format == DatePartFormat::Short {
        return format!("{:02}", (year.abs() % 100) as u32);
    }
    let digits = year.unsigned_abs().to_string();
    if year < 0 {
        match locale.term(lang, TermSelector::new(TermName::Fixed(FixedTerm::Bc), TermForm::Long, false)) {
            Some(bc) => format!("{} {}", digits, bc),
            None => digits,
        }
    } else if year < 1000 {
        match locale.term(lang, TermSelector::new(TermName::Fixed(FixedTerm::Ad), TermForm::Long, false)) {
            Some(ad) => format!("{} {}", digits, ad),
            None => digits,
        }
    } else {
        digits
    }
}

fn render_month(
    month: Option<u8>,
    season: Option<Season>,
    format: DatePartFormat,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> String {
    if let Some(m) = month.filter(|m| (1..=12).contains(m)) {
        return match format {
            DatePartFormat::Numeric => m.to_string(),
            DatePartFormat::NumericLeadingZeros => format!("{:02}", m),
            DatePartFormat::Ordinal => locale.format_ordinal(lang, m as u32, None),
            DatePartFormat::Short => locale
                .term(lang, TermSelector::new(TermName::Month(m), TermForm::Short, false))
                .unwrap_or_default()
                .to_string(),
            DatePartFormat::Long => locale
                .term(lang, TermSelector::new(TermName::Month(m), TermForm::Long, false))
                .unwrap_or_default()
                .to_string(),
        };
    }
    if let Some(season) = season {
        let form = if format == DatePartFormat::Short { TermForm::Short } else { TermForm::Long };
        let sel = TermSelector::new(TermName::Season(season.term_bucket()), form, false);
        return locale.term(lang, sel).unwrap_or_default().to_string();
    }
    String::new()
}

fn render_day(
    day: Option<u8>,
    format: DatePartFormat,
    limit_day_ordinals_to_day1: bool,
    month_gender: Option<Gender>,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> String {
    let d = match day.filter(|d| *d >= 1) {
        Some(d) => d,
        None => return String::new(),
    };
    match format {
        DatePartFormat::NumericLeadingZeros => format!("{:02}", d),
        DatePartFormat::Ordinal => {
            if limit_day_ordinals_to_day1 && d != 1 {
                d.to_string()
            } else {
                locale.format_ordinal(lang, d as u32, month_gender)
            }
        }
        _ => d.to_string(),
    }
}

fn render_part_text(part: &ResolvedPart, dp: &DateParts, locale: &dyn LocaleProvider, lang: Option<&Lang>) -> String {
    match part.name {
        DatePartName::Year => render_year(dp.year, part.format, locale, lang),
        DatePartName::Month => render_month(dp.month, dp.season, part.format, locale, lang),
        DatePartName::Day => {
            let month_gender = dp.month.and_then(|m| locale.term_gender(lang, TermName::Month(m)));
            let limit = locale.limit_day_ordinals_to_day1(lang);
            render_day(dp.day, part.format, limit, month_gender, locale, lang)
        }
    }
}

/// One rendered part, prefix/suffix applied, ready to drop into a
/// sequence (prefix/suffix already possibly suppressed at the call site
/// for range-boundary parts, spec.md §4.8 "Affixes of parts").
fn part_run(part: &ResolvedPart, text: String, suppress_prefix: bool, suppress_suffix: bool) -> Run {
    if text.is_empty() {
        return Run::Text(TextRun::empty());
    }
    let prefix = if suppress_prefix { "" } else { part.prefix.as_str() };
    let suffix = if suppress_suffix { "" } else { part.suffix.as_str() };
    let cased = apply_case(&text, part.text_case);
    Run::Text(TextRun::new(format!("{}{}{}", prefix, cased, suffix), true))
}

fn apply_case(s: &str, case: Option<TextCase>) -> String {
    match case {
        Some(TextCase::Uppercase) => s.to_uppercase(),
        Some(TextCase::Lowercase) => s.to_lowercase(),
        Some(TextCase::CapitalizeFirst) | Some(TextCase::CapitalizeAll) | Some(TextCase::Sentence) => {
            let mut chars = s.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        }
        _ => s.to_string(),
    }
}

fn rank(name: DatePartName) -> u8 {
    match name {
        DatePartName::Day => 1,
        DatePartName::Month => 2,
        DatePartName::Year => 3,
    }
}

fn differs(name: DatePartName, from: &DateParts, to: &DateParts) -> bool {
    match name {
        DatePartName::Year => from.year != to.year,
        DatePartName::Month => from.month != to.month || from.season != to.season,
        DatePartName::Day => from.day != to.day,
    }
}

/// Threads the ordinary between-parts delimiter through a date's part
/// sequence, the way [`interleave_delimiter`](citeproc_io::interleave_delimiter)
/// does for composed children -- except a manually-inserted range-delimiter
/// run (the en-dash between "March" and "May") must not get the ordinary
/// delimiter glued to either side of it too.
struct PartJoiner<'a> {
    out: Vec<Run>,
    delimiter: &'a str,
    formatting: Formatting,
    seen_one: bool,
    last_was_range_delim: bool,
}

impl<'a> PartJoiner<'a> {
    fn new(delimiter: &'a str, formatting: Formatting) -> Self {
        PartJoiner { out: Vec::new(), delimiter, formatting, seen_one: false, last_was_range_delim: false }
    }

    fn push_part(&mut self, run: Run) {
        if !run.is_empty() {
            if self.seen_one && !self.last_was_range_delim && !self.delimiter.is_empty() {
                let mut d = TextRun::literal(self.delimiter);
                d.formatting = self.formatting;
                self.out.push(Run::Text(d));
            }
            self.seen_one = true;
        }
        self.last_was_range_delim = false;
        self.out.push(run);
    }

    fn push_range_delimiter(&mut self, text: &str) {
        self.out.push(Run::Text(TextRun::literal(text)));
        self.last_was_range_delim = true;
        self.seen_one = true;
    }

    fn finish(self) -> Vec<Run> {
        self.out
    }
}

/// Renders a single (non-range) date's parts as a sequence of runs.
fn render_single(
    parts: &[ResolvedPart],
    dp: &DateParts,
    delimiter: &str,
    formatting: Formatting,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> Vec<Run> {
    let mut joiner = PartJoiner::new(delimiter, formatting);
    for part in parts {
        joiner.push_part(part_run(part, render_part_text(part, dp, locale, lang), false, false));
    }
    joiner.finish()
}

/// Flushes one contiguous run of differing-or-finer parts as
/// `from`-side-through-finest, the range delimiter, then the `to`-side
/// counterpart: e.g. for `run = [Month, Day]`, "March 15", dash, "May 20".
/// The from side suppresses the suffix of its last part and the to side
/// suppresses the prefix of its first part, so the dash sits flush
/// against both sides.
fn flush_collapsed_run(
    joiner: &mut PartJoiner<'_>,
    run: &[&ResolvedPart],
    from: &DateParts,
    to: &DateParts,
    range_delimiter: &str,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) {
    let Some(last) = run.len().checked_sub(1) else {
        return;
    };
    for (i, part) in run.iter().enumerate() {
        joiner.push_part(part_run(part, render_part_text(part, from, locale, lang), false, i == last));
    }
    joiner.push_range_delimiter(range_delimiter);
    for (i, part) in run.iter().enumerate() {
        joiner.push_part(part_run(part, render_part_text(part, to, locale, lang), i == 0, false));
    }
}

/// Renders a date range, collapsing on the coarsest differing part
/// (spec.md §4.8 "Range Collapsing"). `range_delimiter` is the en-dash
/// (or locale-configured) glyph joining the two sides.
///
/// Parts at or finer than the coarsest differing part render once per
/// side (from-side run, dash, to-side run, in document order); parts
/// coarser than that -- shared between both endpoints -- render once.
#[allow(clippy::too_many_arguments)]
fn render_range(
    parts: &[ResolvedPart],
    from: &DateParts,
    to: &DateParts,
    range_delimiter: &str,
    delimiter: &str,
    formatting: Formatting,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> Vec<Run> {
    let max_diff = parts
        .iter()
        .filter(|p| differs(p.name, from, to))
        .map(|p| rank(p.name))
        .max();

    let max_diff = match max_diff {
        None => return render_single(parts, from, delimiter, formatting, locale, lang),
        Some(r) => r,
    };

    let mut joiner = PartJoiner::new(delimiter, formatting);
    let mut run: Vec<&ResolvedPart> = Vec::new();
    for part in parts {
        if rank(part.name) <= max_diff {
            run.push(part);
        } else {
            flush_collapsed_run(&mut joiner, &run, from, to, range_delimiter, locale, lang);
            run.clear();
            joiner.push_part(part_run(part, render_part_text(part, from, locale, lang), false, false));
        }
    }
    flush_collapsed_run(&mut joiner, &run, from, to, range_delimiter, locale, lang);
    joiner.finish()
}

/// Full `cs:date` render: dispatches on [`DateOrRange`], collapses
/// ranges, and joins the result under the element's own delimiter and
/// affixes (spec.md §4.8, §4.10).
#[allow(clippy::too_many_arguments)]
pub fn render_date(
    value: &DateOrRange,
    parts: &[ResolvedPart],
    range_delimiter: &str,
    delimiter: &str,
    formatting: Formatting,
    prefix: String,
    suffix: String,
    text_case: Option<TextCase>,
    is_english: bool,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> citeproc_io::ComposedRun {
    let runs = match value {
        DateOrRange::Literal(s) => vec![Run::Text(TextRun::new(s.clone(), true))],
        DateOrRange::Single(dp) => render_single(parts, dp, delimiter, formatting, locale, lang),
        DateOrRange::Range(from, to) => {
            if from <= to {
                render_range(parts, from, to, range_delimiter, delimiter, formatting, locale, lang)
            } else {
                render_single(parts, from, delimiter, formatting, locale, lang)
            }
        }
    };
    compose_finalized("date", runs, formatting, prefix, suffix, text_case, false, is_english, locale, lang)
}

#[cfg(test)]
mod test {
    use super::*;
    use csl::{InMemoryLocaleProvider, Locale};

    fn en_provider() -> InMemoryLocaleProvider {
        let root = Locale::new(None)
            .with_term(TermName::Month(3), TermForm::Long, false, "March")
            .with_term(TermName::Month(5), TermForm::Long, false, "May");
        InMemoryLocaleProvider::new(root)
    }

    fn parts(names: &[DatePartName]) -> Vec<ResolvedPart> {
        names
            .iter()
            .map(|&name| ResolvedPart {
                name,
                format: DatePartFormat::Long,
                prefix: String::new(),
                suffix: String::new(),
                text_case: None,
            })
            .collect()
    }

    #[test]
    fn year_only_range_renders_as_hyphenated_years() {
        let p = en_provider();
        let from = DateParts::year_only(1999);
        let to = DateParts::year_only(2001);
        let parts = parts(&[DatePartName::Year]);
        let composed = render_date(
            &DateOrRange::Range(from, to),
            &parts,
            "\u{2013}",
            "",
            Formatting::default(),
            String::new(),
            String::new(),
            None,
            true,
            &p,
            None,
        );
        assert_eq!(Run::Composed(composed).plain_text(), "1999\u{2013}2001");
    }

    #[test]
    fn month_range_same_year_collapses_to_month_en_dash_month_year() {
        let p = en_provider();
        let from = DateParts {
            year: 1999,
            month: Some(3),
            day: None,
            season: None,
            circa: false,
        };
        let to = DateParts {
            year: 1999,
            month: Some(5),
            day: None,
            season: None,
            circa: false,
        };
        // Locale order for the Text form: month before year.
        let parts = parts(&[DatePartName::Month, DatePartName::Year]);
        let composed = render_date(
            &DateOrRange::Range(from, to),
            &parts,
            "\u{2013}",
            " ",
            Formatting::default(),
            String::new(),
            String::new(),
            None,
            true,
            &p,
            None,
        );
        assert_eq!(Run::Composed(composed).plain_text(), "March\u{2013}May 1999");
    }

    #[test]
    fn month_day_year_range_collapses_month_and_day_shares_year_once() {
        let p = en_provider();
        let from = DateParts {
            year: 1999,
            month: Some(3),
            day: Some(15),
            season: None,
            circa: false,
        };
        let to = DateParts {
            year: 1999,
            month: Some(5),
            day: Some(20),
            season: None,
            circa: false,
        };
        // US-style document order: month, day, year.
        let parts = parts(&[DatePartName::Month, DatePartName::Day, DatePartName::Year]);
        let composed = render_date(
            &DateOrRange::Range(from, to),
            &parts,
            "\u{2013}",
            " ",
            Formatting::default(),
            String::new(),
            String::new(),
            None,
            true,
            &p,
            None,
        );
        // Month and day (the differing-or-finer parts) render on both
        // sides of the dash; year (shared, coarser than the differing
        // month) renders once.
        assert_eq!(Run::Composed(composed).plain_text(), "March 15\u{2013}May 20 1999");
    }

    #[test]
    fn equal_endpoints_render_like_a_single_date() {
        let p = en_provider();
        let from = DateParts::year_only(2020);
        let parts = parts(&[DatePartName::Year]);
        let single = render_date(
            &DateOrRange::Single(from),
            &parts,
            "\u{2013}",
            "",
            Formatting::default(),
            String::new(),
            String::new(),
            None,
            true,
            &p,
            None,
        );
        let range = render_date(
            &DateOrRange::Range(from, from),
            &parts,
            "\u{2013}",
            "",
            Formatting::default(),
            String::new(),
            String::new(),
            None,
            true,
            &p,
            None,
        );
        assert_eq!(
            Run::Composed(single).plain_text(),
            Run::Composed(range).plain_text()
        );
    }
}
