// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `cs:number` and the number half of `cs:text variable=".."` (spec.md
//! §4.7). Grounded on `crates/proc/src/number.rs`'s `NumericToken`
//! rendering, minus CSL-M's roman-numeral-in-attribute and
//! affixes-per-token features the distilled spec doesn't ask for.

use crate::page_range;
use citeproc_io::NumberVar;
use csl::terms::{FixedTerm, Gender, TermForm, TermName, TermSelector};
use csl::{Lang, LocaleProvider, NumericForm, PageRangeFormat};

/// `term == Some(FixedTerm::Page)` is the only term this renderer treats
/// specially (spec.md §4.7: "term is `Page`").
pub fn render_number(
    nv: &NumberVar,
    form: NumericForm,
    term: Option<FixedTerm>,
    page_range_format: PageRangeFormat,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
    gender: Option<Gender>,
) -> String {
    if nv.is_single() {
        return locale.format_number(lang, nv.min, form, gender);
    }
    if nv.separator == citeproc_io::NumericSeparator::Hyphen && term == Some(FixedTerm::Page) {
        log::debug!("number: page range {}-{} collapsing as {:?}", nv.min, nv.max, page_range_format);
        let delimiter = locale
            .term(
                lang,
                TermSelector::new(TermName::Fixed(FixedTerm::PageRangeDelimiter), TermForm::Long, false),
            )
            .unwrap_or("\u{2013}");
        return page_range::collapse(nv.min, nv.max, page_range_format, delimiter);
    }
    let min = locale.format_number(lang, nv.min, form, gender);
    let max = locale.format_number(lang, nv.max, form, gender);
    match nv.separator {
        // spec.md §9 open question: '&' pads both sides, ',' only the
        // trailing side, '-' is bare -- preserved as-is from the source.
        citeproc_io::NumericSeparator::Ampersand => format!("{} & {}", min, max),
        citeproc_io::NumericSeparator::Comma => format!("{}, {}", min, max),
        citeproc_io::NumericSeparator::Hyphen => format!("{}-{}", min, max),
    }
}
