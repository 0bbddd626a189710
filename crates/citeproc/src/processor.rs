// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Top-Level Orchestrator (spec.md §4.1). Grounded on
//! `crates/citeproc/src/processor.rs`'s `Processor`/`generate_*` shape,
//! minus the salsa-backed incremental database, snapshotting, and
//! document-update queue -- this core renders each call from scratch
//! against immutable inputs (spec.md §5 "no shared mutable state").

use crate::error::ProcessorError;
use citeproc_io::{compose_joined, ComposedRun, Reference, Run};
use citeproc_proc::context::{CiteProperties, RenderContext};
use citeproc_proc::params::Parameters;
use citeproc_proc::{element, sort};
use csl::{Lang, LocaleProvider, Style};
use std::cmp::Ordering;

/// One item's rendered layout plus its sort keys (spec.md §3 "Entry").
struct Entry {
    layout: ComposedRun,
    sort_keys: Vec<String>,
}

/// Splits a BCP-47-ish tag ("en-US", "fr") into a [`Lang`]. This core's
/// [`Lang`] only ever carries a language and a region (no script/variant
/// subtags), so this is a plain split rather than the full grammar a
/// locale-file parser would need -- parsing locale data is out of scope
/// (spec.md §1); this only decodes the caller-supplied tag string.
fn parse_lang(tag: &str) -> Lang {
    let mut parts = tag.splitn(2, '-');
    match (parts.next(), parts.next()) {
        (Some(language), Some(region)) if !language.is_empty() => Lang::with_region(language, region),
        (Some(language), None) if !language.is_empty() => Lang::new(language),
        _ => Lang::root(),
    }
}

/// spec.md §6.3: `force_locale = false` uses the style's own default
/// locale regardless of the argument; `true` honors the argument. The
/// default default-locale is `"en-US"`.
fn resolve_lang(style: &Style, locale: &str, force_locale: bool) -> Lang {
    if force_locale {
        parse_lang(locale)
    } else {
        style.default_locale.clone().unwrap_or_else(|| parse_lang("en-US"))
    }
}

#[allow(clippy::too_many_arguments)]
fn render_layout(
    elements: &[csl::Element],
    delimiter: &str,
    formatting: csl::Formatting,
    prefix: &str,
    suffix: &str,
    ctx: &RenderContext,
    params: &Parameters,
    style: &Style,
    is_english: bool,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> Result<ComposedRun, ProcessorError> {
    let (runs, _vars) = element::render_elements(elements, ctx, params, style, is_english, locale, lang)?;
    Ok(compose_joined(
        "layout",
        runs,
        delimiter,
        formatting,
        prefix.to_string(),
        suffix.to_string(),
        None,
        false,
        is_english,
        locale,
        lang,
    ))
}

#[allow(clippy::too_many_arguments)]
fn entry_for(
    layout: &csl::Layout,
    style_sort: &csl::Sort,
    reference: &Reference,
    style: &Style,
    is_english: bool,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> Result<Entry, ProcessorError> {
    let ctx = RenderContext::new(reference, CiteProperties::default());
    let params = Parameters::default();
    let composed = render_layout(
        &layout.elements,
        &layout.delimiter,
        layout.formatting,
        &layout.prefix,
        &layout.suffix,
        &ctx,
        &params,
        style,
        is_english,
        locale,
        lang,
    )?;
    let sort_keys = sort::sort_keys(style_sort, &ctx, &params, style, is_english, locale, lang)?;
    Ok(Entry {
        layout: composed,
        sort_keys,
    })
}

fn compare_sort_keys(a: &[String], b: &[String], cmp: &dyn Fn(&str, &str) -> Ordering) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match cmp(x, y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// spec.md §4.1 `generate_bibliography`. Returns one [`ComposedRun`] per
/// item, stably sorted by `style.bibliography_sort` (spec.md §3
/// invariant 6). A style with no bibliography layout has nothing to
/// render here; this returns an empty sequence rather than an error.
pub fn generate_bibliography(
    style: &Style,
    items: &[Reference],
    locale_provider: &dyn LocaleProvider,
    locale: &str,
    force_locale: bool,
    cmp: impl Fn(&str, &str) -> Ordering,
) -> Result<Vec<ComposedRun>, ProcessorError> {
    let Some(layout) = style.bibliography_layout.as_ref() else {
        return Ok(Vec::new());
    };
    let lang = resolve_lang(style, locale, force_locale);
    let is_english = lang.is_english();
    let mut entries = items
        .iter()
        .map(|item| entry_for(layout, &style.bibliography_sort, item, style, is_english, locale_provider, Some(&lang)))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort_by(|a, b| compare_sort_keys(&a.sort_keys, &b.sort_keys, &cmp));
    Ok(entries.into_iter().map(|e| e.layout).collect())
}

/// spec.md §4.1 `generate_citation`. Zero items renders nothing; one item
/// renders its own layout untouched; more than one is sorted and joined
/// with `delimiter` (spec.md §4.10). A style with no citation layout has
/// nothing to render, same as the zero-items case.
pub fn generate_citation(
    style: &Style,
    items: &[Reference],
    locale_provider: &dyn LocaleProvider,
    locale: &str,
    force_locale: bool,
    delimiter: &str,
    cmp: impl Fn(&str, &str) -> Ordering,
) -> Result<Option<ComposedRun>, ProcessorError> {
    if items.is_empty() {
        return Ok(None);
    }
    let Some(layout) = style.citation_layout.as_ref() else {
        return Ok(None);
    };
    let lang = resolve_lang(style, locale, force_locale);
    let is_english = lang.is_english();
    let mut entries = items
        .iter()
        .map(|item| entry_for(layout, &style.citation_sort, item, style, is_english, locale_provider, Some(&lang)))
        .collect::<Result<Vec<_>, _>>()?;
    if entries.len() == 1 {
        return Ok(Some(entries.pop().unwrap().layout));
    }
    entries.sort_by(|a, b| compare_sort_keys(&a.sort_keys, &b.sort_keys, &cmp));
    let runs = entries.into_iter().map(|e| Run::Composed(e.layout)).collect();
    Ok(Some(compose_joined(
        "citation",
        runs,
        delimiter,
        csl::Formatting::default(),
        String::new(),
        String::new(),
        None,
        false,
        is_english,
        locale_provider,
        Some(&lang),
    )))
}

#[cfg(test)]
mod test {
    use super::*;
    use csl::{CslType, Element, InMemoryLocaleProvider, Locale, SortKey, StandardVariable, Variable};

    fn provider() -> InMemoryLocaleProvider {
        InMemoryLocaleProvider::new(Locale::new(None))
    }

    fn style_with_title_layout() -> Style {
        let layout = csl::Layout {
            elements: vec![Element::TextVariable {
                variable: StandardVariable::Ordinary(Variable::Title),
                formatting: csl::Formatting::default(),
                prefix: String::new(),
                suffix: String::new(),
                text_case: None,
                quotes: false,
            }],
            delimiter: String::new(),
            formatting: csl::Formatting::default(),
            prefix: String::new(),
            suffix: String::new(),
        };
        let mut style = Style::default();
        style.bibliography_layout = Some(layout.clone());
        style.citation_layout = Some(layout);
        style.bibliography_sort = csl::Sort {
            keys: vec![SortKey::Variable(csl::AnyVariable::Ordinary(Variable::Title))],
        };
        style
    }

    #[test]
    fn bibliography_sorts_entries_by_title() {
        let style = style_with_title_layout();
        let items = vec![
            Reference::new("b", CslType("book")).with_text("title", "Zebra"),
            Reference::new("a", CslType("book")).with_text("title", "Apple"),
        ];
        let p = provider();
        let out = generate_bibliography(&style, &items, &p, "en-US", false, |a, b| a.cmp(b)).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].plain_text(), "Apple");
        assert_eq!(out[1].plain_text(), "Zebra");
    }

    #[test]
    fn citation_with_no_items_is_none() {
        let style = style_with_title_layout();
        let p = provider();
        let out = generate_citation(&style, &[], &p, "en-US", false, "; ", |a, b| a.cmp(b)).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn citation_with_one_item_skips_sorting_and_delimiter() {
        let style = style_with_title_layout();
        let items = vec![Reference::new("a", CslType("book")).with_text("title", "Solo")];
        let p = provider();
        let out = generate_citation(&style, &items, &p, "en-US", false, "; ", |a, b| a.cmp(b))
            .unwrap()
            .unwrap();
        assert_eq!(out.plain_text(), "Solo");
    }

    #[test]
    fn citation_with_many_items_joins_with_delimiter_in_sorted_order() {
        let style = style_with_title_layout();
        let items = vec![
            Reference::new("b", CslType("book")).with_text("title", "Bravo"),
            Reference::new("a", CslType("book")).with_text("title", "Alpha"),
        ];
        let p = provider();
        let out = generate_citation(&style, &items, &p, "en-US", false, "; ", |a, b| a.cmp(b))
            .unwrap()
            .unwrap();
        assert_eq!(out.plain_text(), "Alpha; Bravo");
    }

    #[test]
    fn bibliography_with_missing_layout_is_empty() {
        let style = Style::default();
        let items = vec![Reference::new("a", CslType("book")).with_text("title", "X")];
        let p = provider();
        let out = generate_bibliography(&style, &items, &p, "en-US", false, |a, b| a.cmp(b)).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn force_locale_false_ignores_the_argument_in_favour_of_the_style_default() {
        let mut style = style_with_title_layout();
        style.default_locale = Some(Lang::root());
        let items = vec![Reference::new("a", CslType("book")).with_text("title", "X")];
        let p = provider();
        // "klingon" would panic a real BCP-47 parser; force_locale=false means
        // it's never even looked at.
        let out = generate_bibliography(&style, &items, &p, "klingon", false, |a, b| a.cmp(b)).unwrap();
        assert_eq!(out[0].plain_text(), "X");
    }
}
