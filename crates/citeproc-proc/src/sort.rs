// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `cs:sort` key generation (spec.md §4.11). Grounded on
//! `crates/proc/src/sort.rs`'s per-variable-kind key builders, minus its
//! `NaturalCmp`/locale-collation comparator (a user-provided comparator is
//! an external concern here, spec.md §4.1) and its disambiguation-aware
//! `citation-number` special case.

use crate::context::RenderContext;
use crate::element::render_element;
use crate::error::RenderResult;
use crate::params::Parameters;
use citeproc_io::date::{DateOrRange, DateParts};
use citeproc_io::{NameOrLiteral, NumberVar, Run, Value};
use csl::{AnyVariable, Element, Formatting, Lang, LocaleProvider, Sort, SortKey, Style};

fn name_sort_component(n: &NameOrLiteral) -> String {
    match n {
        NameOrLiteral::Literal(s) => s.clone(),
        NameOrLiteral::Name(name) => [
            name.family.as_deref(),
            name.given.as_deref(),
            name.dropping_particle.as_deref(),
            name.non_dropping_particle.as_deref(),
            name.suffix.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" "),
    }
}

/// spec.md §4.11 "Date → `YYYYMMDD-YYYYMMDD`": a single date repeats its
/// own key on both sides, so single and ranged values stay comparable.
/// Years before 1 are clamped to 0 rather than going negative -- the
/// source never specifies BC ordering for sort keys.
fn date_sort_key(d: &DateOrRange) -> String {
    let endpoint = |dp: &DateParts| {
        let year = dp.year.max(0);
        format!("{:04}{:02}{:02}", year, dp.month.unwrap_or(0), dp.day.unwrap_or(0))
    };
    match d {
        DateOrRange::Literal(_) => "00000000-00000000".to_string(),
        DateOrRange::Single(dp) => {
            let key = endpoint(dp);
            format!("{}-{}", key, key)
        }
        DateOrRange::Range(from, to) => format!("{}-{}", endpoint(from), endpoint(to)),
    }
}

/// spec.md §9 open question, resolved: zero-padded decimal of `min`, then
/// `max` for a range. Ten digits covers every `u32`.
fn number_sort_key(n: NumberVar) -> String {
    if n.is_single() {
        format!("{:010}", n.min)
    } else {
        format!("{:010}-{:010}", n.min, n.max)
    }
}

fn sort_key_for_variable(var: AnyVariable, ctx: &RenderContext) -> String {
    match var {
        AnyVariable::Ordinary(v) => ctx
            .reference
            .get(&v.to_string())
            .and_then(Value::as_text)
            .map(str::to_string)
            .unwrap_or_default(),
        AnyVariable::Name(nv) => ctx
            .reference
            .get_as_names(&nv.to_string())
            .map(|names| names.iter().map(name_sort_component).collect::<Vec<_>>().join(", "))
            .unwrap_or_default(),
        AnyVariable::Date(dv) => ctx.reference.get_as_date(&dv.to_string()).map(date_sort_key).unwrap_or_default(),
        AnyVariable::Number(nv) => ctx.reference.get_as_number(&nv.to_string()).map(number_sort_key).unwrap_or_default(),
    }
}

/// Renders one `cs:key`'s value (spec.md §4.11).
#[allow(clippy::too_many_arguments)]
pub fn sort_key(
    key: &SortKey,
    ctx: &RenderContext,
    params: &Parameters,
    style: &Style,
    is_english: bool,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> RenderResult<String> {
    match key {
        SortKey::Variable(var) => Ok(sort_key_for_variable(*var, ctx)),
        SortKey::Macro(name) => {
            let el = Element::TextMacro {
                name: name.clone(),
                formatting: Formatting::default(),
                prefix: String::new(),
                suffix: String::new(),
                text_case: None,
                quotes: false,
            };
            let composed = render_element(&el, ctx, params, style, is_english, locale, lang)?;
            Ok(composed.children.iter().map(Run::plain_text).collect())
        }
    }
}

/// All of `sort`'s keys, in declaration order (spec.md §4.11, §3
/// invariant 6 "stable sort").
pub fn sort_keys(
    sort: &Sort,
    ctx: &RenderContext,
    params: &Parameters,
    style: &Style,
    is_english: bool,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> RenderResult<Vec<String>> {
    sort.keys
        .iter()
        .map(|k| sort_key(k, ctx, params, style, is_english, locale, lang))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use citeproc_io::numeric::NumericSeparator;
    use citeproc_io::{Name, Reference};
    use csl::{CslType, InMemoryLocaleProvider, Locale, NameVariable, Variable};

    fn provider() -> InMemoryLocaleProvider {
        InMemoryLocaleProvider::new(Locale::new(None))
    }

    #[test]
    fn text_variable_key_is_the_raw_string() {
        let r = Reference::new("r1", CslType("book")).with_text("title", "Zebra");
        let ctx = RenderContext::new(&r, crate::context::CiteProperties::default());
        let key = sort_key_for_variable(AnyVariable::Ordinary(Variable::Title), &ctx);
        assert_eq!(key, "Zebra");
    }

    #[test]
    fn missing_variable_key_is_empty() {
        let r = Reference::new("r1", CslType("book"));
        let ctx = RenderContext::new(&r, crate::context::CiteProperties::default());
        assert_eq!(sort_key_for_variable(AnyVariable::Ordinary(Variable::Title), &ctx), "");
    }

    #[test]
    fn date_range_key_zero_pads_each_endpoint() {
        let from = DateParts::year_only(1999);
        let mut to = DateParts::year_only(2001);
        to.month = Some(5);
        let d = DateOrRange::Range(from, to);
        assert_eq!(date_sort_key(&d), "19990000-20010500");
    }

    #[test]
    fn single_date_key_repeats_on_both_sides() {
        let d = DateOrRange::Single(DateParts::year_only(1999));
        assert_eq!(date_sort_key(&d), "19990000-19990000");
    }

    #[test]
    fn names_key_skips_empty_components_and_joins_with_commas() {
        let r = Reference::new("r1", CslType("book")).with_names(
            "author",
            vec![
                NameOrLiteral::Name(Name {
                    family: Some("Doe".into()),
                    given: Some("Jane".into()),
                    ..Default::default()
                }),
                NameOrLiteral::Literal("Acme Corp".into()),
            ],
        );
        let ctx = RenderContext::new(&r, crate::context::CiteProperties::default());
        let key = sort_key_for_variable(AnyVariable::Name(NameVariable::Author), &ctx);
        assert_eq!(key, "Doe Jane, Acme Corp");
    }

    #[test]
    fn number_range_key_pads_min_and_max() {
        let nv = NumberVar {
            min: 3,
            max: 21,
            separator: NumericSeparator::Hyphen,
        };
        assert_eq!(number_sort_key(nv), "0000000003-0000000021");
    }

    #[test]
    fn macro_key_concatenates_plain_text_of_descendants() {
        let mut style = Style::default();
        style.macros.insert(
            "title-sort".to_string(),
            vec![Element::TextVariable {
                variable: csl::StandardVariable::Ordinary(Variable::Title),
                formatting: Formatting::default(),
                prefix: String::new(),
                suffix: "!".into(),
                text_case: None,
                quotes: false,
            }],
        );
        let r = Reference::new("r1", CslType("book")).with_text("title", "Kittens");
        let ctx = RenderContext::new(&r, crate::context::CiteProperties::default());
        let p = provider();
        let key = sort_key(
            &SortKey::Macro("title-sort".to_string()),
            &ctx,
            &Parameters::default(),
            &style,
            true,
            &p,
            None,
        )
        .unwrap();
        assert_eq!(key, "Kittens!");
    }
}
