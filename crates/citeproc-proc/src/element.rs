// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The per-`cs:*`-element dispatcher (spec.md §4.5-§4.9) tying together
//! every other renderer in this crate under one recursive interpreter.
//! Grounded on `crates/proc/src/element.rs`'s element-kind dispatch, but
//! built as a plain recursive function rather than a `StyleWalker` trait:
//! this core interprets one compiled [`Style`] against one fixed
//! [`RenderContext`] per call, so the generic fold-over-arbitrary-walkers
//! machinery a salsa-cached, twice-walked disambiguation pass would need
//! has nothing left to abstract over (spec.md §1 Non-goals).

use crate::choose;
use crate::context::RenderContext;
use crate::date;
use crate::error::{RenderError, RenderResult};
use crate::group::GroupVars;
use crate::names::{self, NamesLabel};
use crate::number;
use crate::params::Parameters;
use citeproc_io::date::DatePrecision;
use citeproc_io::{compose_finalized, compose_joined, ComposedRun, Run, TextRun, Value};
use csl::terms::{FixedTerm, TermForm, TermName, TermSelector};
use csl::{
    Element, Formatting, Lang, LocaleProvider, LocatorType, NumberOrNameVariable, NumberVariable,
    NumericForm, PageRangeFormat, StandardVariable, Style, TextCase,
};

/// `nv`'s localized label/page-range term, if this simplified term
/// vocabulary carries one (spec.md §4.7: only `page` is modeled).
fn numeric_term(nv: NumberVariable) -> Option<FixedTerm> {
    match nv {
        NumberVariable::Page => Some(FixedTerm::Page),
        _ => None,
    }
}

fn resolve_standard_variable(
    ctx: &RenderContext,
    variable: StandardVariable,
    style: &Style,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> Option<String> {
    match variable {
        StandardVariable::Ordinary(v) => ctx
            .reference
            .get_preferring_short(&v.to_string())
            .and_then(Value::as_text)
            .map(str::to_string),
        StandardVariable::Number(nv) => ctx.reference.get_as_number(&nv.to_string()).map(|n| {
            number::render_number(
                &n,
                NumericForm::Numeric,
                numeric_term(nv),
                style.page_range_format.unwrap_or(PageRangeFormat::Chicago),
                locale,
                lang,
                None,
            )
        }),
    }
}

/// spec.md §4.6 "Label": pluralization and the localized term to look up,
/// for each of the three kinds `cs:label variable=".."` may name.
fn render_label(
    variable: NumberOrNameVariable,
    form: TermForm,
    plural: csl::LabelPlural,
    effective: Formatting,
    prefix: &str,
    suffix: &str,
    text_case: Option<TextCase>,
    ctx: &RenderContext,
    is_english: bool,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> ComposedRun {
    let is_plural_of = |contextual: bool| match plural {
        csl::LabelPlural::Always => true,
        csl::LabelPlural::Never => false,
        csl::LabelPlural::Contextual => contextual,
    };
    let (term, is_plural) = match variable {
        NumberOrNameVariable::Name(nv) => {
            let count = ctx.reference.get_as_names(&nv.to_string()).map_or(0, |ns| ns.len());
            (Some(TermName::Role(nv)), is_plural_of(count != 1))
        }
        NumberOrNameVariable::Number(nv) => {
            let found = ctx.reference.get_as_number(&nv.to_string());
            let contextual = found.map_or(false, |n| n.min != n.max);
            (numeric_term(nv).map(TermName::Fixed), is_plural_of(contextual))
        }
        NumberOrNameVariable::Locator => {
            let found = ctx.reference.get_as_number("locator");
            let contextual = found.map_or(false, |n| n.min != n.max);
            let term = (ctx.locator_type() == Some(LocatorType::Page)).then(|| TermName::Fixed(FixedTerm::Page));
            (term, is_plural_of(contextual))
        }
    };
    let text = term
        .and_then(|t| locale.term(lang, TermSelector::new(t, form, is_plural)))
        .unwrap_or("")
        .to_string();
    compose_finalized(
        "label",
        vec![Run::Text(TextRun::new(text, true))],
        effective,
        prefix.to_string(),
        suffix.to_string(),
        text_case,
        false,
        is_english,
        locale,
        lang,
    )
}

fn names_label_of(label: &Element) -> Option<NamesLabel> {
    match label {
        Element::Label {
            form,
            plural,
            prefix,
            suffix,
            text_case,
            ..
        } => Some(NamesLabel {
            form: *form,
            plural: *plural,
            prefix: prefix.clone(),
            suffix: suffix.clone(),
            text_case: *text_case,
        }),
        _ => None,
    }
}

/// Renders one element (spec.md §4.5-§4.9). Starts a fresh macro-cycle
/// stack; see [`render_elements`] for the sibling-sequence entry point
/// most callers actually want.
pub fn render_element(
    element: &Element,
    ctx: &RenderContext,
    params: &Parameters,
    style: &Style,
    is_english: bool,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> RenderResult<ComposedRun> {
    let mut stack = Vec::new();
    render_element_inner(element, ctx, params, style, is_english, locale, lang, &mut stack)
}

/// Renders a sibling sequence -- a macro body, a `cs:choose` branch, a
/// `cs:layout`'s own children -- returning each child's [`Run`] unjoined
/// plus the [`GroupVars`] fold over them (spec.md §4.5 "Group"). Callers
/// that don't need suppression (macros, layouts) simply ignore the fold;
/// `cs:group` is the one that acts on it.
pub fn render_elements(
    elements: &[Element],
    ctx: &RenderContext,
    params: &Parameters,
    style: &Style,
    is_english: bool,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> RenderResult<(Vec<Run>, GroupVars)> {
    let mut stack = Vec::new();
    render_elements_inner(elements, ctx, params, style, is_english, locale, lang, &mut stack)
}

#[allow(clippy::too_many_arguments)]
fn render_elements_inner(
    elements: &[Element],
    ctx: &RenderContext,
    params: &Parameters,
    style: &Style,
    is_english: bool,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
    stack: &mut Vec<String>,
) -> RenderResult<(Vec<Run>, GroupVars)> {
    let mut runs = Vec::with_capacity(elements.len());
    let mut vars = GroupVars::new();
    for el in elements {
        // A `cs:choose` is transparent to its enclosing sequence: the
        // selected branch's runs join the parent's own delimiter, rather
        // than being composed under a delimiter of their own (Parameters'
        // `inherited_delimiter` field documents this "choose inherits
        // delimiters" rule).
        if let Element::Choose(ifthens, else_elements) = el {
            let branch = choose::select(ifthens, else_elements, ctx);
            let (child_runs, child_vars) =
                render_elements_inner(branch, ctx, params, style, is_english, locale, lang, stack)?;
            vars = vars.neighbour(child_vars);
            runs.extend(child_runs);
            continue;
        }
        let composed = render_element_inner(el, ctx, params, style, is_english, locale, lang, stack)?;
        let contribution = if composed.by_variable {
            GroupVars::rendered_if(!composed.empty)
        } else {
            GroupVars::Plain
        };
        vars = vars.neighbour(contribution);
        runs.push(Run::Composed(composed));
    }
    Ok((runs, vars))
}

#[allow(clippy::too_many_arguments)]
fn render_element_inner(
    element: &Element,
    ctx: &RenderContext,
    params: &Parameters,
    style: &Style,
    is_english: bool,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
    stack: &mut Vec<String>,
) -> RenderResult<ComposedRun> {
    match element {
        Element::TextValue {
            value,
            formatting,
            prefix,
            suffix,
            text_case,
        } => {
            let effective = params.formatting.inherit(*formatting);
            Ok(compose_finalized(
                "text",
                vec![Run::Text(TextRun::new(value.clone(), false))],
                effective,
                prefix.clone(),
                suffix.clone(),
                *text_case,
                false,
                is_english,
                locale,
                lang,
            ))
        }
        Element::TextVariable {
            variable,
            formatting,
            prefix,
            suffix,
            text_case,
            quotes,
        } => {
            let effective = params.formatting.inherit(*formatting);
            let text = resolve_standard_variable(ctx, *variable, style, locale, lang).unwrap_or_default();
            Ok(compose_finalized(
                "text",
                vec![Run::Text(TextRun::new(text, true))],
                effective,
                prefix.clone(),
                suffix.clone(),
                *text_case,
                *quotes,
                is_english,
                locale,
                lang,
            ))
        }
        Element::TextMacro {
            name,
            formatting,
            prefix,
            suffix,
            text_case,
            quotes,
        } => {
            if stack.iter().any(|m| m == name) {
                return Err(RenderError::CycleDetected {
                    macro_name: name.clone(),
                });
            }
            let empty = Vec::new();
            let body = style.macros.get(name).unwrap_or(&empty);
            let child_params = params.with_formatting(*formatting);
            stack.push(name.clone());
            let result = render_elements_inner(body, ctx, &child_params, style, is_english, locale, lang, stack);
            stack.pop();
            let (children, _vars) = result?;
            Ok(compose_joined(
                "macro",
                children,
                "",
                child_params.formatting,
                prefix.clone(),
                suffix.clone(),
                *text_case,
                *quotes,
                is_english,
                locale,
                lang,
            ))
        }
        Element::TextTerm {
            term,
            form,
            plural,
            formatting,
            prefix,
            suffix,
            text_case,
        } => {
            let effective = params.formatting.inherit(*formatting);
            let text = locale
                .term(lang, TermSelector::new(*term, *form, *plural))
                .unwrap_or("")
                .to_string();
            Ok(compose_finalized(
                "text",
                vec![Run::Text(TextRun::literal(text))],
                effective,
                prefix.clone(),
                suffix.clone(),
                *text_case,
                false,
                is_english,
                locale,
                lang,
            ))
        }
        Element::Label {
            variable,
            form,
            plural,
            formatting,
            prefix,
            suffix,
            text_case,
        } => {
            let effective = params.formatting.inherit(*formatting);
            Ok(render_label(
                *variable, *form, *plural, effective, prefix, suffix, *text_case, ctx, is_english, locale, lang,
            ))
        }
        Element::Number {
            variable,
            form,
            formatting,
            prefix,
            suffix,
            text_case,
        } => {
            let effective = params.formatting.inherit(*formatting);
            let text = ctx.reference.get_as_number(&variable.to_string()).map(|nv| {
                number::render_number(
                    &nv,
                    *form,
                    numeric_term(*variable),
                    style.page_range_format.unwrap_or(PageRangeFormat::Chicago),
                    locale,
                    lang,
                    None,
                )
            });
            Ok(compose_finalized(
                "number",
                vec![Run::Text(TextRun::new(text.unwrap_or_default(), true))],
                effective,
                prefix.clone(),
                suffix.clone(),
                *text_case,
                false,
                is_english,
                locale,
                lang,
            ))
        }
        Element::Date {
            variable,
            form,
            parts_override,
            delimiter,
            formatting,
            prefix,
            suffix,
            text_case,
        } => {
            let effective = params.formatting.inherit(*formatting);
            match ctx.reference.get_as_date(&variable.to_string()) {
                Some(value) => {
                    let precision = value.precision().unwrap_or(DatePrecision::YearMonthDay);
                    let parts = match form {
                        Some(f) => date::resolve_localized_parts(locale.date_parts(lang, *f), parts_override, precision),
                        None => date::resolve_non_localized_parts(parts_override, precision),
                    };
                    let range_delimiter = locale
                        .term(
                            lang,
                            TermSelector::new(TermName::Fixed(FixedTerm::PageRangeDelimiter), TermForm::Long, false),
                        )
                        .unwrap_or("\u{2013}");
                    Ok(date::render_date(
                        value,
                        &parts,
                        range_delimiter,
                        delimiter,
                        effective,
                        prefix.clone(),
                        suffix.clone(),
                        *text_case,
                        is_english,
                        locale,
                        lang,
                    ))
                }
                None => Ok(compose_finalized(
                    "date",
                    Vec::new(),
                    effective,
                    prefix.clone(),
                    suffix.clone(),
                    *text_case,
                    false,
                    is_english,
                    locale,
                    lang,
                )),
            }
        }
        Element::Names {
            variables,
            options,
            label,
            substitute,
            formatting,
            prefix,
            suffix,
            delimiter,
        } => {
            let effective = params.formatting.inherit(*formatting);
            let names_label = label.as_deref().and_then(names_label_of);
            let composed = names::render_names(
                ctx,
                variables,
                options,
                names_label.as_ref(),
                delimiter,
                effective,
                prefix.clone(),
                suffix.clone(),
                is_english,
                locale,
                lang,
            );
            if !composed.empty || substitute.is_empty() {
                return Ok(composed);
            }
            let child_params = params.with_formatting(*formatting);
            for el in substitute {
                let candidate = render_element_inner(el, ctx, &child_params, style, is_english, locale, lang, stack)?;
                if !candidate.empty {
                    return Ok(candidate);
                }
            }
            Ok(composed)
        }
        Element::Group {
            children,
            delimiter,
            formatting,
            prefix,
            suffix,
        } => {
            let child_params = params.with_formatting(*formatting);
            let (runs, vars) = render_elements_inner(children, ctx, &child_params, style, is_english, locale, lang, stack)?;
            let runs = if vars.should_suppress() { Vec::new() } else { runs };
            Ok(compose_joined(
                "group",
                runs,
                delimiter,
                child_params.formatting,
                prefix.clone(),
                suffix.clone(),
                None,
                false,
                is_english,
                locale,
                lang,
            ))
        }
        Element::Choose(ifthens, else_elements) => {
            let branch = choose::select(ifthens, else_elements, ctx);
            let (runs, _vars) = render_elements_inner(branch, ctx, params, style, is_english, locale, lang, stack)?;
            Ok(compose_joined(
                "choose",
                runs,
                &params.inherited_delimiter,
                params.formatting,
                String::new(),
                String::new(),
                None,
                false,
                is_english,
                locale,
                lang,
            ))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use citeproc_io::Reference;
    use csl::{CslType, Formatting as Fmt, LabelPlural, NameOptions};

    fn provider() -> csl::InMemoryLocaleProvider {
        let root = csl::Locale::new(None)
            .with_term(TermName::Role(csl::NameVariable::Editor), TermForm::Long, true, "editors")
            .with_term(TermName::Role(csl::NameVariable::Editor), TermForm::Long, false, "editor");
        csl::InMemoryLocaleProvider::new(root)
    }

    fn ctx(r: &Reference) -> RenderContext {
        RenderContext::new(r, crate::context::CiteProperties::default())
    }

    #[test]
    fn text_value_renders_literally() {
        let r = Reference::new("r1", CslType("book"));
        let el = Element::TextValue {
            value: "Hello".into(),
            formatting: Fmt::default(),
            prefix: String::new(),
            suffix: String::new(),
            text_case: None,
        };
        let style = Style::default();
        let p = provider();
        let out = render_element(&el, &ctx(&r), &Parameters::default(), &style, true, &p, None).unwrap();
        assert_eq!(out.children.iter().map(Run::plain_text).collect::<String>(), "Hello");
    }

    #[test]
    fn group_suppressed_when_its_only_variable_is_missing() {
        let r = Reference::new("r1", CslType("book"));
        let el = Element::Group {
            children: vec![
                Element::TextValue {
                    value: "p. ".into(),
                    formatting: Fmt::default(),
                    prefix: String::new(),
                    suffix: String::new(),
                    text_case: None,
                },
                Element::Number {
                    variable: NumberVariable::Page,
                    form: NumericForm::Numeric,
                    formatting: Fmt::default(),
                    prefix: String::new(),
                    suffix: String::new(),
                    text_case: None,
                },
            ],
            delimiter: String::new(),
            formatting: Fmt::default(),
            prefix: String::new(),
            suffix: String::new(),
        };
        let style = Style::default();
        let p = provider();
        let out = render_element(&el, &ctx(&r), &Parameters::default(), &style, true, &p, None).unwrap();
        assert!(out.empty);
    }

    #[test]
    fn macro_cycle_is_detected() {
        let r = Reference::new("r1", CslType("book"));
        let mut style = Style::default();
        style.macros.insert(
            "a".to_string(),
            vec![Element::TextMacro {
                name: "a".to_string(),
                formatting: Fmt::default(),
                prefix: String::new(),
                suffix: String::new(),
                text_case: None,
                quotes: false,
            }],
        );
        let el = Element::TextMacro {
            name: "a".to_string(),
            formatting: Fmt::default(),
            prefix: String::new(),
            suffix: String::new(),
            text_case: None,
            quotes: false,
        };
        let p = provider();
        let err = render_element(&el, &ctx(&r), &Parameters::default(), &style, true, &p, None).unwrap_err();
        assert_eq!(
            err,
            RenderError::CycleDetected {
                macro_name: "a".to_string()
            }
        );
    }

    #[test]
    fn names_falls_back_to_substitute_when_empty() {
        let r = Reference::new("r1", CslType("book")).with_text("title", "Fallback Title");
        let el = Element::Names {
            variables: vec![csl::NameVariable::Author],
            options: NameOptions::default(),
            label: None,
            substitute: vec![Element::TextVariable {
                variable: StandardVariable::Ordinary(csl::Variable::Title),
                formatting: Fmt::default(),
                prefix: String::new(),
                suffix: String::new(),
                text_case: None,
                quotes: false,
            }],
            formatting: Fmt::default(),
            prefix: String::new(),
            suffix: String::new(),
            delimiter: ", ".into(),
        };
        let style = Style::default();
        let p = provider();
        let out = render_element(&el, &ctx(&r), &Parameters::default(), &style, true, &p, None).unwrap();
        assert_eq!(
            out.children.iter().map(Run::plain_text).collect::<String>(),
            "Fallback Title"
        );
    }

    #[test]
    fn label_pluralizes_contextually_on_name_count() {
        let r = Reference::new("r1", CslType("book")).with_names(
            "editor",
            vec![
                citeproc_io::NameOrLiteral::Name(citeproc_io::Name {
                    family: Some("Lee".into()),
                    ..Default::default()
                }),
                citeproc_io::NameOrLiteral::Name(citeproc_io::Name {
                    family: Some("Kim".into()),
                    ..Default::default()
                }),
            ],
        );
        let el = Element::Label {
            variable: NumberOrNameVariable::Name(csl::NameVariable::Editor),
            form: TermForm::Long,
            plural: LabelPlural::Contextual,
            formatting: Fmt::default(),
            prefix: String::new(),
            suffix: String::new(),
            text_case: None,
        };
        let style = Style::default();
        let p = provider();
        let out = render_element(&el, &ctx(&r), &Parameters::default(), &style, true, &p, None).unwrap();
        assert_eq!(out.children.iter().map(Run::plain_text).collect::<String>(), "editors");
    }
}
