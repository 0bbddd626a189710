// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `cs:names` (spec.md §4.9): variable grouping/merging, Count mode,
//! regular Long/Short rendering (inversion, particle demotion, given-name
//! initialization), delimiter/"and"/et-al logic, and the label appended
//! to a group. Grounded on `crates/proc/src/names.rs`, simplified to drop
//! disambiguation-driven et-al expansion and the salsa-cached
//! `DisambNameData` machinery (citation disambiguation is a Non-goal,
//! spec.md §1).

pub mod initials;

use crate::context::RenderContext;
use citeproc_io::{compose_finalized, compose_joined, ComposedRun, Name, NameOrLiteral, Run, TextRun};
use csl::terms::{FixedTerm, TermForm, TermName, TermSelector};
use csl::{
    AndType, DelimiterPrecedes, DemoteNonDroppingParticle, Formatting, Lang, LabelPlural, LocaleProvider,
    NameAsSortOrder, NameForm, NameOptions, NameVariable, TextCase,
};

/// Rendering knobs for the label appended after a names group (spec.md
/// §4.9 "Label on the Group"). Which role term it looks up is decided
/// per group by the caller, since a merged `editor-translator` group uses
/// a different term than a plain single-variable one.
#[derive(Debug, Clone)]
pub struct NamesLabel {
    pub form: TermForm,
    pub plural: LabelPlural,
    pub prefix: String,
    pub suffix: String,
    pub text_case: Option<TextCase>,
}

struct NameGroup<'n> {
    term: TermName,
    names: &'n [NameOrLiteral],
}

/// Builds the `(variable, term, names)` triples spec.md §4.9 describes,
/// folding an equal-by-sort-string `editor`+`translator` pair into one
/// `editor-translator` group at the former `editor`'s position.
fn build_groups<'n>(ctx: &'n RenderContext, variables: &[NameVariable]) -> Vec<NameGroup<'n>> {
    let fetch = |v: NameVariable| -> Option<&'n [NameOrLiteral]> {
        ctx.reference.get_as_names(&v.to_string()).filter(|n| !n.is_empty())
    };

    let merge_editor_translator = match (fetch(NameVariable::Editor), fetch(NameVariable::Translator)) {
        (Some(e), Some(t)) => e.len() == t.len() && e.iter().zip(t.iter()).all(|(a, b)| a.sort_string() == b.sort_string()),
        _ => false,
    };

    let mut groups = Vec::with_capacity(variables.len());
    for &v in variables {
        match v {
            NameVariable::Translator if merge_editor_translator => continue,
            NameVariable::Editor if merge_editor_translator => {
                if let Some(names) = fetch(v) {
                    groups.push(NameGroup { term: TermName::Fixed(FixedTerm::EditorTranslator), names });
                }
            }
            _ => {
                if let Some(names) = fetch(v) {
                    groups.push(NameGroup { term: TermName::Role(v), names });
                }
            }
        }
    }
    groups
}

fn count_mode_total(groups: &[NameGroup], options: &NameOptions) -> usize {
    groups
        .iter()
        .map(|g| {
            let n = g.names.len() as u32;
            if n >= options.et_al_min {
                (options.et_al_use_first as usize).min(n as usize)
            } else {
                n as usize
            }
        })
        .sum()
}

fn delimiter_precedes(rule: DelimiterPrecedes, contextual_cond: bool, previous_inverted: bool) -> bool {
    match rule {
        DelimiterPrecedes::Always => true,
        DelimiterPrecedes::Never => false,
        DelimiterPrecedes::Contextual => contextual_cond,
        DelimiterPrecedes::AfterInvertedName => previous_inverted,
    }
}

fn name_is_inverted(order: NameAsSortOrder, idx: usize) -> bool {
    match order {
        NameAsSortOrder::None => false,
        NameAsSortOrder::First => idx == 0,
        NameAsSortOrder::All => true,
    }
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

/// Space-joins non-empty parts, except across a join where the left part
/// ends with an apostrophe-like character (spec.md §4.9 "Long form").
fn join_parts(parts: &[&str]) -> String {
    let mut out = String::new();
    for part in parts.iter().filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            let needs_space = !matches!(out.chars().last(), Some('\'') | Some('\u{2019}') | Some('\u{2018}'));
            if needs_space {
                out.push(' ');
            }
        }
        out.push_str(part);
    }
    out
}

fn join_sorted(left: &str, right: &str, sep: &str) -> String {
    if left.is_empty() {
        right.to_string()
    } else if right.is_empty() {
        left.to_string()
    } else {
        format!("{}{}{}", left, sep, right)
    }
}

fn append_suffix_spaced(out: &mut String, suffix: &str, comma: bool) {
    if suffix.is_empty() {
        return;
    }
    if out.is_empty() {
        out.push_str(suffix);
        return;
    }
    if comma {
        out.push_str(", ");
    } else if !matches!(out.chars().last(), Some('\'') | Some('\u{2019}') | Some('\u{2018}')) {
        out.push(' ');
    }
    out.push_str(suffix);
}

fn append_suffix_sorted(out: &mut String, suffix: &str, sort_sep: &str, comma: bool) {
    if suffix.is_empty() {
        return;
    }
    let sep = if comma { ", " } else { sort_sep };
    if out.is_empty() {
        out.push_str(suffix);
    } else {
        out.push_str(sep);
        out.push_str(suffix);
    }
}

/// Given name after initialization (spec.md §4.9 "Initialization of
/// Given Names"); only triggers when `initialize_with` is set and both
/// the family and given names are present.
fn resolved_given(name: &Name, options: &NameOptions) -> String {
    let given = name.given.as_deref().unwrap_or("");
    if given.is_empty() {
        return String::new();
    }
    let family_present = name.family.as_deref().map_or(false, |f| !f.is_empty());
    if options.initialize_with.is_some() && family_present {
        initials::initialize(given, options.initialize, options.initialize_with.as_deref(), options.initialize_with_hyphen)
    } else {
        given.to_string()
    }
}

fn render_name_long(name: &Name, inverted: bool, options: &NameOptions) -> String {
    let given = apply_case(&resolved_given(name, options), options.given_text_case);
    let family = apply_case(name.family.as_deref().unwrap_or(""), options.family_text_case);
    let dropping = name.dropping_particle.as_deref().unwrap_or("");
    let non_dropping = name.non_dropping_particle.as_deref().unwrap_or("");
    let suffix = name.suffix.as_deref().unwrap_or("");
    let sort_sep = options.sort_separator.as_str();

    if !inverted {
        let mut out = join_parts(&[&given, dropping, non_dropping, &family]);
        append_suffix_spaced(&mut out, suffix, name.precede_suffix_by_comma);
        return out;
    }

    match options.demote_non_dropping_particle {
        DemoteNonDroppingParticle::DisplayAndSort => {
            let right = join_parts(&[&given, dropping, non_dropping]);
            let mut out = join_sorted(&family, &right, sort_sep);
            append_suffix_sorted(&mut out, suffix, sort_sep, name.precede_suffix_by_comma);
            out
        }
        DemoteNonDroppingParticle::SortOnly | DemoteNonDroppingParticle::Never => {
            let left = join_parts(&[non_dropping, &family]);
            let right = join_parts(&[&given, dropping]);
            let mut out = join_sorted(&left, &right, sort_sep);
            append_suffix_sorted(&mut out, suffix, sort_sep, name.precede_suffix_by_comma);
            out
        }
    }
}

fn render_name_short(name: &Name, options: &NameOptions) -> String {
    let family = apply_case(name.family.as_deref().unwrap_or(""), options.family_text_case);
    let non_dropping = name.non_dropping_particle.as_deref().unwrap_or("");
    join_parts(&[non_dropping, &family])
}

fn render_one_name(nm: &NameOrLiteral, inverted: bool, options: &NameOptions) -> String {
    let name = match nm {
        NameOrLiteral::Literal(s) => return s.clone(),
        NameOrLiteral::Name(n) => n,
    };
    match options.name_format {
        NameForm::Short => render_name_short(name, options),
        _ => render_name_long(name, inverted, options),
    }
}

/// Joins an already-truncated (et-al-active) or full (et-al-inactive)
/// shown-name list with "and" handling applied only in the latter case
/// (spec.md §4.9 "Delimiters, `and`, and `et al.`").
fn join_names_with_and(entries: &[(String, bool)], options: &NameOptions, locale: &dyn LocaleProvider, lang: Option<&Lang>) -> String {
    let n = entries.len();
    let mut out = String::new();
    for (i, (text, _)) in entries.iter().enumerate() {
        if i == 0 {
            out.push_str(text);
            continue;
        }
        let is_last = i == n - 1;
        let previous_inverted = entries[i - 1].1;
        if is_last {
            if let Some(and) = options.and {
                let precedes = delimiter_precedes(options.delimiter_precedes_last, n as u32 >= 3, previous_inverted);
                if precedes {
                    out.push_str(&options.name_delimiter);
                } else {
                    out.push(' ');
                }
                match and {
                    AndType::Symbol => out.push_str("& "),
                    AndType::Text => {
                        let word = locale
                            .term(lang, TermSelector::new(TermName::Fixed(FixedTerm::And), TermForm::Long, false))
                            .unwrap_or("and");
                        out.push_str(word);
                        out.push(' ');
                    }
                }
                out.push_str(text);
                continue;
            }
        }
        out.push_str(&options.name_delimiter);
        out.push_str(text);
    }
    out
}

/// Renders one group's name list (spec.md §4.9 "Regular Rendering" and
/// "Delimiters, `and`, and `et al.`").
fn render_group_names(names: &[NameOrLiteral], options: &NameOptions, locale: &dyn LocaleProvider, lang: Option<&Lang>) -> String {
    let n = names.len() as u32;
    let et_al_active = n >= options.et_al_min;
    if et_al_active {
        log::debug!("names: et-al active ({} names >= et_al_min {}), showing first {}", n, options.et_al_min, options.et_al_use_first);
    }
    let shown = if et_al_active { options.et_al_use_first + 1 } else { n };
    let delta = if et_al_active { 1 } else { 0 };
    let core_count = shown.saturating_sub(delta).min(n) as usize;

    let entries: Vec<(String, bool)> = names
        .iter()
        .take(core_count)
        .enumerate()
        .map(|(i, nm)| {
            let inverted = name_is_inverted(options.name_as_sort_order, i);
            (render_one_name(nm, inverted, options), inverted)
        })
        .collect();

    let mut out = if et_al_active {
        let mut s = String::new();
        for (i, (text, _)) in entries.iter().enumerate() {
            if i > 0 {
                s.push_str(&options.name_delimiter);
            }
            s.push_str(text);
        }
        s
    } else {
        join_names_with_and(&entries, options, locale, lang)
    };

    let truncated = et_al_active && core_count < n as usize;
    if truncated {
        let show_last = options.et_al_use_last;
        let previous_inverted = entries.last().map(|(_, inv)| *inv).unwrap_or(false);
        let last_idx = n as usize - 1;
        if show_last {
            out.push_str("\u{2026} ");
            let inverted = name_is_inverted(options.name_as_sort_order, last_idx);
            out.push_str(&render_one_name(&names[last_idx], inverted, options));
        } else {
            let precedes = delimiter_precedes(options.delimiter_precedes_et_al, entries.len() as u32 > 2, previous_inverted);
            if precedes {
                out.push_str(&options.name_delimiter);
            } else if !out.is_empty() {
                out.push(' ');
            }
            let et_al = locale
                .term(lang, TermSelector::new(TermName::Fixed(FixedTerm::EtAl), TermForm::Long, false))
                .unwrap_or("et al.");
            out.push_str(et_al);
        }
    }
    out
}

fn render_group_label(term: TermName, n: usize, label: &NamesLabel, locale: &dyn LocaleProvider, lang: Option<&Lang>) -> Option<Run> {
    let plural = match label.plural {
        LabelPlural::Always => true,
        LabelPlural::Never => false,
        LabelPlural::Contextual => n != 1,
    };
    let text = locale.term(lang, TermSelector::new(term, label.form, plural))?;
    if text.is_empty() {
        return None;
    }
    let cased = apply_case(text, label.text_case);
    Some(Run::Text(TextRun::new(format!("{}{}{}", label.prefix, cased, label.suffix), true)))
}

fn render_group(
    group: &NameGroup,
    options: &NameOptions,
    label: Option<&NamesLabel>,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> Run {
    let names_text = render_group_names(group.names, options, locale, lang);
    let mut parts = vec![Run::Text(TextRun::new(names_text, true))];
    if let Some(label) = label {
        if let Some(run) = render_group_label(group.term, group.names.len(), label, locale, lang) {
            parts.push(run);
        }
    }
    if parts.len() == 1 {
        parts.into_iter().next().unwrap()
    } else {
        Run::Composed(compose_finalized(
            "names-group",
            parts,
            Formatting::default(),
            String::new(),
            String::new(),
            None,
            false,
            true,
            locale,
            lang,
        ))
    }
}

/// Full `cs:names` render (spec.md §4.9, §4.10).
#[allow(clippy::too_many_arguments)]
pub fn render_names(
    ctx: &RenderContext,
    variables: &[NameVariable],
    options: &NameOptions,
    label: Option<&NamesLabel>,
    delimiter: &str,
    formatting: Formatting,
    prefix: String,
    suffix: String,
    is_english: bool,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> ComposedRun {
    let groups = build_groups(ctx, variables);

    if options.name_format == NameForm::Count {
        let total = count_mode_total(&groups, options);
        let text = if total == 0 { String::new() } else { total.to_string() };
        return compose_finalized(
            "names",
            vec![Run::Text(TextRun::new(text, true))],
            formatting,
            prefix,
            suffix,
            None,
            false,
            is_english,
            locale,
            lang,
        );
    }

    let group_runs: Vec<Run> = groups.iter().map(|g| render_group(g, options, label, locale, lang)).collect();

    compose_joined("names", group_runs, delimiter, formatting, prefix, suffix, None, false, is_english, locale, lang)
}
