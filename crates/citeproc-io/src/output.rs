// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The in-memory rendered-run tree (spec.md §3 "Run tree", §4.4 Run Tree
//! and Composition, §4.10 Delimiter Application).
//!
//! Grounded on `crates/io/src/output/markup.rs`'s `InlineElement`
//! formatting-application pipeline, trimmed to a formatting-neutral tree
//! (spec.md §6.4): no HTML/RTF-specific inline elements, no
//! `html5ever`/link parsing -- that's the out-of-scope serializer's job.
//! Quote nesting and `text_case` application are kept, since those are
//! spec.md §4.4's responsibility, not the serializer's.

use csl::{Formatting, Lang, LocaleProvider, Quotes, TextCase};
use serde::{Deserialize, Serialize};

/// A leaf text node (spec.md §3 "TextRun").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub formatting: Formatting,
    pub empty: bool,
    pub by_variable: bool,
    /// Set during quote-wrapping composition; lets an ancestor's
    /// `text_case` skip over text that's already inside a localized
    /// quotation (spec.md §4.4 step 2, "capitalization skips text inside
    /// quotes unless specified otherwise").
    pub inside_quotes: bool,
}

impl TextRun {
    pub fn new(text: impl Into<String>, by_variable: bool) -> Self {
        let text = text.into();
        let empty = text.is_empty();
        TextRun {
            text,
            formatting: Formatting::default(),
            empty,
            by_variable,
            inside_quotes: false,
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        TextRun::new(text, false)
    }

    pub fn empty() -> Self {
        TextRun::new("", false)
    }
}

/// One child of a [`Result`]/[`ComposedRun`] -- a leaf run or a nested
/// subtree.
#[derive(Debug, Clone)]
pub enum ResultNode {
    Text(TextRun),
    Nested(Result),
}

impl ResultNode {
    fn is_empty(&self) -> bool {
        match self {
            ResultNode::Text(t) => t.empty,
            ResultNode::Nested(r) => r.is_empty(),
        }
    }
}

/// A composed subtree awaiting affix/case/quote finalization
/// (spec.md §3 "Result").
#[derive(Debug, Clone)]
pub struct Result {
    pub tag: &'static str,
    pub children: Vec<ResultNode>,
    pub prefix: String,
    pub suffix: String,
    pub quotes: bool,
    pub text_case: Option<TextCase>,
    pub formatting: Formatting,
    /// Set directly when this Result's own content (not a descendant's)
    /// came from a variable lookup, e.g. a `<text variable>` leaf. Nested
    /// children additionally OR their own flag in during composition
    /// (spec.md invariant 1/2).
    pub by_variable: bool,
}

impl Default for Result {
    fn default() -> Self {
        Result {
            tag: "seq",
            children: Vec::new(),
            prefix: String::new(),
            suffix: String::new(),
            quotes: false,
            text_case: None,
            formatting: Formatting::default(),
            by_variable: false,
        }
    }
}

impl Result {
    pub fn leaf(tag: &'static str, run: TextRun) -> Self {
        let by_variable = run.by_variable;
        Result {
            tag,
            children: vec![ResultNode::Text(run)],
            by_variable,
            ..Default::default()
        }
    }

    pub fn seq(tag: &'static str, children: Vec<ResultNode>) -> Self {
        Result {
            tag,
            children,
            ..Default::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.children.iter().all(ResultNode::is_empty)
    }

    /// Invariant 1 in spec.md §3: by-variable OR over direct children.
    /// Compositions that want the "does any by-variable descendant
    /// render?" test for group suppression (§4.5) use
    /// `citeproc_proc::group` instead -- this is just the simple,
    /// structural OR invariant 1 describes for [`ComposedRun::by_variable`].
    fn children_by_variable(&self) -> bool {
        self.children.iter().any(|c| match c {
            ResultNode::Text(t) => t.by_variable,
            ResultNode::Nested(r) => r.by_variable || r.children_by_variable(),
        })
    }

    /// spec.md §4.4: recursively compose, apply text-case, wrap in
    /// quotes, emit affixes unless empty, propagate `by_variable`.
    pub fn to_composed_run(
        self,
        locale: &dyn LocaleProvider,
        lang: Option<&Lang>,
        is_english: bool,
    ) -> ComposedRun {
        self.compose_inner(locale, lang, is_english, false)
    }

    fn compose_inner(
        self,
        locale: &dyn LocaleProvider,
        lang: Option<&Lang>,
        is_english: bool,
        parent_inside_quotes: bool,
    ) -> ComposedRun {
        let empty = self.is_empty();
        let by_variable = self.by_variable || self.children_by_variable();
        let child_inside_quotes = parent_inside_quotes || self.quotes;

        let mut children: Vec<Run> = self
            .children
            .into_iter()
            .map(|c| match c {
                ResultNode::Text(mut t) => {
                    t.inside_quotes = t.inside_quotes || child_inside_quotes;
                    Run::Text(t)
                }
                ResultNode::Nested(r) => Run::Composed(r.compose_inner(
                    locale,
                    lang,
                    is_english,
                    child_inside_quotes,
                )),
            })
            .collect();

        if let Some(case) = self.text_case {
            apply_text_case(&mut children, case, is_english, &mut WordState::default());
        }

        if !empty && self.quotes {
            let q = locale.quotes(lang);
            let (open, close) = quote_pair(q, parent_inside_quotes);
            children.insert(0, Run::Text(TextRun::literal(open)));
            children.push(Run::Text(TextRun::literal(close)));
        }

        let (prefix, suffix) = if empty {
            (String::new(), String::new())
        } else {
            (self.prefix, self.suffix)
        };

        ComposedRun {
            tag: self.tag,
            children,
            prefix,
            suffix,
            quotes: self.quotes,
            text_case: self.text_case,
            formatting: self.formatting,
            by_variable,
            empty,
        }
    }
}

/// spec.md §3 "ComposedRun": same shape as [`Result`], flattened and
/// immutable.
///
/// `tag` is `&'static str`, so this derives `Serialize` only -- there's
/// no sound `Deserialize` for a run tree coming back from JSON, and
/// nothing round-trips one.
#[derive(Debug, Clone, Serialize)]
pub struct ComposedRun {
    pub tag: &'static str,
    pub children: Vec<Run>,
    pub prefix: String,
    pub suffix: String,
    pub quotes: bool,
    pub text_case: Option<TextCase>,
    pub formatting: Formatting,
    pub by_variable: bool,
    pub empty: bool,
}

#[derive(Debug, Clone, Serialize)]
pub enum Run {
    Text(TextRun),
    Composed(ComposedRun),
}

impl Run {
    pub fn is_empty(&self) -> bool {
        match self {
            Run::Text(t) => t.empty,
            Run::Composed(c) => c.empty,
        }
    }

    pub fn formatting(&self) -> Formatting {
        match self {
            Run::Text(t) => t.formatting,
            Run::Composed(c) => c.formatting,
        }
    }

    /// Plain-text concatenation, stripping all formatting/affixes --
    /// used by macro-based sort keys (spec.md §4.11).
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain_text(&mut out);
        out
    }

    fn write_plain_text(&self, out: &mut String) {
        match self {
            Run::Text(t) => out.push_str(&t.text),
            Run::Composed(c) => {
                if !c.empty {
                    out.push_str(&c.prefix);
                }
                for child in &c.children {
                    child.write_plain_text(out);
                }
                if !c.empty {
                    out.push_str(&c.suffix);
                }
            }
        }
    }
}

impl ComposedRun {
    /// Plain-text rendering of a top-level run, e.g. one
    /// `generate_bibliography` entry (spec.md §4.1).
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        if !self.empty {
            out.push_str(&self.prefix);
        }
        for child in &self.children {
            child.write_plain_text(&mut out);
        }
        if !self.empty {
            out.push_str(&self.suffix);
        }
        out
    }
}

/// Which quote glyphs to use: swap to the inner pair when nesting inside
/// an already-open quotation (spec.md §4.4 step 3).
fn quote_pair(q: Quotes, nested: bool) -> (&'static str, &'static str) {
    if nested {
        (q.open_inner, q.close_inner)
    } else {
        (q.open, q.close)
    }
}

/// spec.md §4.10: interleave `delimiter` between non-empty runs only;
/// empty runs at either end produce no leading/trailing delimiter, and an
/// empty delimiter leaves the sequence untouched. Delimiter runs inherit
/// `formatting` at insertion time.
pub fn interleave_delimiter(runs: Vec<Run>, delimiter: &str, formatting: Formatting) -> Vec<Run> {
    if delimiter.is_empty() {
        return runs;
    }
    let mut out = Vec::with_capacity(runs.len() * 2);
    let mut seen_non_empty = false;
    for run in runs {
        if run.is_empty() {
            out.push(run);
            continue;
        }
        if seen_non_empty {
            let mut d = TextRun::literal(delimiter);
            d.formatting = formatting;
            out.push(Run::Text(d));
        }
        seen_non_empty = true;
        out.push(run);
    }
    out
}

/// Joins already-composed children with `delimiter` (spec.md §4.10) and
/// finalizes them under one parent's own affixes/case/quotes (spec.md
/// §4.4). Used by composite elements whose children are rendered and
/// composed independently before being strung together -- `cs:group`,
/// `cs:names`' name list -- rather than nested inside a single [`Result`]
/// subtree.
#[allow(clippy::too_many_arguments)]
pub fn compose_joined(
    tag: &'static str,
    children: Vec<Run>,
    delimiter: &str,
    formatting: Formatting,
    prefix: String,
    suffix: String,
    text_case: Option<TextCase>,
    quotes: bool,
    is_english: bool,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> ComposedRun {
    let children = interleave_delimiter(children, delimiter, formatting);
    compose_finalized(tag, children, formatting, prefix, suffix, text_case, quotes, is_english, locale, lang)
}

/// Like [`compose_joined`] but for callers that have already interleaved
/// their own delimiters (e.g. `cs:date`'s range-collapsing en-dash, which
/// must not be treated like an ordinary between-parts delimiter) -- just
/// wraps the given children in affixes/case/quotes.
#[allow(clippy::too_many_arguments)]
pub fn compose_finalized(
    tag: &'static str,
    mut children: Vec<Run>,
    formatting: Formatting,
    prefix: String,
    suffix: String,
    text_case: Option<TextCase>,
    quotes: bool,
    is_english: bool,
    locale: &dyn LocaleProvider,
    lang: Option<&Lang>,
) -> ComposedRun {
    let empty = children.iter().all(Run::is_empty);
    let by_variable = children.iter().any(|r| match r {
        Run::Text(t) => t.by_variable,
        Run::Composed(c) => c.by_variable,
    });
    if let Some(case) = text_case {
        apply_text_case(&mut children, case, is_english, &mut WordState::default());
    }
    if !empty && quotes {
        let q = locale.quotes(lang);
        let (open, close) = quote_pair(q, false);
        children.insert(0, Run::Text(TextRun::literal(open)));
        children.push(Run::Text(TextRun::literal(close)));
    }
    let (prefix, suffix) = if empty { (String::new(), String::new()) } else { (prefix, suffix) };
    ComposedRun {
        tag,
        children,
        prefix,
        suffix,
        quotes,
        text_case,
        formatting,
        by_variable,
        empty,
    }
}

#[derive(Default)]
struct WordState {
    at_word_start: bool,
    seen_any_word: bool,
}

const MINOR_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "in", "nor", "of", "on", "or", "the", "to",
    "up", "via", "with",
];

/// spec.md §4.4 step 2. `title` is English-only (locale-gated); the other
/// five forms are not. Capitalization forms (`capitalize-first`,
/// `capitalize-all`, `sentence`) skip over runs already marked
/// `inside_quotes`: capitalization skips text inside quotes unless
/// specified otherwise. `uppercase`/`lowercase`/`title` are treated as
/// *not* "capitalization" for this purpose and apply uniformly, which is
/// this core's resolution of the open question in spec.md §9 about
/// title-case-vs-quotes interaction.
fn apply_text_case(runs: &mut [Run], case: TextCase, is_english: bool, state: &mut WordState) {
    if case == TextCase::Title && !is_english {
        return;
    }
    for run in runs.iter_mut() {
        match run {
            Run::Text(t) => apply_case_to_text_run(t, case, state),
            Run::Composed(c) => apply_text_case(&mut c.children, case, is_english, state),
        }
    }
}

fn apply_case_to_text_run(t: &mut TextRun, case: TextCase, state: &mut WordState) {
    let skip_because_quoted = t.inside_quotes
        && matches!(
            case,
            TextCase::CapitalizeFirst | TextCase::CapitalizeAll | TextCase::Sentence
        );
    if skip_because_quoted || t.text.is_empty() {
        return;
    }
    match case {
        TextCase::Lowercase => t.text = t.text.to_lowercase(),
        TextCase::Uppercase => t.text = t.text.to_uppercase(),
        TextCase::CapitalizeFirst => {
            if !state.seen_any_word {
                t.text = capitalize_first_char(&t.text);
                state.seen_any_word = true;
            }
        }
        TextCase::CapitalizeAll => {
            t.text = capitalize_each_word(&t.text, state);
        }
        TextCase::Sentence => {
            let lowered = t.text.to_lowercase();
            t.text = if !state.seen_any_word {
                capitalize_first_char(&lowered)
            } else {
                lowered
            };
            if !t.text.trim().is_empty() {
                state.seen_any_word = true;
            }
        }
        TextCase::Title => {
            t.text = title_case_words(&t.text, state);
        }
    }
}

// Most words this touches are a handful of bytes, so build the
// uppercased-first-letter piece in a smartstring (stack-allocated up to
// 23 bytes) before handing back an owned `String`.
fn capitalize_first_char(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => {
            let mut head: smartstring::alias::String = smartstring::alias::String::new();
            head.extend(c.to_uppercase());
            format!("{}{}", head, chars.as_str())
        }
    }
}

fn capitalize_each_word(s: &str, state: &mut WordState) -> String {
    let mut out = String::with_capacity(s.len());
    for word in split_keep_whitespace(s) {
        if word.chars().next().map_or(false, |c| c.is_whitespace()) {
            out.push_str(word);
        } else {
            out.push_str(&capitalize_first_char(word));
            state.seen_any_word = true;
        }
    }
    out
}

fn title_case_words(s: &str, state: &mut WordState) -> String {
    let mut out = String::with_capacity(s.len());
    for word in split_keep_whitespace(s) {
        if word.chars().next().map_or(false, |c| c.is_whitespace()) {
            out.push_str(word);
            continue;
        }
        let is_first = !state.seen_any_word;
        let lower = word.to_lowercase();
        if !is_first && MINOR_WORDS.contains(&lower.as_str()) {
            out.push_str(&lower);
        } else {
            out.push_str(&capitalize_first_char(word));
        }
        state.seen_any_word = true;
    }
    out
}

/// Splits `s` into alternating whitespace/word chunks, preserving every
/// character (so rejoining the pieces reproduces `s` exactly).
fn split_keep_whitespace(s: &str) -> Vec<&str> {
    if s.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_space = s.chars().next().map_or(false, |c| c.is_whitespace());
    for (i, c) in s.char_indices() {
        let is_space = c.is_whitespace();
        if is_space != in_space {
            out.push(&s[start..i]);
            start = i;
            in_space = is_space;
        }
    }
    out.push(&s[start..]);
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use csl::{InMemoryLocaleProvider, Locale};

    fn provider() -> InMemoryLocaleProvider {
        InMemoryLocaleProvider::new(Locale::new(None))
    }

    #[test]
    fn empty_children_suppress_affixes() {
        let r = Result {
            tag: "group",
            children: vec![ResultNode::Text(TextRun::empty())],
            prefix: "(".into(),
            suffix: ")".into(),
            ..Default::default()
        };
        let p = provider();
        let composed = r.to_composed_run(&p, None, true);
        assert!(composed.empty);
        assert_eq!(composed.prefix, "");
        assert_eq!(composed.suffix, "");
    }

    #[test]
    fn non_empty_keeps_affixes() {
        let r = Result {
            tag: "group",
            children: vec![ResultNode::Text(TextRun::new("x", true))],
            prefix: "(".into(),
            suffix: ")".into(),
            ..Default::default()
        };
        let p = provider();
        let composed = r.to_composed_run(&p, None, true);
        assert!(!composed.empty);
        assert!(composed.by_variable);
        assert_eq!(composed.prefix, "(");
        assert_eq!(composed.suffix, ")");
    }

    #[test]
    fn delimiter_only_between_non_empty() {
        let runs = vec![
            Run::Text(TextRun::empty()),
            Run::Text(TextRun::literal("a")),
            Run::Text(TextRun::empty()),
            Run::Text(TextRun::literal("b")),
        ];
        let out = interleave_delimiter(runs, ", ", Formatting::default());
        let texts: Vec<&str> = out
            .iter()
            .map(|r| match r {
                Run::Text(t) => t.text.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(texts, vec!["", "a", ", ", "", "b"]);
    }

    #[test]
    fn title_case_lowercases_minor_words_except_first() {
        let mut runs = vec![Run::Text(TextRun::literal("the lord of the rings"))];
        apply_text_case(&mut runs, TextCase::Title, true, &mut WordState::default());
        match &runs[0] {
            Run::Text(t) => assert_eq!(t.text, "The Lord of the Rings"),
            _ => panic!(),
        }
    }

    #[test]
    fn compose_joined_interleaves_and_wraps_affixes() {
        let p = provider();
        let children = vec![
            Run::Text(TextRun::new("March", true)),
            Run::Text(TextRun::new("1999", true)),
        ];
        let composed = compose_joined(
            "date",
            children,
            " ",
            Formatting::default(),
            "(".into(),
            ")".into(),
            None,
            false,
            true,
            &p,
            None,
        );
        assert_eq!(Run::Composed(composed).plain_text(), "(March 1999)");
    }

    #[test]
    fn sentence_case_only_capitalizes_first_word() {
        let mut runs = vec![Run::Text(TextRun::literal("THE LORD OF THE RINGS"))];
        apply_text_case(&mut runs, TextCase::Sentence, true, &mut WordState::default());
        match &runs[0] {
            Run::Text(t) => assert_eq!(t.text, "The lord of the rings"),
            _ => panic!(),
        }
    }

    #[test]
    fn composed_run_serializes_to_json() {
        let p = provider();
        let children = vec![Run::Text(TextRun::new("1999", true))];
        let composed = compose_joined(
            "date",
            children,
            "",
            Formatting::default(),
            String::new(),
            String::new(),
            None,
            false,
            true,
            &p,
            None,
        );
        let json = serde_json::to_string(&composed).unwrap();
        assert!(json.contains("\"1999\""));
        assert!(json.contains("\"tag\":\"date\""));
    }
}
