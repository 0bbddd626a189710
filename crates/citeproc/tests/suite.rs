// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! End-to-end `generate_bibliography`/`generate_citation` round trips
//! (spec.md §8 "Scenarios", SPEC_FULL.md §4.11).

use citeproc::{generate_bibliography, generate_citation, InMemoryLocaleProvider, Locale, Reference};
use csl::{
    AndType, CslType, DelimiterPrecedes, Element, Formatting, Layout, NameOptions, NameVariable,
    NumberVariable, Sort, SortKey, StandardVariable, Style, Variable,
};
use citeproc_io::{Name, NameOrLiteral};

fn provider() -> InMemoryLocaleProvider {
    InMemoryLocaleProvider::new(Locale::new(None))
}

fn author_names(families: &[&str]) -> Vec<NameOrLiteral> {
    families
        .iter()
        .map(|f| {
            NameOrLiteral::Name(Name {
                family: Some((*f).to_string()),
                ..Default::default()
            })
        })
        .collect()
}

#[test]
fn et_al_truncates_per_scenario_4() {
    let options = NameOptions {
        et_al_min: 3,
        et_al_use_first: 1,
        and: Some(AndType::Text),
        delimiter_precedes_et_al: DelimiterPrecedes::Contextual,
        name_delimiter: ", ".to_string(),
        ..NameOptions::default()
    };
    let layout = Layout {
        elements: vec![Element::Names {
            variables: vec![NameVariable::Author],
            options,
            label: None,
            substitute: Vec::new(),
            formatting: Formatting::default(),
            prefix: String::new(),
            suffix: String::new(),
            delimiter: String::new(),
        }],
        delimiter: String::new(),
        formatting: Formatting::default(),
        prefix: String::new(),
        suffix: String::new(),
    };
    let mut style = Style::default();
    style.bibliography_layout = Some(layout);

    let r = Reference::new("r1", CslType("book")).with_names("author", author_names(&["Smith", "Jones", "Brown", "Green"]));
    let p = provider();
    let out = generate_bibliography(&style, &[r], &p, "en-US", false, |a, b| a.cmp(b)).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].plain_text(), "Smith et al.");
}

#[test]
fn group_with_missing_only_variable_is_suppressed_per_scenario_6() {
    let layout = Layout {
        elements: vec![Element::Group {
            children: vec![
                Element::TextValue {
                    value: "p. ".to_string(),
                    formatting: Formatting::default(),
                    prefix: String::new(),
                    suffix: String::new(),
                    text_case: None,
                },
                Element::TextVariable {
                    variable: StandardVariable::Number(NumberVariable::Page),
                    formatting: Formatting::default(),
                    prefix: String::new(),
                    suffix: String::new(),
                    text_case: None,
                    quotes: false,
                },
            ],
            delimiter: String::new(),
            formatting: Formatting::default(),
            prefix: String::new(),
            suffix: String::new(),
        }],
        delimiter: String::new(),
        formatting: Formatting::default(),
        prefix: String::new(),
        suffix: String::new(),
    };
    let mut style = Style::default();
    style.bibliography_layout = Some(layout);

    let r = Reference::new("r1", CslType("book"));
    let p = provider();
    let out = generate_bibliography(&style, &[r], &p, "en-US", false, |a, b| a.cmp(b)).unwrap();
    assert_eq!(out[0].plain_text(), "");
}

#[test]
fn bibliography_and_citation_round_trip_sorted_by_title() {
    let layout = Layout {
        elements: vec![Element::TextVariable {
            variable: StandardVariable::Ordinary(Variable::Title),
            formatting: Formatting::default(),
            prefix: String::new(),
            suffix: String::new(),
            text_case: None,
            quotes: false,
        }],
        delimiter: String::new(),
        formatting: Formatting::default(),
        prefix: String::new(),
        suffix: String::new(),
    };
    let mut style = Style::default();
    style.bibliography_layout = Some(layout.clone());
    style.citation_layout = Some(layout);
    style.bibliography_sort = Sort {
        keys: vec![SortKey::Variable(csl::AnyVariable::Ordinary(Variable::Title))],
    };
    style.citation_sort = style.bibliography_sort.clone();

    let items = vec![
        Reference::new("b", CslType("book")).with_text("title", "Banana"),
        Reference::new("a", CslType("book")).with_text("title", "Apple"),
    ];
    let p = provider();

    let bib = generate_bibliography(&style, &items, &p, "en-US", false, |a, b| a.cmp(b)).unwrap();
    let bib_text: Vec<_> = bib.iter().map(|c| c.plain_text()).collect();
    assert_eq!(bib_text, vec!["Apple".to_string(), "Banana".to_string()]);

    let citation = generate_citation(&style, &items, &p, "en-US", false, "; ", |a, b| a.cmp(b))
        .unwrap()
        .unwrap();
    assert_eq!(citation.plain_text(), "Apple; Banana");
}
