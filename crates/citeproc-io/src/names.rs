// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `Name`/`NameOrLiteral` (spec.md §3 "NameOrLiteral"). Grounded on
//! `crates/io/src/names.rs`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Name {
    pub family: Option<String>,
    pub given: Option<String>,
    pub dropping_particle: Option<String>,
    pub non_dropping_particle: Option<String>,
    pub suffix: Option<String>,
    pub precede_suffix_by_comma: bool,
}

impl Name {
    /// Plain-text stringification shared by sort-key generation
    /// (spec.md §4.11) and by the editor/translator equality check used
    /// to merge name lists (spec.md §4.9).
    pub fn sort_string(&self) -> String {
        let parts = [
            self.family.as_deref(),
            self.given.as_deref(),
            self.dropping_particle.as_deref(),
            self.non_dropping_particle.as_deref(),
            self.suffix.as_deref(),
        ];
        parts
            .iter()
            .filter_map(|p| p.filter(|s| !s.is_empty()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameOrLiteral {
    Literal(String),
    Name(Name),
}

impl NameOrLiteral {
    pub fn sort_string(&self) -> String {
        match self {
            NameOrLiteral::Literal(s) => s.clone(),
            NameOrLiteral::Name(n) => n.sort_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sort_string_skips_empty_parts() {
        let n = Name {
            family: Some("Smith".into()),
            given: Some("John".into()),
            ..Default::default()
        };
        assert_eq!(n.sort_string(), "Smith John");
    }
}
