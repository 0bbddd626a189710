// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `Reference`: the Item Data Provider implementation this crate ships
//! (spec.md §6.1, §4.3). Grounded on `crates/io/src/reference.rs`'s
//! accessor methods.

use crate::date::DateOrRange;
use crate::names::NameOrLiteral;
use crate::numeric::NumberVar;
use crate::value::Value;
use csl::CslType;
use fnv::FnvHashMap;

/// A bibliographic item. Opaque to the rendering core beyond the four
/// accessor methods (spec.md §3 "Item (external)").
#[derive(Debug, Clone, Default)]
pub struct Reference {
    pub id: String,
    pub csl_type: Option<CslType>,
    pub fields: FnvHashMap<String, Value>,
}

impl Reference {
    pub fn new(id: impl Into<String>, csl_type: CslType) -> Self {
        Reference {
            id: id.into(),
            csl_type: Some(csl_type),
            fields: FnvHashMap::default(),
        }
    }

    pub fn with_text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.insert(name.to_string(), Value::Text(value.into()));
        self
    }

    pub fn with_number(mut self, name: &str, value: NumberVar) -> Self {
        self.fields.insert(name.to_string(), Value::Number(value));
        self
    }

    pub fn with_date(mut self, name: &str, value: DateOrRange) -> Self {
        self.fields.insert(name.to_string(), Value::Date(value));
        self
    }

    pub fn with_names(mut self, name: &str, value: Vec<NameOrLiteral>) -> Self {
        self.fields.insert(name.to_string(), Value::Names(value));
        self
    }

    /// spec.md §4.3: "A request for `<var>-short` is honored by
    /// returning that variant when present; otherwise the full variable
    /// is returned." Only `get`/`get_as_number` honor the `-short` suffix
    /// convention; `get_as_date`/`get_as_names` variables don't have
    /// short forms in CSL.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn get_preferring_short(&self, name: &str) -> Option<&Value> {
        let short = format!("{}-short", name);
        self.fields.get(&short).or_else(|| self.fields.get(name))
    }

    pub fn get_as_number(&self, name: &str) -> Option<NumberVar> {
        self.get_preferring_short(name).and_then(Value::as_number)
    }

    pub fn get_as_date(&self, name: &str) -> Option<&DateOrRange> {
        match self.fields.get(name) {
            Some(Value::Date(d)) => Some(d),
            _ => None,
        }
    }

    pub fn get_as_names(&self, name: &str) -> Option<&[NameOrLiteral]> {
        self.fields.get(name).and_then(Value::as_names)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn short_form_preferred_when_present() {
        let r = Reference::new("ref1", CslType("book"))
            .with_text("container-title", "Long Title")
            .with_text("container-title-short", "LT");
        match r.get_preferring_short("container-title") {
            Some(Value::Text(s)) => assert_eq!(s, "LT"),
            _ => panic!("expected short form"),
        }
    }

    #[test]
    fn falls_back_to_full_when_no_short() {
        let r = Reference::new("ref1", CslType("book")).with_text("title", "Full Title");
        match r.get_preferring_short("title") {
            Some(Value::Text(s)) => assert_eq!(s, "Full Title"),
            _ => panic!("expected full form"),
        }
    }

    #[test]
    fn missing_variable_is_none() {
        let r = Reference::new("ref1", CslType("book"));
        assert!(r.get("title").is_none());
    }
}
