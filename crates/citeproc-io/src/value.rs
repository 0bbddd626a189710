// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `Value`, the tagged sum replacing the runtime `object`/`is` checks the
//! source implementation did (Design Notes): one enum, matched
//! exhaustively everywhere a variable's kind matters.

use crate::date::DateOrRange;
use crate::names::NameOrLiteral;
use crate::numeric::NumberVar;
use serde::{Deserialize, Serialize};

/// spec.md §3 "Value": the tagged sum every item-data accessor ultimately
/// returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Number(NumberVar),
    Date(DateOrRange),
    Names(Vec<NameOrLiteral>),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<NumberVar> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => crate::numeric::parse_number_var(s),
            _ => None,
        }
    }

    pub fn as_names(&self) -> Option<&[NameOrLiteral]> {
        match self {
            Value::Names(ns) => Some(ns.as_slice()),
            _ => None,
        }
    }
}
