// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Item data accessors (the Variable Model, spec.md §4.3) and the
//! in-memory rendered-run tree (spec.md §4.4), for a CSL 1.0.1 processor
//! core. See the workspace `SPEC_FULL.md` §2.

pub mod date;
pub mod names;
pub mod numeric;
pub mod output;
pub mod reference;
pub mod value;

pub use date::{DateOrRange, DateParts, DatePrecision, Season};
pub use names::{Name, NameOrLiteral};
pub use numeric::{parse_number_var, NumberVar, NumericSeparator};
pub use output::{compose_finalized, compose_joined, interleave_delimiter, ComposedRun, Result, ResultNode, Run, TextRun};
pub use reference::Reference;
pub use value::Value;

/// Small-string alias used for short, high-churn strings (name parts,
/// delimiters).
pub type SmartString = smartstring::alias::String;
