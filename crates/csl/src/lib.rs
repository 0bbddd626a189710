// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Vocabulary, locale, and compiled-style data types for a CSL 1.0.1
//! processor core. See the workspace `SPEC_FULL.md` §2 for how this crate
//! fits among the others.

pub mod error;
pub mod locale;
pub mod style;
pub mod terms;
pub mod variables;

pub use error::StyleError;
pub use locale::{DateForm, DatePartFormat, DatePartName, InMemoryLocaleProvider, Lang, Locale, LocaleDatePart, LocaleOptions, LocaleProvider, Quotes};
pub use style::*;
pub use terms::{Gender, TermForm, TermName, TermSelector};
pub use variables::{AnyVariable, DateVariable, NameVariable, NumberVariable, StandardVariable, Variable};
