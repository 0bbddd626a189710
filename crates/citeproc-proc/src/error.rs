// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rendering errors (spec.md §7, SPEC_FULL.md §4.0). A missing variable
//! is never one of these -- it silently yields empty output (spec.md §7).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("variable {variable:?} was expected to be {expected} but was not")]
    UnsupportedValueType {
        expected: &'static str,
        variable: String,
    },
    #[error("locale {locale:?} cannot satisfy format {format:?}")]
    UnsupportedFormat { format: String, locale: String },
    #[error("macro {macro_name:?} is part of a reference cycle")]
    CycleDetected { macro_name: String },
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;
