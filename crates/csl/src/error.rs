// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors raised by the (external, out-of-scope) style compiler, modeled
//! here only so the orchestrator's error enum can be exhaustive over them
//! (spec.md §7). This crate never constructs these itself.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("style must declare exactly one independent style, found {count}")]
    NotOneIndependentStyle { count: usize },
    #[error("dependent style references independent id {referenced:?} which does not match {found:?}")]
    DependentIdMismatch {
        referenced: String,
        found: String,
    },
}
