// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Top-level error type (spec.md §7, SPEC_FULL.md §4.0/§7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessorError {
    /// Fatal at call start if the invariant locale is missing
    /// (spec.md §7). [`csl::InMemoryLocaleProvider`] can only be built with
    /// a root locale already in hand, so this crate never constructs this
    /// variant itself; it exists so callers implementing their own provider
    /// still get an exhaustive error vocabulary.
    #[error("no locale data available for {lang}, and no invariant locale was provided")]
    LocaleNotFound { lang: String },

    #[error(transparent)]
    Render(#[from] citeproc_proc::RenderError),

    /// Raised by the external style compiler (out of scope for this
    /// crate, spec.md §1); never constructed here.
    #[error(transparent)]
    StyleCompile(#[from] csl::StyleError),
}
