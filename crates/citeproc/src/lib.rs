// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Top-Level Orchestrator (spec.md §4.1): `generate_bibliography` and
//! `generate_citation`, the two entry points a caller of this workspace
//! actually reaches for. See the workspace `SPEC_FULL.md` §2 for how this
//! crate fits among the others -- it is the only one that depends on all
//! of `csl`, `citeproc-io`, and `citeproc-proc`.

pub mod error;
pub mod processor;

pub use error::ProcessorError;
pub use processor::{generate_bibliography, generate_citation};

// Re-exported so a caller can build an `InMemoryLocaleProvider` and the
// `Style`/`Reference` values these entry points need without depending on
// `csl`/`citeproc-io` directly (spec.md §4.2's provider lives in `csl`;
// see `DESIGN.md` for why, despite SPEC_FULL.md naming this module
// `citeproc::locale`).
pub use csl::{InMemoryLocaleProvider, Lang, Locale, LocaleProvider};
pub use citeproc_io::Reference;
