// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The CSL 1.0.1 rendering tree-walker (spec.md §4): per-`cs:*`-element
//! renderers plus the group/choose suppression and sort-key layers tying
//! them together. See the workspace `SPEC_FULL.md` §2 for how this crate
//! fits among the others.

pub mod choose;
pub mod context;
pub mod date;
pub mod element;
pub mod error;
pub mod group;
pub mod names;
pub mod number;
pub mod page_range;
pub mod params;
pub mod sort;

pub use context::{CiteProperties, RenderContext};
pub use element::{render_element, render_elements};
pub use error::{RenderError, RenderResult};
pub use group::GroupVars;
pub use params::Parameters;
