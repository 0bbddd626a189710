// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Inherited formatting parameters threaded down the render tree
//! (spec.md §3 "Parameters", "Lifecycles": "Parameters... flow down by
//! value... each rendering element may produce a derived child
//! Parameters"). Grounded on `crates/proc/src/cite_context.rs`'s threaded
//! name-options/formatting state -- kept a cheap-to-clone record rather
//! than a persistent stack, per Design Notes §9.

use csl::{Formatting, NameOptions};

#[derive(Debug, Clone)]
pub struct Parameters {
    pub formatting: Formatting,
    pub names: NameOptions,
    /// `cs:group`/`cs:names` delimiter currently in scope, used by
    /// `cs:choose`'s "choose DOES inherit delimiters" rule
    /// (`crates/proc/src/choose.rs`).
    pub inherited_delimiter: String,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            formatting: Formatting::default(),
            names: NameOptions::default(),
            inherited_delimiter: String::new(),
        }
    }
}

impl Parameters {
    /// Produces a child `Parameters` with this element's own formatting
    /// merged in field-by-field (spec.md §3 "formatting: ... (inherited
    /// down)").
    pub fn with_formatting(&self, child: Formatting) -> Parameters {
        Parameters {
            formatting: self.formatting.inherit(child),
            ..self.clone()
        }
    }

    pub fn with_names(&self, names: NameOptions) -> Parameters {
        Parameters {
            names,
            ..self.clone()
        }
    }

    pub fn with_delimiter(&self, delimiter: impl Into<String>) -> Parameters {
        Parameters {
            inherited_delimiter: delimiter.into(),
            ..self.clone()
        }
    }
}
