// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Per-cite rendering context: the reference being rendered plus the
//! handful of facts about its citing context that `cs:choose` can test
//! (spec.md §4.5, §3 "Position"/"Locator"). Grounded on
//! `crates/proc/src/cite_context.rs`'s `CiteContext`, with the
//! salsa-query plumbing and disambiguation counters stripped out --
//! `disambiguate="true"` is given a fixed answer up front rather than
//! incrementally discovered (citation disambiguation is a Non-goal,
//! spec.md §1).

use citeproc_io::{DateOrRange, Reference};
use csl::{AnyVariable, CslType, DateVariable, LocatorType, Position};

/// Everything a `cs:choose` condition or a variable lookup needs to know
/// about the cite currently being rendered, beyond the `Reference`
/// itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct CiteProperties {
    pub position: Option<Position>,
    pub locator_type: Option<LocatorType>,
    /// Fixed per render call; this core does not discover disambiguation
    /// need incrementally (spec.md §1 Non-goals).
    pub disambiguate: bool,
}

/// One cite's full render context: its [`Reference`] plus [`CiteProperties`].
pub struct RenderContext<'r> {
    pub reference: &'r Reference,
    pub props: CiteProperties,
}

impl<'r> RenderContext<'r> {
    pub fn new(reference: &'r Reference, props: CiteProperties) -> Self {
        RenderContext { reference, props }
    }

    pub fn has_variable(&self, var: AnyVariable) -> bool {
        match var {
            AnyVariable::Ordinary(v) => self.reference.get(&v.to_string()).is_some(),
            AnyVariable::Number(v) => self.reference.get(&v.to_string()).is_some(),
            AnyVariable::Date(v) => self.reference.get_as_date(&v.to_string()).is_some(),
            AnyVariable::Name(v) => self
                .reference
                .get_as_names(&v.to_string())
                .map_or(false, |names| !names.is_empty()),
        }
    }

    pub fn is_numeric(&self, var: AnyVariable) -> bool {
        match var {
            AnyVariable::Number(v) => self.reference.get_as_number(&v.to_string()).is_some(),
            _ => false,
        }
    }

    pub fn csl_type(&self) -> Option<CslType> {
        self.reference.csl_type
    }

    pub fn locator_type(&self) -> Option<LocatorType> {
        self.props.locator_type
    }

    pub fn position(&self) -> Option<Position> {
        self.props.position
    }

    pub fn is_disambiguate(&self) -> bool {
        self.props.disambiguate
    }

    fn get_date(&self, dvar: DateVariable) -> Option<&DateOrRange> {
        self.reference.get_as_date(&dvar.to_string())
    }

    pub fn is_uncertain_date(&self, dvar: DateVariable) -> bool {
        self.get_date(dvar).map_or(false, DateOrRange::is_uncertain_date)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use csl::variables::{NameVariable, Variable};

    #[test]
    fn has_variable_checks_each_vocabulary() {
        let r = Reference::new("r1", CslType("book")).with_text("title", "Foo");
        let ctx = RenderContext::new(&r, CiteProperties::default());
        assert!(ctx.has_variable(AnyVariable::Ordinary(Variable::Title)));
        assert!(!ctx.has_variable(AnyVariable::Name(NameVariable::Author)));
    }
}
