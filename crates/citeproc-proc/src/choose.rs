// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `cs:choose` evaluation (spec.md §4.5): walk `cs:if`/`cs:else-if`
//! branches in order and render the first one whose conditions match, or
//! `cs:else` if none do.
//!
//! Grounded on `crates/proc/src/choose.rs`'s `eval_conditions`/
//! `eval_condset`/`run_matcher`, with the `RefContext`/disambiguation
//! paths (`Cond::HasYearOnly` etc., `CondChecker::is_disambiguate`'s
//! incrementing counter) dropped, since this core renders one cite
//! against one fixed [`RenderContext`] rather than walking an arena
//! twice under a disambiguation search (spec.md §1 Non-goals).

use crate::context::RenderContext;
use csl::{Cond, Conditions, Element, IfThen, Match};

/// Picks the elements to render for a `cs:choose`: the first `cs:if`/
/// `cs:else-if` branch whose conditions match, or `else_elements` if none
/// do (spec.md §4.5).
pub fn select<'e>(ifthens: &'e [IfThen], else_elements: &'e [Element], ctx: &RenderContext) -> &'e [Element] {
    for (i, branch) in ifthens.iter().enumerate() {
        if eval_conditions(&branch.conditions, ctx) {
            log::debug!("choose: branch {} matched", i);
            return &branch.elements;
        }
    }
    log::debug!("choose: falling through to else");
    else_elements
}

/// Evaluates one `cs:if`/`cs:else-if`'s condition set against `ctx`.
pub fn eval_conditions(conditions: &Conditions, ctx: &RenderContext) -> bool {
    let mut tests = conditions.conds.iter().map(|c| eval_cond(c, ctx));
    run_matcher(&mut tests, conditions.match_type)
}

fn run_matcher<I: Iterator<Item = bool>>(bools: &mut I, match_type: Match) -> bool {
    match match_type {
        Match::Any => bools.any(|b| b),
        Match::All => bools.all(|b| b),
        Match::None => bools.all(|b| !b),
    }
}

fn eval_cond(cond: &Cond, ctx: &RenderContext) -> bool {
    match cond {
        Cond::Variable(var) => ctx.has_variable(*var),
        Cond::IsNumeric(var) => ctx.is_numeric(*var),
        Cond::IsUncertainDate(dvar) => ctx.is_uncertain_date(*dvar),
        Cond::Type(typ) => ctx.csl_type() == Some(*typ),
        Cond::Locator(typ) => ctx.locator_type() == Some(*typ),
        Cond::Position(pos) => ctx.position().map_or(false, |p| p.matches(*pos)),
        Cond::Disambiguate(d) => *d == ctx.is_disambiguate(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::context::CiteProperties;
    use citeproc_io::Reference;
    use csl::variables::{AnyVariable, Variable};
    use csl::CslType;

    #[test]
    fn all_matcher_requires_every_cond() {
        let r = Reference::new("r1", CslType("book")).with_text("title", "X");
        let ctx = RenderContext::new(&r, CiteProperties::default());
        let conds = Conditions {
            match_type: Match::All,
            conds: vec![
                Cond::Variable(AnyVariable::Ordinary(Variable::Title)),
                Cond::Type(CslType("article")),
            ],
        };
        assert!(!eval_conditions(&conds, &ctx));
    }

    #[test]
    fn any_matcher_needs_one_cond() {
        let r = Reference::new("r1", CslType("book")).with_text("title", "X");
        let ctx = RenderContext::new(&r, CiteProperties::default());
        let conds = Conditions {
            match_type: Match::Any,
            conds: vec![
                Cond::Variable(AnyVariable::Ordinary(Variable::Title)),
                Cond::Type(CslType("article")),
            ],
        };
        assert!(eval_conditions(&conds, &ctx));
    }

    #[test]
    fn select_falls_through_to_else() {
        let _ = env_logger::try_init();
        let r = Reference::new("r1", CslType("book"));
        let ctx = RenderContext::new(&r, CiteProperties::default());
        let branches = vec![IfThen {
            conditions: Conditions {
                match_type: Match::Any,
                conds: vec![Cond::Variable(AnyVariable::Ordinary(Variable::Title))],
            },
            elements: vec![],
        }];
        let else_elements = vec![csl::Element::TextValue {
            value: "fallback".into(),
            formatting: Default::default(),
            prefix: String::new(),
            suffix: String::new(),
            text_case: None,
        }];
        let picked = select(&branches, &else_elements, &ctx);
        assert_eq!(picked.len(), 1);
    }

    #[test]
    fn none_matcher_inverts_all() {
        let r = Reference::new("r1", CslType("book"));
        let ctx = RenderContext::new(&r, CiteProperties::default());
        let conds = Conditions {
            match_type: Match::None,
            conds: vec![Cond::Variable(AnyVariable::Ordinary(Variable::Title))],
        };
        assert!(eval_conditions(&conds, &ctx));
    }
}
