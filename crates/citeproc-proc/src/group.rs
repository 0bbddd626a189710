// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `cs:group`'s implicit suppression rule (spec.md §4.5, §8 invariant 2).
//!
//! Grounded on `crates/proc/src/group.rs`'s `GroupVars` fold, with the
//! `Unresolved`/`UnresolvedMissing`/`UnresolvedPlain` states dropped --
//! those only serve citation disambiguation (`disambiguate="true"`
//! conditionals whose truth value isn't known yet), which is an explicit
//! Non-goal here (spec.md §1).

/// Tracks, for one `cs:group` subtree, whether any by-variable descendant
/// was consulted and whether it actually rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GroupVars {
    /// No by-variable descendant has been seen yet (e.g. only literal
    /// `<text value>` children so far).
    Plain,
    /// At least one by-variable descendant was seen, and it rendered
    /// empty.
    Missing,
    /// At least one by-variable descendant was seen, and it rendered
    /// non-empty.
    Important,
}

impl Default for GroupVars {
    fn default() -> Self {
        GroupVars::Plain
    }
}

impl GroupVars {
    pub fn new() -> Self {
        GroupVars::Plain
    }

    /// A child Result/element that consulted a variable: `rendered` says
    /// whether that lookup produced non-empty content.
    pub fn rendered_if(rendered: bool) -> Self {
        if rendered {
            GroupVars::Important
        } else {
            GroupVars::Missing
        }
    }

    /// Folds this child's `GroupVars` with a sibling's, left to right
    /// (spec.md §4.5: suppression depends on *every* by-variable
    /// descendant being empty, so one `Important` sibling is enough to
    /// save the whole group).
    pub fn neighbour(self, other: Self) -> Self {
        use GroupVars::*;
        match (self, other) {
            (Important, _) | (_, Important) => Important,
            (Missing, _) | (_, Missing) => Missing,
            (Plain, Plain) => Plain,
        }
    }

    /// spec.md §4.5: "A group that has no by-variable descendants is
    /// never suppressed by this rule" -- folding children left this at
    /// `Plain` means nobody ever consulted a variable, so the group
    /// renders regardless of its (non-variable) content being empty.
    pub fn should_suppress(self) -> bool {
        self == GroupVars::Missing
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use GroupVars::*;

    fn fold(vs: &[GroupVars]) -> GroupVars {
        vs.iter().fold(GroupVars::Plain, |a, b| a.neighbour(*b))
    }

    #[test]
    fn plain_only_group_is_never_suppressed() {
        assert_eq!(fold(&[Plain, Plain, Plain]), Plain);
        assert!(!fold(&[Plain, Plain]).should_suppress());
    }

    #[test]
    fn one_important_saves_the_group() {
        assert_eq!(fold(&[Plain, Missing, Important]), Important);
        assert!(!fold(&[Plain, Missing, Important]).should_suppress());
    }

    #[test]
    fn all_by_variable_missing_suppresses() {
        assert_eq!(fold(&[Plain, Missing]), Missing);
        assert!(fold(&[Plain, Missing]).should_suppress());
    }
}
