// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Given-name initialization (spec.md §4.9 "Initialization of Given
//! Names"). Grounded on `crates/proc/src/names/initials.rs`'s
//! token-by-token builder, re-expressed against spec.md's simpler
//! split-on-space-and-period rule rather than a full `nom` grammar (which
//! also detects already-abbreviated tokens and particle-like lowercase
//! words -- neither of which spec.md's algorithm asks for).

/// Splits a given name into space/period-delimited tokens, per spec.md's
/// "split given name on space and period".
fn tokenize(given_name: &str) -> impl Iterator<Item = &str> {
    given_name.split(|c: char| c == ' ' || c == '.').filter(|t| !t.is_empty())
}

fn compound_segments(token: &str) -> Vec<&str> {
    token.split(|c: char| c == '-' || c == '_' || c == '\u{2013}').filter(|s| !s.is_empty()).collect()
}

fn push_initial(out: &mut String, segment: &str, with: &str) {
    if let Some(c) = segment.chars().next() {
        out.extend(c.to_uppercase());
    }
    out.push_str(with);
}

/// spec.md §4.9 "Initialization of Given Names". `with` is `None` when
/// `initialize_with` isn't set on the style, in which case the given
/// name passes through unchanged.
pub fn initialize(given_name: &str, initialize: bool, with: Option<&str>, initialize_with_hyphen: bool) -> String {
    let Some(with) = with else {
        return given_name.to_string();
    };
    let mut out = String::new();
    for token in tokenize(given_name) {
        let mut chars = token.chars();
        let first = chars.next();
        let is_single_char = first.is_some() && chars.next().is_none();
        if is_single_char {
            push_initial(&mut out, token, with);
            continue;
        }
        if !initialize {
            out.push_str(token);
            out.push(' ');
            continue;
        }
        let segments = compound_segments(token);
        if initialize_with_hyphen && segments.len() > 1 {
            let trimmed = with.trim_end();
            for (i, seg) in segments.iter().enumerate() {
                if i > 0 {
                    out.push_str(trimmed);
                    out.push('-');
                }
                if let Some(c) = seg.chars().next() {
                    out.extend(c.to_uppercase());
                }
            }
            out.push_str(with);
        } else {
            for seg in &segments {
                push_initial(&mut out, seg, with);
            }
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_letter_tokens_always_get_an_initial() {
        assert_eq!(initialize("R L", true, Some("."), true), "R.L.");
    }

    #[test]
    fn full_given_name_reduces_to_initials() {
        assert_eq!(initialize("John R L", true, Some(". "), true), "J. R. L.");
    }

    #[test]
    fn hyphenated_compound_joins_with_hyphen_when_enabled() {
        assert_eq!(initialize("Jean-Luc K", true, Some("."), true), "J.-L.K.");
    }

    #[test]
    fn hyphenated_compound_has_no_hyphen_when_disabled() {
        assert_eq!(initialize("Jean-Luc K", true, Some(""), false), "JLK");
    }

    #[test]
    fn uninitialized_keeps_longer_tokens_whole_but_still_initials_single_letters() {
        assert_eq!(initialize("John R.L.", false, Some("."), true), "John R.L.");
    }

    #[test]
    fn no_initialize_with_term_passes_through() {
        assert_eq!(initialize("Jean-Luc", true, None, true), "Jean-Luc");
    }
}
