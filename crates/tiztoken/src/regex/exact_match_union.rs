//! Exact Match Union Patterns

use crate::regex::regex_wrapper::RegexWrapperPattern;

/// Create a union pattern of exact matches.
///
/// Alternatives are ordered longest first, so that when one literal
/// is a prefix of another the longer one wins at a given position.
///
/// This will always be a [`RegexWrapperPattern::Basic`] variant.
///
/// ## Arguments
/// * `alts` - A slice of string-like alternatives to union.
///
/// ## Returns
/// A new `RegexWrapperPattern::Basic` containing the union pattern.
pub fn exact_match_union_regex_pattern<S: AsRef<str>>(alts: &[S]) -> RegexWrapperPattern {
    let mut alts: Vec<&str> = alts.iter().map(|s| s.as_ref()).collect();
    alts.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    alts.dedup();

    let parts = alts
        .into_iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>();
    RegexWrapperPattern::Basic(format!("({})", parts.join("|")))
}
