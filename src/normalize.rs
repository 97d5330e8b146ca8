use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::special::{mask_all, LINE_BREAK};

static MATH_WIDGET_GAP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__MATH__[\t ]*__WIDGET__").expect("math widget gap regex"));

// Greedy on purpose: `**a** and **b**` strips the outermost pair only. `.` stops at line breaks.
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*)\*\*").expect("bold regex"));

/// Canonical grouping key for an English string.
///
/// Special substrings become placeholders, bold markers are dropped and every paragraph is
/// trimmed, so strings that differ only in embedded math, graphies, widgets or cosmetic
/// whitespace share a key.
pub fn normalize_string(text: &str) -> String {
    let masked = mask_all(text);
    let masked = MATH_WIDGET_GAP_RE.replace_all(&masked, "__MATH__ __WIDGET__");
    let unbolded = BOLD_RE.replace_all(&masked, "$1");
    unbolded
        .split(LINE_BREAK)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

/// Buckets items by the normalized form of their English string.
///
/// Keys keep first-seen order and items keep input order inside a bucket.
pub fn group_by<'a, T, F>(items: &'a [T], get_english: F) -> IndexMap<String, Vec<&'a T>>
where
    F: Fn(&T) -> &str,
{
    let mut groups: IndexMap<String, Vec<&'a T>> = IndexMap::new();
    for item in items {
        let key = normalize_string(get_english(item));
        groups.entry(key).or_default().push(item);
    }
    groups
}

/// [`group_by`] for items that are themselves the English string.
pub fn group<T: AsRef<str>>(items: &[T]) -> IndexMap<String, Vec<&T>> {
    group_by(items, |item| item.as_ref())
}
