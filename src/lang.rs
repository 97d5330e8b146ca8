//! Language-specific notation inside math spans.
//!
//! Only Portuguese differs today: it writes the sine as `\operatorname{sen}`. New languages get a
//! match arm in both [`translate_math`] and [`math_equivalent`].

use std::borrow::Cow;

const SIN: &str = r"\sin";
const SEN: &str = r"\operatorname{sen}";

/// Rewrites English math notation for `lang`.
pub fn translate_math<'a>(math: &'a str, lang: &str) -> Cow<'a, str> {
    match lang {
        "pt" => replace_command(math, SIN, SEN),
        _ => Cow::Borrowed(math),
    }
}

/// Rewrites translated math back to English notation so it can be compared with the source.
///
/// For math without a literal `\operatorname{sen}`, `math_equivalent(translate_math(m))` is `m`.
pub fn math_equivalent<'a>(math: &'a str, lang: &str) -> Cow<'a, str> {
    match lang {
        "pt" => replace_command(math, SEN, SIN),
        _ => Cow::Borrowed(math),
    }
}

fn ends_in_letter(s: &str) -> bool {
    s.chars().next_back().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Replaces the LaTeX command `command` with `replacement`.
///
/// A command ending in a letter only matches as a whole control word, so `\sin` leaves `\sinh`
/// alone. A replacement ending in a letter is kept apart from a following letter with a space
/// (`\operatorname{sen}x` becomes `\sin x`).
fn replace_command<'a>(text: &'a str, command: &str, replacement: &str) -> Cow<'a, str> {
    if !text.contains(command) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + replacement.len());
    let mut pos = 0usize;
    for (start, _) in text.match_indices(command) {
        let end = start + command.len();
        let letter_follows = text[end..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic());
        if letter_follows && ends_in_letter(command) {
            continue;
        }
        out.push_str(&text[pos..start]);
        out.push_str(replacement);
        if letter_follows && ends_in_letter(replacement) {
            out.push(' ');
        }
        pos = end;
    }
    out.push_str(&text[pos..]);
    Cow::Owned(out)
}
