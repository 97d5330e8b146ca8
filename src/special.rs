use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

pub const MATH: &str = "__MATH__";
pub const GRAPHIE: &str = "__GRAPHIE__";
pub const WIDGET: &str = "__WIDGET__";

/// Paragraph separator shared by English strings and translations.
pub const LINE_BREAK: &str = "\n\n";

// `\$` inside a math span is a literal dollar, not a delimiter.
static MATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(?:\\\$|[^$])*\$").expect("math regex"));

static GRAPHIE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[\]\([^)]+\)").expect("graphie regex"));

static WIDGET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[\x{2603}[^\]]+\]\]").expect("widget regex"));

pub static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__MATH__|__GRAPHIE__|__WIDGET__").expect("placeholder regex"));

/// The closed set of substrings that are carried over verbatim instead of translated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    Math,
    Graphie,
    Widget,
}

impl SpecialKind {
    /// Replacement order used by normalization and template building.
    pub const ALL: [SpecialKind; 3] = [Self::Math, Self::Graphie, Self::Widget];

    pub fn regex(self) -> &'static Regex {
        match self {
            Self::Math => &MATH_RE,
            Self::Graphie => &GRAPHIE_RE,
            Self::Widget => &WIDGET_RE,
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Math => MATH,
            Self::Graphie => GRAPHIE,
            Self::Widget => WIDGET,
        }
    }

    pub fn from_placeholder(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.placeholder() == token)
    }

    pub fn mismatch_message(self) -> &'static str {
        match self {
            Self::Math => "math doesn't match",
            Self::Graphie => "graphies don't match",
            Self::Widget => "widgets don't match",
        }
    }

    /// Occurrences of this kind in encounter order.
    pub fn find_all(self, text: &str) -> Vec<&str> {
        if text.is_empty() {
            return vec![];
        }
        self.regex().find_iter(text).map(|m| m.as_str()).collect()
    }

    pub fn mask(self, text: &str) -> String {
        self.regex()
            .replace_all(text, regex::NoExpand(self.placeholder()))
            .into_owned()
    }
}

impl fmt::Display for SpecialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Math => "math",
            Self::Graphie => "graphie",
            Self::Widget => "widget",
        };
        f.write_str(name)
    }
}

/// Masks every kind in `SpecialKind::ALL` order.
pub fn mask_all(text: &str) -> String {
    SpecialKind::ALL
        .into_iter()
        .fold(text.to_string(), |acc, kind| kind.mask(&acc))
}
