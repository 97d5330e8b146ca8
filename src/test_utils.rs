//! Generators shared by the property tests.

use proptest::prelude::*;

use crate::special::SpecialKind;

/// One space-separated piece of a generated paragraph.
#[derive(Clone, Debug)]
pub enum Seg {
    Word(String),
    /// A special substring; the number picks its content, never its kind.
    Special(SpecialKind, u16),
}

pub fn kind_strategy() -> impl Strategy<Value = SpecialKind> {
    prop_oneof![
        Just(SpecialKind::Math),
        Just(SpecialKind::Graphie),
        Just(SpecialKind::Widget),
    ]
}

pub fn seg_strategy() -> impl Strategy<Value = Seg> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(Seg::Word),
        (kind_strategy(), 0u16..1000).prop_map(|(kind, n)| Seg::Special(kind, n)),
    ]
}

/// One to three paragraphs of up to six pieces each. Paragraphs may be empty.
pub fn paragraphs_strategy() -> impl Strategy<Value = Vec<Vec<Seg>>> {
    prop::collection::vec(prop::collection::vec(seg_strategy(), 0..6), 1..4)
}

/// Concrete text for a special substring. Math alternates plain, escaped-dollar and `\sin` bodies.
pub fn payload(kind: SpecialKind, n: u16) -> String {
    match kind {
        SpecialKind::Math => match n % 3 {
            0 => format!("${n}+x$"),
            1 => format!(r"$\${n}$"),
            _ => format!(r"$\sin {n}$"),
        },
        SpecialKind::Graphie => format!("![](web+graphie://ka.org/{n})"),
        SpecialKind::Widget => format!("[[\u{2603} numeric-input {n}]]"),
    }
}

/// Space-joined paragraphs, with `pick` choosing the text of each special substring.
pub fn render_paragraphs<F>(paragraphs: &[Vec<Seg>], pick: F) -> Vec<String>
where
    F: Fn(SpecialKind, u16) -> String,
{
    paragraphs
        .iter()
        .map(|segs| {
            segs.iter()
                .map(|seg| match seg {
                    Seg::Word(word) => word.clone(),
                    Seg::Special(kind, n) => pick(*kind, *n),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
