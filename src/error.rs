use thiserror::Error;

use crate::special::SpecialKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestError {
    /// A special substring in the translation has no equal-text counterpart in the English string.
    #[error("{}", .0.mismatch_message())]
    Mismatch(SpecialKind),

    /// None of the reference pairs has both an English string and a translation.
    #[error("no translation pair")]
    NoTranslationPair,

    #[error("template has {lines} line(s) but the string needs paragraph {paragraph}")]
    MissingTemplateLine { paragraph: usize, lines: usize },

    #[error("template needs {kind} #{slot} but the string does not provide it")]
    MissingOccurrence { kind: SpecialKind, slot: usize },
}

impl SuggestError {
    #[must_use]
    pub fn kind(&self) -> Option<SpecialKind> {
        match self {
            Self::Mismatch(kind) | Self::MissingOccurrence { kind, .. } => Some(*kind),
            Self::NoTranslationPair | Self::MissingTemplateLine { .. } => None,
        }
    }
}

pub type SuggestResult<T> = Result<T, SuggestError>;
