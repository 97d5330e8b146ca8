use crate::error::{SuggestError, SuggestResult};
use crate::lang::math_equivalent;
use crate::special::SpecialKind;

/// Index permutation for one special-substring kind.
///
/// `mapping[i] == j` means the `i`-th occurrence in the translation is the `j`-th occurrence in the
/// English string. Each translated occurrence takes the first English occurrence with equal text;
/// English occurrences are never consumed, so repeated substrings may be mapped more than once.
pub fn map_occurrences(
    english: &str,
    translated: &str,
    lang: &str,
    kind: SpecialKind,
) -> SuggestResult<Vec<usize>> {
    let inputs = kind.find_all(english);
    let outputs = kind.find_all(translated);

    let mut mapping = Vec::with_capacity(outputs.len());
    for output in outputs {
        let output = match kind {
            SpecialKind::Math => math_equivalent(output, lang),
            SpecialKind::Graphie | SpecialKind::Widget => output.into(),
        };
        let input_index = inputs
            .iter()
            .position(|input| *input == &*output)
            .ok_or(SuggestError::Mismatch(kind))?;
        mapping.push(input_index);
    }
    Ok(mapping)
}
