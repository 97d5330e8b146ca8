use serde::{Deserialize, Serialize};

use crate::error::{SuggestError, SuggestResult};
use crate::lang::translate_math;
use crate::mapping::map_occurrences;
use crate::special::{mask_all, SpecialKind, LINE_BREAK, PLACEHOLDER_RE};

/// A translation skeleton that can be filled with the special substrings of another English
/// string of the same normalized shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Translated paragraphs with special substrings replaced by placeholders.
    pub lines: Vec<String>,
    pub math_mapping: Vec<usize>,
    pub graphie_mapping: Vec<usize>,
    pub widget_mapping: Vec<usize>,
}

impl Template {
    #[must_use]
    pub fn mapping(&self, kind: SpecialKind) -> &[usize] {
        match kind {
            SpecialKind::Math => &self.math_mapping,
            SpecialKind::Graphie => &self.graphie_mapping,
            SpecialKind::Widget => &self.widget_mapping,
        }
    }
}

pub fn create_template(english: &str, translated: &str, lang: &str) -> SuggestResult<Template> {
    let lines = translated.split(LINE_BREAK).map(mask_all).collect();
    Ok(Template {
        lines,
        math_mapping: map_occurrences(english, translated, lang, SpecialKind::Math)?,
        graphie_mapping: map_occurrences(english, translated, lang, SpecialKind::Graphie)?,
        widget_mapping: map_occurrences(english, translated, lang, SpecialKind::Widget)?,
    })
}

/// Per-kind occurrences of one English string plus the running placeholder counters.
struct Occurrences {
    maths: Vec<String>,
    graphies: Vec<String>,
    widgets: Vec<String>,
    cursor: [usize; 3],
}

impl Occurrences {
    fn extract(english: &str, lang: &str) -> Self {
        let maths = SpecialKind::Math
            .find_all(english)
            .into_iter()
            .map(|m| translate_math(m, lang).into_owned())
            .collect();
        let owned = |kind: SpecialKind| -> Vec<String> {
            kind.find_all(english).into_iter().map(str::to_string).collect()
        };
        Self {
            maths,
            graphies: owned(SpecialKind::Graphie),
            widgets: owned(SpecialKind::Widget),
            cursor: [0; 3],
        }
    }

    fn next(&mut self, template: &Template, kind: SpecialKind) -> SuggestResult<&str> {
        let (pool, counter) = match kind {
            SpecialKind::Math => (&self.maths, &mut self.cursor[0]),
            SpecialKind::Graphie => (&self.graphies, &mut self.cursor[1]),
            SpecialKind::Widget => (&self.widgets, &mut self.cursor[2]),
        };
        let slot = *counter;
        *counter += 1;
        template
            .mapping(kind)
            .get(slot)
            .and_then(|&index| pool.get(index))
            .map(String::as_str)
            .ok_or(SuggestError::MissingOccurrence { kind, slot })
    }
}

/// Fills `template` with the special substrings of `english`.
///
/// Placeholder counters run across the whole document, not per paragraph. Math is rewritten for
/// `lang` before insertion. Only strings from the template source's normalized group are
/// guaranteed to fit; anything else may fail with a shape error.
pub fn populate_template(template: &Template, english: &str, lang: &str) -> SuggestResult<String> {
    let mut occurrences = Occurrences::extract(english, lang);
    let paragraph_count = english.split(LINE_BREAK).count();

    let mut out_lines: Vec<String> = Vec::with_capacity(paragraph_count);
    for paragraph in 0..paragraph_count {
        let line = template
            .lines
            .get(paragraph)
            .ok_or(SuggestError::MissingTemplateLine {
                paragraph,
                lines: template.lines.len(),
            })?;

        let mut out = String::with_capacity(line.len());
        let mut pos = 0usize;
        for m in PLACEHOLDER_RE.find_iter(line) {
            out.push_str(&line[pos..m.start()]);
            if let Some(kind) = SpecialKind::from_placeholder(m.as_str()) {
                out.push_str(occurrences.next(template, kind)?);
            }
            pos = m.end();
        }
        out.push_str(&line[pos..]);
        out_lines.push(out);
    }
    Ok(out_lines.join(LINE_BREAK))
}
