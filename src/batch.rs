//! JSON documents in and out of the suggestion engine.
//!
//! Items are arbitrary JSON values: a string item is its own English string, an object item keeps
//! its English string under `english_field`. Results echo each item back next to its suggestion.

use anyhow::{anyhow, Context};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::group_by;
use crate::suggest::{find_translation_pair, suggest_by};
use crate::template::{create_template, Template};

pub const DEFAULT_ENGLISH_FIELD: &str = "englishStr";
pub const DEFAULT_LANG: &str = "en";

pub type ReferencePair = (Option<String>, Option<String>);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub pairs: Vec<ReferencePair>,
    pub items: Vec<Value>,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default)]
    pub english_field: Option<String>,
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

impl SuggestRequest {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("parse suggest request json")
    }

    #[must_use]
    pub fn english_field(&self) -> &str {
        self.english_field.as_deref().unwrap_or(DEFAULT_ENGLISH_FIELD)
    }
}

/// One output record: the input item and its suggestion (`null` when none).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRecord(pub Value, pub Option<String>);

pub fn english_of<'a>(item: &'a Value, field: &str) -> Option<&'a str> {
    match item {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map.get(field).and_then(Value::as_str),
        _ => None,
    }
}

fn check_items(items: &[Value], field: &str) -> anyhow::Result<()> {
    for (idx, item) in items.iter().enumerate() {
        if english_of(item, field).is_none() {
            return Err(anyhow!(
                "item {idx} is neither a string nor an object with a string field {field:?}"
            ));
        }
    }
    Ok(())
}

pub fn run_request(req: &SuggestRequest) -> anyhow::Result<Vec<SuggestionRecord>> {
    let field = req.english_field();
    check_items(&req.items, field)?;
    let suggestions = suggest_by(&req.pairs, &req.items, &req.lang, |item| {
        english_of(item, field).unwrap_or_default()
    })
    .with_context(|| format!("suggest translations (lang={})", req.lang))?;
    Ok(suggestions
        .into_iter()
        .map(|(item, suggestion)| SuggestionRecord(item.clone(), suggestion))
        .collect())
}

pub fn group_items(items: &[Value], field: &str) -> anyhow::Result<IndexMap<String, Vec<Value>>> {
    check_items(items, field)?;
    let groups = group_by(items, |item| english_of(item, field).unwrap_or_default());
    Ok(groups
        .into_iter()
        .map(|(key, members)| (key, members.into_iter().cloned().collect()))
        .collect())
}

/// Why a batch will not use the template path, if it won't.
pub fn fallback_reason(pairs: &[ReferencePair], group_count: usize) -> Option<String> {
    if find_translation_pair(pairs).is_err() {
        Some("no usable reference pair; only lone math/graphie/widget items get suggestions".into())
    } else if group_count > 1 {
        Some(format!(
            "{group_count} distinct normalized shapes; falling back to per-item auto-translation"
        ))
    } else {
        None
    }
}

/// Template built from the first usable pair, for inspection.
pub fn template_for(pairs: &[ReferencePair], lang: &str) -> anyhow::Result<Template> {
    let (english, translated) = find_translation_pair(pairs)?;
    create_template(english, translated, lang).context("build template from reference pair")
}
