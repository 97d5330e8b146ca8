use crate::error::{SuggestError, SuggestResult};
use crate::lang::translate_math;
use crate::normalize::{group_by, normalize_string};
use crate::special::{GRAPHIE, MATH, WIDGET};
use crate::template::{create_template, populate_template};

/// An item with the translation suggested for it, if any.
pub type Suggestion<'a, T> = (&'a T, Option<String>);

/// First pair where both the English string and its translation are present and non-empty.
pub fn find_translation_pair<S: AsRef<str>>(
    pairs: &[(Option<S>, Option<S>)],
) -> SuggestResult<(&str, &str)> {
    pairs
        .iter()
        .find_map(|(english, translated)| Some((non_empty(english)?, non_empty(translated)?)))
        .ok_or(SuggestError::NoTranslationPair)
}

fn non_empty<S: AsRef<str>>(text: &Option<S>) -> Option<&str> {
    text.as_ref().map(|s| s.as_ref()).filter(|s| !s.is_empty())
}

/// Direct translations for items that consist of nothing but one special substring.
///
/// Graphies and widgets carry no language and pass through. Math goes through the language
/// transform unless it embeds `\text`, which may hold untranslated prose. Everything else gets
/// no suggestion.
///
/// The kind is read off the normalized form, so an item whose text is literally a placeholder
/// (`__MATH__`, `__GRAPHIE__`, `__WIDGET__`) counts as that kind and comes back unchanged.
pub fn auto_translate<'a, T, F>(items: &'a [T], lang: &str, get_english: F) -> Vec<Suggestion<'a, T>>
where
    F: Fn(&T) -> &str,
{
    items
        .iter()
        .map(|item| {
            let english = get_english(item);
            let suggestion = match normalize_string(english).as_str() {
                MATH if english.contains(r"\text") => None,
                MATH => Some(translate_math(english, lang).into_owned()),
                GRAPHIE | WIDGET => Some(english.to_string()),
                _ => None,
            };
            (item, suggestion)
        })
        .collect()
}

/// Suggests translations for `items` from the first usable reference pair.
///
/// A template is only used when every item shares one normalized shape; otherwise, or when no
/// pair is usable, each item falls back to [`auto_translate`]. Once a template is attempted, a
/// mismatched reference pair fails the whole batch.
pub fn suggest_by<'a, S, T, F>(
    pairs: &[(Option<S>, Option<S>)],
    items: &'a [T],
    lang: &str,
    get_english: F,
) -> SuggestResult<Vec<Suggestion<'a, T>>>
where
    S: AsRef<str>,
    F: Fn(&T) -> &str,
{
    let pair = find_translation_pair(pairs);
    let groups = group_by(items, &get_english);

    let (english, translated) = match pair {
        Ok(pair) if groups.len() == 1 => pair,
        _ => return Ok(auto_translate(items, lang, get_english)),
    };

    let template = create_template(english, translated, lang)?;
    items
        .iter()
        .map(|item| -> SuggestResult<Suggestion<'a, T>> {
            let suggestion = populate_template(&template, get_english(item), lang)?;
            Ok((item, Some(suggestion)))
        })
        .collect()
}

/// [`suggest_by`] for items that are themselves the English string.
pub fn suggest<'a, S, T>(
    pairs: &[(Option<S>, Option<S>)],
    items: &'a [T],
    lang: &str,
) -> SuggestResult<Vec<Suggestion<'a, T>>>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    suggest_by(pairs, items, lang, |item| item.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::special::SpecialKind;

    struct Item {
        english_str: &'static str,
    }

    fn reference_pairs() -> Vec<(Option<&'static str>, Option<&'static str>)> {
        vec![
            (None, None),
            (
                Some("simplify $2/4$\n\nhint: the denominator is $2$"),
                Some("simplifique $2/4$\n\npista: o denominador é $2$"),
            ),
        ]
    }

    #[test]
    fn finds_first_complete_pair() {
        let pairs = vec![
            (Some("a"), None),
            (Some(""), Some("b")),
            (Some("c"), Some("d")),
            (Some("e"), Some("f")),
        ];
        assert_eq!(find_translation_pair(&pairs), Ok(("c", "d")));
    }

    #[test]
    fn no_pair_is_an_error_value() {
        let pairs: Vec<(Option<String>, Option<String>)> =
            vec![(None, Some("x".to_string())), (Some(String::new()), None)];
        assert_eq!(
            find_translation_pair(&pairs),
            Err(SuggestError::NoTranslationPair)
        );
    }

    #[test]
    fn templated_suggestion_for_uniform_group() {
        let items = vec![Item {
            english_str: "simplify $3/12$\n\nhint: the denominator is $4$",
        }];
        let out = suggest_by(&reference_pairs(), &items, "pt", |it| it.english_str)
            .expect("suggest");
        assert_eq!(out.len(), 1);
        assert!(std::ptr::eq(out[0].0, &items[0]));
        assert_eq!(
            out[0].1.as_deref(),
            Some("simplifique $3/12$\n\npista: o denominador é $4$")
        );
    }

    #[test]
    fn plain_string_items() {
        let items = vec![
            "simplify $1/3$\n\nhint: the denominator is $3$",
            "  simplify $6/8$  \n\nhint: the denominator is $4$",
        ];
        let out = suggest(&reference_pairs(), &items, "pt").expect("suggest");
        let texts: Vec<Option<&str>> = out.iter().map(|(_, s)| s.as_deref()).collect();
        assert_eq!(
            texts,
            vec![
                Some("simplifique $1/3$\n\npista: o denominador é $3$"),
                Some("simplifique $6/8$\n\npista: o denominador é $4$"),
            ]
        );
    }

    #[test]
    fn auto_translates_lone_special_substrings() {
        let items = vec![
            r"$\sin(x)$",
            r"$\text{cost}$",
            "![](web+graphie://ka.org/x)",
            "[[☃ numeric-input 1]]",
            "add $1$",
        ];
        let out = auto_translate(&items, "pt", |s| *s);
        let texts: Vec<Option<&str>> = out.iter().map(|(_, s)| s.as_deref()).collect();
        assert_eq!(
            texts,
            vec![
                Some(r"$\operatorname{sen}(x)$"),
                None,
                Some("![](web+graphie://ka.org/x)"),
                Some("[[☃ numeric-input 1]]"),
                None,
            ]
        );
    }

    #[test]
    fn literal_placeholders_pass_through() {
        let items = vec!["__MATH__", " __GRAPHIE__ ", "__WIDGET__"];
        let out = auto_translate(&items, "pt", |s| *s);
        let texts: Vec<Option<&str>> = out.iter().map(|(_, s)| s.as_deref()).collect();
        assert_eq!(
            texts,
            vec![Some("__MATH__"), Some(" __GRAPHIE__ "), Some("__WIDGET__")]
        );
    }

    #[test]
    fn non_uniform_group_falls_back() {
        let items = vec!["simplify $1/2$\n\nhint: the denominator is $2$", r"$\sin(x)$"];
        let out = suggest(&reference_pairs(), &items, "pt").expect("suggest");
        assert_eq!(out[0].1, None);
        assert_eq!(out[1].1.as_deref(), Some(r"$\operatorname{sen}(x)$"));
    }

    #[test]
    fn missing_pair_falls_back() {
        let pairs: Vec<(Option<&str>, Option<&str>)> = vec![(None, None)];
        let items = vec!["$x$", "$y$"];
        let out = suggest(&pairs, &items, "en").expect("suggest");
        let texts: Vec<Option<&str>> = out.iter().map(|(_, s)| s.as_deref()).collect();
        assert_eq!(texts, vec![Some("$x$"), Some("$y$")]);
    }

    #[test]
    fn empty_items_yield_nothing() {
        let items: Vec<&str> = vec![];
        let out = suggest(&reference_pairs(), &items, "pt").expect("suggest");
        assert!(out.is_empty());
    }

    #[test]
    fn mismatched_reference_aborts_batch() {
        let pairs = vec![(Some("look at ![](a.png)"), Some("olhe ![](b.png)"))];
        let items = vec!["look at ![](c.png)", "look at ![](d.png)"];
        let err = suggest(&pairs, &items, "pt").unwrap_err();
        assert_eq!(err, SuggestError::Mismatch(SpecialKind::Graphie));
    }

    #[test]
    fn mismatched_reference_is_ignored_without_uniform_group() {
        let pairs = vec![(Some("look at ![](a.png)"), Some("olhe ![](b.png)"))];
        let items = vec!["look at ![](c.png)", "![](d.png)"];
        let out = suggest(&pairs, &items, "pt").expect("suggest");
        assert_eq!(out[0].1, None);
        assert_eq!(out[1].1.as_deref(), Some("![](d.png)"));
    }
}
