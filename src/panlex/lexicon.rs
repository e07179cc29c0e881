use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use super::LexiconError;
use super::resolve::resolve_langvar;
use super::types::{Denotation, Expression, LanguageVariant};

/// Deduplicated, normalized word tokens of one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonolingualLexicon {
    pub lang: String,
    pub terms: BTreeSet<String>,
}

/// One row of a bilingual lexicon. Either side may be null when the
/// underlying expression has no text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermPair {
    pub source: Option<String>,
    pub target: Option<String>,
}

/// Term pairs between two languages, in extraction order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BilingualLexicon {
    pub source_lang: String,
    pub target_lang: String,
    pub pairs: Vec<TermPair>,
}

/// Lower-case `text`, drop ASCII punctuation, and split on single spaces.
/// Empty tokens are discarded.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    normalized
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn extract_monolingual(
    lang: &str,
    variants: &[LanguageVariant],
    expressions: &[Expression],
) -> Result<MonolingualLexicon, LexiconError> {
    let langvar = resolve_langvar(lang, variants)?;
    debug!(lang, langvar, "resolved language variant");

    let mut terms = BTreeSet::new();
    let mut skipped = 0usize;
    for expr in expressions.iter().filter(|e| e.langvar == langvar) {
        let Some(text) = expr.text.as_deref() else {
            skipped += 1;
            continue;
        };
        terms.extend(tokenize(text));
    }

    debug!(lang, terms = terms.len(), skipped, "monolingual extraction done");
    Ok(MonolingualLexicon {
        lang: lang.to_string(),
        terms,
    })
}

#[derive(Default)]
struct MeaningGroup<'a> {
    source: Vec<&'a Expression>,
    target: Vec<&'a Expression>,
}

pub fn extract_bilingual(
    source_lang: &str,
    target_lang: &str,
    variants: &[LanguageVariant],
    expressions: &[Expression],
    denotations: &[Denotation],
) -> Result<BilingualLexicon, LexiconError> {
    let source_var = resolve_langvar(source_lang, variants)?;
    let target_var = resolve_langvar(target_lang, variants)?;
    debug!(source_lang, source_var, target_lang, target_var, "resolved language variants");

    let lookup: HashMap<i64, &Expression> = expressions
        .iter()
        .filter(|e| e.langvar == source_var || e.langvar == target_var)
        .map(|e| (e.id, e))
        .collect();

    // Groups keep first-appearance order of their meaning in the denotation table.
    let mut group_index: HashMap<i64, usize> = HashMap::new();
    let mut groups: Vec<MeaningGroup<'_>> = Vec::new();
    for deno in denotations {
        let Some(&expr) = lookup.get(&deno.expr) else {
            continue;
        };
        let idx = *group_index.entry(deno.meaning).or_insert_with(|| {
            groups.push(MeaningGroup::default());
            groups.len() - 1
        });
        // Source side wins when both codes resolve to the same variant.
        if expr.langvar == source_var {
            groups[idx].source.push(expr);
        } else {
            groups[idx].target.push(expr);
        }
    }

    let mut pairs = Vec::new();
    for group in &groups {
        if group.source.is_empty() || group.target.is_empty() {
            continue;
        }
        for src in &group.source {
            for tgt in &group.target {
                pairs.push(TermPair {
                    source: src.text.clone(),
                    target: tgt.text.clone(),
                });
            }
        }
    }

    debug!(
        meanings = groups.len(),
        pairs = pairs.len(),
        "bilingual extraction done"
    );
    Ok(BilingualLexicon {
        source_lang: source_lang.to_string(),
        target_lang: target_lang.to_string(),
        pairs,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn variant(id: i64, lang_code: &str) -> LanguageVariant {
        LanguageVariant {
            id,
            lang_code: lang_code.to_string(),
            var_code: 0,
        }
    }

    fn expr(id: i64, langvar: i64, text: Option<&str>) -> Expression {
        Expression {
            id,
            langvar,
            text: text.map(str::to_string),
        }
    }

    fn deno(expr: i64, meaning: i64) -> Denotation {
        Denotation { expr, meaning }
    }

    fn pair(source: &str, target: &str) -> TermPair {
        TermPair {
            source: Some(source.to_string()),
            target: Some(target.to_string()),
        }
    }

    fn ind_eng() -> Vec<LanguageVariant> {
        vec![variant(1, "ind"), variant(2, "eng")]
    }

    #[test]
    fn tokenize_strips_punctuation_and_lowercases() {
        assert_eq!(tokenize("Rumah, besar!"), vec!["rumah", "besar"]);
    }

    #[test]
    fn tokenize_drops_punctuation_only_tokens() {
        assert_eq!(tokenize("a -- b"), vec!["a", "b"]);
        assert!(tokenize("?!...").is_empty());
    }

    #[test]
    fn tokenize_splits_on_single_spaces_only() {
        assert_eq!(tokenize("one  two"), vec!["one", "two"]);
        assert_eq!(tokenize("tab\tsep"), vec!["tab\tsep"]);
    }

    #[test]
    fn tokenize_keeps_diacritics_and_non_ascii_punctuation() {
        assert_eq!(tokenize("Café «Noël»"), vec!["café", "«noël»"]);
    }

    #[test]
    fn monolingual_scenario() {
        let expressions = vec![
            expr(10, 1, Some("Rumah, besar!")),
            expr(11, 2, Some("House")),
        ];
        let lex = extract_monolingual("ind", &ind_eng(), &expressions).unwrap();
        assert_eq!(lex.lang, "ind");
        let expected: BTreeSet<String> = ["rumah", "besar"].iter().map(|s| s.to_string()).collect();
        assert_eq!(lex.terms, expected);
    }

    #[test]
    fn monolingual_skips_null_text() {
        let expressions = vec![expr(10, 1, None), expr(11, 1, Some("air"))];
        let lex = extract_monolingual("ind", &ind_eng(), &expressions).unwrap();
        assert_eq!(lex.terms.len(), 1);
        assert!(lex.terms.contains("air"));
    }

    #[test]
    fn monolingual_collapses_duplicates() {
        let expressions = vec![
            expr(10, 1, Some("Air")),
            expr(11, 1, Some("air minum")),
            expr(12, 1, Some("AIR.")),
        ];
        let lex = extract_monolingual("ind", &ind_eng(), &expressions).unwrap();
        assert_eq!(lex.terms.len(), 2);
    }

    #[test]
    fn monolingual_has_no_empty_or_punctuated_terms() {
        let expressions = vec![
            expr(10, 1, Some("--- ,, !")),
            expr(11, 1, Some("ke-luar (sana)")),
            expr(12, 1, Some("")),
        ];
        let lex = extract_monolingual("ind", &ind_eng(), &expressions).unwrap();
        assert!(!lex.terms.contains(""));
        assert!(lex.terms.iter().all(|t| !t.chars().any(|c| c.is_ascii_punctuation())));
        assert!(lex.terms.contains("keluar"));
        assert!(lex.terms.contains("sana"));
    }

    #[test]
    fn monolingual_is_idempotent() {
        let expressions = vec![expr(10, 1, Some("satu dua")), expr(11, 1, Some("tiga"))];
        let first = extract_monolingual("ind", &ind_eng(), &expressions).unwrap();
        let second = extract_monolingual("ind", &ind_eng(), &expressions).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn monolingual_unknown_language_fails() {
        let err = extract_monolingual("zzz", &ind_eng(), &[]).unwrap_err();
        assert!(matches!(err, LexiconError::LanguageNotFound(_)));
    }

    #[test]
    fn bilingual_scenario() {
        let expressions = vec![
            expr(10, 1, Some("Rumah, besar!")),
            expr(11, 2, Some("House")),
        ];
        let denotations = vec![deno(10, 100), deno(11, 100)];
        let lex =
            extract_bilingual("ind", "eng", &ind_eng(), &expressions, &denotations).unwrap();
        assert_eq!(lex.source_lang, "ind");
        assert_eq!(lex.target_lang, "eng");
        assert_eq!(lex.pairs, vec![pair("Rumah, besar!", "House")]);
    }

    #[test]
    fn bilingual_one_sided_meaning_contributes_nothing() {
        let expressions = vec![expr(10, 1, Some("rumah")), expr(12, 1, Some("wisma"))];
        let denotations = vec![deno(10, 100), deno(12, 100)];
        let lex =
            extract_bilingual("ind", "eng", &ind_eng(), &expressions, &denotations).unwrap();
        assert!(lex.pairs.is_empty());
    }

    #[test]
    fn bilingual_emits_cross_product_per_meaning() {
        let expressions = vec![
            expr(10, 1, Some("rumah")),
            expr(12, 1, Some("wisma")),
            expr(11, 2, Some("house")),
            expr(13, 2, Some("home")),
        ];
        let denotations = vec![deno(10, 100), deno(11, 100), deno(12, 100), deno(13, 100)];
        let lex =
            extract_bilingual("ind", "eng", &ind_eng(), &expressions, &denotations).unwrap();
        assert_eq!(
            lex.pairs,
            vec![
                pair("rumah", "house"),
                pair("rumah", "home"),
                pair("wisma", "house"),
                pair("wisma", "home"),
            ]
        );
    }

    #[test]
    fn bilingual_keeps_duplicates_across_meanings() {
        let expressions = vec![expr(10, 1, Some("rumah")), expr(11, 2, Some("house"))];
        let denotations = vec![deno(10, 100), deno(11, 100), deno(10, 200), deno(11, 200)];
        let lex =
            extract_bilingual("ind", "eng", &ind_eng(), &expressions, &denotations).unwrap();
        assert_eq!(lex.pairs, vec![pair("rumah", "house"), pair("rumah", "house")]);
    }

    #[test]
    fn bilingual_orders_meanings_by_first_appearance() {
        let expressions = vec![
            expr(10, 1, Some("air")),
            expr(11, 2, Some("water")),
            expr(20, 1, Some("api")),
            expr(21, 2, Some("fire")),
        ];
        let denotations = vec![deno(20, 900), deno(10, 100), deno(11, 100), deno(21, 900)];
        let lex =
            extract_bilingual("ind", "eng", &ind_eng(), &expressions, &denotations).unwrap();
        assert_eq!(lex.pairs, vec![pair("api", "fire"), pair("air", "water")]);
    }

    #[test]
    fn bilingual_passes_null_text_through() {
        let expressions = vec![expr(10, 1, None), expr(11, 2, Some("house"))];
        let denotations = vec![deno(10, 100), deno(11, 100)];
        let lex =
            extract_bilingual("ind", "eng", &ind_eng(), &expressions, &denotations).unwrap();
        assert_eq!(
            lex.pairs,
            vec![TermPair {
                source: None,
                target: Some("house".to_string()),
            }]
        );
    }

    #[test]
    fn bilingual_ignores_other_languages() {
        let variants = vec![variant(1, "ind"), variant(2, "eng"), variant(3, "fra")];
        let expressions = vec![
            expr(10, 1, Some("rumah")),
            expr(11, 2, Some("house")),
            expr(12, 3, Some("maison")),
        ];
        let denotations = vec![deno(10, 100), deno(11, 100), deno(12, 100)];
        let lex = extract_bilingual("ind", "eng", &variants, &expressions, &denotations).unwrap();
        assert_eq!(lex.pairs, vec![pair("rumah", "house")]);
    }

    #[test]
    fn bilingual_is_symmetric_under_swap() {
        let expressions = vec![
            expr(10, 1, Some("rumah")),
            expr(12, 1, Some("wisma")),
            expr(11, 2, Some("house")),
            expr(13, 2, Some("home")),
            expr(14, 2, Some("fire")),
            expr(15, 1, Some("api")),
        ];
        let denotations = vec![
            deno(10, 100),
            deno(11, 100),
            deno(13, 100),
            deno(12, 200),
            deno(13, 200),
            deno(15, 300),
            deno(14, 300),
        ];
        let forward =
            extract_bilingual("ind", "eng", &ind_eng(), &expressions, &denotations).unwrap();
        let backward =
            extract_bilingual("eng", "ind", &ind_eng(), &expressions, &denotations).unwrap();

        let forward: HashSet<TermPair> = forward.pairs.into_iter().collect();
        let swapped: HashSet<TermPair> = backward
            .pairs
            .into_iter()
            .map(|p| TermPair {
                source: p.target,
                target: p.source,
            })
            .collect();
        assert_eq!(forward, swapped);
        assert_eq!(forward.len(), 4);
    }

    #[test]
    fn bilingual_same_language_yields_no_pairs() {
        let expressions = vec![expr(10, 1, Some("rumah")), expr(12, 1, Some("wisma"))];
        let denotations = vec![deno(10, 100), deno(12, 100)];
        let lex =
            extract_bilingual("ind", "ind", &ind_eng(), &expressions, &denotations).unwrap();
        assert!(lex.pairs.is_empty());
    }

    #[test]
    fn bilingual_fails_when_either_language_missing() {
        let a = extract_bilingual("ind", "zzz", &ind_eng(), &[], &[]).unwrap_err();
        assert!(matches!(a, LexiconError::LanguageNotFound(ref c) if c == "zzz"));
        let b = extract_bilingual("zzz", "eng", &ind_eng(), &[], &[]).unwrap_err();
        assert!(matches!(b, LexiconError::LanguageNotFound(ref c) if c == "zzz"));
    }
}
