use super::LexiconError;
use super::types::LanguageVariant;

/// Resolve a language code to the id of its canonical (`var_code == 0`) variant.
pub fn resolve_langvar(lang_code: &str, variants: &[LanguageVariant]) -> Result<i64, LexiconError> {
    variants
        .iter()
        .find(|v| v.lang_code == lang_code && v.is_canonical())
        .map(|v| v.id)
        .ok_or_else(|| LexiconError::LanguageNotFound(lang_code.to_string()))
}
