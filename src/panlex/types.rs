use serde::Deserialize;

/// `var_code` marking the canonical variant of a language.
pub const CANONICAL_VAR_CODE: i64 = 0;

/// A row of `langvar.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageVariant {
    pub id: i64,
    pub lang_code: String,
    pub var_code: i64,
}

impl LanguageVariant {
    pub fn is_canonical(&self) -> bool {
        self.var_code == CANONICAL_VAR_CODE
    }
}

/// A row of `expr.csv`. An empty `txt` field decodes to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Expression {
    pub id: i64,
    pub langvar: i64,
    #[serde(rename = "txt")]
    pub text: Option<String>,
}

/// A row of `denotation.csv`: links an expression to a meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Denotation {
    pub expr: i64,
    pub meaning: i64,
}
