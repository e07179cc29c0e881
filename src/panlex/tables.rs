use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::info;

use super::LexiconError;
use super::lexicon::{BilingualLexicon, MonolingualLexicon, extract_bilingual, extract_monolingual};
use super::types::{Denotation, Expression, LanguageVariant};

pub const LANGVAR_FILE: &str = "langvar.csv";
pub const EXPR_FILE: &str = "expr.csv";
pub const DENOTATION_FILE: &str = "denotation.csv";

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("table file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// The three PanLex tables, loaded into memory and never mutated.
#[derive(Debug, Default)]
pub struct PanlexTables {
    pub variants: Vec<LanguageVariant>,
    pub expressions: Vec<Expression>,
    pub denotations: Vec<Denotation>,
}

impl PanlexTables {
    pub fn monolingual(&self, lang: &str) -> Result<MonolingualLexicon, LexiconError> {
        extract_monolingual(lang, &self.variants, &self.expressions)
    }

    pub fn bilingual(
        &self,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<BilingualLexicon, LexiconError> {
        extract_bilingual(
            source_lang,
            target_lang,
            &self.variants,
            &self.expressions,
            &self.denotations,
        )
    }

    /// Canonical variants sorted by language code.
    pub fn canonical_variants(&self) -> Vec<&LanguageVariant> {
        let mut out: Vec<_> = self.variants.iter().filter(|v| v.is_canonical()).collect();
        out.sort_by(|a, b| a.lang_code.cmp(&b.lang_code));
        out
    }
}

/// Load `langvar.csv`, `expr.csv` and `denotation.csv` from a PanLex CSV dump directory.
pub fn load_tables(dir: &Path) -> Result<PanlexTables, TableError> {
    let variants = read_table(&dir.join(LANGVAR_FILE))?;
    let expressions = read_table(&dir.join(EXPR_FILE))?;
    let denotations = read_table(&dir.join(DENOTATION_FILE))?;

    let tables = PanlexTables {
        variants,
        expressions,
        denotations,
    };
    info!(
        dir = %dir.display(),
        variants = tables.variants.len(),
        expressions = tables.expressions.len(),
        denotations = tables.denotations.len(),
        "loaded panlex tables"
    );
    Ok(tables)
}

/// Read a headed CSV file into rows. Columns not named by `T` are ignored.
fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, TableError> {
    if !path.is_file() {
        return Err(TableError::MissingFile(path.to_path_buf()));
    }
    let err = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(err)?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(err)
}
