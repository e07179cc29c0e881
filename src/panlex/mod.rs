//! PanLex tables and the lexicon extractors built on top of them.

pub mod lexicon;
mod resolve;
pub mod tables;
pub mod types;

pub use lexicon::{BilingualLexicon, MonolingualLexicon};
pub use tables::{PanlexTables, load_tables};

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("no canonical variant (var_code 0) for language code '{0}'")]
    LanguageNotFound(String),
}
