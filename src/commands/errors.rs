use crate::fetch::FetchError;
use crate::fetch::iso639::Iso639Error;
use crate::output::OutputError;
use crate::panlex::LexiconError;
use crate::panlex::tables::TableError;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Lexicon(#[from] LexiconError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Iso639(#[from] Iso639Error),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("HTTP client setup failed: {0}")]
    Client(#[from] reqwest::Error),

    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl CommandError {
    /// Hint printed after the error, when one helps the user recover.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CommandError::Lexicon(LexiconError::LanguageNotFound(_)) => {
                Some("run `panlex-lexicon languages` to list available codes")
            }
            CommandError::Table(TableError::MissingFile(_)) => {
                Some("run `panlex-lexicon download` or point --data-dir / PANLEX_DIR at an extracted dump")
            }
            CommandError::Fetch(FetchError::Status(404)) => {
                Some("check the dump version at https://db.panlex.org")
            }
            _ => None,
        }
    }
}
