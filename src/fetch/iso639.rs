use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use super::{FetchError, download_to_file};

pub const ISO639_3_URL: &str =
    "https://iso639-3.sil.org/sites/iso639-3/files/downloads/iso-639-3_Name_Index.tab";
pub const ISO639_2_URL: &str = "https://www.loc.gov/standards/iso639-2/php/code_list.php";

/// Which ISO 639 code list to download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum IsoStandard {
    /// Library of Congress ISO 639-2 code list
    #[value(name = "639-2")]
    Iso639_2,
    /// SIL ISO 639-3 name index
    #[default]
    #[value(name = "639-3")]
    Iso639_3,
}

impl IsoStandard {
    pub fn url(self) -> &'static str {
        match self {
            IsoStandard::Iso639_2 => ISO639_2_URL,
            IsoStandard::Iso639_3 => ISO639_3_URL,
        }
    }

    pub fn default_file_name(self) -> &'static str {
        match self {
            IsoStandard::Iso639_2 => "iso-639-2.tab",
            IsoStandard::Iso639_3 => "iso-639-3.tab",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Iso639Error {
    #[error("failed to read ISO 639-3 name index {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed ISO 639-3 name index: {0}")]
    Parse(#[from] csv::Error),
}

#[derive(Deserialize)]
struct NameRow {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Print_Name")]
    print_name: String,
}

/// ISO 639-3 code to reference name. A code listed with several names keeps the first.
#[derive(Debug, Default)]
pub struct NameIndex {
    names: HashMap<String, String>,
}

impl NameIndex {
    /// Parse the tab-separated SIL name index (`Id`, `Print_Name`, `Inverted_Name`).
    pub fn parse(text: &str) -> Result<Self, Iso639Error> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut names = HashMap::new();
        for row in reader.deserialize::<NameRow>() {
            let row = row?;
            names
                .entry(row.id.trim().to_string())
                .or_insert_with(|| row.print_name.trim().to_string());
        }
        Ok(Self { names })
    }

    pub fn load(path: &Path) -> Result<Self, Iso639Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Iso639Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn print_name(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    pub fn code_count(&self) -> usize {
        self.names.len()
    }
}

/// Download an ISO 639 code list from `url` to `{out_dir}/{out_name}`.
/// The file name defaults to the standard's usual name.
pub async fn download_code_list(
    client: &Client,
    standard: IsoStandard,
    url: &str,
    out_dir: &Path,
    out_name: Option<&str>,
) -> Result<PathBuf, FetchError> {
    let out_path = out_dir.join(out_name.unwrap_or(standard.default_file_name()));
    info!(?standard, %url, path = %out_path.display(), "downloading ISO 639 code list");
    download_to_file(client, url, &out_path).await?;
    Ok(out_path)
}
