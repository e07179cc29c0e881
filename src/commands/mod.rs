mod errors;
mod params;

pub use errors::CommandError;
pub use params::{Cli, Command};

use std::time::{Duration, Instant};

use params::{
    BilingualParams, DownloadParams, Iso639Params, LanguagesParams, MonolingualParams,
    TableParams,
};
use reqwest::Client;
use tracing::info;

use crate::config::Config;
use crate::fetch::{self, iso639};
use crate::output::{open_output, write_bilingual, write_languages, write_monolingual};
use crate::panlex::{PanlexTables, load_tables};

/// TCP connection establishment timeout. Dumps are large, so there is no overall timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum redirect hops before aborting.
const MAX_REDIRECTS: usize = 5;

pub async fn run(command: Command, config: &Config) -> Result<(), CommandError> {
    match command {
        Command::Download(params) => download(params, config).await,
        Command::Iso639(params) => name_index(params).await,
        Command::Monolingual(params) => {
            let config = config.clone();
            tokio::task::spawn_blocking(move || monolingual(params, &config)).await?
        }
        Command::Bilingual(params) => {
            let config = config.clone();
            tokio::task::spawn_blocking(move || bilingual(params, &config)).await?
        }
        Command::Languages(params) => {
            let config = config.clone();
            tokio::task::spawn_blocking(move || languages(params, &config)).await?
        }
    }
}

fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
}

async fn download(params: DownloadParams, config: &Config) -> Result<(), CommandError> {
    let version = params.version.as_deref().unwrap_or(&config.version);
    info!(version, out_dir = %params.out_dir.display(), "cmd:download");

    let http = http_client()?;
    if params.no_extract {
        let path = fetch::download_dump(&http, &config.base_url, version, &params.out_dir).await?;
        info!(path = %path.display(), "archive saved");
    } else {
        let dir =
            fetch::download_and_extract(&http, &config.base_url, version, &params.out_dir).await?;
        info!(dir = %dir.display(), "tables ready (pass --data-dir or set PANLEX_DIR)");
    }
    Ok(())
}

async fn name_index(params: Iso639Params) -> Result<(), CommandError> {
    info!(standard = ?params.standard, out_dir = %params.out_dir.display(), "cmd:iso639");
    let http = http_client()?;
    let path = iso639::download_code_list(
        &http,
        params.standard,
        params.standard.url(),
        &params.out_dir,
        params.out_name.as_deref(),
    )
    .await?;
    info!(path = %path.display(), "code list saved");
    Ok(())
}

fn load(table: &TableParams, config: &Config) -> Result<PanlexTables, CommandError> {
    let dir = table.data_dir.as_deref().unwrap_or(&config.data_dir);
    let started = Instant::now();
    let tables = load_tables(dir)?;
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "finished loading panlex tables");
    Ok(tables)
}

fn monolingual(params: MonolingualParams, config: &Config) -> Result<(), CommandError> {
    info!(lang = %params.lang, "cmd:monolingual");
    let tables = load(&params.table, config)?;

    let started = Instant::now();
    let lexicon = tables.monolingual(&params.lang)?;
    info!(
        lang = %params.lang,
        terms = lexicon.terms.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "monolingual lexicon extracted"
    );

    let out = open_output(params.table.output.as_deref())?;
    write_monolingual(&lexicon, params.table.format, out)?;
    Ok(())
}

fn bilingual(params: BilingualParams, config: &Config) -> Result<(), CommandError> {
    info!(source = %params.source, target = %params.target, "cmd:bilingual");
    let tables = load(&params.table, config)?;

    let started = Instant::now();
    let lexicon = tables.bilingual(&params.source, &params.target)?;
    info!(
        pairs = lexicon.pairs.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "bilingual lexicon extracted"
    );

    let out = open_output(params.table.output.as_deref())?;
    write_bilingual(&lexicon, params.table.format, out)?;
    Ok(())
}

fn languages(params: LanguagesParams, config: &Config) -> Result<(), CommandError> {
    info!("cmd:languages");
    let tables = load(&params.table, config)?;
    let names = params
        .iso_index
        .as_deref()
        .map(iso639::NameIndex::load)
        .transpose()?;
    if let Some(ref index) = names {
        info!(codes = index.code_count(), "loaded ISO 639-3 name index");
    }

    let rows: Vec<_> = tables
        .canonical_variants()
        .into_iter()
        .map(|v| (v, names.as_ref().and_then(|n| n.print_name(&v.lang_code))))
        .collect();

    let out = open_output(params.table.output.as_deref())?;
    write_languages(&rows, params.table.format, out)?;
    Ok(())
}
