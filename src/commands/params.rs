use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::fetch::iso639::IsoStandard;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "panlex-lexicon", version)]
#[command(about = "Extract word lists and translation pairs from PanLex CSV dumps")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download a PanLex CSV dump and unpack it
    Download(DownloadParams),
    /// Download an ISO 639 code list (SIL 639-3 name index or LoC 639-2 list)
    Iso639(Iso639Params),
    /// Extract the normalized word list of one language
    #[command(alias = "mono")]
    Monolingual(MonolingualParams),
    /// Extract term pairs between two languages that share a meaning
    #[command(alias = "bi")]
    Bilingual(BilingualParams),
    /// List canonical language variants in a dump
    Languages(LanguagesParams),
}

#[derive(Args, Debug)]
pub struct DownloadParams {
    /// Dump version as YYYYMMDD (default: $PANLEX_VERSION or 20230501)
    #[arg(short, long)]
    pub version: Option<String>,
    /// Directory to download into (default: current directory)
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
    /// Keep the zip archive without unpacking it
    #[arg(long)]
    pub no_extract: bool,
}

#[derive(Args, Debug)]
pub struct Iso639Params {
    /// Code list to download: "639-3" (default) or "639-2"
    #[arg(short, long, value_enum, default_value_t = IsoStandard::Iso639_3)]
    pub standard: IsoStandard,
    /// Directory to download into (default: current directory)
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
    /// File name for the list (default: iso-639-3.tab or iso-639-2.tab)
    #[arg(long)]
    pub out_name: Option<String>,
}

#[derive(Args, Debug)]
pub struct TableParams {
    /// Extracted dump directory holding langvar.csv, expr.csv, denotation.csv (default: $PANLEX_DIR)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tsv)]
    pub format: OutputFormat,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct MonolingualParams {
    /// Language code, e.g. "ind"
    pub lang: String,
    #[command(flatten)]
    pub table: TableParams,
}

#[derive(Args, Debug)]
pub struct BilingualParams {
    /// Source language code, e.g. "ind"
    pub source: String,
    /// Target language code, e.g. "eng"
    pub target: String,
    #[command(flatten)]
    pub table: TableParams,
}

#[derive(Args, Debug)]
pub struct LanguagesParams {
    #[command(flatten)]
    pub table: TableParams,
    /// ISO 639-3 name index used to annotate codes with names
    #[arg(long)]
    pub iso_index: Option<PathBuf>,
}
