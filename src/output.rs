use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde_json::{Map, Value};

use crate::panlex::types::LanguageVariant;
use crate::panlex::{BilingualLexicon, MonolingualLexicon};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Tsv,
    Csv,
    Json,
}

impl OutputFormat {
    fn delimiter(self) -> u8 {
        match self {
            OutputFormat::Csv => b',',
            _ => b'\t',
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write failed: {0}")]
    Io(#[from] io::Error),

    #[error("write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writer for `path`, or stdout when `None`.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, OutputError> {
    match path {
        Some(p) => {
            let file = File::create(p).map_err(|source| OutputError::Create {
                path: p.to_path_buf(),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn table_writer<W: Write>(format: OutputFormat, out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_writer(out)
}

/// One column headed by the language code; terms in sorted order.
pub fn write_monolingual<W: Write>(
    lexicon: &MonolingualLexicon,
    format: OutputFormat,
    mut out: W,
) -> Result<(), OutputError> {
    if format == OutputFormat::Json {
        let mut obj = Map::new();
        obj.insert(
            lexicon.lang.clone(),
            Value::from(lexicon.terms.iter().cloned().collect::<Vec<_>>()),
        );
        serde_json::to_writer_pretty(&mut out, &obj)?;
        writeln!(out)?;
        out.flush()?;
        return Ok(());
    }

    let mut wtr = table_writer(format, out);
    wtr.write_record([&lexicon.lang])?;
    for term in &lexicon.terms {
        wtr.write_record([term])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Two columns headed by the language codes; rows in extraction order.
/// Null text is an empty field (`null` in JSON).
pub fn write_bilingual<W: Write>(
    lexicon: &BilingualLexicon,
    format: OutputFormat,
    mut out: W,
) -> Result<(), OutputError> {
    if format == OutputFormat::Json {
        // Same code on both sides would collide as object keys.
        let rows: Vec<Value> = lexicon
            .pairs
            .iter()
            .map(|p| {
                Value::Array(vec![
                    Value::from(p.source.clone()),
                    Value::from(p.target.clone()),
                ])
            })
            .collect();
        let doc = serde_json::json!({
            "columns": [lexicon.source_lang, lexicon.target_lang],
            "rows": rows,
        });
        serde_json::to_writer_pretty(&mut out, &doc)?;
        writeln!(out)?;
        out.flush()?;
        return Ok(());
    }

    let mut wtr = table_writer(format, out);
    wtr.write_record([&lexicon.source_lang, &lexicon.target_lang])?;
    for pair in &lexicon.pairs {
        wtr.write_record([
            pair.source.as_deref().unwrap_or(""),
            pair.target.as_deref().unwrap_or(""),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// `lang_code`, `id`, `name` rows for canonical variants.
pub fn write_languages<W: Write>(
    rows: &[(&LanguageVariant, Option<&str>)],
    format: OutputFormat,
    mut out: W,
) -> Result<(), OutputError> {
    if format == OutputFormat::Json {
        let doc: Vec<Value> = rows
            .iter()
            .map(|(v, name)| {
                serde_json::json!({
                    "lang_code": v.lang_code,
                    "id": v.id,
                    "name": name,
                })
            })
            .collect();
        serde_json::to_writer_pretty(&mut out, &doc)?;
        writeln!(out)?;
        out.flush()?;
        return Ok(());
    }

    let mut wtr = table_writer(format, out);
    wtr.write_record(["lang_code", "id", "name"])?;
    for (variant, name) in rows {
        wtr.write_record([
            variant.lang_code.as_str(),
            variant.id.to_string().as_str(),
            name.unwrap_or(""),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
