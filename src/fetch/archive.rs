use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::panlex::tables::LANGVAR_FILE;

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("invalid archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to extract {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Unpack every file of a zip archive under `out_dir`.
///
/// Entries whose names would escape `out_dir` are skipped.
pub fn extract_archive(zip_path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ArchiveError::Io { path, source }
    };

    let file = File::open(zip_path).map_err(io_err(zip_path))?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut extracted = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(relative) = entry.enclosed_name() else {
            warn!(name = entry.name(), "skipping archive entry outside target dir");
            continue;
        };
        let dest = out_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&dest).map_err(io_err(&dest))?;
            continue;
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
        let mut out = File::create(&dest).map_err(io_err(&dest))?;
        io::copy(&mut entry, &mut out).map_err(io_err(&dest))?;
        debug!(path = %dest.display(), "extracted");
        extracted.push(dest);
    }

    Ok(extracted)
}

/// Directory containing the extracted `langvar.csv`, if any.
pub fn tables_dir(files: &[PathBuf]) -> Option<PathBuf> {
    files
        .iter()
        .find(|p| p.file_name().is_some_and(|n| n == LANGVAR_FILE))
        .and_then(|p| p.parent())
        .map(Path::to_path_buf)
}
