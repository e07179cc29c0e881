pub mod archive;
pub mod iso639;

use std::path::{Path, PathBuf};

use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use archive::{ArchiveError, extract_archive};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid dump version '{0}': expected YYYYMMDD")]
    InvalidVersion(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("download failed: status {0}")]
    Status(u16),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Archive URL of a dated PanLex CSV dump, e.g. `https://db.panlex.org/panlex-20230501-csv.zip`.
pub fn dump_url(base_url: &str, version: &str) -> Result<String, FetchError> {
    if version.len() != 8 || !version.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FetchError::InvalidVersion(version.to_string()));
    }
    url::Url::parse(base_url)?;
    Ok(format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        dump_file_name(version)
    ))
}

pub fn dump_file_name(version: &str) -> String {
    format!("panlex-{version}-csv.zip")
}

/// Download the CSV dump archive into `out_dir`, returning the archive path.
pub async fn download_dump(
    client: &Client,
    base_url: &str,
    version: &str,
    out_dir: &Path,
) -> Result<PathBuf, FetchError> {
    let url = dump_url(base_url, version)?;
    let out_path = out_dir.join(dump_file_name(version));
    info!(%url, path = %out_path.display(), "downloading panlex dump");
    let bytes = download_to_file(client, &url, &out_path).await?;
    info!(bytes, "panlex dump downloaded");
    Ok(out_path)
}

/// Download and unpack a dump. Returns the directory holding the extracted tables.
pub async fn download_and_extract(
    client: &Client,
    base_url: &str,
    version: &str,
    out_dir: &Path,
) -> Result<PathBuf, FetchError> {
    let zip_path = download_dump(client, base_url, version, out_dir).await?;
    let dest = out_dir.to_path_buf();
    let files = tokio::task::spawn_blocking(move || extract_archive(&zip_path, &dest)).await??;
    Ok(archive::tables_dir(&files).unwrap_or_else(|| out_dir.to_path_buf()))
}

/// Stream a response body to `out_path` chunk by chunk. Returns bytes written.
///
/// The body lands in `<out_path>.part` and is renamed into place only once
/// fully written, so `out_path` never holds a truncated download.
pub(crate) async fn download_to_file(
    client: &Client,
    url: &str,
    out_path: &Path,
) -> Result<u64, FetchError> {
    let response = client
        .get(url)
        .header("User-Agent", crate::USER_AGENT)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| FetchError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let part = part_path(out_path);
    let written = match stream_body(response, &part).await {
        Ok(n) => n,
        Err(e) => {
            discard_partial(&part).await;
            return Err(e);
        }
    };
    if let Err(source) = tokio::fs::rename(&part, out_path).await {
        discard_partial(&part).await;
        return Err(FetchError::Io {
            path: out_path.to_path_buf(),
            source,
        });
    }

    debug!(url, bytes = written, "download complete");
    Ok(written)
}

fn part_path(out_path: &Path) -> PathBuf {
    let mut name = out_path.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

async fn stream_body(mut response: reqwest::Response, path: &Path) -> Result<u64, FetchError> {
    let io_err = |source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = tokio::fs::File::create(path).await.map_err(io_err)?;

    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await.map_err(io_err)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(io_err)?;
    Ok(written)
}

async fn discard_partial(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        warn!(path = %path.display(), error = %e, "failed to remove partial download");
    }
}
