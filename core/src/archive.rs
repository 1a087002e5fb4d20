//! Catalog archive acquisition.
//!
//! A catalog is fetched as a branch tarball into a fresh scratch container
//! under the system temp directory and unpacked in place. The returned
//! [`ScratchExtraction`] owns that container and removes it when released
//! or dropped, so every exit path of a command cleans up after itself.

use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::config::CatalogSource;
use crate::error::{Error, Result};

const ARCHIVE_FILE: &str = "repo.tar.gz";
const SCRATCH_PREFIX: &str = "skills-";
const USER_AGENT: &str = concat!("skillset/", env!("CARGO_PKG_VERSION"));

/// Branch archive URL for a catalog source.
pub fn archive_url(source: &CatalogSource) -> String {
    format!(
        "https://github.com/{}/archive/refs/heads/{}.tar.gz",
        source.repo, source.branch
    )
}

/// An unpacked catalog living in a scratch container.
#[derive(Debug)]
pub struct ScratchExtraction {
    container: PathBuf,
    root: PathBuf,
    released: bool,
}

impl ScratchExtraction {
    /// Root directory of the extracted source tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn container(&self) -> &Path {
        &self.container
    }

    /// Remove the scratch container now instead of at drop.
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            remove_container(&self.container);
        }
    }
}

impl Drop for ScratchExtraction {
    fn drop(&mut self) {
        self.release_once();
    }
}

/// Download and unpack the catalog for `source`.
pub async fn acquire(source: &CatalogSource) -> Result<ScratchExtraction> {
    let url = archive_url(source);
    let container = create_container()?;

    let result = async {
        tracing::debug!(%url, container = %container.display(), "Downloading catalog archive");
        let bytes = download(&url).await?;
        unpack_into(&container, bytes).await
    }
    .await;

    finish(container, result)
}

/// Unpack a catalog tarball that is already on disk.
pub async fn acquire_local(archive: &Path) -> Result<ScratchExtraction> {
    let container = create_container()?;

    let result = async {
        let bytes = tokio::fs::read(archive).await.map_err(|e| {
            Error::Acquisition(format!("could not read {}: {e}", archive.display()))
        })?;
        unpack_into(&container, bytes).await
    }
    .await;

    finish(container, result)
}

/// Remove the scratch container that holds `extracted_root`.
///
/// Never fails; cleanup errors are logged and dropped so they cannot hide
/// an error that is already propagating.
pub fn release(extracted_root: &Path) {
    if let Some(container) = extracted_root.parent() {
        remove_container(container);
    }
}

fn remove_container(container: &Path) {
    match std::fs::remove_dir_all(container) {
        Ok(()) => tracing::debug!(container = %container.display(), "Released catalog scratch"),
        Err(e) => tracing::debug!(
            "Could not remove scratch directory {}: {}",
            container.display(),
            e
        ),
    }
}

fn create_container() -> Result<PathBuf> {
    let unique = uuid::Uuid::new_v4().simple().to_string();
    let container = std::env::temp_dir().join(format!(
        "{SCRATCH_PREFIX}{}-{}",
        chrono::Utc::now().timestamp_millis(),
        &unique[..8]
    ));

    std::fs::create_dir_all(&container).map_err(|e| {
        Error::Acquisition(format!(
            "could not create scratch directory {}: {e}",
            container.display()
        ))
    })?;
    Ok(container)
}

fn finish(container: PathBuf, result: Result<PathBuf>) -> Result<ScratchExtraction> {
    match result {
        Ok(root) => Ok(ScratchExtraction {
            container,
            root,
            released: false,
        }),
        Err(e) => {
            remove_container(&container);
            Err(e)
        }
    }
}

async fn download(url: &str) -> Result<Vec<u8>> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::Acquisition(format!("could not build HTTP client: {e}")))?;

    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Acquisition(format!("request to {url} failed: {e}")))?;

    if !resp.status().is_success() {
        return Err(Error::Acquisition(format!(
            "{url} returned HTTP {}",
            resp.status()
        )));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| Error::Acquisition(format!("failed to read response from {url}: {e}")))?;
    Ok(bytes.to_vec())
}

async fn unpack_into(container: &Path, bytes: Vec<u8>) -> Result<PathBuf> {
    if bytes.is_empty() {
        return Err(Error::Acquisition("downloaded archive is empty".to_string()));
    }

    let archive_path = container.join(ARCHIVE_FILE);
    tokio::fs::write(&archive_path, &bytes)
        .await
        .map_err(|e| Error::Acquisition(format!("could not save archive: {e}")))?;

    let dest = container.to_path_buf();
    tokio::task::spawn_blocking(move || extract_archive(&archive_path, &dest))
        .await
        .map_err(|e| Error::Acquisition(format!("extraction task failed: {e}")))??;

    find_extracted_root(container)
}

/// Unpack a gzipped tarball into `dest`. Links are skipped and entries that
/// would land outside `dest` are refused.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<()> {
    let unpack_err = |e: std::io::Error| Error::Acquisition(format!("could not unpack archive: {e}"));

    let file = std::fs::File::open(archive_path).map_err(unpack_err)?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));

    for entry in archive.entries().map_err(unpack_err)? {
        let mut entry = entry.map_err(unpack_err)?;
        let kind = entry.header().entry_type();
        if kind.is_symlink() || kind.is_hard_link() {
            tracing::debug!("Skipping link entry in catalog archive");
            continue;
        }

        if !entry.unpack_in(dest).map_err(unpack_err)? {
            tracing::warn!("Refusing archive entry outside of {}", dest.display());
        }
    }

    Ok(())
}

/// The extracted tree is whatever the container holds besides the archive.
pub fn find_extracted_root(container: &Path) -> Result<PathBuf> {
    let entries = std::fs::read_dir(container)
        .map_err(|e| Error::Acquisition(format!("could not list scratch directory: {e}")))?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name() != ARCHIVE_FILE)
        .map(|entry| entry.path())
        .collect();
    candidates.sort();

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| Error::Acquisition("archive did not contain a source tree".to_string()))
}
