//! Model provisioning: acquire, load, and memoize the spam model

use crate::model::{BertSpamModel, DeviceType};
use crate::source::ModelSource;
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use textguard_core::{Error, Result};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
// Whole-request budget; model archives run to hundreds of megabytes.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// Directory name the artifact is expected to use inside the archive.
pub const DEFAULT_ARCHIVE_ROOT: &str = "textguard_bert";

/// Produces a ready-to-use model handle exactly once per process.
///
/// The first successful [`get`](Self::get) performs the full acquisition
/// (download, extraction, load for remote sources; a direct load for local
/// ones) and memoizes the handle; later calls return the cached handle
/// without repeating network or filesystem work. A failed acquisition
/// leaves the cache empty, so the next call retries from scratch.
///
/// Concurrent first-time callers are serialized behind the cache guard;
/// only one acquisition runs at a time.
pub struct ModelProvisioner {
    source: ModelSource,
    archive_root: String,
    device: DeviceType,
    staging_dir: Option<PathBuf>,
    cache: Mutex<Option<Arc<BertSpamModel>>>,
}

impl ModelProvisioner {
    /// Create a provisioner for the given source.
    pub fn new(source: ModelSource) -> Self {
        Self {
            source,
            archive_root: DEFAULT_ARCHIVE_ROOT.to_string(),
            device: DeviceType::Cpu,
            staging_dir: None,
            cache: Mutex::new(None),
        }
    }

    /// Set the expected artifact directory name inside a remote archive.
    pub fn with_archive_root(mut self, name: impl Into<String>) -> Self {
        self.archive_root = name.into();
        self
    }

    /// Set the inference device.
    pub fn with_device(mut self, device: DeviceType) -> Self {
        self.device = device;
        self
    }

    /// Set the parent directory for download staging. Defaults to the
    /// system temp directory; staging is removed on every exit path either
    /// way.
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    /// The configured source.
    pub fn source(&self) -> &ModelSource {
        &self.source
    }

    /// Whether a handle is already cached.
    pub async fn is_loaded(&self) -> bool {
        self.cache.lock().await.is_some()
    }

    /// Return the loaded model handle, acquiring it on first use.
    pub async fn get(&self) -> Result<Arc<BertSpamModel>> {
        let mut cached = self.cache.lock().await;
        if let Some(model) = cached.as_ref() {
            tracing::debug!("returning cached model handle");
            return Ok(model.clone());
        }

        let model = Arc::new(self.acquire().await?);
        *cached = Some(model.clone());
        Ok(model)
    }

    async fn acquire(&self) -> Result<BertSpamModel> {
        match &self.source {
            ModelSource::LocalDir(path) => {
                tracing::info!(path = %path.display(), "loading model from local directory");
                if !path.is_dir() {
                    return Err(Error::model_load(format!(
                        "model directory not found: {}",
                        path.display()
                    )));
                }
                BertSpamModel::load(path, self.device)
            }
            ModelSource::RemoteArchive { url } => {
                // Staging area for the archive and its extracted contents.
                // Dropping the TempDir removes everything on every exit
                // path, success or failure.
                let staging = match &self.staging_dir {
                    Some(parent) => tempfile::tempdir_in(parent),
                    None => tempfile::tempdir(),
                }
                .map_err(|e| {
                    Error::download(format!("failed to create staging directory: {e}"))
                })?;

                let archive_path = staging.path().join("model.zip");
                self.download_archive(url, &archive_path).await?;

                let extracted = staging.path().join("extracted");
                extract_archive(&archive_path, &extracted)?;

                let root = resolve_model_root(&extracted, &self.archive_root)?;
                BertSpamModel::load(&root, self.device)
            }
        }
    }

    async fn download_archive(&self, url: &str, dest: &Path) -> Result<()> {
        tracing::info!(%url, "downloading model archive");

        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .map_err(|e| Error::download(format!("failed to build HTTP client: {e}")))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::download(format!("GET {url} failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::download(format!("GET {url} returned {status}")));
        }

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| Error::download(format!("failed to create archive file: {e}")))?;

        let mut stream = response.bytes_stream();
        let mut total: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk =
                chunk.map_err(|e| Error::download(format!("download stream failed: {e}")))?;
            total += chunk.len() as u64;
            file.write_all(&chunk)
                .await
                .map_err(|e| Error::download(format!("failed to write archive: {e}")))?;
        }
        file.flush()
            .await
            .map_err(|e| Error::download(format!("failed to flush archive: {e}")))?;

        tracing::info!(bytes = total, "model archive downloaded");
        Ok(())
    }
}

fn extract_archive(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = std::fs::File::open(archive_path)
        .map_err(|e| Error::extraction(format!("failed to open archive: {e}")))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| Error::extraction(format!("failed to read archive: {e}")))?;

    if archive.is_empty() {
        return Err(Error::extraction("archive contains no entries"));
    }

    archive
        .extract(dest)
        .map_err(|e| Error::extraction(format!("failed to extract archive: {e}")))?;

    tracing::info!(entries = archive.len(), dest = %dest.display(), "archive extracted");
    Ok(())
}

/// Locate the artifact directory inside an extracted archive.
///
/// Prefers an exact match on `expected`; otherwise falls back to the first
/// subdirectory in name order, so resolution is deterministic when the
/// archive carries an unexpected layout.
fn resolve_model_root(extracted: &Path, expected: &str) -> Result<PathBuf> {
    let candidate = extracted.join(expected);
    if candidate.is_dir() {
        return Ok(candidate);
    }

    let mut dirs: Vec<PathBuf> = std::fs::read_dir(extracted)
        .map_err(|e| Error::model_load(format!("failed to read extracted archive: {e}")))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    match dirs.into_iter().next() {
        Some(dir) => {
            tracing::warn!(
                expected,
                found = %dir.display(),
                "expected artifact directory missing, falling back to first directory"
            );
            Ok(dir)
        }
        None => Err(Error::model_load(format!(
            "no model directory found in extracted archive (expected '{expected}')"
        ))),
    }
}
