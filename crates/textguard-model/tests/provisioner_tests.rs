//! Provisioner tests: local-path failures and the remote acquisition path
//! against an in-process HTTP server.

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use textguard_model::{ModelProvisioner, ModelSource};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Serve `body` with `status` at `/model.zip`, counting hits.
async fn serve_archive(status: StatusCode, body: Vec<u8>, hits: Arc<AtomicU32>) -> SocketAddr {
    let app = Router::new().route(
        "/model.zip",
        get(move || {
            let body = body.clone();
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (status, body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    let mut writer = ZipWriter::new(&mut cursor);
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        if let Some(dir) = name.strip_suffix('/') {
            writer.add_directory(dir, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap();
    cursor.into_inner()
}

#[tokio::test]
async fn missing_local_directory_fails_with_model_load_error() {
    let provisioner = ModelProvisioner::new(ModelSource::from_local("/nonexistent/textguard_bert"));

    let err = provisioner.get().await.unwrap_err();
    assert_eq!(err.kind(), "model_load");

    // A failed acquisition must not populate the cache.
    assert!(!provisioner.is_loaded().await);
}

#[tokio::test]
async fn http_404_fails_with_download_error_and_retries_next_call() {
    let hits = Arc::new(AtomicU32::new(0));
    let addr = serve_archive(StatusCode::NOT_FOUND, Vec::new(), hits.clone()).await;

    let scratch = tempfile::tempdir().unwrap();
    let provisioner =
        ModelProvisioner::new(ModelSource::from_url(format!("http://{addr}/model.zip")))
            .with_staging_dir(scratch.path());

    let err = provisioner.get().await.unwrap_err();
    assert_eq!(err.kind(), "download");
    assert!(!provisioner.is_loaded().await);

    // The cache stayed empty, so the next call performs the full
    // acquisition again instead of returning a poisoned handle.
    let err = provisioner.get().await.unwrap_err();
    assert_eq!(err.kind(), "download");
    assert_eq!(hits.load(Ordering::SeqCst), 2);

    // No staging directories survive a failed download.
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn empty_archive_fails_with_extraction_error() {
    let hits = Arc::new(AtomicU32::new(0));
    let addr = serve_archive(StatusCode::OK, zip_bytes(&[]), hits.clone()).await;

    let provisioner =
        ModelProvisioner::new(ModelSource::from_url(format!("http://{addr}/model.zip")));

    let err = provisioner.get().await.unwrap_err();
    assert_eq!(err.kind(), "extraction");
    assert!(!provisioner.is_loaded().await);
}

#[tokio::test]
async fn malformed_artifact_fails_with_model_load_error() {
    // Download and extraction succeed; the artifact directory resolves by
    // exact name but its contents are garbage, so loading fails.
    let body = zip_bytes(&[
        ("textguard_bert/", b"".as_slice()),
        ("textguard_bert/config.json", b"not json at all"),
    ]);
    let hits = Arc::new(AtomicU32::new(0));
    let addr = serve_archive(StatusCode::OK, body, hits.clone()).await;

    let scratch = tempfile::tempdir().unwrap();
    let provisioner =
        ModelProvisioner::new(ModelSource::from_url(format!("http://{addr}/model.zip")))
            .with_staging_dir(scratch.path());

    let err = provisioner.get().await.unwrap_err();
    assert_eq!(err.kind(), "model_load");
    assert!(!provisioner.is_loaded().await);

    // The downloaded archive and its extracted tree were cleaned up even
    // though acquisition failed after extraction.
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn archive_without_expected_directory_falls_back() {
    // The expected name is absent; resolution falls back to the only
    // directory present, whose contents then fail to load.
    let body = zip_bytes(&[
        ("some_other_export/", b"".as_slice()),
        ("some_other_export/config.json", b"{ broken"),
    ]);
    let hits = Arc::new(AtomicU32::new(0));
    let addr = serve_archive(StatusCode::OK, body, hits.clone()).await;

    let provisioner =
        ModelProvisioner::new(ModelSource::from_url(format!("http://{addr}/model.zip")));

    let err = provisioner.get().await.unwrap_err();
    // Fallback resolution found the directory; the failure is the malformed
    // artifact inside it, not a missing directory.
    assert_eq!(err.kind(), "model_load");
    assert!(err.to_string().contains("config"), "unexpected error: {err}");
}
