//! Review submission command handlers.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use hcr_backend::BackendClient;
use hcr_core::{upload_path, AppConfig, ReviewDraft, ReviewSubmission};

use crate::resolve::resolve_text;

/// On-disk shape of a review draft file: the form fields plus the address
/// line the user would have typed.
#[derive(Debug, Deserialize)]
struct DraftFile {
    address: String,
    #[serde(flatten)]
    draft: ReviewDraft,
}

/// Validate the draft in `file`, resolve its address, upload each photo,
/// and submit the assembled review.
///
/// When `dry_run` is `true` the assembled payload is printed and nothing is
/// uploaded or submitted.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, validation fails,
/// any photo upload fails, or the final insert is rejected.
pub(crate) async fn run_submit(
    config: &AppConfig,
    contractor: Uuid,
    file: &Path,
    photos: &[PathBuf],
    dry_run: bool,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;
    let parsed: DraftFile = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", file.display()))?;

    let address = resolve_text(config, &parsed.address, true).await?;

    if dry_run {
        let submission =
            ReviewSubmission::assemble(contractor, &parsed.draft, &address, Vec::new())?;
        println!("{}", serde_json::to_string_pretty(&submission)?);
        return Ok(());
    }

    let client = BackendClient::new(
        &config.backend_url,
        &config.backend_api_key,
        config.request_timeout_secs,
    )?;

    let mut files = Vec::with_capacity(photos.len());
    for photo in photos {
        let bytes = std::fs::read(photo)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", photo.display()))?;
        let file_name = photo
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("photo path has no usable file name: {}", photo.display()))?;

        let path = upload_path(contractor, file_name, Utc::now());
        let url = client
            .upload_object(
                &config.storage_bucket,
                &path,
                bytes,
                content_type_for(file_name),
            )
            .await?;
        tracing::info!(%url, "photo uploaded");
        files.push(url);
    }

    let submission = ReviewSubmission::assemble(contractor, &parsed.draft, &address, files)?;
    client.submit_review(&submission).await?;

    println!(
        "review submitted for contractor {contractor} ({} photos)",
        submission.files.len()
    );
    Ok(())
}

/// Print the project-type reference list, one `id\tname` row per line.
///
/// # Errors
///
/// Returns an error if the backend request fails.
pub(crate) async fn run_services(config: &AppConfig) -> anyhow::Result<()> {
    let client = BackendClient::new(
        &config.backend_url,
        &config.backend_api_key,
        config.request_timeout_secs,
    )?;

    let services = client.list_services().await?;
    for service in &services {
        println!("{}\t{}", service.id, service.name);
    }
    println!("{} project types", services.len());
    Ok(())
}

fn content_type_for(file_name: &str) -> &'static str {
    match file_name.rsplit('.').next().map(str::to_ascii_lowercase) {
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "webp" => "image/webp",
        Some(ext) if ext == "gif" => "image/gif",
        Some(ext) if ext == "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}
