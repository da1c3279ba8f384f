//! Reads a built site from disk the way the browser would fetch it.

use std::path::Path;

use serde::de::DeserializeOwned;
use world_archive_core::loader::parse;
use world_archive_core::{
    HistoryDocument, HistoryEvent, LoadError, MemoryImage, Resource, Sign, ThanksEntry, Version,
};

use crate::config::SiteConfig;

const MANIFEST_NAME: &str = "MEMORY_IMAGES";

/// Every document the page loads. Failed loads leave their part empty and
/// record the error.
#[derive(Debug, Default)]
pub struct SiteData {
    pub versions: Vec<Version>,
    pub signs: Vec<Sign>,
    pub events: Vec<HistoryEvent>,
    pub thanks: Vec<ThanksEntry>,
    pub images: Vec<MemoryImage>,
    pub errors: Vec<String>,
}

impl SiteData {
    /// Reads the three JSON documents and the image manifest concurrently.
    pub async fn load(config: &SiteConfig) -> Self {
        let versions_path = config.resource_path(Resource::Versions.file_name());
        let signs_path = config.resource_path(Resource::Signs.file_name());
        let history_path = config.resource_path(Resource::History.file_name());

        let (versions, signs, history, images) = tokio::join!(
            read_json::<Vec<Version>>(&versions_path),
            read_json::<Vec<Sign>>(&signs_path),
            read_json::<HistoryDocument>(&history_path),
            read_manifest(&config.images_manifest),
        );

        let mut errors = Vec::new();
        let (events, thanks) = keep(&mut errors, history).into_parts();
        let data = Self {
            versions: keep(&mut errors, versions),
            signs: keep(&mut errors, signs),
            events,
            thanks,
            images: keep(&mut errors, images),
            errors,
        };

        tracing::info!(
            versions = data.versions.len(),
            signs = data.signs.len(),
            events = data.events.len(),
            thanks = data.thanks.len(),
            images = data.images.len(),
            errors = data.errors.len(),
            "site loaded"
        );
        data
    }
}

fn keep<T: Default>(errors: &mut Vec<String>, result: Result<T, LoadError>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!("{error}");
            errors.push(error.to_string());
            T::default()
        }
    }
}

async fn read_text(path: &Path) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            resource: path.display().to_string(),
            source,
        })
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let body = read_text(path).await?;
    parse(&path.display().to_string(), &body)
}

async fn read_manifest(path: &Path) -> Result<Vec<MemoryImage>, LoadError> {
    let body = read_text(path).await?;
    parse_manifest(&path.display().to_string(), &body)
}

/// Accepts either a plain JSON array or the generated
/// `const MEMORY_IMAGES = [...];` script.
pub fn parse_manifest(resource: &str, body: &str) -> Result<Vec<MemoryImage>, LoadError> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('[') {
        return parse(resource, trimmed);
    }

    let after_name = body
        .find(MANIFEST_NAME)
        .map_or(body, |index| &body[index + MANIFEST_NAME.len()..]);
    let (Some(start), Some(end)) = (after_name.find('['), after_name.rfind(']')) else {
        return Err(LoadError::decode(resource, "no image array found"));
    };
    if end < start {
        return Err(LoadError::decode(resource, "unbalanced image array"));
    }
    parse(resource, &after_name[start..=end])
}
