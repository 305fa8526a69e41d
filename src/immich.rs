// SPDX-License-Identifier: GPL-3.0-or-later

//! Random photos from an Immich server.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;

use crate::photo::{OrientedImage, Photo, PhotoSource};
use crate::{Error, Res};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("no usable asset available")]
    NotFound,

    #[error("{0}")]
    Transient(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transient(err.to_string())
    }
}

/// A downloaded asset.
#[derive(Debug, Clone)]
pub struct Asset {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub filename: String,
    pub kind: String,
}

impl Asset {
    pub fn is_video(&self) -> bool {
        is_video(&self.kind, Some(&self.mime_type), &self.filename)
    }
}

fn is_video(kind: &str, mime_type: Option<&str>, filename: &str) -> bool {
    let filename = filename.to_lowercase();
    kind.eq_ignore_ascii_case("VIDEO")
        || mime_type.is_some_and(|m| m.to_lowercase().starts_with("video/"))
        || filename.ends_with(".mov")
        || filename.ends_with(".mp4")
}

pub trait RemoteSource {
    fn fetch_random_asset(&mut self) -> Result<Asset, FetchError>;
}

/// Fetch one usable (non-video) asset, trying at most `attempts` times
/// with no delay in between. Empty results, videos and transient errors
/// all consume an attempt.
pub fn fetch_with_retry<S: RemoteSource + ?Sized>(source: &mut S, attempts: u32) -> Res<Asset> {
    for attempt in 1..=attempts {
        match source.fetch_random_asset() {
            Ok(asset) if asset.is_video() => {
                log::warn!("attempt {attempt}/{attempts}: skipping video {}", asset.filename);
            }
            Ok(asset) => return Ok(asset),
            Err(err) => {
                log::warn!("attempt {attempt}/{attempts}: {err}");
            }
        }
    }

    Err(Error::Fetch(format!("no photo after {attempts} attempts")))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetInfo {
    id: String,
    original_file_name: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    original_mime_type: Option<String>,
}

impl AssetInfo {
    fn is_video(&self) -> bool {
        is_video(
            &self.kind,
            self.original_mime_type.as_deref(),
            &self.original_file_name,
        )
    }
}

fn pick_photo(assets: Vec<AssetInfo>) -> Option<AssetInfo> {
    assets.into_iter().find(|a| !a.is_video())
}

pub struct ImmichClient {
    client: Client,
    base_url: String,
    batch: u32,
}

impl ImmichClient {
    pub fn new(base_url: &str, api_key: &str, batch: u32) -> Res<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|err| Error::Config(format!("invalid api key: {err}")))?;
        headers.insert("x-api-key", key);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| Error::Config(format!("cannot create http client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            batch,
        })
    }

    fn random_assets(&self) -> Result<Vec<AssetInfo>, FetchError> {
        let url = format!("{}/api/assets/random", self.base_url);
        let assets = self
            .client
            .get(url)
            .query(&[("count", self.batch)])
            .send()?
            .error_for_status()?
            .json::<Vec<AssetInfo>>()?;
        Ok(assets)
    }

    fn download(&self, info: &AssetInfo) -> Result<Asset, FetchError> {
        let url = format!("{}/api/assets/{}/original", self.base_url, info.id);
        let response = self.client.get(url).send()?.error_for_status()?;

        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| info.original_mime_type.clone())
            .unwrap_or_default();
        let bytes = response.bytes()?.to_vec();

        Ok(Asset {
            bytes,
            mime_type,
            filename: info.original_file_name.clone(),
            kind: info.kind.clone(),
        })
    }
}

impl RemoteSource for ImmichClient {
    fn fetch_random_asset(&mut self) -> Result<Asset, FetchError> {
        let info = pick_photo(self.random_assets()?).ok_or(FetchError::NotFound)?;
        log::info!("selected {} ({})", info.original_file_name, info.id);
        self.download(&info)
    }
}

/// Photo source backed by a remote service, with bounded retry.
pub struct RemotePhotos<S: RemoteSource> {
    source: S,
    attempts: u32,
}

impl<S: RemoteSource> RemotePhotos<S> {
    pub fn new(source: S, attempts: u32) -> Self {
        Self { source, attempts }
    }
}

impl<S: RemoteSource> PhotoSource for RemotePhotos<S> {
    fn next_photo(&mut self, _current: Option<usize>) -> Res<Photo> {
        let asset = fetch_with_retry(&mut self.source, self.attempts)?;
        log::info!(
            "fetched {} ({}, {} bytes)",
            asset.filename,
            asset.mime_type,
            asset.bytes.len()
        );
        let image = OrientedImage::decode(&asset.filename, &asset.bytes)?;
        Ok(Photo { image, index: None })
    }
}
