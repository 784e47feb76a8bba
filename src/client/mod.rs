//! REST client for the fleet backend.
//!
//! Thin wrappers over the backend contract, one module per entity family.
//! Every mutating call validates its path arguments locally first, so a
//! validation failure never reaches the network.

mod batch;
mod files;
mod floors;
mod printers;
mod tags;

pub use batch::*;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::errors::AppError;

/// Header name for the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Route builders for the backend surface.
pub(crate) mod routes {
    pub const FILE_STORAGE: &str = "/api/file-storage";
    pub const DIRECTORIES: &str = "/api/file-storage/directories";
    pub const DIRECTORY_TREE: &str = "/api/file-storage/tree";
    pub const FLOORS: &str = "/api/floors";
    pub const PRINTER_TAGS: &str = "/api/printer-tags";
    pub const PRINTERS: &str = "/api/printers";

    pub fn file(file_storage_id: &str) -> String {
        format!("{}/{}", FILE_STORAGE, file_storage_id)
    }

    pub fn directory(marker_id: &str) -> String {
        format!("{}/{}", DIRECTORIES, marker_id)
    }

    pub fn floor(floor_id: i64) -> String {
        format!("{}/{}", FLOORS, floor_id)
    }

    pub fn floor_name(floor_id: i64) -> String {
        format!("{}/{}/name", FLOORS, floor_id)
    }

    pub fn floor_order(floor_id: i64) -> String {
        format!("{}/{}/order", FLOORS, floor_id)
    }

    pub fn floor_printers(floor_id: i64) -> String {
        format!("{}/{}/printers", FLOORS, floor_id)
    }

    pub fn tag(tag_id: i64) -> String {
        format!("{}/{}", PRINTER_TAGS, tag_id)
    }

    pub fn tag_name(tag_id: i64) -> String {
        format!("{}/{}/name", PRINTER_TAGS, tag_id)
    }

    pub fn tag_printers(tag_id: i64) -> String {
        format!("{}/{}/printers", PRINTER_TAGS, tag_id)
    }
}

/// Async client for the fleet backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration. The API key, when configured, is
    /// attached to every request as a default header.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| AppError::Config("API key contains invalid characters".to_string()))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        tracing::debug!(path, "GET");
        let resp = self.http.get(self.url(path)).send().await?;
        Ok(check(path, resp).await?.json().await?)
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        tracing::debug!(path, "POST");
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        Ok(check(path, resp).await?.json().await?)
    }

    pub(crate) async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        tracing::debug!(path, "PATCH");
        let resp = self.http.patch(self.url(path)).json(body).send().await?;
        Ok(check(path, resp).await?.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), AppError> {
        tracing::debug!(path, "DELETE");
        let resp = self.http.delete(self.url(path)).send().await?;
        check(path, resp).await?;
        Ok(())
    }

    pub(crate) async fn delete_with_body<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        tracing::debug!(path, "DELETE");
        let resp = self.http.delete(self.url(path)).json(body).send().await?;
        Ok(check(path, resp).await?.json().await?)
    }
}

/// Map non-success statuses onto the error taxonomy, keeping the backend's
/// body text when it provides one.
async fn check(path: &str, resp: Response) -> Result<Response, AppError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(AppError::NotFound(format!("{} not found", path)));
    }

    let body = resp.text().await.unwrap_or_default();
    let message = if body.is_empty() {
        format!("Request to {} failed", path)
    } else {
        body
    };
    Err(AppError::Http {
        message,
        status: Some(status.as_u16()),
    })
}
