//! HTTP client wrapper - one method per backend endpoint

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    CreateFolderInput, Cursor, FileListing, Folder, FolderPage, FolderUpdate, Image, ImagePage,
    ImageRecord, ImageUpload, SignedUpload, SortOptions,
};

const GENERIC_ERROR: &str = "API Error";

/// Thin client over the folder/image REST API
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    page_limit: u32,
}

impl ApiClient {
    pub fn new(base_url: &str, page_limit: u32, timeout: Option<Duration>) -> ApiResult<Self> {
        Ok(ApiClient {
            http: create_client(timeout),
            base_url: parse_base_url(base_url)?,
            page_limit,
        })
    }

    // ========================
    // Folders
    // ========================

    pub async fn get_folders(
        &self,
        parent_id: &str,
        cursor: Option<&Cursor>,
        sort: SortOptions,
    ) -> ApiResult<FolderPage> {
        let mut url = self.endpoint(&["folders"])?;
        url.query_pairs_mut().append_pair("parentId", parent_id);
        self.append_listing_params(&mut url, cursor, sort);

        tracing::debug!(%url, "Fetching folders");
        let resp = self.http.get(url).send().await?;
        handle(resp, GENERIC_ERROR).await
    }

    pub async fn get_folder(&self, id: &str) -> ApiResult<Folder> {
        let url = self.endpoint(&["folders", id])?;
        let resp = self.http.get(url).send().await?;
        handle(resp, GENERIC_ERROR).await
    }

    pub async fn create_folder(&self, input: &CreateFolderInput) -> ApiResult<Folder> {
        let url = self.endpoint(&["folders"])?;
        tracing::debug!(%url, name = %input.name, parent = %input.parent_id, "Creating folder");
        let resp = self.http.post(url).json(input).send().await?;
        handle(resp, "Failed to create folder").await
    }

    pub async fn update_folder(&self, id: &str, update: &FolderUpdate) -> ApiResult<Folder> {
        let url = self.endpoint(&["folders", id])?;
        let resp = self.http.patch(url).json(update).send().await?;
        handle(resp, "Failed to update folder").await
    }

    pub async fn delete_folder(&self, id: &str) -> ApiResult<()> {
        let url = self.endpoint(&["folders", id])?;
        let resp = self.http.delete(url).send().await?;
        handle_empty(resp, "Failed to delete folder").await
    }

    // ========================
    // Files
    // ========================

    pub async fn get_files(&self, folder_id: &str) -> ApiResult<FileListing> {
        let mut url = self.endpoint(&["files"])?;
        url.query_pairs_mut().append_pair("folderId", folder_id);
        let resp = self.http.get(url).send().await?;
        handle(resp, GENERIC_ERROR).await
    }

    // ========================
    // Images
    // ========================

    pub async fn get_images(
        &self,
        folder_id: &str,
        cursor: Option<&Cursor>,
        sort: SortOptions,
    ) -> ApiResult<ImagePage> {
        let mut url = self.endpoint(&["folders", folder_id, "images"])?;
        self.append_listing_params(&mut url, cursor, sort);

        tracing::debug!(%url, "Fetching images");
        let resp = self.http.get(url).send().await?;
        handle(resp, GENERIC_ERROR).await
    }

    /// Step 1 of an upload: ask the backend for a signed storage URL
    pub async fn request_upload_url(&self, folder_id: &str, filename: &str) -> ApiResult<SignedUpload> {
        let mut url = self.endpoint(&["folders", folder_id, "images", "upload"])?;
        url.query_pairs_mut().append_pair("filename", filename);
        let resp = self.http.get(url).send().await?;
        handle(resp, GENERIC_ERROR).await
    }

    /// Step 2 of an upload: PUT the raw bytes straight to object storage
    pub async fn put_object(&self, upload_url: &str, upload: &ImageUpload) -> ApiResult<()> {
        let resp = self
            .http
            .put(upload_url)
            .header(reqwest::header::CONTENT_TYPE, upload.content_type.as_str())
            .body(upload.bytes.clone())
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ApiError::Status {
                status: resp.status().as_u16(),
                message: "Failed to upload image to storage".to_string(),
            });
        }
        Ok(())
    }

    /// Step 3 of an upload: register the stored object as an image
    pub async fn register_image(&self, folder_id: &str, record: &ImageRecord) -> ApiResult<Image> {
        let url = self.endpoint(&["folders", folder_id, "images"])?;
        let resp = self.http.post(url).json(record).send().await?;
        handle(resp, GENERIC_ERROR).await
    }

    /// Signed-URL upload. The first failing step aborts the rest; an object
    /// stored by step 2 is left behind when step 3 fails.
    pub async fn upload_image(&self, folder_id: &str, upload: &ImageUpload) -> ApiResult<Image> {
        let signed = self.request_upload_url(folder_id, &upload.name).await?;
        tracing::info!(folder_id, key = %signed.filename, bytes = upload.size(), "Uploading to signed URL");

        self.put_object(&signed.upload_url, upload).await?;

        let record = ImageRecord {
            key: signed.filename,
            name: upload.name.clone(),
            content_type: upload.content_type.clone(),
            size: upload.size(),
        };
        self.register_image(folder_id, &record).await
    }

    pub async fn delete_image(&self, folder_id: &str, id: &str, filename: &str) -> ApiResult<()> {
        let mut url = self.endpoint(&["folders", folder_id, "images", id])?;
        url.query_pairs_mut().append_pair("filename", filename);
        let resp = self.http.delete(url).send().await?;
        handle_empty(resp, "Failed to delete image").await
    }

    // ========================
    // URL building
    // ========================

    /// Join path segments onto the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::validation(format!("Base URL cannot hold a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn append_listing_params(&self, url: &mut Url, cursor: Option<&Cursor>, sort: SortOptions) {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("sortField", sort.field.as_str())
            .append_pair("sortDirection", sort.direction.as_str());
        if let Some(cursor) = cursor {
            query.append_pair("page", cursor.as_str());
        }
        query.append_pair("limit", &self.page_limit.to_string());
    }
}

/// Validate and normalize the configured base URL
pub fn parse_base_url(base_url: &str) -> ApiResult<Url> {
    let url = Url::parse(base_url.trim())
        .map_err(|e| ApiError::validation(format!("Invalid base URL '{}': {}", base_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::validation(format!("Invalid base URL '{}'", base_url)));
    }
    Ok(url)
}

/// Decode a JSON body, or turn a non-success status into an error carrying
/// the server's `message`
async fn handle<T: DeserializeOwned>(resp: Response, fallback: &str) -> ApiResult<T> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(status_error(status, &body, fallback));
    }
    Ok(serde_json::from_str(&body)?)
}

/// Like [`handle`] for endpoints that answer with 204 or an ignorable body
async fn handle_empty(resp: Response, fallback: &str) -> ApiResult<()> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let body = resp.text().await.unwrap_or_default();
    Err(status_error(status, &body, fallback))
}

pub(crate) fn status_error(status: StatusCode, body: &str, fallback: &str) -> ApiError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string());

    tracing::warn!(status = status.as_u16(), %message, "Backend returned an error");
    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

/// Create an HTTP client. Without a timeout, requests (including large
/// uploads) run for as long as the transport allows.
pub fn create_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}
