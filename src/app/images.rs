//! Images of the folder currently on screen

use std::path::PathBuf;

use crate::app::listing::{PageRequest, Paged};
use crate::constants::ROOT_FOLDER_ID;
use crate::error::{ApiError, ApiResult};
use crate::messages::NetworkCommand;
use crate::models::{Image, ImagePage, SortOptions};

#[derive(Debug)]
pub struct ImageStore {
    folder_id: String,
    sort: SortOptions,
    listing: Paged<Image>,
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new(SortOptions::default())
    }
}

impl ImageStore {
    pub fn new(sort: SortOptions) -> Self {
        ImageStore {
            folder_id: ROOT_FOLDER_ID.to_string(),
            sort,
            listing: Paged::new(),
        }
    }

    pub fn folder_id(&self) -> &str {
        &self.folder_id
    }

    pub fn images(&self) -> &[Image] {
        self.listing.items()
    }

    pub fn listing(&self) -> &Paged<Image> {
        &self.listing
    }

    fn fetch(&self, request: PageRequest) -> NetworkCommand {
        NetworkCommand::FetchImages {
            request,
            folder_id: self.folder_id.clone(),
            sort: self.sort,
        }
    }

    /// Switch to another folder and/or order, fetching from the start
    pub fn show(&mut self, folder_id: &str, sort: SortOptions) -> NetworkCommand {
        self.folder_id = folder_id.to_string();
        self.sort = sort;
        self.refresh()
    }

    pub fn refresh(&mut self) -> NetworkCommand {
        let request = self.listing.first_page();
        self.fetch(request)
    }

    pub fn load_more(&mut self) -> Option<NetworkCommand> {
        let request = self.listing.next_page()?;
        Some(self.fetch(request))
    }

    /// Queue an upload of a local file into the current folder
    pub fn upload(&mut self, id: u64, path: &str) -> ApiResult<NetworkCommand> {
        let path = path.trim();
        if path.is_empty() {
            let err = ApiError::validation("File path is required");
            self.listing.set_error(err.clone());
            return Err(err);
        }
        Ok(NetworkCommand::UploadImage {
            id,
            folder_id: self.folder_id.clone(),
            path: expand_home(path),
        })
    }

    pub fn delete(&mut self, id: u64, image: &Image) -> NetworkCommand {
        NetworkCommand::DeleteImage {
            id,
            folder_id: image.folder_id.clone(),
            image_id: image.id.clone(),
            filename: image.key.clone(),
        }
    }

    pub fn apply_page(&mut self, request: &PageRequest, folder_id: &str, result: ApiResult<ImagePage>) {
        let applied = match result {
            Ok(page) => self.listing.apply_page(request, page.images, page.last_key),
            Err(err) => {
                tracing::warn!(folder_id, error = %err, "Failed to fetch images");
                self.listing.apply_error(request, err)
            }
        };
        if !applied {
            tracing::debug!(folder_id, generation = request.generation, "Discarding stale images page");
        }
    }

    pub fn apply_uploaded(&mut self, folder_id: &str, result: ApiResult<Image>) -> ApiResult<Image> {
        match result {
            Ok(image) => {
                if folder_id == self.folder_id {
                    self.listing.prepend(image.clone());
                }
                tracing::info!(folder_id, key = %image.key, "Image uploaded");
                Ok(image)
            }
            Err(err) => {
                tracing::warn!(folder_id, error = %err, "Image upload failed");
                self.listing.set_error(err.clone());
                Err(err)
            }
        }
    }

    pub fn apply_deleted(&mut self, image_id: &str, result: ApiResult<()>) -> ApiResult<()> {
        match result {
            Ok(()) => {
                self.listing.remove_where(|img| img.id == image_id);
                Ok(())
            }
            Err(err) => {
                self.listing.set_error(err.clone());
                Err(err)
            }
        }
    }
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
