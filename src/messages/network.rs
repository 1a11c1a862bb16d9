//! Network messages - communication between App and Network layers

use std::path::PathBuf;

use crate::app::listing::PageRequest;
use crate::error::ApiResult;
use crate::models::{CreateFolderInput, Folder, FolderPage, FolderUpdate, Image, ImagePage, SortOptions};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Fetch one page of a folder's subfolders
    FetchFolders {
        request: PageRequest,
        parent_id: String,
        sort: SortOptions,
    },
    /// Look up a folder to label the current location (best effort)
    ResolveFolderName {
        folder_id: String,
    },
    CreateFolder {
        id: u64,
        input: CreateFolderInput,
    },
    UpdateFolder {
        id: u64,
        folder_id: String,
        update: FolderUpdate,
    },
    DeleteFolder {
        id: u64,
        folder_id: String,
    },
    /// Fetch one page of a folder's images
    FetchImages {
        request: PageRequest,
        folder_id: String,
        sort: SortOptions,
    },
    /// Read a local file and run the signed-URL upload
    UploadImage {
        id: u64,
        folder_id: String,
        path: PathBuf,
    },
    DeleteImage {
        id: u64,
        folder_id: String,
        image_id: String,
        filename: String,
    },
    CountFiles {
        folder_id: String,
    },

    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    FoldersPage {
        request: PageRequest,
        result: ApiResult<FolderPage>,
    },
    /// `None` when the lookup failed; failures never surface as errors
    FolderResolved {
        folder_id: String,
        folder: Option<Folder>,
    },
    FolderCreated {
        id: u64,
        parent_id: String,
        result: ApiResult<Folder>,
    },
    FolderUpdated {
        id: u64,
        folder_id: String,
        result: ApiResult<Folder>,
    },
    FolderDeleted {
        id: u64,
        folder_id: String,
        result: ApiResult<()>,
    },
    ImagesPage {
        request: PageRequest,
        folder_id: String,
        result: ApiResult<ImagePage>,
    },
    ImageUploaded {
        id: u64,
        folder_id: String,
        result: ApiResult<Image>,
    },
    ImageDeleted {
        id: u64,
        folder_id: String,
        image_id: String,
        result: ApiResult<()>,
    },
    FilesCounted {
        folder_id: String,
        result: ApiResult<usize>,
    },
}

