//! App state - pure data structure with no I/O logic

use crate::app::folders::FolderStore;
use crate::app::images::ImageStore;
use crate::app::modal::ModalHost;
use crate::messages::render::ListingView;
use crate::messages::ui_events::Pane;
use crate::messages::RenderState;
use crate::models::{Folder, Image, SortOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One-line status message shown under the listings
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub at: chrono::DateTime<chrono::Local>,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            text: text.into(),
            at: chrono::Local::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            text: text.into(),
            at: chrono::Local::now(),
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Remote mirrors
    pub folders: FolderStore,
    pub images: ImageStore,

    // Overlays
    pub modal: ModalHost,

    // Selection
    pub focus: Pane,
    pub selected_folder: usize,
    pub selected_image: usize,

    // Status
    pub notice: Option<Notice>,
    /// File count for the folder it was requested for
    pub file_count: Option<(String, usize)>,

    pub next_request_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SortOptions::default())
    }
}

impl AppState {
    pub fn new(sort: SortOptions) -> Self {
        AppState {
            folders: FolderStore::new(sort),
            images: ImageStore::new(sort),
            modal: ModalHost::default(),
            focus: Pane::Folders,
            selected_folder: 0,
            selected_image: 0,
            notice: None,
            file_count: None,
            next_request_id: 1,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn selected_folder(&self) -> Option<&Folder> {
        self.folders.folders().get(self.selected_folder)
    }

    pub fn selected_image(&self) -> Option<&Image> {
        self.images.images().get(self.selected_image)
    }

    /// Keep selections inside the lists after they shrink
    pub fn clamp_selection(&mut self) {
        let folders = self.folders.folders().len();
        let images = self.images.images().len();
        self.selected_folder = self.selected_folder.min(folders.saturating_sub(1));
        self.selected_image = self.selected_image.min(images.saturating_sub(1));
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            parent_id: self.folders.parent_id().to_string(),
            folder_name: self.folders.current_name().to_string(),
            name_pending: self.folders.is_name_pending(),
            trail: self.folders.trail().iter().map(|c| c.label().to_string()).collect(),
            sort: self.folders.sort(),
            folders: ListingView::from(self.folders.listing()),
            images: ListingView::from(self.images.listing()),
            focus: self.focus,
            selected_folder: self.selected_folder,
            selected_image: self.selected_image,
            modal: self.modal.current().cloned(),
            notice: self.notice.clone(),
            file_count: self
                .file_count
                .as_ref()
                .filter(|(folder_id, _)| folder_id == self.folders.parent_id())
                .map(|(_, count)| *count),
        }
    }
}
