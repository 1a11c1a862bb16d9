//! Render state - data structure sent from App layer to UI for rendering

use crate::app::listing::{ListingPhase, Paged};
use crate::app::modal::Modal;
use crate::app::state::Notice;
use crate::constants::{ROOT_FOLDER_ID, ROOT_FOLDER_LABEL};
use crate::messages::ui_events::Pane;
use crate::models::{Folder, Image, SortOptions};

/// Snapshot of one paginated listing
#[derive(Debug, Clone)]
pub struct ListingView<T> {
    pub items: Vec<T>,
    pub phase: ListingPhase,
    pub has_more: bool,
    pub error: Option<String>,
    pub settled: bool,
}

impl<T> Default for ListingView<T> {
    fn default() -> Self {
        ListingView {
            items: Vec::new(),
            phase: ListingPhase::Idle,
            has_more: true,
            error: None,
            settled: false,
        }
    }
}

impl<T: Clone> From<&Paged<T>> for ListingView<T> {
    fn from(paged: &Paged<T>) -> Self {
        ListingView {
            items: paged.items().to_vec(),
            phase: paged.phase(),
            has_more: paged.has_more(),
            error: paged.error().map(|e| e.to_string()),
            settled: paged.is_settled(),
        }
    }
}

impl<T> ListingView<T> {
    pub fn is_loading(&self) -> bool {
        self.phase == ListingPhase::Loading
    }
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Location
    pub parent_id: String,
    pub folder_name: String,
    pub name_pending: bool,
    /// Ancestor names, outermost first
    pub trail: Vec<String>,
    pub sort: SortOptions,

    // Listings
    pub folders: ListingView<Folder>,
    pub images: ListingView<Image>,

    // Selection
    pub focus: Pane,
    pub selected_folder: usize,
    pub selected_image: usize,

    // Overlays and status
    pub modal: Option<Modal>,
    pub notice: Option<Notice>,
    pub file_count: Option<usize>,
}

impl RenderState {
    /// Both listings answered and the folder name is resolved
    pub fn is_settled(&self) -> bool {
        self.folders.settled && self.images.settled && !self.name_pending
    }

    /// Breadcrumb text, e.g. `root / Trips / 2024`
    pub fn breadcrumb(&self) -> String {
        let mut parts: Vec<&str> = self.trail.iter().map(String::as_str).collect();
        parts.push(&self.folder_name);
        parts.join(" / ")
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            parent_id: ROOT_FOLDER_ID.to_string(),
            folder_name: ROOT_FOLDER_LABEL.to_string(),
            name_pending: false,
            trail: Vec::new(),
            sort: SortOptions::default(),
            folders: ListingView::default(),
            images: ListingView::default(),
            focus: Pane::Folders,
            selected_folder: 0,
            selected_image: 0,
            modal: None,
            notice: None,
            file_count: None,
        }
    }
}
