//! # Folio
//!
//! A terminal browser for folders and images stored behind a REST backend.
//!
//! ## Features
//! - Nested folder navigation with breadcrumbs
//! - Cursor pagination and sorting for folders and images
//! - Create, rename and delete folders
//! - Signed-URL image upload and image delete
//! - Headless listing mode for scripts
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui or headless) - chosen once at start-up
//! - App Layer (folder/image stores, single writer)
//! - Network Layer (Tokio runtime, reqwest)

pub mod constants;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod platform;
pub mod messages;
pub mod app;
pub mod network;
pub mod headless;
pub mod ui;

// Re-export commonly used types
pub use config::{Cli, Config};
pub use error::{ApiError, ApiResult};
pub use models::{Cursor, Folder, Image, SortDirection, SortField, SortOptions};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use app::{AppActor, AppState, FolderStore, ImageStore};
pub use network::{ApiClient, NetworkActor};
pub use platform::{Frontend, Platform, Theme};
pub use routes::Route;
