//! App layer - central state management and command processing
//!
//! The App actor receives UI events and network responses, updates the
//! folder and image stores, and emits network commands and render state.

pub mod listing;
pub mod folders;
pub mod images;
pub mod modal;
pub mod state;
pub mod actor;
pub mod commands;

pub use state::AppState;
pub use actor::AppActor;
pub use folders::FolderStore;
pub use images::ImageStore;
