//! Messages exchanged between the UI loop, the app actor and the network actor.
//!
//! UI -> App: [`UiEvent`]. App -> Network: [`NetworkCommand`].
//! Network -> App: [`NetworkResponse`]. App -> UI: [`RenderState`] snapshots.

pub mod ui_events;
pub mod network;
pub mod render;

pub use ui_events::{Pane, UiEvent};
pub use network::{NetworkCommand, NetworkResponse};
pub use render::{ListingView, RenderState};
