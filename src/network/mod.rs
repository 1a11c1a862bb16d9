//! Network layer - backend requests and signed-URL uploads
//!
//! The Network actor receives commands and sends back tagged responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::ApiClient;
