//! Headless front-end: show one route, print the listings, exit

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::messages::{RenderState, UiEvent};
use crate::models::format_size;
use crate::routes::Route;

/// Navigate to `route`, wait for both listings to settle and print them.
/// Returns false when either listing failed.
pub async fn run(
    route: Route,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
    out: &mut impl Write,
) -> Result<bool> {
    ui_tx
        .send(UiEvent::Navigate(route))
        .context("App actor stopped before navigation")?;

    let state = loop {
        let state = render_rx
            .recv()
            .await
            .context("App actor stopped before the listing settled")?;
        if state.is_settled() {
            break state;
        }
    };

    out.write_all(format_listing(&state).as_bytes())?;
    out.flush()?;
    let _ = ui_tx.send(UiEvent::Quit);

    Ok(state.folders.error.is_none() && state.images.error.is_none())
}

/// Plain-text rendering of a settled screen
pub fn format_listing(state: &RenderState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", state.breadcrumb(), state.parent_id);
    let _ = writeln!(out, "sorted by {}", state.sort.describe());

    let _ = writeln!(out, "\nfolders ({}{}):", state.folders.items.len(), more_marker(state.folders.has_more));
    match &state.folders.error {
        Some(err) => {
            let _ = writeln!(out, "  error: {}", err);
        }
        None if state.folders.items.is_empty() => {
            let _ = writeln!(out, "  (none)");
        }
        None => {
            for folder in &state.folders.items {
                let _ = writeln!(out, "  {}  {}", folder.id, folder.name);
            }
        }
    }

    let _ = writeln!(out, "\nimages ({}{}):", state.images.items.len(), more_marker(state.images.has_more));
    match &state.images.error {
        Some(err) => {
            let _ = writeln!(out, "  error: {}", err);
        }
        None if state.images.items.is_empty() => {
            let _ = writeln!(out, "  (none)");
        }
        None => {
            for image in &state.images.items {
                let _ = writeln!(
                    out,
                    "  {}  {}  {}  {}",
                    image.id,
                    image.name,
                    image.content_type,
                    format_size(image.size)
                );
            }
        }
    }
    out
}

fn more_marker(has_more: bool) -> &'static str {
    if has_more {
        "+"
    } else {
        ""
    }
}
