//! Folio - terminal folder and image browser
//!
//! Architecture:
//! - UI Layer (Ratatui or headless) - rendering only
//! - App Layer - folder/image stores and modal host
//! - Network Layer (Tokio) - async HTTP execution

use std::env;
use std::fs;
use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use folio_tui::app::listing::ListingPhase;
use folio_tui::app::modal::{DeleteTarget, Modal, Prompt};
use folio_tui::app::state::NoticeLevel;
use folio_tui::config::{Cli, Config};
use folio_tui::constants::{APP_NAME, ENV_PLATFORM, LOG_FILE_NAME};
use folio_tui::headless;
use folio_tui::messages::render::ListingView;
use folio_tui::messages::ui_events::{key_to_ui_event, Pane};
use folio_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use folio_tui::models::format_size;
use folio_tui::platform::{select_frontend, Frontend, Platform, Theme};
use folio_tui::ui::{centered_rect, highlight_style, image_icon, panel_block, phase_label, render_sort_tabs};
use folio_tui::{AppActor, ApiClient, NetworkActor};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load(Cli::parse())?;

    // Initialize logging to file
    fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory {}", config.log_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(&config.log_dir, LOG_FILE_NAME);
    let (non_blocking, log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_max_level(config.log_level)
        .init();

    let platform = Platform::detect(
        config.headless,
        env::var(ENV_PLATFORM).ok().as_deref(),
        io::stdout().is_terminal(),
    );
    let frontend = select_frontend(platform, config.theme);
    tracing::info!(?platform, base_url = %config.base_url, route = %config.route, "Starting");

    let client = ApiClient::new(&config.base_url, config.page_limit, config.request_timeout)
        .context("Invalid API base URL")?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(config.sort, net_cmd_tx, render_tx);
    let app_handle = tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    match frontend {
        Frontend::Terminal(theme) => {
            // Terminal setup
            enable_raw_mode()?;
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            let _guard = TerminalGuard;

            let backend = CrosstermBackend::new(stdout);
            let mut terminal = Terminal::new(backend)?;

            let _ = ui_tx.send(UiEvent::Navigate(config.route));
            run_ui_loop(&mut terminal, &theme, ui_tx, &mut render_rx).await?;
        }
        Frontend::Headless => {
            let mut stdout = io::stdout();
            let ok = headless::run(config.route, ui_tx, &mut render_rx, &mut stdout).await?;
            let _ = app_handle.await;
            if !ok {
                drop(log_guard);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    theme: &Theme,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state, theme))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let modal = current_state.modal.as_ref().map(Modal::kind);
                if let Some(event) = key_to_ui_event(key, modal) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState, theme: &Theme) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Breadcrumb
            Constraint::Length(1), // Sort
            Constraint::Min(0),    // Listings
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, state, theme, main_chunks[0]);
    f.render_widget(render_sort_tabs(state.sort, theme), main_chunks[1]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[2]);
    draw_folders(f, state, theme, panes[0]);
    draw_images(f, state, theme, panes[1]);

    draw_status_bar(f, state, theme, main_chunks[3]);

    match &state.modal {
        Some(Modal::Help) => draw_help_popup(f, theme, area),
        Some(Modal::Prompt(prompt)) => draw_prompt_popup(f, prompt, theme, area),
        Some(Modal::Confirm { target, error, pending }) => {
            draw_confirm_popup(f, target, error.as_deref(), pending.is_some(), theme, area)
        }
        None => {}
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, theme: &Theme, area: Rect) {
    let name = if state.name_pending {
        format!("{} …", state.breadcrumb())
    } else {
        state.breadcrumb()
    };
    let loading = if state.folders.is_loading() || state.images.is_loading() {
        " [...]"
    } else {
        ""
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(theme.highlight_fg).bg(theme.accent).bold()),
        Span::raw(" "),
        Span::styled(name, Style::default().fg(theme.text).bold()),
        Span::styled(loading, Style::default().fg(theme.muted)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Rows shown after the items: loading, error or "more" hints
fn footer_rows<'a, T>(view: &ListingView<T>, theme: &Theme) -> Vec<ListItem<'a>> {
    let mut rows = Vec::new();
    if let Some(err) = &view.error {
        rows.push(ListItem::new(Span::styled(format!("! {}", err), Style::default().fg(theme.error))));
    }
    match view.phase {
        ListingPhase::Loading => rows.push(ListItem::new(Span::styled("loading…", Style::default().fg(theme.muted)))),
        ListingPhase::HasMore => rows.push(ListItem::new(Span::styled("more… (m)", Style::default().fg(theme.muted)))),
        _ if view.items.is_empty() && view.error.is_none() && view.settled => {
            rows.push(ListItem::new(Span::styled("(empty)", Style::default().fg(theme.muted))))
        }
        _ => {}
    }
    rows
}

fn draw_folders(f: &mut Frame, state: &RenderState, theme: &Theme, area: Rect) {
    let focused = state.focus == Pane::Folders;
    let mut items: Vec<ListItem> = state
        .folders
        .items
        .iter()
        .map(|folder| ListItem::new(format!("📁 {}", folder.name)).style(Style::default().fg(theme.text)))
        .collect();
    items.extend(footer_rows(&state.folders, theme));

    let title = format!(" Folders ({}) ", state.folders.items.len());
    let list = List::new(items)
        .block(panel_block(title, focused, theme).title_bottom(Line::from(phase_label(state.folders.phase)).right_aligned()))
        .highlight_style(highlight_style(focused, theme));

    let mut list_state = ListState::default();
    if !state.folders.items.is_empty() {
        list_state.select(Some(state.selected_folder));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_images(f: &mut Frame, state: &RenderState, theme: &Theme, area: Rect) {
    let focused = state.focus == Pane::Images;
    let mut items: Vec<ListItem> = state
        .images
        .items
        .iter()
        .map(|image| {
            let created = image
                .created_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", image_icon(&image.content_type))),
                Span::styled(image.name.clone(), Style::default().fg(theme.text)),
                Span::styled(
                    format!("  {}  {}", format_size(image.size), created),
                    Style::default().fg(theme.muted),
                ),
            ]))
        })
        .collect();
    items.extend(footer_rows(&state.images, theme));

    let title = format!(" Images ({}) ", state.images.items.len());
    let list = List::new(items)
        .block(panel_block(title, focused, theme).title_bottom(Line::from(phase_label(state.images.phase)).right_aligned()))
        .highlight_style(highlight_style(focused, theme));

    let mut list_state = ListState::default();
    if !state.images.items.is_empty() {
        list_state.select(Some(state.selected_image));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, theme: &Theme, area: Rect) {
    let mut spans = Vec::new();
    if let Some(notice) = &state.notice {
        let color = match notice.level {
            NoticeLevel::Info => theme.success,
            NoticeLevel::Error => theme.error,
        };
        spans.push(Span::styled(
            format!(" {} {} ", notice.at.format("%H:%M:%S"), notice.text),
            Style::default().fg(color),
        ));
    } else {
        spans.push(Span::styled(
            " Enter:open | h:up | n:new | e:rename | u:upload | d:delete | ?:help | q:quit ",
            Style::default().fg(theme.muted),
        ));
    }
    if let Some(count) = state.file_count {
        spans.push(Span::styled(format!(" [{} files] ", count), Style::default().fg(theme.accent)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help_popup(f: &mut Frame, theme: &Theme, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 FOLIO - Keyboard Shortcuts

 NAVIGATION
   Tab                Switch folders / images
   ↑ / ↓  (k / j)     Move selection
   g / G              First / last row
   Enter / l          Open folder
   Backspace / h      Go up

 LISTING
   m                  Load more
   r                  Refresh
   s                  Cycle sort field
   o                  Toggle sort direction
   i                  Count files in folder

 CHANGES
   n                  New folder
   e                  Rename folder
   u                  Upload image
   d                  Delete selected

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().fg(theme.text).bg(theme.popup_bg));

    let help = Paragraph::new(help_text).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_prompt_popup(f: &mut Frame, prompt: &Prompt, theme: &Theme, area: Rect) {
    let popup_area = centered_rect(60, 25, area);

    let hint = if prompt.pending.is_some() {
        " working… "
    } else {
        " Enter to submit, Esc to cancel "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(prompt.kind.title())
        .title_bottom(Line::from(hint).right_aligned())
        .border_style(Style::default().fg(theme.focus_border))
        .style(Style::default().fg(theme.text).bg(theme.popup_bg));

    let mut lines = vec![Line::from(prompt.input.as_str())];
    if let Some(err) = &prompt.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(err.as_str(), Style::default().fg(theme.error))));
    }

    let input = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(Clear, popup_area);
    f.render_widget(input, popup_area);

    if prompt.pending.is_none() {
        let max_x = popup_area.x + popup_area.width.saturating_sub(2);
        let cursor_x = (popup_area.x + prompt.input.chars().count() as u16 + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, popup_area.y + 1));
    }
}

fn draw_confirm_popup(
    f: &mut Frame,
    target: &DeleteTarget,
    error: Option<&str>,
    busy: bool,
    theme: &Theme,
    area: Rect,
) {
    let popup_area = centered_rect(50, 25, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Delete ")
        .border_style(Style::default().fg(theme.error))
        .style(Style::default().fg(theme.text).bg(theme.popup_bg));

    let mut lines = vec![Line::from(format!("Delete '{}'?", target.label())), Line::from("")];
    if busy {
        lines.push(Line::from(Span::styled("deleting…", Style::default().fg(theme.muted))));
    } else {
        lines.push(Line::from(Span::styled("y: delete   n: cancel", Style::default().fg(theme.muted))));
    }
    if let Some(err) = error {
        lines.push(Line::from(Span::styled(err, Style::default().fg(theme.error))));
    }

    let body = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(Clear, popup_area);
    f.render_widget(body, popup_area);
}
