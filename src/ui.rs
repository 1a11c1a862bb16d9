use ratatui::{prelude::*, widgets::*};

use crate::app::listing::ListingPhase;
use crate::models::SortOptions;
use crate::platform::Theme;

/// Bordered block, highlighted when focused
pub fn panel_block<'a>(title: impl Into<Line<'a>>, focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if focused {
        Style::default().fg(theme.focus_border)
    } else {
        Style::default().fg(theme.muted)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

/// Style of the selected row
pub fn highlight_style(focused: bool, theme: &Theme) -> Style {
    if focused {
        Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).bold()
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    }
}

/// Footer text describing where pagination stands
pub fn phase_label(phase: ListingPhase) -> &'static str {
    match phase {
        ListingPhase::Idle => "",
        ListingPhase::Loading => " loading... ",
        ListingPhase::HasMore => " more (m) ",
        ListingPhase::Exhausted => " end ",
        ListingPhase::Failed => " failed (r to retry) ",
    }
}

/// Renders the sort selector as tabs, active field highlighted
pub fn render_sort_tabs<'a>(sort: SortOptions, theme: &Theme) -> Tabs<'a> {
    use crate::models::SortField;

    let fields = [SortField::Name, SortField::CreatedAt];
    let titles: Vec<Line> = fields
        .iter()
        .map(|f| {
            if *f == sort.field {
                Line::from(format!("{} {}", f.label(), sort.direction.arrow()))
            } else {
                Line::from(f.label())
            }
        })
        .collect();
    let selected = fields.iter().position(|f| *f == sort.field).unwrap_or(0);

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme.muted))
        .highlight_style(Style::default().fg(theme.accent).bold())
        .divider("|")
}

/// Icon for a content type
pub fn image_icon(content_type: &str) -> &'static str {
    match content_type {
        "image/gif" => "🎞",
        t if t.starts_with("image/") => "🖼",
        _ => "📄",
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
