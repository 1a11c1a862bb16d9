//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::modal::ModalKind;
use crate::routes::Route;

/// Focusable list in the browser screen
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Pane {
    #[default]
    Folders,
    Images,
}

impl Pane {
    pub fn next(&self) -> Pane {
        match self {
            Pane::Folders => Pane::Images,
            Pane::Images => Pane::Folders,
        }
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Show the folder a route points at
    Navigate(Route),

    // Browsing
    NextPane,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    OpenSelected,
    GoUp,
    Refresh,
    LoadMore,

    // Sorting
    CycleSortField,
    ToggleSortDirection,

    // Mutations
    NewFolder,
    RenameSelected,
    UploadImage,
    DeleteSelected,
    CountFiles,

    // Modals
    PromptChar(char),
    PromptBackspace,
    Submit,
    CloseModal,
    ToggleHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on the open modal, if any
pub fn key_to_ui_event(key: KeyEvent, modal: Option<ModalKind>) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    match modal {
        Some(ModalKind::Help) => Some(UiEvent::CloseModal),
        Some(ModalKind::Prompt) => match key.code {
            KeyCode::Esc => Some(UiEvent::CloseModal),
            KeyCode::Enter => Some(UiEvent::Submit),
            KeyCode::Backspace => Some(UiEvent::PromptBackspace),
            KeyCode::Char(c) => Some(UiEvent::PromptChar(c)),
            _ => None,
        },
        Some(ModalKind::Confirm) => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => Some(UiEvent::Submit),
            KeyCode::Char('n') | KeyCode::Esc => Some(UiEvent::CloseModal),
            _ => None,
        },
        None => browse_keys(key),
    }
}

/// Keys for the browser screen with no modal open
fn browse_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Tab | KeyCode::BackTab => Some(UiEvent::NextPane),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Home | KeyCode::Char('g') => Some(UiEvent::SelectFirst),
        KeyCode::End | KeyCode::Char('G') => Some(UiEvent::SelectLast),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::OpenSelected),
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::GoUp),
        KeyCode::Char('r') => Some(UiEvent::Refresh),
        KeyCode::Char('m') => Some(UiEvent::LoadMore),
        KeyCode::Char('s') => Some(UiEvent::CycleSortField),
        KeyCode::Char('o') => Some(UiEvent::ToggleSortDirection),
        KeyCode::Char('n') => Some(UiEvent::NewFolder),
        KeyCode::Char('e') => Some(UiEvent::RenameSelected),
        KeyCode::Char('u') => Some(UiEvent::UploadImage),
        KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::DeleteSelected),
        KeyCode::Char('i') => Some(UiEvent::CountFiles),
        _ => None,
    }
}
