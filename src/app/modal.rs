//! Overlay host - at most one modal is shown above the browser

use crate::models::Image;

/// What a text prompt collects
#[derive(Clone, Debug, PartialEq)]
pub enum PromptKind {
    NewFolder,
    RenameFolder { folder_id: String },
    UploadImage,
}

impl PromptKind {
    pub fn title(&self) -> &'static str {
        match self {
            PromptKind::NewFolder => " New folder ",
            PromptKind::RenameFolder { .. } => " Rename folder ",
            PromptKind::UploadImage => " Upload image (local path) ",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
    pub error: Option<String>,
    /// Request issued from this prompt, awaiting its answer
    pub pending: Option<u64>,
}

impl Prompt {
    pub fn new(kind: PromptKind, initial: impl Into<String>) -> Self {
        Prompt {
            kind,
            input: initial.into(),
            error: None,
            pending: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DeleteTarget {
    Folder { id: String, name: String },
    Image(Image),
}

impl DeleteTarget {
    pub fn label(&self) -> &str {
        match self {
            DeleteTarget::Folder { name, .. } => name,
            DeleteTarget::Image(image) => &image.name,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Modal {
    Help,
    Prompt(Prompt),
    Confirm {
        target: DeleteTarget,
        error: Option<String>,
        pending: Option<u64>,
    },
}

impl Modal {
    pub fn kind(&self) -> ModalKind {
        match self {
            Modal::Help => ModalKind::Help,
            Modal::Prompt(_) => ModalKind::Prompt,
            Modal::Confirm { .. } => ModalKind::Confirm,
        }
    }
}

/// Kind of the open modal, enough for key mapping
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKind {
    Help,
    Prompt,
    Confirm,
}

#[derive(Clone, Debug, Default)]
pub struct ModalHost {
    current: Option<Modal>,
}

impl ModalHost {
    pub fn open(&mut self, modal: Modal) {
        self.current = Some(modal);
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Modal> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn kind(&self) -> Option<ModalKind> {
        self.current.as_ref().map(Modal::kind)
    }

    pub fn prompt_mut(&mut self) -> Option<&mut Prompt> {
        match self.current.as_mut() {
            Some(Modal::Prompt(prompt)) => Some(prompt),
            _ => None,
        }
    }

    /// Whether a submitted request is still awaiting its answer
    pub fn is_busy(&self) -> bool {
        match &self.current {
            Some(Modal::Prompt(prompt)) => prompt.pending.is_some(),
            Some(Modal::Confirm { pending, .. }) => pending.is_some(),
            _ => false,
        }
    }

    /// Mark the open modal as waiting on request `id`
    pub fn set_pending(&mut self, id: u64) {
        match self.current.as_mut() {
            Some(Modal::Prompt(prompt)) => {
                prompt.pending = Some(id);
                prompt.error = None;
            }
            Some(Modal::Confirm { pending, error, .. }) => {
                *pending = Some(id);
                *error = None;
            }
            _ => {}
        }
    }

    /// Show a failure on the open modal without closing it
    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        match self.current.as_mut() {
            Some(Modal::Prompt(prompt)) => {
                prompt.error = Some(message);
                prompt.pending = None;
            }
            Some(Modal::Confirm { error, pending, .. }) => {
                *error = Some(message);
                *pending = None;
            }
            _ => {}
        }
    }

    /// Route the answer for request `id` to the modal that issued it:
    /// success closes it, failure keeps it open with the message.
    /// Answers for a modal that is no longer open are ignored.
    pub fn resolve(&mut self, id: u64, outcome: Result<(), String>) -> bool {
        let waiting = match &self.current {
            Some(Modal::Prompt(prompt)) => prompt.pending == Some(id),
            Some(Modal::Confirm { pending, .. }) => *pending == Some(id),
            _ => false,
        };
        if !waiting {
            return false;
        }
        match outcome {
            Ok(()) => self.close(),
            Err(message) => self.show_error(message),
        }
        true
    }
}
