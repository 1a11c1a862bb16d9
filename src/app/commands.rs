//! Command handlers - business logic for processing UI events

use crate::app::modal::{DeleteTarget, Modal, ModalKind, Prompt, PromptKind};
use crate::app::state::Notice;
use crate::app::AppState;
use crate::error::ApiResult;
use crate::messages::ui_events::Pane;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{format_size, FolderUpdate};

impl AppState {
    // ========================
    // Navigation
    // ========================

    /// Show `folder_id`: folder listing, its name and its images
    pub fn enter_folder(&mut self, folder_id: &str) -> Vec<NetworkCommand> {
        let mut cmds = self.folders.enter_folder(folder_id);
        cmds.push(self.images.show(folder_id, self.folders.sort()));
        self.reset_selection();
        cmds
    }

    pub fn go_up(&mut self) -> Vec<NetworkCommand> {
        let mut cmds = self.folders.go_up();
        if !cmds.is_empty() {
            let parent = self.folders.parent_id().to_string();
            cmds.push(self.images.show(&parent, self.folders.sort()));
            self.reset_selection();
        }
        cmds
    }

    pub fn refresh(&mut self) -> Vec<NetworkCommand> {
        self.reset_selection();
        vec![self.folders.refresh(), self.images.refresh()]
    }

    fn reset_selection(&mut self) {
        self.selected_folder = 0;
        self.selected_image = 0;
        self.file_count = None;
    }

    pub fn next_pane(&mut self) {
        self.focus = self.focus.next();
    }

    /// Load the next page of the focused list
    pub fn load_more(&mut self) -> Option<NetworkCommand> {
        match self.focus {
            Pane::Folders => self.folders.load_more(),
            Pane::Images => self.images.load_more(),
        }
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            Pane::Folders => self.folders.folders().len(),
            Pane::Images => self.images.images().len(),
        }
    }

    fn focused_selection(&mut self) -> &mut usize {
        match self.focus {
            Pane::Folders => &mut self.selected_folder,
            Pane::Images => &mut self.selected_image,
        }
    }

    /// Move down; reaching the last row asks for the next page
    pub fn select_next(&mut self) -> Option<NetworkCommand> {
        let len = self.focused_len();
        if len == 0 {
            return None;
        }
        let selected = self.focused_selection();
        *selected = (*selected + 1).min(len - 1);
        if *selected + 1 == len {
            self.load_more()
        } else {
            None
        }
    }

    pub fn select_prev(&mut self) {
        let selected = self.focused_selection();
        *selected = selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        *self.focused_selection() = 0;
    }

    pub fn select_last(&mut self) -> Option<NetworkCommand> {
        let len = self.focused_len();
        if len == 0 {
            return None;
        }
        *self.focused_selection() = len - 1;
        self.load_more()
    }

    pub fn open_selected(&mut self) -> Vec<NetworkCommand> {
        match self.focus {
            Pane::Folders => match self.selected_folder().map(|f| f.id.clone()) {
                Some(id) => self.enter_folder(&id),
                None => Vec::new(),
            },
            Pane::Images => {
                if let Some(image) = self.selected_image() {
                    let text = format!(
                        "{} ({}, {}) key={}",
                        image.name,
                        image.content_type,
                        format_size(image.size),
                        image.key
                    );
                    self.notice = Some(Notice::info(text));
                }
                Vec::new()
            }
        }
    }

    // ========================
    // Sorting
    // ========================

    pub fn cycle_sort_field(&mut self) -> Vec<NetworkCommand> {
        let sort = self.folders.sort().with_next_field();
        self.apply_sort(sort)
    }

    pub fn toggle_sort_direction(&mut self) -> Vec<NetworkCommand> {
        let sort = self.folders.sort().reversed();
        self.apply_sort(sort)
    }

    fn apply_sort(&mut self, sort: crate::models::SortOptions) -> Vec<NetworkCommand> {
        let Some(cmd) = self.folders.set_sort(sort) else {
            return Vec::new();
        };
        let parent = self.folders.parent_id().to_string();
        let images = self.images.show(&parent, sort);
        self.reset_selection();
        self.notice = Some(Notice::info(format!("Sorted by {}", sort.describe())));
        vec![cmd, images]
    }

    // ========================
    // Modals
    // ========================

    pub fn toggle_help(&mut self) {
        if self.modal.kind() == Some(ModalKind::Help) {
            self.modal.close();
        } else {
            self.modal.open(Modal::Help);
        }
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    pub fn open_new_folder(&mut self) {
        self.modal.open(Modal::Prompt(Prompt::new(PromptKind::NewFolder, "")));
    }

    pub fn open_rename(&mut self) {
        if let Some(folder) = self.selected_folder() {
            let prompt = Prompt::new(
                PromptKind::RenameFolder {
                    folder_id: folder.id.clone(),
                },
                folder.name.clone(),
            );
            self.focus = Pane::Folders;
            self.modal.open(Modal::Prompt(prompt));
        }
    }

    pub fn open_upload(&mut self) {
        self.modal.open(Modal::Prompt(Prompt::new(PromptKind::UploadImage, "")));
    }

    pub fn open_delete(&mut self) {
        let target = match self.focus {
            Pane::Folders => self.selected_folder().map(|f| DeleteTarget::Folder {
                id: f.id.clone(),
                name: f.name.clone(),
            }),
            Pane::Images => self.selected_image().cloned().map(DeleteTarget::Image),
        };
        if let Some(target) = target {
            self.modal.open(Modal::Confirm {
                target,
                error: None,
                pending: None,
            });
        }
    }

    pub fn prompt_char(&mut self, c: char) {
        if self.modal.is_busy() {
            return;
        }
        if let Some(prompt) = self.modal.prompt_mut() {
            prompt.input.push(c);
            prompt.error = None;
        }
    }

    pub fn prompt_backspace(&mut self) {
        if self.modal.is_busy() {
            return;
        }
        if let Some(prompt) = self.modal.prompt_mut() {
            prompt.input.pop();
        }
    }

    /// Submit the open prompt or confirmation. Validation failures are shown
    /// on the modal and issue nothing.
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        if self.modal.is_busy() {
            return None;
        }
        let id = self.next_id();
        let result: ApiResult<NetworkCommand> = match self.modal.current().cloned() {
            Some(Modal::Prompt(prompt)) => match prompt.kind {
                PromptKind::NewFolder => self.folders.create_folder(id, &prompt.input),
                PromptKind::RenameFolder { folder_id } => {
                    self.folders
                        .update_folder(id, &folder_id, FolderUpdate::rename(prompt.input))
                }
                PromptKind::UploadImage => self.images.upload(id, &prompt.input),
            },
            Some(Modal::Confirm { target, .. }) => Ok(match target {
                DeleteTarget::Folder { id: folder_id, .. } => self.folders.delete_folder(id, &folder_id),
                DeleteTarget::Image(image) => self.images.delete(id, &image),
            }),
            Some(Modal::Help) | None => return None,
        };

        match result {
            Ok(cmd) => {
                self.modal.set_pending(id);
                Some(cmd)
            }
            Err(err) => {
                self.modal.show_error(err.to_string());
                None
            }
        }
    }

    pub fn count_files(&self) -> NetworkCommand {
        NetworkCommand::CountFiles {
            folder_id: self.folders.parent_id().to_string(),
        }
    }

    // ========================
    // Network responses
    // ========================

    /// Settle the modal that issued request `id` and post a notice
    fn settle<T>(&mut self, id: u64, result: &ApiResult<T>, success: impl FnOnce(&T) -> String) {
        let outcome = match result {
            Ok(value) => {
                self.notice = Some(Notice::info(success(value)));
                Ok(())
            }
            Err(err) => {
                self.notice = Some(Notice::error(err.to_string()));
                Err(err.to_string())
            }
        };
        self.modal.resolve(id, outcome);
    }

    pub fn handle_response(&mut self, response: NetworkResponse) {
        match response {
            NetworkResponse::FoldersPage { request, result } => {
                self.folders.apply_page(&request, result);
            }
            NetworkResponse::FolderResolved { folder_id, folder } => {
                self.folders.apply_resolved(&folder_id, folder);
            }
            NetworkResponse::FolderCreated { id, parent_id, result } => {
                let result = self.folders.apply_created(&parent_id, result);
                self.settle(id, &result, |f| format!("Created folder '{}'", f.name));
            }
            NetworkResponse::FolderUpdated { id, folder_id, result } => {
                let result = self.folders.apply_updated(&folder_id, result);
                self.settle(id, &result, |f| format!("Renamed to '{}'", f.name));
            }
            NetworkResponse::FolderDeleted { id, folder_id, result } => {
                let result = self.folders.apply_deleted(&folder_id, result);
                self.settle(id, &result, |_| "Folder deleted".to_string());
            }
            NetworkResponse::ImagesPage { request, folder_id, result } => {
                self.images.apply_page(&request, &folder_id, result);
            }
            NetworkResponse::ImageUploaded { id, folder_id, result } => {
                let result = self.images.apply_uploaded(&folder_id, result);
                self.settle(id, &result, |img| format!("Uploaded '{}' ({})", img.name, format_size(img.size)));
            }
            NetworkResponse::ImageDeleted { id, image_id, result, .. } => {
                let result = self.images.apply_deleted(&image_id, result);
                self.settle(id, &result, |_| "Image deleted".to_string());
            }
            NetworkResponse::FilesCounted { folder_id, result } => match result {
                Ok(count) => {
                    self.notice = Some(Notice::info(format!("{} file(s) in this folder", count)));
                    self.file_count = Some((folder_id, count));
                }
                Err(err) => self.notice = Some(Notice::error(err.to_string())),
            },
        }
        self.clamp_selection();
    }
}
