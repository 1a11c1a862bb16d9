//! Folder state provider.
//!
//! Mirrors the remote folder tree into local state for one parent at a time.
//! The store never performs I/O: operations hand back the [`NetworkCommand`]s
//! to issue, and the matching `apply_*` method is called with the answer.

use crate::app::listing::{ListingPhase, PageRequest, Paged};
use crate::constants::{ROOT_FOLDER_ID, ROOT_FOLDER_LABEL};
use crate::error::{ApiError, ApiResult};
use crate::messages::NetworkCommand;
use crate::models::{CreateFolderInput, Folder, FolderPage, FolderUpdate, SortOptions};

/// Label for the current folder: its name when the lookup succeeded,
/// otherwise the root label. Lookup failures never block navigation.
pub fn best_effort_display_name(folder: Option<&Folder>) -> String {
    folder
        .map(|f| f.name.trim())
        .filter(|name| !name.is_empty())
        .unwrap_or(ROOT_FOLDER_LABEL)
        .to_string()
}

/// An ancestor on the way to the current folder. `name` is `None` when the
/// folder was left before its name lookup answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crumb {
    pub id: String,
    pub name: Option<String>,
}

impl Crumb {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("…")
    }
}

#[derive(Debug)]
pub struct FolderStore {
    parent_id: String,
    sort: SortOptions,
    listing: Paged<Folder>,
    current_name: String,
    name_pending: bool,
    trail: Vec<Crumb>,
}

impl Default for FolderStore {
    fn default() -> Self {
        Self::new(SortOptions::default())
    }
}

impl FolderStore {
    pub fn new(sort: SortOptions) -> Self {
        FolderStore {
            parent_id: ROOT_FOLDER_ID.to_string(),
            sort,
            listing: Paged::new(),
            current_name: ROOT_FOLDER_LABEL.to_string(),
            name_pending: false,
            trail: Vec::new(),
        }
    }

    // ========================
    // Accessors
    // ========================

    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    pub fn sort(&self) -> SortOptions {
        self.sort
    }

    pub fn folders(&self) -> &[Folder] {
        self.listing.items()
    }

    pub fn listing(&self) -> &Paged<Folder> {
        &self.listing
    }

    pub fn is_loading(&self) -> bool {
        self.listing.is_loading()
    }

    pub fn has_more(&self) -> bool {
        self.listing.has_more()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.listing.error()
    }

    pub fn phase(&self) -> ListingPhase {
        self.listing.phase()
    }

    pub fn current_name(&self) -> &str {
        &self.current_name
    }

    pub fn is_name_pending(&self) -> bool {
        self.name_pending
    }

    pub fn trail(&self) -> &[Crumb] {
        &self.trail
    }

    pub fn is_at_root(&self) -> bool {
        self.parent_id == ROOT_FOLDER_ID
    }

    // ========================
    // Navigation
    // ========================

    fn fetch(&self, request: PageRequest) -> NetworkCommand {
        NetworkCommand::FetchFolders {
            request,
            parent_id: self.parent_id.clone(),
            sort: self.sort,
        }
    }

    /// Drop accumulated pages and fetch the first page again
    pub fn refresh(&mut self) -> NetworkCommand {
        let request = self.listing.first_page();
        self.fetch(request)
    }

    /// Change the listing order; a no-op when nothing changes
    pub fn set_sort(&mut self, sort: SortOptions) -> Option<NetworkCommand> {
        if sort == self.sort {
            return None;
        }
        self.sort = sort;
        Some(self.refresh())
    }

    /// Make `folder_id` the active parent. Returns the first-page fetch and
    /// a fire-and-forget lookup of the folder's display name.
    pub fn enter_folder(&mut self, folder_id: &str) -> Vec<NetworkCommand> {
        if folder_id == ROOT_FOLDER_ID {
            self.trail.clear();
        } else if folder_id != self.parent_id {
            match self.trail.iter().position(|c| c.id == folder_id) {
                // Jumping back to an ancestor
                Some(idx) => self.trail.truncate(idx),
                None => self.trail.push(Crumb {
                    id: self.parent_id.clone(),
                    name: (!self.name_pending).then(|| self.current_name.clone()),
                }),
            }
        }

        self.parent_id = folder_id.to_string();
        self.name_pending = true;

        vec![
            self.refresh(),
            NetworkCommand::ResolveFolderName {
                folder_id: folder_id.to_string(),
            },
        ]
    }

    /// Return to the previous folder. Its name is looked up again only if
    /// the first lookup never landed.
    pub fn go_up(&mut self) -> Vec<NetworkCommand> {
        let Some(crumb) = self.trail.pop() else {
            return Vec::new();
        };
        self.parent_id = crumb.id;
        let mut cmds = vec![self.refresh()];
        match crumb.name {
            Some(name) => {
                self.current_name = name;
                self.name_pending = false;
            }
            None => {
                self.current_name = ROOT_FOLDER_LABEL.to_string();
                self.name_pending = true;
                cmds.push(NetworkCommand::ResolveFolderName {
                    folder_id: self.parent_id.clone(),
                });
            }
        }
        cmds
    }

    /// Fetch the next page unless loading, errored or exhausted
    pub fn load_more(&mut self) -> Option<NetworkCommand> {
        let request = self.listing.next_page()?;
        Some(self.fetch(request))
    }

    // ========================
    // Mutations
    // ========================

    /// Validate and issue a folder creation under the current parent
    pub fn create_folder(&mut self, id: u64, name: &str) -> ApiResult<NetworkCommand> {
        let name = name.trim();
        if name.is_empty() {
            let err = ApiError::validation("Folder name is required");
            self.listing.set_error(err.clone());
            return Err(err);
        }
        Ok(NetworkCommand::CreateFolder {
            id,
            input: CreateFolderInput {
                name: name.to_string(),
                parent_id: self.parent_id.clone(),
            },
        })
    }

    pub fn update_folder(&mut self, id: u64, folder_id: &str, update: FolderUpdate) -> ApiResult<NetworkCommand> {
        let update = FolderUpdate {
            name: update.name.map(|n| n.trim().to_string()),
            ..update
        };
        let invalid = if update.is_empty() {
            Some("Nothing to update")
        } else if update.name.as_deref() == Some("") {
            Some("Folder name is required")
        } else {
            None
        };
        if let Some(message) = invalid {
            let err = ApiError::validation(message);
            self.listing.set_error(err.clone());
            return Err(err);
        }
        Ok(NetworkCommand::UpdateFolder {
            id,
            folder_id: folder_id.to_string(),
            update,
        })
    }

    /// The folder stays in the list until the backend confirms the delete
    pub fn delete_folder(&mut self, id: u64, folder_id: &str) -> NetworkCommand {
        NetworkCommand::DeleteFolder {
            id,
            folder_id: folder_id.to_string(),
        }
    }

    // ========================
    // Responses
    // ========================

    pub fn apply_page(&mut self, request: &PageRequest, result: ApiResult<FolderPage>) {
        let applied = match result {
            Ok(page) => {
                let count = page.folders.len();
                let applied = self.listing.apply_page(request, page.folders, page.last_key);
                if applied {
                    tracing::info!(
                        parent = %self.parent_id,
                        count,
                        total = self.listing.len(),
                        has_more = self.listing.has_more(),
                        "Folders page applied"
                    );
                }
                applied
            }
            Err(err) => {
                tracing::warn!(parent = %self.parent_id, error = %err, "Failed to fetch folders");
                self.listing.apply_error(request, err)
            }
        };
        if !applied {
            tracing::debug!(
                generation = request.generation,
                current = self.listing.generation(),
                "Discarding stale folders page"
            );
        }
    }

    pub fn apply_resolved(&mut self, folder_id: &str, folder: Option<Folder>) {
        if folder_id != self.parent_id {
            tracing::debug!(folder_id, current = %self.parent_id, "Discarding stale folder name");
            return;
        }
        self.current_name = best_effort_display_name(folder.as_ref());
        self.name_pending = false;
    }

    /// Prepends the new folder when it was created under the folder still
    /// on screen. The result is handed back for the caller to react to.
    pub fn apply_created(&mut self, parent_id: &str, result: ApiResult<Folder>) -> ApiResult<Folder> {
        match result {
            Ok(folder) => {
                if parent_id == self.parent_id {
                    self.listing.prepend(folder.clone());
                }
                tracing::info!(id = %folder.id, name = %folder.name, "Folder created");
                Ok(folder)
            }
            Err(err) => {
                self.listing.set_error(err.clone());
                Err(err)
            }
        }
    }

    pub fn apply_updated(&mut self, folder_id: &str, result: ApiResult<Folder>) -> ApiResult<Folder> {
        match result {
            Ok(folder) => {
                self.listing.replace_where(|f| f.id == folder_id, folder.clone());
                if folder_id == self.parent_id {
                    self.current_name = best_effort_display_name(Some(&folder));
                }
                Ok(folder)
            }
            Err(err) => {
                self.listing.set_error(err.clone());
                Err(err)
            }
        }
    }

    pub fn apply_deleted(&mut self, folder_id: &str, result: ApiResult<()>) -> ApiResult<()> {
        match result {
            Ok(()) => {
                self.listing.remove_where(|f| f.id == folder_id);
                tracing::info!(folder_id, "Folder deleted");
                Ok(())
            }
            Err(err) => {
                self.listing.set_error(err.clone());
                Err(err)
            }
        }
    }
}
