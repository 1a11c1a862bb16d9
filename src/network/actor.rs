//! Network actor - runs backend requests in the Tokio runtime

use std::path::Path;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::error::{ApiError, ApiResult};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::ImageUpload;
use crate::network::client::ApiClient;

/// Network actor that executes commands against the backend. Requests run
/// concurrently and answer in completion order; nothing is cancelled.
pub struct NetworkActor {
    client: ApiClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: ApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                        Some(cmd) => self.spawn(cmd),
                    }
                }

                // Clean up completed tasks
                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        if e.is_panic() {
                            tracing::error!(error = %e, "Network task panicked");
                        }
                    }
                }
            }
        }
    }

    fn spawn(&mut self, cmd: NetworkCommand) {
        let client = self.client.clone();
        let response_tx = self.response_tx.clone();

        self.active_requests.spawn(async move {
            if let Some(response) = execute(&client, cmd).await {
                let _ = response_tx.send(response);
            }
        });
    }
}

/// Run one command to completion and build its response
pub async fn execute(client: &ApiClient, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let response = match cmd {
        NetworkCommand::FetchFolders { request, parent_id, sort } => {
            tracing::info!(parent = %parent_id, cursor = ?request.cursor, "Fetching folders page");
            let result = client.get_folders(&parent_id, request.cursor.as_ref(), sort).await;
            NetworkResponse::FoldersPage { request, result }
        }

        NetworkCommand::ResolveFolderName { folder_id } => {
            let folder = match client.get_folder(&folder_id).await {
                Ok(folder) => Some(folder),
                Err(e) => {
                    tracing::warn!(folder_id, error = %e, "Could not resolve folder name");
                    None
                }
            };
            NetworkResponse::FolderResolved { folder_id, folder }
        }

        NetworkCommand::CreateFolder { id, input } => {
            let result = client.create_folder(&input).await;
            NetworkResponse::FolderCreated {
                id,
                parent_id: input.parent_id,
                result,
            }
        }

        NetworkCommand::UpdateFolder { id, folder_id, update } => {
            let result = client.update_folder(&folder_id, &update).await;
            NetworkResponse::FolderUpdated { id, folder_id, result }
        }

        NetworkCommand::DeleteFolder { id, folder_id } => {
            tracing::info!(id, folder_id, "Deleting folder");
            let result = client.delete_folder(&folder_id).await;
            NetworkResponse::FolderDeleted { id, folder_id, result }
        }

        NetworkCommand::FetchImages { request, folder_id, sort } => {
            let result = client.get_images(&folder_id, request.cursor.as_ref(), sort).await;
            NetworkResponse::ImagesPage {
                request,
                folder_id,
                result,
            }
        }

        NetworkCommand::UploadImage { id, folder_id, path } => {
            let result = match read_upload(&path).await {
                Ok(upload) => client.upload_image(&folder_id, &upload).await,
                Err(e) => Err(e),
            };
            NetworkResponse::ImageUploaded { id, folder_id, result }
        }

        NetworkCommand::DeleteImage {
            id,
            folder_id,
            image_id,
            filename,
        } => {
            tracing::info!(id, folder_id, image_id, "Deleting image");
            let result = client.delete_image(&folder_id, &image_id, &filename).await;
            NetworkResponse::ImageDeleted {
                id,
                folder_id,
                image_id,
                result,
            }
        }

        NetworkCommand::CountFiles { folder_id } => {
            let result = client.get_files(&folder_id).await.map(|listing| listing.files.len());
            NetworkResponse::FilesCounted { folder_id, result }
        }

        NetworkCommand::Shutdown => return None,
    };
    Some(response)
}

/// Load a local file for upload, guessing its content type from the name
pub async fn read_upload(path: &Path) -> ApiResult<ImageUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::validation(format!("Not a file: {}", path.display())))?
        .to_string();

    let content_type = mime_guess::from_path(path).first_or_octet_stream().to_string();
    Ok(ImageUpload::new(name, content_type, bytes))
}
