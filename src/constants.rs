//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Backend used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "https://actimate-takehome.netlify.app/api";

/// Id of the top-level folder
pub const ROOT_FOLDER_ID: &str = "root";

/// Label shown when the current folder's name cannot be resolved
pub const ROOT_FOLDER_LABEL: &str = "root";

/// Page size requested from listing endpoints
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Environment variable overriding the backend base URL
pub const ENV_API_BASE_URL: &str = "FOLIO_API_BASE_URL";

/// Environment variable selecting the front-end (`terminal` or `headless`)
pub const ENV_PLATFORM: &str = "FOLIO_PLATFORM";

/// Directory under the home directory holding config and logs
pub const CONFIG_DIR_NAME: &str = ".folio";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Log file name
pub const LOG_FILE_NAME: &str = "folio.log";

/// Application name
pub const APP_NAME: &str = "Folio";
