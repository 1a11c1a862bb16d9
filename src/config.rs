//! Configuration: command line, environment, YAML file and defaults,
//! in that order of precedence.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_API_BASE_URL, DEFAULT_PAGE_LIMIT,
    ENV_API_BASE_URL,
};
use crate::models::{SortDirection, SortField, SortOptions};
use crate::platform::ThemeName;
use crate::routes::Route;

/// Browse folders and images on a remote backend
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "folio", version, about)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = ENV_API_BASE_URL)]
    pub base_url: Option<String>,

    /// Start route: `/`, `/folder` or `/folder/<id>`
    #[arg(long, default_value = "/")]
    pub route: String,

    /// Print the listing to stdout instead of opening the browser
    #[arg(long)]
    pub headless: bool,

    /// Color theme (light or dark)
    #[arg(long)]
    pub theme: Option<ThemeName>,

    /// Items requested per page
    #[arg(long)]
    pub page_limit: Option<u32>,

    /// Config file (defaults to ~/.folio/config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Keys accepted in the YAML config file; all optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub theme: Option<ThemeName>,
    pub page_limit: Option<u32>,
    pub request_timeout_secs: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub sort_field: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
}

impl FileConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str::<Option<FileConfig>>(content)?.unwrap_or_default())
    }
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub route: Route,
    pub headless: bool,
    pub theme: ThemeName,
    pub page_limit: u32,
    /// `None` leaves requests to the transport's own limits
    pub request_timeout: Option<Duration>,
    pub log_dir: PathBuf,
    pub log_level: tracing::Level,
    pub sort: SortOptions,
}

/// `~/.folio`, or the working directory when there is no home
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

impl Config {
    /// Read the config file (if any) and merge it with the command line
    pub fn load(cli: Cli) -> Result<Config> {
        let file = match &cli.config {
            Some(path) => Some(read_file_config(path)?),
            None => {
                let default_path = config_dir().join(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Some(read_file_config(&default_path)?)
                } else {
                    None
                }
            }
        };
        Config::resolve(cli, file.unwrap_or_default())
    }

    /// Merge command line (which already carries the environment) over the
    /// file config and defaults
    pub fn resolve(cli: Cli, file: FileConfig) -> Result<Config> {
        let page_limit = cli.page_limit.or(file.page_limit).unwrap_or(DEFAULT_PAGE_LIMIT);
        if page_limit == 0 {
            anyhow::bail!("page_limit must be at least 1");
        }

        let log_level = match file.log_level.as_deref() {
            Some(level) => level
                .parse::<tracing::Level>()
                .map_err(|_| anyhow::anyhow!("invalid log_level '{}'", level))?,
            None => tracing::Level::INFO,
        };

        Ok(Config {
            base_url: cli
                .base_url
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            route: Route::parse_or_root(&cli.route),
            headless: cli.headless,
            theme: cli.theme.or(file.theme).unwrap_or_default(),
            page_limit,
            request_timeout: file.request_timeout_secs.map(Duration::from_secs),
            log_dir: file.log_dir.unwrap_or_else(config_dir),
            log_level,
            sort: SortOptions::new(
                file.sort_field.unwrap_or_default(),
                file.sort_direction.unwrap_or_default(),
            ),
        })
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    FileConfig::from_yaml(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))
}
