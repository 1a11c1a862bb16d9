//! Start routes: `/`, `/folder` and `/folder/{id}`

use std::fmt;
use std::str::FromStr;

use crate::constants::ROOT_FOLDER_ID;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Root,
    Folder(String),
}

impl Route {
    /// Id of the folder the route shows
    pub fn folder_id(&self) -> &str {
        match self {
            Route::Root => ROOT_FOLDER_ID,
            Route::Folder(id) => id,
        }
    }

    /// Parse a route, falling back to the root for anything unknown
    pub fn parse_or_root(path: &str) -> Route {
        path.parse().unwrap_or_else(|e: UnknownRoute| {
            tracing::warn!(route = %e.0, "Unknown route, showing root");
            Route::Root
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoute(pub String);

impl fmt::Display for UnknownRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown route: {}", self.0)
    }
}

impl std::error::Error for UnknownRoute {}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .trim_start_matches('/')
            .split('/')
            .filter(|seg| !seg.is_empty())
            .collect();

        match segments.as_slice() {
            [] | ["folder"] => Ok(Route::Root),
            ["folder", id] if *id == ROOT_FOLDER_ID => Ok(Route::Root),
            ["folder", id] => Ok(Route::Folder((*id).to_string())),
            _ => Err(UnknownRoute(s.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Root => write!(f, "/"),
            Route::Folder(id) => write!(f, "/folder/{}", id),
        }
    }
}
