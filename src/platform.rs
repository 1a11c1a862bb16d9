//! Front-end selection.
//!
//! The platform is worked out once at start-up and turned into a single
//! [`Frontend`] that the binary runs; nothing downstream branches on it.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::Deserialize;

/// Where the application is presented
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    /// Interactive full-screen browser
    Terminal,
    /// One-shot listing on stdout
    Headless,
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terminal" | "tui" => Ok(Platform::Terminal),
            "headless" | "plain" => Ok(Platform::Headless),
            other => Err(format!("unknown platform '{}'", other)),
        }
    }
}

impl Platform {
    /// Explicit flag first, then the environment override, then whether
    /// stdout is a terminal at all
    pub fn detect(headless_flag: bool, env_override: Option<&str>, stdout_is_tty: bool) -> Platform {
        if headless_flag {
            return Platform::Headless;
        }
        if let Some(value) = env_override {
            match value.parse() {
                Ok(platform) => return platform,
                Err(e) => tracing::warn!(error = %e, "Ignoring platform override"),
            }
        }
        if stdout_is_tty {
            Platform::Terminal
        } else {
            Platform::Headless
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeName::Light => write!(f, "light"),
            ThemeName::Dark => write!(f, "dark"),
        }
    }
}

/// Colors used by the terminal front-end
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: ThemeName,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub focus_border: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error: Color,
    pub success: Color,
    pub popup_bg: Color,
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Theme {
        match name {
            ThemeName::Light => Theme {
                name,
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                focus_border: Color::Blue,
                highlight_fg: Color::White,
                highlight_bg: Color::Blue,
                error: Color::Red,
                success: Color::Green,
                popup_bg: Color::White,
            },
            ThemeName::Dark => Theme {
                name,
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                focus_border: Color::Cyan,
                highlight_fg: Color::Black,
                highlight_bg: Color::Cyan,
                error: Color::LightRed,
                success: Color::LightGreen,
                popup_bg: Color::Black,
            },
        }
    }
}

/// The concrete front-end the binary runs
#[derive(Clone, Debug, PartialEq)]
pub enum Frontend {
    Terminal(Theme),
    Headless,
}

pub fn select_frontend(platform: Platform, theme: ThemeName) -> Frontend {
    match platform {
        Platform::Terminal => Frontend::Terminal(Theme::from_name(theme)),
        Platform::Headless => Frontend::Headless,
    }
}
