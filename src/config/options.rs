// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub chart: ChartOptions,
    /// Overrides `consts::DEFAULT_LOG_FILE`.
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    /// Everything before the subject segment, e.g. `https://github.com/users/`
    pub origin_base: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// `None` keeps the cache in memory only.
    pub store_dir: Option<PathBuf>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            origin_base: s!(ORIGIN_BASE),
            user_agent: s!(USER_AGENT),
            timeout_secs: TIMEOUT_SECS,
            store_dir: Some(PathBuf::from(STORE_DIR)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartOptions {
    /// Append "by <subject>" to the header line.
    pub show_subject: bool,
    pub text_color: String,
    pub font_family: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            show_subject: false,
            text_color: s!(TEXT_COLOR),
            font_family: s!(FONT_FAMILY),
        }
    }
}
