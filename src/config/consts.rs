// src/config/consts.rs

// Net config
pub const ORIGIN_BASE: &str = "https://github.com/users/";
pub const ORIGIN_SUFFIX: &str = "contributions";
pub const USER_AGENT: &str = "gh-contri-api-worker";
pub const ACCEPT: &str = "text/html";
pub const TIMEOUT_SECS: u64 = 15;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const DEFAULT_LOG_FILE: &str = ".store/debug.log";
pub const DEFAULT_CONFIG_FILE: &str = "contrib_chart.conf";

// Chart geometry (px)
pub const CELL_SIZE: u32 = 10;
pub const CELL_GAP: u32 = 2;
pub const CELL_RADIUS: u32 = 2;
pub const LEFT_MARGIN: u32 = 32;
pub const TOP_MARGIN: u32 = 40;
pub const LEGEND_BAND: u32 = 28;
pub const LEGEND_CAPTION_W: u32 = 36;

// Chart text
pub const FONT_FAMILY: &str = "'Segoe UI', Tahoma, sans-serif";
pub const TEXT_COLOR: &str = "#767676";

// Reply
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml; charset=utf-8";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
pub const SVG_CACHE_CONTROL: &str = "public, max-age=86400";
