// src/config/file.rs
//! `key=value` config file, layered over `AppOptions::default()`.
//!
//! ```text
//! # contrib_chart.conf
//! user_agent=my-chart-bot
//! timeout_secs=10
//! store_dir=.store        # "none" keeps the cache in memory
//! show_subject=1
//! text_color=#ffffff
//! ```
use std::{fs, path::{Path, PathBuf}};

use super::options::AppOptions;

/// Missing or unreadable file → defaults. Unknown keys and bad values are skipped.
pub fn load(path: &Path) -> AppOptions {
    let mut cfg = AppOptions::default();
    if !path.exists() {
        return cfg;
    }
    match fs::read_to_string(path) {
        Ok(text) => apply(&mut cfg, &text),
        Err(e) => loge!("Config {}: {e}", path.display()),
    }
    cfg
}

/// Apply `key=value` lines onto `cfg`.
pub fn apply(cfg: &mut AppOptions, text: &str) {
    for line in text.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() { continue; }
        let Some(eq) = line.find('=') else { continue };
        let key = line[..eq].trim();
        let val = line[eq + 1..].trim();
        match key {
            "origin_base" => cfg.fetch.origin_base = s!(val),
            "user_agent" => cfg.fetch.user_agent = s!(val),
            "timeout_secs" => {
                if let Ok(v) = val.parse::<u64>() { cfg.fetch.timeout_secs = v; }
            }
            "store_dir" => {
                cfg.fetch.store_dir = if val.is_empty() || val.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(PathBuf::from(val))
                };
            }
            "log_file" => cfg.log_file = Some(PathBuf::from(val)),
            "show_subject" => cfg.chart.show_subject = parse_bool(val),
            "text_color" => cfg.chart.text_color = s!(val),
            "font_family" => cfg.chart.font_family = s!(val),
            other => logd!("Config: ignoring unknown key {other:?}"),
        }
    }
}

pub fn save(path: &Path, cfg: &AppOptions) -> std::io::Result<()> {
    let mut s = s!();
    push!(s, "origin_base={}\n", cfg.fetch.origin_base);
    push!(s, "user_agent={}\n", cfg.fetch.user_agent);
    push!(s, "timeout_secs={}\n", cfg.fetch.timeout_secs);
    match &cfg.fetch.store_dir {
        Some(dir) => push!(s, "store_dir={}\n", dir.display()),
        None => s.push_str("store_dir=none\n"),
    }
    if let Some(log) = &cfg.log_file {
        push!(s, "log_file={}\n", log.display());
    }
    push!(s, "show_subject={}\n", if cfg.chart.show_subject { 1 } else { 0 });
    push!(s, "text_color={}\n", cfg.chart.text_color);
    push!(s, "font_family={}\n", cfg.chart.font_family);
    fs::write(path, s)
}

fn parse_bool(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true") || val.eq_ignore_ascii_case("yes")
}

// Colors carry '#', so only a '#' preceded by whitespace (or at line start) opens a comment.
fn strip_comment(line: &str) -> &str {
    let b = line.as_bytes();
    for (i, &c) in b.iter().enumerate() {
        if c == b'#' && (i == 0 || b[i - 1].is_ascii_whitespace()) {
            return &line[..i];
        }
    }
    line
}
