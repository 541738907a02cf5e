// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific scraping specifications. Each spec knows *where the ground truth
//! lives in the HTML* of one page and *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of a page already in memory.
//! - **Heuristic precedence** when the page has carried the same fact in different
//!   places over time (e.g. the yearly total).
//! - **Tolerant extraction** using `core::html` helpers (case-insensitive tag blocks,
//!   attribute lookup independent of order and quoting, tag stripping).
//!
//! ## What does **not** live here
//! - **Networking and caching**: `fetch::Fetcher` hands us the markup.
//! - **Layout and rendering**: `calendar` and `chart`.
//!
//! ## Typical call chain
//! ```text
//! runner → fetch::Fetcher::fetch → specs::contributions::parse_doc
//!                                ↘ records + total → calendar::build_weeks → chart
//! ```
//!
//! ## Testing notes
//! - Specs are testable **offline** against inline fixtures.
//! - Keep selectors resilient to whitespace, attribute order and markup noise.
pub mod contributions;
