// src/chart/mod.rs
pub mod layout;
pub mod scheme;
pub mod svg;

use crate::calendar::Week;

pub use scheme::{build_scheme, ColorScheme};
pub use svg::render_svg;

/// Everything the renderer needs. `weeks` is never empty here: an empty scrape
/// stops the pipeline before rendering.
#[derive(Clone, Debug)]
pub struct ChartSpec {
    pub weeks: Vec<Week>,
    pub scheme: ColorScheme,
    pub subject: String,
    pub total: u64,
}
