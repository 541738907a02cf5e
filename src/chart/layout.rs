// src/chart/layout.rs
//! Pixel geometry, kept apart from the SVG text so it can be checked on its own.

use crate::calendar::Week;
use crate::config::consts::{CELL_GAP, CELL_SIZE, LEFT_MARGIN, LEGEND_BAND, LEGEND_CAPTION_W, TOP_MARGIN};

pub const PITCH: u32 = CELL_SIZE + CELL_GAP;
pub const SWATCHES: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub weeks: u32,
}

impl Geometry {
    pub fn new(weeks: usize) -> Self {
        Self { weeks: weeks as u32 }
    }

    pub fn width(&self) -> u32 {
        LEFT_MARGIN + self.weeks * PITCH
    }

    pub fn height(&self) -> u32 {
        TOP_MARGIN + 7 * PITCH + LEGEND_BAND
    }

    /// Top-left of the cell for `week` (column) and `day` (row, 0 = Sunday).
    pub fn cell(&self, week: usize, day: usize) -> (u32, u32) {
        (LEFT_MARGIN + week as u32 * PITCH, TOP_MARGIN + day as u32 * PITCH)
    }

    /// Baseline of month labels, just above the grid.
    pub fn month_label_y(&self) -> u32 {
        TOP_MARGIN - 6
    }

    /// Right edge of weekday labels (text-anchor="end").
    pub fn weekday_label_x(&self) -> u32 {
        LEFT_MARGIN - 6
    }

    /// Top-left of the first legend swatch. Right-aligned under the grid,
    /// never left of the grid's first column plus the "Less" caption.
    pub fn legend(&self) -> (u32, u32) {
        let strip = SWATCHES * PITCH + LEGEND_CAPTION_W;
        let x = self.width().saturating_sub(strip).max(LEFT_MARGIN + LEGEND_CAPTION_W);
        (x, TOP_MARGIN + 7 * PITCH + 10)
    }
}

/// Weekday rows that get a label.
pub const WEEKDAY_LABELS: [(usize, &str); 3] = [(1, "Mon"), (3, "Wed"), (5, "Fri")];

/// `(week index, "Jan")` each time the leading day's month differs from the last label.
pub fn month_labels(weeks: &[Week]) -> Vec<(usize, String)> {
    use chrono::Datelike;

    let mut out = Vec::new();
    let mut last: Option<(i32, u32)> = None;
    for (i, w) in weeks.iter().enumerate() {
        let lead = w.start();
        let ym = (lead.year(), lead.month());
        if last != Some(ym) {
            out.push((i, lead.format("%b").to_string()));
            last = Some(ym);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{build_weeks, DailyRecord};
    use chrono::NaiveDate;

    #[test]
    fn canvas_formulas() {
        let g = Geometry::new(53);
        assert_eq!(g.width(), LEFT_MARGIN + 53 * (CELL_SIZE + CELL_GAP));
        assert_eq!(g.height(), TOP_MARGIN + 7 * (CELL_SIZE + CELL_GAP) + LEGEND_BAND);
        assert_eq!(g.cell(0, 0), (LEFT_MARGIN, TOP_MARGIN));
        assert_eq!(g.cell(2, 6), (LEFT_MARGIN + 2 * PITCH, TOP_MARGIN + 6 * PITCH));
    }

    #[test]
    fn legend_fits_wide_charts_and_clamps_narrow_ones() {
        let wide = Geometry::new(53);
        let (x, y) = wide.legend();
        assert!(x + SWATCHES * PITCH <= wide.width());
        assert!(y > TOP_MARGIN + 7 * PITCH);

        let narrow = Geometry::new(1);
        assert_eq!(narrow.legend().0, LEFT_MARGIN + LEGEND_CAPTION_W);
    }

    #[test]
    fn each_month_labelled_once() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records: Vec<DailyRecord> = (0..70)
            .map(|i| DailyRecord::empty(start + chrono::Days::new(i)))
            .collect();
        let weeks = build_weeks(&records);
        let labels = month_labels(&weeks);
        let names: Vec<&str> = labels.iter().map(|(_, n)| n.as_str()).collect();
        // first week leads with Sun 2023-12-31
        assert_eq!(names, vec!["Dec", "Jan", "Feb", "Mar"]);
        assert_eq!(labels[0].0, 0);
        assert_eq!(labels[1].0, 1);
    }
}
