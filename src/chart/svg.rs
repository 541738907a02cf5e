// src/chart/svg.rs
//! ChartSpec → SVG text. Pure; all numbers come from `layout::Geometry`.

use super::layout::{month_labels, Geometry, PITCH, WEEKDAY_LABELS};
use super::{ChartSpec, ColorScheme};
use crate::config::consts::{CELL_RADIUS, CELL_SIZE, LEFT_MARGIN};
use crate::config::ChartOptions;
use crate::core::sanitize::escape_xml;

/// "1 contribution" / "12 contributions"
pub fn contributions_phrase(total: u64) -> String {
    if total == 1 { s!("1 contribution") } else { format!("{total} contributions") }
}

/// Accessible summary used for `aria-label` and `<title>`.
pub fn summary_label(total: u64, subject: &str) -> String {
    format!("{} in the last year by {subject}", contributions_phrase(total))
}

pub fn render_svg(spec: &ChartSpec, opts: &ChartOptions) -> String {
    let t = std::time::Instant::now();
    let g = Geometry::new(spec.weeks.len());
    let (w, h) = (g.width(), g.height());
    let label = escape_xml(&summary_label(spec.total, &spec.subject));
    let font = escape_xml(&opts.font_family);
    let fill = escape_xml(&opts.text_color);
    let text_attrs = format!(r#"font-family="{font}" fill="{fill}""#);

    let mut out = String::with_capacity(spec.weeks.len() * 7 * 110 + 2048);
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    push!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="{label}">"#
    );
    push!(out, "\n  <title>{label}</title>\n");
    out.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"transparent\" />\n");

    // header
    let mut header = format!("{} in the last year", contributions_phrase(spec.total));
    if opts.show_subject {
        push!(header, " by {}", spec.subject);
    }
    push!(
        out,
        "  <text x=\"{LEFT_MARGIN}\" y=\"20\" font-size=\"14\" {text_attrs}>{}</text>\n",
        escape_xml(&header)
    );

    // axis labels
    out.push_str("  <g aria-hidden=\"true\" font-size=\"9\">\n");
    for (week, name) in month_labels(&spec.weeks) {
        let (x, _) = g.cell(week, 0);
        push!(out, "    <text x=\"{x}\" y=\"{}\" {text_attrs}>{name}</text>\n", g.month_label_y());
    }
    for (day, name) in WEEKDAY_LABELS {
        let (_, y) = g.cell(0, day);
        push!(
            out,
            "    <text x=\"{}\" y=\"{}\" text-anchor=\"end\" {text_attrs}>{name}</text>\n",
            g.weekday_label_x(),
            y + CELL_SIZE - 1
        );
    }
    out.push_str("  </g>\n");

    // cells
    out.push_str("  <g>\n");
    for (wi, week) in spec.weeks.iter().enumerate() {
        for (di, day) in week.days.iter().enumerate() {
            let (x, y) = g.cell(wi, di);
            push!(
                out,
                r#"    <rect x="{x}" y="{y}" width="{CELL_SIZE}" height="{CELL_SIZE}" rx="{CELL_RADIUS}" fill="{}" data-date="{}" data-level="{}""#,
                spec.scheme.color(day.level),
                day.key(),
                day.level
            );
            if let Some(c) = day.count {
                push!(out, " data-count=\"{c}\"");
            }
            out.push_str(" />\n");
        }
    }
    out.push_str("  </g>\n");

    render_legend(&mut out, &spec.scheme, &g, &text_attrs);
    out.push_str("</svg>\n");

    logd!("Render: {} weeks, {} bytes in {:?}", spec.weeks.len(), out.len(), t.elapsed());
    out
}

fn render_legend(out: &mut String, scheme: &ColorScheme, g: &Geometry, text_attrs: &str) {
    let (x, y) = g.legend();
    out.push_str("  <g aria-hidden=\"true\" font-size=\"9\">\n");
    push!(out, "    <text x=\"{}\" y=\"{}\" text-anchor=\"end\" {text_attrs}>Less</text>\n", x - 4, y + 9);
    for (i, color) in scheme.colors().iter().enumerate() {
        push!(
            out,
            "    <rect x=\"{}\" y=\"{y}\" width=\"{CELL_SIZE}\" height=\"{CELL_SIZE}\" rx=\"{CELL_RADIUS}\" fill=\"{color}\" />\n",
            x + i as u32 * PITCH
        );
    }
    push!(
        out,
        "    <text x=\"{}\" y=\"{}\" {text_attrs}>More</text>\n",
        x + scheme.colors().len() as u32 * PITCH + 4,
        y + 9
    );
    out.push_str("  </g>\n");
}
