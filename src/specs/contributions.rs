// src/specs/contributions.rs
//! Scraping *spec* for the contributions calendar page.
//!
//! Purpose:
//! - Parse `/users/<subject>/contributions` into one `DailyRecord` per day plus a total.
//! - Day cells are any element carrying `data-date` + `data-level`. Three layouts seen so far:
//!   1. legacy SVG: `<rect data-count="5" data-date=".." data-level="2">`
//!   2. older SVG without `data-count` (level only)
//!   3. table: `<td id="contribution-day-component-3-12" data-date=".." data-level="1">`
//!      with the count in `<tool-tip for="contribution-day-component-3-12">5 contributions on …</tool-tip>`
//!
//! Total precedence (first hit wins):
//! summed counts → activity description heading → legacy "N contributions in the last year"
//! sentence → number of days with level > 0 (undercounts; kept on purpose).
//!
//! Nothing in here fails: a heuristic that finds nothing just yields `None`.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::calendar::DailyRecord;
use crate::core::html::{attr_value, block_by_id, find_ci, inner_after_open_tag, next_tag_block_ci, openers, strip_tags};
use crate::core::sanitize::parse_count;

const DESCRIPTION_ID: &str = "js-contribution-activity-description";
const LAST_YEAR: [&str; 4] = ["in", "the", "last", "year"];

pub struct ContributionsBundle {
    /// Ascending by date, one per day.
    pub records: Vec<DailyRecord>,
    pub total: u64,
    pub total_source: TotalSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TotalSource {
    SummedCounts,
    Description,
    LegacySentence,
    ActiveDays,
}

/// Parse a full contributions page.
pub fn parse_doc(doc: &str) -> ContributionsBundle {
    let tips = tooltip_counts(doc);
    let mut records: Vec<DailyRecord> = openers(doc)
        .filter_map(|(_, opener)| parse_cell(opener, &tips))
        .collect();

    records.sort_by_key(|r| r.date);
    records.dedup_by_key(|r| r.date);

    let (total, total_source) = resolve_total(doc, &records);
    logd!(
        "Contributions: {} day cells, {} tooltips, total {total} via {total_source:?}",
        records.len(),
        tips.len()
    );

    ContributionsBundle { records, total, total_source }
}

fn resolve_total(doc: &str, records: &[DailyRecord]) -> (u64, TotalSource) {
    if let Some(t) = total_from_counts(records) {
        return (t, TotalSource::SummedCounts);
    }
    if let Some(t) = total_from_description(doc) {
        return (t, TotalSource::Description);
    }
    if let Some(t) = total_from_legacy_sentence(doc) {
        return (t, TotalSource::LegacySentence);
    }
    let active = records.iter().filter(|r| r.level > 0).count() as u64;
    (active, TotalSource::ActiveDays)
}

/* ---------------- cells ---------------- */

fn parse_cell(opener: &str, tips: &HashMap<&str, u64>) -> Option<DailyRecord> {
    let date = parse_date(attr_value(opener, "data-date")?)?;
    let level = parse_level(attr_value(opener, "data-level")?)?;

    let count = attr_value(opener, "data-count")
        .and_then(parse_count)
        .or_else(|| attr_value(opener, "id").and_then(|id| tips.get(id).copied()));

    Some(DailyRecord { date, level, count })
}

fn parse_date(v: &str) -> Option<NaiveDate> {
    // strict YYYY-MM-DD; chrono alone would accept "2024-1-5"
    let b = v.as_bytes();
    let shape_ok = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter().enumerate().all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !shape_ok { return None; }
    NaiveDate::parse_from_str(v, "%Y-%m-%d").ok()
}

fn parse_level(v: &str) -> Option<u8> {
    match v.as_bytes() {
        [c @ b'0'..=b'4'] => Some(c - b'0'),
        _ => None,
    }
}

/// `tool-tip[for]` → count parsed from its text.
fn tooltip_counts(doc: &str) -> HashMap<&str, u64> {
    let mut out = HashMap::new();
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(doc, "<tool-tip", "</tool-tip>", pos) {
        pos = e;
        let block = &doc[s..e];
        let Some((_, opener)) = openers(block).next() else { continue };
        let Some(target) = attr_value(opener, "for") else { continue };
        if let Some(n) = count_phrase(&strip_tags(inner_after_open_tag(block))) {
            out.insert(target, n);
        }
    }
    out
}

/* ---------------- totals ---------------- */

fn total_from_counts(records: &[DailyRecord]) -> Option<u64> {
    if records.is_empty() { return None; }
    // an unknown count or an overflowing sum defers to the next source
    records.iter().try_fold(0u64, |acc, r| acc.checked_add(r.count?))
}

fn total_from_description(doc: &str) -> Option<u64> {
    let text = match block_by_id(doc, DESCRIPTION_ID) {
        Some(block) => strip_tags(inner_after_open_tag(block)),
        None => first_heading_mentioning(doc, "contribution")?,
    };
    count_phrase(&text)
}

fn first_heading_mentioning(doc: &str, word: &str) -> Option<String> {
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(doc, "<h2", "</h2>", pos) {
        pos = e;
        let text = strip_tags(inner_after_open_tag(&doc[s..e]));
        if find_ci(&text, word, 0).is_some() {
            return Some(text);
        }
    }
    None
}

fn total_from_legacy_sentence(doc: &str) -> Option<u64> {
    let mut from = 0usize;
    while let Some(at) = find_ci(doc, "contribution", from) {
        from = at + 1;
        let Some(n) = number_before(doc, at) else { continue };
        if words_follow(doc, after_contribution(doc, at), &LAST_YEAR) {
            return Some(n);
        }
    }
    None
}

/// "1,234 contributions …" → 1234, "No contributions …" → 0.
fn count_phrase(text: &str) -> Option<u64> {
    let mut from = 0usize;
    while let Some(at) = find_ci(text, "contribution", from) {
        from = at + 1;
        if let Some(n) = number_before(text, at) {
            return Some(n);
        }
    }
    find_ci(text, "no contributions", 0).map(|_| 0)
}

/// Number token separated from byte `at` by at least one whitespace.
fn number_before(text: &str, at: usize) -> Option<u64> {
    let b = text.as_bytes();
    let mut end = at;
    while end > 0 && b[end - 1].is_ascii_whitespace() { end -= 1; }
    if end == at { return None; }
    let mut start = end;
    while start > 0 && (b[start - 1].is_ascii_digit() || b[start - 1] == b',') { start -= 1; }
    if start == end { return None; }
    parse_count(text[start..end].trim_start_matches(','))
}

fn after_contribution(text: &str, at: usize) -> usize {
    let end = at + "contribution".len();
    match text.as_bytes().get(end) {
        Some(b's') | Some(b'S') => end + 1,
        _ => end,
    }
}

/// `words` follow byte `from`, each preceded by at least one whitespace.
fn words_follow(text: &str, mut from: usize, words: &[&str]) -> bool {
    let b = text.as_bytes();
    for w in words {
        let ws_start = from;
        while from < b.len() && b[from].is_ascii_whitespace() { from += 1; }
        if from == ws_start { return false; }
        let end = from + w.len();
        if end > b.len() || !b[from..end].eq_ignore_ascii_case(w.as_bytes()) { return false; }
        from = end;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn legacy_svg_with_counts_sums_counts() {
        let doc = r#"
            <svg><g>
              <rect class="day" width="10" data-count="1,200" data-date="2024-01-03" data-level="4"/>
              <rect class="day" data-date="2024-01-01" data-count="0" data-level="0"/>
              <rect class="day" data-level="2" data-date="2024-01-02" data-count="3"/>
            </g></svg>
            <h2>999 contributions in the last year</h2>
        "#;
        let out = parse_doc(doc);
        let dates: Vec<NaiveDate> = out.records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d("2024-01-01"), d("2024-01-02"), d("2024-01-03")]);
        assert_eq!(out.records[1].count, Some(3));
        assert_eq!(out.total, 1203);
        assert_eq!(out.total_source, TotalSource::SummedCounts);
    }

    #[test]
    fn level_only_layout_uses_legacy_sentence() {
        let doc = r#"
            <div class="f4">12
               contributions
               in the last year</div>
            <rect data-date="2023-05-02" data-level="1"></rect>
            <rect data-date="2023-05-01" data-level="3"></rect>
        "#;
        let out = parse_doc(doc);
        assert_eq!(out.records.len(), 2);
        assert!(out.records.iter().all(|r| r.count.is_none()));
        assert_eq!(out.total, 12);
        assert_eq!(out.total_source, TotalSource::LegacySentence);
    }

    #[test]
    fn table_layout_reads_tooltips_and_description() {
        let doc = r#"
            <h2 id="js-contribution-activity-description" class="f4 text-normal mb-2">
              1,234
                contributions
                in the last year
            </h2>
            <table><tbody><tr>
              <td tabindex="0" data-ix="0" data-date="2024-06-02" id="contribution-day-component-0-0" data-level="0" class="ContributionCalendar-day"></td>
              <tool-tip for="contribution-day-component-0-0" popover="manual">No contributions on June 2nd.</tool-tip>
              <td data-date="2024-06-03" id="contribution-day-component-1-0" data-level="2" class="ContributionCalendar-day"></td>
              <tool-tip for="contribution-day-component-1-0" popover="manual">7 contributions on June 3rd.</tool-tip>
              <td data-date="2024-06-04" id="contribution-day-component-2-0" data-level="1"></td>
            </tr></tbody></table>
        "#;
        let out = parse_doc(doc);
        assert_eq!(out.records.len(), 3);
        assert_eq!(out.records[0].count, Some(0));
        assert_eq!(out.records[1].count, Some(7));
        assert_eq!(out.records[2].count, None); // no tooltip
        assert_eq!(out.total, 1234);
        assert_eq!(out.total_source, TotalSource::Description);
    }

    #[test]
    fn description_no_contributions_is_zero() {
        let doc = r#"
            <h2 class="f4 text-normal mb-2">No contributions in the last year</h2>
            <rect data-date="2024-01-01" data-level="0"/>
        "#;
        let out = parse_doc(doc);
        assert_eq!(out.total, 0);
        assert_eq!(out.total_source, TotalSource::Description);
    }

    #[test]
    fn falls_back_to_active_days() {
        let doc = r#"
            <rect data-date="2024-01-01" data-level="0"/>
            <rect data-date="2024-01-02" data-level="2"/>
            <rect data-date="2024-01-03" data-level="4"/>
        "#;
        let out = parse_doc(doc);
        assert_eq!(out.total, 2);
        assert_eq!(out.total_source, TotalSource::ActiveDays);
    }

    #[test]
    fn overflowing_counts_fall_through() {
        let doc = r#"
            <rect data-date="2024-01-01" data-level="4" data-count="18446744073709551615"/>
            <rect data-date="2024-01-02" data-level="1" data-count="1"/>
            <h2>42 contributions in the last year</h2>
        "#;
        let out = parse_doc(doc);
        assert_eq!(out.records[0].count, Some(u64::MAX));
        assert_eq!(out.total, 42);
        assert_eq!(out.total_source, TotalSource::Description);

        let bare = parse_doc(&doc.replace("<h2>42 contributions in the last year</h2>", ""));
        assert_eq!(bare.total, 2);
        assert_eq!(bare.total_source, TotalSource::ActiveDays);
    }

    #[test]
    fn skips_malformed_cells_and_duplicates() {
        let doc = r#"
            <rect data-date="2024-1-5" data-level="1"/>
            <rect data-date="2024-02-30" data-level="1"/>
            <rect data-date="2024-01-05" data-level="7"/>
            <rect data-date="2024-01-06" data-level="2" data-count="4"/>
            <rect data-date="2024-01-06" data-level="3" data-count="9"/>
        "#;
        let out = parse_doc(doc);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].level, 2);
        assert_eq!(out.total, 4);
    }

    #[test]
    fn no_cells_yields_empty_records() {
        let out = parse_doc("<html><body><p>Not Found</p></body></html>");
        assert!(out.records.is_empty());
        assert_eq!(out.total, 0);
    }

    #[test]
    fn extraction_is_idempotent() {
        let doc = r#"<rect data-date="2024-01-02" data-level="1"/><rect data-date="2024-01-01" data-level="2" data-count="3"/>"#;
        let a = parse_doc(doc);
        let b = parse_doc(doc);
        assert_eq!(a.records, b.records);
        assert_eq!(a.total, b.total);
    }

    #[test]
    fn count_phrase_shapes() {
        assert_eq!(count_phrase("1 contribution on May 1st."), Some(1));
        assert_eq!(count_phrase("2,048 contributions in 2023"), Some(2048));
        assert_eq!(count_phrase("No contributions on May 1st."), Some(0));
        assert_eq!(count_phrase("contributions"), None);
    }
}
