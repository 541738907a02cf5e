// src/core/html.rs
//! Allocation-free, case-insensitive HTML scanning.
//! No DOM: callers slice the document by tag blocks and read attributes off openers.

/// ASCII-case-insensitive `find` starting at byte `from`.
pub fn find_ci(hay: &str, needle: &str, from: usize) -> Option<usize> {
    let h = hay.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() { return Some(from.min(h.len())); }
    if from >= h.len() || n.len() > h.len() - from { return None; }
    (from..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Next `<o ...>…c` block at or after `from`, as byte range `(start, end)`.
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let start = find_ci(s, o, from)?;
    let open_end = opener_end(s, start)?;
    let close = find_ci(s, c, open_end)?;
    Some((start, close + c.len()))
}

pub fn inner_after_open_tag(block: &str) -> &str {
    let Some(oe) = opener_end(block, 0) else { return "" };
    match block.rfind('<') {
        Some(cs) if cs >= oe => &block[oe..cs],
        _ => &block[oe..],
    }
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&super::sanitize::normalize_entities(&out))
}

/// Byte index just past the `>` closing the tag that opens at `lt`.
/// Quoted attribute values may contain `>`.
fn opener_end(s: &str, lt: usize) -> Option<usize> {
    let b = s.as_bytes();
    let mut i = lt + 1;
    let mut quote: Option<u8> = None;
    while i < b.len() {
        match (quote, b[i]) {
            (Some(q), c) if c == q => quote = None,
            (None, b'"') | (None, b'\'') => quote = Some(b[i]),
            (None, b'>') => return Some(i + 1),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Iterator over start-tag openers (`<name …>`), skipping closers, comments and doctypes.
pub struct Openers<'a> {
    s: &'a str,
    i: usize,
}

pub fn openers(s: &str) -> Openers<'_> {
    Openers { s, i: 0 }
}

impl<'a> Iterator for Openers<'a> {
    /// (byte offset of '<', opener text including '<' and '>')
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let b = self.s.as_bytes();
        loop {
            let lt = self.i + self.s.get(self.i..)?.find('<')?;
            let first = *b.get(lt + 1)?;
            if !first.is_ascii_alphabetic() {
                // </close>, <!-- -->, <!doctype>, stray '<'
                self.i = lt + 1;
                continue;
            }
            let Some(end) = opener_end(self.s, lt) else {
                self.i = b.len();
                return None;
            };
            self.i = end;
            return Some((lt, &self.s[lt..end]));
        }
    }
}

/// Lowercased-compare tag name of an opener (`<td class=..>` → `td`).
pub fn tag_name(opener: &str) -> &str {
    let body = opener.trim_start_matches('<');
    let end = body
        .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
        .unwrap_or(body.len());
    &body[..end]
}

/// Value of attribute `name` on an opener. Attribute order, quoting style
/// (double, single, none) and name case do not matter. Valueless attributes yield `""`.
pub fn attr_value<'a>(opener: &'a str, name: &str) -> Option<&'a str> {
    let b = opener.as_bytes();
    let n = b.len();
    // skip '<' and tag name
    let mut i = 1 + tag_name(opener).len();

    while i < n {
        while i < n && (b[i].is_ascii_whitespace() || b[i] == b'/') { i += 1; }
        if i >= n || b[i] == b'>' { break; }

        let name_start = i;
        while i < n && !b[i].is_ascii_whitespace() && !matches!(b[i], b'=' | b'>' | b'/') { i += 1; }
        let attr = &opener[name_start..i];

        while i < n && b[i].is_ascii_whitespace() { i += 1; }
        let mut value = "";
        if i < n && b[i] == b'=' {
            i += 1;
            while i < n && b[i].is_ascii_whitespace() { i += 1; }
            if i < n && (b[i] == b'"' || b[i] == b'\'') {
                let q = b[i];
                let v_start = i + 1;
                let v_end = b[v_start..].iter().position(|&c| c == q).map_or(n, |p| v_start + p);
                value = &opener[v_start..v_end];
                i = (v_end + 1).min(n);
            } else {
                let v_start = i;
                while i < n && !b[i].is_ascii_whitespace() && b[i] != b'>' { i += 1; }
                value = &opener[v_start..i];
            }
        }
        if attr.eq_ignore_ascii_case(name) {
            return Some(value);
        }
    }
    None
}

/// First `<tag … id="id">…</tag>` block whose opener carries `id`.
pub fn block_by_id<'a>(doc: &'a str, id: &str) -> Option<&'a str> {
    for (start, opener) in openers(doc) {
        if attr_value(opener, "id") != Some(id) { continue; }
        let close = join!("</", tag_name(opener), ">");
        let inner_start = start + opener.len();
        let end = find_ci(doc, &close, inner_start).map_or(doc.len(), |c| c + close.len());
        return Some(&doc[start..end]);
    }
    None
}
