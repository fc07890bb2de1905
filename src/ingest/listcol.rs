//! Multi-value columns stored as serialized lists, e.g. `['Finance', 'Accounting']`.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// Parse a list column cell. Blank cells and anything that is not a list of
/// quoted strings yield an empty list.
pub fn list_column(column: &str, raw: Option<&str>) -> Vec<String> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Vec::new();
    };

    match parse_list(value) {
        Some(items) => items,
        None => {
            debug!(column, value, "unparseable list literal, treating as empty");
            Vec::new()
        }
    }
}

/// Parse a Python or JSON style list literal of quoted strings.
///
/// Both quote styles and backslash escapes are accepted, as is a trailing
/// comma. Returns `None` for anything else.
pub fn parse_list(raw: &str) -> Option<Vec<String>> {
    let inner = raw.trim().strip_prefix('[')?.strip_suffix(']')?;
    let mut chars = inner.chars().peekable();
    let mut items = Vec::new();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let quote = match chars.next() {
            None => break,
            Some(q @ ('\'' | '"')) => q,
            Some(_) => return None,
        };

        let mut item = String::new();
        loop {
            match chars.next()? {
                '\\' => item.push(unescape(chars.next()?)),
                c if c == quote => break,
                c => item.push(c),
            }
        }
        items.push(item);

        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(_) => return None,
        }
    }

    Some(items)
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    }
}

/// Split a head-count entry such as `"1,712 University of Washington"` into
/// `("University of Washington", 1712)`.
pub fn parse_entry(entry: &str) -> Option<(String, u64)> {
    static ENTRY: OnceLock<Regex> = OnceLock::new();
    let re = ENTRY.get_or_init(|| Regex::new(r"^([\d,]+)\s+(.+)").expect("valid entry pattern"));

    let caps = re.captures(entry.trim())?;
    let count = caps[1].replace(',', "").parse::<u64>().ok()?;
    let name = caps[2].trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), count))
}
