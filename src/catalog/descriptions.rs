//! Parser for the client-info description table.
//!
//! The client ships item descriptions as a Lua table of the form
//!
//! ```text
//! [501] = {
//!     identifiedDescriptionName = {
//!         "^FFFFFFRed Potion^000000",
//!         "A potion made from grinding Red Herbs.",
//!     },
//!     ...
//! },
//! ```
//!
//! Only `identifiedDescriptionName` is extracted (never the unidentified
//! variant). Color codes (`^RRGGBB`), underscore separator lines and `...`
//! placeholders are stripped; remaining lines are joined with newlines.

use std::collections::BTreeMap;

const IDENTIFIED_KEY: &str = "identifiedDescriptionName";

/// Parse a description table, returning item id -> cleaned description.
///
/// The parser is deliberately lenient: entries it cannot make sense of are
/// skipped rather than failing the whole file.
pub fn parse(content: &str) -> BTreeMap<u32, String> {
    let mut descriptions = BTreeMap::new();
    let entries = find_entries(content);

    for (index, (item_id, body_start)) in entries.iter().enumerate() {
        let block_end = entries
            .get(index + 1)
            .map(|(_, next_start)| *next_start)
            .unwrap_or(content.len());
        let Some(block) = content.get(*body_start..block_end) else {
            continue;
        };
        if let Some(description) = extract_description(block) {
            descriptions.insert(*item_id, description);
        }
    }

    descriptions
}

/// Locate every `[<digits>] = {` entry, returning (id, offset past the
/// opening brace) pairs in file order.
fn find_entries(content: &str) -> Vec<(u32, usize)> {
    let mut entries = Vec::new();
    let mut pos = 0usize;

    while let Some(rel) = content.get(pos..).and_then(|rest| rest.find('[')) {
        pos += rel + 1;
        let Some(rest) = content.get(pos..) else {
            break;
        };
        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        if digits.is_empty() {
            continue;
        }
        let Ok(item_id) = digits.parse::<u32>() else {
            continue;
        };
        if let Some(body_start) = expect_symbols(content, pos + digits.len(), &[']', '=', '{']) {
            entries.push((item_id, body_start));
            pos = body_start;
        }
    }

    entries
}

/// Skip whitespace and match each expected symbol in turn, returning the
/// offset just past the last one.
fn expect_symbols(content: &str, mut pos: usize, symbols: &[char]) -> Option<usize> {
    for &symbol in symbols {
        loop {
            let c = content.get(pos..)?.chars().next()?;
            if c.is_whitespace() {
                pos += c.len_utf8();
            } else {
                break;
            }
        }
        let c = content.get(pos..)?.chars().next()?;
        if c != symbol {
            return None;
        }
        pos += c.len_utf8();
    }
    Some(pos)
}

/// Pull the identified description out of one item block.
fn extract_description(block: &str) -> Option<String> {
    let key_at = find_identified_key(block)?;
    let open = expect_symbols(block, key_at + IDENTIFIED_KEY.len(), &['=', '{'])?;
    let close_rel = block.get(open..)?.find('}')?;
    let body = block.get(open..open + close_rel)?;

    let lines: Vec<String> = quoted_strings(body)
        .into_iter()
        .filter_map(|line| clean_line(&line))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Find `identifiedDescriptionName`, rejecting the `unidentified...` key.
fn find_identified_key(block: &str) -> Option<usize> {
    let mut search = 0usize;
    loop {
        let rel = block.get(search..)?.find(IDENTIFIED_KEY)?;
        let at = search + rel;
        let preceded_by_un = at >= 2 && block.get(at - 2..at) == Some("un");
        if !preceded_by_un {
            return Some(at);
        }
        search = at + IDENTIFIED_KEY.len();
    }
}

/// Collect the contents of every double-quoted string in `body`.
fn quoted_strings(body: &str) -> Vec<String> {
    let mut strings = Vec::new();
    let mut current: Option<String> = None;

    for c in body.chars() {
        match (&mut current, c) {
            (None, '"') => current = Some(String::new()),
            (Some(s), '"') => {
                strings.push(std::mem::take(s));
                current = None;
            }
            (Some(s), c) => s.push(c),
            (None, _) => {}
        }
    }

    strings
}

/// Strip `^RRGGBB` color codes and `_` separators; drop filler lines.
fn clean_line(line: &str) -> Option<String> {
    let mut cleaned = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '^' {
            let code: Vec<char> = chars.clone().take(6).collect();
            if code.len() == 6 && code.iter().all(char::is_ascii_hexdigit) {
                for _ in 0..6 {
                    chars.next();
                }
                continue;
            }
        }
        if c != '_' {
            cleaned.push(c);
        }
    }

    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "..." {
        None
    } else {
        Some(cleaned.to_string())
    }
}
