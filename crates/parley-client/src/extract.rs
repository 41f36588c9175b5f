//! Reply extraction from raw response bodies.
//!
//! The body is never parsed as a whole. A targeted scan finds the first
//! `"content":"` field and decodes the JSON string that follows it, so bodies
//! of any size and with any surrounding schema are accepted.

const CONTENT_KEY: &str = "\"content\"";

/// Pulls the generated reply out of a raw response body.
///
/// `None` means no reply was found. That is an expected outcome, not a fault;
/// callers supply their own fallback.
pub trait ResponseExtractor: Send + Sync {
    fn extract(&self, raw_body: &str) -> Option<String>;
}

/// Scans for the first `"content"` string field
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerExtractor;

impl ResponseExtractor for MarkerExtractor {
    fn extract(&self, raw_body: &str) -> Option<String> {
        extract_content(raw_body)
    }
}

/// Decode the string value of the first `"content"` field.
///
/// Whitespace around the colon is tolerated. Occurrences whose value is not a
/// string (e.g. `"content":null`) are skipped. An unterminated string or an
/// invalid escape yields `None`.
pub fn extract_content(body: &str) -> Option<String> {
    let value = find_value(body, CONTENT_KEY, |rest| rest.starts_with('"'))?;
    decode_string(&value[1..])
}

/// Read the unsigned integer value of the first `"<field>"` key, if any
pub fn extract_count(body: &str, field: &str) -> Option<u64> {
    let key = format!("\"{}\"", field);
    let value = find_value(body, &key, |rest| {
        rest.starts_with(|c: char| c.is_ascii_digit())
    })?;
    let digits = value
        .find(|c: char| !c.is_ascii_digit())
        .map_or(value, |end| &value[..end]);
    digits.parse().ok()
}

/// Shorten `text` to at most `max_chars` characters, marking the cut with `...`
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Slice starting at the value of the first `key` occurrence that is followed
/// by `:` and a value accepted by `accept`.
fn find_value<'a>(body: &'a str, key: &str, accept: impl Fn(&str) -> bool) -> Option<&'a str> {
    body.match_indices(key).find_map(|(start, _)| {
        let rest = body[start + key.len()..].trim_start();
        let rest = rest.strip_prefix(':')?.trim_start();
        accept(rest).then_some(rest)
    })
}

/// Decode a JSON string body up to its closing quote
fn decode_string(input: &str) -> Option<String> {
    let mut out = String::new();
    let mut chars = input.chars();

    loop {
        match chars.next()? {
            '"' => return Some(out),
            '\\' => {
                let decoded = match chars.next()? {
                    'n' => '\n',
                    '"' => '"',
                    '\\' => '\\',
                    '/' => '/',
                    't' => '\t',
                    'r' => '\r',
                    'b' => '\u{8}',
                    'f' => '\u{c}',
                    'u' => decode_unicode(&mut chars)?,
                    _ => return None,
                };
                out.push(decoded);
            }
            c => out.push(c),
        }
    }
}

fn decode_unicode(chars: &mut std::str::Chars<'_>) -> Option<char> {
    let high = read_hex4(chars)?;
    match high {
        0xD800..=0xDBFF => {
            if chars.next()? != '\\' || chars.next()? != 'u' {
                return None;
            }
            let low = read_hex4(chars)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return None;
            }
            char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
        }
        0xDC00..=0xDFFF => None,
        _ => char::from_u32(high),
    }
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let mut value = 0;
    for _ in 0..4 {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}
