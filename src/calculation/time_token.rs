//! Punch token parsing and time formatting.
//!
//! OCR output for a punch cell is noisy: letters stand in for digits, the
//! separator may be a dot, an `h` or a space, and the colon is often lost.
//! [`parse_time_token`] recovers a minute-of-day from such a string or
//! reports it as missing. It never fails loudly; an unreadable punch is just
//! absent data.

use crate::models::Minute;

/// Characters the OCR service emits when it is unsure about a cell.
const UNCERTAINTY_MARKERS: [char; 3] = ['?', '[', ']'];

/// Glyphs commonly misread for digits, applied after lower-casing.
const OCR_SUBSTITUTIONS: [(char, char); 6] = [
    ('o', '0'),
    ('l', '1'),
    ('i', '1'),
    ('s', '5'),
    ('b', '8'),
    ('g', '9'),
];

/// Parses one raw punch string into a minute-of-day.
///
/// Returns `None` for empty strings, strings carrying an uncertainty marker
/// (`?`, `[`, `]`) and anything that does not resolve to a valid `HH:MM`.
///
/// # Behavior
///
/// - Common OCR glyph confusions are corrected (`O8:SO` reads as `08:50`)
/// - `.`, `h` and whitespace are accepted as separators
/// - Without a separator, 4 digits split 2/2 and 3 digits split 1/2
/// - Hours must be in `[0, 24]` and minutes in `[0, 59]`
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::parse_time_token;
///
/// assert_eq!(parse_time_token("08:00").map(|m| m.value()), Some(480));
/// assert_eq!(parse_time_token("O8:SO"), parse_time_token("08:50"));
/// assert_eq!(parse_time_token("1730").map(|m| m.value()), Some(1050));
/// assert_eq!(parse_time_token("7h15").map(|m| m.value()), Some(435));
/// assert_eq!(parse_time_token("[?]"), None);
/// assert_eq!(parse_time_token(""), None);
/// ```
pub fn parse_time_token(raw: &str) -> Option<Minute> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_uncertain(trimmed) {
        return None;
    }

    let corrected: String = trimmed.to_lowercase().chars().map(correct_glyph).collect();
    let separated = normalize_separators(&corrected);
    let canonical = if separated.contains(':') {
        separated
    } else {
        insert_colon(&separated)?
    };

    let (hours, minutes) = canonical.split_once(':')?;
    if minutes.contains(':') {
        return None;
    }

    Minute::from_hm(parse_part(hours)?, parse_part(minutes)?)
}

/// Formats a minute count as zero-padded `HH:MM`.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{minutes_to_time, parse_time_token};
///
/// let minute = parse_time_token("08:00").unwrap();
/// assert_eq!(minutes_to_time(minute.value()), "08:00");
/// assert_eq!(minutes_to_time(65), "01:05");
/// ```
pub fn minutes_to_time(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Formats a signed balance as `HH:MM`, with a leading `-` when negative.
///
/// Hours are not wrapped, so monthly balances above a day render as e.g.
/// `"176:00"`.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::format_balance;
///
/// assert_eq!(format_balance(90), "01:30");
/// assert_eq!(format_balance(-45), "-00:45");
/// assert_eq!(format_balance(0), "00:00");
/// ```
pub fn format_balance(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let abs = minutes.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
}

/// Returns `true` when the OCR flagged the value as unsure.
pub(crate) fn is_uncertain(raw: &str) -> bool {
    raw.chars().any(|c| UNCERTAINTY_MARKERS.contains(&c))
}

fn correct_glyph(c: char) -> char {
    OCR_SUBSTITUTIONS
        .iter()
        .find(|(glyph, _)| *glyph == c)
        .map_or(c, |(_, digit)| *digit)
}

/// Maps `.`, `h` and whitespace to `:` and collapses repeated colons.
fn normalize_separators(value: &str) -> String {
    let mut normalized = String::with_capacity(value.len());
    for c in value.chars() {
        let c = if c == '.' || c == 'h' || c.is_whitespace() {
            ':'
        } else {
            c
        };
        if c == ':' && normalized.ends_with(':') {
            continue;
        }
        normalized.push(c);
    }
    normalized
}

/// Restores a lost separator from the digit count (`0830`, `830`).
fn insert_colon(digits: &str) -> Option<String> {
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let split_at = match digits.len() {
        4 => 2,
        3 => 1,
        _ => return None,
    };
    let (hours, minutes) = digits.split_at(split_at);
    Some(format!("{hours}:{minutes}"))
}

fn parse_part(part: &str) -> Option<u16> {
    if part.is_empty() || part.len() > 2 || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
