//! ASCII character names, control codes and bracket escapes
//!
//! Mapping files refer to awkward characters by name in brackets, e.g.
//! `[SPC]` or `[LT]`. The same names are used in the other direction to build
//! action identifiers that never contain markup-special characters.

use crate::types::{LayoutError, Result};

/// Every accepted character name, sorted by name for binary search
static NAMES: &[(&str, u8)] = &[
    ("ACK", 6),
    ("AMP", b'&'),
    ("APOS", b'\''),
    ("BEL", 7),
    ("BS", 8),
    ("CAN", 24),
    ("CR", 13),
    ("DC1", 17),
    ("DC2", 18),
    ("DC3", 19),
    ("DC4", 20),
    ("DEL", 127),
    ("DLE", 16),
    ("EM", 25),
    ("ENQ", 5),
    ("EOT", 4),
    ("ESC", 27),
    ("ETB", 23),
    ("ETX", 3),
    ("FF", 12),
    ("FS", 28),
    ("GS", 29),
    ("GT", b'>'),
    ("HT", 9),
    ("LF", 10),
    ("LSQB", b'['),
    ("LT", b'<'),
    ("NAK", 21),
    ("NUL", 0),
    ("QUOT", b'"'),
    ("RET", 13),
    ("RS", 30),
    ("RSQB", b']'),
    ("SI", 15),
    ("SO", 14),
    ("SOH", 1),
    ("SPACE", b' '),
    ("SPC", b' '),
    ("STX", 2),
    ("SUB", 26),
    ("SYN", 22),
    ("TAB", 9),
    ("US", 31),
    ("VT", 11),
];

/// Canonical name for each code below 33, used when naming literals
static CONTROL_NAMES: [&str; 33] = [
    "NUL", "SOH", "STX", "ETX", "EOT", "ENQ", "ACK", "BEL", "BS", "TAB", "LF", "VT", "FF", "CR",
    "SO", "SI", "DLE", "DC1", "DC2", "DC3", "DC4", "NAK", "SYN", "ETB", "CAN", "EM", "SUB", "ESC",
    "FS", "GS", "RS", "US", "SPC",
];

/// Resolves a bracketed name such as `SPC` to its character
pub fn lookup_char(name: &str) -> Option<char> {
    NAMES
        .binary_search_by(|(candidate, _)| candidate.cmp(&name))
        .ok()
        .map(|idx| NAMES[idx].1 as char)
}

/// Canonical name of a character, if it has one
pub fn name_for(ch: char) -> Option<&'static str> {
    match ch {
        '\0'..=' ' => Some(CONTROL_NAMES[ch as usize]),
        '\u{7f}' => Some("DEL"),
        '&' => Some("AMP"),
        '\'' => Some("APOS"),
        '"' => Some("QUOT"),
        '<' => Some("LT"),
        '>' => Some("GT"),
        '[' => Some("LSQB"),
        ']' => Some("RSQB"),
        _ => None,
    }
}

/// Output of a key held with control, for single characters that have one
pub fn control_code(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    match ch {
        'a'..='z' => Some((ch as u8 - b'a' + 1) as char),
        ' ' | '@' | '2' => Some('\0'),
        '[' => Some('\u{1b}'),
        '\\' => Some('\u{1c}'),
        ']' => Some('\u{1d}'),
        '6' | '^' => Some('\u{1e}'),
        '-' | '_' => Some('\u{1f}'),
        _ => None,
    }
}

/// Replaces every `[NAME]` escape in `token` with the named character.
///
/// A `[` without a later `]` is taken literally.
pub fn resolve_escapes(token: &str) -> Result<String> {
    let mut resolved = String::with_capacity(token.len());
    let mut rest = token;

    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let Some(close) = after.find(']') else {
            break;
        };

        let name = &after[..close];
        let ch = lookup_char(name).ok_or_else(|| LayoutError::UnknownCharacterName(name.to_string()))?;
        resolved.push_str(&rest[..open]);
        resolved.push(ch);
        rest = &after[close + 1..];
    }

    resolved.push_str(rest);
    Ok(resolved)
}

/// Action-name form of a literal: named characters become `[NAME]`
pub fn literal_name(text: &str) -> String {
    let mut name = String::with_capacity(text.len());
    for ch in text.chars() {
        match name_for(ch) {
            Some(n) => {
                name.push('[');
                name.push_str(n);
                name.push(']');
            }
            None => name.push(ch),
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_sorted() {
        for pair in NAMES.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} must sort before {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for code in 0u8..128 {
            let ch = code as char;
            if let Some(name) = name_for(ch) {
                assert_eq!(lookup_char(name), Some(ch), "name {} for code {}", name, code);
            }
        }
    }

    #[test]
    fn test_lookup_char() {
        assert_eq!(lookup_char("SPC"), Some(' '));
        assert_eq!(lookup_char("SPACE"), Some(' '));
        assert_eq!(lookup_char("LT"), Some('<'));
        assert_eq!(lookup_char("NUL"), Some('\0'));
        assert_eq!(lookup_char("spc"), None);
        assert_eq!(lookup_char(""), None);
    }

    #[test]
    fn test_resolve_escapes() {
        assert_eq!(resolve_escapes("a").unwrap(), "a");
        assert_eq!(resolve_escapes("[SPC]").unwrap(), " ");
        assert_eq!(resolve_escapes("x[LT]y[GT]").unwrap(), "x<y>");
        assert_eq!(resolve_escapes("[").unwrap(), "[");
        assert_eq!(resolve_escapes("]").unwrap(), "]");
        assert_eq!(resolve_escapes("a[b").unwrap(), "a[b");
    }

    #[test]
    fn test_resolve_unknown_name() {
        let err = resolve_escapes("[NOPE]").unwrap_err();
        assert!(matches!(err, LayoutError::UnknownCharacterName(ref n) if n == "NOPE"));
        assert_eq!(err.to_string(), "Unknown character name `NOPE'");
    }

    #[test]
    fn test_literal_name() {
        assert_eq!(literal_name("a"), "a");
        assert_eq!(literal_name(" "), "[SPC]");
        assert_eq!(literal_name("<"), "[LT]");
        assert_eq!(literal_name("´"), "´");
        assert_eq!(literal_name("a&b"), "a[AMP]b");
    }

    #[test]
    fn test_control_codes() {
        assert_eq!(control_code("a"), Some('\u{1}'));
        assert_eq!(control_code("z"), Some('\u{1a}'));
        assert_eq!(control_code(" "), Some('\0'));
        assert_eq!(control_code("["), Some('\u{1b}'));
        assert_eq!(control_code("1"), None);
        assert_eq!(control_code("A"), None);
        assert_eq!(control_code("ab"), None);
    }
}
