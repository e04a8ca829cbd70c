pub mod atomic;
pub mod keylayout;
pub mod plist;

pub use atomic::AtomicFile;
pub use keylayout::KeylayoutWriter;
pub use plist::PlistWriter;

use std::borrow::Cow;

/// Escapes text for an XML attribute or element.
///
/// Control characters, space and DEL are written as numeric references so
/// they survive attribute-value normalisation.
pub fn escape(text: &str) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>' | '"' | '\'' | '\0'..=' ' | '\u{7f}');
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\0'..=' ' | '\u{7f}' => escaped.push_str(&format!("&#x{:04X};", c as u32)),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
