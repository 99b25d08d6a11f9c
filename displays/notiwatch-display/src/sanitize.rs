//! Font-safe text
//!
//! The bundled fonts cover the Basic Multilingual Plane only. Characters
//! outside it (emoji, mostly) are replaced with a placeholder before
//! drawing.

use heapless::String;

/// Stand-in for characters the fonts cannot draw
pub const PLACEHOLDER: &str = "[?]";

/// Base direction for a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn of(text: &str) -> Self {
        if is_rtl(text) {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }
}

/// Replace four-byte characters with [`PLACEHOLDER`], stopping when `N` is full
pub fn sanitize<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    push_sanitized(&mut out, text);
    out
}

/// [`sanitize`] for raw bytes; invalid sequences are skipped
pub fn sanitize_bytes<const N: usize>(bytes: &[u8]) -> String<N> {
    let mut out = String::new();
    for chunk in bytes.utf8_chunks() {
        if !push_sanitized(&mut out, chunk.valid()) {
            break;
        }
    }
    out
}

/// Returns `false` once `out` is full
fn push_sanitized<const N: usize>(out: &mut String<N>, text: &str) -> bool {
    for c in text.chars() {
        let pushed = if c.len_utf8() == 4 {
            out.push_str(PLACEHOLDER)
        } else {
            out.push(c)
        };
        if pushed.is_err() {
            return false;
        }
    }
    true
}

/// True if `text` contains Hebrew or Arabic letters
pub fn is_rtl(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c, '\u{0590}'..='\u{05FF}' | '\u{0600}'..='\u{06FF}'))
}
