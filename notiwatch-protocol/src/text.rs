//! Bounded UTF-8 helpers shared by the decoder and the encoder

use heapless::String;

/// Copy at most `N` bytes of `bytes` into a fixed-capacity string
///
/// The cut is made on the raw bytes first, exactly as the wire length
/// would be clamped. Invalid sequences and a multi-byte character split by
/// the cut are dropped, so the result is always valid UTF-8 and never
/// longer than `N` bytes.
pub fn copy_truncated<const N: usize>(bytes: &[u8]) -> String<N> {
    let mut out = String::new();
    let mut rest = &bytes[..bytes.len().min(N)];

    while !rest.is_empty() {
        match core::str::from_utf8(rest) {
            Ok(valid) => {
                push_fitting(&mut out, valid);
                break;
            }
            Err(err) => {
                let (valid, tail) = rest.split_at(err.valid_up_to());
                push_fitting(&mut out, core::str::from_utf8(valid).unwrap_or(""));
                // A sequence cut short by the clamp has no error length
                let skip = err.error_len().unwrap_or(tail.len());
                rest = &tail[skip..];
            }
        }
    }

    out
}

/// Longest prefix of `s` that is at most `max` bytes and ends on a char boundary
pub fn floor_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn push_fitting<const N: usize>(out: &mut String<N>, s: &str) {
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
}
