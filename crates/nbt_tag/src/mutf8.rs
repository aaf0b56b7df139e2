//! Modified UTF-8 as used by NBT strings
//!
//! It differs from UTF-8 in two ways: the nul character is written as `C0 80`, and
//! characters outside the basic multilingual plane are written as a surrogate pair
//! of three byte sequences. Text without either reads the same in both encodings.

use std::borrow::Cow;

/// Encode `text` to modified UTF-8, borrowing when no bytes change
pub fn encode(text: &str) -> Cow<'_, [u8]> {
    if !text.chars().any(|c| c == '\0' || u32::from(c) > 0xFFFF) {
        return Cow::Borrowed(text.as_bytes());
    }

    let mut out = Vec::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\0' => out.extend_from_slice(&[0xC0, 0x80]),
            c if u32::from(c) > 0xFFFF => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    push_three(&mut out, *unit);
                }
            }
            c => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    Cow::Owned(out)
}

fn push_three(out: &mut Vec<u8>, unit: u16) {
    out.push(0xE0 | (unit >> 12) as u8);
    out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
    out.push(0x80 | (unit & 0x3F) as u8);
}

/// Decode modified UTF-8.
///
/// Bytes that are not valid in either UTF-8 encoding are taken as Latin-1, which
/// is how older tools wrote names.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    match decode_modified(bytes) {
        Some(text) => Cow::Owned(text),
        None => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

fn decode_modified(bytes: &[u8]) -> Option<String> {
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;

    let cont = |i: usize| -> Option<u32> {
        let b = *bytes.get(i)?;
        (b & 0xC0 == 0x80).then_some(u32::from(b & 0x3F))
    };

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            0x00..=0x7F => {
                out.push(char::from(b));
                i += 1;
            }
            0xC0..=0xDF => {
                let cp = (u32::from(b & 0x1F) << 6) | cont(i + 1)?;
                out.push(char::from_u32(cp)?);
                i += 2;
            }
            0xE0..=0xEF => {
                let cp = (u32::from(b & 0x0F) << 12) | (cont(i + 1)? << 6) | cont(i + 2)?;
                i += 3;

                if (0xD800..0xDC00).contains(&cp) {
                    let low = match bytes.get(i) {
                        Some(0xED) => (0xD << 12) | (cont(i + 1)? << 6) | cont(i + 2)?,
                        _ => return None,
                    };
                    if !(0xDC00..0xE000).contains(&low) {
                        return None;
                    }
                    let combined = 0x10000 + ((cp - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(combined)?);
                    i += 3;
                } else {
                    out.push(char::from_u32(cp)?);
                }
            }
            // Four byte UTF-8 sequences are accepted for text written by lenient tools
            0xF0..=0xF4 => {
                let cp = (u32::from(b & 0x07) << 18)
                    | (cont(i + 1)? << 12)
                    | (cont(i + 2)? << 6)
                    | cont(i + 3)?;
                out.push(char::from_u32(cp)?);
                i += 4;
            }
            _ => return None,
        }
    }

    Some(out)
}

#[cfg(test)]
mod test {
    use std::borrow::Cow;

    use pretty_assertions::assert_eq;

    use crate::mutf8::{decode, encode};

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(encode("hello"), Cow::Borrowed(b"hello")));
        assert!(matches!(decode(b"hello"), Cow::Borrowed("hello")));
        assert!(matches!(encode("åäö"), Cow::Borrowed(_)));
    }

    #[test]
    fn nul_is_two_bytes() {
        assert_eq!(encode("a\0b").into_owned(), [0x61, 0xC0, 0x80, 0x62]);
        assert_eq!(decode(&[0x61, 0xC0, 0x80, 0x62]), "a\0b");
    }

    #[test]
    fn supplementary_is_surrogate_pair() {
        #[rustfmt::skip]
        let expected = [
            0xED, 0xA0, 0xBD,
            0xED, 0xB8, 0x80,
        ];

        assert_eq!(encode("\u{1F600}").into_owned(), expected);
        assert_eq!(decode(&expected), "\u{1F600}");
    }

    #[test]
    fn latin1_fallback() {
        assert_eq!(decode(&[0x63, 0x61, 0x66, 0xE9]), "café");
    }
}
