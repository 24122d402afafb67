//! Byte-stream normalization for GEDCOM input.
//!
//! Real-world GEDCOM exports arrive as UTF-8 (with or without a BOM),
//! ISO-8859-1, or Windows-1252. Input that fails UTF-8 validation falls
//! back to a Windows-1252 decode, which is a superset of ISO-8859-1 for
//! the bytes these files actually contain.

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode raw file bytes to UTF-8, stripping a BOM if present.
/// Undecodable bytes are dropped rather than failing the parse.
pub(crate) fn decode_bytes(bytes: &[u8]) -> String {
  let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
  match std::str::from_utf8(bytes) {
    Ok(s) => s.to_string(),
    Err(_) => decode_windows_1252(bytes),
  }
}

/// Minimal Windows-1252 decoder for legacy exports.
///
/// Bytes below 0x80 are ASCII and bytes from 0xA0 up coincide with the
/// Latin-1 code points; only 0x80–0x9F need a table. The five bytes
/// undefined in Windows-1252 are dropped.
fn decode_windows_1252(bytes: &[u8]) -> String {
  let mut out = String::with_capacity(bytes.len());
  for &b in bytes {
    match b {
      0x80..=0x9F => {
        if let Some(c) = CP1252_HIGH[(b - 0x80) as usize] {
          out.push(c);
        }
      }
      _ => out.push(b as char),
    }
  }
  out
}

#[rustfmt::skip]
const CP1252_HIGH: [Option<char>; 32] = [
  Some('€'), None,      Some('‚'), Some('ƒ'),
  Some('„'), Some('…'), Some('†'), Some('‡'),
  Some('ˆ'), Some('‰'), Some('Š'), Some('‹'),
  Some('Œ'), None,      Some('Ž'), None,
  None,      Some('‘'), Some('’'), Some('“'),
  Some('”'), Some('•'), Some('–'), Some('—'),
  Some('˜'), Some('™'), Some('š'), Some('›'),
  Some('œ'), None,      Some('ž'), Some('Ÿ'),
];

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn utf8_passes_through() {
    assert_eq!(decode_bytes("Jos\u{e9}".as_bytes()), "José");
  }

  #[test]
  fn utf8_bom_is_stripped() {
    let mut bytes = UTF8_BOM.to_vec();
    bytes.extend_from_slice(b"0 HEAD");
    assert_eq!(decode_bytes(&bytes), "0 HEAD");
  }

  #[test]
  fn latin1_high_bytes_transliterated() {
    // "José" in ISO-8859-1 / Windows-1252.
    assert_eq!(decode_bytes(&[b'J', b'o', b's', 0xE9]), "José");
  }

  #[test]
  fn cp1252_punctuation_range() {
    // 0x92 is the right single quote in Windows-1252.
    assert_eq!(decode_bytes(&[b'O', 0x92, b'B']), "O’B");
  }

  #[test]
  fn undefined_cp1252_bytes_dropped() {
    assert_eq!(decode_bytes(&[b'a', 0x81, b'b', 0x9D, b'c']), "abc");
  }
}
