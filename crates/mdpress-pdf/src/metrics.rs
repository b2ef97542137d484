//! Font metrics and text encoding for the base-14 Helvetica faces.
//!
//! Advance widths are the AFM values in units per 1000 for the WinAnsi
//! character set. Characters outside WinAnsi are replaced with `?` at
//! encoding time, so width and encoding always agree.

use mdpress_compose::FontFamily;

/// Advance widths for Helvetica, characters 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, // 'A'..'P'
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'Q'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, // 'a'..'p'
    556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'q'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Advance widths for Helvetica-Bold, characters 32..=126.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, // 'A'..'P'
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'Q'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, // 'a'..'p'
    611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'q'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// Width of the bullet glyph (WinAnsi 0x95) in both faces.
const BULLET_WIDTH: u16 = 350;

/// Fallback width for characters without an exact metric.
const DEFAULT_WIDTH: u16 = 556;

/// Map a character to its WinAnsi code point, if representable.
pub(crate) fn winansi_byte(ch: char) -> Option<u8> {
    match ch {
        '\u{20}'..='\u{7e}' => Some(ch as u8),
        '\u{a0}'..='\u{ff}' => Some(ch as u8),
        '\u{2022}' => Some(0x95), // bullet
        '\u{2013}' => Some(0x96), // en dash
        '\u{2014}' => Some(0x97), // em dash
        '\u{2018}' => Some(0x91),
        '\u{2019}' => Some(0x92),
        '\u{201c}' => Some(0x93),
        '\u{201d}' => Some(0x94),
        '\u{2026}' => Some(0x85), // ellipsis
        '\u{20ac}' => Some(0x80), // euro
        _ => None,
    }
}

/// Encode text as WinAnsi bytes, replacing unrepresentable characters
/// with `?`.
pub(crate) fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| winansi_byte(ch).unwrap_or(b'?'))
        .collect()
}

/// Advance width of one character in units per 1000.
fn advance(font: FontFamily, ch: char) -> u16 {
    let widths = match font {
        FontFamily::Helvetica => &HELVETICA_WIDTHS,
        FontFamily::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
    };
    match winansi_byte(ch) {
        Some(byte @ 0x20..=0x7e) => widths[usize::from(byte) - 0x20],
        Some(0x95) => BULLET_WIDTH,
        // Latin-1 and punctuation extras: close enough to the body width
        Some(_) => DEFAULT_WIDTH,
        // Will be encoded as '?'
        None => widths[usize::from(b'?') - 0x20],
    }
}

/// Width of a text run at the given font size, in points.
pub(crate) fn text_width(font: FontFamily, size: f32, text: &str) -> f32 {
    let units: u32 = text.chars().map(|ch| u32::from(advance(font, ch))).sum();
    #[allow(clippy::cast_precision_loss)]
    let units = units as f32;
    units * size / 1000.0
}

/// Width of a single space at the given font size, in points.
pub(crate) fn space_width(font: FontFamily, size: f32) -> f32 {
    f32::from(advance(font, ' ')) * size / 1000.0
}
