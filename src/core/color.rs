// src/core/color.rs

use crate::models::RgbColor;

/// Packs a color into the single integer stored in menu files (`0x00BBGGRR`).
pub fn to_packed(color: RgbColor) -> i64 {
    i64::from(color.r) | (i64::from(color.g) << 8) | (i64::from(color.b) << 16)
}

/// Unpacks a stored color. Only the low 24 bits are read, so values written with
/// an alpha or system-color marker in the high byte still decode.
pub fn from_packed(packed: i64) -> RgbColor {
    let [r, g, b, ..] = packed.to_le_bytes();
    RgbColor { r, g, b }
}

/// The color as the usual `0xRRGGBB` integer, for display.
pub fn to_hex(color: RgbColor) -> u32 {
    (u32::from(color.r) << 16) | (u32::from(color.g) << 8) | u32::from(color.b)
}

/// Parses `#RRGGBB` or `RRGGBB`.
pub fn parse_hex(text: &str) -> Option<RgbColor> {
    let digits = text.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    let [b, g, r, _] = value.to_le_bytes();
    Some(RgbColor { r, g, b })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_byte_order() {
        assert_eq!(to_packed(RgbColor::new(0x11, 0x22, 0x33)), 0x0033_2211);
        assert_eq!(from_packed(0x0033_2211), RgbColor::new(0x11, 0x22, 0x33));
    }

    #[test]
    fn test_unpack_ignores_high_byte() {
        assert_eq!(from_packed(0x8000_00FF), RgbColor::new(0xFF, 0, 0));
        assert_eq!(from_packed(-1), RgbColor::new(0xFF, 0xFF, 0xFF));
    }

    #[test]
    fn test_hex_text() {
        assert_eq!(parse_hex("#FF8000"), Some(RgbColor::new(0xFF, 0x80, 0x00)));
        assert_eq!(parse_hex("0a0b0c"), Some(RgbColor::new(0x0A, 0x0B, 0x0C)));
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex("#GG0000"), None);
        assert_eq!(to_hex(RgbColor::new(0x12, 0x34, 0x56)), 0x0012_3456);
    }

    #[test]
    fn test_default_colors_survive_packing() {
        for color in [
            crate::models::DEFAULT_BACK_COLOR,
            crate::models::DEFAULT_BUTTON_COLOR,
            crate::models::DEFAULT_TEXT_COLOR,
            crate::models::DEFAULT_HIGHLIGHT_TEXT_COLOR,
        ] {
            assert_eq!(from_packed(to_packed(color)), color);
        }
    }
}
