//! Pixel colors and the threshold comparison behind `ifcolor`.
//!
//! A sampled pixel is an [`Rgb`] triple.  Script-side hex arguments decode
//! the way Java's `Color.decode` does: the string is parsed as a 24-bit
//! integer, so `F00` means `0x000F00`, not the CSS `#F00` shorthand.

/// A 24-bit RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as an uppercase `RRGGBB` hex string (no `#`).
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Decode a hex color argument (optionally `#`-prefixed) into an [`Rgb`].
///
/// Accepts any string that parses as a hexadecimal integer no larger than
/// `0xFFFFFF`; shorter strings are zero-extended from the left.
pub fn parse_hex_color(s: &str) -> Result<Rgb, String> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    let packed = u32::from_str_radix(digits, 16)
        .map_err(|_| format!("not a valid hex color: {s}"))?;
    if packed > 0xFF_FF_FF {
        return Err(format!("not a valid hex color: {s}"));
    }
    Ok(Rgb {
        r: (packed >> 16) as u8,
        g: (packed >> 8) as u8,
        b: packed as u8,
    })
}

/// Parse a hexadecimal threshold argument (optionally `#`-prefixed).
pub fn parse_hex_threshold(s: &str) -> Result<i32, String> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    i32::from_str_radix(digits, 16)
        .map_err(|_| format!("not a valid hexadecimal threshold: {s}"))
}

/// Per-channel threshold comparison: two colors match iff each of the red,
/// green, and blue differences is at most `threshold`.
pub fn colors_match(c1: Rgb, c2: Rgb, threshold: i32) -> bool {
    let dr = (c1.r as i32 - c2.r as i32).abs();
    let dg = (c1.g as i32 - c2.g as i32).abs();
    let db = (c1.b as i32 - c2.b as i32).abs();
    dr <= threshold && dg <= threshold && db <= threshold
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_full() {
        assert_eq!(parse_hex_color("FF0000").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(parse_hex_color("#00FF7f").unwrap(), Rgb::new(0, 255, 127));
    }

    #[test]
    fn decode_short_is_zero_extended() {
        // Java Color.decode semantics: "F00" is 0x000F00, not CSS #F00.
        assert_eq!(parse_hex_color("F00").unwrap(), Rgb::new(0, 15, 0));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(parse_hex_color("not-a-color").is_err());
        assert!(parse_hex_color("").is_err());
        assert!(parse_hex_color("1000000").is_err()); // > 24 bits
    }

    #[test]
    fn threshold_parses_as_hex() {
        assert_eq!(parse_hex_threshold("0A").unwrap(), 10);
        assert_eq!(parse_hex_threshold("#ff").unwrap(), 255);
        assert!(parse_hex_threshold("zz").is_err());
    }

    #[test]
    fn exact_match_at_zero_threshold() {
        let c = Rgb::new(12, 34, 56);
        assert!(colors_match(c, c, 0));
    }

    #[test]
    fn within_threshold_matches() {
        let saved = Rgb::new(250, 5, 5);
        let target = Rgb::new(255, 0, 0);
        assert!(colors_match(saved, target, 10));
    }

    #[test]
    fn one_channel_out_fails() {
        let saved = Rgb::new(250, 5, 20);
        let target = Rgb::new(255, 0, 0);
        assert!(!colors_match(saved, target, 10));
    }

    #[test]
    fn far_color_fails() {
        assert!(!colors_match(Rgb::new(100, 100, 100), Rgb::new(255, 0, 0), 10));
    }

    #[test]
    fn hex_formatting_is_uppercase_and_padded() {
        assert_eq!(Rgb::new(255, 0, 10).to_hex(), "FF000A");
        assert_eq!(Rgb::new(0, 0, 0).to_hex(), "000000");
    }
}
