// SPDX-License-Identifier: PMPL-1.0-or-later
//! Inline-style parsing and WCAG color math.
//!
//! Operates purely on inline `style` attribute text; cascaded or computed
//! CSS is out of scope. Color parsing supports hex and rgb()/rgba()
//! literals; anything else is treated as unparsable and the caller skips.

use regex::Regex;

/// Extract a CSS property value from an inline style string.
///
/// Case-insensitive. A plain `color` lookup must not match
/// `background-color`, so that property is anchored to the start of the
/// string or a preceding `;` (the regex crate has no lookbehind).
pub fn extract_style_property(style: &str, property: &str) -> Option<String> {
    let pattern = if property == "color" {
        "(?i)(?:^|;)\\s*color\\s*:\\s*([^;]+)".to_string()
    } else {
        format!("(?i)(?:^|;)\\s*{}\\s*:\\s*([^;]+)", regex::escape(property))
    };
    let re = Regex::new(&pattern).expect("valid regex");
    re.captures(style).map(|caps| caps[1].trim().to_string())
}

/// Resolve a CSS length to pixels.
///
/// Supports `px`, `pt` (x1.333), and `em`/`rem` (x16.0, assuming the 16px
/// browser default root size). Any other unit or malformed token is `None`.
pub fn parse_length_to_px(value: &str) -> Option<f64> {
    let value = value.trim().to_lowercase();
    let re = Regex::new(r"^([\d.]+)\s*(px|pt|em|rem)$").expect("valid regex");
    let caps = re.captures(&value)?;
    let number: f64 = caps[1].parse().ok()?;
    let factor = match &caps[2] {
        "px" => 1.0,
        "pt" => 1.333,
        "em" | "rem" => 16.0,
        _ => return None,
    };
    Some(number * factor)
}

/// Parse a CSS color literal into an RGB triple.
///
/// Supports 3/6/8-digit hex (alpha ignored) and rgb()/rgba() functional
/// notation (alpha ignored). Returns `None` for anything else, including
/// named colors and channel values out of range.
pub fn parse_color(value: &str) -> Option<(u8, u8, u8)> {
    let value = value.trim().to_lowercase();

    if let Some(hex) = value.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        return match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
                Some((r, g, b))
            }
            6 | 8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some((r, g, b))
            }
            _ => None,
        };
    }

    let re = Regex::new(r"^rgba?\s*\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*[,)]").expect("valid regex");
    let caps = re.captures(&value)?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;
    Some((r, g, b))
}

/// Relative luminance per the WCAG 2.0 formula.
/// <https://www.w3.org/TR/WCAG20/#relativeluminancedef>
pub fn relative_luminance(rgb: (u8, u8, u8)) -> f64 {
    let linear = [rgb.0, rgb.1, rgb.2].map(|c| {
        let srgb = f64::from(c) / 255.0;
        if srgb <= 0.03928 {
            srgb / 12.92
        } else {
            ((srgb + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * linear[0] + 0.7152 * linear[1] + 0.0722 * linear[2]
}

/// Contrast ratio between two luminance values, always >= 1.0.
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether an inline style declares large text in the WCAG contrast sense:
/// resolved font-size >= 24px, or >= 18.66px with a bold weight.
pub fn is_large_text(style: &str) -> bool {
    let Some(size) = extract_style_property(style, "font-size")
        .and_then(|v| parse_length_to_px(&v))
    else {
        return false;
    };

    if size >= 24.0 {
        return true;
    }

    if size >= 18.66 {
        if let Some(weight) = extract_style_property(style, "font-weight") {
            let weight = weight.trim().to_lowercase();
            if weight == "bold" || weight == "bolder" {
                return true;
            }
            if let Ok(numeric) = weight.parse::<u32>() {
                return numeric >= 700;
            }
        }
    }

    false
}
