//! CSS color values as resolved by the browser

use image::Rgba;

/// Parse a resolved CSS color (`rgb()`, `rgba()`, hex, `transparent`, basic names)
pub fn parse_css_color(value: &str) -> Option<Rgba<u8>> {
    let value = value.trim().to_ascii_lowercase();

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_args(args);
    }

    named_color(&value)
}

/// Split a multi-value property on whitespace outside parentheses.
///
/// `"rgb(255, 0, 0) rgb(0, 0, 255)"` yields the two colors, `"1px 0px"` the two lengths.
pub fn split_components(value: &str) -> Vec<&str> {
    let mut components = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    components.push(&value[s..i]);
                }
                continue;
            }
            _ => {}
        }
        start.get_or_insert(i);
    }
    if let Some(s) = start {
        components.push(&value[s..]);
    }
    components
}

/// Whether the color contributes nothing when painted
pub fn is_transparent(color: &Rgba<u8>) -> bool {
    color.0[3] == 0
}

fn parse_hex(hex: &str) -> Option<Rgba<u8>> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok().map(|d| d * 17);
    let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

    match hex.len() {
        3 => Some(Rgba([digit(0)?, digit(1)?, digit(2)?, 255])),
        4 => Some(Rgba([digit(0)?, digit(1)?, digit(2)?, digit(3)?])),
        6 => Some(Rgba([pair(0)?, pair(2)?, pair(4)?, 255])),
        8 => Some(Rgba([pair(0)?, pair(2)?, pair(4)?, pair(6)?])),
        _ => None,
    }
}

// Accepts both `r, g, b, a` and `r g b / a`
fn parse_rgb_args(args: &str) -> Option<Rgba<u8>> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let channel = |s: &str| -> Option<u8> {
        let v = match s.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok()? * 2.55,
            None => s.parse::<f64>().ok()?,
        };
        Some(v.round().clamp(0.0, 255.0) as u8)
    };
    let alpha = |s: &str| -> Option<u8> {
        let v = match s.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok()? / 100.0,
            None => s.parse::<f64>().ok()?,
        };
        Some((v.clamp(0.0, 1.0) * 255.0).round() as u8)
    };

    let a = match parts.get(3) {
        Some(s) => alpha(s)?,
        None => 255,
    };
    Some(Rgba([channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, a]))
}

fn named_color(name: &str) -> Option<Rgba<u8>> {
    let rgb = match name {
        "transparent" => return Some(Rgba([0, 0, 0, 0])),
        "black" => [0, 0, 0],
        "white" => [255, 255, 255],
        "red" => [255, 0, 0],
        "green" => [0, 128, 0],
        "blue" => [0, 0, 255],
        "yellow" => [255, 255, 0],
        "gray" | "grey" => [128, 128, 128],
        "silver" => [192, 192, 192],
        "orange" => [255, 165, 0],
        "purple" => [128, 0, 128],
        _ => return None,
    };
    Some(Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_forms() {
        assert_eq!(parse_css_color("rgb(255, 0, 10)"), Some(Rgba([255, 0, 10, 255])));
        assert_eq!(parse_css_color("rgba(0, 0, 0, 0)"), Some(Rgba([0, 0, 0, 0])));
        assert_eq!(parse_css_color("rgba(10, 20, 30, 0.5)"), Some(Rgba([10, 20, 30, 128])));
        assert_eq!(parse_css_color("rgb(0 128 255 / 50%)"), Some(Rgba([0, 128, 255, 128])));
    }

    #[test]
    fn test_hex_forms() {
        assert_eq!(parse_css_color("#fff"), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(parse_css_color("#00ff0080"), Some(Rgba([0, 255, 0, 128])));
        assert_eq!(parse_css_color("#12345"), None);
    }

    #[test]
    fn test_named_and_invalid() {
        assert_eq!(parse_css_color("Transparent"), Some(Rgba([0, 0, 0, 0])));
        assert_eq!(parse_css_color("white"), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(parse_css_color("color-mix(in srgb, red, blue)"), None);
        assert_eq!(parse_css_color("rgb(1, 2)"), None);
    }

    #[test]
    fn test_split_components_keeps_functions_whole() {
        assert_eq!(
            split_components("rgb(255, 0, 0) rgb(0, 0, 255)"),
            vec!["rgb(255, 0, 0)", "rgb(0, 0, 255)"]
        );
        assert_eq!(split_components("  0px 0px 1px "), vec!["0px", "0px", "1px"]);
        assert_eq!(split_components("#fff"), vec!["#fff"]);
        assert!(split_components("").is_empty());
    }

    #[test]
    fn test_is_transparent() {
        assert!(is_transparent(&Rgba([10, 10, 10, 0])));
        assert!(!is_transparent(&Rgba([0, 0, 0, 1])));
    }
}
