//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / string inputs, making them straightforward to unit-test.

use bevy::prelude::{Vec2, Vec3};

use crate::error::ColorError;

/// Number of cells in a hexagonal patch holding the origin and `rings` rings.
///
/// Ring `i` holds `6 * i` cells, so the total is the centred hexagonal number
/// `1 + 3R(R+1)`.
///
/// # Examples
/// ```
/// # use hex_board::math::ring_cell_count;
/// assert_eq!(ring_cell_count(0), 1);
/// assert_eq!(ring_cell_count(1), 7);
/// assert_eq!(ring_cell_count(30), 2791);
/// ```
pub fn ring_cell_count(rings: u32) -> usize {
    let r = rings as usize;
    1 + 3 * r * (r + 1)
}

/// Parses a `#rrggbb` color string (the `#` is optional, case-insensitive)
/// into its three channel bytes.
///
/// # Examples
/// ```
/// # use hex_board::math::parse_hex_color;
/// assert_eq!(parse_hex_color("#ff8000").unwrap(), [255, 128, 0]);
/// assert_eq!(parse_hex_color("00FF00").unwrap(), [0, 255, 0]);
/// assert!(parse_hex_color("#fff").is_err());
/// ```
pub fn parse_hex_color(text: &str) -> Result<[u8; 3], ColorError> {
    let digits = text.strip_prefix('#').unwrap_or(text);
    let invalid = || ColorError::InvalidHex(text.to_string());
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// World-space camera position for a top-down view of `focus` on the XZ
/// board plane, lifted by `height` and pulled back along +Z so the view is
/// tilted by `tilt` radians from straight down.
pub fn camera_eye(focus: Vec2, height: f32, tilt: f32) -> Vec3 {
    Vec3::new(focus.x, height, focus.y + height * tilt.tan())
}

/// Clamps a zoom height into `[min, max]` after applying `delta`.
pub fn clamp_zoom(current: f32, delta: f32, min: f32, max: f32) -> f32 {
    (current + delta).clamp(min, max)
}
