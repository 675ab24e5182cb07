use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Default marker colour for design points (lime).
pub const MARKER: Color32 = Color32::from_rgb(0xbe, 0xf2, 0x64);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

// ---------------------------------------------------------------------------
// Hex strings (variable colours are stored as `#rrggbb`)
// ---------------------------------------------------------------------------

pub fn parse_hex(s: &str) -> Option<Color32> {
    let hex = s.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

pub fn to_hex(c: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b())
}

// ---------------------------------------------------------------------------
// Depth scale: third axis of a 3D projection → colour
// ---------------------------------------------------------------------------

/// Maps z values onto a blue → red hue ramp.
#[derive(Debug, Clone, Copy)]
pub struct DepthScale {
    min: f64,
    max: f64,
}

impl DepthScale {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        DepthScale { min, max }
    }

    pub fn color_for(&self, z: f64) -> Color32 {
        let range = self.max - self.min;
        let t = if range.is_finite() && range.abs() > f64::EPSILON {
            ((z - self.min) / range).clamp(0.0, 1.0)
        } else {
            0.5
        };
        hsl_to_color32(240.0 * (1.0 - t as f32), 0.8, 0.55)
    }
}
