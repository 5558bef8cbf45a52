//! Deterministic series colors.
//!
//! Colors come from a fixed qualitative table first and from golden-ratio
//! hue stepping once the table runs out. The sequence is seed-free, so the
//! color at a given row index never changes between renders, and
//! `palette(n)` is always a prefix of `palette(n + 1)`.

use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Serializer};

/// Largest palette guaranteed to be pairwise distinct. Page sizes are
/// capped to this value by configuration.
pub const MAX_DISTINCT_COLORS: usize = 100;

/// Opaque RGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// mpn65 qualitative palette
const QUALITATIVE: [u32; 65] = [
    0xff0029, 0x377eb8, 0x66a61e, 0x984ea3, 0x00d2d5, 0xff7f00, 0xaf8d00, 0x7f80cd, 0xb3e900,
    0xc42e60, 0xa65628, 0xf781bf, 0x8dd3c7, 0xbebada, 0xfb8072, 0x80b1d3, 0xfdb462, 0xfccde5,
    0xbc80bd, 0xffed6f, 0xc4eaff, 0xcf8c00, 0x1b9e77, 0xd95f02, 0xe7298a, 0xe6ab02, 0xa6761d,
    0x0097ff, 0x00d067, 0x000000, 0x252525, 0x525252, 0x737373, 0x969696, 0xbdbdbd, 0xf43600,
    0x4ba93b, 0x5779bb, 0x927acc, 0x97ee3f, 0xbf3947, 0x9f5b00, 0xf48758, 0x8caed6, 0xf2b94f,
    0xeff26e, 0xe43872, 0xd9b100, 0x9d7a00, 0x698cff, 0xd9d9d9, 0x00d27e, 0xd06800, 0x009f82,
    0xc49200, 0xcbe8ff, 0xfecddf, 0xc27eb6, 0x8cd2ce, 0xc4b8d9, 0xf883b0, 0xa49100, 0xf48800,
    0x27d0df, 0xa04a9b,
];

const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;
const SATURATION: f64 = 0.7;
const BASE_LIGHTNESS: f64 = 0.55;
const LIGHTNESS_STEP: f64 = 0.04;
const MAX_LIGHTNESS_STEPS: u32 = 8;

/// Return `n` distinct colors, the same sequence on every call.
pub fn palette(n: usize) -> Vec<Color> {
    let mut colors = Vec::with_capacity(n);
    let mut seen = HashSet::with_capacity(n);

    for index in 0..n {
        let color = next_color(index, &seen);
        seen.insert(color);
        colors.push(color);
    }

    colors
}

fn next_color(index: usize, seen: &HashSet<Color>) -> Color {
    if let Some(&hex) = QUALITATIVE.get(index) {
        let color = Color::from_hex(hex);
        if !seen.contains(&color) {
            return color;
        }
    }

    let step = index.saturating_sub(QUALITATIVE.len()) as f64;
    let hue = (step * GOLDEN_RATIO_CONJUGATE * 360.0) % 360.0;

    // Alternate darker and lighter until the color is unused.
    let mut candidate = hsl_color(hue, SATURATION, BASE_LIGHTNESS);
    for attempt in 1..=MAX_LIGHTNESS_STEPS {
        if !seen.contains(&candidate) {
            break;
        }
        let offset = LIGHTNESS_STEP * f64::from(attempt.div_ceil(2));
        let lightness = if attempt % 2 == 1 {
            BASE_LIGHTNESS - offset
        } else {
            BASE_LIGHTNESS + offset
        };
        candidate = hsl_color(hue, SATURATION, lightness);
    }
    candidate
}

fn hsl_color(h: f64, s: f64, l: f64) -> Color {
    let (r, g, b) = hsl_to_rgb(h, s, l);
    Color::new(to_channel(r), to_channel(g), to_channel(b))
}

fn to_channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert HSL (hue in degrees) to RGB components in `0.0..=1.0`.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    let h = h / 360.0;

    (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}
