//! Colors and color schemes for the particle fields and page chrome.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// An RGB color with a separate opacity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different opacity, clamped to `[0, 1]`.
    pub fn with_alpha(self, a: f32) -> Self {
        let a = if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) };
        Self { a, ..self }
    }

    /// Linear interpolation of the color channels; `t = 0` is `self`.
    pub fn mix(self, other: Rgba, t: f32) -> Rgba {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// Convert HSL to an opaque color. Hue in degrees, saturation and lightness in `[0, 1]`.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgba {
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return Rgba::rgb(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Rgba::rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Color scheme for fields and headings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Cyan,
    Violet,
    Emerald,
    Spectrum,
}

impl ColorScheme {
    /// Cycle to the next scheme.
    pub fn next(self) -> Self {
        match self {
            ColorScheme::Cyan => ColorScheme::Violet,
            ColorScheme::Violet => ColorScheme::Emerald,
            ColorScheme::Emerald => ColorScheme::Spectrum,
            ColorScheme::Spectrum => ColorScheme::Cyan,
        }
    }

    /// Display name used in the status line.
    pub fn name(self) -> &'static str {
        match self {
            ColorScheme::Cyan => "cyan",
            ColorScheme::Violet => "violet",
            ColorScheme::Emerald => "emerald",
            ColorScheme::Spectrum => "spectrum",
        }
    }

    pub fn palette(self) -> Palette {
        let background = Rgba::rgb(2, 4, 18);
        let risk = Rgba::rgb(255, 0, 0);
        match self {
            ColorScheme::Cyan => Palette {
                background,
                node: Rgba::rgb(0, 255, 255),
                edge: Rgba::rgb(0, 255, 255),
                calm: Rgba::rgb(100, 200, 255),
                risk,
                accent: Rgba::rgb(34, 211, 238),
            },
            ColorScheme::Violet => Palette {
                background,
                node: Rgba::rgb(196, 130, 255),
                edge: Rgba::rgb(150, 90, 255),
                calm: Rgba::rgb(170, 160, 255),
                risk,
                accent: Rgba::rgb(192, 132, 252),
            },
            ColorScheme::Emerald => Palette {
                background,
                node: Rgba::rgb(80, 250, 160),
                edge: Rgba::rgb(40, 220, 140),
                calm: Rgba::rgb(120, 230, 200),
                risk,
                accent: Rgba::rgb(52, 211, 153),
            },
            ColorScheme::Spectrum => Palette {
                background,
                node: hsl_to_rgb(190.0, 1.0, 0.6),
                edge: hsl_to_rgb(270.0, 0.9, 0.6),
                calm: hsl_to_rgb(220.0, 0.8, 0.7),
                risk: hsl_to_rgb(350.0, 1.0, 0.55),
                accent: hsl_to_rgb(310.0, 0.9, 0.65),
            },
        }
    }
}

/// Concrete colors resolved from a [`ColorScheme`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Page background, also used by the trailing fade.
    pub background: Rgba,
    /// Plexus node fill.
    pub node: Rgba,
    /// Plexus connection stroke.
    pub edge: Rgba,
    /// Risk panel particles that are not at risk.
    pub calm: Rgba,
    /// Pulsing at-risk particles.
    pub risk: Rgba,
    /// Headings and links.
    pub accent: Rgba,
}
