use crate::foundation::core::Rgba8Premul;
use serde::{Deserialize, Serialize};

/// Lightness used for every rainbow hue.
pub const RAINBOW_LIGHTNESS: f64 = 0.62;

/// A stroke color, kept in whichever space it was picked in.
///
/// Channels are normalized to `0..=1`; hue is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StrokeColor {
    Rgb { r: f64, g: f64, b: f64, a: f64 },
    Hsl { h: f64, s: f64, l: f64, a: f64 },
}

impl Default for StrokeColor {
    fn default() -> Self {
        PALETTE[0].1
    }
}

impl StrokeColor {
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::Hsl { h, s, l, a: 1.0 }
    }

    /// Fully saturated rainbow color for a hue in degrees.
    pub fn rainbow(hue: f64) -> Self {
        Self::hsl(hue.rem_euclid(360.0), 1.0, RAINBOW_LIGHTNESS)
    }

    pub fn alpha(self) -> f64 {
        match self {
            Self::Rgb { a, .. } | Self::Hsl { a, .. } => a,
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        match self {
            Self::Rgb { r, g, b, .. } => Self::Rgb { r, g, b, a: alpha },
            Self::Hsl { h, s, l, .. } => Self::Hsl { h, s, l, a: alpha },
        }
    }

    /// Straight (non-premultiplied) channels in `0..=1`.
    pub fn to_rgba(self) -> [f64; 4] {
        match self {
            Self::Rgb { r, g, b, a } => [
                r.clamp(0.0, 1.0),
                g.clamp(0.0, 1.0),
                b.clamp(0.0, 1.0),
                a.clamp(0.0, 1.0),
            ],
            Self::Hsl { h, s, l, a } => {
                let [r, g, b] = hsl_to_rgb(h, s, l);
                [r, g, b, a.clamp(0.0, 1.0)]
            }
        }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        let [r, g, b, a] = self.to_rgba();
        [to_u8(r), to_u8(g), to_u8(b), to_u8(a)]
    }

    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        let [r, g, b, a] = self.to_rgba8();
        Rgba8Premul::from_straight_rgba(r, g, b, a)
    }

    pub fn parse_hex(s: &str) -> Result<Self, String> {
        parse_hex(s)
    }
}

/// Default palette: display name and color, first entry is the initial brush.
pub const PALETTE: [(&str, StrokeColor); 10] = [
    ("white", StrokeColor::rgb8(0xff, 0xff, 0xff)),
    ("sky", StrokeColor::rgb8(0x60, 0xa5, 0xfa)),
    ("green", StrokeColor::rgb8(0x34, 0xd3, 0x99)),
    ("pink", StrokeColor::rgb8(0xf4, 0x72, 0xb6)),
    ("yellow", StrokeColor::rgb8(0xfa, 0xcc, 0x15)),
    ("red", StrokeColor::rgb8(0xf8, 0x71, 0x71)),
    ("purple", StrokeColor::rgb8(0xa7, 0x8b, 0xfa)),
    ("cyan", StrokeColor::rgb8(0x22, 0xd3, 0xee)),
    ("orange", StrokeColor::rgb8(0xf9, 0x73, 0x16)),
    ("lime", StrokeColor::rgb8(0x10, 0xb9, 0x81)),
];

/// Look up a palette entry by its display name.
pub fn palette_color(name: &str) -> Option<StrokeColor> {
    PALETTE
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, c)| *c)
}

impl<'de> Deserialize<'de> for StrokeColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            HslaObj {
                h: f64,
                s: f64,
                l: f64,
                #[serde(default = "one")]
                a: f64,
            },
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => palette_color(&s)
                .map(Ok)
                .unwrap_or_else(|| parse_hex(&s))
                .map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::Rgb { r, g, b, a }),
            Repr::HslaObj { h, s, l, a } => Ok(Self::Hsl { h, s, l, a }),
        }
    }
}

fn parse_hex(s: &str) -> Result<StrokeColor, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }
    let (r, g, b, a) = match s.len() {
        6 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        ),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => {
            return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
        }
    };

    Ok(StrokeColor::Rgb {
        r: f64::from(r) / 255.0,
        g: f64::from(g) / 255.0,
        b: f64::from(b) / 255.0,
        a: f64::from(a) / 255.0,
    })
}

/// Standard HSL -> RGB conversion; `s` and `l` normalized, `h` in degrees.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
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

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    [
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    ]
}
