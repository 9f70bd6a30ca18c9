use crate::constants::{GREEN_FALLBACK, INK_FALLBACK, ORANGE_FALLBACK};
use illustrations_core::Tone;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Accepts `#rgb`, `#rrggbb`, `rgb(...)` and `rgba(...)`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex);
        }
        let start = value.find('(')?;
        let end = value.rfind(')')?;
        if !matches!(value[..start].trim(), "rgb" | "rgba") || !value[end + 1..].trim().is_empty() {
            return None;
        }
        let parts: Vec<&str> = value
            .get(start + 1..end)?
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() < 3 {
            return None;
        }
        let channel = |part: &str| -> Option<u8> {
            let v = match part.strip_suffix('%') {
                Some(pct) => pct.parse::<f32>().ok()? * 2.55,
                None => part.parse::<f32>().ok()?,
            };
            Some(v.round().clamp(0.0, 255.0) as u8)
        };
        Some(Self {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
        })
    }

    pub fn rgba(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha.clamp(0.0, 1.0))
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let byte = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| byte(&format!("{c}{c}")));
            Some(Rgb {
                r: it.next()??,
                g: it.next()??,
                b: it.next()??,
            })
        }
        6 => Some(Rgb {
            r: byte(hex.get(0..2)?)?,
            g: byte(hex.get(2..4)?)?,
            b: byte(hex.get(4..6)?)?,
        }),
        _ => None,
    }
}

/// Page colors read once from the root element's custom properties.
#[derive(Clone, Debug)]
pub struct Palette {
    pub green: Rgb,
    pub orange: Rgb,
    pub pink: Rgb,
    pub sky_top: Rgb,
    pub sky_bottom: Rgb,
}

impl Palette {
    pub fn from_document(document: &web::Document) -> Self {
        let styles = document
            .document_element()
            .and_then(|root| web::window()?.get_computed_style(&root).ok().flatten());
        let var = |name: &str| -> Option<Rgb> {
            let value = styles.as_ref()?.get_property_value(name).ok()?;
            Rgb::parse(&value)
        };
        let fixed = |s: &str| Rgb::parse(s).unwrap_or(Rgb { r: 0, g: 0, b: 0 });

        let orange = var("--airspace-orange")
            .or_else(|| var("--accent-2"))
            .unwrap_or_else(|| fixed(ORANGE_FALLBACK));
        let ink = var("--airspace-neutral-dark")
            .or_else(|| var("--airspace-ink"))
            .unwrap_or_else(|| fixed(INK_FALLBACK));
        let deep = var("--airspace-neutral-deep").unwrap_or(ink);
        Self {
            green: var("--airspace-green")
                .or_else(|| var("--accent"))
                .unwrap_or_else(|| fixed(GREEN_FALLBACK)),
            pink: var("--airspace-pink").unwrap_or(orange),
            orange,
            sky_top: var("--airspace-sky-top").unwrap_or(ink),
            sky_bottom: var("--airspace-sky-bottom").unwrap_or(deep),
        }
    }

    pub fn tone(&self, tone: Tone) -> Rgb {
        match tone {
            Tone::Primary => self.green,
            Tone::Secondary => self.orange,
            Tone::Accent => self.pink,
        }
    }
}
