//! Text measurement.
//!
//! The engine treats measurement as a pure function from (font, string) to a
//! bounding box in twips. [`FaceMetrics`] is the provided implementation,
//! backed by `ttf-parser` advance tables; font substitution and fallback are
//! its concern, never the engine's.

use std::collections::HashMap;
use std::fmt;

use ttf_parser::Face;

use crate::model::Twips;
use crate::style::FontConfig;

/// A measured bounding box. `height` is the line height of the font at the
/// given size — also for the empty string, which is what gives empty
/// paragraphs their vertical extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    pub width: Twips,
    pub height: Twips,
}

pub trait TextMetrics {
    fn measure(&self, font: &FontConfig, text: &str) -> Extent;
}

#[derive(Debug)]
pub struct InvalidFont;

impl fmt::Display for InvalidFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font data could not be parsed")
    }
}

impl std::error::Error for InvalidFont {}

struct FaceEntry {
    units_per_em: u16,
    /// ascender - descender + line gap, in font units.
    line_height: i32,
    /// Advance widths for U+0020..=U+00FF, in font units.
    widths: Vec<u16>,
    /// Advance used for characters outside the table.
    default_advance: u16,
}

/// Measures with advance tables extracted from loaded font faces, keyed by
/// (lowercased family, bold, italic). A styled face falls back to the regular
/// face of the same family, then to a size-proportional heuristic so that
/// measurement always succeeds.
#[derive(Default)]
pub struct FaceMetrics {
    faces: HashMap<(String, bool, bool), FaceEntry>,
}

impl FaceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a face for a family/style combination from raw TTF/OTF bytes.
    pub fn load(
        &mut self,
        family: &str,
        bold: bool,
        italic: bool,
        data: &[u8],
    ) -> Result<(), InvalidFont> {
        let face = Face::parse(data, 0).map_err(|_| InvalidFont)?;
        let units_per_em = face.units_per_em();
        let line_height =
            face.ascender() as i32 - face.descender() as i32 + face.line_gap() as i32;

        let advance = |ch: char| -> Option<u16> {
            face.glyph_index(ch).and_then(|g| face.glyph_hor_advance(g))
        };
        let space = advance(' ').unwrap_or(units_per_em / 4);
        let widths: Vec<u16> = (0x20u32..=0xFF)
            .map(|cp| {
                char::from_u32(cp)
                    .and_then(|ch| advance(ch))
                    .unwrap_or(space)
            })
            .collect();

        self.faces.insert(
            (family.to_lowercase(), bold, italic),
            FaceEntry {
                units_per_em,
                line_height,
                widths,
                default_advance: space,
            },
        );
        Ok(())
    }

    fn entry(&self, font: &FontConfig) -> Option<&FaceEntry> {
        let family = font.name.to_lowercase();
        self.faces
            .get(&(family.clone(), font.bold, font.italic))
            .or_else(|| self.faces.get(&(family, false, false)))
    }
}

impl TextMetrics for FaceMetrics {
    fn measure(&self, font: &FontConfig, text: &str) -> Extent {
        let Some(entry) = self.entry(font) else {
            // No face loaded for this family: a crude but deterministic
            // estimate keeps layout going.
            log::debug!("no face loaded for '{}', estimating metrics", font.name);
            let width = text.chars().count() as i64 * font.size as i64 / 2;
            return Extent {
                width: width as Twips,
                height: font.size * 6 / 5,
            };
        };

        let upem = entry.units_per_em.max(1) as i64;
        let units: i64 = text
            .chars()
            .map(|ch| {
                let cp = ch as u32;
                if (0x20..=0xFF).contains(&cp) {
                    entry.widths[(cp - 0x20) as usize] as i64
                } else {
                    entry.default_advance as i64
                }
            })
            .sum();

        Extent {
            width: (units * font.size as i64 / upem) as Twips,
            height: (entry.line_height as i64 * font.size as i64 / upem) as Twips,
        }
    }
}
