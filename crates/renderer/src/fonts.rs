//! Embedded fonts and text metrics.

use alert_common::{AlertError, AlertResult};
use rusttype::{point, Font, Scale};
use serde::{Deserialize, Serialize};

static REGULAR_TTF: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
static BOLD_TTF: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Regular and bold faces of the card typeface.
#[derive(Clone)]
pub struct FontSet {
    regular: Font<'static>,
    bold: Font<'static>,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet")
            .field("glyphs", &(self.regular.glyph_count(), self.bold.glyph_count()))
            .finish()
    }
}

impl FontSet {
    /// Load the faces compiled into the binary.
    pub fn embedded() -> AlertResult<Self> {
        Self::from_bytes(REGULAR_TTF, BOLD_TTF)
    }

    pub fn from_bytes(regular: &'static [u8], bold: &'static [u8]) -> AlertResult<Self> {
        let regular = Font::try_from_bytes(regular)
            .ok_or_else(|| AlertError::AssetLoadFailed("regular font is not a valid TTF".into()))?;
        let bold = Font::try_from_bytes(bold)
            .ok_or_else(|| AlertError::AssetLoadFailed("bold font is not a valid TTF".into()))?;
        Ok(Self { regular, bold })
    }

    pub fn face(&self, weight: FontWeight) -> &Font<'static> {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }

    /// Advance width of `text` in pixels.
    pub fn measure(&self, text: &str, size: f32, weight: FontWeight) -> f32 {
        let font = self.face(weight);
        let scale = Scale::uniform(size);
        font.layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    /// Distance from the top of the line box to the baseline.
    pub fn ascent(&self, size: f32, weight: FontWeight) -> f32 {
        self.face(weight).v_metrics(Scale::uniform(size)).ascent
    }

    /// Height of a capital letter above the baseline.
    pub fn cap_height(&self, size: f32, weight: FontWeight) -> f32 {
        self.face(weight)
            .glyph('H')
            .scaled(Scale::uniform(size))
            .exact_bounding_box()
            .map(|bb| -bb.min.y)
            .unwrap_or(size * 0.7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_fonts_load() {
        let fonts = FontSet::embedded().unwrap();
        assert!(fonts.ascent(13.0, FontWeight::Regular) > 0.0);
    }

    #[test]
    fn test_measure_grows_with_text() {
        let fonts = FontSet::embedded().unwrap();
        let short = fonts.measure("Twiggs", 13.0, FontWeight::Regular);
        let long = fonts.measure("Twiggs, Wilkinson", 13.0, FontWeight::Regular);
        assert!(short > 0.0);
        assert!(long > short);
        assert_eq!(fonts.measure("", 13.0, FontWeight::Regular), 0.0);
    }

    #[test]
    fn test_bold_is_wider() {
        let fonts = FontSet::embedded().unwrap();
        let regular = fonts.measure("TORNADO WARNING", 22.0, FontWeight::Regular);
        let bold = fonts.measure("TORNADO WARNING", 22.0, FontWeight::Bold);
        assert!(bold > regular);
    }

    #[test]
    fn test_cap_height_below_ascent() {
        let fonts = FontSet::embedded().unwrap();
        let cap = fonts.cap_height(14.0, FontWeight::Bold);
        assert!(cap > 0.0);
        assert!(cap < fonts.ascent(14.0, FontWeight::Bold));
    }
}
