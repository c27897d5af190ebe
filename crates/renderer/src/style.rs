//! Render configuration: canvas geometry, colors and text styles.
//!
//! Everything the compositor needs is carried in [`RenderConfig`] and passed
//! in explicitly. The defaults reproduce the 800x600 alert card.

use std::fmt;

use alert_common::{AlertError, AlertResult};
use serde::{Deserialize, Serialize};

use crate::canvas::Rect;
use crate::fonts::FontWeight;

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

/// Opaque color written as `#RRGGBB` in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const WHITE: HexColor = HexColor::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse(hex: &str) -> AlertResult<Self> {
        hex_to_rgb(hex)
            .map(|(r, g, b)| Self::rgb(r, g, b))
            .ok_or_else(|| AlertError::Config(format!("invalid color '{}', expected #RRGGBB", hex)))
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, 255)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for HexColor {
    type Error = AlertError;

    fn try_from(hex: String) -> AlertResult<Self> {
        Self::parse(&hex)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// Two-stop gradient, drawn from a shape's top-left to its bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientPair {
    pub start: HexColor,
    pub end: HexColor,
}

impl GradientPair {
    pub const fn new(start: HexColor, end: HexColor) -> Self {
        Self { start, end }
    }
}

/// Font size, weight and line advance for one kind of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub line_height: f32,
}

impl TextStyle {
    pub const fn new(size: f32, weight: FontWeight, line_height: f32) -> Self {
        Self {
            size,
            weight,
            line_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    /// Canvas fill under every layer, visible in the gap above the map.
    pub background: HexColor,
    pub text: HexColor,
    pub banner: GradientPair,
    pub footer: GradientPair,
    pub sidebar: HexColor,
    pub in_effect_badge: GradientPair,
    pub expires_badge: GradientPair,
    pub tornado_badges: GradientPair,
    pub thunderstorm_badges: GradientPair,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: HexColor::rgb(0x26, 0x32, 0x38),
            text: HexColor::WHITE,
            banner: GradientPair::new(HexColor::rgb(0xD3, 0x2F, 0x2F), HexColor::rgb(0x88, 0x0E, 0x4F)),
            footer: GradientPair::new(HexColor::rgb(0x37, 0x47, 0x4F), HexColor::rgb(0x26, 0x32, 0x38)),
            sidebar: HexColor::rgb(0x1C, 0x1C, 0x1C),
            in_effect_badge: GradientPair::new(
                HexColor::rgb(0x00, 0x69, 0x5C),
                HexColor::rgb(0x00, 0x4D, 0x40),
            ),
            expires_badge: GradientPair::new(
                HexColor::rgb(0xE6, 0x51, 0x00),
                HexColor::rgb(0xBF, 0x36, 0x0C),
            ),
            tornado_badges: GradientPair::new(
                HexColor::rgb(0xD3, 0x2F, 0x2F),
                HexColor::rgb(0x88, 0x0E, 0x4F),
            ),
            thunderstorm_badges: GradientPair::new(
                HexColor::rgb(0xFB, 0xC0, 0x2D),
                HexColor::rgb(0xF5, 0x7F, 0x17),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextScheme {
    pub banner: TextStyle,
    pub footer: TextStyle,
    pub sender: TextStyle,
    pub time_label: TextStyle,
    pub time_value: TextStyle,
    pub narrative: TextStyle,
    pub hazard_label: TextStyle,
    pub hazard_value: TextStyle,
}

impl Default for TextScheme {
    fn default() -> Self {
        Self {
            banner: TextStyle::new(22.0, FontWeight::Bold, 26.0),
            footer: TextStyle::new(14.0, FontWeight::Bold, 16.0),
            sender: TextStyle::new(13.0, FontWeight::Bold, 16.0),
            time_label: TextStyle::new(12.0, FontWeight::Bold, 15.0),
            time_value: TextStyle::new(11.0, FontWeight::Regular, 15.0),
            narrative: TextStyle::new(13.0, FontWeight::Regular, 18.0),
            hazard_label: TextStyle::new(14.0, FontWeight::Bold, 18.0),
            hazard_value: TextStyle::new(13.0, FontWeight::Regular, 15.0),
        }
    }
}

/// Geometry, colors and typography of the alert card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub sidebar_width: u32,
    pub banner_height: u32,
    /// Gap between the banner and the map backdrop.
    pub map_offset_y: u32,
    pub footer_height: u32,
    /// Inner padding of the sidebar and canvas edge margin.
    pub padding: u32,
    pub corner_radius: f32,
    pub time_badge_height: u32,
    pub hazard_badge_size: u32,
    pub hazard_badge_spacing: u32,
    /// Logo width before scaling; height follows the logo's aspect ratio.
    pub logo_width: u32,
    pub logo_scale: f32,
    pub colors: ColorScheme,
    pub text: TextScheme,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            sidebar_width: 250,
            banner_height: 50,
            map_offset_y: 10,
            footer_height: 40,
            padding: 10,
            corner_radius: 10.0,
            time_badge_height: 40,
            hazard_badge_size: 100,
            hazard_badge_spacing: 8,
            logo_width: 80,
            logo_scale: 0.8,
            colors: ColorScheme::default(),
            text: TextScheme::default(),
        }
    }
}

impl RenderConfig {
    /// Check that every region has positive size and the badge grid fits.
    pub fn validate(&self) -> AlertResult<()> {
        let map_width = self.width.saturating_sub(self.sidebar_width);
        if map_width == 0 {
            return Err(AlertError::Config(format!(
                "sidebar width {} leaves no room for the map in a {}px canvas",
                self.sidebar_width, self.width
            )));
        }

        let chrome = self.banner_height + self.map_offset_y + self.footer_height;
        if chrome >= self.height {
            return Err(AlertError::Config(format!(
                "banner, offset and footer ({}px) exceed canvas height {}",
                chrome, self.height
            )));
        }

        let grid = self.hazard_grid_extent() + 2 * self.padding;
        if grid > self.sidebar_width {
            return Err(AlertError::Config(format!(
                "hazard badge grid ({}px) does not fit the {}px sidebar",
                grid, self.sidebar_width
            )));
        }

        let sidebar_height = self.height - self.banner_height;
        let grid_height = self.hazard_grid_extent() + self.padding;
        if grid_height > sidebar_height {
            return Err(AlertError::Config(format!(
                "hazard badge grid ({}px) does not fit the {}px sidebar height",
                grid_height, sidebar_height
            )));
        }

        if !(self.logo_scale > 0.0) || !(self.corner_radius >= 0.0) {
            return Err(AlertError::Config(
                "logo scale must be positive and corner radius non-negative".to_string(),
            ));
        }

        Ok(())
    }

    pub fn banner_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.banner_height as f32)
    }

    /// Pixel size of the backdrop to request from the tile provider.
    pub fn map_size(&self) -> (u32, u32) {
        (
            self.width - self.sidebar_width,
            self.height - self.banner_height - self.map_offset_y,
        )
    }

    pub fn map_rect(&self) -> Rect {
        let (w, h) = self.map_size();
        Rect::new(
            0.0,
            (self.banner_height + self.map_offset_y) as f32,
            w as f32,
            h as f32,
        )
    }

    pub fn footer_rect(&self) -> Rect {
        Rect::new(
            0.0,
            (self.height - self.footer_height) as f32,
            (self.width - self.sidebar_width) as f32,
            self.footer_height as f32,
        )
    }

    pub fn sidebar_rect(&self) -> Rect {
        Rect::new(
            (self.width - self.sidebar_width) as f32,
            self.banner_height as f32,
            self.sidebar_width as f32,
            (self.height - self.banner_height) as f32,
        )
    }

    /// Width and height of the 2x2 hazard badge grid.
    pub fn hazard_grid_extent(&self) -> u32 {
        2 * self.hazard_badge_size + self.hazard_badge_spacing
    }

    /// Sidebar content width inside the padding.
    pub fn sidebar_content_width(&self) -> f32 {
        (self.sidebar_width - 2 * self.padding) as f32
    }
}
