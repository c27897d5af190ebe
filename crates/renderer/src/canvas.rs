//! Raster surface for the alert card.
//!
//! Shapes are rasterized with tiny-skia into a scratch pixmap covering just
//! the shape, then composited onto an `RgbaImage`. Text goes through
//! imageproc and images through `image::imageops`, both straight onto the
//! same surface.

use image::{imageops, Rgba, RgbaImage};
use rusttype::Scale;
use tiny_skia::{
    FillRule, GradientStop, LinearGradient, Paint, Path, PathBuilder, Pixmap, Point, Shader,
    SpreadMode, Transform,
};

use crate::fonts::FontSet;
use crate::layout::TextBlock;
use crate::style::{GradientPair, HexColor, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// How a shape is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(HexColor),
    /// Gradient from the shape's top-left corner to its bottom-right.
    Linear(GradientPair),
}

impl From<HexColor> for Fill {
    fn from(color: HexColor) -> Self {
        Fill::Solid(color)
    }
}

impl From<GradientPair> for Fill {
    fn from(pair: GradientPair) -> Self {
        Fill::Linear(pair)
    }
}

pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// New canvas filled with an opaque color.
    pub fn new(width: u32, height: u32, background: HexColor) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background.to_rgba()),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn fill_rect(&mut self, rect: Rect, fill: impl Into<Fill>) {
        let Some(bounds) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
        else {
            return;
        };
        self.fill_path(&PathBuilder::from_rect(bounds), rect, fill.into());
    }

    /// Rectangle with quadratic corners of `radius`.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, fill: impl Into<Fill>) {
        if let Some(path) = rounded_rect_path(rect, radius) {
            self.fill_path(&path, rect, fill.into());
        }
    }

    fn fill_path(&mut self, path: &Path, rect: Rect, fill: Fill) {
        if rect.is_empty() {
            return;
        }

        let origin_x = rect.x.floor();
        let origin_y = rect.y.floor();
        let width = (rect.right().ceil() - origin_x) as u32;
        let height = (rect.bottom().ceil() - origin_y) as u32;
        let Some(mut pixmap) = Pixmap::new(width, height) else {
            return;
        };

        let Some(shader) = shader_for(fill, rect) else {
            return;
        };
        let mut paint = Paint::default();
        paint.shader = shader;
        paint.anti_alias = true;

        pixmap.fill_path(
            path,
            &paint,
            FillRule::Winding,
            Transform::from_translate(-origin_x, -origin_y),
            None,
        );

        self.composite_pixmap(&pixmap, origin_x as i64, origin_y as i64);
    }

    /// Source-over blend of a premultiplied pixmap at `(x, y)`.
    fn composite_pixmap(&mut self, pixmap: &Pixmap, x: i64, y: i64) {
        let (canvas_w, canvas_h) = (self.image.width() as i64, self.image.height() as i64);
        let width = pixmap.width() as i64;

        for (i, px) in pixmap.pixels().iter().enumerate() {
            let alpha = px.alpha();
            if alpha == 0 {
                continue;
            }
            let dx = x + i as i64 % width;
            let dy = y + i as i64 / width;
            if dx < 0 || dy < 0 || dx >= canvas_w || dy >= canvas_h {
                continue;
            }

            let dst = self.image.get_pixel_mut(dx as u32, dy as u32);
            let inv = 255 - alpha as u32;
            let src = [px.red(), px.green(), px.blue(), alpha];
            for c in 0..4 {
                dst.0[c] = (src[c] as u32 + (dst.0[c] as u32 * inv + 127) / 255).min(255) as u8;
            }
        }
    }

    /// Scale `src` to exactly `width` x `height` and draw it at `(x, y)`.
    pub fn draw_image(&mut self, src: &RgbaImage, x: i64, y: i64, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if src.dimensions() == (width, height) {
            imageops::overlay(&mut self.image, src, x, y);
        } else {
            let scaled = imageops::resize(src, width, height, imageops::FilterType::Triangle);
            imageops::overlay(&mut self.image, &scaled, x, y);
        }
    }

    /// Draw one line of text with its baseline at `baseline`.
    pub fn draw_text(
        &mut self,
        fonts: &FontSet,
        text: &str,
        x: f32,
        baseline: f32,
        style: &TextStyle,
        color: HexColor,
    ) {
        if text.is_empty() {
            return;
        }
        let top = baseline - fonts.ascent(style.size, style.weight);
        imageproc::drawing::draw_text_mut(
            &mut self.image,
            color.to_rgba(),
            x.round() as i32,
            top.round() as i32,
            Scale::uniform(style.size),
            fonts.face(style.weight),
            text,
        );
    }

    pub fn draw_block(
        &mut self,
        fonts: &FontSet,
        block: &TextBlock,
        style: &TextStyle,
        color: HexColor,
    ) {
        for line in &block.lines {
            self.draw_text(fonts, &line.text, line.x, line.baseline, style, color);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }
}

fn shader_for(fill: Fill, rect: Rect) -> Option<Shader<'static>> {
    match fill {
        Fill::Solid(color) => Some(Shader::SolidColor(color.to_skia())),
        Fill::Linear(pair) => LinearGradient::new(
            Point::from_xy(rect.x, rect.y),
            Point::from_xy(rect.right(), rect.bottom()),
            vec![
                GradientStop::new(0.0, pair.start.to_skia()),
                GradientStop::new(1.0, pair.end.to_skia()),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        ),
    }
}

fn rounded_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    if rect.is_empty() {
        return None;
    }
    let r = radius.max(0.0).min(rect.width / 2.0).min(rect.height / 2.0);
    let (x, y, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.quad_to(right, y, right, y + r);
    pb.line_to(right, bottom - r);
    pb.quad_to(right, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.quad_to(x, bottom, x, bottom - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}
