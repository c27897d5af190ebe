//! Raster rendering for weather alert cards.
//!
//! - [`layout`]: greedy word wrap and line placement
//! - [`canvas`]: shape, image and text primitives over an RGBA surface
//! - [`composite`]: the layered alert card
//! - [`png`]: PNG encoding of the finished card

pub mod canvas;
pub mod composite;
pub mod fonts;
pub mod layout;
pub mod png;
pub mod style;

pub use composite::{CompositeRenderer, RenderInputs};
pub use fonts::{FontSet, FontWeight};
pub use style::{ColorScheme, GradientPair, HexColor, RenderConfig, TextScheme, TextStyle};
