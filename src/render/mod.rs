//! Immediate-mode drawing surfaces.
//!
//! Every draw call carries the full local-to-surface transform and its own pen, so a caller composes
//! nested frames by multiplying `Affine2` values rather than by pushing and popping state on the
//! surface. Nothing set by one call can leak into the next.

use glam::{Affine2, UVec2, Vec2};

use crate::config::ConfigError;

mod display_list;
pub use display_list::*;

#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
	pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);
	pub const BLACK: Self = Self([0, 0, 0, 255]);
	pub const WHITE: Self = Self([255, 255, 255, 255]);
	pub const RED: Self = Self([255, 0, 0, 255]);
	pub const GRAY: Self = Self([128, 128, 128, 255]);

	/// Parses any CSS color, e.g. `"black"`, `"#f80"` or `"rgb(10 20 30 / 50%)"`.
	pub fn parse(css: &str) -> Result<Self, ConfigError> {
		let color = csscolorparser::parse(css).map_err(|source| ConfigError::Color {
			value: css.to_owned(),
			source,
		})?;
		Ok(Self(color.to_rgba8()))
	}

	pub fn alpha(self) -> u8 {
		self.0[3]
	}

	pub fn to_css(self) -> String {
		let [r, g, b, a] = self.0;
		format!("rgba({r}, {g}, {b}, {})", a as f32 / 255.0)
	}

	/// Composites `self` over `destination` (non-premultiplied source-over).
	pub fn over(self, destination: Rgba) -> Rgba {
		let source_alpha = self.alpha() as u32;
		match source_alpha {
			255 => return self,
			0 => return destination,
			_ => {}
		}
		let destination_alpha = destination.alpha() as u32 * (255 - source_alpha) / 255;
		let alpha = source_alpha + destination_alpha;
		let mix = |s: u8, d: u8| {
			((s as u32 * source_alpha + d as u32 * destination_alpha + alpha / 2) / alpha) as u8
		};
		Rgba([
			mix(self.0[0], destination.0[0]),
			mix(self.0[1], destination.0[1]),
			mix(self.0[2], destination.0[2]),
			alpha as u8,
		])
	}
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineCap {
	Butt,
	#[default]
	Round,
}

impl LineCap {
	pub fn as_css(self) -> &'static str {
		match self {
			LineCap::Butt => "butt",
			LineCap::Round => "round",
		}
	}
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineJoin {
	Miter,
	#[default]
	Round,
}

impl LineJoin {
	pub fn as_css(self) -> &'static str {
		match self {
			LineJoin::Miter => "miter",
			LineJoin::Round => "round",
		}
	}
}

/// Stroke parameters. `width` is measured in the local units of the transform it is drawn with.
#[derive(Copy, Clone, Debug, PartialEq, bon::Builder)]
pub struct Pen {
	#[builder(start_fn)]
	pub color: Rgba,
	#[builder(start_fn)]
	pub width: f32,
	#[builder(default)]
	pub cap: LineCap,
	#[builder(default)]
	pub join: LineJoin,
}

impl Pen {
	pub fn new(color: Rgba, width: f32) -> Self {
		Self::builder(color, width).build()
	}
}

pub trait Surface {
	/// Size in device pixels.
	fn size(&self) -> UVec2;

	/// Resets every pixel to transparent.
	fn clear(&mut self);

	fn fill_circle(&mut self, transform: Affine2, center: Vec2, radius: f32, color: Rgba);

	fn stroke_circle(&mut self, transform: Affine2, center: Vec2, radius: f32, pen: &Pen);

	/// Strokes the open polyline through `points`. A single point is drawn as a dot when the pen
	/// has round caps and is otherwise invisible.
	fn stroke_polyline(&mut self, transform: Affine2, points: &[Vec2], pen: &Pen);

	fn stroke_segment(&mut self, transform: Affine2, from: Vec2, to: Vec2, pen: &Pen) {
		self.stroke_polyline(transform, &[from, to], pen)
	}

	fn center(&self) -> Vec2 {
		0.5 * self.size().as_vec2()
	}
}
