use glam::Vec2;
use thiserror::Error;

use crate::render::{LineCap, Pen, Rgba};

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid color {value:?}")]
	Color {
		value: String,
		#[source]
		source: csscolorparser::ParseColorError,
	},

	#[error("{name} must be positive and finite, got {value}")]
	NotPositive { name: &'static str, value: f64 },

	#[error("slit length must lie strictly between 0 and 1, got {0}")]
	SlitLength(f32),

	#[error("grab history must hold at least two samples, got {0}")]
	HistoryCapacity(usize),
}

static_assertions::assert_impl_all!(ConfigError: std::error::Error, Send, Sync);

/// Pens used while capturing strokes on a region surface.
#[derive(Clone, Debug, PartialEq, bon::Builder)]
pub struct CaptureStyle {
	/// Finalized strokes.
	#[builder(default = Pen::new(Rgba::BLACK, 8.0))]
	pub rest: Pen,
	/// The stroke being drawn.
	#[builder(default = Pen::new(Rgba::RED, 8.0))]
	pub overlay: Pen,
}

impl Default for CaptureStyle {
	fn default() -> Self {
		Self::builder().build()
	}
}

/// Appearance and layout of the composed disc.
///
/// Lengths other than `ink_width` and `margin` are in disc units, where 1 is the outer radius.
/// `ink_width` is in region pixels and shrinks with the strokes; `margin` is in device pixels.
#[derive(Clone, Debug, PartialEq, bon::Builder)]
pub struct DiscStyle {
	#[builder(default = Rgba::WHITE)]
	pub background: Rgba,
	#[builder(default = Rgba::GRAY)]
	pub guide: Rgba,
	#[builder(default = Rgba::BLACK)]
	pub ink: Rgba,
	#[builder(default = 8.0)]
	pub ink_width: f32,
	#[builder(default = 0.005)]
	pub guide_width: f32,
	#[builder(default = 0.02)]
	pub slit_width: f32,
	/// Radial length of the rim slits. The writable annulus ends at `1 - slit_length`.
	#[builder(default = 0.1)]
	pub slit_length: f32,
	/// Edge length of the square cell a region is shrunk into.
	#[builder(default = 0.2)]
	pub cell_size: f32,
	/// Spacing between neighbouring cells and between the cells and the annulus boundary.
	#[builder(default = 0.02)]
	pub cell_gap: f32,
	/// Half-length of the arms of the centre cross-hair.
	#[builder(default = 0.05)]
	pub crosshair: f32,
	#[builder(default = 10.0)]
	pub margin: f32,
}

impl Default for DiscStyle {
	fn default() -> Self {
		Self::builder().build()
	}
}

impl DiscStyle {
	pub fn ink_pen(&self) -> Pen {
		Pen::new(self.ink, self.ink_width)
	}

	pub fn guide_pen(&self) -> Pen {
		Pen::new(self.guide, self.guide_width)
	}

	pub fn slit_pen(&self) -> Pen {
		Pen::builder(self.guide, self.slit_width)
			.cap(LineCap::Butt)
			.build()
	}

	/// Radius of the inner boundary of the writable annulus.
	pub fn annulus_radius(&self) -> f32 {
		1.0 - self.slit_length
	}
}

/// Rates of the two periodic tasks.
#[derive(Clone, Debug, PartialEq, bon::Builder)]
pub struct LoopConfig {
	#[builder(default = 100.0)]
	pub physics_hz: f64,
	#[builder(default = 60.0)]
	pub render_hz: f64,
	/// Physics ticks run by a single `advance` at most. Anything beyond is dropped.
	#[builder(default = 25)]
	pub max_catch_up: u32,
}

impl Default for LoopConfig {
	fn default() -> Self {
		Self::builder().build()
	}
}

#[derive(Clone, Debug, PartialEq, bon::Builder)]
pub struct Config {
	#[builder(default)]
	pub capture: CaptureStyle,
	#[builder(default)]
	pub disc: DiscStyle,
	#[builder(default)]
	pub timing: LoopConfig,
	/// Pixel size of every region surface.
	#[builder(default = Vec2::splat(200.0))]
	pub region_size: Vec2,
	/// Grab angles kept for the release velocity estimate.
	#[builder(default = 10)]
	pub history_capacity: usize,
}

impl Default for Config {
	fn default() -> Self {
		Self::builder().build()
	}
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
	if value > 0.0 && value.is_finite() {
		Ok(())
	} else {
		Err(ConfigError::NotPositive { name, value })
	}
}

impl Config {
	pub fn validate(&self) -> Result<(), ConfigError> {
		positive("physics rate", self.timing.physics_hz)?;
		positive("render rate", self.timing.render_hz)?;
		positive("region width", self.region_size.x as f64)?;
		positive("region height", self.region_size.y as f64)?;
		positive("cell size", self.disc.cell_size as f64)?;
		positive("ink width", self.disc.ink_width as f64)?;
		let slit_length = self.disc.slit_length;
		if !(slit_length > 0.0 && slit_length < 1.0) {
			return Err(ConfigError::SlitLength(slit_length));
		}
		if self.history_capacity < 2 {
			return Err(ConfigError::HistoryCapacity(self.history_capacity));
		}
		Ok(())
	}
}
