use glam::{Affine2, UVec2, Vec2};

use super::{Pen, Rgba, Surface};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	Clear,
	FillCircle {
		transform: Affine2,
		center: Vec2,
		radius: f32,
		color: Rgba,
	},
	StrokeCircle {
		transform: Affine2,
		center: Vec2,
		radius: f32,
		pen: Pen,
	},
	StrokePolyline {
		transform: Affine2,
		points: Vec<Vec2>,
		pen: Pen,
	},
}

/// A surface that records what is drawn on it instead of rasterizing.
///
/// `clear` drops everything recorded so far, so the list always describes what is currently visible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
	size: UVec2,
	commands: Vec<DrawCommand>,
}

impl DisplayList {
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			size: UVec2::new(width, height),
			commands: Vec::new(),
		}
	}

	pub fn commands(&self) -> &[DrawCommand] {
		&self.commands
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	pub fn take(&mut self) -> Vec<DrawCommand> {
		std::mem::take(&mut self.commands)
	}

	/// Polylines drawn in `color`, mapped into surface coordinates.
	pub fn polylines_in(&self, color: Rgba) -> impl Iterator<Item = Vec<Vec2>> + '_ {
		self.commands.iter().filter_map(move |command| match command {
			DrawCommand::StrokePolyline {
				transform,
				points,
				pen,
			} if pen.color == color => Some(
				points
					.iter()
					.map(|p| transform.transform_point2(*p))
					.collect(),
			),
			_ => None,
		})
	}
}

impl Surface for DisplayList {
	fn size(&self) -> UVec2 {
		self.size
	}

	fn clear(&mut self) {
		self.commands.clear();
		self.commands.push(DrawCommand::Clear);
	}

	fn fill_circle(&mut self, transform: Affine2, center: Vec2, radius: f32, color: Rgba) {
		self.commands.push(DrawCommand::FillCircle {
			transform,
			center,
			radius,
			color,
		});
	}

	fn stroke_circle(&mut self, transform: Affine2, center: Vec2, radius: f32, pen: &Pen) {
		self.commands.push(DrawCommand::StrokeCircle {
			transform,
			center,
			radius,
			pen: *pen,
		});
	}

	fn stroke_polyline(&mut self, transform: Affine2, points: &[Vec2], pen: &Pen) {
		self.commands.push(DrawCommand::StrokePolyline {
			transform,
			points: points.to_vec(),
			pen: *pen,
		});
	}
}
