use glam::Vec2;

/// One continuous pen gesture in region pixel coordinates. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
	points: Vec<Vec2>,
}

impl Stroke {
	pub fn new(first: Vec2) -> Self {
		Self {
			points: vec![first],
		}
	}

	pub fn points(&self) -> &[Vec2] {
		&self.points
	}

	#[allow(clippy::len_without_is_empty)]
	pub fn len(&self) -> usize {
		self.points.len()
	}
}

/// A stroke that is still being drawn.
#[derive(Debug, Clone)]
pub(crate) struct ActiveStroke {
	stroke: Stroke,
}

impl ActiveStroke {
	pub fn begin(point: Vec2) -> Self {
		Self {
			stroke: Stroke::new(point),
		}
	}

	pub fn add_point(&mut self, point: Vec2) {
		self.stroke.points.push(point);
	}

	pub fn stroke(&self) -> &Stroke {
		&self.stroke
	}

	pub fn finish(self) -> Stroke {
		self.stroke
	}
}
