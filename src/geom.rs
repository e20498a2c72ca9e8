use glam::{Affine2, Vec2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABox {
	min: Vec2,
	max: Vec2,
}

impl AABox {
	pub fn new(min: Vec2, max: Vec2) -> Self {
		Self { min, max }
	}

	pub fn empty() -> Self {
		Self::new(Vec2::MAX, Vec2::MIN)
	}

	pub fn min(&self) -> Vec2 {
		self.min
	}

	pub fn max(&self) -> Vec2 {
		self.max
	}

	pub fn is_empty(&self) -> bool {
		self.min.x > self.max.x || self.min.y > self.max.y
	}

	pub fn is_finite(&self) -> bool {
		self.min.is_finite() && self.max.is_finite()
	}

	pub fn expanded_to_contain(self, point: Vec2) -> Self {
		Self::new(self.min.min(point), self.max.max(point))
	}

	pub fn containing(points: impl Iterator<Item = Vec2>) -> Self {
		points.fold(Self::empty(), |b, p| b.expanded_to_contain(p))
	}

	pub fn intersects(&self, other: &AABox) -> bool {
		!self.is_empty()
			&& !other.is_empty()
			&& self.min.x <= other.max.x
			&& other.min.x <= self.max.x
			&& self.min.y <= other.max.y
			&& other.min.y <= self.max.y
	}
}

/// The factor by which `transform` scales lengths, assuming it is a similarity.
pub fn length_scale(transform: &Affine2) -> f32 {
	transform.matrix2.determinant().abs().sqrt()
}

/// Vertices of a regular polygon approximating a circle, counter-clockwise from the +x axis.
pub fn circle_points(center: Vec2, radius: f32, segments: usize) -> impl Iterator<Item = Vec2> {
	let step = std::f32::consts::TAU / segments as f32;
	(0..segments).map(move |i| center + radius * Vec2::from_angle(step * i as f32))
}

/// Wraps an angular difference into `(-π, π]`.
pub fn wrap_angle(delta: f64) -> f64 {
	use std::f64::consts::{PI, TAU};
	if delta > PI {
		delta - TAU * ((delta - PI) / TAU).ceil()
	} else if delta <= -PI {
		delta + TAU * ((PI - delta) / TAU).floor()
	} else {
		delta
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;
	use glam::vec2;
	use std::f64::consts::PI;

	#[test]
	fn test_containing() {
		let b = AABox::containing([vec2(1.0, 5.0), vec2(-2.0, 3.0), vec2(4.0, 4.0)].into_iter());
		assert_eq!(b.min(), vec2(-2.0, 3.0));
		assert_eq!(b.max(), vec2(4.0, 5.0));
		assert!(AABox::containing(std::iter::empty()).is_empty());
	}

	#[test]
	fn test_intersects() {
		let a = AABox::new(vec2(0.0, 0.0), vec2(2.0, 2.0));
		assert!(a.intersects(&AABox::new(vec2(1.0, 1.0), vec2(3.0, 3.0))));
		assert!(!a.intersects(&AABox::new(vec2(2.5, 0.0), vec2(3.0, 1.0))));
		assert!(!a.intersects(&AABox::empty()));
	}

	#[test]
	fn test_length_scale() {
		let transform = Affine2::from_scale_angle_translation(Vec2::splat(3.0), 1.2, vec2(5.0, 7.0));
		assert_abs_diff_eq!(length_scale(&transform), 3.0, epsilon = 1e-5);
	}

	#[test]
	fn test_wrap_angle() {
		assert_eq!(wrap_angle(0.25), 0.25);
		assert_eq!(wrap_angle(PI), PI);
		assert_abs_diff_eq!(wrap_angle(-PI), PI, epsilon = 1e-12);
		assert_abs_diff_eq!(wrap_angle(1.9 * PI), -0.1 * PI, epsilon = 1e-12);
		assert_abs_diff_eq!(wrap_angle(-1.9 * PI), 0.1 * PI, epsilon = 1e-12);
		assert_abs_diff_eq!(wrap_angle(5.0 * PI + 0.5), -PI + 0.5, epsilon = 1e-12);
	}
}
