use glam::{vec2, Affine2, UVec2, Vec2};
use itertools::Itertools;

use crate::geom::{circle_points, length_scale, AABox};
use crate::render::{LineCap, LineJoin, Pen, Rgba, Surface};

fn floor_as_i32(x: f32) -> i32 {
	x.floor() as i32
}

pub fn max_line_along_x(p0: Vec2, p1: Vec2) -> impl Iterator<Item = i32> {
	let d = p1 - p0;
	debug_assert!(d.x >= 0f32);
	let slope = d.y / d.x;
	let intercept = p0.y - slope * p0.x;
	let xi0 = floor_as_i32(p0.x);
	let xi1 = floor_as_i32(p1.x);

	let positive = d.y >= 0f32;
	let (start, end) = if positive {
		(None, Some(floor_as_i32(p1.y)))
	} else {
		(Some(floor_as_i32(p0.y)), None)
	};
	start
		.into_iter()
		.chain((xi0 + 1..=xi1).map(move |xi| floor_as_i32(intercept + slope * xi as f32)))
		.chain(end)
}

pub fn min_line_along_x(p0: Vec2, p1: Vec2) -> impl Iterator<Item = i32> {
	max_line_along_x(vec2(p0.x, -p0.y), vec2(p1.x, -p1.y)).map(|yi| -(yi + 1))
}

pub fn conservative_wedge(a: Vec2, b: Vec2, c: Vec2) -> impl Iterator<Item = (i32, i32)> {
	debug_assert!(b.x >= a.x);
	debug_assert!(c.x >= b.x);
	(floor_as_i32(a.x)..)
		.zip(min_line_along_x(a, c))
		.zip(max_line_along_x(a, b))
		.flat_map(move |((x, y_min), y_max)| (y_min..=y_max).map(move |y| (x, y)))
}

fn conservative_clockwise_triangle(a: Vec2, b: Vec2, c: Vec2) -> impl Iterator<Item = (i32, i32)> {
	debug_assert!(b.x >= a.x);
	debug_assert!(c.x >= b.x);
	conservative_wedge(a, b, c).chain(
		conservative_wedge(vec2(-c.x, c.y), vec2(-b.x, b.y), vec2(-a.x, a.y))
			.map(|(x, y)| (-(x + 1), y)),
	)
}

/// Every pixel the triangle touches, each exactly once, in row-major order of `(x, y)`.
pub fn conservative_triangle(a: Vec2, b: Vec2, c: Vec2) -> impl Iterator<Item = (i32, i32)> {
	let mut points = [a, b, c];
	points.sort_by(|a, b| a.x.total_cmp(&b.x));
	let [a, b, c] = points;
	let det = (c - a).perp_dot(b - a);
	let mut result: Vec<_> = if det >= 0f32 {
		conservative_clockwise_triangle(a, b, c).collect()
	} else {
		conservative_clockwise_triangle(vec2(a.x, -a.y), vec2(b.x, -b.y), vec2(c.x, -c.y))
			.map(|(x, y)| (x, -(y + 1)))
			.collect()
	};
	result.sort();
	result
		.into_iter()
		.coalesce(|a, b| if a == b { Ok(a) } else { Err((a, b)) })
}

/// Number of polygon segments used to approximate a circle with the given radius in pixels.
fn circle_segments(radius: f32) -> usize {
	(radius.abs() * 0.75).ceil().clamp(12.0, 256.0) as usize
}

/// An RGBA8 pixel buffer, row-major with the origin in the top-left corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
	width: u32,
	height: u32,
	pixels: Vec<Rgba>,
}

impl Raster {
	/// # Panics
	///
	/// If the pixel count does not fit in `usize`.
	pub fn new(width: u32, height: u32) -> Self {
		match Self::try_new(width, height) {
			Some(raster) => raster,
			None => panic!("{width}x{height} raster is too large"),
		}
	}

	/// A transparent raster, or `None` if the pixel count overflows `usize`.
	pub fn try_new(width: u32, height: u32) -> Option<Self> {
		let count = (width as usize).checked_mul(height as usize)?;
		Some(Self {
			width,
			height,
			pixels: vec![Rgba::TRANSPARENT; count],
		})
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
		(x < self.width && y < self.height)
			.then(|| self.pixels[y as usize * self.width as usize + x as usize])
	}

	pub fn pixels(&self) -> &[Rgba] {
		&self.pixels
	}

	/// The pixels as tightly packed RGBA bytes.
	pub fn as_bytes(&self) -> &[u8] {
		bytemuck::cast_slice(&self.pixels)
	}

	fn bounds(&self) -> AABox {
		AABox::new(Vec2::ZERO, UVec2::new(self.width, self.height).as_vec2())
	}

	fn blend(&mut self, x: i32, y: i32, color: Rgba) {
		if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
			return;
		}
		let index = y as usize * self.width as usize + x as usize;
		self.pixels[index] = color.over(self.pixels[index]);
	}

	/// Fills a triangle given in pixel coordinates.
	pub fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Rgba) {
		let extent = AABox::containing([a, b, c].into_iter());
		if !extent.is_finite() || !extent.intersects(&self.bounds()) {
			return;
		}
		for (x, y) in conservative_triangle(a, b, c) {
			self.blend(x, y, color);
		}
	}

	/// Fills a convex polygon given in pixel coordinates as a triangle fan.
	fn fill_convex(&mut self, points: &[Vec2], color: Rgba) {
		let Some((&first, rest)) = points.split_first() else {
			return;
		};
		for (&b, &c) in rest.iter().tuple_windows() {
			self.fill_triangle(first, b, c, color);
		}
	}

	fn fill_dot(&mut self, center: Vec2, radius: f32, color: Rgba) {
		let points = circle_points(center, radius, circle_segments(radius)).collect_vec();
		self.fill_convex(&points, color);
	}

	fn fill_segment(&mut self, from: Vec2, to: Vec2, half_width: f32, color: Rgba) {
		let Some(direction) = (to - from).try_normalize() else {
			return;
		};
		let normal = half_width * direction.perp();
		let quad = [from + normal, to + normal, to - normal, from - normal];
		self.fill_convex(&quad, color);
	}

	/// Strokes a polyline given in pixel coordinates.
	fn stroke_pixels(&mut self, points: &[Vec2], closed: bool, width: f32, pen: &Pen) {
		let half_width = 0.5 * width;
		let color = pen.color;
		let segments = points
			.iter()
			.copied()
			.chain(closed.then(|| points.first().copied()).flatten())
			.tuple_windows();
		for (from, to) in segments {
			self.fill_segment(from, to, half_width, color);
		}
		if pen.join == LineJoin::Round {
			let interior: &[Vec2] = match points.len() {
				_ if closed => points,
				len if len > 2 => &points[1..len - 1],
				_ => &[],
			};
			for &point in interior {
				self.fill_dot(point, half_width, color);
			}
		}
		if pen.cap == LineCap::Round && !closed {
			if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
				self.fill_dot(first, half_width, color);
				if points.len() > 1 {
					self.fill_dot(last, half_width, color);
				}
			}
		}
	}
}

impl Surface for Raster {
	fn size(&self) -> UVec2 {
		UVec2::new(self.width, self.height)
	}

	fn clear(&mut self) {
		self.pixels.fill(Rgba::TRANSPARENT);
	}

	fn fill_circle(&mut self, transform: Affine2, center: Vec2, radius: f32, color: Rgba) {
		let pixel_radius = radius * length_scale(&transform);
		let points = circle_points(center, radius, circle_segments(pixel_radius))
			.map(|p| transform.transform_point2(p))
			.collect_vec();
		self.fill_convex(&points, color);
	}

	fn stroke_circle(&mut self, transform: Affine2, center: Vec2, radius: f32, pen: &Pen) {
		let pixel_radius = radius * length_scale(&transform);
		let points = circle_points(center, radius, circle_segments(pixel_radius))
			.map(|p| transform.transform_point2(p))
			.collect_vec();
		self.stroke_pixels(&points, true, pen.width * length_scale(&transform), pen);
	}

	fn stroke_polyline(&mut self, transform: Affine2, points: &[Vec2], pen: &Pen) {
		let points = points
			.iter()
			.map(|p| transform.transform_point2(*p))
			.collect_vec();
		self.stroke_pixels(&points, false, pen.width * length_scale(&transform), pen);
	}
}
