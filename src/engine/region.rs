use glam::{Affine2, Vec2};

use super::{ActiveStroke, Stroke};
use crate::config::CaptureStyle;
use crate::render::Surface;

pub const REGION_COUNT: usize = 8;

static_assertions::const_assert!(REGION_COUNT > 0);
static_assertions::const_assert!(REGION_COUNT <= u8::MAX as usize);

/// Index of one of the [`REGION_COUNT`] input regions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("region {_0}")]
pub struct RegionId(u8);

impl RegionId {
	pub fn new(index: usize) -> Option<Self> {
		(index < REGION_COUNT).then_some(Self(index as u8))
	}

	pub fn index(self) -> usize {
		self.0 as usize
	}

	pub fn all() -> impl Iterator<Item = Self> {
		(0..REGION_COUNT as u8).map(Self)
	}
}

/// One input surface and the strokes drawn on it.
///
/// Capture is a two state machine: idle, or capturing while an active stroke exists. Finalized strokes
/// are kept in drawing order.
#[derive(Debug, Clone)]
pub struct Region {
	size: Vec2,
	active: Option<ActiveStroke>,
	strokes: Vec<Stroke>,
}

impl Region {
	pub fn new(size: Vec2) -> Self {
		Self {
			size,
			active: None,
			strokes: Vec::new(),
		}
	}

	/// Pixel size of the region's surface.
	pub fn size(&self) -> Vec2 {
		self.size
	}

	pub fn is_capturing(&self) -> bool {
		self.active.is_some()
	}

	pub fn strokes(&self) -> &[Stroke] {
		&self.strokes
	}

	pub fn active_stroke(&self) -> Option<&Stroke> {
		self.active.as_ref().map(ActiveStroke::stroke)
	}

	/// Starts a stroke at `point`, then repaints `surface`: finalized strokes with the rest pen and the
	/// new stroke with the overlay pen on top.
	///
	/// Returns `false` without doing anything if a stroke is already being captured.
	pub fn begin(&mut self, point: Vec2, surface: &mut dyn Surface, style: &CaptureStyle) -> bool {
		if self.active.is_some() {
			tracing::warn!(?point, "begin while already capturing");
			return false;
		}
		tracing::debug!(?point, strokes = self.strokes.len(), "begin stroke");
		let active = self.active.insert(ActiveStroke::begin(point));

		surface.clear();
		for stroke in &self.strokes {
			surface.stroke_polyline(Affine2::IDENTITY, stroke.points(), &style.rest);
		}
		surface.stroke_polyline(Affine2::IDENTITY, active.stroke().points(), &style.overlay);
		true
	}

	/// Extends the active stroke and redraws it with the overlay pen. No-op while idle.
	pub fn update(&mut self, point: Vec2, surface: &mut dyn Surface, style: &CaptureStyle) -> bool {
		let Some(active) = self.active.as_mut() else {
			return false;
		};
		tracing::trace!(?point, "extend stroke");
		active.add_point(point);
		surface.stroke_polyline(Affine2::IDENTITY, active.stroke().points(), &style.overlay);
		true
	}

	/// Finalizes the active stroke. Returns `true` if a stroke was added, in which case the disc needs
	/// to be recomposed.
	pub fn end(&mut self) -> bool {
		let Some(active) = self.active.take() else {
			return false;
		};
		let stroke = active.finish();
		tracing::debug!(points = stroke.len(), "end stroke");
		self.strokes.push(stroke);
		true
	}

	/// Drops every finalized stroke. An active stroke is kept.
	pub fn clear(&mut self) {
		tracing::debug!(strokes = self.strokes.len(), "clear region");
		self.strokes.clear();
	}

	/// Repaints the region surface from scratch.
	pub fn redraw(&self, surface: &mut dyn Surface, style: &CaptureStyle) {
		surface.clear();
		for stroke in &self.strokes {
			surface.stroke_polyline(Affine2::IDENTITY, stroke.points(), &style.rest);
		}
		if let Some(active) = &self.active {
			surface.stroke_polyline(Affine2::IDENTITY, active.stroke().points(), &style.overlay);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::render::{DisplayList, DrawCommand, Rgba};
	use glam::vec2;

	fn region() -> (Region, DisplayList, CaptureStyle) {
		(
			Region::new(vec2(200.0, 200.0)),
			DisplayList::new(200, 200),
			CaptureStyle::default(),
		)
	}

	#[test]
	fn test_region_id() {
		assert_eq!(RegionId::new(7).map(RegionId::index), Some(7));
		assert_eq!(RegionId::new(REGION_COUNT), None);
		assert_eq!(RegionId::all().count(), REGION_COUNT);
		assert_eq!(RegionId::new(3).unwrap().to_string(), "region 3");
	}

	#[test]
	fn test_stroke_has_one_point_per_call() {
		let (mut region, mut surface, style) = region();
		let points = [vec2(1.0, 1.0), vec2(2.0, 3.0), vec2(5.0, 8.0), vec2(13.0, 21.0)];
		assert!(region.begin(points[0], &mut surface, &style));
		for &p in &points[1..] {
			assert!(region.update(p, &mut surface, &style));
		}
		assert!(region.is_capturing());
		assert!(region.end());
		assert!(!region.is_capturing());
		assert_eq!(region.strokes().len(), 1);
		assert_eq!(region.strokes()[0].points(), &points);
	}

	#[test]
	fn test_begin_then_end_keeps_single_point() {
		let (mut region, mut surface, style) = region();
		region.begin(vec2(4.0, 4.0), &mut surface, &style);
		region.end();
		assert_eq!(region.strokes()[0].len(), 1);
	}

	#[test]
	fn test_idle_update_and_end_are_no_ops() {
		let (mut region, mut surface, style) = region();
		region.begin(vec2(0.0, 0.0), &mut surface, &style);
		region.end();
		surface.take();

		assert!(!region.update(vec2(9.0, 9.0), &mut surface, &style));
		assert!(!region.end());
		assert_eq!(region.strokes().len(), 1);
		assert_eq!(region.strokes()[0].len(), 1);
		assert!(surface.is_empty());
	}

	#[test]
	fn test_begin_redraws_rest_layer_then_overlay() {
		let (mut region, mut surface, style) = region();
		region.begin(vec2(0.0, 0.0), &mut surface, &style);
		region.update(vec2(1.0, 0.0), &mut surface, &style);
		region.end();
		region.begin(vec2(5.0, 5.0), &mut surface, &style);

		let commands = surface.commands();
		assert_eq!(commands[0], DrawCommand::Clear);
		assert!(matches!(
			&commands[1],
			DrawCommand::StrokePolyline { points, pen, .. } if points.len() == 2 && pen.color == Rgba::BLACK
		));
		assert!(matches!(
			&commands[2],
			DrawCommand::StrokePolyline { points, pen, .. } if points.len() == 1 && pen.color == Rgba::RED
		));
		assert_eq!(commands.len(), 3);

		region.update(vec2(6.0, 6.0), &mut surface, &style);
		assert_eq!(surface.commands().len(), 4);
		assert_eq!(surface.polylines_in(Rgba::RED).count(), 2);
	}

	#[test]
	fn test_begin_while_capturing_is_ignored() {
		let (mut region, mut surface, style) = region();
		assert!(region.begin(vec2(0.0, 0.0), &mut surface, &style));
		assert!(!region.begin(vec2(9.0, 9.0), &mut surface, &style));
		region.end();
		assert_eq!(region.strokes()[0].points(), &[vec2(0.0, 0.0)]);
	}

	#[test]
	fn test_clear_keeps_active_stroke() {
		let (mut region, mut surface, style) = region();
		for i in 0..3 {
			region.begin(vec2(i as f32, 0.0), &mut surface, &style);
			region.end();
		}
		region.begin(vec2(7.0, 7.0), &mut surface, &style);
		region.clear();
		assert!(region.strokes().is_empty());
		assert!(region.is_capturing());
		region.update(vec2(8.0, 8.0), &mut surface, &style);
		region.end();
		assert_eq!(region.strokes().len(), 1);
		assert_eq!(region.strokes()[0].points(), &[vec2(7.0, 7.0), vec2(8.0, 8.0)]);

		region.clear();
		assert!(region.strokes().is_empty());
	}
}
