//! Browser bindings: DOM layout, mouse and touch events, and a canvas-backed [`Surface`].

use std::f64::consts::TAU;

use glam::{vec2, Affine2, UVec2, Vec2};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent};

use crate::engine::{RegionId, REGION_COUNT};
use crate::input::{Layout, Phase, PointerEvent};
use crate::render::{LineCap, Pen, Rgba, Surface};
use crate::session::Host;
use crate::util::{JsError, ResultExt};

impl Layout for HtmlElement {
	fn offset(&self) -> Vec2 {
		vec2(self.offset_left() as f32, self.offset_top() as f32)
	}

	fn offset_parent(&self) -> Option<Self> {
		HtmlElement::offset_parent(self)
			.and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
	}
}

pub fn mouse_event(phase: Phase, event: &MouseEvent) -> PointerEvent {
	PointerEvent::mouse(phase, vec2(event.page_x() as f32, event.page_y() as f32))
}

/// Uses the touches still on the surface, so lifting the last finger yields an event without any.
pub fn touch_event(phase: Phase, event: &TouchEvent) -> PointerEvent {
	let touches = event.touches();
	PointerEvent::touch(
		phase,
		(0..touches.length())
			.filter_map(|i| touches.get(i))
			.map(|touch| vec2(touch.page_x() as f32, touch.page_y() as f32)),
	)
}

/// A [`Surface`] drawing through a canvas 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	context: CanvasRenderingContext2d,
}

impl CanvasSurface {
	pub fn new(canvas: HtmlCanvasElement) -> anyhow::Result<Self> {
		let context = canvas
			.get_context("2d")
			.map_err(JsError::from)?
			.ok_or_else(|| anyhow::anyhow!("canvas has no 2d context"))?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| anyhow::anyhow!("canvas context is not 2d"))?;
		Ok(Self { canvas, context })
	}

	pub fn canvas(&self) -> &HtmlCanvasElement {
		&self.canvas
	}

	fn set_transform(&self, transform: Affine2) {
		let Affine2 {
			matrix2,
			translation,
		} = transform;
		self.context
			.set_transform(
				matrix2.x_axis.x as f64,
				matrix2.x_axis.y as f64,
				matrix2.y_axis.x as f64,
				matrix2.y_axis.y as f64,
				translation.x as f64,
				translation.y as f64,
			)
			.map_err(JsError::from)
			.ok_or_log();
	}

	fn set_pen(&self, pen: &Pen) {
		self.context.set_stroke_style_str(&pen.color.to_css());
		self.context.set_line_width(pen.width as f64);
		self.context.set_line_cap(pen.cap.as_css());
		self.context.set_line_join(pen.join.as_css());
	}

	fn circle_path(&self, center: Vec2, radius: f32) {
		self.context.begin_path();
		self.context
			.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
			.map_err(JsError::from)
			.ok_or_log();
	}

	fn fill(&self, color: Rgba) {
		self.context.set_fill_style_str(&color.to_css());
		self.context.fill();
	}
}

impl Surface for CanvasSurface {
	fn size(&self) -> UVec2 {
		UVec2::new(self.canvas.width(), self.canvas.height())
	}

	fn clear(&mut self) {
		self.set_transform(Affine2::IDENTITY);
		let size = self.size().as_dvec2();
		self.context.clear_rect(0.0, 0.0, size.x, size.y);
	}

	fn fill_circle(&mut self, transform: Affine2, center: Vec2, radius: f32, color: Rgba) {
		self.set_transform(transform);
		self.circle_path(center, radius);
		self.fill(color);
	}

	fn stroke_circle(&mut self, transform: Affine2, center: Vec2, radius: f32, pen: &Pen) {
		self.set_transform(transform);
		self.set_pen(pen);
		self.circle_path(center, radius);
		self.context.stroke();
	}

	fn stroke_polyline(&mut self, transform: Affine2, points: &[Vec2], pen: &Pen) {
		self.set_transform(transform);
		match points {
			[] => {}
			// Canvas drops zero-length subpaths, so a lone point is filled as its cap.
			[point] => {
				if pen.cap == LineCap::Round {
					self.circle_path(*point, 0.5 * pen.width);
					self.fill(pen.color);
				}
			}
			[first, rest @ ..] => {
				self.set_pen(pen);
				self.context.begin_path();
				self.context.move_to(first.x as f64, first.y as f64);
				for p in rest {
					self.context.line_to(p.x as f64, p.y as f64);
				}
				self.context.stroke();
			}
		}
	}
}

/// Region and disc canvases of a page.
pub struct CanvasHost {
	regions: [CanvasSurface; REGION_COUNT],
	disc: CanvasSurface,
}

impl CanvasHost {
	pub fn new(
		regions: [HtmlCanvasElement; REGION_COUNT],
		disc: HtmlCanvasElement,
	) -> anyhow::Result<Self> {
		let regions = regions
			.into_iter()
			.map(CanvasSurface::new)
			.collect::<anyhow::Result<Vec<_>>>()?;
		let regions: [CanvasSurface; REGION_COUNT] = regions
			.try_into()
			.map_err(|_| anyhow::anyhow!("expected {REGION_COUNT} region canvases"))?;
		Ok(Self {
			regions,
			disc: CanvasSurface::new(disc)?,
		})
	}
}

impl Host for CanvasHost {
	fn region_surface(&mut self, id: RegionId) -> &mut dyn Surface {
		&mut self.regions[id.index()]
	}

	fn disc_surface(&mut self) -> &mut dyn Surface {
		&mut self.disc
	}
}
