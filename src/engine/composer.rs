//! Composition of every region's strokes onto the slit disc.
//!
//! The disc frame maps the unit disc (radius 1 is the rim) onto the surface. Each region owns an
//! angular slot of `2π / REGION_COUNT`; inside it, every stroke is drawn [`COPIES_PER_STROKE`]
//! times, side by side in one row of cells just inside the slits, each copy turned a further
//! `2π / COPIES_PER_STROKE` about its own cell centre. The `k`th stroke of a region is turned by
//! another `2π·k / REGION_COUNT`, so strokes drawn over each other in the region fan out on the disc.

use std::f32::consts::{PI, TAU};

use glam::{vec2, Affine2, UVec2, Vec2};

use super::{Raster, Region, REGION_COUNT};
use crate::config::DiscStyle;
use crate::export::ExportError;
use crate::render::Surface;

pub const SLIT_COUNT: usize = REGION_COUNT;
pub const COPIES_PER_STROKE: usize = 2;

const MM_PER_INCH: f32 = 25.4;

/// Largest edge length, in pixels, of an exported disc.
pub const MAX_EXPORT_PX: u32 = 16384;

/// Maps the unit disc, turned by `angle`, onto a surface of the given size.
pub fn disc_frame(size: UVec2, margin: f32, angle: f64) -> Affine2 {
	let size = size.as_vec2();
	let radius = (0.5 * size.min_element() - margin).max(0.0);
	let angle = angle.rem_euclid(std::f64::consts::TAU) as f32;
	Affine2::from_translation(0.5 * size)
		* Affine2::from_scale(Vec2::splat(radius))
		* Affine2::from_angle(angle)
}

/// Centre of the slot owned by region `index`, as an angle in the disc frame.
pub fn slot_angle(index: usize) -> f32 {
	TAU * index as f32 / REGION_COUNT as f32
}

/// Frames mapping region pixel coordinates of the `stroke_index`th stroke of region `index` into each
/// of its cells on the disc. Successive strokes are turned a further `2π / REGION_COUNT` about the
/// cell centre.
pub fn cell_frames(
	disc: Affine2,
	index: usize,
	stroke_index: usize,
	region_size: Vec2,
	style: &DiscStyle,
) -> [Affine2; COPIES_PER_STROKE] {
	let cell = style.cell_size;
	let gap = style.cell_gap;
	let radius = style.annulus_radius() - gap - 0.5 * cell;
	let slot = disc * Affine2::from_angle(slot_angle(index));
	let fit = Affine2::from_scale(Vec2::splat(cell / region_size.max_element().max(1.0)))
		* Affine2::from_translation(-0.5 * region_size);
	std::array::from_fn(|copy| {
		let column = copy as f32 - 0.5 * (COPIES_PER_STROKE - 1) as f32;
		let turn = TAU * copy as f32 / COPIES_PER_STROKE as f32
			+ TAU * (stroke_index % REGION_COUNT) as f32 / REGION_COUNT as f32;
		slot * Affine2::from_translation(vec2(column * (cell + gap), -radius))
			* Affine2::from_angle(turn)
			* fit
	})
}

fn draw_guides(surface: &mut dyn Surface, disc: Affine2, style: &DiscStyle) {
	surface.fill_circle(disc, Vec2::ZERO, 1.0, style.background);

	let guide = style.guide_pen();
	let arm = style.crosshair;
	surface.stroke_segment(disc, vec2(-arm, 0.0), vec2(arm, 0.0), &guide);
	surface.stroke_segment(disc, vec2(0.0, -arm), vec2(0.0, arm), &guide);

	// Slits sit between neighbouring slots.
	let slit = style.slit_pen();
	for k in 0..SLIT_COUNT {
		let frame = disc * Affine2::from_angle(TAU * (k as f32 + 0.5) / SLIT_COUNT as f32);
		surface.stroke_segment(frame, vec2(0.0, -1.0), vec2(0.0, -style.annulus_radius()), &slit);
	}

	surface.stroke_circle(disc, Vec2::ZERO, style.annulus_radius(), &guide);
}

/// Clears `surface` and draws the disc turned by `angle` with every finalized stroke of `regions`.
///
/// Regions are laid out by their position in `regions`.
pub fn render_disc(
	surface: &mut dyn Surface,
	regions: &[Region],
	style: &DiscStyle,
	margin: f32,
	angle: f64,
) {
	surface.clear();
	let disc = disc_frame(surface.size(), margin, angle);
	draw_guides(surface, disc, style);

	let ink = style.ink_pen();
	for (index, region) in regions.iter().enumerate().take(REGION_COUNT) {
		if region.strokes().is_empty() {
			continue;
		}
		for (stroke_index, stroke) in region.strokes().iter().enumerate() {
			for cell in &cell_frames(disc, index, stroke_index, region.size(), style) {
				surface.stroke_polyline(*cell, stroke.points(), &ink);
			}
		}
	}
}

/// Pixel edge length of a disc `diameter_mm` across printed at `dpi`.
pub fn print_size_px(diameter_mm: f32, dpi: f32) -> u32 {
	(diameter_mm * dpi / MM_PER_INCH).round() as u32
}

/// Renders the disc edge to edge into a square raster sized for print.
#[tracing::instrument(skip(regions, style), err)]
pub fn create_disc_image(
	diameter_mm: f32,
	dpi: f32,
	regions: &[Region],
	style: &DiscStyle,
	angle: f64,
) -> Result<Raster, ExportError> {
	let size = print_size_px(diameter_mm, dpi);
	if size == 0 {
		return Err(ExportError::Empty { diameter_mm, dpi });
	}
	if size > MAX_EXPORT_PX {
		return Err(ExportError::TooLarge {
			size,
			max: MAX_EXPORT_PX,
		});
	}
	let mut raster = Raster::try_new(size, size).ok_or(ExportError::TooLarge {
		size,
		max: MAX_EXPORT_PX,
	})?;
	render_disc(&mut raster, regions, style, 0.0, angle);
	Ok(raster)
}

/// Angle of a point, in surface coordinates, around the centre of the disc drawn by `disc`, measured
/// the same way as [`slot_angle`].
pub fn disc_angle_of(disc: Affine2, point: Vec2) -> f32 {
	let local = disc.inverse().transform_point2(point);
	(local.x.atan2(-local.y)).rem_euclid(TAU)
}

/// Whether `angle` lies within the slot of region `index`.
pub fn in_slot(angle: f32, index: usize) -> bool {
	let half = PI / REGION_COUNT as f32;
	let delta = (angle - slot_angle(index) + PI).rem_euclid(TAU) - PI;
	delta.abs() < half
}
