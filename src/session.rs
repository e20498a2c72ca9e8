use std::time::Duration;

use crate::config::{Config, ConfigError};
use crate::engine::{
	create_disc_image, grab_angle, render_disc, DiscRotation, Raster, Region, RegionId, RenderLoop,
	Ticks, REGION_COUNT,
};
use crate::export::ExportError;
use crate::input::{Layout, Phase, PointerEvent};
use crate::render::Surface;

/// The drawing surfaces a [`Session`] paints on.
pub trait Host {
	fn region_surface(&mut self, id: RegionId) -> &mut dyn Surface;
	fn disc_surface(&mut self) -> &mut dyn Surface;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResetTarget {
	Region(RegionId),
	All,
}

/// Everything the composer knows: the regions, the disc's rotation and the clocks driving it.
#[derive(Debug)]
pub struct Session {
	config: Config,
	regions: [Region; REGION_COUNT],
	rotation: DiscRotation,
	render_loop: RenderLoop,
}

impl Session {
	pub fn new(config: Config) -> Result<Self, ConfigError> {
		config.validate()?;
		Ok(Self {
			regions: std::array::from_fn(|_| Region::new(config.region_size)),
			rotation: DiscRotation::new(config.history_capacity),
			render_loop: RenderLoop::new(&config.timing),
			config,
		})
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn region(&self, id: RegionId) -> &Region {
		&self.regions[id.index()]
	}

	pub fn regions(&self) -> &[Region; REGION_COUNT] {
		&self.regions
	}

	pub fn rotation(&self) -> &DiscRotation {
		&self.rotation
	}

	/// Handles pointer input on the surface of region `id`, which is laid out at `target`.
	pub fn region_input<L: Layout>(
		&mut self,
		id: RegionId,
		event: &PointerEvent,
		target: &L,
		host: &mut impl Host,
	) {
		let region = &mut self.regions[id.index()];
		let style = &self.config.capture;
		match event.phase {
			Phase::Down => {
				if let Some(point) = event.local_position(target) {
					region.begin(point, host.region_surface(id), style);
				}
			}
			Phase::Move => {
				if let Some(point) = event.local_position(target) {
					region.update(point, host.region_surface(id), style);
				}
			}
			// Lifting the last finger leaves no touches, but still ends the stroke.
			Phase::Up => {
				if region.end() {
					self.render(host);
				}
			}
		}
	}

	/// Handles pointer input on the disc surface, which is laid out at `target`.
	pub fn disc_input<L: Layout>(&mut self, event: &PointerEvent, target: &L, host: &mut impl Host) {
		match event.phase {
			Phase::Down => {
				if let Some(point) = event.local_position(target) {
					let center = host.disc_surface().center();
					self.rotation.grab_start(grab_angle(point, center));
				}
			}
			Phase::Move => {
				if !self.rotation.is_dragging() {
					return;
				}
				if let Some(point) = event.local_position(target) {
					let center = host.disc_surface().center();
					self.rotation.grab_move(grab_angle(point, center));
				}
			}
			Phase::Up => self.rotation.grab_end(),
		}
	}

	pub fn reset(&mut self, target: ResetTarget, host: &mut impl Host) {
		tracing::debug!(?target, "reset");
		match target {
			ResetTarget::Region(id) => self.clear_region(id, host),
			ResetTarget::All => {
				for id in RegionId::all() {
					self.clear_region(id, host);
				}
			}
		}
		self.render(host);
	}

	fn clear_region(&mut self, id: RegionId, host: &mut impl Host) {
		let region = &mut self.regions[id.index()];
		region.clear();
		region.redraw(host.region_surface(id), &self.config.capture);
	}

	pub fn physics_tick(&mut self) {
		self.rotation.physics_tick();
	}

	/// Redraws the disc at the current angle.
	pub fn render(&self, host: &mut impl Host) {
		let style = &self.config.disc;
		render_disc(
			host.disc_surface(),
			&self.regions,
			style,
			style.margin,
			self.rotation.angle(),
		);
	}

	/// Runs the physics ticks due after `elapsed`, then redraws if a frame is due.
	pub fn advance(&mut self, elapsed: Duration, host: &mut impl Host) -> Ticks {
		let ticks = self.render_loop.advance(elapsed);
		for _ in 0..ticks.physics {
			self.physics_tick();
		}
		if ticks.render {
			tracing::trace!(physics = ticks.physics, angle = self.rotation.angle(), "frame");
			self.render(host);
		}
		ticks
	}

	/// Renders the disc at `angle` into a square image for printing.
	pub fn export_image(&self, diameter_mm: f32, dpi: f32, angle: f64) -> Result<Raster, ExportError> {
		create_disc_image(diameter_mm, dpi, &self.regions, &self.config.disc, angle)
	}
}
