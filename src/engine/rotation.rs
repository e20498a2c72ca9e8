use std::collections::VecDeque;

use glam::Vec2;
use itertools::Itertools;

use crate::geom::wrap_angle;

/// Angle of `pointer` around `center`, in radians. Both are in the same surface pixel space.
pub fn grab_angle(pointer: Vec2, center: Vec2) -> f64 {
	let d = (pointer - center).as_dvec2();
	d.y.atan2(d.x)
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Drag {
	start_angle: f64,
	start_grab_angle: f64,
	current_grab_angle: f64,
}

/// Drag-to-rotate state of the disc, with inertia after release.
///
/// While dragging, the disc angle follows the pointer's angle around the disc centre. Each physics
/// tick records the current grab angle; on release the mean change per tick over the recorded
/// window becomes the angular velocity, which then persists undamped until the next grab.
#[derive(Clone, Debug)]
pub struct DiscRotation {
	angle: f64,
	angular_velocity: f64,
	drag: Option<Drag>,
	history: VecDeque<f64>,
	history_capacity: usize,
}

impl DiscRotation {
	/// Keeps the last `history_capacity` grab angles, at least one.
	pub fn new(history_capacity: usize) -> Self {
		let history_capacity = history_capacity.max(1);
		Self {
			angle: 0.0,
			angular_velocity: 0.0,
			drag: None,
			history: VecDeque::with_capacity(history_capacity),
			history_capacity,
		}
	}

	/// Current angle in radians. Not normalized.
	pub fn angle(&self) -> f64 {
		self.angle
	}

	/// Radians per physics tick.
	pub fn angular_velocity(&self) -> f64 {
		self.angular_velocity
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.is_some()
	}

	pub fn history(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
		self.history.iter().copied()
	}

	pub fn grab_start(&mut self, grab_angle: f64) {
		tracing::debug!(grab_angle, angle = self.angle, "grab start");
		self.drag = Some(Drag {
			start_angle: self.angle,
			start_grab_angle: grab_angle,
			current_grab_angle: grab_angle,
		});
		self.angular_velocity = 0.0;
		self.history.clear();
	}

	pub fn grab_move(&mut self, grab_angle: f64) {
		let Some(drag) = self.drag.as_mut() else {
			return;
		};
		drag.current_grab_angle = grab_angle;
		self.angle = drag.start_angle + (grab_angle - drag.start_grab_angle);
		tracing::trace!(grab_angle, angle = self.angle, "grab move");
	}

	pub fn grab_end(&mut self) {
		if self.drag.take().is_none() {
			return;
		}
		self.angular_velocity = self.estimate_velocity();
		tracing::debug!(
			angular_velocity = self.angular_velocity,
			samples = self.history.len(),
			"grab end"
		);
	}

	/// Mean successive difference of the recorded grab angles. Each difference is taken the short way
	/// around, so crossing the ±π seam of `atan2` does not read as a full turn.
	fn estimate_velocity(&self) -> f64 {
		let samples = self.history.len();
		if samples < 2 {
			return 0.0;
		}
		let total: f64 = self
			.history
			.iter()
			.tuple_windows()
			.map(|(a, b)| wrap_angle(b - a))
			.sum();
		total / (samples - 1) as f64
	}

	pub fn physics_tick(&mut self) {
		match &self.drag {
			Some(drag) => {
				if self.history.len() == self.history_capacity {
					self.history.pop_front();
				}
				self.history.push_back(drag.current_grab_angle);
			}
			None => self.angle += self.angular_velocity,
		}
	}
}

impl Default for DiscRotation {
	fn default() -> Self {
		Self::new(10)
	}
}
