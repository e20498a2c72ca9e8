use std::time::Duration;

use crate::config::LoopConfig;

/// A fixed-rate clock driven by elapsed wall time.
#[derive(Clone, Debug)]
pub struct Ticker {
	period: Duration,
	pending: Duration,
}

impl Ticker {
	pub fn from_hz(hz: f64) -> Self {
		Self {
			period: Duration::from_nanos((1e9 / hz).round() as u64),
			pending: Duration::ZERO,
		}
	}

	pub fn period(&self) -> Duration {
		self.period
	}

	/// Accumulates `elapsed` and returns how many whole periods are now due, consuming them.
	pub fn advance(&mut self, elapsed: Duration) -> u32 {
		self.pending += elapsed;
		if self.period.is_zero() {
			self.pending = Duration::ZERO;
			return 0;
		}
		let due = self.pending.as_nanos() / self.period.as_nanos();
		self.pending -= self.period * due as u32;
		due.min(u32::MAX as u128) as u32
	}
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Ticks {
	/// Physics steps to run, oldest first.
	pub physics: u32,
	/// Whether to redraw once the physics steps have run.
	pub render: bool,
}

/// The physics and redraw clocks. They run at independent rates; a redraw always follows the physics
/// steps that were due at the same time, so it sees the latest committed angle.
#[derive(Clone, Debug)]
pub struct RenderLoop {
	physics: Ticker,
	render: Ticker,
	max_catch_up: u32,
}

impl RenderLoop {
	pub fn new(config: &LoopConfig) -> Self {
		Self {
			physics: Ticker::from_hz(config.physics_hz),
			render: Ticker::from_hz(config.render_hz),
			max_catch_up: config.max_catch_up,
		}
	}

	pub fn advance(&mut self, elapsed: Duration) -> Ticks {
		let due = self.physics.advance(elapsed);
		let physics = if due > self.max_catch_up {
			tracing::warn!(due, kept = self.max_catch_up, "dropping physics ticks");
			self.max_catch_up
		} else {
			due
		};
		let render = self.render.advance(elapsed) > 0;
		Ticks { physics, render }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ticker_periods() {
		assert_eq!(Ticker::from_hz(100.0).period(), Duration::from_millis(10));
		assert_eq!(Ticker::from_hz(60.0).period(), Duration::from_nanos(16_666_667));
	}

	#[test]
	fn test_ticker_accumulates() {
		let mut ticker = Ticker::from_hz(100.0);
		assert_eq!(ticker.advance(Duration::from_millis(4)), 0);
		assert_eq!(ticker.advance(Duration::from_millis(7)), 1);
		assert_eq!(ticker.advance(Duration::from_millis(29)), 3);
		assert_eq!(ticker.advance(Duration::from_millis(9)), 0);
		assert_eq!(ticker.advance(Duration::from_millis(1)), 1);
	}

	#[test]
	fn test_render_loop_rates() {
		let mut render_loop = RenderLoop::new(&LoopConfig::default());
		let mut physics = 0;
		let mut renders = 0;
		for _ in 0..100 {
			let ticks = render_loop.advance(Duration::from_millis(10));
			physics += ticks.physics;
			renders += ticks.render as u32;
		}
		assert_eq!(physics, 100);
		assert_eq!(renders, 59);
	}

	#[test]
	fn test_catch_up_is_bounded() {
		let mut render_loop = RenderLoop::new(&LoopConfig::default());
		let ticks = render_loop.advance(Duration::from_secs(2));
		assert_eq!(ticks, Ticks { physics: 25, render: true });
		let ticks = render_loop.advance(Duration::from_millis(10));
		assert_eq!(ticks.physics, 1);
	}
}
