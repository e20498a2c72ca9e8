//! A phenakistoscope composer: draw the frames of a loop in eight small regions, watch them animate on
//! a spinning slit disc, and export the disc for printing.

pub mod util;

pub mod config;
pub mod engine;
pub mod export;
pub mod geom;
pub mod input;
mod logging;
pub mod render;
mod session;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

#[cfg(test)]
pub mod test;

pub use config::{Config, ConfigError};
pub use engine::{RegionId, REGION_COUNT};
pub use export::ExportError;
pub use logging::configure_logging;
pub use session::*;

/// Process-wide setup for a host: panic reporting in the browser and the global log subscriber.
pub fn init() {
	#[cfg(all(target_arch = "wasm32", feature = "web"))]
	console_error_panic_hook::set_once();

	if let Err(error) = configure_logging() {
		// Drawing works without logging.
		tracing::error!(error = error.to_string());
	}
}
