#[derive(thiserror::Error, Debug)]
#[error("no global tracing subscriber set")]
struct NoTracingSubscriber;

fn configure_tracing() -> anyhow::Result<()> {
	let result = Err(NoTracingSubscriber);

	#[cfg(all(target_arch = "wasm32", feature = "web"))]
	let result = result.or_else(|_| tracing_wasm::try_set_as_global_default());

	let result = result.or_else(|_| {
		let max_level = if cfg!(debug_assertions) {
			tracing::Level::TRACE
		} else {
			tracing::Level::INFO
		};
		tracing::subscriber::set_global_default(
			tracing_subscriber::FmtSubscriber::builder()
				.with_max_level(max_level)
				.finish(),
		)
	});

	Ok(result?)
}

/// Installs the global subscriber. Call once at startup; logging failures are not fatal to the host.
pub fn configure_logging() -> anyhow::Result<()> {
	configure_tracing()?;

	// Libraries that log through `log` end up in the same subscriber.
	#[cfg(feature = "log")]
	tracing_log::LogTracer::init()?;

	Ok(())
}
