use std::fs;
use std::path::Path;

use color_eyre::eyre::{self, WrapErr};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "warn,jumper=info,urtjumpers=info";

/// Keeps the log file writer alive.
#[derive(Debug)]
pub(crate) struct Guard
{
	_files_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Installs the global subscriber.
///
/// Logs always go to stderr; if `log_directory` is set, they are also written
/// as JSON to a file in that directory that is rotated daily.
pub(crate) fn init(log_directory: Option<&Path>) -> eyre::Result<Guard>
{
	let stderr_layer = tracing_subscriber::fmt::layer()
		.with_writer(std::io::stderr)
		.with_timer(UtcTime::rfc_3339());

	let (files_layer, files_guard) = log_directory
		.map(|directory| -> eyre::Result<_> {
			if !directory.exists() {
				fs::create_dir_all(directory).wrap_err_with(|| {
					format!("failed to create log directory at {directory:?}")
				})?;
			}

			let (writer, guard) = tracing_appender::rolling::Builder::default()
				.rotation(tracing_appender::rolling::Rotation::DAILY)
				.filename_prefix("jumper")
				.filename_suffix("log")
				.build(directory)
				.map(tracing_appender::non_blocking)
				.wrap_err("failed to install logfile thread")?;

			let layer = tracing_subscriber::fmt::layer()
				.json()
				.with_file(false)
				.with_line_number(false)
				.with_span_list(true)
				.with_writer(writer)
				.with_timer(UtcTime::rfc_3339());

			Ok((layer, guard))
		})
		.transpose()?
		.unzip();

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

	tracing_subscriber::registry()
		.with(Layer::and_then(stderr_layer, files_layer).with_filter(filter))
		.try_init()
		.wrap_err("failed to install tracing subscriber")?;

	Ok(Guard { _files_guard: files_guard })
}
