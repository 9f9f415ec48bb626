use std::num::NonZero;

use url::Url;

use super::Section;
use crate::database::ConnectOptions;

/// The `[database]` section.
///
/// The URL can also be set with the `DATABASE_URL` environment variable,
/// which takes precedence.
#[derive(Debug, Default)]
pub struct DatabaseConfig
{
	pub url: Option<Url>,
	pub min_connections: Option<NonZero<u32>>,
	pub max_connections: Option<NonZero<u32>>,
}

impl DatabaseConfig
{
	pub(super) fn from_section(section: &Section<'_>) -> Self
	{
		Self {
			url: section.get("url", || None),
			min_connections: section.get("min-connections", || None),
			max_connections: section.get("max-connections", || None),
		}
	}

	/// Returns the options for connecting to the configured database, if a
	/// URL is configured.
	pub fn connect_options(&self) -> Option<ConnectOptions<'_>>
	{
		let url = self.url.as_ref()?;

		Some(
			ConnectOptions::builder()
				.url(url)
				.maybe_min_connections(self.min_connections)
				.maybe_max_connections(self.max_connections)
				.build(),
		)
	}
}
