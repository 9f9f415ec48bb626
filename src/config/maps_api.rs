use std::time::Duration;

use url::Url;

use super::Section;

/// The `[maps-api]` section.
#[derive(Debug)]
pub struct MapsApiConfig
{
	/// Where to fetch the map list from; [`urtjumpers::DEFAULT_URL`] if unset.
	pub url: Option<Url>,

	pub timeout: Duration,
}

impl Default for MapsApiConfig
{
	fn default() -> Self
	{
		Self { url: None, timeout: urtjumpers::DEFAULT_TIMEOUT }
	}
}

impl MapsApiConfig
{
	pub(super) fn from_section(section: &Section<'_>) -> Self
	{
		let timeout = section.get("timeout", || urtjumpers::DEFAULT_TIMEOUT.as_secs());

		Self {
			url: section.get("url", || None),
			timeout: Duration::from_secs(timeout),
		}
	}

	/// Creates a client for the configured API.
	pub fn client(&self) -> Result<urtjumpers::Client, urtjumpers::ApiError>
	{
		match &self.url {
			Some(url) => urtjumpers::Client::new(url.clone(), self.timeout),
			None => urtjumpers::Client::with_default_url(self.timeout),
		}
	}
}
