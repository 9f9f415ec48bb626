//! A small client for the [UrTJumpers] maps API.
//!
//! The API serves a JSON list of every jump map known to the UrTJumpers
//! community, including the mapper's name, a difficulty rating and the
//! release date.
//!
//! [UrTJumpers]: http://www.urtjumpers.com

/*
 * This crate is part of the jumper project.
 *
 * Copyright (C) 2024  Jumper contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see https://www.gnu.org/licenses.
 */

#[macro_use(Debug, Display, From, Error)]
extern crate derive_more as _;

#[macro_use]
extern crate tracing as _;

use std::time::Duration;

use url::Url;

mod errors;
pub use errors::ApiError;

mod map;
pub use map::MapDescriptor;

/// The URL the B3 plugin has always used to query the map list.
pub const DEFAULT_URL: &str =
	"http://api.urtjumpers.com/?key=B3urtjumpersplugin&liste=maps&format=json";

/// The default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// An HTTP client for the maps API.
#[derive(Debug, Clone)]
pub struct Client
{
	#[debug(ignore)]
	http_client: reqwest::Client,

	#[debug("{:?}", url.as_str())]
	url: Url,
}

impl Client
{
	/// Creates a new [`Client`] that will fetch the map list from `url`.
	pub fn new(url: Url, timeout: Duration) -> Result<Self, ApiError>
	{
		let http_client = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(ApiError::Http)?;

		Ok(Self { http_client, url })
	}

	/// Creates a new [`Client`] that will fetch the map list from
	/// [`DEFAULT_URL`].
	pub fn with_default_url(timeout: Duration) -> Result<Self, ApiError>
	{
		Self::new(Url::parse(DEFAULT_URL)?, timeout)
	}

	/// Returns the URL this client fetches the map list from.
	pub fn url(&self) -> &Url
	{
		&self.url
	}

	/// Fetches every map known to the API.
	#[instrument(skip(self), fields(url = %self.url), err(level = "debug"))]
	pub async fn fetch_maps(&self) -> Result<Vec<MapDescriptor>, ApiError>
	{
		let response = self.http_client.get(self.url.clone()).send().await?;

		if let Err(error) = response.error_for_status_ref() {
			return Err(ApiError::Http(error));
		}

		let body = match response.bytes().await {
			Ok(body) => body,
			Err(error) => return Err(ApiError::BufferResponseBody(error)),
		};

		let maps = map::parse_list(&body)
			.map_err(|error| ApiError::DeserializeResponse { error, body })?;

		debug!(count = maps.len(), "fetched map list");

		Ok(maps)
	}
}
