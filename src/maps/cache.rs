use std::collections::BTreeMap;

use ::time::Date;
use urtjumpers::MapDescriptor;

use super::MapLookup;
use crate::time::Timestamp;

/// Metadata about a jump map, as published by UrTJumpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapInfo
{
	/// The human readable name, e.g. `Sky Jumps`.
	pub name: String,

	/// The BSP name, e.g. `ut4_skyjumps`.
	pub file: String,

	pub author: Option<String>,

	/// Difficulty from 1 to 100, or 0 if unrated.
	pub level: u8,

	pub released_on: Option<Date>,
}

impl From<MapDescriptor> for MapInfo
{
	fn from(descriptor: MapDescriptor) -> Self
	{
		Self {
			name: descriptor.name,
			file: descriptor.file,
			author: descriptor.author,
			level: descriptor.level,
			released_on: descriptor.date,
		}
	}
}

/// An in-memory copy of the UrTJumpers map list.
///
/// The cache is only ever replaced as a whole, and only by a successful fetch;
/// a failed refresh keeps whatever was fetched last.
#[derive(Debug, Default)]
pub struct MapInfoCache
{
	#[debug("{} maps", maps.len())]
	maps: BTreeMap<String, MapInfo>,
	last_refreshed_at: Option<Timestamp>,
}

impl MapInfoCache
{
	pub fn new() -> Self
	{
		Self::default()
	}

	/// Fetches the map list and replaces the cached data with it.
	///
	/// Returns whether the cache was updated.
	#[instrument(skip_all, fields(url = %client.url()))]
	pub async fn refresh(&mut self, client: &urtjumpers::Client) -> bool
	{
		match client.fetch_maps().await {
			Ok(maps) => {
				self.replace(maps);
				debug!(count = self.maps.len(), "refreshed map info");
				true
			},
			Err(error) => {
				warn!(%error, cached = self.maps.len(), "could not contact UrTJumpers API");
				false
			},
		}
	}

	pub(crate) fn replace<I>(&mut self, maps: I)
	where
		I: IntoIterator<Item = MapDescriptor>,
	{
		self.maps = maps
			.into_iter()
			.map(MapInfo::from)
			.map(|info| (info.file.to_lowercase(), info))
			.collect();

		self.last_refreshed_at = Some(Timestamp::now());
	}

	pub fn is_empty(&self) -> bool
	{
		self.maps.is_empty()
	}

	pub fn len(&self) -> usize
	{
		self.maps.len()
	}

	/// When the cache was last replaced successfully.
	pub fn last_refreshed_at(&self) -> Option<Timestamp>
	{
		self.last_refreshed_at
	}

	/// Returns the info for the map with the given BSP name.
	pub fn get(&self, file: &str) -> Option<&MapInfo>
	{
		self.maps.get(&file.to_lowercase())
	}

	/// Every cached map, ordered by BSP name.
	pub fn iter(&self) -> impl Iterator<Item = &MapInfo>
	{
		self.maps.values()
	}

	/// Resolves a (possibly partial or misspelled) map name to a BSP name.
	pub fn lookup(&self, query: &str) -> MapLookup
	{
		super::lookup::lookup(query, self.maps.keys().map(String::as_str))
	}
}
