use serde::Deserialize;
use time::Date;
use time::macros::format_description;

/// A single map as described by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapDescriptor
{
	/// The human readable name of the map.
	pub name: String,

	/// The BSP/pk3 name the game server knows the map by, e.g. `ut4_skyjumps`.
	pub file: String,

	/// The mapper, if known.
	pub author: Option<String>,

	/// Difficulty rating from 1 to 100; `0` if the map has not been rated.
	pub level: u8,

	/// The date the map was released, if known.
	pub date: Option<Date>,
}

/// The raw shape of a map object in the API's response.
#[derive(Deserialize)]
struct RawMap
{
	nom: String,
	pk3: String,

	#[serde(default)]
	mapper: Option<String>,

	#[serde(default)]
	level: Option<RawLevel>,

	#[serde(default)]
	mdate: Option<String>,
}

/// Levels are sometimes sent as numbers and sometimes as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel
{
	Int(i64),
	Str(String),
}

impl RawLevel
{
	fn into_level(self) -> u8
	{
		let level = match self {
			Self::Int(level) => level,
			Self::Str(level) => level.trim().parse().unwrap_or_default(),
		};

		u8::try_from(level.clamp(0, 100)).unwrap_or_default()
	}
}

impl From<RawMap> for MapDescriptor
{
	fn from(raw: RawMap) -> Self
	{
		let date_format = format_description!("[year]-[month]-[day]");

		Self {
			name: raw.nom,
			file: raw.pk3.to_lowercase(),
			author: raw
				.mapper
				.map(|mapper| mapper.trim().to_owned())
				.filter(|mapper| !mapper.is_empty()),
			level: raw.level.map_or(0, RawLevel::into_level),
			date: raw
				.mdate
				.and_then(|date| Date::parse(date.trim(), date_format).ok()),
		}
	}
}

pub(crate) fn parse_list(body: &[u8]) -> Result<Vec<MapDescriptor>, serde_json::Error>
{
	serde_json::from_slice::<Vec<RawMap>>(body)
		.map(|maps| maps.into_iter().map(MapDescriptor::from).collect())
}
