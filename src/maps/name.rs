use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, de};

/// The BSP name of a map, e.g. `ut4_skyjumps_b2`.
///
/// Map names are case-insensitive on the game server; they are always stored
/// in lower case.
#[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[debug("{_0:?}")]
pub struct MapName(Arc<str>);

#[non_exhaustive]
#[derive(Debug, Display, Error)]
#[display("invalid map name: {_variant}")]
pub enum InvalidMapName
{
	#[display("may not be empty")]
	Empty,

	#[display("must be at most 64 characters long")]
	TooLong,

	#[display("must not contain {_0:?}")]
	InvalidCharacter(#[error(not(source))] char),
}

impl MapName
{
	/// The width of the `mapname` column.
	pub const MAX_LEN: usize = 64;

	pub fn as_str(&self) -> &str
	{
		&self.0
	}
}

impl FromStr for MapName
{
	type Err = InvalidMapName;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		let value = value.trim();

		if value.is_empty() {
			return Err(InvalidMapName::Empty);
		}

		if value.len() > Self::MAX_LEN {
			return Err(InvalidMapName::TooLong);
		}

		if let Some(char) = value
			.chars()
			.find(|char| char.is_whitespace() || char.is_control() || matches!(char, '/' | '\\'))
		{
			return Err(InvalidMapName::InvalidCharacter(char));
		}

		Ok(Self(value.to_lowercase().into()))
	}
}

impl<'de> Deserialize<'de> for MapName
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct MapNameVisitor;

		impl de::Visitor<'_> for MapNameVisitor
		{
			type Value = MapName;

			fn expecting(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
			{
				fmt.write_str("a map name")
			}

			fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
			where
				E: de::Error,
			{
				value.parse().map_err(E::custom)
			}
		}

		deserializer.deserialize_str(MapNameVisitor)
	}
}

impl_sqlx!(MapName => {
	Type as String;
	Encode<'q> as String = |map_name| map_name.as_str().to_owned();
	Decode<'r> as String = |value| value.parse::<MapName>();
});
