use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, de};

/// An admin level as used by the admin framework, from `0` (guest) to `100`
/// (super admin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Into)]
#[debug("Level({_0})")]
pub struct Level(u8);

#[derive(Debug, Display, Error, From)]
#[display("invalid level: {_variant}")]
pub enum ParseLevelError
{
	#[display("must be between 0 and 100")]
	#[from(ignore)]
	OutOfRange,

	#[display("unknown group keyword {_0:?}")]
	#[from(ignore)]
	UnknownGroup(#[error(not(source))] String),

	#[display("{_0}")]
	Int(ParseIntError),
}

impl Level
{
	pub const GUEST: Self = Self(0);
	pub const USER: Self = Self(1);
	pub const REGULAR: Self = Self(2);
	pub const MODERATOR: Self = Self(20);
	pub const ADMIN: Self = Self(40);
	pub const FULL_ADMIN: Self = Self(60);
	pub const SENIOR_ADMIN: Self = Self(80);
	pub const SUPER_ADMIN: Self = Self(100);

	pub const fn as_u8(&self) -> u8
	{
		self.0
	}
}

impl TryFrom<u8> for Level
{
	type Error = ParseLevelError;

	fn try_from(value: u8) -> Result<Self, Self::Error>
	{
		if value > Self::SUPER_ADMIN.0 {
			return Err(ParseLevelError::OutOfRange);
		}

		Ok(Self(value))
	}
}

impl FromStr for Level
{
	type Err = ParseLevelError;

	/// Parses either a number or one of the group keywords (`guest`, `user`,
	/// `reg`, `mod`, `admin`, `fulladmin`, `senioradmin`, `superadmin`).
	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		let value = value.trim();

		if value.starts_with(|char: char| char.is_ascii_digit()) {
			return value.parse::<u8>()?.try_into();
		}

		match value.to_ascii_lowercase().as_str() {
			"guest" => Ok(Self::GUEST),
			"user" => Ok(Self::USER),
			"reg" => Ok(Self::REGULAR),
			"mod" => Ok(Self::MODERATOR),
			"admin" => Ok(Self::ADMIN),
			"fulladmin" => Ok(Self::FULL_ADMIN),
			"senioradmin" => Ok(Self::SENIOR_ADMIN),
			"superadmin" => Ok(Self::SUPER_ADMIN),
			_ => Err(ParseLevelError::UnknownGroup(value.to_owned())),
		}
	}
}

impl fmt::Display for Level
{
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt::Display::fmt(&self.0, fmt)
	}
}

impl<'de> Deserialize<'de> for Level
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Helper
		{
			Int(u8),
			Str(Box<str>),
		}

		Helper::deserialize(deserializer).and_then(|value| match value {
			Helper::Int(value) => Self::try_from(value).map_err(de::Error::custom),
			Helper::Str(value) => value.parse::<Self>().map_err(de::Error::custom),
		})
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn parses_numbers()
	{
		assert_eq!("80".parse::<Level>().unwrap(), Level::SENIOR_ADMIN);
		assert_eq!("0".parse::<Level>().unwrap(), Level::GUEST);
		assert!(matches!("101".parse::<Level>(), Err(ParseLevelError::OutOfRange)));
		assert!(matches!("9001".parse::<Level>(), Err(ParseLevelError::Int(_))));
	}

	#[test]
	fn parses_group_keywords()
	{
		assert_eq!("user".parse::<Level>().unwrap(), Level::USER);
		assert_eq!("Admin".parse::<Level>().unwrap(), Level::ADMIN);
		assert_eq!(" superadmin ".parse::<Level>().unwrap(), Level::SUPER_ADMIN);
		assert!(matches!("owner".parse::<Level>(), Err(ParseLevelError::UnknownGroup(_))));
	}

	#[test]
	fn deserializes_from_toml()
	{
		#[derive(Deserialize)]
		struct Levels
		{
			numeric: Level,
			keyword: Level,
		}

		let levels = toml::from_str::<Levels>("numeric = 20\nkeyword = \"mod\"").unwrap();

		assert_eq!(levels.numeric, Level::MODERATOR);
		assert_eq!(levels.keyword, Level::MODERATOR);
	}
}
