use std::num::ParseIntError;
use std::str::FromStr;

/// The stable ID of a player account.
///
/// This is the ID the admin framework assigns to every client it has ever
/// seen, which is what the `client_id` column stores.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
#[debug("PlayerId({_0})")]
pub struct PlayerId(i64);

/// Error returned when parsing a [`PlayerId`] from a string.
#[derive(Debug, Display, From, Error)]
#[display("invalid player id: {_0}")]
pub struct ParsePlayerIdError(ParseIntError);

impl PlayerId
{
	pub const fn new(id: i64) -> Self
	{
		Self(id)
	}

	pub const fn as_i64(&self) -> i64
	{
		self.0
	}
}

impl FromStr for PlayerId
{
	type Err = ParsePlayerIdError;

	/// Parses either `123` or `@123`.
	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		let value = value.strip_prefix('@').unwrap_or(value);

		Ok(Self(value.parse()?))
	}
}

impl_sqlx!(PlayerId => {
	Type as i64;
	Encode<'q> as i64 = |player_id| player_id.as_i64();
	Decode<'r> as i64 = |value| Ok::<_, std::convert::Infallible>(PlayerId(value));
});
