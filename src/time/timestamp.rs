use std::fmt;

use ::time::OffsetDateTime;
use ::time::format_description::FormatItem;
use ::time::macros::format_description;

/// `Thu, 28 Jun 2001`
const DATE_FORMAT: &[FormatItem<'static>] =
	format_description!("[weekday repr:short], [day] [month repr:short] [year]");

/// A point in time with second precision.
///
/// Timestamps are stored as unix seconds, which is what the `time_add` and
/// `time_edit` columns have always contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
#[debug("{_0}")]
pub struct Timestamp(OffsetDateTime);

/// Error returned when converting out-of-range unix seconds into a [`Timestamp`].
#[derive(Debug, Display, Error)]
#[display("unix timestamp {_0} is out of range")]
pub struct InvalidTimestamp(#[error(not(source))] i64);

impl Timestamp
{
	/// The current time.
	pub fn now() -> Self
	{
		let now = OffsetDateTime::now_utc();

		Self(now.replace_nanosecond(0).unwrap_or(now))
	}

	/// Creates a [`Timestamp`] from unix seconds.
	pub fn from_unix(seconds: i64) -> Result<Self, InvalidTimestamp>
	{
		OffsetDateTime::from_unix_timestamp(seconds)
			.map(Self)
			.map_err(|_| InvalidTimestamp(seconds))
	}

	/// Returns the number of seconds since the unix epoch.
	pub const fn as_unix(&self) -> i64
	{
		self.0.unix_timestamp()
	}

	/// Returns a [`Display`] implementation that formats only the date, e.g.
	/// `Thu, 28 Jun 2001`.
	///
	/// [`Display`]: fmt::Display
	pub fn date(&self) -> impl fmt::Display + '_
	{
		DateString(self)
	}
}

impl From<::time::Date> for Timestamp
{
	fn from(date: ::time::Date) -> Self
	{
		Self(date.midnight().assume_utc())
	}
}

struct DateString<'a>(&'a Timestamp);

impl fmt::Display for DateString<'_>
{
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		let formatted = self.0.0.format(DATE_FORMAT).map_err(|_| fmt::Error)?;

		fmt.write_str(&formatted)
	}
}

impl_sqlx!(Timestamp => {
	Type as i64;
	Encode<'q> as i64 = |timestamp| timestamp.as_unix();
	Decode<'r> as i64 = |seconds| Timestamp::from_unix(seconds);
});

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn formats_dates_like_b3()
	{
		// 2001-06-28 12:00:00 UTC
		let timestamp = Timestamp::from_unix(993_729_600).unwrap();

		assert_eq!(timestamp.date().to_string(), "Thu, 28 Jun 2001");
	}

	#[test]
	fn roundtrips_unix_seconds()
	{
		let timestamp = Timestamp::from_unix(1_378_550_136).unwrap();

		assert_eq!(timestamp.as_unix(), 1_378_550_136);
	}

	#[test]
	fn rejects_out_of_range_seconds()
	{
		assert!(Timestamp::from_unix(i64::MAX).is_err());
	}
}
