use std::fmt;

/// The duration of a jump run, in milliseconds.
///
/// Displayed the way the game shows run times, e.g. `0:01:05.042`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
#[debug("RunTime({_0}ms)")]
pub struct RunTime(u32);

/// Error returned when a stored `way_time` does not fit into a [`RunTime`].
#[derive(Debug, Display, Error)]
#[display("invalid run time: {_0}ms")]
pub struct InvalidRunTime(#[error(not(source))] i64);

impl RunTime
{
	pub const fn from_millis(millis: u32) -> Self
	{
		Self(millis)
	}

	pub const fn as_millis(&self) -> u32
	{
		self.0
	}
}

impl TryFrom<i64> for RunTime
{
	type Error = InvalidRunTime;

	fn try_from(millis: i64) -> Result<Self, Self::Error>
	{
		u32::try_from(millis).map(Self).map_err(|_| InvalidRunTime(millis))
	}
}

impl fmt::Display for RunTime
{
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		let millis = self.0 % 1000;
		let seconds = self.0 / 1000;
		let minutes = seconds / 60;
		let hours = minutes / 60;

		write!(fmt, "{hours}:{:02}:{:02}.{millis:03}", minutes % 60, seconds % 60)
	}
}

impl_sqlx!(RunTime => {
	Type as i64;
	Encode<'q> as i64 = |time| i64::from(time.as_millis());
	Decode<'r> as i64 = |millis| RunTime::try_from(millis);
});
