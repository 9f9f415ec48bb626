use sqlx::any::AnyRow;
use sqlx::{FromRow, Row};

use super::RunTime;
use crate::demos::DemoFile;
use crate::maps::MapName;
use crate::players::PlayerId;
use crate::time::Timestamp;

/// Identifies a waypoint of a map.
///
/// Maps can have multiple start and end zones, and records are kept for each
/// of them separately.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
#[debug("WaypointId({_0})")]
pub struct WaypointId(u32);

impl WaypointId
{
	pub const fn new(id: u32) -> Self
	{
		Self(id)
	}
}

impl_sqlx!(WaypointId => {
	Type as i64;
	Encode<'q> as i64 = |waypoint| i64::from(waypoint.0);
	Decode<'r> as i64 = |value| u32::try_from(value).map(WaypointId);
});

/// A player's best time on a waypoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpRecord
{
	pub player_id: PlayerId,
	pub map_name: MapName,
	pub waypoint: WaypointId,
	pub time: RunTime,
	pub created_at: Timestamp,
	pub updated_at: Timestamp,

	/// The demo of the run that set this time, if one was recorded.
	pub demo: Option<DemoFile>,
}

impl FromRow<'_, AnyRow> for JumpRecord
{
	fn from_row(row: &AnyRow) -> sqlx::Result<Self>
	{
		Ok(Self {
			player_id: row.try_get("client_id")?,
			map_name: row.try_get("mapname")?,
			waypoint: row.try_get("way_id")?,
			time: row.try_get("way_time")?,
			created_at: row.try_get("time_add")?,
			updated_at: row.try_get("time_edit")?,
			demo: decode_demo(row.try_get("demo")?),
		})
	}
}

/// Older versions of the plugin stored the string `None` for runs without a
/// demo, so unusable names are treated as missing demos.
pub(super) fn decode_demo(column: Option<String>) -> Option<DemoFile>
{
	let name = column?;

	if name.is_empty() || name == "None" {
		return None;
	}

	name.parse::<DemoFile>()
		.inspect_err(|error| warn!(%error, "ignoring stored demo"))
		.ok()
}

/// The result of comparing a completed run against the player's best time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonalBest
{
	/// The player had no time on this waypoint yet.
	First,

	/// The run beat the player's previous best.
	Improved
	{
		previous: RunTime,

		/// The demo of the previous best, which is now obsolete.
		replaced_demo: Option<DemoFile>,
	},

	/// The run was not faster than `best`.
	NotImproved { best: RunTime },
}

impl PersonalBest
{
	/// Whether the run is now the player's best time.
	pub fn is_new_personal_best(&self) -> bool
	{
		!matches!(self, Self::NotImproved { .. })
	}

	pub fn replaced_demo(&self) -> Option<&DemoFile>
	{
		match self {
			Self::Improved { replaced_demo, .. } => replaced_demo.as_ref(),
			Self::First | Self::NotImproved { .. } => None,
		}
	}
}

/// The records removed by [`RecordTracker::delete_records()`].
///
/// [`RecordTracker::delete_records()`]: super::RecordTracker::delete_records
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeletedRecords
{
	pub count: u64,

	/// Demos of the removed records; these should be deleted too.
	pub demos: Vec<DemoFile>,
}
