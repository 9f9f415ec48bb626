use super::{Client, Team};
use crate::records::{RunTime, WaypointId};

/// Something that happened on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event
{
	/// A client started a timed run.
	RunStart { client: Client },

	/// A client reached the end of a timed run.
	RunStop
	{
		client: Client,
		waypoint: WaypointId,
		time: RunTime,
	},

	/// A client's run was aborted, e.g. by dying or using `!goto`.
	RunCancel { client: Client },

	TeamChange { client: Client, team: Team },

	Disconnect { client: Client },

	RoundStart,
}

impl Event
{
	/// The client this event is about, if any.
	pub fn client(&self) -> Option<&Client>
	{
		match self {
			Self::RunStart { client }
			| Self::RunStop { client, .. }
			| Self::RunCancel { client }
			| Self::TeamChange { client, .. }
			| Self::Disconnect { client } => Some(client),
			Self::RoundStart => None,
		}
	}
}
