use crate::players::{Level, PlayerId};

/// The slot a client occupies on the server, as used by console commands.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
#[debug("ClientSlot({_0})")]
pub struct ClientSlot(u8);

/// A connected client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client
{
	pub slot: ClientSlot,
	pub player_id: PlayerId,
	pub name: String,
	pub level: Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team
{
	Red,
	Blue,
	Free,
	Spectator,
}
