//! The boundary to the game server and the admin framework.
//!
//! The plugin never talks to the server directly; a host adapter implements
//! [`Host`] (and optionally [`Admin`]) and feeds [`Event`]s and command
//! invocations to the plugin one at a time.

use std::error::Error;

use crate::players::{Level, PlayerId};

mod client;
pub use client::{Client, ClientSlot, Team};

mod event;
pub use event::Event;

/// The only game the plugin supports (Urban Terror 4.2).
pub const SUPPORTED_GAME: &str = "iourt42";

pub type HostResult<T> = Result<T, HostError>;

/// An error reported by the host, e.g. a failed RCON command.
#[derive(Debug, Display)]
#[display("{_0}")]
pub struct HostError(Box<dyn Error + Send + Sync>);

impl HostError
{
	pub fn new(error: impl Into<Box<dyn Error + Send + Sync>>) -> Self
	{
		Self(error.into())
	}
}

impl Error for HostError
{
	fn source(&self) -> Option<&(dyn Error + 'static)>
	{
		Some(&*self.0)
	}
}

/// Read access to server cvars.
pub trait Cvars
{
	/// Returns the value of the cvar `name`, or `None` if it is not set.
	fn cvar(&self, name: &str) -> HostResult<Option<String>>;
}

/// The game server, as seen by the plugin.
pub trait Host: Cvars
{
	/// The game the server is running, e.g. `iourt42`.
	fn game_name(&self) -> &str;

	/// The BSP name of the current map.
	fn map_name(&self) -> &str;

	/// Sends a console command and returns the server's response.
	fn console(&mut self, command: &str) -> HostResult<String>;

	/// Sends a message to everyone.
	fn say(&mut self, text: &str);

	/// Sends a private message to `client`.
	fn message(&mut self, client: &Client, text: &str);

	/// The clients currently connected.
	fn clients(&self) -> Vec<Client>;

	/// The last known name of a player, who might not be connected.
	fn player_name(&self, player_id: PlayerId) -> Option<String>;

	/// The admin framework, if it is loaded.
	fn admin(&mut self) -> Option<&mut dyn Admin>;
}

/// Command registration and client search of the admin framework.
pub trait Admin
{
	/// Makes `!name` (and `!alias`) available to clients of at least `level`.
	fn register_command(&mut self, name: &str, alias: Option<&str>, level: Level);

	/// Searches for a client by name, slot or `@id`.
	///
	/// If the search is not conclusive, the admin framework tells `requester`
	/// and `None` is returned.
	fn find_client(&mut self, query: &str, requester: &Client) -> Option<Client>;
}
