//! The chat commands provided by the plugin.
//!
//! Which commands are available, their aliases and the level required to use
//! them is configured in the `[commands]` section; see [`CommandsConfig`].
//! The commands themselves are implemented by [`Jumper`].
//!
//! [`Jumper`]: crate::Jumper

use std::str::FromStr;

use crate::config::CommandsConfig;
use crate::game::{Client, Host};
use crate::players::Level;

/// One of the plugin's commands.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName
{
	/// `!jmprecord [<client>]`: list a client's records on the current map.
	#[display("jmprecord")]
	JmpRecord,

	/// `!jmpmaprecord`: list the map records of the current map.
	#[display("jmpmaprecord")]
	JmpMapRecord,

	/// `!jmpdelrecord [<client>]`: delete a client's records on the current
	/// map.
	#[display("jmpdelrecord")]
	JmpDelRecord,

	/// `!jmpmapinfo [<map>]`: show what UrTJumpers knows about a map.
	#[display("jmpmapinfo")]
	JmpMapInfo,
}

#[derive(Debug, Display, Error)]
#[display("unknown command {_0:?}")]
pub struct UnknownCommand(#[error(not(source))] String);

impl CommandName
{
	pub const ALL: [Self; 4] = [Self::JmpRecord, Self::JmpMapRecord, Self::JmpDelRecord, Self::JmpMapInfo];

	pub const fn as_str(&self) -> &'static str
	{
		match self {
			Self::JmpRecord => "jmprecord",
			Self::JmpMapRecord => "jmpmaprecord",
			Self::JmpDelRecord => "jmpdelrecord",
			Self::JmpMapInfo => "jmpmapinfo",
		}
	}
}

impl FromStr for CommandName
{
	type Err = UnknownCommand;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		Self::ALL
			.into_iter()
			.find(|name| name.as_str().eq_ignore_ascii_case(value.trim()))
			.ok_or_else(|| UnknownCommand(value.to_owned()))
	}
}

/// A command registered with the admin framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredCommand
{
	pub name: CommandName,
	pub alias: Option<String>,

	/// The minimum level required to use the command.
	pub level: Level,
}

/// The commands enabled by the configuration.
#[derive(Debug, Default)]
pub struct CommandRegistry
{
	commands: Vec<RegisteredCommand>,
}

impl CommandRegistry
{
	/// Builds the registry from the `[commands]` section.
	///
	/// Entries for unknown commands are logged and skipped.
	pub fn from_config(config: &CommandsConfig) -> Self
	{
		let mut commands = Vec::<RegisteredCommand>::new();

		for (key, &level) in &config.levels {
			let (name, alias) = match key.split_once('-') {
				Some((name, alias)) => (name, Some(alias.trim())),
				None => (key.as_str(), None),
			};

			let name = match name.parse::<CommandName>() {
				Ok(name) => name,
				Err(error) => {
					warn!(%error, %key, "skipping command");
					continue;
				},
			};

			if commands.iter().any(|command| command.name == name) {
				warn!(%key, "command configured more than once; skipping");
				continue;
			}

			let alias = alias.filter(|alias| !alias.is_empty()).map(str::to_lowercase);

			commands.push(RegisteredCommand { name, alias, level });
		}

		Self { commands }
	}

	pub fn iter(&self) -> impl Iterator<Item = &RegisteredCommand>
	{
		self.commands.iter()
	}

	pub fn len(&self) -> usize
	{
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool
	{
		self.commands.is_empty()
	}

	/// Finds the command invoked as `name`, which may be an alias.
	pub fn resolve(&self, name: &str) -> Option<&RegisteredCommand>
	{
		let name = name.trim().trim_start_matches(['!', '@', '&']);

		self.commands.iter().find(|command| {
			command.name.as_str().eq_ignore_ascii_case(name)
				|| command.alias.as_deref().is_some_and(|alias| alias.eq_ignore_ascii_case(name))
		})
	}
}

/// A client using a command.
#[derive(Debug, Clone)]
pub struct Invocation
{
	/// The name the command was invoked with.
	pub command: String,

	/// Everything after the command name.
	pub args: String,

	pub client: Client,

	/// Whether replies should be sent to everyone instead of just the client.
	pub loud: bool,
}

impl Invocation
{
	/// The arguments, or `None` if there are none.
	pub fn args(&self) -> Option<&str>
	{
		Some(self.args.trim()).filter(|args| !args.is_empty())
	}

	/// Replies to everyone or only the client, as requested by the client.
	pub fn reply<H>(&self, host: &mut H, text: &str)
	where
		H: Host + ?Sized,
	{
		if self.loud {
			host.say(text);
		} else {
			host.message(&self.client, text);
		}
	}

	/// Replies only to the client.
	pub fn reply_private<H>(&self, host: &mut H, text: &str)
	where
		H: Host + ?Sized,
	{
		host.message(&self.client, text);
	}
}
