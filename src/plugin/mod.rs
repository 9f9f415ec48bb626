//! The plugin itself.
//!
//! [`Jumper`] owns every piece of state the plugin needs and is driven by the
//! host: [`Jumper::on_event()`] for game events and [`Jumper::on_command()`]
//! for chat commands. The host delivers one event or command at a time.

use crate::commands::CommandRegistry;
use crate::config::Config;
use crate::database::Database;
use crate::demos::DemoLifecycle;
use crate::game::{Host, SUPPORTED_GAME};
use crate::maps::{MapInfoCache, MapName};
use crate::players::Level;
use crate::records::RecordTracker;

mod commands;
mod events;


/// Errors that prevent the plugin from starting.
#[derive(Debug, Display, Error, From)]
#[display("failed to start jumper plugin: {_variant}")]
pub enum StartupError
{
	/// The server is not running Urban Terror 4.2.
	#[display("unsupported game {_0:?}")]
	#[from(ignore)]
	UnsupportedGame(#[error(not(source))] String),

	/// The admin framework is not loaded, so there is nobody to register
	/// commands with.
	#[display("admin plugin is not available")]
	#[from(ignore)]
	AdminUnavailable,

	#[display("could not create maps API client")]
	MapsApi(urtjumpers::ApiError),
}

/// The jumper plugin.
#[derive(Debug)]
pub struct Jumper
{
	min_level_delete: Level,
	commands: CommandRegistry,
	records: RecordTracker,
	demos: DemoLifecycle,
	maps: MapInfoCache,
	maps_api: urtjumpers::Client,
}

impl Jumper
{
	/// Starts the plugin on `host` and registers its commands.
	///
	/// `database` should already be migrated.
	#[instrument(skip_all, fields(game = host.game_name()), err)]
	pub fn startup<H>(host: &mut H, config: &Config, database: Database) -> Result<Self, StartupError>
	where
		H: Host + ?Sized,
	{
		if host.game_name() != SUPPORTED_GAME {
			return Err(StartupError::UnsupportedGame(host.game_name().to_owned()));
		}

		let maps_api = config.maps_api.client()?;
		let commands = CommandRegistry::from_config(&config.commands);

		let Some(admin) = host.admin() else {
			return Err(StartupError::AdminUnavailable);
		};

		for command in commands.iter() {
			admin.register_command(command.name.as_str(), command.alias.as_deref(), command.level);
		}

		info!(
			commands = commands.len(),
			demo_record = config.settings.demo_record,
			maps_api = %maps_api.url(),
			"jumper plugin started",
		);

		Ok(Self {
			min_level_delete: config.settings.min_level_delete,
			commands,
			records: RecordTracker::new(database),
			demos: DemoLifecycle::new(config.settings.demo_record),
			maps: MapInfoCache::new(),
			maps_api,
		})
	}

	pub fn commands(&self) -> &CommandRegistry
	{
		&self.commands
	}

	pub fn records(&self) -> &RecordTracker
	{
		&self.records
	}

	pub fn demos(&self) -> &DemoLifecycle
	{
		&self.demos
	}

	pub fn map_info(&self) -> &MapInfoCache
	{
		&self.maps
	}
}

/// The current map, if the server reports a name we can store.
fn current_map<H>(host: &H) -> Option<MapName>
where
	H: Host + ?Sized,
{
	match host.map_name().parse::<MapName>() {
		Ok(map_name) => Some(map_name),
		Err(error) => {
			error!(%error, map = host.map_name(), "server reported an invalid map name");
			None
		},
	}
}
