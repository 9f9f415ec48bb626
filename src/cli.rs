use std::path::{Path, PathBuf};

use jumper::maps::MapName;
use jumper::players::PlayerId;
use url::Url;

pub(crate) fn args() -> Args
{
	<Args as clap::Parser>::parse()
}

/// Maintenance tool for the jumper plugin's records.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args
{
	/// Path to the plugin's configuration file
	#[arg(long = "config", global = true, env = "JUMPER_CONFIG")]
	pub config_path: Option<Box<Path>>,

	/// Overrides the database URL from the configuration file
	#[arg(long, global = true, env = "DATABASE_URL")]
	pub database_url: Option<Url>,

	/// Also write JSON logs to daily files in this directory
	#[arg(long, global = true, env = "JUMPER_LOG_DIR")]
	pub log_directory: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Command
{
	/// Create or update the `jumpruns` table
	Migrate,

	/// List a player's records on a map
	Records
	{
		/// The player's ID, e.g. `@42`
		#[arg(long)]
		player: PlayerId,

		/// The map's BSP name
		#[arg(long)]
		map: MapName,
	},

	/// List the record of every waypoint on a map
	MapRecords
	{
		/// The map's BSP name
		#[arg(long)]
		map: MapName,
	},

	/// Delete a player's records on a map, including their demos
	DeleteRecords
	{
		/// The player's ID, e.g. `@42`
		#[arg(long)]
		player: PlayerId,

		/// The map's BSP name
		#[arg(long)]
		map: MapName,

		/// The game server's installation directory (`fs_basepath`)
		#[arg(long)]
		base_path: Option<PathBuf>,

		/// The game server's home directory (`fs_homepath`)
		#[arg(long)]
		home_path: Option<PathBuf>,

		/// The mod directory (`fs_game`)
		#[arg(long, default_value = "q3ut4")]
		mod_dir: PathBuf,
	},

	/// Look up a map in the UrTJumpers map list
	MapInfo
	{
		/// The map's name, or part of it; lists every map if omitted
		query: Option<String>,
	},
}
