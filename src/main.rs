//! Command line maintenance tool for the jumper plugin.

/*
 * Jumper - jump-run records for Urban Terror.
 * Copyright (C) 2024  Jumper contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see https://www.gnu.org/licenses.
 */

#![allow(clippy::print_stdout, reason = "this is a CLI")]

use std::path::PathBuf;

use color_eyre::eyre::{self, OptionExt, WrapErr};
use jumper::demos::{DemoFile, DemoStorage, DiscardError};
use jumper::game::{Cvars, HostResult};
use jumper::maps::{MapInfoCache, MapLookup, MapName};
use jumper::players::PlayerId;
use jumper::records::{JumpRecord, RecordTracker};
use jumper::{Config, Database};

mod cli;
mod telemetry;

#[tokio::main]
async fn main() -> eyre::Result<()>
{
	color_eyre::install()?;

	if let Err(error) = dotenvy::dotenv() {
		if !error.not_found() {
			return Err(error).wrap_err("failed to load `.env` file");
		}
	}

	let args = cli::args();
	let _guard = telemetry::init(args.log_directory.as_deref())?;

	let mut config = match args.config_path.as_deref() {
		Some(path) => Config::load_from_file(path)?,
		None => Config::default(),
	};

	if let Some(url) = args.database_url {
		config.database.url = Some(url);
	}

	match args.command {
		cli::Command::Migrate => {
			let database = connect(&config).await?;
			database.migrate().await?;
			println!("jumpruns table is up to date");
			database.close().await;
		},
		cli::Command::Records { player, map } => {
			let database = connect(&config).await?;
			let records = RecordTracker::new(database.clone()).list_records(player, &map).await?;

			print_records(&format!("records of @{player} on {map}"), &records);
			database.close().await;
		},
		cli::Command::MapRecords { map } => {
			let database = connect(&config).await?;
			let records = RecordTracker::new(database.clone()).list_map_bests(&map).await?;

			print_records(&format!("map records on {map}"), &records);
			database.close().await;
		},
		cli::Command::DeleteRecords { player, map, base_path, home_path, mod_dir } => {
			let cvars = StaticCvars { fs_game: mod_dir, fs_basepath: base_path, fs_homepath: home_path };
			let database = connect(&config).await?;

			delete_records(&database, &cvars, player, &map).await?;
			database.close().await;
		},
		cli::Command::MapInfo { query } => {
			map_info(&config, query.as_deref()).await?;
		},
	}

	Ok(())
}

async fn connect(config: &Config) -> eyre::Result<Database>
{
	let options = config
		.database
		.connect_options()
		.ok_or_eyre("no database configured; set `DATABASE_URL` or `[database] url`")?;

	Database::connect(options).await.wrap_err("failed to connect to database")
}

fn print_records(title: &str, records: &[JumpRecord])
{
	if records.is_empty() {
		println!("no {title}");
		return;
	}

	println!("{title}:");

	for record in records {
		println!(
			"  way {:>3}  {:>14}  @{:<8}  since {}",
			record.waypoint,
			record.time,
			record.player_id,
			record.updated_at.date(),
		);
	}
}

async fn delete_records(
	database: &Database,
	cvars: &StaticCvars,
	player: PlayerId,
	map: &MapName,
) -> eyre::Result<()>
{
	let deleted = RecordTracker::new(database.clone()).delete_records(player, map).await?;

	println!("deleted {} record(s) of @{player} on {map}", deleted.count);

	let failures = discard_demos(cvars, &deleted.demos);

	if !failures.is_empty() {
		eyre::bail!("failed to delete {} of {} demo(s)", failures.len(), deleted.demos.len());
	}

	Ok(())
}

/// Deletes the demos of deleted records and returns those that could not be
/// deleted.
///
/// Demos that no longer exist are not failures.
fn discard_demos<'a>(cvars: &StaticCvars, demos: &'a [DemoFile]) -> Vec<(&'a DemoFile, DiscardError)>
{
	let mut storage = DemoStorage::new();
	let mut failures = Vec::new();

	for demo in demos {
		match storage.discard(cvars, demo) {
			Ok(path) => println!("deleted {}", path.display()),
			Err(DiscardError::NotFound { file }) => println!("{file} was already gone"),
			Err(error) => {
				tracing::error!(%error, %demo, "failed to delete demo");
				failures.push((demo, error));
			},
		}
	}

	failures
}

async fn map_info(config: &Config, query: Option<&str>) -> eyre::Result<()>
{
	let client = config.maps_api.client()?;
	let mut maps = MapInfoCache::new();

	if !maps.refresh(&client).await {
		eyre::bail!("could not fetch map list from {}", client.url());
	}

	let Some(query) = query else {
		for info in maps.iter() {
			println!("{:<32} {}", info.file, info.name);
		}

		println!("{} maps", maps.len());
		return Ok(());
	};

	let file = match maps.lookup(query) {
		MapLookup::Found(file) => file,
		MapLookup::Candidates(candidates) if candidates.is_empty() => {
			eyre::bail!("no map matches {query:?}");
		},
		MapLookup::Candidates(candidates) => {
			println!("{query:?} is ambiguous; did you mean one of these?");

			for candidate in candidates.iter().take(10) {
				println!("  {candidate}");
			}

			return Ok(());
		},
	};

	let info = maps.get(&file).ok_or_eyre("map disappeared from the cache")?;

	println!("{} ({})", info.name, info.file);
	println!("  mapper:   {}", info.author.as_deref().unwrap_or("unknown"));

	if let Some(released_on) = info.released_on {
		println!("  released: {released_on}");
	}

	if info.level > 0 {
		println!("  level:    {}/100", info.level);
	}

	Ok(())
}

/// Game directories given on the command line, in place of a running server.
#[derive(Debug)]
struct StaticCvars
{
	fs_game: PathBuf,
	fs_basepath: Option<PathBuf>,
	fs_homepath: Option<PathBuf>,
}

impl Cvars for StaticCvars
{
	fn cvar(&self, name: &str) -> HostResult<Option<String>>
	{
		let value = match name {
			"fs_game" => Some(&self.fs_game),
			"fs_basepath" => self.fs_basepath.as_ref(),
			"fs_homepath" => self.fs_homepath.as_ref(),
			_ => None,
		};

		Ok(value.map(|path| path.display().to_string()))
	}
}
