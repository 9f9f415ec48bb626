//! Server-side demos of jump runs.
//!
//! When auto-recording is enabled, a demo is recorded for every run. The demo
//! of a run is only kept if the run becomes the player's personal best; every
//! other demo is deleted as soon as it is clear it is not needed anymore.

use std::collections::HashMap;

use crate::game::{Client, ClientSlot, Cvars, Host};

mod file;
pub use file::{DemoFile, InvalidDemoFile, ParseDemoAckError};

mod storage;
pub use storage::{DemoStorage, DiscardError};

mod run_state;
pub use run_state::RunState;

/// Tracks the run of every client and the demos recorded for them.
#[derive(Debug)]
pub struct DemoLifecycle
{
	auto_record: bool,
	runs: HashMap<ClientSlot, RunState>,
	storage: DemoStorage,
}

impl DemoLifecycle
{
	pub fn new(auto_record: bool) -> Self
	{
		Self { auto_record, runs: HashMap::new(), storage: DemoStorage::new() }
	}

	/// Whether demos are recorded automatically.
	pub fn auto_record(&self) -> bool
	{
		self.auto_record
	}

	pub fn run_state(&self, slot: ClientSlot) -> Option<&RunState>
	{
		self.runs.get(&slot)
	}

	/// A client started a run.
	///
	/// Any demo still open from an earlier run is stopped and deleted first.
	#[instrument(level = "debug", skip_all, fields(client.slot = %client.slot))]
	pub fn start_run<H>(&mut self, host: &mut H, client: &Client)
	where
		H: Host + ?Sized,
	{
		if let Some(previous) = self.runs.remove(&client.slot).and_then(|run| run.active_demo) {
			stop_recording(host, client.slot);
			self.discard(&*host, &previous);
		}

		let active_demo = if self.auto_record { start_recording(host, client) } else { None };

		self.runs.insert(client.slot, RunState { in_progress: true, active_demo });
	}

	/// A client finished a run.
	///
	/// Returns the demo recorded for the run; the caller decides whether it is
	/// kept.
	#[instrument(level = "debug", skip_all, fields(client.slot = %client.slot), ret(level = "debug"))]
	pub fn stop_run<H>(&mut self, host: &mut H, client: &Client) -> Option<DemoFile>
	where
		H: Host + ?Sized,
	{
		let demo = self.runs.remove(&client.slot).and_then(|run| run.active_demo);

		if self.auto_record {
			stop_recording(host, client.slot);
		}

		demo
	}

	/// A client's run ended without a time, e.g. because they cancelled it,
	/// disconnected or joined the spectators.
	#[instrument(level = "debug", skip_all, fields(client.slot = %client.slot))]
	pub fn abort_run<H>(&mut self, host: &mut H, client: &Client)
	where
		H: Host + ?Sized,
	{
		if let Some(demo) = self.runs.remove(&client.slot).and_then(|run| run.active_demo) {
			stop_recording(host, client.slot);
			self.discard(&*host, &demo);
		}
	}

	/// A new round started; every run still in progress is aborted.
	#[instrument(level = "debug", skip_all)]
	pub fn abort_all<H>(&mut self, host: &mut H)
	where
		H: Host + ?Sized,
	{
		let connected = host.clients();
		let mut runs = self.runs.drain().collect::<Vec<_>>();

		runs.sort_by_key(|&(slot, _)| slot);

		for (slot, run) in runs {
			let Some(demo) = run.active_demo else {
				continue;
			};

			if connected.iter().any(|client| client.slot == slot) {
				stop_recording(host, slot);
			}

			self.discard(&*host, &demo);
		}
	}

	/// Deletes a demo that is no longer needed.
	///
	/// Failures are logged; a demo that cannot be deleted only costs disk
	/// space.
	pub fn discard<C>(&mut self, cvars: &C, demo: &DemoFile)
	where
		C: Cvars + ?Sized,
	{
		match self.storage.discard(cvars, demo) {
			Ok(path) => debug!(?path, "deleted demo"),
			Err(error) => error!(%error, "could not delete demo file"),
		}
	}
}

fn start_recording<H>(host: &mut H, client: &Client) -> Option<DemoFile>
where
	H: Host + ?Sized,
{
	let response = match host.console(&format!("startserverdemo {}", client.slot)) {
		Ok(response) => response,
		Err(error) => {
			warn!(%error, client.slot = %client.slot, "could not start demo");
			return None;
		},
	};

	match DemoFile::from_ack(&response) {
		Ok(demo) => {
			debug!(%demo, client.slot = %client.slot, "recording demo");
			Some(demo)
		},
		Err(error) => {
			warn!(
				%error,
				client.name = %client.name,
				client.id = %client.player_id,
				"could not retrieve demo filename"
			);
			None
		},
	}
}

fn stop_recording<H>(host: &mut H, slot: ClientSlot)
where
	H: Host + ?Sized,
{
	if let Err(error) = host.console(&format!("stopserverdemo {slot}")) {
		warn!(%error, client.slot = %slot, "could not stop demo");
	}
}

#[cfg(test)]
mod tests
{
	use std::fs;

	use tempfile::TempDir;

	use super::*;
	use crate::testing::{self, FakeHost};

	fn host(base: &TempDir) -> FakeHost
	{
		fs::create_dir_all(base.path().join("q3ut4/serverdemos")).unwrap();

		FakeHost::new()
			.with_cvar("fs_game", "q3ut4")
			.with_cvar("fs_basepath", &base.path().display().to_string())
			.with_cvar("fs_homepath", &base.path().display().to_string())
			.with_demo_directory(base.path().join("q3ut4"))
	}

	#[test]
	fn records_demo_on_start()
	{
		let base = TempDir::new().unwrap();
		let mut host = host(&base);
		let client = testing::client(0, 1, "Fenix");
		let mut demos = DemoLifecycle::new(true);

		demos.start_run(&mut host, &client);

		let state = demos.run_state(client.slot).unwrap();

		assert!(state.in_progress);
		assert!(state.active_demo.is_some());
		assert_eq!(host.console_log(), ["startserverdemo 0"]);
	}

	#[test]
	fn nothing_is_recorded_when_disabled()
	{
		let base = TempDir::new().unwrap();
		let mut host = host(&base);
		let client = testing::client(0, 1, "Fenix");
		let mut demos = DemoLifecycle::new(false);

		demos.start_run(&mut host, &client);

		assert_eq!(demos.run_state(client.slot).unwrap().active_demo, None);
		assert_eq!(demos.stop_run(&mut host, &client), None);
		assert!(host.console_log().is_empty());
	}

	#[test]
	fn unparsable_acknowledgement_still_tracks_run()
	{
		let base = TempDir::new().unwrap();
		let mut host = host(&base).with_console_response("Client 0 is already being recorded");
		let client = testing::client(0, 1, "Fenix");
		let mut demos = DemoLifecycle::new(true);

		demos.start_run(&mut host, &client);

		let state = demos.run_state(client.slot).unwrap();

		assert!(state.in_progress);
		assert_eq!(state.active_demo, None);
	}

	#[test]
	fn restarting_discards_previous_demo()
	{
		let base = TempDir::new().unwrap();
		let mut host = host(&base);
		let client = testing::client(3, 1, "Fenix");
		let mut demos = DemoLifecycle::new(true);

		demos.start_run(&mut host, &client);
		let first = demos.run_state(client.slot).unwrap().active_demo.clone().unwrap();
		assert!(host.demo_exists(&first));

		demos.start_run(&mut host, &client);
		let second = demos.run_state(client.slot).unwrap().active_demo.clone().unwrap();

		assert!(!host.demo_exists(&first));
		assert!(host.demo_exists(&second));
		assert_eq!(host.console_log(), [
			"startserverdemo 3",
			"stopserverdemo 3",
			"startserverdemo 3",
		]);
	}

	#[test]
	fn stop_hands_demo_to_caller()
	{
		let base = TempDir::new().unwrap();
		let mut host = host(&base);
		let client = testing::client(0, 1, "Fenix");
		let mut demos = DemoLifecycle::new(true);

		demos.start_run(&mut host, &client);

		let demo = demos.stop_run(&mut host, &client).unwrap();

		assert!(host.demo_exists(&demo));
		assert!(demos.run_state(client.slot).is_none());
		assert_eq!(host.console_log().last().map(String::as_str), Some("stopserverdemo 0"));
	}

	#[test]
	fn abort_discards_demo()
	{
		let base = TempDir::new().unwrap();
		let mut host = host(&base);
		let client = testing::client(0, 1, "Fenix");
		let mut demos = DemoLifecycle::new(true);

		demos.start_run(&mut host, &client);
		let demo = demos.run_state(client.slot).unwrap().active_demo.clone().unwrap();

		demos.abort_run(&mut host, &client);

		assert!(!host.demo_exists(&demo));
		assert!(demos.run_state(client.slot).is_none());
	}

	#[test]
	fn round_start_aborts_every_run()
	{
		let base = TempDir::new().unwrap();
		let fenix = testing::client(0, 1, "Fenix");
		let gone = testing::client(1, 2, "Gone");
		let mut host = host(&base).with_client(fenix.clone());
		let mut demos = DemoLifecycle::new(true);

		demos.start_run(&mut host, &fenix);
		demos.start_run(&mut host, &gone);

		let demo = demos.run_state(fenix.slot).unwrap().active_demo.clone().unwrap();
		let gone_demo = demos.run_state(gone.slot).unwrap().active_demo.clone().unwrap();

		host.clear_console_log();
		demos.abort_all(&mut host);

		assert!(!host.demo_exists(&demo));
		assert!(!host.demo_exists(&gone_demo));
		assert!(demos.run_state(fenix.slot).is_none());
		assert!(demos.run_state(gone.slot).is_none());

		// only connected clients can be told to stop recording
		assert_eq!(host.console_log(), ["stopserverdemo 0"]);
	}
}
