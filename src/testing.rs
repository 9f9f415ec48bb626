//! Test doubles for the game server.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::demos::DemoFile;
use crate::game::{Admin, Client, Cvars, Host, HostResult, SUPPORTED_GAME};
use crate::players::{Level, PlayerId};

pub(crate) fn client(slot: u8, player_id: i64, name: &str) -> Client
{
	Client {
		slot: slot.into(),
		player_id: PlayerId::new(player_id),
		name: name.to_owned(),
		level: Level::USER,
	}
}

pub(crate) fn admin(slot: u8, player_id: i64, name: &str, level: Level) -> Client
{
	Client { level, ..client(slot, player_id, name) }
}

/// A game server that remembers everything the plugin told it.
///
/// `startserverdemo` is acknowledged like a real server would, and if a demo
/// directory is configured an empty demo file is created there.
#[derive(Debug)]
pub(crate) struct FakeHost
{
	game_name: String,
	map_name: String,
	cvars: HashMap<String, String>,
	clients: Vec<Client>,
	player_names: HashMap<PlayerId, String>,
	admin: Option<FakeAdmin>,
	console_response: Option<String>,
	console_log: Vec<String>,
	said: Vec<String>,
	messages: Vec<(Client, String)>,
	demo_directory: Option<PathBuf>,
	demo_count: u32,
}

#[derive(Debug, Default)]
pub(crate) struct FakeAdmin
{
	clients: Vec<Client>,
	registered: Vec<(String, Option<String>, Level)>,
}

impl FakeHost
{
	pub(crate) fn new() -> Self
	{
		Self {
			game_name: SUPPORTED_GAME.to_owned(),
			map_name: "ut4_skyjumps".to_owned(),
			cvars: HashMap::new(),
			clients: Vec::new(),
			player_names: HashMap::new(),
			admin: Some(FakeAdmin::default()),
			console_response: None,
			console_log: Vec::new(),
			said: Vec::new(),
			messages: Vec::new(),
			demo_directory: None,
			demo_count: 0,
		}
	}

	pub(crate) fn with_game(mut self, game_name: &str) -> Self
	{
		game_name.clone_into(&mut self.game_name);
		self
	}

	pub(crate) fn with_map(mut self, map_name: &str) -> Self
	{
		map_name.clone_into(&mut self.map_name);
		self
	}

	pub(crate) fn without_admin(mut self) -> Self
	{
		self.admin = None;
		self
	}

	pub(crate) fn with_cvar(mut self, name: &str, value: &str) -> Self
	{
		self.set_cvar(name, value);
		self
	}

	pub(crate) fn set_cvar(&mut self, name: &str, value: &str)
	{
		self.cvars.insert(name.to_owned(), value.to_owned());
	}

	/// Answer every console command with `response`.
	pub(crate) fn with_console_response(mut self, response: &str) -> Self
	{
		self.console_response = Some(response.to_owned());
		self
	}

	/// Create demo files below `directory` when asked to record.
	pub(crate) fn with_demo_directory(mut self, directory: PathBuf) -> Self
	{
		self.demo_directory = Some(directory);
		self
	}

	/// Connect `client`; the admin framework will also find them.
	pub(crate) fn with_client(mut self, client: Client) -> Self
	{
		self.player_names.insert(client.player_id, client.name.clone());

		if let Some(admin) = self.admin.as_mut() {
			admin.clients.push(client.clone());
		}

		self.clients.push(client);
		self
	}

	/// A player that is known but not connected.
	pub(crate) fn with_player_name(mut self, player_id: i64, name: &str) -> Self
	{
		self.player_names.insert(PlayerId::new(player_id), name.to_owned());
		self
	}

	pub(crate) fn console_log(&self) -> &[String]
	{
		&self.console_log
	}

	pub(crate) fn clear_console_log(&mut self)
	{
		self.console_log.clear();
	}

	/// Everything sent to all players.
	pub(crate) fn said(&self) -> &[String]
	{
		&self.said
	}

	/// Everything sent privately to `client`.
	pub(crate) fn messages_to(&self, client: &Client) -> Vec<&str>
	{
		self.messages
			.iter()
			.filter(|(recipient, _)| recipient.slot == client.slot)
			.map(|(_, text)| text.as_str())
			.collect()
	}

	pub(crate) fn registered_commands(&self) -> &[(String, Option<String>, Level)]
	{
		self.admin.as_ref().map_or(&[][..], |admin| admin.registered.as_slice())
	}

	pub(crate) fn demo_path(&self, demo: &DemoFile) -> Option<PathBuf>
	{
		self.demo_directory.as_ref().map(|directory| directory.join(demo.as_path()))
	}

	pub(crate) fn demo_exists(&self, demo: &DemoFile) -> bool
	{
		self.demo_path(demo).is_some_and(|path| path.is_file())
	}

	fn record_demo(&mut self, slot: &str) -> String
	{
		self.demo_count += 1;

		let file = format!("serverdemos/demo_{slot}_{}.urtdemo", self.demo_count);

		if let Some(directory) = &self.demo_directory {
			let path = directory.join(&file);

			if let Some(parent) = path.parent() {
				fs::create_dir_all(parent).unwrap();
			}

			fs::write(path, b"demo").unwrap();
		}

		format!("startserverdemo: recording player{slot} to {file}")
	}
}

impl Cvars for FakeHost
{
	fn cvar(&self, name: &str) -> HostResult<Option<String>>
	{
		Ok(self.cvars.get(name).cloned())
	}
}

impl Host for FakeHost
{
	fn game_name(&self) -> &str
	{
		&self.game_name
	}

	fn map_name(&self) -> &str
	{
		&self.map_name
	}

	fn console(&mut self, command: &str) -> HostResult<String>
	{
		self.console_log.push(command.to_owned());

		if let Some(response) = &self.console_response {
			return Ok(response.clone());
		}

		match command.strip_prefix("startserverdemo ") {
			Some(slot) => Ok(self.record_demo(slot)),
			None => Ok(String::new()),
		}
	}

	fn say(&mut self, text: &str)
	{
		self.said.push(text.to_owned());
	}

	fn message(&mut self, client: &Client, text: &str)
	{
		self.messages.push((client.clone(), text.to_owned()));
	}

	fn clients(&self) -> Vec<Client>
	{
		self.clients.clone()
	}

	fn player_name(&self, player_id: PlayerId) -> Option<String>
	{
		self.player_names.get(&player_id).cloned()
	}

	fn admin(&mut self) -> Option<&mut dyn Admin>
	{
		self.admin.as_mut().map(|admin| admin as &mut dyn Admin)
	}
}

impl Admin for FakeAdmin
{
	fn register_command(&mut self, name: &str, alias: Option<&str>, level: Level)
	{
		self.registered.push((name.to_owned(), alias.map(str::to_owned), level));
	}

	fn find_client(&mut self, query: &str, _requester: &Client) -> Option<Client>
	{
		if let Some(player_id) = query.strip_prefix('@') {
			let player_id = player_id.parse::<PlayerId>().ok()?;

			return self.clients.iter().find(|client| client.player_id == player_id).cloned();
		}

		let query = query.to_lowercase();
		let mut matches = self
			.clients
			.iter()
			.filter(|client| client.name.to_lowercase().contains(&query));

		match (matches.next(), matches.next()) {
			(Some(client), None) => Some(client.clone()),
			_ => None,
		}
	}
}
