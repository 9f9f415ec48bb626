use super::{Jumper, current_map};
use crate::commands::{CommandName, Invocation, RegisteredCommand};
use crate::game::{Client, Host};
use crate::maps::MapLookup;
use crate::time::Timestamp;

/// How many suggestions `!jmpmapinfo` offers for an ambiguous map name.
const MAX_SUGGESTIONS: usize = 5;

impl Jumper
{
	/// Handles a chat command.
	///
	/// Commands the plugin did not register are ignored.
	#[instrument(
		level = "debug",
		skip_all,
		fields(command = %invocation.command, client.name = %invocation.client.name),
	)]
	pub async fn on_command<H>(&mut self, host: &mut H, invocation: Invocation)
	where
		H: Host + ?Sized,
	{
		let Some(&RegisteredCommand { name, level, .. }) = self.commands.resolve(&invocation.command)
		else {
			debug!("not one of our commands");
			return;
		};

		if invocation.client.level < level {
			invocation.reply_private(
				host,
				&format!("^7You do not have sufficient access to use ^3!{}", invocation.command),
			);
			return;
		}

		match name {
			CommandName::JmpRecord => self.list_records(host, &invocation).await,
			CommandName::JmpMapRecord => self.list_map_records(host, &invocation).await,
			CommandName::JmpDelRecord => self.delete_records(host, &invocation).await,
			CommandName::JmpMapInfo => self.show_map_info(host, &invocation).await,
		}
	}

	/// `!jmprecord [<client>]`
	async fn list_records<H>(&mut self, host: &mut H, invocation: &Invocation)
	where
		H: Host + ?Sized,
	{
		let Some(target) = find_target(host, invocation) else {
			return;
		};

		let Some(map_name) = current_map(host) else {
			return;
		};

		let records = match self.records.list_records(target.player_id, &map_name).await {
			Ok(records) => records,
			Err(error) => {
				error!(%error, "failed to fetch records");
				return;
			},
		};

		if records.is_empty() {
			invocation.reply(host, &format!("^7No record found for {} on map ^4{map_name}", target.name));
			return;
		}

		invocation.reply(
			host,
			&format!(
				"^7Listing record{} for {} on map ^4{map_name}^7:",
				plural(records.len()),
				target.name,
			),
		);

		for record in records {
			invocation.reply(
				host,
				&format!(
					"^3[^7way:^1{}^3] ^7| ^2{} ^7since ^3{}",
					record.waypoint,
					record.time,
					record.updated_at.date(),
				),
			);
		}
	}

	/// `!jmpmaprecord`
	async fn list_map_records<H>(&mut self, host: &mut H, invocation: &Invocation)
	where
		H: Host + ?Sized,
	{
		let Some(map_name) = current_map(host) else {
			return;
		};

		let records = match self.records.list_map_bests(&map_name).await {
			Ok(records) => records,
			Err(error) => {
				error!(%error, "failed to fetch map records");
				return;
			},
		};

		if records.is_empty() {
			invocation.reply(host, &format!("^7No record found for map ^4{map_name}"));
			return;
		}

		invocation.reply(
			host,
			&format!("^7Listing record{} for map ^4{map_name}^7:", plural(records.len())),
		);

		for record in records {
			let name = host
				.player_name(record.player_id)
				.unwrap_or_else(|| format!("@{}", record.player_id));

			invocation.reply(
				host,
				&format!("^7{name} ^3[^7way:^1{}^3] ^7| ^2{}", record.waypoint, record.time),
			);
		}
	}

	/// `!jmpdelrecord [<client>]`
	async fn delete_records<H>(&mut self, host: &mut H, invocation: &Invocation)
	where
		H: Host + ?Sized,
	{
		let Some(target) = find_target(host, invocation) else {
			return;
		};

		let requester = &invocation.client;

		if target.player_id != requester.player_id
			&& (requester.level < self.min_level_delete || requester.level < target.level)
		{
			invocation.reply_private(host, &format!("^7You can't delete ^1{} ^7record(s)", target.name));
			return;
		}

		let Some(map_name) = current_map(host) else {
			return;
		};

		let deleted = match self.records.delete_records(target.player_id, &map_name).await {
			Ok(deleted) => deleted,
			Err(error) => {
				error!(%error, "failed to delete records");
				return;
			},
		};

		if deleted.count == 0 {
			invocation
				.reply_private(host, &format!("^7No record found for {} on map ^4{map_name}", target.name));
			return;
		}

		if self.demos.auto_record() {
			for demo in &deleted.demos {
				self.demos.discard(&*host, demo);
			}
		}

		info!(
			requester = %requester.name,
			target = %target.name,
			map = %map_name,
			count = deleted.count,
			"deleted records",
		);

		invocation.reply_private(
			host,
			&format!(
				"^7Removed ^1{} ^7record{} for {} on map ^4{map_name}",
				deleted.count,
				plural(deleted.count),
				target.name,
			),
		);
	}

	/// `!jmpmapinfo [<map>]`
	async fn show_map_info<H>(&mut self, host: &mut H, invocation: &Invocation)
	where
		H: Host + ?Sized,
	{
		if self.maps.is_empty() {
			self.maps.refresh(&self.maps_api).await;
		}

		if self.maps.is_empty() {
			invocation.reply(host, "Could not contact UrTJumpers API");
			return;
		}

		let file = match invocation.args() {
			None => host.map_name().to_lowercase(),
			Some(query) => match self.maps.lookup(query) {
				MapLookup::Found(file) => file,
				MapLookup::Candidates(candidates) if candidates.is_empty() => {
					invocation.reply(host, &format!("Could not find info for map ^1{query}"));
					return;
				},
				MapLookup::Candidates(candidates) => {
					let suggestions = candidates
						.iter()
						.take(MAX_SUGGESTIONS)
						.map(String::as_str)
						.collect::<Vec<_>>()
						.join(", ");

					invocation.reply_private(host, &format!("do you mean : {suggestions} ?"));
					return;
				},
			},
		};

		let Some(info) = self.maps.get(&file) else {
			invocation.reply(host, &format!("Could not find info for map ^1{file}"));
			return;
		};

		match &info.author {
			Some(author) => invocation.reply(host, &format!("^7{} ^3created by ^7{author}", info.name)),
			None => invocation.reply(host, &format!("^3We don't know the mapper of ^7{}", info.name)),
		}

		if let Some(released_on) = info.released_on {
			invocation.reply(host, &format!("^3Released on ^7{}", Timestamp::from(released_on).date()));
		}

		if info.level > 0 {
			invocation.reply(host, &format!("^3Level: ^7{}/100", info.level));
		}
	}
}

/// The client a command is about: the one named in the arguments, or the
/// requester.
///
/// If the admin framework cannot find a unique client, it tells the requester
/// and `None` is returned.
fn find_target<H>(host: &mut H, invocation: &Invocation) -> Option<Client>
where
	H: Host + ?Sized,
{
	let Some(query) = invocation.args() else {
		return Some(invocation.client.clone());
	};

	let Some(admin) = host.admin() else {
		warn!("admin plugin went away");
		return None;
	};

	admin.find_client(query, &invocation.client)
}

fn plural<N>(count: N) -> &'static str
where
	N: TryInto<u64>,
{
	if count.try_into().is_ok_and(|count| count == 1) { "" } else { "s" }
}
