use super::{Jumper, current_map};
use crate::game::{Client, Event, Host, Team};
use crate::records::{PersonalBest, RunTime, WaypointId};

impl Jumper
{
	/// Handles a game event.
	#[instrument(level = "debug", skip(self, host))]
	pub async fn on_event<H>(&mut self, host: &mut H, event: Event)
	where
		H: Host + ?Sized,
	{
		match event {
			Event::RunStart { client } => self.demos.start_run(host, &client),
			Event::RunStop { client, waypoint, time } => {
				self.on_run_stop(host, &client, waypoint, time).await;
			},
			Event::RunCancel { client }
			| Event::Disconnect { client }
			| Event::TeamChange { client, team: Team::Spectator } => {
				self.demos.abort_run(host, &client);
			},
			Event::TeamChange { .. } => {},
			Event::RoundStart => {
				self.demos.abort_all(host);
				self.maps.refresh(&self.maps_api).await;
			},
		}
	}

	async fn on_run_stop<H>(&mut self, host: &mut H, client: &Client, waypoint: WaypointId, time: RunTime)
	where
		H: Host + ?Sized,
	{
		let demo = self.demos.stop_run(host, client);

		let Some(map_name) = current_map(host) else {
			if let Some(demo) = demo {
				self.demos.discard(&*host, &demo);
			}

			return;
		};

		let outcome = self
			.records
			.evaluate_personal_best(client.player_id, &map_name)
			.waypoint(waypoint)
			.time(time)
			.maybe_demo(demo.as_ref())
			.exec()
			.await;

		let outcome = match outcome {
			Ok(outcome) => outcome,
			Err(error) => {
				error!(%error, client.name = %client.name, "failed to store run");

				if let Some(demo) = demo {
					self.demos.discard(&*host, &demo);
				}

				return;
			},
		};

		if let PersonalBest::NotImproved { best } = outcome {
			debug!(%best, %time, "not a personal best");
			host.message(client, "^7You can do better! Try again!");

			if let Some(demo) = demo {
				self.demos.discard(&*host, &demo);
			}

			return;
		}

		if let Some(replaced) = outcome.replaced_demo() {
			self.demos.discard(&*host, replaced);
		}

		let summary = format!("^4{map_name} ^3[way:^7{waypoint}^3] ^7| ^2{time}");

		match self.records.is_map_record(&map_name, waypoint, time).await {
			Ok(true) => {
				info!(client.name = %client.name, map = %map_name, %waypoint, %time, "new map record");
				host.say(&format!("^7{} established a new ^1MAP RECORD^7!", client.name));
				host.say(&summary);
			},
			Ok(false) => {
				info!(client.name = %client.name, map = %map_name, %waypoint, %time, "new personal record");
				host.message(client, "^7You established a new ^3PERSONAL RECORD ^7on this map!");
				host.message(client, &summary);
			},
			Err(error) => {
				error!(%error, "could not check for map record");
			},
		}
	}
}
