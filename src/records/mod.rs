//! Personal and map records.
//!
//! Only the best time of every player on every waypoint is stored; there is
//! no history of runs. A run is a new personal best if it is strictly faster
//! than the stored time, and a map record if no other player has the same or
//! a faster time on the same waypoint.

mod models;
mod time;


pub use self::{
	models::{DeletedRecords, JumpRecord, PersonalBest, WaypointId},
	time::{InvalidRunTime, RunTime},
};
use crate::{
	database::{Database, DatabaseResult},
	demos::DemoFile,
	maps::MapName,
	players::PlayerId,
	time::Timestamp,
};

/// Reads and writes the `jumpruns` table.
#[derive(Debug, Clone)]
pub struct RecordTracker
{
	database: Database,
}

#[bon::bon]
impl RecordTracker
{
	pub fn new(database: Database) -> Self
	{
		Self { database }
	}

	/// Stores `time` if it is the player's first or fastest run on
	/// `waypoint`.
	///
	/// The caller is responsible for deleting the demo returned by
	/// [`PersonalBest::replaced_demo()`].
	#[tracing::instrument(skip(self), ret(level = "debug"), err)]
	#[builder(finish_fn = exec)]
	pub async fn evaluate_personal_best(
		&self,
		#[builder(start_fn)] player_id: PlayerId,
		#[builder(start_fn)] map_name: &MapName,
		waypoint: WaypointId,
		time: RunTime,
		demo: Option<&DemoFile>,
	) -> DatabaseResult<PersonalBest>
	{
		let mut txn = self.database.begin().await?;

		let existing = sqlx::query_as::<_, (RunTime, Option<String>)>(
			"SELECT way_time, demo
			 FROM jumpruns
			 WHERE client_id = ? AND mapname = ? AND way_id = ?",
		)
		.bind(player_id)
		.bind(map_name)
		.bind(waypoint)
		.fetch_optional(&mut *txn)
		.await?;

		let now = Timestamp::now();

		let outcome = match existing {
			None => {
				sqlx::query(
					"INSERT INTO jumpruns (client_id, mapname, way_id, way_time, time_add, time_edit, demo)
					 VALUES (?, ?, ?, ?, ?, ?, ?)",
				)
				.bind(player_id)
				.bind(map_name)
				.bind(waypoint)
				.bind(time)
				.bind(now)
				.bind(now)
				.bind(demo)
				.execute(&mut *txn)
				.await?;

				debug!("stored new jumprun");
				PersonalBest::First
			},
			Some((best, _)) if time >= best => {
				return Ok(PersonalBest::NotImproved { best });
			},
			Some((previous, replaced_demo)) => {
				sqlx::query(
					"UPDATE jumpruns
					 SET way_time = ?, time_edit = ?, demo = ?
					 WHERE client_id = ? AND mapname = ? AND way_id = ?",
				)
				.bind(time)
				.bind(now)
				.bind(demo)
				.bind(player_id)
				.bind(map_name)
				.bind(waypoint)
				.execute(&mut *txn)
				.await?;

				debug!(%previous, "updated jumprun");
				PersonalBest::Improved { previous, replaced_demo: models::decode_demo(replaced_demo) }
			},
		};

		txn.commit().await?;

		Ok(outcome)
	}

	/// Returns whether `time` is the record on `waypoint`.
	///
	/// Must be called after the run was stored. The record belongs to the
	/// first player to reach the fastest time, so the run only counts if
	/// nobody is faster and nobody else already has the same time.
	#[tracing::instrument(skip(self), ret(level = "debug"), err)]
	pub async fn is_map_record(
		&self,
		map_name: &MapName,
		waypoint: WaypointId,
		time: RunTime,
	) -> DatabaseResult<bool>
	{
		let at_least_as_fast = sqlx::query_scalar::<_, i64>(
			"SELECT COUNT(*)
			 FROM jumpruns
			 WHERE mapname = ? AND way_id = ? AND way_time <= ?",
		)
		.bind(map_name)
		.bind(waypoint)
		.bind(time)
		.fetch_one(self.database.pool())
		.await?;

		// the run itself is one of them
		Ok(at_least_as_fast <= 1)
	}

	/// Returns a player's records on a map, ordered by waypoint.
	#[tracing::instrument(skip(self), err)]
	pub async fn list_records(
		&self,
		player_id: PlayerId,
		map_name: &MapName,
	) -> DatabaseResult<Vec<JumpRecord>>
	{
		let records = sqlx::query_as::<_, JumpRecord>(
			"SELECT client_id, mapname, way_id, way_time, time_add, time_edit, demo
			 FROM jumpruns
			 WHERE client_id = ? AND mapname = ?
			 ORDER BY way_id ASC",
		)
		.bind(player_id)
		.bind(map_name)
		.fetch_all(self.database.pool())
		.await?;

		debug!(count = records.len(), "fetched records");

		Ok(records)
	}

	/// Returns the map record of every waypoint of a map, ordered by waypoint.
	///
	/// If several players share the fastest time, the one who set it first
	/// holds the record.
	#[tracing::instrument(skip(self), err)]
	pub async fn list_map_bests(&self, map_name: &MapName) -> DatabaseResult<Vec<JumpRecord>>
	{
		let mut records = sqlx::query_as::<_, JumpRecord>(
			"SELECT r.client_id, r.mapname, r.way_id, r.way_time, r.time_add, r.time_edit, r.demo
			 FROM jumpruns AS r
			 INNER JOIN (
			   SELECT way_id, MIN(way_time) AS best_time
			   FROM jumpruns
			   WHERE mapname = ?
			   GROUP BY way_id
			 ) AS bests ON bests.way_id = r.way_id AND bests.best_time = r.way_time
			 WHERE r.mapname = ?
			 ORDER BY r.way_id ASC, r.time_edit ASC, r.client_id ASC",
		)
		.bind(map_name)
		.bind(map_name)
		.fetch_all(self.database.pool())
		.await?;

		records.dedup_by_key(|record| record.waypoint);

		debug!(count = records.len(), "fetched map records");

		Ok(records)
	}

	/// Deletes all of a player's records on a map.
	#[tracing::instrument(skip(self), ret(level = "debug"), err)]
	pub async fn delete_records(
		&self,
		player_id: PlayerId,
		map_name: &MapName,
	) -> DatabaseResult<DeletedRecords>
	{
		let mut txn = self.database.begin().await?;

		let demos = sqlx::query_scalar::<_, Option<String>>(
			"SELECT demo
			 FROM jumpruns
			 WHERE client_id = ? AND mapname = ?
			 ORDER BY way_id ASC",
		)
		.bind(player_id)
		.bind(map_name)
		.fetch_all(&mut *txn)
		.await?
		.into_iter()
		.filter_map(models::decode_demo)
		.collect::<Vec<_>>();

		let count = sqlx::query("DELETE FROM jumpruns WHERE client_id = ? AND mapname = ?")
			.bind(player_id)
			.bind(map_name)
			.execute(&mut *txn)
			.await?
			.rows_affected();

		txn.commit().await?;

		Ok(DeletedRecords { count, demos })
	}
}
