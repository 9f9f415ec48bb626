use std::collections::BTreeMap;

use super::Section;
use crate::players::Level;

/// The `[commands]` section.
///
/// Keys are command names, optionally followed by `-<alias>`, and values are
/// the minimum level required to use the command:
///
/// ```toml
/// [commands]
/// jmprecord-record = "user"
/// jmpdelrecord = 80
/// ```
#[derive(Debug)]
pub struct CommandsConfig
{
	pub levels: BTreeMap<String, Level>,
}

impl Default for CommandsConfig
{
	fn default() -> Self
	{
		let levels = [
			("jmprecord-record", Level::USER),
			("jmpmaprecord-maprecord", Level::USER),
			("jmpdelrecord-delrecord", Level::USER),
			("jmpmapinfo-mapinfo", Level::USER),
		];

		Self { levels: levels.into_iter().map(|(key, level)| (key.to_owned(), level)).collect() }
	}
}

impl CommandsConfig
{
	pub(super) fn from_section(section: &Section<'_>) -> Self
	{
		if section.table.is_none() {
			return Self::default();
		}

		let levels = section
			.entries()
			.filter_map(|(key, value)| match value.clone().try_into::<Level>() {
				Ok(level) => Some((key.to_lowercase(), level)),
				Err(error) => {
					error!(command = %key, %error, "invalid command level; skipping command");
					None
				},
			})
			.collect();

		Self { levels }
	}
}
