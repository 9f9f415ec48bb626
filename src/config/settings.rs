use super::Section;
use crate::players::Level;

/// The `[settings]` section.
#[derive(Debug)]
pub struct Settings
{
	/// Automatically record a server-side demo of every run.
	pub demo_record: bool,

	/// The minimum level needed to delete someone else's records.
	pub min_level_delete: Level,
}

impl Default for Settings
{
	fn default() -> Self
	{
		Self { demo_record: false, min_level_delete: Level::SENIOR_ADMIN }
	}
}

impl Settings
{
	pub(super) fn from_section(section: &Section<'_>) -> Self
	{
		let defaults = Self::default();

		Self {
			demo_record: section.get("demo-record", || defaults.demo_record),
			min_level_delete: section.get("min-level-delete", || defaults.min_level_delete),
		}
	}
}
