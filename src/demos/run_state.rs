use super::DemoFile;

/// What the plugin knows about a client's current run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunState
{
	pub in_progress: bool,

	/// The demo currently being recorded for this run.
	pub active_demo: Option<DemoFile>,
}
