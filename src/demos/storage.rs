use std::path::{Path, PathBuf};
use std::{fs, io};

use super::DemoFile;
use crate::game::{Cvars, HostError};

/// Error returned by [`DemoStorage::discard()`].
#[derive(Debug, Display, Error)]
#[display("failed to discard demo: {_variant}")]
pub enum DiscardError
{
	#[display("could not read cvar `{name}`")]
	ReadCvar { name: &'static str, source: HostError },

	#[display("cvar `{name}` is not set")]
	MissingCvar { name: &'static str },

	#[display("{file} does not exist in any game directory")]
	NotFound { file: DemoFile },

	#[display("could not remove {path:?}")]
	Remove { path: PathBuf, source: io::Error },
}

/// Finds demo files on the game server's filesystem and deletes them.
///
/// Demos are written to the mod directory (`fs_game`) below either the
/// installation directory (`fs_basepath`) or the user's home directory
/// (`fs_homepath`), depending on the server's permissions. The cvars are read
/// once and remembered afterwards.
#[derive(Debug, Default)]
pub struct DemoStorage
{
	fs_game: Option<PathBuf>,
	fs_basepath: Option<PathBuf>,
	fs_homepath: Option<PathBuf>,
}

impl DemoStorage
{
	pub fn new() -> Self
	{
		Self::default()
	}

	/// Deletes `file` and returns the path it was found at.
	#[instrument(level = "debug", skip(self, cvars), ret(level = "debug"), err(level = "debug"))]
	pub fn discard<C>(&mut self, cvars: &C, file: &DemoFile) -> Result<PathBuf, DiscardError>
	where
		C: Cvars + ?Sized,
	{
		let fs_game = resolve(&mut self.fs_game, cvars, "fs_game")?.to_owned();

		let roots = [
			(&mut self.fs_basepath, "fs_basepath"),
			(&mut self.fs_homepath, "fs_homepath"),
		];

		for (slot, name) in roots {
			let root = match resolve(slot, cvars, name) {
				Ok(root) => root,
				Err(error) => {
					warn!(%error, "skipping demo directory");
					continue;
				},
			};

			let path = root.join(&fs_game).join(file.as_path());

			if !path.is_file() {
				debug!(?path, "demo not found");
				continue;
			}

			return match fs::remove_file(&path) {
				Ok(()) => Ok(path),
				Err(source) => Err(DiscardError::Remove { path, source }),
			};
		}

		Err(DiscardError::NotFound { file: file.clone() })
	}
}

fn resolve<'a, C>(
	slot: &'a mut Option<PathBuf>,
	cvars: &C,
	name: &'static str,
) -> Result<&'a Path, DiscardError>
where
	C: Cvars + ?Sized,
{
	if slot.is_none() {
		let value = cvars
			.cvar(name)
			.map_err(|source| DiscardError::ReadCvar { name, source })?
			.ok_or(DiscardError::MissingCvar { name })?;

		let value = value.trim().trim_end_matches('/');

		if value.is_empty() {
			return Err(DiscardError::MissingCvar { name });
		}

		debug!(cvar = name, value, "resolved demo directory");
		*slot = Some(PathBuf::from(value));
	}

	slot.as_deref().ok_or(DiscardError::MissingCvar { name })
}
