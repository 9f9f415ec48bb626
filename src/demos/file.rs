use std::path::{Component, Path};
use std::str::FromStr;
use std::sync::Arc;

/// The file extensions the game server writes demos with.
pub(super) const EXTENSIONS: &[&str] = &["dm_68", "urtdemo"];

/// The name of a server-side demo file, relative to the mod directory.
///
/// This is what the server reports when a recording starts, e.g.
/// `serverdemos/2013_09_07_12-01-33_Fenix_123456.urtdemo`.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
#[debug("{_0:?}")]
pub struct DemoFile(Arc<str>);

#[derive(Debug, Display, Error)]
#[display("invalid demo file name {name:?}: {reason}")]
pub struct InvalidDemoFile
{
	#[error(not(source))]
	name: String,

	#[error(not(source))]
	reason: &'static str,
}

/// Error returned by [`DemoFile::from_ack()`].
#[derive(Debug, Display, Error, From)]
pub enum ParseDemoAckError
{
	#[display("unexpected response to `startserverdemo`: {_0:?}")]
	#[from(ignore)]
	UnexpectedResponse(#[error(not(source))] String),

	#[display("{_0}")]
	InvalidFile(InvalidDemoFile),
}

impl DemoFile
{
	pub fn as_str(&self) -> &str
	{
		&self.0
	}

	pub fn as_path(&self) -> &Path
	{
		Path::new(&*self.0)
	}

	/// Extracts the demo file from the server's acknowledgement of
	/// `startserverdemo`, which looks like
	/// `startserverdemo: recording <player> to <file>`.
	pub fn from_ack(response: &str) -> Result<Self, ParseDemoAckError>
	{
		let unexpected = || ParseDemoAckError::UnexpectedResponse(response.to_owned());

		let (_, file) = response
			.trim()
			.strip_prefix("startserverdemo: recording ")
			.and_then(|rest| rest.rsplit_once(" to "))
			.ok_or_else(unexpected)?;

		if file.is_empty() {
			return Err(unexpected());
		}

		Ok(file.parse()?)
	}
}

impl FromStr for DemoFile
{
	type Err = InvalidDemoFile;

	fn from_str(name: &str) -> Result<Self, Self::Err>
	{
		let invalid = |reason| InvalidDemoFile { name: name.to_owned(), reason };
		let path = Path::new(name);

		if !path
			.extension()
			.and_then(|extension| extension.to_str())
			.is_some_and(|extension| EXTENSIONS.contains(&extension))
		{
			return Err(invalid("unknown extension"));
		}

		// the name is joined onto server directories before deleting it
		if !path.components().all(|component| matches!(component, Component::Normal(_))) {
			return Err(invalid("must be a relative path without `..`"));
		}

		Ok(Self(name.into()))
	}
}

impl_sqlx!(DemoFile => {
	Type as String;
	Encode<'q> as String = |file| file.as_str().to_owned();
	Decode<'r> as String = |name| name.parse::<DemoFile>();
});

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn parses_acknowledgements()
	{
		let file = DemoFile::from_ack(
			"startserverdemo: recording Fenix to serverdemos/2013_09_07_12-01-33_Fenix_123456.urtdemo\n",
		)
		.unwrap();

		assert_eq!(file.as_str(), "serverdemos/2013_09_07_12-01-33_Fenix_123456.urtdemo");
	}

	#[test]
	fn player_names_may_contain_the_separator()
	{
		let file = DemoFile::from_ack("startserverdemo: recording up to no good to demos/run.dm_68")
			.unwrap();

		assert_eq!(file.as_str(), "demos/run.dm_68");
	}

	#[test]
	fn rejects_other_responses()
	{
		assert!(matches!(
			DemoFile::from_ack("Client 3 is not active"),
			Err(ParseDemoAckError::UnexpectedResponse(_))
		));

		assert!(matches!(
			DemoFile::from_ack("startserverdemo: recording Fenix to demo.txt"),
			Err(ParseDemoAckError::InvalidFile(_))
		));
	}

	#[test]
	fn rejects_paths_escaping_the_mod_directory()
	{
		assert!("../../etc/demo.dm_68".parse::<DemoFile>().is_err());
		assert!("/tmp/demo.urtdemo".parse::<DemoFile>().is_err());
		assert!("serverdemos/demo.urtdemo".parse::<DemoFile>().is_ok());
	}
}
