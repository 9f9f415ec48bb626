use bytes::Bytes;

/// Errors that can occur when talking to the maps API.
#[derive(Debug, Display, Error, From)]
#[display("UrTJumpers API error: {_variant}")]
pub enum ApiError
{
	/// The configured URL is not a valid URL.
	#[display("invalid url")]
	InvalidUrl(url::ParseError),

	/// The request could not be sent, or the API responded with an error
	/// status.
	#[display("failed to make http request")]
	Http(reqwest::Error),

	/// The response body could not be read.
	#[display("failed to buffer response body")]
	#[from(ignore)]
	BufferResponseBody(reqwest::Error),

	/// The response body was not the JSON we expected.
	#[display("failed to deserialize map list")]
	#[from(ignore)]
	DeserializeResponse
	{
		#[error(source)]
		error: serde_json::Error,

		#[debug("{} bytes", body.len())]
		body: Bytes,
	},
}
