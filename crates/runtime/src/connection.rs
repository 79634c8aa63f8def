//! HTTP command execution against a WebDriver endpoint.
//!
//! Every command is a plain HTTP request; responses are unwrapped from the
//! `{"value": ...}` envelope and W3C error payloads are decoded into
//! [`Error`] variants.

use std::time::Duration;

use aum_protocol::{Envelope, WireError};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// Command executor bound to one hub endpoint.
#[derive(Debug, Clone)]
pub struct Connection {
	client: reqwest::Client,
	base: Url,
}

impl Connection {
	/// Creates a connection to `endpoint`, e.g. `http://hub:4444/wd/hub`.
	///
	/// `request_timeout` bounds every single HTTP exchange, including file
	/// transfers.
	pub fn new(endpoint: &str, request_timeout: Duration) -> Result<Self> {
		let base = parse_base(endpoint)?;
		let client = reqwest::Client::builder().timeout(request_timeout).build()?;
		Ok(Self { client, base })
	}

	pub fn base(&self) -> &Url {
		&self.base
	}

	pub async fn get(&self, path: &str) -> Result<Value> {
		self.execute(Method::GET, path, None).await
	}

	pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
		let body = serde_json::to_value(body)?;
		self.execute(Method::POST, path, Some(body)).await
	}

	pub async fn delete(&self, path: &str) -> Result<Value> {
		self.execute(Method::DELETE, path, None).await
	}

	async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
		let url = self.endpoint(path)?;
		debug!(target = "aum", %method, url = %url, "webdriver command");

		let mut request = self.client.request(method, url);
		if let Some(body) = body {
			request = request.json(&body);
		}

		let response = request.send().await?;
		let status = response.status();
		let text = response.text().await?;
		decode_response(status, &text)
	}

	fn endpoint(&self, path: &str) -> Result<Url> {
		self.base.join(path.trim_start_matches('/')).map_err(|e| Error::InvalidUrl {
			url: format!("{}{}", self.base, path),
			reason: e.to_string(),
		})
	}
}

/// Parses the hub URL so that relative command paths append to it.
fn parse_base(endpoint: &str) -> Result<Url> {
	let mut base = Url::parse(endpoint).map_err(|e| Error::InvalidUrl {
		url: endpoint.to_string(),
		reason: e.to_string(),
	})?;

	if base.cannot_be_a_base() {
		return Err(Error::InvalidUrl {
			url: endpoint.to_string(),
			reason: "not a hierarchical URL".to_string(),
		});
	}

	if !base.path().ends_with('/') {
		let path = format!("{}/", base.path());
		base.set_path(&path);
	}

	Ok(base)
}

/// Unwraps a response body into its `value`, or the matching error.
fn decode_response(status: StatusCode, body: &str) -> Result<Value> {
	if status.is_success() {
		if body.trim().is_empty() {
			return Ok(Value::Null);
		}
		let envelope: Envelope<Value> = serde_json::from_str(body)?;
		return Ok(envelope.value);
	}

	match serde_json::from_str::<Envelope<WireError>>(body) {
		Ok(envelope) => Err(envelope.value.into()),
		Err(_) => Err(Error::UnexpectedStatus {
			status: status.as_u16(),
			body: body.chars().take(512).collect(),
		}),
	}
}
