//! Environment-sourced configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file and a `<profile>.env` file. Variables already set in the environment
//! are never overridden by either file.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use aum::{BrokerOptions, LibrarySettings, PatchSize, PollPolicy, ServiceSelectors, SuffixSet};
use aum_runtime::{Hub, SessionOptions};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

pub const ENV_PROFILE: &str = "AUM_ENV";
pub const ENV_HUB: &str = "AUM_SELENIUM_HUB";
pub const ENV_SERVICE: &str = "AUM_UNLOCK_SERVER";
pub const ENV_PATCH_SIZE: &str = "AUM_UNLOCK_PATCH_SIZE";
pub const ENV_MUSIC_DIR: &str = "AUM_MUSIC_DIR";
pub const ENV_DOWNLOAD_DIR: &str = "AUM_DOWNLOAD_DIR";
pub const ENV_LOCKED: &str = "AUM_LOCKED_SUFFIXES";
pub const ENV_UNLOCKED: &str = "AUM_UNLOCKED_SUFFIXES";
pub const ENV_REMOVING: &str = "AUM_REMOVING_SUBSTR";
pub const ENV_HEADLESS: &str = "AUM_HEADLESS";
pub const ENV_FILE_TRANSFER: &str = "AUM_HUB_FILE_TRANSFER";
pub const ENV_POLL_INTERVAL: &str = "AUM_POLL_INTERVAL_SECS";
pub const ENV_POLL_DEADLINE: &str = "AUM_POLL_DEADLINE_SECS";
pub const ENV_ELEMENT_WAIT: &str = "AUM_ELEMENT_WAIT_SECS";

const SET_SEPARATOR: char = ';';

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("environment variable {key} is not set")]
	Missing { key: &'static str },

	#[error("invalid value {value:?} for {key}: {reason}")]
	Invalid {
		key: &'static str,
		value: String,
		reason: String,
	},

	#[error("{key} points to {}, which is not a directory", path.display())]
	NotADirectory { key: &'static str, path: PathBuf },

	#[error("failed to load env file {}: {source}", path.display())]
	EnvFile {
		path: PathBuf,
		#[source]
		source: dotenvy::Error,
	},
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Read access to configuration variables.
pub trait EnvSource {
	fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
	fn var(&self, key: &str) -> Option<String> {
		std::env::var(key).ok()
	}
}

impl EnvSource for HashMap<String, String> {
	fn var(&self, key: &str) -> Option<String> {
		self.get(key).cloned()
	}
}

/// Deployment profile selected by `AUM_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
	Development,
	Testing,
	#[default]
	Production,
	Docker,
}

impl Profile {
	/// Profile named by the environment, plus the raw value when it was not
	/// recognized and the default was used instead.
	pub fn resolve(env: &impl EnvSource) -> (Self, Option<String>) {
		match env.var(ENV_PROFILE) {
			None => (Self::default(), None),
			Some(raw) => match raw.parse() {
				Ok(profile) => (profile, None),
				Err(()) => (Self::default(), Some(raw)),
			},
		}
	}

	pub fn env_file(self) -> String {
		format!("{self}.env")
	}
}

impl FromStr for Profile {
	type Err = ();

	fn from_str(s: &str) -> std::result::Result<Self, ()> {
		match s {
			"development" => Ok(Self::Development),
			"testing" => Ok(Self::Testing),
			"production" => Ok(Self::Production),
			"docker" => Ok(Self::Docker),
			_ => Err(()),
		}
	}
}

impl fmt::Display for Profile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Development => write!(f, "development"),
			Self::Testing => write!(f, "testing"),
			Self::Production => write!(f, "production"),
			Self::Docker => write!(f, "docker"),
		}
	}
}

/// Seeds the process environment from env files.
///
/// `explicit` replaces the upward search for `.env`. The profile file is then
/// looked up in the working directory. Returns the files that were loaded.
pub fn load_env_files(explicit: Option<&Path>) -> Result<Vec<PathBuf>> {
	let mut loaded = Vec::new();

	match explicit {
		Some(path) => {
			dotenvy::from_path(path).map_err(|source| ConfigError::EnvFile {
				path: path.to_path_buf(),
				source,
			})?;
			loaded.push(path.to_path_buf());
		}
		None => match dotenvy::dotenv() {
			Ok(path) => loaded.push(path),
			Err(err) if err.not_found() => {}
			Err(source) => {
				return Err(ConfigError::EnvFile {
					path: PathBuf::from(".env"),
					source,
				});
			}
		},
	}

	let (profile, _) = Profile::resolve(&ProcessEnv);
	let profile_file = PathBuf::from(profile.env_file());
	if profile_file.is_file() {
		dotenvy::from_path(&profile_file).map_err(|source| ConfigError::EnvFile {
			path: profile_file.clone(),
			source,
		})?;
		loaded.push(profile_file);
	}

	Ok(loaded)
}

/// Immutable run configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
	pub profile: Profile,
	pub hub_url: Option<Url>,
	pub service_url: Option<Url>,
	#[serde(serialize_with = "ser_display")]
	pub patch_size: PatchSize,
	pub music_dir: PathBuf,
	pub download_dir: PathBuf,
	#[serde(serialize_with = "ser_suffixes")]
	pub locked_suffixes: SuffixSet,
	#[serde(serialize_with = "ser_suffixes")]
	pub unlocked_suffixes: SuffixSet,
	pub removing_substrings: Vec<String>,
	pub headless: bool,
	pub file_transfer: bool,
	pub poll_interval: Duration,
	pub poll_deadline: Option<Duration>,
	pub element_wait: Duration,
}

impl Config {
	/// Reads and validates every setting.
	///
	/// # Errors
	///
	/// Fails on the first missing or invalid value.
	pub fn from_env(env: &impl EnvSource) -> Result<Self> {
		let (profile, unknown) = Profile::resolve(env);
		if let Some(raw) = unknown {
			warn!(target = "aum", profile = %raw, "unknown profile; using production");
		}
		debug!(target = "aum", %profile, "profile");

		let patch_size = match env.var(ENV_PATCH_SIZE) {
			None => PatchSize::UNBOUNDED,
			Some(raw) => {
				let size: i64 = parse(ENV_PATCH_SIZE, &raw)?;
				PatchSize::new(size).map_err(|_| ConfigError::Invalid {
					key: ENV_PATCH_SIZE,
					value: raw,
					reason: format!("patch size must be non-negative (value: {size})"),
				})?
			}
		};

		Ok(Self {
			profile,
			hub_url: optional_url(env, ENV_HUB)?,
			service_url: optional_url(env, ENV_SERVICE)?,
			patch_size,
			music_dir: existing_dir(env, ENV_MUSIC_DIR)?,
			download_dir: existing_dir(env, ENV_DOWNLOAD_DIR)?,
			locked_suffixes: SuffixSet::new(split_set(env.var(ENV_LOCKED).as_deref())),
			unlocked_suffixes: SuffixSet::new(split_set(env.var(ENV_UNLOCKED).as_deref())),
			removing_substrings: split_set(env.var(ENV_REMOVING).as_deref()),
			headless: flag(env, ENV_HEADLESS, true)?,
			file_transfer: flag(env, ENV_FILE_TRANSFER, true)?,
			poll_interval: seconds(env, ENV_POLL_INTERVAL)?.unwrap_or(Duration::from_secs(1)),
			poll_deadline: seconds(env, ENV_POLL_DEADLINE)?,
			element_wait: seconds(env, ENV_ELEMENT_WAIT)?.unwrap_or(Duration::from_secs(10)),
		})
	}

	/// Echoes the effective settings at info level.
	pub fn log_summary(&self) {
		info!(target = "aum", "profile: {}", self.profile);
		info!(target = "aum", "selenium hub: {}", or_none(self.hub_url.as_ref()));
		info!(target = "aum", "unlock service: {}", or_none(self.service_url.as_ref()));
		if self.patch_size.is_unbounded() {
			info!(target = "aum", "batching: disabled");
		} else {
			info!(target = "aum", "batching: at most {} files per batch", self.patch_size);
		}
		info!(target = "aum", "music directory: {}", self.music_dir.display());
		info!(target = "aum", "download directory: {}", self.download_dir.display());
		info!(target = "aum", "locked suffixes: {}", or_none_set(&self.locked_suffixes));
		info!(target = "aum", "unlocked suffixes: {}", or_none_set(&self.unlocked_suffixes));
		if self.removing_substrings.is_empty() {
			info!(target = "aum", "removing substrings: none");
		} else {
			info!(target = "aum", "removing substrings: {}", self.removing_substrings.join(", "));
		}
	}

	pub fn poll_policy(&self) -> PollPolicy {
		let policy = PollPolicy::new(self.poll_interval);
		match self.poll_deadline {
			Some(deadline) => policy.with_deadline(deadline),
			None => policy,
		}
	}

	pub fn library_settings(&self) -> LibrarySettings {
		LibrarySettings {
			music_dir: self.music_dir.clone(),
			download_dir: self.download_dir.clone(),
			service_url: self.service_url.as_ref().map(Url::to_string),
			locked_suffixes: self.locked_suffixes.clone(),
			unlocked_suffixes: self.unlocked_suffixes.clone(),
			removing_substrings: self.removing_substrings.clone(),
			patch_size: self.patch_size.get() as i64,
			broker: BrokerOptions {
				selectors: ServiceSelectors::default(),
				poll: self.poll_policy(),
			},
		}
	}

	/// The hub to connect to, if one is configured.
	/// Fails unless both the unlock service and the hub are configured.
	pub fn require_unlock_endpoints(&self) -> Result<()> {
		if self.service_url.is_none() {
			return Err(ConfigError::Missing { key: ENV_SERVICE });
		}
		if self.hub_url.is_none() {
			return Err(ConfigError::Missing { key: ENV_HUB });
		}
		Ok(())
	}

	pub fn hub(&self) -> Result<Hub> {
		let url = self.hub_url.as_ref().ok_or(ConfigError::Missing { key: ENV_HUB })?;
		Ok(Hub::new(url.as_str(), self.download_dir.clone()))
	}

	pub fn session_options(&self) -> SessionOptions {
		SessionOptions {
			headless: self.headless,
			file_transfer: self.file_transfer,
			element_wait: self.element_wait,
			..SessionOptions::default()
		}
	}
}

fn parse<T: FromStr>(key: &'static str, raw: &str) -> Result<T>
where
	T::Err: fmt::Display,
{
	raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
		key,
		value: raw.to_string(),
		reason: e.to_string(),
	})
}

fn optional_url(env: &impl EnvSource, key: &'static str) -> Result<Option<Url>> {
	env.var(key).filter(|v| !v.trim().is_empty()).map(|raw| parse(key, &raw)).transpose()
}

fn existing_dir(env: &impl EnvSource, key: &'static str) -> Result<PathBuf> {
	let path = PathBuf::from(env.var(key).ok_or(ConfigError::Missing { key })?);
	if !path.is_dir() {
		return Err(ConfigError::NotADirectory { key, path });
	}
	Ok(path)
}

fn flag(env: &impl EnvSource, key: &'static str, default: bool) -> Result<bool> {
	let Some(raw) = env.var(key) else {
		return Ok(default);
	};
	match raw.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" => Ok(false),
		_ => Err(ConfigError::Invalid {
			key,
			value: raw,
			reason: "expected true or false".to_string(),
		}),
	}
}

fn seconds(env: &impl EnvSource, key: &'static str) -> Result<Option<Duration>> {
	let Some(raw) = env.var(key) else {
		return Ok(None);
	};
	let secs: f64 = parse(key, &raw)?;
	if !secs.is_finite() || secs <= 0.0 {
		return Err(ConfigError::Invalid {
			key,
			value: raw,
			reason: "expected a positive number of seconds".to_string(),
		});
	}
	Duration::try_from_secs_f64(secs).map(Some).map_err(|e| ConfigError::Invalid {
		key,
		value: raw,
		reason: e.to_string(),
	})
}

/// Splits a `;`-separated list, dropping empty entries and repeats.
pub fn split_set(raw: Option<&str>) -> Vec<String> {
	let mut out: Vec<String> = Vec::new();
	for part in raw.unwrap_or_default().split(SET_SEPARATOR) {
		if !part.is_empty() && !out.iter().any(|p| p == part) {
			out.push(part.to_string());
		}
	}
	out
}

fn or_none(value: Option<&impl fmt::Display>) -> String {
	value.map_or_else(|| "none".to_string(), ToString::to_string)
}

fn or_none_set(set: &SuffixSet) -> String {
	if set.is_empty() { "none".to_string() } else { set.to_string() }
}

fn ser_display<T: fmt::Display, S: serde::Serializer>(value: &T, s: S) -> std::result::Result<S::Ok, S::Error> {
	s.collect_str(value)
}

fn ser_suffixes<S: serde::Serializer>(set: &SuffixSet, s: S) -> std::result::Result<S::Ok, S::Error> {
	s.collect_seq(set.iter())
}
