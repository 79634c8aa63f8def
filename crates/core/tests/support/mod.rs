//! Scripted stand-in for the unlock service page.
//!
//! Uploaded files become preview rows (title = file stem, artist = "Various"
//! unless overridden). Every count of finished rows moves the visible count
//! one step toward its target, so unlocking and clearing both take a few
//! polls. "Download all" writes one file per row into the download directory
//! from a background task, behind a `.part` marker.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aum::{BrokerOptions, BrowserSession, Error, Locator, PollPolicy, Result, ServiceSelectors};
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
	Goto(String),
	Upload(Vec<PathBuf>),
	DownloadAll,
	ClearAll,
	TableLookup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
	UploadInput,
	DownloadAll,
	ClearAll,
	Table,
	Row(usize),
	Title(usize),
	Artist(usize),
	Finished(usize),
}

#[derive(Debug, Clone)]
struct Row {
	title: String,
	artist: String,
}

#[derive(Default)]
struct State {
	rows: Vec<Row>,
	shown: usize,
	events: Vec<Event>,
	overrides: HashMap<String, (String, String)>,
	stalled: bool,
}

#[derive(Clone)]
pub struct FakeService {
	selectors: ServiceSelectors,
	download_dir: PathBuf,
	suffix: String,
	state: Arc<Mutex<State>>,
}

impl FakeService {
	pub fn new(download_dir: &Path) -> Self {
		Self {
			selectors: ServiceSelectors::default(),
			download_dir: download_dir.to_path_buf(),
			suffix: "mp3".to_string(),
			state: Arc::default(),
		}
	}

	/// Shows `stem` as `artist - title` instead of the default row.
	pub fn with_result(self, stem: &str, artist: &str, title: &str) -> Self {
		self.state
			.lock()
			.overrides
			.insert(stem.to_string(), (artist.to_string(), title.to_string()));
		self
	}

	/// Never reports any row as finished.
	pub fn stalled(self) -> Self {
		self.state.lock().stalled = true;
		self
	}

	pub fn events(&self) -> Vec<Event> {
		self.state.lock().events.clone()
	}

	pub fn count(&self, wanted: &Event) -> usize {
		self.state.lock().events.iter().filter(|e| *e == wanted).count()
	}

	pub fn uploads(&self) -> Vec<Vec<PathBuf>> {
		self.state
			.lock()
			.events
			.iter()
			.filter_map(|e| match e {
				Event::Upload(files) => Some(files.clone()),
				_ => None,
			})
			.collect()
	}

	fn record(&self, event: Event) {
		self.state.lock().events.push(event);
	}

	fn lookup(&self, locator: &Locator) -> Result<Element> {
		let element = if *locator == self.selectors.upload_input {
			Element::UploadInput
		} else if *locator == self.selectors.download_all {
			Element::DownloadAll
		} else if *locator == self.selectors.clear_all {
			Element::ClearAll
		} else if *locator == self.selectors.preview_table {
			self.record(Event::TableLookup);
			Element::Table
		} else {
			return Err(not_found(locator));
		};
		Ok(element)
	}

	fn start_downloads(&self) {
		let mut names: Vec<String> = Vec::new();
		for row in &self.state.lock().rows {
			let name = format!("{} - {}.{}", row.artist, row.title, self.suffix);
			if !names.contains(&name) {
				names.push(name);
			}
		}
		let dir = self.download_dir.clone();

		tokio::spawn(async move {
			for name in names {
				let file = dir.join(&name);
				let part = dir.join(format!("{name}.part"));
				std::fs::write(&part, b"").unwrap();
				std::fs::write(&file, b"").unwrap();
				tokio::time::sleep(Duration::from_millis(15)).await;
				std::fs::write(&file, name.as_bytes()).unwrap();
				std::fs::remove_file(&part).unwrap();
			}
		});
	}
}

fn not_found(locator: &Locator) -> Error {
	Error::ElementNotFound {
		locator: locator.to_string(),
	}
}

/// Broker options with test-speed polling.
pub fn fast_options() -> BrokerOptions {
	BrokerOptions {
		selectors: ServiceSelectors::default(),
		poll: PollPolicy::new(Duration::from_millis(5)),
	}
}

pub fn touch(dir: &Path, name: &str) -> PathBuf {
	let path = dir.join(name);
	std::fs::write(&path, name.as_bytes()).unwrap();
	path
}

pub fn names(dir: &Path) -> Vec<String> {
	let mut out: Vec<String> = std::fs::read_dir(dir)
		.unwrap()
		.map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
		.collect();
	out.sort();
	out
}

#[async_trait]
impl BrowserSession for FakeService {
	type Element = Element;

	async fn goto(&self, url: &str) -> Result<()> {
		self.record(Event::Goto(url.to_string()));
		Ok(())
	}

	async fn wait_for(&self, locator: &Locator) -> Result<Element> {
		self.lookup(locator)
	}

	async fn find(&self, locator: &Locator) -> Result<Element> {
		self.lookup(locator)
	}

	async fn find_all(&self, locator: &Locator) -> Result<Vec<Element>> {
		if *locator != self.selectors.result_rows {
			return Ok(Vec::new());
		}
		Ok((0..self.state.lock().rows.len()).map(Element::Row).collect())
	}

	async fn find_within(&self, parent: &Element, locator: &Locator) -> Result<Element> {
		match parent {
			Element::Row(i) if *locator == self.selectors.title_cell => Ok(Element::Title(*i)),
			Element::Row(i) if *locator == self.selectors.artist_cell => Ok(Element::Artist(*i)),
			_ => Err(not_found(locator)),
		}
	}

	async fn find_all_within(&self, parent: &Element, locator: &Locator) -> Result<Vec<Element>> {
		if *parent != Element::Table || *locator != self.selectors.finished_indicator {
			return Err(not_found(locator));
		}

		let mut state = self.state.lock();
		let target = if state.stalled { 0 } else { state.rows.len() };
		if state.shown < target {
			state.shown += 1;
		} else if state.shown > target {
			state.shown -= 1;
		}
		Ok((0..state.shown).map(Element::Finished).collect())
	}

	async fn click(&self, element: &Element) -> Result<()> {
		match element {
			Element::DownloadAll => {
				self.record(Event::DownloadAll);
				self.start_downloads();
			}
			Element::ClearAll => {
				self.record(Event::ClearAll);
				self.state.lock().rows.clear();
			}
			other => return Err(Error::Browser(format!("{other:?} is not clickable"))),
		}
		Ok(())
	}

	async fn text(&self, element: &Element) -> Result<String> {
		let state = self.state.lock();
		match element {
			Element::Title(i) => Ok(state.rows[*i].title.clone()),
			Element::Artist(i) => Ok(state.rows[*i].artist.clone()),
			other => Err(Error::Browser(format!("{other:?} has no text"))),
		}
	}

	async fn upload_files(&self, input: &Element, files: &[PathBuf]) -> Result<()> {
		if *input != Element::UploadInput {
			return Err(Error::Browser("not a file input".to_string()));
		}

		let mut state = self.state.lock();
		for file in files {
			let stem = file.file_stem().unwrap().to_string_lossy().into_owned();
			let (artist, title) = state
				.overrides
				.get(&stem)
				.cloned()
				.unwrap_or_else(|| ("Various".to_string(), stem.clone()));
			state.rows.push(Row { title, artist });
		}
		state.events.push(Event::Upload(files.to_vec()));
		Ok(())
	}
}
