//! Runs the `aum` binary against scratch libraries.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

struct Library {
	root: TempDir,
}

impl Library {
	fn new() -> Self {
		let root = tempfile::tempdir().unwrap();
		std::fs::create_dir(root.path().join("music")).unwrap();
		std::fs::create_dir(root.path().join("downloads")).unwrap();
		std::fs::write(root.path().join("empty.env"), "").unwrap();
		Self { root }
	}

	fn music(&self) -> std::path::PathBuf {
		self.root.path().join("music")
	}

	fn add(&self, name: &str) {
		std::fs::write(self.music().join(name), name).unwrap();
	}

	fn aum(&self, args: &[&str], env: &[(&str, &str)]) -> Output {
		let mut cmd = Command::new(env!("CARGO_BIN_EXE_aum"));
		cmd.env_clear()
			.current_dir(self.root.path())
			.arg("--env-file")
			.arg(self.root.path().join("empty.env"))
			.args(args)
			.env("AUM_MUSIC_DIR", self.music())
			.env("AUM_DOWNLOAD_DIR", self.root.path().join("downloads"));
		for (k, v) in env {
			cmd.env(k, v);
		}
		cmd.output().expect("failed to execute aum")
	}
}

fn json(output: &Output) -> Value {
	serde_json::from_slice(&output.stdout).unwrap_or_else(|_| {
		panic!(
			"stdout is not JSON: {}\nstderr: {}",
			String::from_utf8_lossy(&output.stdout),
			String::from_utf8_lossy(&output.stderr)
		)
	})
}

fn names(dir: &Path) -> Vec<String> {
	let mut out: Vec<String> = std::fs::read_dir(dir)
		.unwrap()
		.map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
		.collect();
	out.sort();
	out
}

#[test]
fn config_prints_effective_settings() {
	let lib = Library::new();
	let out = lib.aum(&["-f", "json", "config"], &[("AUM_LOCKED_SUFFIXES", "ncm;qmc0"), ("AUM_UNLOCK_PATCH_SIZE", "5")]);

	assert!(out.status.success());
	let json = json(&out);
	assert_eq!(json["ok"], true);
	assert_eq!(json["command"], "config");
	assert_eq!(json["data"]["patchSize"], "5");
	assert_eq!(json["data"]["lockedSuffixes"], serde_json::json!(["ncm", "qmc0"]));
	assert_eq!(json["data"]["profile"], "production");
}

#[test]
fn missing_music_dir_exits_with_config_status() {
	let lib = Library::new();
	let out = lib.aum(&["-f", "json", "plan"], &[("AUM_MUSIC_DIR", "/definitely/not/here")]);

	assert_eq!(out.status.code(), Some(2));
	let json = json(&out);
	assert_eq!(json["ok"], false);
	assert_eq!(json["error"]["code"], "CONFIG_ERROR");
	assert!(String::from_utf8_lossy(&out.stderr).contains("AUM_MUSIC_DIR"));
}

#[test]
fn negative_patch_size_exits_with_config_status() {
	let lib = Library::new();
	let out = lib.aum(&["plan"], &[("AUM_UNLOCK_PATCH_SIZE", "-1")]);

	assert_eq!(out.status.code(), Some(2));
	assert!(String::from_utf8_lossy(&out.stderr).contains("patch size must be non-negative (value: -1)"));
}

#[test]
fn plan_lists_batches_without_a_hub() {
	let lib = Library::new();
	lib.add("a.ncm");
	lib.add("b.ncm");
	lib.add("c.flac");

	let out = lib.aum(&["-f", "json", "plan"], &[("AUM_LOCKED_SUFFIXES", "ncm"), ("AUM_UNLOCK_PATCH_SIZE", "1")]);

	assert!(out.status.success());
	let batches = json(&out)["data"]["batches"].as_array().unwrap().clone();
	assert_eq!(batches.len(), 2);
}

#[test]
fn rename_strips_substrings() {
	let lib = Library::new();
	lib.add("track[live].mp3");
	lib.add("other.mp3");

	let out = lib.aum(&["rename"], &[("AUM_REMOVING_SUBSTR", "[live]")]);

	assert!(out.status.success());
	assert!(String::from_utf8_lossy(&out.stdout).contains("Files renamed: 1"));
	assert_eq!(names(&lib.music()), ["other.mp3", "track.mp3"]);
}

#[test]
fn run_without_service_url_fails_before_any_work() {
	let lib = Library::new();
	lib.add("a.ncm");
	lib.add("x[live].mp3");

	let out = lib.aum(
		&["run"],
		&[("AUM_LOCKED_SUFFIXES", "ncm"), ("AUM_REMOVING_SUBSTR", "[live]"), ("AUM_SELENIUM_HUB", "http://127.0.0.1:9/wd/hub")],
	);

	assert_eq!(out.status.code(), Some(2));
	assert!(String::from_utf8_lossy(&out.stderr).contains("AUM_UNLOCK_SERVER"));
	assert_eq!(names(&lib.music()), ["a.ncm", "x[live].mp3"]);
}

#[test]
fn unlock_without_hub_fails_before_any_work() {
	let lib = Library::new();
	lib.add("a.ncm");

	let out = lib.aum(&["unlock"], &[("AUM_LOCKED_SUFFIXES", "ncm"), ("AUM_UNLOCK_SERVER", "http://unlock.invalid/")]);

	assert_eq!(out.status.code(), Some(2));
	assert!(String::from_utf8_lossy(&out.stderr).contains("AUM_SELENIUM_HUB"));
	assert_eq!(names(&lib.music()), ["a.ncm"]);
}

#[test]
fn run_with_nothing_locked_skips_the_hub() {
	let lib = Library::new();
	lib.add("x[live].mp3");

	let out = lib.aum(
		&["-f", "json"],
		&[
			("AUM_LOCKED_SUFFIXES", "ncm"),
			("AUM_REMOVING_SUBSTR", "[live]"),
			("AUM_SELENIUM_HUB", "http://127.0.0.1:9/wd/hub"),
			("AUM_UNLOCK_SERVER", "http://unlock.invalid/"),
		],
	);

	assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
	let json = json(&out);
	assert_eq!(json["command"], "run");
	assert_eq!(json["data"]["discovered"], 0);
	assert_eq!(names(&lib.music()), ["x.mp3"]);
}
