use std::path::PathBuf;

use super::*;

#[test]
fn result_builder_success() {
	let result: CommandResult<PlanData> = ResultBuilder::new("plan")
		.data(PlanData {
			patch_size: "2".into(),
			batches: vec![vec![PathBuf::from("a.ncm")]],
		})
		.build();

	assert!(result.ok);
	assert_eq!(result.command, "plan");
	assert!(result.error.is_none());
	assert_eq!(result.schema_version, SCHEMA_VERSION);
}

#[test]
fn result_builder_error() {
	let result: CommandResult<()> = ResultBuilder::new("run")
		.error(CommandError {
			code: ErrorCode::Timeout,
			message: "timeout after 1000ms waiting for: unlock to finish".into(),
			details: None,
		})
		.build();

	assert!(!result.ok);
	assert!(result.data.is_none());
	assert_eq!(result.error.as_ref().unwrap().code, ErrorCode::Timeout);
}

#[test]
fn error_code_display() {
	assert_eq!(ErrorCode::ConfigError.to_string(), "CONFIG_ERROR");
	assert_eq!(ErrorCode::SelectorNotFound.to_string(), "SELECTOR_NOT_FOUND");
}

#[test]
fn envelope_uses_camel_case() {
	let result: CommandResult<RenameData> = ResultBuilder::new("rename")
		.data(RenameData { renamed: vec![] })
		.build();
	let json = serde_json::to_value(&result).unwrap();

	assert_eq!(json["schemaVersion"], 1);
	assert_eq!(json["ok"], true);
	assert!(json["timings"]["durationMs"].is_u64());
	assert!(json.get("error").is_none());
}

#[test]
fn plan_text_lists_batches() {
	let data = PlanData {
		patch_size: "1".into(),
		batches: vec![vec![PathBuf::from("a.ncm")], vec![PathBuf::from("b.ncm")]],
	};
	let mut out = Vec::new();
	data.write_text(&mut out).unwrap();
	let text = String::from_utf8(out).unwrap();

	assert!(text.contains("Batch 1 (1 files):\n  a.ncm"));
	assert!(text.contains("Batch 2 (1 files):\n  b.ncm"));
}

#[test]
fn pipeline_text_summarizes_phases() {
	let data = PipelineData {
		report: PipelineReport {
			discovered: 1,
			renamed: vec![Rename {
				from: PathBuf::from("x[live].mp3"),
				to: PathBuf::from("x.mp3"),
			}],
			..Default::default()
		},
	};
	let mut out = Vec::new();
	data.write_text(&mut out).unwrap();
	let text = String::from_utf8(out).unwrap();

	assert!(text.starts_with("Locked files found: 1\n"));
	assert!(text.contains("Originals deleted: 0"));
	assert!(text.contains("x[live].mp3 -> x.mp3"));
}
