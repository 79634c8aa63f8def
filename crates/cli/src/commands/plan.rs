//! `plan`: the batches an unlock would submit, without a browser.

use std::path::PathBuf;

use aum::{LibraryPipeline, plan_batches};

use crate::config::Config;
use crate::error::Result;
use crate::output::PlanData;

pub fn execute(config: &Config) -> Result<PlanData> {
	let pipeline = LibraryPipeline::new(config.library_settings())?;
	let files = pipeline.discover()?;

	let batches: Vec<Vec<PathBuf>> = plan_batches(files, config.patch_size.get() as i64)?
		.filter(|batch| !batch.is_empty())
		.collect();

	Ok(PlanData {
		patch_size: config.patch_size.to_string(),
		batches,
	})
}
