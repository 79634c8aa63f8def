use aum::LibraryPipeline;

use crate::config::Config;
use crate::error::Result;
use crate::output::RenameData;

pub fn execute(config: &Config) -> Result<RenameData> {
	let pipeline = LibraryPipeline::new(config.library_settings())?;
	Ok(RenameData {
		renamed: pipeline.rename()?,
	})
}
