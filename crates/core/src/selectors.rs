//! Page elements of the unlock service.

use aum_protocol::Locator;

/// Locators for the unlock service's page.
///
/// Defaults match the unlock-music web UI: an element-ui upload control, a
/// preview table whose finished rows carry a download icon, and two text
/// buttons for bulk download and clearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSelectors {
	pub upload_input: Locator,
	pub download_all: Locator,
	pub clear_all: Locator,
	pub preview_table: Locator,
	pub result_rows: Locator,
	pub title_cell: Locator,
	pub artist_cell: Locator,
	pub finished_indicator: Locator,
}

impl Default for ServiceSelectors {
	fn default() -> Self {
		Self {
			upload_input: Locator::class_name("el-upload__input"),
			download_all: Locator::xpath(r#"//span[text()="下载全部"]"#),
			clear_all: Locator::xpath(r#"//span[text()="清除全部"]"#),
			preview_table: Locator::css("table.el-table__body"),
			result_rows: Locator::css("table.el-table__body .el-table__row"),
			title_cell: Locator::class_name("el-table_1_column_2"),
			artist_cell: Locator::class_name("el-table_1_column_3"),
			finished_indicator: Locator::class_name("el-icon-download"),
		}
	}
}
