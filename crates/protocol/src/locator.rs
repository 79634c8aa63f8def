//! Element location strategies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How an element is located on the page.
///
/// W3C WebDriver has no class-name strategy, so [`Locator::ClassName`] is
/// sent as the equivalent CSS selector (see [`Locator::to_query`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
	/// CSS selector, e.g. `table.el-table__body`
	Css(String),
	/// Single class name, e.g. `el-icon-download`
	ClassName(String),
	/// XPath expression, e.g. `//span[text()="..."]`
	XPath(String),
}

impl Locator {
	pub fn css(selector: impl Into<String>) -> Self {
		Self::Css(selector.into())
	}

	pub fn class_name(name: impl Into<String>) -> Self {
		Self::ClassName(name.into())
	}

	pub fn xpath(expr: impl Into<String>) -> Self {
		Self::XPath(expr.into())
	}

	/// Converts the locator to the `using`/`value` pair of a find command.
	pub fn to_query(&self) -> FindElement {
		match self {
			Self::Css(selector) => FindElement {
				using: Strategy::CssSelector,
				value: selector.clone(),
			},
			Self::ClassName(name) => FindElement {
				using: Strategy::CssSelector,
				value: format!(".{}", escape_css_identifier(name)),
			},
			Self::XPath(expr) => FindElement {
				using: Strategy::XPath,
				value: expr.clone(),
			},
		}
	}
}

impl fmt::Display for Locator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Css(selector) => write!(f, "css={selector}"),
			Self::ClassName(name) => write!(f, "class={name}"),
			Self::XPath(expr) => write!(f, "xpath={expr}"),
		}
	}
}

/// Location strategy as named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
	#[serde(rename = "css selector")]
	CssSelector,
	#[serde(rename = "xpath")]
	XPath,
}

/// Body of `POST /session/{id}/element` and its variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindElement {
	pub using: Strategy,
	pub value: String,
}

// Class names from the page never contain CSS metacharacters in practice,
// but a stray one must not turn into a combinator.
fn escape_css_identifier(name: &str) -> String {
	let mut out = String::with_capacity(name.len());
	for ch in name.chars() {
		if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii() {
			out.push(ch);
		} else {
			out.push('\\');
			out.push(ch);
		}
	}
	out
}
