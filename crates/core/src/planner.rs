//! Partitioning of input files into upload batches.

use std::iter::FusedIterator;

use crate::error::{Error, Result};

/// Maximum files per batch; zero means a single unbounded batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PatchSize(usize);

impl PatchSize {
	pub const UNBOUNDED: Self = Self(0);

	/// Validates a configured patch size.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidParameter`] when `size` is negative.
	pub fn new(size: i64) -> Result<Self> {
		usize::try_from(size).map(Self).map_err(|_| Error::negative_patch_size(size))
	}

	pub fn get(self) -> usize {
		self.0
	}

	pub fn is_unbounded(self) -> bool {
		self.0 == 0
	}
}

impl TryFrom<i64> for PatchSize {
	type Error = Error;

	fn try_from(size: i64) -> Result<Self> {
		Self::new(size)
	}
}

impl From<usize> for PatchSize {
	fn from(size: usize) -> Self {
		Self(size)
	}
}

impl std::fmt::Display for PatchSize {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.is_unbounded() {
			write!(f, "unbounded")
		} else {
			write!(f, "{}", self.0)
		}
	}
}

/// Lazy sequence of batches over an input iterator.
///
/// Batches preserve encounter order and partition the input exactly once.
/// With an unbounded patch size exactly one batch is produced, even for an
/// empty input; otherwise an empty input produces none.
#[derive(Debug)]
pub struct Batches<I> {
	items: I,
	size: PatchSize,
	done: bool,
}

impl<I: Iterator> Batches<I> {
	pub fn new<T>(items: T, size: PatchSize) -> Self
	where
		T: IntoIterator<IntoIter = I>,
	{
		Self {
			items: items.into_iter(),
			size,
			done: false,
		}
	}
}

impl<I: Iterator> Iterator for Batches<I> {
	type Item = Vec<I::Item>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		if self.size.is_unbounded() {
			self.done = true;
			return Some(self.items.by_ref().collect());
		}

		let limit = self.size.get();
		let batch: Vec<I::Item> = self.items.by_ref().take(limit).collect();
		if batch.len() < limit {
			self.done = true;
		}

		if batch.is_empty() { None } else { Some(batch) }
	}
}

impl<I: Iterator> FusedIterator for Batches<I> {}

/// Plans batches for `items`, validating `patch_size` up front.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for a negative `patch_size` before any
/// item is consumed.
pub fn plan_batches<T: IntoIterator>(items: T, patch_size: i64) -> Result<Batches<T::IntoIter>> {
	let size = PatchSize::new(patch_size)?;
	Ok(Batches::new(items, size))
}
