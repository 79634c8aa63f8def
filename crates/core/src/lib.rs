//! aum: batch unlock orchestration for locked audio libraries
//!
//! Locked files are partitioned into batches, pushed through an unlock web
//! service by a [`UnlockBroker`] driving one browser session, and the
//! unlocked results are reconciled from the browser's download directory back
//! into the music library.
//!
//! # Layout
//!
//! - [`planner`]: splits files into batches ([`Batches`], [`PatchSize`])
//! - [`broker`]: one upload → unlock → download → clear cycle ([`UnlockBroker`])
//! - [`orchestrator`]: sequences batches and relocates results ([`BatchUnlocker`])
//! - [`sanitize`]: substring removal over library filenames ([`FilenameSanitizer`])
//! - [`pipeline`]: discovery, unlock, delete and rename phases ([`LibraryPipeline`])
//!
//! The browser is reached only through the [`BrowserSession`] trait, so the
//! engine runs unchanged against a WebDriver hub or a scripted fake.

pub mod broker;
pub mod browser;
pub mod error;
pub mod filter;
pub mod orchestrator;
pub mod pipeline;
pub mod planner;
pub mod poll;
pub mod relocate;
pub mod sanitize;
pub mod selectors;

pub use aum_protocol::Locator;
pub use broker::{BrokerOptions, BrokerPhase, DownloadRow, UnlockBroker};
pub use browser::BrowserSession;
pub use error::{Error, Result};
pub use filter::SuffixSet;
pub use orchestrator::{BatchOutcome, BatchUnlocker, UnlockReport, UnlockSettings};
pub use pipeline::{LibraryPipeline, LibrarySettings, Phase, PipelineReport};
pub use planner::{Batches, PatchSize, plan_batches};
pub use poll::{Deadline, PollPolicy};
pub use sanitize::{FilenameSanitizer, Rename};
pub use selectors::ServiceSelectors;
