//! Wire types for the W3C WebDriver protocol.
//!
//! This crate contains the serde-serializable types exchanged with a remote
//! WebDriver endpoint (a Selenium hub). These types represent the
//! "protocol layer" - the shapes of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond serialization/deserialization
//! - **1:1 with protocol**: Match the W3C WebDriver command payloads
//! - **Stable**: Changes only when the wire protocol changes
//!
//! The HTTP client lives in `aum-runtime`; the unlock engine in `aum` only
//! sees [`Locator`].

pub mod capabilities;
pub mod element;
pub mod envelope;
pub mod locator;

pub use capabilities::*;
pub use element::*;
pub use envelope::*;
pub use locator::*;
