//! aum runtime - WebDriver hub connection and session lifecycle
//!
//! This crate provides the low-level infrastructure for driving a browser
//! hosted on a remote Selenium hub:
//!
//! - **Hub**: Endpoint URL plus the directory its browser downloads into
//! - **Connection**: HTTP command execution and W3C error decoding
//! - **Session**: Navigation, element lookup, clicks, text and uploads
//! - **Upload**: Packing local files for transfer to the hub
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │     aum      │  Unlock engine (BrowserSession trait)
//! └──────┬───────┘
//!        │ adapted by aum-cli
//! ┌──────▼───────┐
//! │ aum-runtime  │  This crate
//! │  ┌────────┐  │
//! │  │Session │  │  Element commands, bounded waits
//! │  └────────┘  │
//! │  ┌────────┐  │
//! │  │ Conn   │  │  HTTP + {"value": ...} envelopes
//! │  └────────┘  │
//! └──────────────┘
//! ```

pub mod connection;
pub mod error;
pub mod hub;
pub mod session;
pub mod upload;

pub use aum_protocol::{ElementRef, Locator};
pub use connection::Connection;
pub use error::{Error, Result};
pub use hub::{Hub, SessionOptions};
pub use session::Session;
