//! aum-cli: configuration, logging and command dispatch for the `aum` binary.

pub mod browser;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
