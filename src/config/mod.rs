//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level config struct, logging options and load errors
//! - [`connection`]: Per-server connection blocks (identity, flood, ping)
//! - [`validation`]: Startup checks that report every problem at once

mod connection;
mod defaults;
mod types;
mod validation;

pub use connection::{ConnectionConfig, FloodConfig, PingConfig};
pub use types::{Config, ConfigError, LogFormat};
pub use validation::{ValidationError, validate};
