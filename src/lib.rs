//! slirc-bot - Straylight IRC bot engine.
//!
//! Connects to one or more IRC servers, paces outbound traffic with flood
//! control and mirrors channel and user state from the inbound stream.
//!
//! - [`config`]: TOML configuration and validation
//! - [`queue`]: the outbound scheduler
//! - [`state`]: the channel/user state synchronizer
//! - [`network`]: the per-server connection loop and collaborator events

pub mod config;
pub mod error;
pub mod network;
pub mod queue;
pub mod state;
