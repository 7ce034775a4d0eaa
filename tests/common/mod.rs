//! Integration test common infrastructure.
//!
//! A scripted fake IRC server the bot connects to, and a handle that runs
//! the `slircbot` binary against it.

pub mod bot;
pub mod server;

#[allow(unused_imports)]
pub use bot::TestBot;
#[allow(unused_imports)]
pub use server::{BotLink, FakeServer};
