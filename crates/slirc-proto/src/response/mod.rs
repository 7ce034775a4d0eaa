//! Numeric replies the client engine decodes.
//!
//! Only the replies that drive registration and channel state are modelled;
//! every other numeric surfaces as an unhandled line.
//!
//! # Reference
//! - RFC 2812: Internet Relay Chat: Client Protocol
//! - Modern IRC documentation: <https://modern.ircdocs.horse/>

mod replies;

pub use self::replies::{
    ErrNicknameInUse, RplIsupport, RplNamReply, RplTopic, RplWelcome, RplWhoSpcRpl,
};

/// 001 - Welcome to the IRC network.
pub const RPL_WELCOME: &str = "001";
/// 005 - Server supported features.
pub const RPL_ISUPPORT: &str = "005";
/// 332 - Channel topic.
pub const RPL_TOPIC: &str = "332";
/// 353 - Channel member list.
pub const RPL_NAMREPLY: &str = "353";
/// 354 - WHOX reply.
pub const RPL_WHOSPCRPL: &str = "354";
/// 433 - Nickname already in use.
pub const ERR_NICKNAMEINUSE: &str = "433";
