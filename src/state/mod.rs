//! Channel and user state mirrored from the server.
//!
//! - [`user`]: user identities and the nickname-indexed registry
//! - [`channel`]: channels, membership and the channel registry
//! - [`sync`]: one update rule per inbound message kind

mod channel;
mod sync;
mod user;

use slirc_proto::isupport::Isupport;
use tracing::debug;

use crate::queue::QueueHandle;

pub use channel::{Channel, ChannelCollection, ChannelKind, ChannelModes};
pub use sync::Transition;
pub use user::{User, UserCollection, UserId};

/// WHOX fields requested whenever the bot needs user details:
/// user, host, nick, flags, account.
pub const WHOX_FIELDS: &str = "%nuhaf";

/// Everything the bot knows about one connection's network.
///
/// Owned by the connection task; inbound messages are applied one at a time
/// through [`State::apply`].
#[derive(Debug)]
pub struct State {
    users: UserCollection,
    channels: ChannelCollection,
    isupport: Isupport,
    queue: QueueHandle,
    own: UserId,
    registered: bool,
}

impl State {
    /// Fresh state for a connection registering as `nickname`.
    pub fn new(nickname: &str, queue: QueueHandle) -> Self {
        let mut users = UserCollection::new();
        let own = users.resolve(nickname);
        Self {
            users,
            channels: ChannelCollection::new(),
            isupport: Isupport::default(),
            queue,
            own,
            registered: false,
        }
    }

    pub fn users(&self) -> &UserCollection {
        &self.users
    }

    pub fn channels(&self) -> &ChannelCollection {
        &self.channels
    }

    pub fn isupport(&self) -> &Isupport {
        &self.isupport
    }

    pub fn queue(&self) -> &QueueHandle {
        &self.queue
    }

    pub fn own_id(&self) -> UserId {
        self.own
    }

    /// The bot's current nickname.
    pub fn nickname(&self) -> &str {
        self.users
            .get(self.own)
            .map(|user| user.nickname.as_str())
            .unwrap_or_default()
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Whether `nickname` is the bot itself.
    pub fn is_own_nickname(&self, nickname: &str) -> bool {
        self.users.id_of(nickname) == Some(self.own)
    }

    /// Resolve a target name to a channel.
    ///
    /// When `name` is the bot's own nickname and `user` is given, this is a
    /// private message: the synthetic conversation with that user is
    /// returned (created with the user and the bot as its only members, and
    /// a WHO lookup queued if the user's host is still unknown). Otherwise
    /// the real channel of that exact name is returned, created as an empty
    /// placeholder if the bot has not joined it.
    pub fn request_by_channel_name(&mut self, name: &str, user: Option<UserId>) -> &Channel {
        let peer = user
            .filter(|_| self.is_own_nickname(name))
            .and_then(|id| self.users.get(id));
        let Some(peer) = peer else {
            return self.channels.get_or_create(name);
        };

        let (peer_id, peer_nickname) = (peer.id, peer.nickname.clone());
        if peer.hostname.is_empty() && self.channels.private_with(peer_id).is_none() {
            debug!(nickname = %peer_nickname, "Looking up private conversation peer");
            self.queue.who(&peer_nickname, Some(WHOX_FIELDS));
        }
        self.channels
            .get_or_create_private(peer_id, &peer_nickname, self.own)
    }

    /// Member of `channel` currently known as `nickname`.
    pub fn channel_member(&self, channel: &str, nickname: &str) -> Option<&User> {
        let id = self.users.id_of(nickname)?;
        self.channels
            .get(channel)
            .filter(|c| c.has_member(id))
            .and_then(|_| self.users.get(id))
    }

    /// Forget everything learned on this connection.
    ///
    /// Called when the connection closes; the bot's own identity survives
    /// so the record stays consistent, but nothing else does.
    pub fn teardown(&mut self) {
        debug!(
            channels = self.channels.len(),
            users = self.users.len(),
            "Tearing down connection state"
        );
        self.channels.clear();
        self.users.retain_only(self.own);
        self.isupport = Isupport::default();
        self.registered = false;
    }
}
