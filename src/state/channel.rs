//! Channel records and the per-connection channel registry.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::user::UserId;

/// Channel-wide modes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChannelModes {
    /// Set flags, with their parameter if the mode has one (`+k key`, `+l 10`).
    pub flags: BTreeMap<char, Option<String>>,
    /// List modes (`+b`, `+e`, `+I`) and their masks.
    pub lists: BTreeMap<char, BTreeSet<String>>,
}

impl ChannelModes {
    pub fn has(&self, mode: char) -> bool {
        self.flags.contains_key(&mode)
    }

    pub fn list(&self, mode: char) -> impl Iterator<Item = &str> {
        self.lists.get(&mode).into_iter().flatten().map(String::as_str)
    }
}

/// What a channel record stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// A server channel.
    Real,
    /// A synthetic one-to-one conversation with `peer`.
    Private { peer: UserId },
}

/// A channel as mirrored from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
    pub kind: ChannelKind,
    pub topic: Option<String>,
    pub modes: ChannelModes,
    /// Whether the bot is currently in the channel.
    pub joined: bool,
    /// Members and their membership modes (`o`, `v`, ...).
    members: HashMap<UserId, BTreeSet<char>>,
}

impl Channel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            kind: ChannelKind::Real,
            topic: None,
            modes: ChannelModes::default(),
            joined: false,
            members: HashMap::new(),
        }
    }

    fn private(peer_nickname: &str, peer: UserId, own: UserId) -> Self {
        let mut channel = Self::new(peer_nickname);
        channel.kind = ChannelKind::Private { peer };
        channel.add_member(peer);
        channel.add_member(own);
        channel
    }

    pub fn is_private(&self) -> bool {
        matches!(self.kind, ChannelKind::Private { .. })
    }

    pub fn add_member(&mut self, id: UserId) {
        self.members.entry(id).or_default();
    }

    /// Returns false if `id` was not a member.
    pub fn remove_member(&mut self, id: UserId) -> bool {
        self.members.remove(&id).is_some()
    }

    pub fn has_member(&self, id: UserId) -> bool {
        self.members.contains_key(&id)
    }

    pub fn member_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.members.keys().copied()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Membership modes held by `id`, if a member.
    pub fn member_modes(&self, id: UserId) -> Option<&BTreeSet<char>> {
        self.members.get(&id)
    }

    pub fn has_member_mode(&self, id: UserId, mode: char) -> bool {
        self.members.get(&id).is_some_and(|modes| modes.contains(&mode))
    }

    /// Grant or revoke a membership mode. Ignored for non-members.
    pub fn set_member_mode(&mut self, id: UserId, mode: char, on: bool) -> bool {
        match self.members.get_mut(&id) {
            Some(modes) if on => {
                modes.insert(mode);
                true
            }
            Some(modes) => {
                modes.remove(&mode);
                true
            }
            None => false,
        }
    }

    fn clear_members(&mut self) {
        self.members.clear();
    }
}

/// Every channel known on one connection.
///
/// Real channels are keyed by exact name. Private conversations live in a
/// separate map keyed by peer, so they never collide with a real channel.
#[derive(Debug, Default)]
pub struct ChannelCollection {
    channels: HashMap<String, Channel>,
    private: HashMap<UserId, Channel>,
}

impl ChannelCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(name)
    }

    /// Real channel by name, created as an empty placeholder if absent.
    pub fn get_or_create(&mut self, name: &str) -> &mut Channel {
        self.channels
            .entry(name.to_owned())
            .or_insert_with(|| Channel::new(name))
    }

    pub fn remove(&mut self, name: &str) -> Option<Channel> {
        self.channels.remove(name)
    }

    pub fn private_with(&self, peer: UserId) -> Option<&Channel> {
        self.private.get(&peer)
    }

    /// Private conversation with `peer`, created on first use.
    pub fn get_or_create_private(
        &mut self,
        peer: UserId,
        peer_nickname: &str,
        own: UserId,
    ) -> &mut Channel {
        self.private
            .entry(peer)
            .or_insert_with(|| Channel::private(peer_nickname, peer, own))
    }

    pub fn remove_private(&mut self, peer: UserId) -> Option<Channel> {
        self.private.remove(&peer)
    }

    /// Real channels `id` is a member of.
    pub fn names_with_member(&self, id: UserId) -> Vec<String> {
        self.channels
            .values()
            .filter(|c| c.has_member(id))
            .map(|c| c.name.clone())
            .collect()
    }

    /// Drop `id` from every real channel. Returns how many it left.
    pub fn remove_member_everywhere(&mut self, id: UserId) -> usize {
        self.channels
            .values_mut()
            .map(|c| c.remove_member(id))
            .filter(|&removed| removed)
            .count()
    }

    /// Reset a channel for a fresh join by the bot.
    pub fn rejoin(&mut self, name: &str) -> &mut Channel {
        let channel = self.get_or_create(name);
        channel.clear_members();
        channel.topic = None;
        channel.modes = ChannelModes::default();
        channel.joined = true;
        channel
    }

    /// Keep a private conversation's name in step with its peer.
    pub fn rename_private(&mut self, peer: UserId, nickname: &str) {
        if let Some(channel) = self.private.get_mut(&peer) {
            channel.name = nickname.to_owned();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn clear(&mut self) {
        self.channels.clear();
        self.private.clear();
    }
}
