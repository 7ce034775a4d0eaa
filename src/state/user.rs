//! User identity records and the per-connection user registry.

use std::collections::HashMap;

use slirc_proto::prefix::UserPrefix;

/// Stable identity of a tracked user.
///
/// Assigned at first sighting and never reused within a connection, so a
/// nickname change keeps the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(u64);

/// A user seen on the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub nickname: String,
    pub username: String,
    pub hostname: String,
    /// Services account; empty, `*` or `0` when not identified.
    pub account: String,
}

impl User {
    fn new(id: UserId, nickname: &str) -> Self {
        Self {
            id,
            nickname: nickname.to_owned(),
            username: String::new(),
            hostname: String::new(),
            account: String::new(),
        }
    }

    /// Whether the user is logged in to services.
    pub fn is_identified(&self) -> bool {
        !matches!(self.account.as_str(), "" | "*" | "0")
    }

    /// `nick!user@host`, with unknown parts left empty.
    pub fn hostmask(&self) -> String {
        format!("{}!{}@{}", self.nickname, self.username, self.hostname)
    }

    /// Refresh username and hostname from a message source.
    pub fn update_from_prefix(&mut self, prefix: &UserPrefix) {
        if !prefix.username.is_empty() {
            self.username.clone_from(&prefix.username);
        }
        if !prefix.hostname.is_empty() {
            self.hostname.clone_from(&prefix.hostname);
        }
    }
}

/// Every user known on one connection, indexed by id and by nickname.
///
/// Nicknames are compared exactly.
#[derive(Debug, Default)]
pub struct UserCollection {
    users: HashMap<UserId, User>,
    by_nickname: HashMap<String, UserId>,
    next_id: u64,
}

impl UserCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn get_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    pub fn find_by_nickname(&self, nickname: &str) -> Option<&User> {
        self.id_of(nickname).and_then(|id| self.users.get(&id))
    }

    pub fn id_of(&self, nickname: &str) -> Option<UserId> {
        self.by_nickname.get(nickname).copied()
    }

    /// Id for `nickname`, registering a new user on first sighting.
    pub fn resolve(&mut self, nickname: &str) -> UserId {
        if let Some(id) = self.id_of(nickname) {
            return id;
        }
        let id = UserId(self.next_id);
        self.next_id += 1;
        self.users.insert(id, User::new(id, nickname));
        self.by_nickname.insert(nickname.to_owned(), id);
        id
    }

    /// Resolve a message source and refresh its user/host.
    pub fn resolve_prefix(&mut self, prefix: &UserPrefix) -> UserId {
        let id = self.resolve(&prefix.nickname);
        if let Some(user) = self.users.get_mut(&id) {
            user.update_from_prefix(prefix);
        }
        id
    }

    /// Change a user's nickname in place.
    ///
    /// Returns the id of a different user that held `new` and was evicted
    /// to keep nicknames unique.
    pub fn rename(&mut self, id: UserId, new: &str) -> Option<UserId> {
        let evicted = self.id_of(new).filter(|&other| other != id);
        if let Some(stale) = evicted {
            self.remove(stale);
        }
        if let Some(user) = self.users.get_mut(&id) {
            if self.by_nickname.get(&user.nickname) == Some(&id) {
                self.by_nickname.remove(&user.nickname);
            }
            user.nickname = new.to_owned();
            self.by_nickname.insert(new.to_owned(), id);
        }
        evicted
    }

    /// Drop the nickname index entry for `id` but keep its record.
    ///
    /// The user stays reachable by id under its last known nickname until
    /// the next [`rename`](Self::rename) indexes it again.
    pub fn release_nickname(&mut self, id: UserId) {
        let Some(user) = self.users.get(&id) else { return };
        if self.by_nickname.get(&user.nickname) == Some(&id) {
            self.by_nickname.remove(&user.nickname);
        }
    }

    pub fn remove(&mut self, id: UserId) -> Option<User> {
        let user = self.users.remove(&id)?;
        if self.by_nickname.get(&user.nickname) == Some(&id) {
            self.by_nickname.remove(&user.nickname);
        }
        Some(user)
    }

    /// Remove everyone except `keep`.
    pub fn retain_only(&mut self, keep: UserId) {
        self.users.retain(|&id, _| id == keep);
        self.by_nickname.retain(|_, id| *id == keep);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }
}
