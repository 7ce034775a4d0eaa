//! Inbound message rules.
//!
//! Each rule mutates the registries the way the server's view changed.
//! References to users or channels that are not tracked are logged at
//! debug level and otherwise ignored: the mirror may lag the server, and
//! that is never fatal.

use slirc_proto::command::{Incoming, Join, Kick, Mode, Nick, Part, Quit};
use slirc_proto::mode::parse_channel_modes;
use slirc_proto::prefix::{Prefix, UserPrefix};
use slirc_proto::response::{RplNamReply, RplWhoSpcRpl};
use tracing::{debug, info, warn};

use super::{State, WHOX_FIELDS};

/// Connection-level changes a message caused, for the connection loop to
/// act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Registration just completed under this nickname.
    Registered { nickname: String },
    /// The server announced it is closing the link.
    Closing { reason: String },
}

impl State {
    /// Apply one inbound message.
    pub fn apply(&mut self, msg: &Incoming) -> Option<Transition> {
        match msg {
            Incoming::Welcome(welcome) => {
                self.rename_self(&welcome.nickname);
                return self.mark_registered();
            }
            Incoming::Isupport(isupport) => {
                self.relearn_nickname(&isupport.nickname);
                self.isupport.apply(&isupport.tokens);
                return self.mark_registered();
            }
            Incoming::NicknameInUse(err) => {
                if !self.registered {
                    let retry = format!("{}_", err.attempted);
                    info!(attempted = %err.attempted, retry = %retry, "Nickname in use");
                    self.rename_self(&retry);
                    self.queue.nick(&retry);
                }
            }
            Incoming::Ping(ping) => {
                self.queue.pong(ping);
            }
            Incoming::Error(err) => {
                return Some(Transition::Closing {
                    reason: err.message.clone(),
                });
            }
            Incoming::Join(join) => self.on_join(join),
            Incoming::Part(part) => self.on_part(part),
            Incoming::Kick(kick) => self.on_kick(kick),
            Incoming::Quit(quit) => self.on_quit(quit),
            Incoming::Nick(nick) => self.on_nick(nick),
            Incoming::Mode(mode) => self.on_mode(mode),
            Incoming::NamReply(names) => {
                self.relearn_nickname(&names.nickname);
                self.on_names(names);
            }
            Incoming::WhoReply(who) => {
                self.relearn_nickname(&who.nickname);
                self.on_who(who);
            }
            Incoming::TopicReply(reply) => {
                self.relearn_nickname(&reply.nickname);
                self.set_topic(&reply.channel, &reply.topic);
            }
            Incoming::Topic(topic) => self.set_topic(&topic.channel, &topic.topic),
            Incoming::Privmsg(msg) => self.sighted(msg.prefix.as_ref()),
            Incoming::Notice(msg) => {
                if let Some(Prefix::User(prefix)) = &msg.prefix {
                    self.users.resolve_prefix(prefix);
                }
            }
            Incoming::Pong(_) | Incoming::Cap(_) | Incoming::Unhandled(_) => {}
        }
        None
    }

    fn mark_registered(&mut self) -> Option<Transition> {
        if self.registered {
            return None;
        }
        self.registered = true;
        self.queue.set_flood_control(true);
        let nickname = self.nickname().to_owned();
        info!(nickname = %nickname, "Registration complete");
        Some(Transition::Registered { nickname })
    }

    fn rename_self(&mut self, nickname: &str) {
        if let Some(stale) = self.users.rename(self.own, nickname) {
            self.forget(stale);
        }
    }

    /// Numeric replies are addressed to our current nickname.
    fn relearn_nickname(&mut self, nickname: &str) {
        if nickname == "*" || self.is_own_nickname(nickname) {
            return;
        }
        info!(old = %self.nickname(), new = %nickname, "Relearned own nickname");
        self.rename_self(nickname);
    }

    fn sighted(&mut self, prefix: Option<&UserPrefix>) {
        if let Some(prefix) = prefix {
            self.users.resolve_prefix(prefix);
        }
    }

    /// Drop a user from every channel, its private conversation and the
    /// registry.
    fn forget(&mut self, id: super::UserId) {
        self.channels.remove_member_everywhere(id);
        self.channels.remove_private(id);
        self.users.remove(id);
    }

    fn on_join(&mut self, join: &Join) {
        let Some(prefix) = &join.prefix else { return };

        if self.is_own_nickname(&prefix.nickname) {
            self.users.resolve_prefix(prefix);
            for name in &join.channels {
                debug!(channel = %name, "Joined channel");
                self.channels.rejoin(name).add_member(self.own);
                self.queue.who(name, Some(WHOX_FIELDS));
            }
            return;
        }

        let id = self.users.resolve_prefix(prefix);
        for name in &join.channels {
            match self.channels.get_mut(name) {
                Some(channel) => channel.add_member(id),
                None => debug!(channel = %name, nickname = %prefix.nickname, "JOIN for untracked channel"),
            }
        }
    }

    fn on_part(&mut self, part: &Part) {
        let Some(prefix) = &part.prefix else { return };
        for name in &part.channels {
            self.leave(name, &prefix.nickname);
        }
    }

    fn on_kick(&mut self, kick: &Kick) {
        debug!(channel = %kick.channel, target = %kick.target, reason = %kick.message, "Kick");
        self.leave(&kick.channel, &kick.target);
    }

    /// `nickname` is no longer in `channel`. If it is the bot, the channel
    /// goes away entirely.
    fn leave(&mut self, channel: &str, nickname: &str) {
        if self.is_own_nickname(nickname) {
            debug!(channel = %channel, "Left channel");
            self.channels.remove(channel);
            return;
        }
        let Some(id) = self.users.id_of(nickname) else {
            debug!(channel = %channel, nickname = %nickname, "Unknown user left channel");
            return;
        };
        let removed = self
            .channels
            .get_mut(channel)
            .is_some_and(|c| c.remove_member(id));
        if !removed {
            debug!(channel = %channel, nickname = %nickname, "User was not a tracked member");
        }
    }

    fn on_quit(&mut self, quit: &Quit) {
        let Some(prefix) = &quit.prefix else { return };
        if self.is_own_nickname(&prefix.nickname) {
            return;
        }
        match self.users.id_of(&prefix.nickname) {
            Some(id) => self.forget(id),
            None => debug!(nickname = %prefix.nickname, "QUIT from unknown user"),
        }
    }

    fn on_nick(&mut self, nick: &Nick) {
        let Some(prefix) = &nick.prefix else { return };
        let Some(id) = self.users.id_of(&prefix.nickname) else {
            debug!(old = %prefix.nickname, new = %nick.nickname, "NICK from unknown user");
            return;
        };
        if id == self.own {
            info!(old = %prefix.nickname, new = %nick.nickname, "Own nickname changed");
        } else if self.is_own_nickname(&nick.nickname) {
            // We missed our own NICK; the server's view wins and our
            // nickname is relearned from the next reply addressed to us.
            warn!(nickname = %nick.nickname, "Another user took our recorded nickname");
            self.users.release_nickname(self.own);
        }
        if let Some(stale) = self.users.rename(id, &nick.nickname) {
            debug!(nickname = %nick.nickname, "Evicted stale user holding new nickname");
            self.forget(stale);
        }
        self.channels.rename_private(id, &nick.nickname);
    }

    fn on_mode(&mut self, mode: &Mode) {
        let changes = parse_channel_modes(&self.isupport, &mode.flags, &mode.args);
        let Some(channel) = self.channels.get_mut(&mode.target) else {
            debug!(target = %mode.target, flags = %mode.flags, "MODE for untracked target");
            return;
        };

        for change in changes {
            if self.isupport.prefix.is_prefix_mode(change.mode) {
                let target = change.arg.as_deref().and_then(|n| self.users.id_of(n));
                let applied =
                    target.is_some_and(|id| channel.set_member_mode(id, change.mode, change.adding));
                if !applied {
                    debug!(
                        channel = %mode.target,
                        mode = %change.mode,
                        nickname = ?change.arg,
                        "Membership mode for unknown member"
                    );
                }
            } else if self.isupport.is_list_mode(change.mode) {
                let Some(mask) = change.arg else { continue };
                let list = channel.modes.lists.entry(change.mode).or_default();
                if change.adding {
                    list.insert(mask);
                } else {
                    list.remove(&mask);
                }
            } else if change.adding {
                channel.modes.flags.insert(change.mode, change.arg);
            } else {
                channel.modes.flags.remove(&change.mode);
            }
        }
    }

    fn on_names(&mut self, names: &RplNamReply) {
        let channel = self.channels.get_or_create(&names.channel);
        for entry in &names.nicknames {
            let (modes, rest) = self.isupport.split_sigils(entry);
            // userhost-in-names sends full masks
            let id = match rest.parse::<UserPrefix>() {
                Ok(prefix) => self.users.resolve_prefix(&prefix),
                Err(_) => self.users.resolve(rest),
            };
            channel.add_member(id);
            for mode in modes {
                channel.set_member_mode(id, mode, true);
            }
        }
    }

    fn on_who(&mut self, who: &RplWhoSpcRpl) {
        let id = self.users.resolve(&who.target);
        if let Some(user) = self.users.get_mut(id) {
            user.username.clone_from(&who.username);
            user.hostname.clone_from(&who.hostname);
            user.account.clone_from(&who.account);
        }
    }

    fn set_topic(&mut self, channel: &str, topic: &str) {
        match self.channels.get_mut(channel) {
            Some(c) => c.topic = Some(topic.to_owned()),
            None => debug!(channel = %channel, "Topic for untracked channel"),
        }
    }
}
