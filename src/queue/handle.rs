//! Shared front end to a connection's outbound queue.

use std::sync::Arc;

use parking_lot::Mutex;
use slirc_proto::command::{
    Cap, Encodable, Join, Kick, Mode, Nick, Notice, Part, Pass, Ping, Pong, Privmsg, Quit, Raw,
    Remove, Topic, User, Who,
};
use tokio::sync::Notify;

use super::{Queue, QueueItem, Scheduled, Ticket};
use crate::config::FloodConfig;

/// Cloneable handle used by the synchronizer, the connection loop and
/// collaborators to queue outbound messages.
///
/// The lock is held only for the duration of a single queue operation.
#[derive(Debug, Clone)]
pub struct QueueHandle {
    queue: Arc<Mutex<Queue>>,
    wakeup: Arc<Notify>,
}

impl QueueHandle {
    pub fn new(config: &FloodConfig) -> Self {
        Self {
            queue: Arc::new(Mutex::new(Queue::new(config))),
            wakeup: Arc::new(Notify::new()),
        }
    }

    /// Queue any encodable message.
    pub fn enqueue<M: Encodable + 'static>(&self, message: M) -> Scheduled {
        let scheduled = self.queue.lock().enqueue(Box::new(message));
        self.wakeup.notify_one();
        scheduled
    }

    pub fn flush(&self) -> Vec<QueueItem> {
        self.queue.lock().flush()
    }

    pub fn remove_message(&self, ticket: Ticket) -> bool {
        self.queue.lock().remove_message(ticket)
    }

    pub fn remove_by_index(&self, index: usize) -> bool {
        self.queue.lock().remove_by_index(index)
    }

    pub fn discard(&self) -> Vec<QueueItem> {
        self.queue.lock().discard()
    }

    pub fn set_flood_control(&self, enabled: bool) {
        self.queue.lock().set_flood_control(enabled);
    }

    pub fn is_flood_control_enabled(&self) -> bool {
        self.queue.lock().is_flood_control_enabled()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    pub fn next_due(&self) -> Option<std::time::Instant> {
        self.queue.lock().next_due()
    }

    /// Resolves after the next enqueue (or immediately if one happened
    /// since the last call).
    pub async fn notified(&self) {
        self.wakeup.notified().await;
    }

    // =========================================================================
    // Convenience constructors
    // =========================================================================

    pub fn privmsg(&self, target: &str, message: &str) -> Scheduled {
        self.enqueue(Privmsg::new(target, message))
    }

    pub fn notice(&self, target: &str, message: &str) -> Scheduled {
        self.enqueue(Notice::new(target, message))
    }

    pub fn join(&self, channel: &str) -> Scheduled {
        self.enqueue(Join::new(channel))
    }

    pub fn join_with_key(&self, channel: &str, key: &str) -> Scheduled {
        self.enqueue(Join::with_keys(vec![channel.to_owned()], vec![key.to_owned()]))
    }

    pub fn part(&self, channel: &str, message: Option<&str>) -> Scheduled {
        self.enqueue(Part::new(channel, message.map(str::to_owned)))
    }

    pub fn kick(&self, channel: &str, nickname: &str, message: &str) -> Scheduled {
        self.enqueue(Kick::new(channel, nickname, message))
    }

    pub fn remove(&self, channel: &str, nickname: &str, message: &str) -> Scheduled {
        self.enqueue(Remove::new(channel, nickname, message))
    }

    pub fn mode(&self, target: &str, flags: &str, args: &[&str]) -> Scheduled {
        self.enqueue(Mode::new(
            target,
            flags,
            args.iter().map(|a| (*a).to_owned()).collect(),
        ))
    }

    pub fn topic(&self, channel: &str, topic: &str) -> Scheduled {
        self.enqueue(Topic::new(channel, topic))
    }

    pub fn who(&self, mask: &str, options: Option<&str>) -> Scheduled {
        self.enqueue(Who::new(mask, options.map(str::to_owned)))
    }

    pub fn nick(&self, nickname: &str) -> Scheduled {
        self.enqueue(Nick::new(nickname))
    }

    pub fn user(&self, username: &str, realname: &str) -> Scheduled {
        self.enqueue(User::new(username, "0", "*", realname))
    }

    pub fn pass(&self, password: &str) -> Scheduled {
        self.enqueue(Pass::new(password))
    }

    pub fn cap(&self, subcommand: &str, capabilities: &[&str]) -> Scheduled {
        self.enqueue(Cap::new(
            subcommand,
            capabilities.iter().map(|c| (*c).to_owned()).collect(),
        ))
    }

    pub fn ping(&self, token: &str) -> Scheduled {
        self.enqueue(Ping::new(token))
    }

    pub fn pong(&self, ping: &Ping) -> Scheduled {
        self.enqueue(Pong::reply_to(ping))
    }

    pub fn quit(&self, message: Option<&str>) -> Scheduled {
        self.enqueue(Quit::new(message.map(str::to_owned)))
    }

    pub fn raw(&self, line: &str) -> Scheduled {
        self.enqueue(Raw::new(line))
    }
}
