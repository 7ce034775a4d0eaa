//! Connection - drives one IRC server link.
//!
//! ```text
//!   connect ──▶ register (PASS/NICK/USER, flood control off)
//!                  │
//!                  ▼
//!          tokio::select! loop
//!          ├── inbound line ──▶ parse ──▶ decode ──▶ State::apply ──▶ BotEvent
//!          ├── queue wakeup / next due time
//!          ├── liveness tick (PING probe, timeout)
//!          └── shutdown ──▶ QUIT
//!                  │        (due queue items are written every iteration)
//!                  ▼
//!   close ──▶ discard queue, tear down state, BotEvent::Closed
//!                  │
//!                  └──▶ reconnect after the configured delay
//! ```

use std::sync::Arc;
use std::time::Instant;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use slirc_proto::command::{Encodable, Incoming, Quit};
use slirc_proto::message::parse;
use slirc_proto::LineCodec;
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio_util::codec::Framed;
use tracing::{debug, info, info_span, trace, warn, Instrument};

use super::events::{BotEvent, EVENT_CAPACITY};
use super::liveness::{check_period, Liveness, LivenessCheck};
use crate::config::ConnectionConfig;
use crate::error::ConnectionError;
use crate::queue::QueueHandle;
use crate::state::{State, Transition};

const QUIT_MESSAGE: &str = "Shutting down";

type LineSink = SplitSink<Framed<TcpStream, LineCodec>, String>;

/// What one pass of the event loop decided.
enum SelectResult {
    /// Keep going; due queue items are written at the top of the loop.
    Continue,
    /// End the session.
    Close(Result<(), ConnectionError>),
}

/// A bot connection to one server.
///
/// Collaborators take [`queue`](Self::queue), [`state`](Self::state) and
/// [`subscribe`](Self::subscribe) handles before handing the connection to
/// [`run`](Self::run). The handles stay valid across reconnects.
pub struct Connection {
    config: ConnectionConfig,
    queue: QueueHandle,
    state: Arc<Mutex<State>>,
    events: broadcast::Sender<BotEvent>,
}

impl Connection {
    pub fn new(config: ConnectionConfig) -> Self {
        let queue = QueueHandle::new(&config.flood);
        let state = State::new(&config.nickname, queue.clone());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            config,
            queue,
            state: Arc::new(Mutex::new(state)),
            events,
        }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Outbound queue shared with collaborators.
    pub fn queue(&self) -> QueueHandle {
        self.queue.clone()
    }

    /// Mirrored channel and user state. Lock it only briefly; the
    /// connection loop takes the same lock for every inbound message.
    pub fn state(&self) -> Arc<Mutex<State>> {
        Arc::clone(&self.state)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BotEvent> {
        self.events.subscribe()
    }

    /// Run until `shutdown` fires, reconnecting after every loss when
    /// reconnection is enabled.
    ///
    /// Returns the error that ended the last session when reconnection is
    /// disabled.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> Result<(), ConnectionError> {
        let span = info_span!("connection", server = %self.config.address());
        async move {
            loop {
                *self.state.lock() = State::new(&self.config.nickname, self.queue.clone());

                let result = self.session(&mut shutdown).await;
                self.close(&result);

                let error = match result {
                    Ok(()) => return Ok(()),
                    Err(e) => e,
                };
                let Some(delay) = self.config.reconnect_delay() else {
                    return Err(error);
                };

                info!(delay_secs = delay.as_secs(), "Reconnecting");
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = shutdown.recv() => return Ok(()),
                }
            }
        }
        .instrument(span)
        .await
    }

    /// One transport lifetime, from connect to close.
    async fn session(
        &self,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> Result<(), ConnectionError> {
        info!("Connecting");
        let stream = TcpStream::connect(self.config.address()).await?;
        let (mut sink, mut lines) = Framed::new(stream, LineCodec::new()).split();

        info!("Connected");
        let _ = self.events.send(BotEvent::Connected);
        let stale = self.queue.discard();
        if !stale.is_empty() {
            warn!(count = stale.len(), "Discarding messages queued while disconnected");
        }
        self.register();

        let mut liveness = Liveness::new(Instant::now());
        let mut ping_check = tokio::time::interval(check_period(&self.config.ping));
        // First tick fires immediately, we don't want that
        ping_check.tick().await;

        loop {
            self.write_due(&mut sink).await?;

            let next_due = self.queue.next_due();
            let wake_at = tokio::time::Instant::from_std(next_due.unwrap_or_else(Instant::now));

            let select_result = tokio::select! {
                line = lines.next() => match line {
                    Some(Ok(line)) => {
                        liveness.touch(Instant::now());
                        self.handle_line(&line)
                    }
                    Some(Err(e)) => SelectResult::Close(Err(e.into())),
                    None => SelectResult::Close(Err(ConnectionError::TransportLost)),
                },

                _ = self.queue.notified() => SelectResult::Continue,

                _ = tokio::time::sleep_until(wake_at), if next_due.is_some() => {
                    SelectResult::Continue
                }

                _ = ping_check.tick() => {
                    match liveness.check(Instant::now(), &self.config.ping) {
                        LivenessCheck::Alive => SelectResult::Continue,
                        LivenessCheck::SendPing => {
                            debug!("Server idle, sending PING");
                            self.queue.ping(&self.config.server);
                            SelectResult::Continue
                        }
                        LivenessCheck::TimedOut(idle) => {
                            SelectResult::Close(Err(ConnectionError::PingTimeout(idle)))
                        }
                    }
                }

                _ = shutdown.recv() => {
                    info!("Shutdown signal received - quitting");
                    // Bypass the queue: flood pacing must not hold up a QUIT.
                    let quit = Quit::new(Some(QUIT_MESSAGE.to_owned())).encode();
                    let _ = sink.send(quit).await;
                    SelectResult::Close(Ok(()))
                }
            };

            if let SelectResult::Close(result) = select_result {
                return result;
            }
        }
    }

    fn register(&self) {
        self.queue.set_flood_control(false);
        if let Some(password) = &self.config.password {
            self.queue.pass(password);
        }
        self.queue.nick(&self.config.nickname);
        self.queue.user(&self.config.username, &self.config.realname);
    }

    /// Write every queue item that is due.
    ///
    /// Items that cannot go on the wire are skipped; only transport errors
    /// end the session.
    async fn write_due(&self, sink: &mut LineSink) -> Result<(), ConnectionError> {
        let due = self.queue.flush();
        if due.is_empty() {
            return Ok(());
        }
        for item in due {
            let line = match LineCodec::sanitize(item.message.encode()) {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, message = ?item.message, "Dropping unsendable message");
                    continue;
                }
            };
            trace!(line = %line.trim_end(), "->");
            sink.feed(line).await?;
        }
        sink.flush().await?;
        Ok(())
    }

    /// Apply one inbound line. Lines that fail to parse or decode are
    /// logged and skipped.
    fn handle_line(&self, raw: &str) -> SelectResult {
        trace!(line = %raw, "<-");
        let line = match parse(raw) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, line = %raw, "Discarding unparseable line");
                return SelectResult::Continue;
            }
        };
        let message = match Incoming::decode(&line) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, line = %raw, "Discarding malformed message");
                return SelectResult::Continue;
            }
        };

        let transition = self.state.lock().apply(&message);
        let _ = self.events.send(BotEvent::Message(message));

        match transition {
            Some(Transition::Registered { nickname }) => {
                for channel in &self.config.channels {
                    self.queue.join(channel);
                }
                let _ = self.events.send(BotEvent::Registered { nickname });
                SelectResult::Continue
            }
            Some(Transition::Closing { reason }) => {
                SelectResult::Close(Err(ConnectionError::ServerError(reason)))
            }
            None => SelectResult::Continue,
        }
    }

    /// Tear down after a session ends, however it ended.
    fn close(&self, result: &Result<(), ConnectionError>) {
        let unsent = self.queue.discard();
        if !unsent.is_empty() {
            warn!(count = unsent.len(), "Discarding unsent messages");
        }
        self.state.lock().teardown();

        let reason = match result {
            Ok(()) => {
                info!("Connection closed");
                QUIT_MESSAGE.to_owned()
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "Connection lost");
                e.to_string()
            }
        };
        let _ = self.events.send(BotEvent::Closed { reason });
    }
}
