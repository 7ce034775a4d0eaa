//! Fake IRC server.
//!
//! Listens on a loopback port and lets a test script both sides of the
//! conversation with the bot.

use std::time::Duration;

use slirc_proto::message::{parse, ParsedLine};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;
use tokio::time::timeout;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A listening fake server.
pub struct FakeServer {
    listener: TcpListener,
}

impl FakeServer {
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        Ok(Self { listener })
    }

    pub fn port(&self) -> u16 {
        self.listener
            .local_addr()
            .map(|addr| addr.port())
            .unwrap_or_default()
    }

    /// Wait for the bot to connect.
    pub async fn accept(&self) -> anyhow::Result<BotLink> {
        let (stream, _) = timeout(Duration::from_secs(10), self.listener.accept()).await??;
        let (read_half, writer) = stream.into_split();
        Ok(BotLink {
            reader: BufReader::new(read_half),
            writer,
        })
    }
}

/// The server side of one bot connection.
pub struct BotLink {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl BotLink {
    /// Send a raw line to the bot.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with("\r\n") {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one line from the bot.
    pub async fn recv(&mut self) -> anyhow::Result<ParsedLine> {
        self.recv_timeout(RECV_TIMEOUT).await
    }

    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<ParsedLine> {
        let mut line = String::new();
        let read = timeout(dur, self.reader.read_line(&mut line)).await??;
        if read == 0 {
            anyhow::bail!("bot closed the connection");
        }
        parse(line.trim_end()).map_err(|e| anyhow::anyhow!("Parse error: {}", e))
    }

    /// Receive lines until one with `verb` arrives, returning it.
    pub async fn recv_verb(&mut self, verb: &str) -> anyhow::Result<ParsedLine> {
        loop {
            let line = self.recv().await?;
            if line.verb == verb {
                return Ok(line);
            }
        }
    }

    /// Read the bot's NICK/USER burst and welcome it as `nick`.
    pub async fn register(&mut self, nick: &str) -> anyhow::Result<()> {
        let line = self.recv_verb("NICK").await?;
        anyhow::ensure!(line.params() == [nick], "unexpected NICK {:?}", line.params());
        self.recv_verb("USER").await?;
        self.send_raw(&format!(":irc.test 001 {} :Welcome to the test network", nick))
            .await?;
        self.send_raw(&format!(
            ":irc.test 005 {} PREFIX=(ov)@+ CHANMODES=b,k,l,imnt NETWORK=Test :are supported",
            nick
        ))
        .await
    }
}
