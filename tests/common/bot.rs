//! Test bot process management.

use std::io::Write;
use std::process::{Child, Command, Stdio};

use tempfile::NamedTempFile;

/// A running `slircbot` process. Killed on drop.
pub struct TestBot {
    child: Child,
    // Kept alive until the process is gone.
    _config: NamedTempFile,
}

impl TestBot {
    /// Start the bot with a single connection to `127.0.0.1:port`.
    ///
    /// `extra` is appended to the `[[connections]]` block.
    pub fn spawn(port: u16, extra: &str) -> anyhow::Result<Self> {
        let mut config = NamedTempFile::new()?;
        write!(
            config,
            r#"
log_level = "debug"

[[connections]]
server = "127.0.0.1"
port = {}
nickname = "bot"
{}
"#,
            port, extra
        )?;
        config.flush()?;

        let child = Command::new(env!("CARGO_BIN_EXE_slircbot"))
            .arg(config.path())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        Ok(Self {
            child,
            _config: config,
        })
    }

    /// Whether the process has exited.
    #[allow(dead_code)]
    pub fn has_exited(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(Some(_)))
    }
}

impl Drop for TestBot {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
