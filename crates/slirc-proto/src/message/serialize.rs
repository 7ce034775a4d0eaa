//! Wire rendering shared by the typed messages.

/// Builds one CRLF-terminated protocol line.
///
/// Middle parameters are written as-is; the trailing parameter is always
/// written with a leading `:` so it may contain spaces or be empty.
///
/// ```
/// use slirc_proto::message::LineWriter;
///
/// let line = LineWriter::new("KICK").param("#chan").param("nick").trailing("bye now");
/// assert_eq!(line.finish(), "KICK #chan nick :bye now\r\n");
/// ```
#[derive(Debug)]
pub struct LineWriter {
    buf: String,
}

impl LineWriter {
    /// Start a line with the given verb.
    pub fn new(verb: &str) -> Self {
        let mut buf = String::with_capacity(64);
        buf.push_str(verb);
        Self { buf }
    }

    /// Append a middle parameter.
    pub fn param(mut self, value: &str) -> Self {
        self.buf.push(' ');
        self.buf.push_str(value);
        self
    }

    /// Append each middle parameter in order.
    pub fn params<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values.into_iter().fold(self, |w, v| w.param(v.as_ref()))
    }

    /// Append the trailing parameter.
    pub fn trailing(mut self, value: &str) -> Self {
        self.buf.push_str(" :");
        self.buf.push_str(value);
        self
    }

    /// Append the trailing parameter if present.
    pub fn trailing_opt(self, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.trailing(v),
            None => self,
        }
    }

    /// Terminate the line with CRLF.
    pub fn finish(mut self) -> String {
        self.buf.push_str("\r\n");
        self.buf
    }
}
