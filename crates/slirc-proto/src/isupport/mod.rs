//! ISUPPORT (RPL_ISUPPORT / 005) tokens the client engine relies on.
//!
//! Servers advertise which channel modes exist, which of them take
//! parameters, and which NAMES sigils map to which membership modes. The
//! engine needs this to interpret MODE and NAMES correctly.
//!
//! # Reference
//! - Modern IRC documentation: <https://modern.ircdocs.horse/isupport.html>

mod parser;

pub use parser::{ChanModes, PrefixSpec};

/// Accumulated ISUPPORT state for one connection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Isupport {
    /// Membership modes and sigils.
    pub prefix: PrefixSpec,
    /// Channel mode classes.
    pub chanmodes: ChanModes,
    /// Advertised network name.
    pub network: Option<String>,
    /// Advertised case mapping. Recorded only; names are compared exactly.
    pub casemapping: Option<String>,
}

impl Isupport {
    /// Fold a batch of 005 tokens into the current state.
    ///
    /// `-KEY` restores the default for `KEY`. Unknown or unparseable tokens
    /// are ignored.
    pub fn apply<S: AsRef<str>>(&mut self, tokens: &[S]) {
        for token in tokens {
            let token = token.as_ref();
            if let Some(key) = token.strip_prefix('-') {
                self.reset(key);
                continue;
            }
            let (key, value) = token.split_once('=').unwrap_or((token, ""));
            match key {
                "PREFIX" => {
                    if let Some(spec) = PrefixSpec::parse(value) {
                        self.prefix = spec;
                    }
                }
                "CHANMODES" => {
                    if let Some(modes) = ChanModes::parse(value) {
                        self.chanmodes = modes;
                    }
                }
                "NETWORK" => self.network = Some(value.to_owned()),
                "CASEMAPPING" => self.casemapping = Some(value.to_owned()),
                _ => {}
            }
        }
    }

    fn reset(&mut self, key: &str) {
        match key {
            "PREFIX" => self.prefix = PrefixSpec::default(),
            "CHANMODES" => self.chanmodes = ChanModes::default(),
            "NETWORK" => self.network = None,
            "CASEMAPPING" => self.casemapping = None,
            _ => {}
        }
    }

    /// Whether `mode` consumes a MODE argument when set (`adding`) or unset.
    pub fn takes_argument(&self, mode: char, adding: bool) -> bool {
        if self.prefix.is_prefix_mode(mode)
            || self.chanmodes.a.contains(mode)
            || self.chanmodes.b.contains(mode)
        {
            true
        } else if self.chanmodes.c.contains(mode) {
            adding
        } else {
            false
        }
    }

    /// Whether `mode` is a list mode (bans, exceptions, ...).
    pub fn is_list_mode(&self, mode: char) -> bool {
        self.chanmodes.a.contains(mode) && !self.prefix.is_prefix_mode(mode)
    }

    /// Strip leading membership sigils from a NAMES entry.
    ///
    /// Returns the membership modes in sigil order and the bare nickname.
    pub fn split_sigils<'a>(&self, entry: &'a str) -> (Vec<char>, &'a str) {
        let mut modes = Vec::new();
        let mut rest = entry;
        while let Some(c) = rest.chars().next() {
            match self.prefix.mode_for_sigil(c) {
                Some(mode) => {
                    modes.push(mode);
                    rest = &rest[c.len_utf8()..];
                }
                None => break,
            }
        }
        (modes, rest)
    }
}
