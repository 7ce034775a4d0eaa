/// Parsed `PREFIX` ISUPPORT token: membership modes and their sigils.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixSpec {
    /// Mode characters, highest rank first (e.g. `ov`).
    pub modes: String,
    /// Sigils matching `modes` position by position (e.g. `@+`).
    pub prefixes: String,
}

impl PrefixSpec {
    /// Parse a `PREFIX` value like `(ov)@+`.
    pub fn parse(s: &str) -> Option<Self> {
        let rest = s.strip_prefix('(')?;
        let (modes, prefixes) = rest.split_once(')')?;
        if modes.chars().count() != prefixes.chars().count() {
            return None;
        }
        Some(Self {
            modes: modes.to_owned(),
            prefixes: prefixes.to_owned(),
        })
    }

    /// Whether `mode` is a per-member mode (op, voice, ...).
    pub fn is_prefix_mode(&self, mode: char) -> bool {
        self.modes.contains(mode)
    }

    /// Mode letter for a NAMES sigil, e.g. `@` → `o`.
    pub fn mode_for_sigil(&self, sigil: char) -> Option<char> {
        self.prefixes
            .chars()
            .position(|c| c == sigil)
            .and_then(|i| self.modes.chars().nth(i))
    }
}

impl Default for PrefixSpec {
    fn default() -> Self {
        Self {
            modes: "qaohv".to_owned(),
            prefixes: "~&@%+".to_owned(),
        }
    }
}

/// Parsed `CHANMODES` ISUPPORT token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChanModes {
    /// Type A: list modes (always have a parameter).
    pub a: String,
    /// Type B: modes that always require a parameter.
    pub b: String,
    /// Type C: modes that require a parameter only when set.
    pub c: String,
    /// Type D: modes that never have a parameter.
    pub d: String,
}

impl ChanModes {
    /// Parse a `CHANMODES` value like `b,k,l,imnpst`.
    ///
    /// Groups beyond the fourth are ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split(',');
        let (a, b, c, d) = (parts.next()?, parts.next()?, parts.next()?, parts.next()?);
        Some(Self {
            a: a.to_owned(),
            b: b.to_owned(),
            c: c.to_owned(),
            d: d.to_owned(),
        })
    }
}

impl Default for ChanModes {
    fn default() -> Self {
        Self {
            a: "beI".to_owned(),
            b: "k".to_owned(),
            c: "l".to_owned(),
            d: "imnpst".to_owned(),
        }
    }
}
