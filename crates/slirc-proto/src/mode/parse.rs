//! ISUPPORT-aware MODE parsing.

use crate::isupport::Isupport;

/// One `+x` / `-x` item of a MODE line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeChange {
    /// `true` for `+`, `false` for `-`.
    pub adding: bool,
    /// Mode letter.
    pub mode: char,
    /// Argument consumed by this letter, if any.
    pub arg: Option<String>,
}

impl ModeChange {
    fn new(adding: bool, mode: char, arg: Option<String>) -> Self {
        Self { adding, mode, arg }
    }
}

/// Split a channel MODE into individual changes.
///
/// Letters that take an argument consume the next one in order. A missing
/// argument (e.g. a bare `+b` list query) leaves `arg` empty rather than
/// failing; surplus arguments are ignored. Letters before any sign count as
/// additions.
pub fn parse_channel_modes<S: AsRef<str>>(
    isupport: &Isupport,
    flags: &str,
    args: &[S],
) -> Vec<ModeChange> {
    let mut res = vec![];
    let mut args = args.iter().map(AsRef::as_ref);
    let mut adding = true;

    for c in flags.chars() {
        match c {
            '+' => adding = true,
            '-' => adding = false,
            _ => {
                let arg = if isupport.takes_argument(c, adding) {
                    args.next().map(str::to_owned)
                } else {
                    None
                };
                res.push(ModeChange::new(adding, c, arg));
            }
        }
    }

    res
}
