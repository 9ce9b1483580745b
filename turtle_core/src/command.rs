//! Command vocabulary and keyboard shortcuts.
//!
//! Tokens are the semantic values produced by the recognizer.  The closed
//! vocabulary maps to dedicated variants; anything else is carried as a
//! candidate color name.

use std::fmt;

// ════════════════════════════════════════════════════════════════════════════
// Tokens
// ════════════════════════════════════════════════════════════════════════════

pub const CLOSE:   &str = "CLOSE";
pub const FORWARD: &str = "FORWARD";
pub const BACK:    &str = "BACK";
pub const LEFT:    &str = "LEFT";
pub const RIGHT:   &str = "RIGHT";
pub const PENDOWN: &str = "PENDOWN";
pub const PENUP:   &str = "PENUP";
pub const BIGGER:  &str = "BIGGER";
pub const SMALLER: &str = "SMALLER";
pub const COLORS:  &str = "COLORS";

/// Token used by the first grammar revision for BACK.
pub const BACKWARD_LEGACY: &str = "BACKWARD";

// ════════════════════════════════════════════════════════════════════════════
// Command
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Close,
    Forward,
    Back,
    Left,
    Right,
    PenDown,
    PenUp,
    Bigger,
    Smaller,
    Colors,
    /// Any other token, interpreted as a color name.
    Color(String),
}

impl Command {
    /// Every fixed command, in the order shown in the on-screen legend.
    pub const FIXED: [Command; 10] = [
        Command::Forward,
        Command::Back,
        Command::Left,
        Command::Right,
        Command::PenDown,
        Command::PenUp,
        Command::Bigger,
        Command::Smaller,
        Command::Colors,
        Command::Close,
    ];

    /// Parse a recognizer token.  Returns `None` for an empty or
    /// whitespace-only token.  Vocabulary matching is exact; the color
    /// payload keeps the token verbatim (minus surrounding whitespace).
    pub fn parse(token: &str) -> Option<Command> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        let cmd = match token {
            CLOSE   => Command::Close,
            FORWARD => Command::Forward,
            BACK | BACKWARD_LEGACY => Command::Back,
            LEFT    => Command::Left,
            RIGHT   => Command::Right,
            PENDOWN => Command::PenDown,
            PENUP   => Command::PenUp,
            BIGGER  => Command::Bigger,
            SMALLER => Command::Smaller,
            COLORS  => Command::Colors,
            other   => Command::Color(other.to_string()),
        };
        Some(cmd)
    }

    pub fn token(&self) -> &str {
        match self {
            Command::Close    => CLOSE,
            Command::Forward  => FORWARD,
            Command::Back     => BACK,
            Command::Left     => LEFT,
            Command::Right    => RIGHT,
            Command::PenDown  => PENDOWN,
            Command::PenUp    => PENUP,
            Command::Bigger   => BIGGER,
            Command::Smaller  => SMALLER,
            Command::Colors   => COLORS,
            Command::Color(name) => name,
        }
    }

    /// Keyboard shortcut bound to this command, if any.
    pub fn shortcut(&self) -> Option<char> {
        SHORTCUTS.iter().find(|(_, c)| c == self).map(|(k, _)| *k)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Keyboard shortcuts
// ════════════════════════════════════════════════════════════════════════════

/// Static key → command table.  Keys are upper-case letters.
pub static SHORTCUTS: [(char, Command); 10] = [
    ('O', Command::Close),
    ('F', Command::Forward),
    ('B', Command::Back),
    ('L', Command::Left),
    ('R', Command::Right),
    ('D', Command::PenDown),
    ('U', Command::PenUp),
    ('G', Command::Bigger),
    ('S', Command::Smaller),
    ('C', Command::Colors),
];

/// Look up the command bound to `key` (case-insensitive).
pub fn shortcut_command(key: char) -> Option<&'static Command> {
    let key = key.to_ascii_uppercase();
    SHORTCUTS.iter().find(|(k, _)| *k == key).map(|(_, c)| c)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vocabulary() {
        assert_eq!(Command::parse("FORWARD"), Some(Command::Forward));
        assert_eq!(Command::parse("PENDOWN"), Some(Command::PenDown));
        assert_eq!(Command::parse("COLORS"),  Some(Command::Colors));
        assert_eq!(Command::parse(" CLOSE "), Some(Command::Close));
    }

    #[test]
    fn parse_legacy_backward() {
        assert_eq!(Command::parse("BACKWARD"), Some(Command::Back));
    }

    #[test]
    fn parse_empty_is_none() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn unknown_token_is_color() {
        assert_eq!(Command::parse("Red"), Some(Command::Color("Red".into())));
        // vocabulary is case-sensitive, like the color table
        assert_eq!(Command::parse("forward"), Some(Command::Color("forward".into())));
    }

    #[test]
    fn token_round_trips_for_fixed_commands() {
        for cmd in Command::FIXED.iter() {
            assert_eq!(Command::parse(cmd.token()).as_ref(), Some(cmd));
        }
    }

    #[test]
    fn shortcut_table() {
        assert_eq!(shortcut_command('O'), Some(&Command::Close));
        assert_eq!(shortcut_command('g'), Some(&Command::Bigger));
        assert_eq!(shortcut_command('s'), Some(&Command::Smaller));
        assert_eq!(shortcut_command('X'), None);
    }

    #[test]
    fn every_fixed_command_has_a_shortcut() {
        for cmd in Command::FIXED.iter() {
            assert!(cmd.shortcut().is_some(), "{} has no shortcut", cmd);
        }
        assert_eq!(Command::Color("Red".into()).shortcut(), None);
    }
}
