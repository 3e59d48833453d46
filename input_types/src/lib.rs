#![no_std]

//! # Input Types
//!
//! Key-press events as delivered to the shell and the editor.
//!
//! ## Philosophy
//!
//! - **Decoded, not raw**: a key press carries its character (if it has one)
//!   next to the raw set-1 scancode it came from
//! - **Presses only**: release codes never become events
//! - **Testable**: events are plain values and can be scripted or serialized
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A PS/2 driver or interrupt handler
//! - A keyboard layout system (US QWERTY only, no shift state)
//! - Unicode input

use core::fmt;
use serde::{Deserialize, Serialize};

/// Set-1 scancodes with a meaning beyond their character
pub mod scancode {
    pub const ESCAPE: u8 = 0x01;
    pub const BACKSPACE: u8 = 0x0E;
    pub const TAB: u8 = 0x0F;
    pub const ENTER: u8 = 0x1C;
    pub const SPACE: u8 = 0x39;
    pub const UP: u8 = 0x48;
    pub const LEFT: u8 = 0x4B;
    pub const RIGHT: u8 = 0x4D;
    pub const DOWN: u8 = 0x50;

    /// High bit marks a key release
    pub const RELEASE_BIT: u8 = 0x80;
}

/// US QWERTY translation for make codes 0x00..0x3A
const SCANCODE_TO_ASCII: [u8; 58] = [
    0, 0, b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'0', b'-', b'=', 0, 0, //
    b'q', b'w', b'e', b'r', b't', b'y', b'u', b'i', b'o', b'p', b'[', b']', b'\n', 0, //
    b'a', b's', b'd', b'f', b'g', b'h', b'j', b'k', b'l', b';', b'\'', b'`', 0, b'\\', //
    b'z', b'x', b'c', b'v', b'b', b'n', b'm', b',', b'.', b'/', 0, 0, 0, b' ',
];

/// Translates a make code to its unshifted character
pub fn scancode_to_ascii(code: u8) -> Option<char> {
    match SCANCODE_TO_ASCII.get(code as usize) {
        Some(&0) | None => None,
        Some(&byte) => Some(byte as char),
    }
}

/// Finds the make code that produces `c`, if any
pub fn ascii_to_scancode(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    let byte = c as u8;
    SCANCODE_TO_ASCII
        .iter()
        .position(|&entry| entry != 0 && entry == byte)
        .map(|pos| pos as u8)
}

/// A single key press
///
/// `text` is the decoded character; `scancode` is the raw make code, or 0
/// when the character has no key on the reference layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<char>,
    pub scancode: u8,
}

impl KeyEvent {
    pub fn new(text: Option<char>, scancode: u8) -> Self {
        Self { text, scancode }
    }

    /// A press that types `c`
    pub fn char(c: char) -> Self {
        match c {
            '\n' => Self::enter(),
            _ => Self::new(Some(c), ascii_to_scancode(c).unwrap_or(0)),
        }
    }

    /// A press of a key with no character, e.g. an arrow key
    pub fn special(scancode: u8) -> Self {
        Self::new(None, scancode)
    }

    pub fn enter() -> Self {
        Self::new(Some('\n'), scancode::ENTER)
    }

    pub fn escape() -> Self {
        Self::special(scancode::ESCAPE)
    }

    pub fn backspace() -> Self {
        Self::special(scancode::BACKSPACE)
    }

    /// Decodes a raw scancode; release codes yield `None`
    pub fn from_scancode(code: u8) -> Option<Self> {
        if code & scancode::RELEASE_BIT != 0 {
            return None;
        }
        Some(Self::new(scancode_to_ascii(code), code))
    }

    pub fn is_enter(&self) -> bool {
        self.scancode == scancode::ENTER || self.text == Some('\n')
    }

    pub fn is_backspace(&self) -> bool {
        self.scancode == scancode::BACKSPACE
    }

    pub fn is_escape(&self) -> bool {
        self.scancode == scancode::ESCAPE
    }

    /// Returns the character if it is printable ASCII (0x20..=0x7E)
    pub fn printable(&self) -> Option<char> {
        self.text.filter(|c| (' '..='~').contains(c))
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.text, self.scancode) {
            (_, scancode::ENTER) => write!(f, "Enter"),
            (_, scancode::ESCAPE) => write!(f, "Escape"),
            (_, scancode::BACKSPACE) => write!(f, "Backspace"),
            (_, scancode::UP) => write!(f, "Up"),
            (_, scancode::DOWN) => write!(f, "Down"),
            (_, scancode::LEFT) => write!(f, "Left"),
            (_, scancode::RIGHT) => write!(f, "Right"),
            (Some(c), _) => write!(f, "{:?}", c),
            (None, code) => write!(f, "0x{:02x}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_scancode_table() {
        assert_eq!(scancode_to_ascii(0x10), Some('q'));
        assert_eq!(scancode_to_ascii(0x1C), Some('\n'));
        assert_eq!(scancode_to_ascii(scancode::SPACE), Some(' '));
        assert_eq!(scancode_to_ascii(scancode::ESCAPE), None);
        assert_eq!(scancode_to_ascii(scancode::UP), None);
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(ascii_to_scancode('i'), Some(0x17));
        assert_eq!(ascii_to_scancode('Q'), None);
        assert_eq!(ascii_to_scancode('é'), None);
    }

    #[test]
    fn test_char_event() {
        let event = KeyEvent::char('h');
        assert_eq!(event.text, Some('h'));
        assert_eq!(event.scancode, 0x23);
        assert_eq!(event.printable(), Some('h'));

        let upper = KeyEvent::char('H');
        assert_eq!(upper.scancode, 0);
        assert_eq!(upper.printable(), Some('H'));
    }

    #[test]
    fn test_newline_is_enter() {
        let event = KeyEvent::char('\n');
        assert!(event.is_enter());
        assert_eq!(event.printable(), None);
    }

    #[test]
    fn test_from_scancode() {
        let event = KeyEvent::from_scancode(0x17).unwrap();
        assert_eq!(event.text, Some('i'));
        assert!(KeyEvent::from_scancode(0x17 | scancode::RELEASE_BIT).is_none());

        let up = KeyEvent::from_scancode(scancode::UP).unwrap();
        assert_eq!(up.text, None);
    }

    #[test]
    fn test_special_keys() {
        assert!(KeyEvent::escape().is_escape());
        assert!(KeyEvent::backspace().is_backspace());
        assert_eq!(KeyEvent::escape().printable(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(KeyEvent::enter().to_string(), "Enter");
        assert_eq!(KeyEvent::special(scancode::LEFT).to_string(), "Left");
        assert_eq!(KeyEvent::char('x').to_string(), "'x'");
    }

    #[test]
    fn test_serialization() {
        let event = KeyEvent::char('a');
        let json = serde_json::to_string(&event).unwrap();
        let back: KeyEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
