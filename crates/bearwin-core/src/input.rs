//! Keyboard, mouse and cursor vocabulary shared by events and windows.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A character key, identified by its character code.
///
/// The value *is* the code delivered by the platform, so converting a raw
/// code is a range check followed by an identity cast. Named constants cover
/// the control keys the platform reports as characters plus the printable
/// ASCII range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(u8);

impl KeyCode {
    pub const BACKSPACE: Self = Self(8);
    pub const TAB: Self = Self(9);
    pub const ENTER: Self = Self(13);
    pub const ESCAPE: Self = Self(27);
    pub const SPACE: Self = Self(b' ');
    pub const EXCLAMATION_MARK: Self = Self(b'!');
    pub const QUOTATION_MARK: Self = Self(b'"');
    pub const HASH: Self = Self(b'#');
    pub const DOLLAR: Self = Self(b'$');
    pub const PERCENT: Self = Self(b'%');
    pub const AMPERSAND: Self = Self(b'&');
    pub const APOSTROPHE: Self = Self(b'\'');
    pub const LEFT_PAREN: Self = Self(b'(');
    pub const RIGHT_PAREN: Self = Self(b')');
    pub const ASTERISK: Self = Self(b'*');
    pub const PLUS: Self = Self(b'+');
    pub const COMMA: Self = Self(b',');
    pub const MINUS: Self = Self(b'-');
    pub const FULL_STOP: Self = Self(b'.');
    pub const SLASH: Self = Self(b'/');
    pub const NUM_0: Self = Self(b'0');
    pub const NUM_1: Self = Self(b'1');
    pub const NUM_2: Self = Self(b'2');
    pub const NUM_3: Self = Self(b'3');
    pub const NUM_4: Self = Self(b'4');
    pub const NUM_5: Self = Self(b'5');
    pub const NUM_6: Self = Self(b'6');
    pub const NUM_7: Self = Self(b'7');
    pub const NUM_8: Self = Self(b'8');
    pub const NUM_9: Self = Self(b'9');
    pub const COLON: Self = Self(b':');
    pub const SEMICOLON: Self = Self(b';');
    pub const LESS_THAN: Self = Self(b'<');
    pub const EQUAL: Self = Self(b'=');
    pub const GREATER_THAN: Self = Self(b'>');
    pub const QUESTION_MARK: Self = Self(b'?');
    pub const AT: Self = Self(b'@');
    pub const A: Self = Self(b'A');
    pub const B: Self = Self(b'B');
    pub const C: Self = Self(b'C');
    pub const D: Self = Self(b'D');
    pub const E: Self = Self(b'E');
    pub const F: Self = Self(b'F');
    pub const G: Self = Self(b'G');
    pub const H: Self = Self(b'H');
    pub const I: Self = Self(b'I');
    pub const J: Self = Self(b'J');
    pub const K: Self = Self(b'K');
    pub const L: Self = Self(b'L');
    pub const M: Self = Self(b'M');
    pub const N: Self = Self(b'N');
    pub const O: Self = Self(b'O');
    pub const P: Self = Self(b'P');
    pub const Q: Self = Self(b'Q');
    pub const R: Self = Self(b'R');
    pub const S: Self = Self(b'S');
    pub const T: Self = Self(b'T');
    pub const U: Self = Self(b'U');
    pub const V: Self = Self(b'V');
    pub const W: Self = Self(b'W');
    pub const X: Self = Self(b'X');
    pub const Y: Self = Self(b'Y');
    pub const Z: Self = Self(b'Z');
    pub const LEFT_BRACKET: Self = Self(b'[');
    pub const BACKSLASH: Self = Self(b'\\');
    pub const RIGHT_BRACKET: Self = Self(b']');
    pub const CARET: Self = Self(b'^');
    pub const UNDERSCORE: Self = Self(b'_');
    pub const GRAVE_ACCENT: Self = Self(b'`');
    pub const LEFT_BRACE: Self = Self(b'{');
    pub const VERTICAL_LINE: Self = Self(b'|');
    pub const RIGHT_BRACE: Self = Self(b'}');
    pub const TILDE: Self = Self(b'~');

    /// Converts a raw character code.
    ///
    /// Returns `None` for codes outside the defined set (other control
    /// characters and anything beyond ASCII).
    pub fn from_code(code: usize) -> Option<Self> {
        match code {
            8 | 9 | 13 | 27 | 32..=126 => Some(Self(code as u8)),
            _ => None,
        }
    }

    /// Returns the character code.
    pub fn code(self) -> u8 {
        self.0
    }

    /// Returns the key as a character.
    pub fn as_char(self) -> char {
        char::from(self.0)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::BACKSPACE => f.write_str("Backspace"),
            Self::TAB => f.write_str("Tab"),
            Self::ENTER => f.write_str("Enter"),
            Self::ESCAPE => f.write_str("Escape"),
            Self::SPACE => f.write_str("Space"),
            other => write!(f, "'{}'", other.as_char()),
        }
    }
}

/// A mouse button, listed in translation priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Extra1,
    Extra2,
}

impl MouseButton {
    /// Buttons in the order a multi-button bit-field is resolved.
    pub const PRIORITY: [MouseButton; 5] = [
        Self::Left,
        Self::Right,
        Self::Middle,
        Self::Extra1,
        Self::Extra2,
    ];

    /// The button's bit in the platform's key-state field.
    pub const fn mask(self) -> usize {
        match self {
            Self::Left => 0x0001,
            Self::Right => 0x0002,
            Self::Middle => 0x0010,
            Self::Extra1 => 0x0020,
            Self::Extra2 => 0x0040,
        }
    }
}

/// Modifier keys held during a mouse click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub control: bool,
    pub shift: bool,
}

impl Modifiers {
    const SHIFT: usize = 0x0004;
    const CONTROL: usize = 0x0008;

    /// Extracts modifier state from a key-state bit-field.
    pub const fn from_bits(bits: usize) -> Self {
        Self {
            control: bits & Self::CONTROL != 0,
            shift: bits & Self::SHIFT != 0,
        }
    }
}

/// A system pointer shape, valued by its stock cursor resource id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerShape {
    #[default]
    Arrow,
    IBeam,
    Wait,
    Crosshair,
    UpArrow,
    SizeNwse,
    SizeNesw,
    SizeWe,
    SizeNs,
    Move,
    Blocked,
    Hand,
    Help,
}

impl PointerShape {
    pub const fn resource_id(self) -> u16 {
        match self {
            Self::Arrow => 32512,
            Self::IBeam => 32513,
            Self::Wait => 32514,
            Self::Crosshair => 32515,
            Self::UpArrow => 32516,
            Self::SizeNwse => 32642,
            Self::SizeNesw => 32643,
            Self::SizeWe => 32644,
            Self::SizeNs => 32645,
            Self::Move => 32646,
            Self::Blocked => 32648,
            Self::Hand => 32649,
            Self::Help => 32651,
        }
    }
}

/// A cursor source: a stock shape or a cursor file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    Shape(PointerShape),
    File(PathBuf),
}

impl Default for Cursor {
    fn default() -> Self {
        Self::Shape(PointerShape::Arrow)
    }
}

impl From<PointerShape> for Cursor {
    fn from(shape: PointerShape) -> Self {
        Self::Shape(shape)
    }
}
