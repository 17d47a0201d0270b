use serde::{Deserialize, Serialize};

use std::borrow::Cow;

/// Verb applied to a [`Key`] by [`Device::send_key()`](super::Device::send_key)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Click the key once
    Press,
    /// Release the key after a hold
    Up,
    /// Hold the key down
    Down,
}

impl KeyAction {
    pub(super) fn name(&self) -> &'static str {
        match self {
            Self::Press => "press",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Verb applied to a [`TouchPoint`] by [`Device::send_touch()`](super::Device::send_touch)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Drag,
    Up,
    Down,
}

impl TouchAction {
    pub(super) fn name(&self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Screen coordinate for touch commands, in device resolution
///
/// Values are passed through untouched, the device rejects points outside its screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: u32,
    pub y: u32,
}

impl TouchPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for TouchPoint {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

/// Remote control keys you can interact with using [`Device::send_key()`](super::Device::send_key)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Home,
    /// Rewind
    Rev,
    /// Fast forward
    Fwd,
    /// Play / pause
    Play,
    /// Ok button
    Select,
    /// Directional pad left
    Left,
    /// Directional pad right
    Right,
    /// Directional pad down
    Down,
    /// Directional pad up
    Up,
    Back,
    InstantReplay,
    Info,
    Backspace,
    Search,
    Enter,
    /// Type a single character, e.g. into a search box
    Lit(char),
    /// Empty key used to test whether the device answers at all. See
    /// [`Device::is_alive()`](super::Device::is_alive).
    Probe,
}

impl Key {
    /// Key name as it appears in the request path
    pub(super) fn name(&self) -> Cow<'static, str> {
        match self {
            Self::Home => "Home".into(),
            Self::Rev => "Rev".into(),
            Self::Fwd => "Fwd".into(),
            Self::Play => "Play".into(),
            Self::Select => "Select".into(),
            Self::Left => "Left".into(),
            Self::Right => "Right".into(),
            Self::Down => "Down".into(),
            Self::Up => "Up".into(),
            Self::Back => "Back".into(),
            Self::InstantReplay => "InstantReplay".into(),
            Self::Info => "Info".into(),
            Self::Backspace => "Backspace".into(),
            Self::Search => "Search".into(),
            Self::Enter => "Enter".into(),
            Self::Lit(c) => literal(*c).into(),
            Self::Probe => "".into(),
        }
    }

    pub(super) fn is_probe(&self) -> bool {
        matches!(self, Self::Probe)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Self::Lit(c)
    }
}

// ASCII letters and digits go through as is, anything else is percent encoded
// byte by byte from its UTF-8 form.
fn literal(c: char) -> String {
    let mut key = String::from("Lit_");
    if c.is_ascii_alphanumeric() {
        key.push(c);
    } else {
        let mut buf = [0; 4];
        for b in c.encode_utf8(&mut buf).bytes() {
            key.push_str(&format!("%{:X}", b));
        }
    }
    key
}
