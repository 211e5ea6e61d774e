//! Click events read back from the host bar on stdin.

use serde::{Deserialize, Serialize};

/// A pointer event on a rendered block
///
/// Extra fields the host bar sends (modifiers, relative coordinates, ...)
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickMessage {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance: String,
    pub button: u32,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

/// Pointer buttons as numbered by X11
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
    Other(u32),
}

impl From<u32> for MouseButton {
    fn from(code: u32) -> Self {
        match code {
            1 => MouseButton::Left,
            2 => MouseButton::Middle,
            3 => MouseButton::Right,
            4 => MouseButton::ScrollUp,
            5 => MouseButton::ScrollDown,
            other => MouseButton::Other(other),
        }
    }
}

impl ClickMessage {
    pub fn mouse_button(&self) -> MouseButton {
        MouseButton::from(self.button)
    }

    /// Decode one line of the click stream.
    ///
    /// The stream is an endless JSON array, so every line after the first
    /// element starts with a `,`. Blank lines and the opening `[` carry no
    /// event and yield `Ok(None)`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, serde_json::Error> {
        let line = line.trim();
        let line = line.strip_prefix(',').unwrap_or(line).trim_start();
        if line.is_empty() || line == "[" {
            return Ok(None);
        }
        serde_json::from_str(line).map(Some)
    }
}
