//! Stream framing of the i3bar protocol.

use serde::{Deserialize, Serialize};

/// Opens the endless array of status lines, sent once after the header
pub const STREAM_OPEN: &str = "[[]";

/// First line of the stream, announcing the protocol version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub version: u32,
    pub click_events: bool,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            version: 1,
            click_events: true,
        }
    }
}

impl Header {
    /// The two handshake lines written before any status line
    pub fn handshake(&self) -> Result<[String; 2], serde_json::Error> {
        Ok([serde_json::to_string(self)?, STREAM_OPEN.to_string()])
    }
}
