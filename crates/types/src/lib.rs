//! barfeed-types: Wire types shared by all barfeed crates.
//!
//! This crate holds the pure data types of the i3bar protocol (blocks,
//! click events, the stream header). It has no runtime dependencies
//! beyond serde, so modules can depend on it without pulling in tokio.

pub mod block_info;
pub mod click;
pub mod protocol;

// Re-export commonly used types at the crate root for convenience
pub use block_info::{Align, BlockInfo, Markup, ALERT_COLOR};
pub use click::{ClickMessage, MouseButton};
pub use protocol::{Header, STREAM_OPEN};
