//! Block scheduling, rendering and click dispatch

mod bar;
mod block;
mod input;
mod output;
mod render;

pub use bar::{min_refresh_interval, Bar, BlockUpdate, RunningBar, UPDATE_CHANNEL_CAPACITY};
pub use block::Block;
pub use input::{spawn_stdin_reader, ClickLines, CLICK_CHANNEL_CAPACITY};
pub use output::Output;
pub use render::{labeled, render_line};
