//! The renderable unit of the status line.
//!
//! One `BlockInfo` is emitted per block in every render line. Field names
//! follow the i3bar protocol; optional fields that are unset are left out
//! of the JSON entirely so the host bar applies its own defaults.

use serde::{Deserialize, Serialize};

/// Text color used by the error-display fallback block
pub const ALERT_COLOR: &str = "#FF0000";

/// Horizontal alignment of text within `min_width`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// How the host bar should interpret the block text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    None,
    Pango,
}

/// One block of the status line, as sent to i3bar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockInfo {
    pub full_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    /// Block identity, echoed back in click events
    pub name: String,
    /// Disambiguates blocks sharing a name, echoed back in click events
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator_block_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<Markup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_left: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_right: Option<u32>,
}

impl BlockInfo {
    /// Create a block showing only `full_text`
    pub fn text(full_text: impl Into<String>) -> Self {
        Self {
            full_text: full_text.into(),
            ..Self::default()
        }
    }

    /// Copy every field that is set in `defaults` but unset here.
    ///
    /// Explicit values always win, so merging the same defaults twice is a no-op.
    pub fn merge_defaults(&mut self, defaults: &BlockInfo) {
        fill_text(&mut self.full_text, &defaults.full_text);
        fill(&mut self.short_text, &defaults.short_text);
        fill(&mut self.color, &defaults.color);
        fill(&mut self.background, &defaults.background);
        fill(&mut self.border, &defaults.border);
        fill(&mut self.min_width, &defaults.min_width);
        fill(&mut self.align, &defaults.align);
        fill_text(&mut self.name, &defaults.name);
        fill_text(&mut self.instance, &defaults.instance);
        fill(&mut self.urgent, &defaults.urgent);
        fill(&mut self.separator, &defaults.separator);
        fill(&mut self.separator_block_width, &defaults.separator_block_width);
        fill(&mut self.markup, &defaults.markup);
        fill(&mut self.border_top, &defaults.border_top);
        fill(&mut self.border_bottom, &defaults.border_bottom);
        fill(&mut self.border_left, &defaults.border_left);
        fill(&mut self.border_right, &defaults.border_right);
    }

    /// Whether this block is addressed by the given click identity
    pub fn is_identified_by(&self, name: &str, instance: &str) -> bool {
        self.name == name && self.instance == instance
    }
}

fn fill_text(dst: &mut String, src: &str) {
    if dst.is_empty() && !src.is_empty() {
        *dst = src.to_owned();
    }
}

fn fill<T: Clone>(dst: &mut Option<T>, src: &Option<T>) {
    if dst.is_none() && src.is_some() {
        dst.clone_from(src);
    }
}
