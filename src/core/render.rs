//! Status line encoding

use barfeed_core::BlockInfo;
use log::error;

/// Prefix the block text with its label
///
/// `short_text` is only prefixed when the block sets one, so the host bar
/// keeps falling back to the labeled `full_text`.
pub fn labeled(label: &str, mut info: BlockInfo) -> BlockInfo {
    if label.is_empty() {
        return info;
    }
    info.full_text = format!("{} {}", label, info.full_text);
    if let Some(short) = info.short_text.as_mut() {
        *short = format!("{} {}", label, short);
    }
    info
}

/// Encode one status line: `,[ {block},{block} ]`
///
/// A block that fails to encode is left out; the rest of the line is
/// still written.
pub fn render_line<'a, I>(blocks: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a BlockInfo)>,
{
    let entries: Vec<String> = blocks
        .into_iter()
        .filter_map(|(label, info)| {
            let info = labeled(label, info.clone());
            match serde_json::to_string(&info) {
                Ok(json) => Some(json),
                Err(e) => {
                    error!("Failed to encode block {}: {}", info.instance, e);
                    None
                }
            }
        })
        .collect();
    format!(",[ {} ]", entries.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use barfeed_core::{Align, Markup};
    use serde_json::Value;

    #[test]
    fn test_label_prefix() {
        let info = labeled("CPU", BlockInfo::text("12%"));
        assert_eq!(info.full_text, "CPU 12%");
        assert!(info.short_text.is_none());

        let info = labeled(
            "CPU",
            BlockInfo {
                short_text: Some("12".to_string()),
                ..BlockInfo::text("12%")
            },
        );
        assert_eq!(info.short_text.as_deref(), Some("CPU 12"));
    }

    #[test]
    fn test_empty_label_leaves_text() {
        let info = labeled("", BlockInfo::text("12%"));
        assert_eq!(info.full_text, "12%");
    }

    #[test]
    fn test_line_shape() {
        let a = BlockInfo {
            name: "a".to_string(),
            ..BlockInfo::text("x")
        };
        let b = BlockInfo {
            name: "b".to_string(),
            ..BlockInfo::text("y")
        };
        let line = render_line([("", &a), ("L", &b)]);
        assert_eq!(
            line,
            r#",[ {"full_text":"x","name":"a"},{"full_text":"L y","name":"b"} ]"#
        );
    }

    #[test]
    fn test_empty_bar() {
        assert_eq!(render_line(std::iter::empty()), ",[  ]");
    }

    #[test]
    fn test_line_round_trips_without_field_loss() {
        let info = BlockInfo {
            full_text: "vol 40%".to_string(),
            short_text: Some("40%".to_string()),
            color: Some("#ECEFF4".to_string()),
            background: Some("#2E3440".to_string()),
            border: Some("#4C566A".to_string()),
            min_width: Some(80),
            align: Some(Align::Center),
            name: "Volume".to_string(),
            instance: "id_0".to_string(),
            urgent: Some(false),
            separator: Some(true),
            separator_block_width: Some(15),
            markup: Some(Markup::Pango),
            border_top: Some(1),
            border_bottom: Some(2),
            border_left: Some(0),
            border_right: Some(3),
        };
        let line = render_line([("", &info), ("", &BlockInfo::text("plain"))]);

        let array = line.strip_prefix(',').unwrap();
        let decoded: Vec<BlockInfo> = serde_json::from_str(array).unwrap();
        assert_eq!(decoded[0], info);

        let reencoded = serde_json::to_value(&decoded).unwrap();
        let original: Value = serde_json::from_str(array).unwrap();
        assert_eq!(reencoded, original);
    }
}
