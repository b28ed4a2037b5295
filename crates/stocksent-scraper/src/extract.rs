//! Message extraction from rendered message-board HTML.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use stocksent_core::RawMessage;

/// CSS class carried by every message body on the board.
const MESSAGE_BODY_CLASS: &str = "RichTextMessage_body__4qUeP";

/// Combined selector matching both timestamp markers and message bodies, so a
/// single document-order pass can pair each body with its nearest preceding
/// `<time>` element.
static NODE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&format!("time, div.{MESSAGE_BODY_CLASS}")).expect("valid selector")
});

/// Parse rendered HTML into `(timestamp, text)` records in document order.
///
/// Each message body is paired with the most recent `<time datetime=...>`
/// marker seen before it. A body with no preceding timestamp, or with empty
/// text, is skipped and counted as a parse failure (logged, never fatal).
/// Empty input yields an empty vec.
#[must_use]
pub fn extract_messages(html: &str) -> Vec<RawMessage> {
    let document = Html::parse_document(html);

    let mut messages = Vec::new();
    let mut last_timestamp: Option<String> = None;
    let mut parse_failures = 0usize;

    for element in document.select(&NODE_SELECTOR) {
        if element.value().name() == "time" {
            last_timestamp = element.value().attr("datetime").map(str::to_owned);
            continue;
        }

        let text: String = element.text().collect();
        let text = text.trim();

        match &last_timestamp {
            Some(timestamp) if !text.is_empty() => {
                messages.push(RawMessage {
                    timestamp: timestamp.clone(),
                    text: text.to_string(),
                });
            }
            _ => parse_failures += 1,
        }
    }

    if parse_failures > 0 {
        tracing::warn!(
            parse_failures,
            extracted = messages.len(),
            "skipped message bodies missing a timestamp or text"
        );
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_block(timestamp: &str, body: &str) -> String {
        format!(
            "<article><time datetime=\"{timestamp}\">x</time>\
             <div class=\"{MESSAGE_BODY_CLASS}\">{body}</div></article>"
        )
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert!(extract_messages("").is_empty());
    }

    #[test]
    fn html_with_no_messages_yields_empty_sequence() {
        assert!(extract_messages("<html><body><p>nothing here</p></body></html>").is_empty());
    }

    #[test]
    fn two_wellformed_blocks_extract_in_document_order() {
        let html = format!(
            "<html><body>{}{}</body></html>",
            message_block("2025-02-27T08:36:59Z", "TSLA to the moon"),
            message_block("2025-02-27T08:40:10Z", "selling everything"),
        );
        let messages = extract_messages(&html);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].timestamp, "2025-02-27T08:36:59Z");
        assert_eq!(messages[0].text, "TSLA to the moon");
        assert_eq!(messages[1].timestamp, "2025-02-27T08:40:10Z");
        assert_eq!(messages[1].text, "selling everything");
    }

    #[test]
    fn body_without_preceding_timestamp_is_skipped() {
        let html = format!(
            "<html><body><div class=\"{MESSAGE_BODY_CLASS}\">orphaned message</div></body></html>"
        );
        assert!(extract_messages(&html).is_empty());
    }

    #[test]
    fn body_with_empty_text_is_skipped() {
        let html = format!(
            "<html><body><time datetime=\"2025-02-27T08:36:59Z\">x</time>\
             <div class=\"{MESSAGE_BODY_CLASS}\">   </div></body></html>"
        );
        assert!(extract_messages(&html).is_empty());
    }

    #[test]
    fn nested_markup_inside_body_is_flattened() {
        let html = format!(
            "<html><body><time datetime=\"2025-02-27T08:36:59Z\">x</time>\
             <div class=\"{MESSAGE_BODY_CLASS}\">buy <b>now</b>!</div></body></html>"
        );
        let messages = extract_messages(&html);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "buy now!");
    }

    #[test]
    fn timestamp_is_reused_for_following_bodies_until_replaced() {
        let html = format!(
            "<html><body><time datetime=\"2025-02-27T08:00:00Z\">x</time>\
             <div class=\"{MESSAGE_BODY_CLASS}\">first</div>\
             <div class=\"{MESSAGE_BODY_CLASS}\">second</div></body></html>"
        );
        let messages = extract_messages(&html);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].timestamp, messages[1].timestamp);
    }
}
