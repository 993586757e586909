//! Message parser - Parses raw messages into structured messages

use crate::domain::entities::{Content, Message, Sender};

const COMMAND_PREFIX: char = '/';

/// Parses incoming text into structured Message objects
#[derive(Debug, Clone, Default)]
pub struct MessageParser;

impl MessageParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a text message
    pub fn parse(&self, id: i64, chat_id: i64, text: Option<&str>, sender: Option<Sender>) -> Message {
        let content = match text {
            None => Content::Empty,
            Some(text) => self.parse_content(text),
        };

        Message::new(id, chat_id, content)
            .with_sender_opt(sender)
            .with_raw_text(text.unwrap_or_default())
    }

    fn parse_content(&self, text: &str) -> Content {
        let Some(cmd_text) = text.strip_prefix(COMMAND_PREFIX) else {
            return Content::Text(text.to_string());
        };

        // Split the invocation from its arguments
        let (invocation, args) = match cmd_text.split_once(char::is_whitespace) {
            Some((invocation, args)) => (invocation, args.trim()),
            None => (cmd_text, ""),
        };

        // `/weather@some_bot` names the same command whatever the suffix
        let name = invocation
            .split_once('@')
            .map_or(invocation, |(name, _)| name);

        if name.is_empty() {
            return Content::Text(text.to_string());
        }

        Content::Command {
            name: name.to_string(),
            args: args.to_string(),
        }
    }
}
