//! Message parser - Parses raw text into structured messages

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::domain::entities::{Action, Content, Message, User};

static MEMBERSHIP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(Join|Leave) (\S.*)$").expect("membership pattern is valid")
});

/// Parses incoming text into structured Message objects
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }

    /// Parse a text message
    pub fn parse(&self, chat_id: i64, text: impl Into<String>, sender: Option<User>) -> Message {
        let text = text.into();

        if text.starts_with(&self.command_prefix) {
            return self.parse_command(chat_id, &text, sender);
        }

        let content = match parse_membership(&text) {
            Some((action, service)) => Content::Membership { action, service },
            None if text.trim().is_empty() => Content::Empty,
            None => Content::Text(text),
        };

        Message::new(chat_id, content).with_sender_opt(sender)
    }

    /// Parse a command message
    fn parse_command(&self, chat_id: i64, text: &str, sender: Option<User>) -> Message {
        let cmd_text = &text[self.command_prefix.len()..];

        let mut parts = cmd_text.split_whitespace();
        // "/join@families_bot" in group chats
        let name = parts
            .next()
            .map(|n| n.split('@').next().unwrap_or(n))
            .unwrap_or("")
            .to_string();
        let args = parts.map(|s| s.to_string()).collect();

        Message::from_command(chat_id, name, args).with_sender_opt(sender)
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new("/")
    }
}

/// Split `Join <service>` / `Leave <service>` into its action and raw service token.
///
/// The service token is not validated here.
pub fn parse_membership(text: &str) -> Option<(Action, String)> {
    let caps = MEMBERSHIP_RE.captures(text)?;
    let action = caps.get(1)?.as_str().parse().ok()?;
    let service = caps.get(2)?.as_str().to_string();
    Some((action, service))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_membership() {
        assert_eq!(
            parse_membership("Join Netflix"),
            Some((Action::Join, "Netflix".to_string()))
        );
        assert_eq!(
            parse_membership("Leave Yandex+"),
            Some((Action::Leave, "Yandex+".to_string()))
        );
        // unknown services still parse; the coordinator rejects them
        assert_eq!(
            parse_membership("Join Foo"),
            Some((Action::Join, "Foo".to_string()))
        );
    }

    #[test]
    fn test_parse_membership_rejects_malformed() {
        assert_eq!(parse_membership("join Netflix"), None);
        assert_eq!(parse_membership("Join"), None);
        assert_eq!(parse_membership("Join  Netflix"), None);
        assert_eq!(parse_membership("Subscribe Netflix"), None);
        assert_eq!(parse_membership("Joined Netflix"), None);
        assert_eq!(parse_membership("Join Netflix\n"), None);
        assert_eq!(parse_membership("Join Netflix\nLeave GPT"), None);
        assert_eq!(parse_membership("Join\nNetflix"), None);
    }

    #[test]
    fn test_parse_slash_command() {
        let parser = MessageParser::default();
        let msg = parser.parse(1, "/help join", None);
        assert_eq!(
            msg.content,
            Content::Command { name: "help".to_string(), args: vec!["join".to_string()] }
        );

        let msg = parser.parse(1, "/leave@families_bot", None);
        assert_eq!(
            msg.content,
            Content::Command { name: "leave".to_string(), args: vec![] }
        );
    }

    #[test]
    fn test_parse_plain_text() {
        let parser = MessageParser::default();
        let user = User::new(3).with_username("zed");
        let msg = parser.parse(3, "hello there", Some(user.clone()));
        assert_eq!(msg.content, Content::Text("hello there".to_string()));
        assert_eq!(msg.sender, Some(user));
        assert_eq!(parser.parse(3, "   ", None).content, Content::Empty);
    }
}
