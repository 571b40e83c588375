//! Conversation, message, and attachment types for ChatHub.
//!
//! These types model the persisted conversation list: named threads bound to
//! one bot persona, their append-only message transcripts, and the attachments
//! a bot may return with a completed reply.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Preview shown for a conversation that has no messages.
pub const NEW_CONVERSATION_PREVIEW: &str = "Nouvelle conversation";

/// Default number of characters kept in a conversation preview.
pub const DEFAULT_PREVIEW_LENGTH: usize = 50;

/// Sender value used for messages typed by the local user.
pub const USER_SENDER: &str = "user";

/// Unique identifier of a conversation (UUIDv7, time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub Uuid);

impl ConversationId {
    /// Generate a fresh timestamp-derived identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConversationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Unique identifier of a message (UUIDv7, time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle of a bot persona (e.g. `GPT-4o`).
///
/// Whether a handle is recognized is decided by the bot catalog in
/// `chathub-core`, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BotId(pub String);

impl BotId {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Mention syntax used to address this bot through the bridge.
    pub fn mention(&self) -> String {
        format!("@{}", self.0)
    }
}

impl fmt::Display for BotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BotId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Author of a message: the local user or a bot persona.
///
/// Serialized as a plain string: `"user"` or the bot handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Sender {
    User,
    Bot(BotId),
}

impl Sender {
    pub fn is_user(&self) -> bool {
        matches!(self, Sender::User)
    }

    /// The bot that authored the message, if any.
    pub fn bot(&self) -> Option<&BotId> {
        match self {
            Sender::User => None,
            Sender::Bot(bot) => Some(bot),
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => f.write_str(USER_SENDER),
            Sender::Bot(bot) => write!(f, "{bot}"),
        }
    }
}

impl From<Sender> for String {
    fn from(value: Sender) -> Self {
        value.to_string()
    }
}

impl From<String> for Sender {
    fn from(value: String) -> Self {
        if value == USER_SENDER {
            Sender::User
        } else {
            Sender::Bot(BotId(value))
        }
    }
}

/// A file or image returned alongside a completed bot reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    pub url: String,
    pub mime_type: String,
    /// Whether the host asked for this attachment to be displayed inline.
    pub is_inline: bool,
}

impl Attachment {
    /// Inline attachments are only rendered as images when the MIME type is
    /// an image type; everything else is shown as a file chip.
    pub fn is_inline_image(&self) -> bool {
        self.is_inline && self.mime_type.starts_with("image/")
    }
}

/// A single message within a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Present only on completed bot replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl Message {
    /// A message typed by the local user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender: Sender::User,
            content: content.into(),
            timestamp: Utc::now(),
            attachments: None,
        }
    }

    /// A message authored by a bot persona.
    pub fn bot(bot: BotId, content: impl Into<String>, attachments: Option<Vec<Attachment>>) -> Self {
        Self {
            id: MessageId::new(),
            sender: Sender::Bot(bot),
            content: content.into(),
            timestamp: Utc::now(),
            attachments,
        }
    }
}

/// A named thread of messages exchanged with one bot persona.
///
/// `messages` is append-only apart from [`Conversation::clear_messages`], and
/// `last_message` is always derived from the latest appended message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    pub name: String,
    pub bot: BotId,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub last_message: String,
}

impl Conversation {
    /// Create an empty conversation. Validation is the caller's job.
    pub fn new(name: impl Into<String>, bot: BotId) -> Self {
        Self {
            id: ConversationId::new(),
            name: name.into(),
            bot,
            messages: Vec::new(),
            created_at: Utc::now(),
            last_message: NEW_CONVERSATION_PREVIEW.to_string(),
        }
    }

    /// Append a message and refresh the preview from its content.
    pub fn push_message(&mut self, message: Message, preview_length: usize) {
        self.last_message = preview_text(&message.content, preview_length);
        self.messages.push(message);
    }

    /// Drop every message and reset the preview to the sentinel.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
        self.last_message = NEW_CONVERSATION_PREVIEW.to_string();
    }

    pub fn latest_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Build a conversation preview: the full content when it fits in `limit`
/// characters, otherwise the first `limit` characters followed by `...`.
///
/// Counts Unicode scalar values, not grapheme clusters.
pub fn preview_text(content: &str, limit: usize) -> String {
    match content.char_indices().nth(limit) {
        None => content.to_string(),
        Some((cut, _)) => format!("{}...", &content[..cut]),
    }
}
