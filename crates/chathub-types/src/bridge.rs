//! Wire types exchanged with the host messaging bridge.
//!
//! A dispatch sends one [`BridgeRequest`] and receives a sequence of
//! [`BridgeUpdate`]s. Only the first response entry of each update is
//! meaningful; its [`ResponseStatus`] drives the dispatch state machine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fmt;
use std::str::FromStr;

use crate::conversation::{Attachment, BotId, ConversationId};

/// Fallback text when the bridge reports an error without a status text.
pub const DEFAULT_STATUS_ERROR_TEXT: &str = "Une erreur est survenue";

/// Fallback text when the send call itself fails without a message.
pub const DEFAULT_TRANSPORT_ERROR_TEXT: &str = "Impossible de communiquer avec le bot";

/// Prefix of every error message inserted into a conversation.
pub const ERROR_MESSAGE_PREFIX: &str = "Erreur: ";

/// Status carried by a bridge response entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Error,
    Incomplete,
    Complete,
}

impl ResponseStatus {
    /// `Error` and `Complete` end a dispatch.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ResponseStatus::Incomplete)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::Error => write!(f, "error"),
            ResponseStatus::Incomplete => write!(f, "incomplete"),
            ResponseStatus::Complete => write!(f, "complete"),
        }
    }
}

impl FromStr for ResponseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(ResponseStatus::Error),
            "incomplete" => Ok(ResponseStatus::Incomplete),
            "complete" => Ok(ResponseStatus::Complete),
            other => Err(format!("invalid response status: '{other}'")),
        }
    }
}

/// One response entry from the bridge.
///
/// `content` is cumulative: every `incomplete` entry carries the whole text
/// generated so far, not a delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotResponse {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl BotResponse {
    pub fn incomplete(content: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Incomplete,
            status_text: None,
            content: content.into(),
            attachments: None,
        }
    }

    pub fn complete(content: impl Into<String>, attachments: Option<Vec<Attachment>>) -> Self {
        Self {
            status: ResponseStatus::Complete,
            status_text: None,
            content: content.into(),
            attachments,
        }
    }

    pub fn error(status_text: Option<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            status_text,
            content: String::new(),
            attachments: None,
        }
    }

    /// Text shown to the user for an `error` entry.
    pub fn error_text(&self) -> String {
        let reason = self
            .status_text
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(DEFAULT_STATUS_ERROR_TEXT);
        format!("{ERROR_MESSAGE_PREFIX}{reason}")
    }
}

/// A single callback invocation from the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeUpdate {
    pub responses: Vec<BotResponse>,
}

impl BridgeUpdate {
    /// Wrap a single response entry.
    pub fn single(response: BotResponse) -> Self {
        Self {
            responses: vec![response],
        }
    }

    /// The entry the dispatch acts on; later entries are ignored.
    pub fn primary(&self) -> Option<&BotResponse> {
        self.responses.first()
    }
}

/// An outgoing user message addressed to one bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeRequest {
    pub conversation_id: ConversationId,
    pub bot: BotId,
    /// Full text sent to the bridge, including the bot mention.
    pub text: String,
    pub stream: bool,
    pub open_chat: bool,
}

impl BridgeRequest {
    /// Build a streaming request: `"@<bot> <text>"`.
    pub fn new(conversation_id: ConversationId, bot: BotId, user_text: &str) -> Self {
        let text = format!("{} {user_text}", bot.mention());
        Self {
            conversation_id,
            bot,
            text,
            stream: true,
            open_chat: false,
        }
    }
}

/// Failures of the bridge transport itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("send rejected: {0}")]
    Rejected(String),

    #[error("response stream closed before a terminal status")]
    StreamClosed,
}

impl BridgeError {
    /// Text shown to the user when this error ends a dispatch.
    pub fn error_text(&self) -> String {
        let reason = match self {
            BridgeError::Rejected(message) if !message.is_empty() => message.as_str(),
            _ => DEFAULT_TRANSPORT_ERROR_TEXT,
        };
        format!("{ERROR_MESSAGE_PREFIX}{reason}")
    }
}
