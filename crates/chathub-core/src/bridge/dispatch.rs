//! Per-dispatch state machine.
//!
//! One `Dispatch` exists per outgoing user message:
//!
//! ```text
//! Sent -> Streaming(partial)* -> Complete | Error
//! Sent -> Complete                          (fallback mode)
//! ```
//!
//! `Complete` and `Error` are terminal; updates arriving after a terminal
//! state are ignored. The machine is pure: it never touches the store, it
//! only says what the caller should do next.

use chathub_types::bridge::{BridgeError, BridgeUpdate, ResponseStatus};
use chathub_types::conversation::{BotId, Message};

/// Where a dispatch currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchState {
    /// Handed to the bridge, nothing received yet.
    Sent,
    /// Partial reply received; `partial` is the cumulative text so far.
    Streaming { partial: String },
    Complete,
    Error,
}

impl DispatchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DispatchState::Complete | DispatchState::Error)
    }
}

/// A finished dispatch: the bot message to append.
#[derive(Debug, Clone, PartialEq)]
pub struct Finished {
    pub message: Message,
    /// True when `message` carries an error text rather than a reply.
    pub failed: bool,
}

/// What the caller should do after feeding an update to the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchStep {
    /// Replace the typing indicator text with this cumulative content.
    Partial(String),
    /// Append the message and stop reading the stream.
    Finished(Finished),
    /// Nothing to do.
    Ignored,
}

/// State machine for a single outgoing message.
#[derive(Debug, Clone)]
pub struct Dispatch {
    bot: BotId,
    state: DispatchState,
}

impl Dispatch {
    pub fn new(bot: BotId) -> Self {
        Self {
            bot,
            state: DispatchState::Sent,
        }
    }

    pub fn state(&self) -> &DispatchState {
        &self.state
    }

    pub fn bot(&self) -> &BotId {
        &self.bot
    }

    /// Feed one bridge update. Only the first response entry is consulted.
    pub fn on_update(&mut self, update: BridgeUpdate) -> DispatchStep {
        if self.state.is_terminal() {
            return DispatchStep::Ignored;
        }
        let Some(response) = update.responses.into_iter().next() else {
            return DispatchStep::Ignored;
        };

        match response.status {
            ResponseStatus::Incomplete => {
                self.state = DispatchState::Streaming {
                    partial: response.content.clone(),
                };
                DispatchStep::Partial(response.content)
            }
            ResponseStatus::Complete => {
                self.state = DispatchState::Complete;
                DispatchStep::Finished(Finished {
                    message: Message::bot(self.bot.clone(), response.content, response.attachments),
                    failed: false,
                })
            }
            ResponseStatus::Error => {
                let text = response.error_text();
                self.state = DispatchState::Error;
                DispatchStep::Finished(Finished {
                    message: Message::bot(self.bot.clone(), text, None),
                    failed: true,
                })
            }
        }
    }

    /// The send call failed or the stream ended without a terminal update.
    pub fn on_transport_error(&mut self, err: &BridgeError) -> Finished {
        self.state = DispatchState::Error;
        Finished {
            message: Message::bot(self.bot.clone(), err.error_text(), None),
            failed: true,
        }
    }

    /// The fallback delay elapsed with no bridge available.
    pub fn on_fallback_elapsed(&mut self) -> Finished {
        self.state = DispatchState::Complete;
        Finished {
            message: Message::bot(self.bot.clone(), fallback_reply(&self.bot), None),
            failed: false,
        }
    }
}

/// Canned reply used when no bridge is available.
pub fn fallback_reply(bot: &BotId) -> String {
    format!(
        "Ceci est une réponse de démonstration de {bot}. Pour utiliser les vrais bots IA, \
         cette application doit être lancée sur la plateforme Poe."
    )
}
