//! Interactive terminal chat for ChatHub.
//!
//! Implements the chat loop: typing spinner driven by change events,
//! markdown rendering of bot replies, slash commands for conversation
//! management. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
