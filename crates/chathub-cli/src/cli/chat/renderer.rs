//! Terminal rendering of chat messages.
//!
//! Bot replies are rendered as markdown through `termimad`; user messages
//! are echoed plain. Attachments are listed under the message, inline
//! images marked differently from file chips.

use console::style;
use termimad::MadSkin;
use termimad::crossterm::style::Color;

use chathub_types::conversation::{Attachment, Message, Sender, preview_text};

/// Characters of partial reply shown next to the typing spinner.
pub const TYPING_PREVIEW_LENGTH: usize = 60;

/// Terminal markdown renderer.
pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);
        Self { skin }
    }

    /// Render markdown text to a terminal string.
    pub fn render_markdown(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    /// Print one finished message with its sender label.
    pub fn print_message(&self, message: &Message) {
        let time = message.timestamp.format("%H:%M");
        match &message.sender {
            Sender::User => {
                println!(
                    "  {} {}",
                    style("Vous >").green().bold(),
                    style(time).dim()
                );
                println!("  {}", message.content);
            }
            Sender::Bot(bot) => {
                println!(
                    "  {} {}",
                    style(format!("{bot} >")).cyan().bold(),
                    style(time).dim()
                );
                let rendered = self.render_markdown(&message.content);
                for line in rendered.trim_end().lines() {
                    println!("  {line}");
                }
            }
        }
        for attachment in message.attachments.iter().flatten() {
            println!("    {}", attachment_line(attachment));
        }
        println!();
    }

    /// Print an error reply from the bot.
    pub fn print_error(&self, message: &Message) {
        let label = message
            .sender
            .bot()
            .map(|b| b.to_string())
            .unwrap_or_default();
        println!(
            "  {} {}",
            style(format!("{label} >")).red().bold(),
            style(&message.content).red()
        );
        println!();
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line description of an attachment.
pub fn attachment_line(attachment: &Attachment) -> String {
    let kind = if attachment.is_inline_image() {
        "🖼"
    } else {
        "📎"
    };
    format!(
        "{kind} {} {}",
        attachment.name,
        style(format!("({})", attachment.url)).dim()
    )
}

/// Spinner text while a reply streams in.
pub fn typing_message(bot: &str, partial: Option<&str>) -> String {
    match partial.filter(|p| !p.is_empty()) {
        Some(partial) => format!(
            "{bot} : {}",
            preview_text(&partial.replace('\n', " "), TYPING_PREVIEW_LENGTH)
        ),
        None => format!("{bot} écrit..."),
    }
}
