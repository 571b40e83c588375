//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and manage conversations from inside the chat.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Create a conversation (optional name).
    New(Option<String>),
    /// List conversations.
    List,
    /// Switch to a conversation by position or id.
    Select(String),
    /// Print the current transcript again.
    History,
    /// Empty the current conversation.
    Clear,
    /// Delete the current conversation.
    Delete,
    /// Clear the terminal screen.
    Screen,
    /// Exit the chat.
    Exit,
    /// Unknown or malformed command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts
        .get(1)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/new" | "/n" => Some(ChatCommand::New(arg)),
        "/list" | "/ls" => Some(ChatCommand::List),
        "/select" | "/s" | "/switch" => match arg {
            Some(reference) => Some(ChatCommand::Select(reference)),
            None => Some(ChatCommand::Unknown("/select (conversation manquante)".to_string())),
        },
        "/history" => Some(ChatCommand::History),
        "/clear" => Some(ChatCommand::Clear),
        "/delete" | "/rm" => Some(ChatCommand::Delete),
        "/cls" => Some(ChatCommand::Screen),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Slash commands shown by `/help`, with their descriptions.
pub const HELP_ENTRIES: &[(&str, &str)] = &[
    ("/help", "Afficher cette aide"),
    ("/new [nom]", "Créer une conversation et y basculer"),
    ("/list", "Lister les conversations"),
    ("/select <n|id>", "Changer de conversation"),
    ("/history", "Afficher la conversation en cours"),
    ("/clear", "Vider la conversation en cours"),
    ("/delete", "Supprimer la conversation en cours"),
    ("/cls", "Effacer l'écran"),
    ("/exit", "Quitter"),
];

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Commandes disponibles :").bold());
    println!();
    for (command, description) in HELP_ENTRIES {
        println!("  {:<16} {}", style(command).cyan(), description);
    }
    println!();
    println!(
        "  {}",
        style("Ctrl+D pour quitter, Ctrl+C sans perte de message").dim()
    );
    println!();
}
