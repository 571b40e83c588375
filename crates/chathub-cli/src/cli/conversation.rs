//! Non-interactive conversation commands: list, show, export, new, delete.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::{Confirm, Input, Select};

use chathub_types::conversation::{Conversation, ConversationId, Message, Sender};

use crate::state::AppState;

use super::chat::renderer::ChatRenderer;

/// Resolve a user-supplied reference to a conversation.
///
/// Accepts a 1-based position in the list, a full id, or an unambiguous id
/// prefix.
pub fn resolve_conversation(list: &[Conversation], reference: &str) -> Option<ConversationId> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    if let Ok(position) = reference.parse::<usize>() {
        if let Some(conv) = position.checked_sub(1).and_then(|i| list.get(i)) {
            return Some(conv.id);
        }
    }

    if let Ok(id) = reference.parse::<ConversationId>() {
        return list.iter().find(|c| c.id == id).map(|c| c.id);
    }

    let mut matches = list
        .iter()
        .filter(|c| c.id.to_string().starts_with(reference));
    match (matches.next(), matches.next()) {
        (Some(conv), None) => Some(conv.id),
        _ => None,
    }
}

async fn find_conversation(state: &AppState, reference: &str) -> Result<Conversation> {
    let list = state.chat_service.list().await;
    let id = resolve_conversation(&list, reference)
        .with_context(|| format!("Conversation « {reference} » introuvable"))?;
    list.into_iter()
        .find(|c| c.id == id)
        .with_context(|| format!("Conversation « {reference} » introuvable"))
}

/// List conversations in a table, most recently created first.
pub async fn list_conversations(state: &AppState, json: bool) -> Result<()> {
    let conversations = state.chat_service.list().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&conversations)?);
        return Ok(());
    }

    if conversations.is_empty() {
        println!();
        println!(
            "  {} Aucune conversation pour l'instant. Créez-en une avec : {}",
            style("i").blue().bold(),
            style("chathub new").yellow()
        );
        println!();
        return Ok(());
    }

    let current = state.chat_service.current_conversation_id().await;

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Nom").fg(Color::White),
        Cell::new("Bot").fg(Color::White),
        Cell::new("Dernier message").fg(Color::White),
        Cell::new("Messages").fg(Color::White),
        Cell::new("Id").fg(Color::White),
    ]);

    for (index, conv) in conversations.iter().enumerate() {
        let name = if Some(conv.id) == current {
            Cell::new(format!("● {}", conv.name)).fg(Color::Green)
        } else {
            Cell::new(&conv.name)
        };
        let id = conv.id.to_string();
        table.add_row(vec![
            Cell::new(index + 1),
            name,
            Cell::new(conv.bot.as_str()).fg(Color::Cyan),
            Cell::new(&conv.last_message).fg(Color::DarkGrey),
            Cell::new(conv.messages.len()),
            Cell::new(&id[..8.min(id.len())]).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Print one conversation's transcript.
pub async fn show_conversation(state: &AppState, reference: &str, json: bool) -> Result<()> {
    let conv = find_conversation(state, reference).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&conv)?);
        return Ok(());
    }

    let renderer = ChatRenderer::new();
    println!();
    println!(
        "  {} {}",
        style(&conv.name).cyan().bold(),
        style(format!("avec {}", conv.bot)).dim()
    );
    println!();
    if conv.messages.is_empty() {
        println!("  {}", style("(aucun message)").dim());
        println!();
    }
    for message in &conv.messages {
        renderer.print_message(message);
    }
    Ok(())
}

/// Export a conversation as markdown, or as JSON with `--json`.
pub async fn export_conversation(state: &AppState, reference: &str, json: bool) -> Result<()> {
    let conv = find_conversation(state, reference).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&conv)?);
        return Ok(());
    }

    print!("{}", to_markdown(&conv));
    Ok(())
}

/// Markdown rendering of a conversation.
pub fn to_markdown(conv: &Conversation) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", conv.name));
    out.push_str(&format!("- **Bot :** {}\n", conv.bot));
    out.push_str(&format!(
        "- **Créée le :** {}\n",
        conv.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!("- **Messages :** {}\n\n---\n\n", conv.messages.len()));

    for message in &conv.messages {
        out.push_str(&message_markdown(message));
    }
    out
}

fn message_markdown(message: &Message) -> String {
    let label = match &message.sender {
        Sender::User => "**Vous**".to_string(),
        Sender::Bot(bot) => format!("**{bot}**"),
    };
    let mut out = format!(
        "### {label} ({})\n\n{}\n\n",
        message.timestamp.format("%H:%M"),
        message.content
    );
    for attachment in message.attachments.iter().flatten() {
        if attachment.is_inline_image() {
            out.push_str(&format!("![{}]({})\n\n", attachment.name, attachment.url));
        } else {
            out.push_str(&format!("[{}]({})\n\n", attachment.name, attachment.url));
        }
    }
    out
}

/// Create a conversation, prompting for anything not given as a flag.
pub async fn new_conversation(
    state: &AppState,
    name: Option<String>,
    bot: Option<String>,
    json: bool,
) -> Result<()> {
    let name = match name {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("Nom de la conversation")
            .interact_text()?,
    };

    let bot = match bot {
        Some(b) => b,
        None => {
            let bots = state.chat_service.catalog().bots();
            let items: Vec<&str> = bots.iter().map(|b| b.as_str()).collect();
            let choice = Select::new()
                .with_prompt("Bot")
                .items(&items)
                .default(0)
                .interact()?;
            items
                .get(choice)
                .map(|b| b.to_string())
                .context("aucun bot sélectionné")?
        }
    };

    let conv = state
        .chat_service
        .create_conversation(&name, Some(&bot))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&conv)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Conversation {} créée avec {}",
        style("✓").green().bold(),
        style(&conv.name).cyan(),
        style(&conv.bot).bold()
    );
    println!("  {}  {}", style("Id :").bold(), style(conv.id).dim());
    println!();
    Ok(())
}

/// Delete a conversation after confirmation.
pub async fn delete_conversation(
    state: &AppState,
    reference: &str,
    force: bool,
    json: bool,
) -> Result<()> {
    let conv = find_conversation(state, reference).await?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Supprimer la conversation '{}' ?",
                style(&conv.name).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Annulé.");
            return Ok(());
        }
    }

    state.chat_service.delete_conversation(conv.id).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"deleted": true, "id": conv.id.to_string()})
        );
        return Ok(());
    }

    println!(
        "  {} Conversation {} supprimée",
        style("✓").green().bold(),
        style(&conv.name).cyan()
    );
    Ok(())
}
