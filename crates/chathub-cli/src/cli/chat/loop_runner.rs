//! Main chat loop orchestration.
//!
//! Reads user input, routes slash commands to conversation management, and
//! sends everything else to the current conversation's bot. While a reply is
//! in flight the typing spinner follows `TypingUpdated` events from the chat
//! service; the finished message is rendered once the dispatch resolves.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use chathub_types::conversation::{BotId, Conversation};
use chathub_types::error::{ChatError, ValidationError};
use chathub_types::event::ChatEvent;
use chathub_core::chat::DispatchOutcome;

use crate::cli::conversation::{list_conversations, resolve_conversation};
use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{ChatRenderer, typing_message};

/// What the loop should do after a command.
enum Flow {
    Continue,
    Exit,
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let service = &state.chat_service;
    let renderer = ChatRenderer::new();

    let current = service.current_conversation().await;
    print_welcome_banner(
        service.bridge_name(),
        service.list().await.len(),
        current.as_ref().map(|c| c.name.as_str()),
    );
    match &current {
        Some(conv) => print_transcript(&renderer, conv),
        None => print_no_conversation_hint(),
    }

    let mut events = service.subscribe();
    let prompt = format!("  {} ", style("Vous >").green().bold());
    let (mut input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Impossible d'initialiser la saisie : {e}"))?;

    loop {
        match input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("À bientôt.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Ctrl+D pour quitter, ou continuez à écrire.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match handle_command(state, &renderer, &mut input, cmd).await? {
                        Flow::Continue => continue,
                        Flow::Exit => {
                            println!("\n  {}", style("À bientôt.").dim());
                            break;
                        }
                    }
                }

                send_and_render(state, &renderer, &mut events, &text).await;
            }
        }
    }

    input.flush();
    Ok(())
}

/// Send a message to the current conversation and render the reply.
async fn send_and_render(
    state: &AppState,
    renderer: &ChatRenderer,
    events: &mut broadcast::Receiver<ChatEvent>,
    text: &str,
) {
    let service = &state.chat_service;
    let handle = match service.send_message(text).await {
        Ok(handle) => handle,
        Err(ChatError::Validation(ValidationError::NoConversationSelected)) => {
            print_no_conversation_hint();
            return;
        }
        Err(err) => {
            eprintln!("\n  {} {err}\n", style("!").red().bold());
            return;
        }
    };

    let id = handle.conversation_id();
    let bot = service
        .typing_state(id)
        .map(|t| t.bot.to_string())
        .unwrap_or_default();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(typing_message(&bot, None));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let wait = handle.wait();
    tokio::pin!(wait);
    let outcome = loop {
        tokio::select! {
            outcome = &mut wait => break outcome,
            event = events.recv() => match event {
                Ok(ChatEvent::TypingUpdated { conversation_id, content }) if conversation_id == id => {
                    spinner.set_message(typing_message(&bot, Some(&content)));
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "chat loop lagged behind events"),
                Err(RecvError::Closed) => break (&mut wait).await,
            },
        }
    };
    spinner.finish_and_clear();

    match outcome {
        Ok(DispatchOutcome::Completed(message)) => renderer.print_message(&message),
        Ok(DispatchOutcome::Failed(message)) => renderer.print_error(&message),
        Ok(DispatchOutcome::Dropped(_)) => {
            println!(
                "  {}\n",
                style("La conversation a été supprimée avant la réponse.").dim()
            );
        }
        Err(err) => warn!(error = %err, "dispatch task failed"),
    }
}

async fn handle_command(
    state: &AppState,
    renderer: &ChatRenderer,
    input: &mut ChatInput,
    cmd: ChatCommand,
) -> anyhow::Result<Flow> {
    let service = &state.chat_service;

    match cmd {
        ChatCommand::Help => commands::print_help(),
        ChatCommand::Exit => return Ok(Flow::Exit),
        ChatCommand::Screen => input.clear(),
        ChatCommand::List => list_conversations(state, false).await?,

        ChatCommand::New(name) => {
            let name = match name {
                Some(name) => name,
                None => match input.ask("  Nom de la conversation : ").await {
                    Some(name) => name,
                    None => return Ok(Flow::Continue),
                },
            };

            let bots = service.catalog().bots();
            println!();
            for (index, bot) in bots.iter().enumerate() {
                println!("  {} {}", style(format!("{:>2}.", index + 1)).dim(), bot);
            }
            let Some(answer) = input.ask("  Bot (numéro ou nom) : ").await else {
                return Ok(Flow::Continue);
            };
            let bot = pick_bot(bots, &answer);

            match service
                .create_conversation(&name, bot.as_ref().map(BotId::as_str))
                .await
            {
                Ok(conv) => {
                    println!(
                        "\n  {} {} avec {}\n",
                        style("✓").green().bold(),
                        style(&conv.name).cyan().bold(),
                        style(&conv.bot).bold()
                    );
                }
                Err(err) => println!("\n  {} {err}\n", style("!").yellow().bold()),
            }
        }

        ChatCommand::Select(reference) => {
            let list = service.list().await;
            let selected = match resolve_conversation(&list, &reference) {
                Some(id) => service.select_conversation(id).await,
                None => None,
            };
            match selected {
                Some(conv) => print_transcript(renderer, &conv),
                None => println!(
                    "\n  {} Conversation introuvable : {}\n",
                    style("?").yellow().bold(),
                    style(reference).dim()
                ),
            }
        }

        ChatCommand::History => match service.current_conversation().await {
            Some(conv) => print_transcript(renderer, &conv),
            None => print_no_conversation_hint(),
        },

        ChatCommand::Clear => {
            let Some(conv) = service.current_conversation().await else {
                print_no_conversation_hint();
                return Ok(Flow::Continue);
            };
            let question = format!("  Effacer tous les messages de « {} » ?", conv.name);
            if input.confirm(&question).await {
                service.clear_messages(conv.id).await?;
                println!("  {} Conversation vidée\n", style("✓").green().bold());
            }
        }

        ChatCommand::Delete => {
            let Some(conv) = service.current_conversation().await else {
                print_no_conversation_hint();
                return Ok(Flow::Continue);
            };
            let question = format!("  Supprimer « {} » ?", conv.name);
            if input.confirm(&question).await {
                service.delete_conversation(conv.id).await?;
                println!("  {} Conversation supprimée", style("✓").green().bold());
                match service.current_conversation().await {
                    Some(next) => print_transcript(renderer, &next),
                    None => print_no_conversation_hint(),
                }
            }
        }

        ChatCommand::Unknown(name) => {
            println!(
                "\n  {} Commande inconnue : {}. Tapez /help pour la liste des commandes.\n",
                style("?").yellow().bold(),
                style(name).dim()
            );
        }
    }

    Ok(Flow::Continue)
}

/// Interpret a bot choice: a 1-based position in `bots` or a handle.
///
/// Unrecognized answers are passed through so the service reports them.
pub fn pick_bot(bots: &[BotId], answer: &str) -> Option<BotId> {
    let answer = answer.trim();
    if answer.is_empty() {
        return None;
    }
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| bots.get(i).cloned())
        .or_else(|| Some(BotId::from(answer)))
}

fn print_transcript(renderer: &ChatRenderer, conv: &Conversation) {
    println!();
    println!(
        "  {} {}",
        style(format!("── {} ", conv.name)).cyan().bold(),
        style(format!("avec {}", conv.bot)).dim()
    );
    println!();
    for message in &conv.messages {
        renderer.print_message(message);
    }
}

fn print_no_conversation_hint() {
    println!(
        "  {} Aucune conversation sélectionnée. Créez-en une avec {}\n",
        style("i").blue().bold(),
        style("/new").yellow()
    );
}
