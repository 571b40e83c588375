//! ChatHub terminal client entry point.
//!
//! Binary name: `chathub`
//!
//! Parses CLI arguments, initializes tracing and the chat service, then
//! dispatches to the requested command or starts the interactive chat.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use chathub_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_filter(), cli.otel)
        .map_err(|e| anyhow::anyhow!("Impossible d'initialiser les traces : {e}"))?;

    // Shell completions don't need app state
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chathub", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(&cli).await?;

    let result = match cli.command {
        None | Some(Commands::Chat) => cli::chat::loop_runner::run_chat_loop(&state).await,
        Some(Commands::List) => cli::conversation::list_conversations(&state, cli.json).await,
        Some(Commands::Show { ref id }) => {
            cli::conversation::show_conversation(&state, id, cli.json).await
        }
        Some(Commands::Export { ref id }) => {
            cli::conversation::export_conversation(&state, id, cli.json).await
        }
        Some(Commands::New { ref name, ref bot }) => {
            cli::conversation::new_conversation(&state, name.clone(), bot.clone(), cli.json).await
        }
        Some(Commands::Delete { ref id, force }) => {
            cli::conversation::delete_conversation(&state, id, force, cli.json).await
        }
        Some(Commands::Completions { .. }) => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}
