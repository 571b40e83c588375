//! CLI command definitions for the `chathub` binary.
//!
//! Uses clap derive macros for argument parsing. Without a subcommand the
//! binary starts the interactive chat.

pub mod chat;
pub mod conversation;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use chathub_types::config::StorageKind;

/// Discutez avec plusieurs bots IA depuis un seul terminal.
#[derive(Parser)]
#[command(name = "chathub", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Sortie JSON au lieu du texte mis en forme.
    #[arg(long, global = true)]
    pub json: bool,

    /// N'afficher que les erreurs.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Sortie détaillée (-v verbeux, -vv debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Exporter les spans de traces sur stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    /// Répertoire de données (config.toml et conversations enregistrées).
    #[arg(long, global = true, env = "CHATHUB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Support de stockage (remplace celui de config.toml).
    #[arg(long, global = true)]
    pub storage: Option<StorageKind>,

    /// Passerelle bot à utiliser ; `none` lance le mode démo.
    #[arg(long, global = true, value_enum, default_value_t = BridgeKind::None)]
    pub bridge: BridgeKind,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Default log filter derived from `-v` / `--quiet`.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,chathub_core=debug,chathub_infra=debug",
            _ => "trace",
        }
    }
}

/// Bot bridge selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BridgeKind {
    /// Aucune passerelle : réponses de démonstration après un délai.
    None,
    /// Renvoie le texte de l'utilisateur en flux, pour le développement local.
    Loopback,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lancer le chat interactif (par défaut).
    Chat,

    /// Lister les conversations.
    #[command(alias = "ls")]
    List,

    /// Afficher une conversation.
    Show {
        /// Id de conversation, préfixe d'id unique ou position dans la liste.
        id: String,
    },

    /// Exporter une conversation en markdown (ou JSON avec --json).
    Export {
        /// Id de conversation, préfixe d'id unique ou position dans la liste.
        id: String,
    },

    /// Créer une conversation.
    New {
        /// Nom de la conversation.
        #[arg(long)]
        name: Option<String>,

        /// Nom du bot.
        #[arg(long)]
        bot: Option<String>,
    },

    /// Supprimer une conversation.
    #[command(alias = "rm")]
    Delete {
        /// Id de conversation, préfixe d'id unique ou position dans la liste.
        id: String,

        /// Ne pas demander de confirmation.
        #[arg(long)]
        force: bool,
    },

    /// Générer les complétions du shell.
    Completions {
        /// Shell cible.
        shell: Shell,
    },
}
