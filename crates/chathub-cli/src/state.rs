//! Application state wiring the chat service to concrete adapters.
//!
//! ChatService is generic over the storage backend; AppState pins it to a
//! type-erased backend so the medium can be chosen at runtime.

use std::path::PathBuf;
use std::sync::Arc;

use chathub_core::bridge::BoxBotBridge;
use chathub_core::chat::ChatService;
use chathub_core::storage::{StorageAdapter, StorageBackend};
use chathub_infra::bridge::LoopbackBridge;
use chathub_infra::config::load_config;
use chathub_infra::paths::resolve_data_dir;
use chathub_infra::storage::{JsonFileBackend, MemoryBackend};
use chathub_types::config::{ChatHubConfig, StorageKind};

use crate::cli::{BridgeKind, Cli};

pub type ConcreteChatService = ChatService<Arc<dyn StorageBackend>>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: ChatHubConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load config, apply CLI overrides, wire storage and bridge.
    pub async fn init(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = cli.data_dir.clone().unwrap_or_else(resolve_data_dir);

        let mut config = load_config(&data_dir).await;
        if let Some(storage) = cli.storage {
            config.storage = storage;
        }

        let backend: Arc<dyn StorageBackend> = match config.storage {
            StorageKind::Memory => Arc::new(MemoryBackend::new()),
            StorageKind::File => {
                tokio::fs::create_dir_all(&data_dir).await?;
                Arc::new(JsonFileBackend::new(data_dir.clone()))
            }
        };

        let bridge = match cli.bridge {
            BridgeKind::None => None,
            BridgeKind::Loopback => Some(BoxBotBridge::new(LoopbackBridge::new())),
        };

        tracing::debug!(
            data_dir = %data_dir.display(),
            storage = %config.storage,
            "application state initialized"
        );

        let chat_service = ChatService::new(StorageAdapter::new(backend), bridge, &config);

        Ok(Self {
            chat_service: Arc::new(chat_service),
            config,
            data_dir,
        })
    }
}
