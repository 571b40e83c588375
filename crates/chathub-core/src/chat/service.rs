//! Chat service: the entry point the presentation layer talks to.
//!
//! ChatService owns the conversation store behind a shared lock, the optional
//! bot bridge, and the in-flight registry. User intents (create, select,
//! send, clear, delete) are plain async methods; bot replies run as spawned
//! tasks that feed the dispatch state machine and append the finished
//! message back into the store.

use std::sync::Arc;
use std::time::Duration;

use chathub_types::bridge::{BridgeError, BridgeRequest};
use chathub_types::config::ChatHubConfig;
use chathub_types::conversation::{Conversation, ConversationId, Message};
use chathub_types::error::{ChatError, ValidationError};
use chathub_types::event::ChatEvent;
use futures_util::StreamExt;
use tokio::sync::{RwLock, broadcast};
use tokio::task::{JoinError, JoinHandle};
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::bridge::{BoxBotBridge, Dispatch, DispatchStep, Finished};
use crate::event::EventBus;
use crate::storage::{StorageAdapter, StorageBackend};

use super::catalog::BotCatalog;
use super::store::ConversationStore;
use super::typing::{InFlightRegistry, TypingState};

/// How a dispatch ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The bot reply was appended.
    Completed(Message),
    /// An error message was appended.
    Failed(Message),
    /// The conversation was deleted while the reply was in flight; the
    /// message was dropped.
    Dropped(Message),
}

impl DispatchOutcome {
    pub fn message(&self) -> &Message {
        match self {
            DispatchOutcome::Completed(m) | DispatchOutcome::Failed(m) | DispatchOutcome::Dropped(m) => m,
        }
    }
}

/// Handle on a spawned bot dispatch.
///
/// Dropping the handle does not cancel the dispatch.
#[derive(Debug)]
pub struct DispatchHandle {
    conversation_id: ConversationId,
    request_id: Uuid,
    task: JoinHandle<DispatchOutcome>,
}

impl DispatchHandle {
    pub fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the dispatch to reach a terminal state.
    pub async fn wait(self) -> Result<DispatchOutcome, JoinError> {
        self.task.await
    }
}

/// Everything a spawned dispatch needs, detached from `&self`.
struct DispatchContext<B: StorageBackend> {
    store: Arc<RwLock<ConversationStore<B>>>,
    bridge: Option<Arc<BoxBotBridge>>,
    in_flight: Arc<InFlightRegistry>,
    events: EventBus,
    fallback_delay: Duration,
}

/// Facade over the conversation store and the bot bridge.
///
/// Generic over `StorageBackend` so chathub-core never depends on
/// chathub-infra. A `None` bridge means fallback mode: every dispatch
/// produces a canned reply after the configured delay.
pub struct ChatService<B: StorageBackend + 'static> {
    store: Arc<RwLock<ConversationStore<B>>>,
    bridge: Option<Arc<BoxBotBridge>>,
    in_flight: Arc<InFlightRegistry>,
    events: EventBus,
    catalog: BotCatalog,
    fallback_delay: Duration,
}

impl<B: StorageBackend + 'static> ChatService<B> {
    /// Load the stored conversations and select the first one, if any.
    pub fn new(
        storage: StorageAdapter<B>,
        bridge: Option<BoxBotBridge>,
        config: &ChatHubConfig,
    ) -> Self {
        let events = EventBus::new(config.event_capacity);
        let catalog = BotCatalog::new(config.bots.iter().map(String::as_str));
        let mut store = ConversationStore::open(
            storage,
            catalog.clone(),
            events.clone(),
            config.preview_length,
        );

        if let Some(head) = store.list().first().map(|c| c.id) {
            store.select_conversation(head);
        }

        match &bridge {
            Some(bridge) => info!(bridge = bridge.name(), "bot bridge available"),
            None => info!("no bot bridge, replies use fallback mode"),
        }

        Self {
            store: Arc::new(RwLock::new(store)),
            bridge: bridge.map(Arc::new),
            in_flight: Arc::new(InFlightRegistry::new()),
            events,
            catalog,
            fallback_delay: config.fallback_delay(),
        }
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    pub fn is_bridge_available(&self) -> bool {
        self.bridge.is_some()
    }

    pub fn bridge_name(&self) -> Option<&str> {
        self.bridge.as_ref().map(|b| b.name())
    }

    pub fn catalog(&self) -> &BotCatalog {
        &self.catalog
    }

    // --- Read access ---

    /// Snapshot of the conversation list, most recently created first.
    pub async fn list(&self) -> Vec<Conversation> {
        self.store.read().await.list().to_vec()
    }

    pub async fn conversation(&self, id: ConversationId) -> Option<Conversation> {
        self.store.read().await.get(id).cloned()
    }

    pub async fn current_conversation(&self) -> Option<Conversation> {
        self.store.read().await.current().cloned()
    }

    pub async fn current_conversation_id(&self) -> Option<ConversationId> {
        self.store.read().await.current_id()
    }

    pub async fn messages(&self, id: ConversationId) -> Option<Vec<Message>> {
        self.store.read().await.messages(id).map(<[Message]>::to_vec)
    }

    /// Live typing state of a conversation, if a reply is in flight.
    pub fn typing_state(&self, id: ConversationId) -> Option<TypingState> {
        self.in_flight.get(id)
    }

    // --- User intents ---

    /// Create a conversation and make it current.
    pub async fn create_conversation(
        &self,
        name: &str,
        bot: Option<&str>,
    ) -> Result<Conversation, ChatError> {
        let mut store = self.store.write().await;
        let conversation = store.create_conversation(name, bot)?;
        store.select_conversation(conversation.id);
        Ok(conversation)
    }

    /// Returns `None` and keeps the selection when `id` is unknown.
    pub async fn select_conversation(&self, id: ConversationId) -> Option<Conversation> {
        self.store.write().await.select_conversation(id).cloned()
    }

    /// Does not stop a reply in flight; it lands in the emptied transcript.
    pub async fn clear_messages(&self, id: ConversationId) -> Result<(), ChatError> {
        self.store.write().await.clear_messages(id)
    }

    /// Does not stop a reply in flight; its arrival becomes a no-op.
    pub async fn delete_conversation(&self, id: ConversationId) -> Result<Conversation, ChatError> {
        self.store.write().await.delete_conversation(id)
    }

    /// Send `text` to the bot of the current conversation.
    pub async fn send_message(&self, text: &str) -> Result<DispatchHandle, ChatError> {
        let mut store = self.store.write().await;
        let id = store
            .current_id()
            .ok_or(ValidationError::NoConversationSelected)?;
        self.send_locked(&mut store, id, text)
    }

    /// Send `text` to the bot of an explicit conversation.
    pub async fn send_message_to(
        &self,
        id: ConversationId,
        text: &str,
    ) -> Result<DispatchHandle, ChatError> {
        let mut store = self.store.write().await;
        self.send_locked(&mut store, id, text)
    }

    /// Append the user message, raise the typing indicator, spawn the dispatch.
    fn send_locked(
        &self,
        store: &mut ConversationStore<B>,
        id: ConversationId,
        text: &str,
    ) -> Result<DispatchHandle, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyMessage.into());
        }
        let bot = store.get(id).ok_or(ChatError::NotFound(id))?.bot.clone();

        store.append_message(id, Message::user(text))?;

        let request_id = self.in_flight.begin(id, bot.clone());
        self.events.publish(ChatEvent::TypingStarted {
            conversation_id: id,
            bot: bot.clone(),
        });

        let request = BridgeRequest::new(id, bot.clone(), text);
        let ctx = DispatchContext {
            store: Arc::clone(&self.store),
            bridge: self.bridge.clone(),
            in_flight: Arc::clone(&self.in_flight),
            events: self.events.clone(),
            fallback_delay: self.fallback_delay,
        };

        let span = info_span!(
            "bot_dispatch",
            conversation_id = %id,
            bot = %bot,
            request_id = %request_id,
            fallback = ctx.bridge.is_none(),
        );
        let task = tokio::spawn(run_dispatch(ctx, request, request_id).instrument(span));

        Ok(DispatchHandle {
            conversation_id: id,
            request_id,
            task,
        })
    }
}

async fn run_dispatch<B: StorageBackend + 'static>(
    ctx: DispatchContext<B>,
    request: BridgeRequest,
    request_id: Uuid,
) -> DispatchOutcome {
    let id = request.conversation_id;
    let mut dispatch = Dispatch::new(request.bot.clone());

    let finished = match &ctx.bridge {
        None => {
            tokio::time::sleep(ctx.fallback_delay).await;
            dispatch.on_fallback_elapsed()
        }
        Some(bridge) => stream_reply(&ctx, bridge, &mut dispatch, request, request_id).await,
    };

    if ctx.in_flight.finish(id, request_id) {
        ctx.events.publish(ChatEvent::TypingStopped { conversation_id: id });
    }

    let Finished { message, failed } = finished;
    match ctx.store.write().await.append_message(id, message.clone()) {
        Ok(()) if failed => {
            info!("bot reply failed");
            DispatchOutcome::Failed(message)
        }
        Ok(()) => {
            info!("bot reply completed");
            DispatchOutcome::Completed(message)
        }
        Err(ChatError::NotFound(_)) => {
            debug!("conversation deleted while reply was in flight, dropping it");
            DispatchOutcome::Dropped(message)
        }
        Err(err) => {
            warn!(error = %err, "failed to append bot reply");
            DispatchOutcome::Dropped(message)
        }
    }
}

/// Drive the bridge stream until the dispatch reaches a terminal state.
async fn stream_reply<B: StorageBackend>(
    ctx: &DispatchContext<B>,
    bridge: &BoxBotBridge,
    dispatch: &mut Dispatch,
    request: BridgeRequest,
    request_id: Uuid,
) -> Finished {
    let id = request.conversation_id;
    debug!(conversation_id = %request.conversation_id, "sending user message");

    let mut stream = match bridge.send_user_message(request).await {
        Ok(stream) => stream,
        Err(err) => {
            warn!(error = %err, "bridge rejected the message");
            return dispatch.on_transport_error(&err);
        }
    };

    while let Some(update) = stream.next().await {
        match dispatch.on_update(update) {
            DispatchStep::Partial(content) => {
                if ctx.in_flight.update(id, request_id, &content) {
                    ctx.events.publish(ChatEvent::TypingUpdated {
                        conversation_id: id,
                        content,
                    });
                }
            }
            DispatchStep::Finished(finished) => return finished,
            DispatchStep::Ignored => {}
        }
    }

    warn!("bridge stream ended without a terminal status");
    dispatch.on_transport_error(&BridgeError::StreamClosed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{BotBridge, BridgeStream};
    use crate::testing::MapBackend;
    use chathub_types::bridge::{BotResponse, BridgeUpdate};
    use chathub_types::conversation::{BotId, NEW_CONVERSATION_PREVIEW, Sender};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Bridge that replays a fixed script of updates.
    struct ScriptedBridge {
        script: Vec<BotResponse>,
        sent: Arc<Mutex<Vec<BridgeRequest>>>,
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedBridge {
        fn new(script: Vec<BotResponse>) -> Self {
            Self {
                script,
                sent: Arc::new(Mutex::new(Vec::new())),
                gate: None,
            }
        }

        /// Hold the stream until the gate is notified.
        fn gated(script: Vec<BotResponse>, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new(script)
            }
        }
    }

    impl BotBridge for ScriptedBridge {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn send_user_message(&self, request: BridgeRequest) -> Result<BridgeStream, BridgeError> {
            self.sent.lock().unwrap().push(request);
            let script = self.script.clone();
            let gate = self.gate.clone();
            Ok(Box::pin(async_stream::stream! {
                if let Some(gate) = gate {
                    gate.notified().await;
                }
                for response in script {
                    yield BridgeUpdate::single(response);
                }
            }))
        }
    }

    struct RejectingBridge;

    impl BotBridge for RejectingBridge {
        fn name(&self) -> &str {
            "rejecting"
        }

        async fn send_user_message(&self, _request: BridgeRequest) -> Result<BridgeStream, BridgeError> {
            Err(BridgeError::Rejected("connexion refusée".to_string()))
        }
    }

    fn service(bridge: Option<BoxBotBridge>) -> ChatService<MapBackend> {
        ChatService::new(
            StorageAdapter::new(MapBackend::default()),
            bridge,
            &ChatHubConfig::default(),
        )
    }

    fn bot_messages(messages: &[Message]) -> Vec<&Message> {
        messages.iter().filter(|m| !m.sender.is_user()).collect()
    }

    #[tokio::test]
    async fn test_create_selects_new_conversation() {
        let svc = service(None);
        let first = svc.create_conversation("Un", Some("GPT-4o")).await.unwrap();
        assert_eq!(svc.current_conversation_id().await, Some(first.id));

        let second = svc.create_conversation("Deux", Some("GPT-4o")).await.unwrap();
        assert_eq!(svc.current_conversation_id().await, Some(second.id));
        assert_eq!(svc.list().await[0].id, second.id);
    }

    #[tokio::test]
    async fn test_startup_selects_head_of_loaded_list() {
        let backend = Arc::new(MapBackend::default());
        let config = ChatHubConfig::default();
        let svc = ChatService::new(StorageAdapter::new(backend.clone()), None, &config);
        svc.create_conversation("Ancienne", Some("GPT-4o")).await.unwrap();
        let newest = svc.create_conversation("Récente", Some("GPT-4o")).await.unwrap();
        svc.select_conversation(svc.list().await[1].id).await;

        let reopened = ChatService::new(StorageAdapter::new(backend), None, &config);
        assert_eq!(reopened.current_conversation_id().await, Some(newest.id));
    }

    #[tokio::test]
    async fn test_empty_store_has_no_selection() {
        let svc = service(None);
        assert!(svc.current_conversation().await.is_none());
        let err = svc.send_message("bonjour").await.unwrap_err();
        assert!(matches!(
            err,
            ChatError::Validation(ValidationError::NoConversationSelected)
        ));
    }

    #[tokio::test]
    async fn test_send_rejects_blank_text() {
        let svc = service(None);
        let conv = svc.create_conversation("Notes", Some("GPT-4o")).await.unwrap();

        let err = svc.send_message("   ").await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(ValidationError::EmptyMessage)));
        assert!(svc.messages(conv.id).await.unwrap().is_empty());
        assert!(svc.typing_state(conv.id).is_none());
    }

    #[tokio::test]
    async fn test_send_to_unknown_conversation_is_not_found() {
        let svc = service(None);
        let missing = ConversationId::new();
        let err = svc.send_message_to(missing, "allo").await.unwrap_err();
        assert!(matches!(err, ChatError::NotFound(id) if id == missing));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_reply_after_delay() {
        let svc = service(None);
        assert!(!svc.is_bridge_available());
        let conv = svc.create_conversation("Démo", Some("Gemini-1.5-Pro")).await.unwrap();

        let handle = svc.send_message("  Salut  ").await.unwrap();
        let messages = svc.messages(conv.id).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "Salut");
        assert!(svc.typing_state(conv.id).is_some());

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(svc.messages(conv.id).await.unwrap().len(), 1);

        let outcome = handle.wait().await.unwrap();
        let DispatchOutcome::Completed(reply) = outcome else {
            panic!("fallback reply must complete, got {outcome:?}");
        };
        assert!(reply.content.contains("démonstration de Gemini-1.5-Pro"));

        let conv = svc.conversation(conv.id).await.unwrap();
        assert_eq!(conv.messages.len(), 2);
        assert_eq!(conv.messages[1].sender, Sender::Bot(BotId::from("Gemini-1.5-Pro")));
        assert!(conv.last_message.ends_with("..."));
        assert!(svc.typing_state(conv.id).is_none());
    }

    #[tokio::test]
    async fn test_streaming_reply_persists_only_final_content() {
        let bridge = ScriptedBridge::new(vec![
            BotResponse::incomplete("Hel"),
            BotResponse::incomplete("Hello"),
            BotResponse::complete("Hello!", None),
        ]);
        let sent = Arc::clone(&bridge.sent);
        let svc = service(Some(BoxBotBridge::new(bridge)));
        let conv = svc.create_conversation("Stream", Some("GPT-4o")).await.unwrap();
        let mut rx = svc.subscribe();

        let outcome = svc.send_message("Hi").await.unwrap().wait().await.unwrap();
        assert!(matches!(outcome, DispatchOutcome::Completed(ref m) if m.content == "Hello!"));

        let messages = svc.messages(conv.id).await.unwrap();
        let replies = bot_messages(&messages);
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].content, "Hello!");
        assert_eq!(svc.conversation(conv.id).await.unwrap().last_message, "Hello!");

        let request = sent.lock().unwrap()[0].clone();
        assert_eq!(request.text, "@GPT-4o Hi");
        assert!(request.stream);

        let mut partials = Vec::new();
        let mut stopped = 0;
        while let Ok(event) = rx.try_recv() {
            match event {
                ChatEvent::TypingUpdated { content, .. } => partials.push(content),
                ChatEvent::TypingStopped { .. } => stopped += 1,
                _ => {}
            }
        }
        assert_eq!(partials, vec!["Hel".to_string(), "Hello".to_string()]);
        assert_eq!(stopped, 1);
    }

    #[tokio::test]
    async fn test_error_status_appends_error_message() {
        let bridge = ScriptedBridge::new(vec![
            BotResponse::incomplete("Je"),
            BotResponse::error(Some("quota dépassé".to_string())),
        ]);
        let svc = service(Some(BoxBotBridge::new(bridge)));
        let conv = svc.create_conversation("Erreur", Some("GPT-4o")).await.unwrap();

        let outcome = svc.send_message("test").await.unwrap().wait().await.unwrap();
        assert!(matches!(outcome, DispatchOutcome::Failed(ref m) if m.content == "Erreur: quota dépassé"));

        let messages = svc.messages(conv.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "Erreur: quota dépassé");
    }

    #[tokio::test]
    async fn test_rejected_send_appends_error_message() {
        let svc = service(Some(BoxBotBridge::new(RejectingBridge)));
        let conv = svc.create_conversation("Hors ligne", Some("GPT-4o")).await.unwrap();

        let outcome = svc.send_message("allo").await.unwrap().wait().await.unwrap();
        assert!(matches!(outcome, DispatchOutcome::Failed(_)));
        assert_eq!(
            svc.conversation(conv.id).await.unwrap().last_message,
            "Erreur: connexion refusée"
        );
        assert!(svc.typing_state(conv.id).is_none());
    }

    #[tokio::test]
    async fn test_stream_without_terminal_status_is_an_error() {
        let bridge = ScriptedBridge::new(vec![BotResponse::incomplete("coupé")]);
        let svc = service(Some(BoxBotBridge::new(bridge)));
        svc.create_conversation("Coupure", Some("GPT-4o")).await.unwrap();

        let outcome = svc.send_message("allo").await.unwrap().wait().await.unwrap();
        assert_eq!(
            outcome.message().content,
            "Erreur: Impossible de communiquer avec le bot"
        );
    }

    #[tokio::test]
    async fn test_delete_during_flight_drops_reply() {
        let gate = Arc::new(Notify::new());
        let bridge = ScriptedBridge::gated(vec![BotResponse::complete("trop tard", None)], gate.clone());
        let svc = service(Some(BoxBotBridge::new(bridge)));
        let keep = svc.create_conversation("Garder", Some("GPT-4o")).await.unwrap();
        let doomed = svc.create_conversation("Supprimer", Some("GPT-4o")).await.unwrap();

        let handle = svc.send_message_to(doomed.id, "bonjour").await.unwrap();
        svc.delete_conversation(doomed.id).await.unwrap();
        let before = svc.list().await;
        gate.notify_one();

        let outcome = handle.wait().await.unwrap();
        assert!(matches!(outcome, DispatchOutcome::Dropped(_)));
        assert_eq!(svc.list().await, before);
        assert_eq!(svc.current_conversation_id().await, Some(keep.id));
    }

    #[tokio::test]
    async fn test_delete_during_flight_drops_error_reply() {
        let gate = Arc::new(Notify::new());
        let bridge = ScriptedBridge::gated(
            vec![BotResponse::error(Some("quota dépassé".to_string()))],
            gate.clone(),
        );
        let svc = service(Some(BoxBotBridge::new(bridge)));
        let doomed = svc.create_conversation("Supprimer", Some("GPT-4o")).await.unwrap();

        let handle = svc.send_message("bonjour").await.unwrap();
        svc.delete_conversation(doomed.id).await.unwrap();
        gate.notify_one();

        let outcome = handle.wait().await.unwrap();
        assert!(matches!(outcome, DispatchOutcome::Dropped(ref m) if m.content == "Erreur: quota dépassé"));
        assert!(svc.list().await.is_empty());
        assert!(svc.current_conversation_id().await.is_none());
        assert!(svc.typing_state(doomed.id).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_before_fallback_timer_drops_reply() {
        let svc = service(None);
        let keep = svc.create_conversation("Garder", Some("GPT-4o")).await.unwrap();
        let doomed = svc.create_conversation("Supprimer", Some("GPT-4o")).await.unwrap();

        let handle = svc.send_message("bonjour").await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        svc.delete_conversation(doomed.id).await.unwrap();

        let outcome = handle.wait().await.unwrap();
        assert!(matches!(outcome, DispatchOutcome::Dropped(_)));
        let list = svc.list().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, keep.id);
        assert!(svc.messages(keep.id).await.unwrap().is_empty());
        assert!(svc.typing_state(doomed.id).is_none());
    }

    #[tokio::test]
    async fn test_clear_during_flight_keeps_reply() {
        let gate = Arc::new(Notify::new());
        let bridge = ScriptedBridge::gated(vec![BotResponse::complete("réponse", None)], gate.clone());
        let svc = service(Some(BoxBotBridge::new(bridge)));
        let conv = svc.create_conversation("Vider", Some("GPT-4o")).await.unwrap();

        let handle = svc.send_message("question").await.unwrap();
        svc.clear_messages(conv.id).await.unwrap();
        assert_eq!(
            svc.conversation(conv.id).await.unwrap().last_message,
            NEW_CONVERSATION_PREVIEW
        );
        gate.notify_one();

        handle.wait().await.unwrap();
        let messages = svc.messages(conv.id).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "réponse");
    }

    #[tokio::test]
    async fn test_concurrent_conversations_do_not_cross_deliver() {
        let svc = service(Some(BoxBotBridge::new(ScriptedBridge::new(vec![
            BotResponse::incomplete("..."),
            BotResponse::complete("ok", None),
        ]))));
        let a = svc.create_conversation("A", Some("GPT-4o")).await.unwrap();
        let b = svc.create_conversation("B", Some("Mistral-Large-2")).await.unwrap();

        let ha = svc.send_message_to(a.id, "pour A").await.unwrap();
        let hb = svc.send_message_to(b.id, "pour B").await.unwrap();
        let (oa, ob) = tokio::join!(ha.wait(), hb.wait());

        assert_eq!(oa.unwrap().message().sender, Sender::Bot(BotId::from("GPT-4o")));
        assert_eq!(
            ob.unwrap().message().sender,
            Sender::Bot(BotId::from("Mistral-Large-2"))
        );
        for id in [a.id, b.id] {
            let messages = svc.messages(id).await.unwrap();
            assert_eq!(messages.len(), 2);
            assert!(messages[0].sender.is_user());
        }
    }

    #[tokio::test]
    async fn test_delete_moves_selection() {
        let svc = service(None);
        let only = svc.create_conversation("Seule", Some("GPT-4o")).await.unwrap();
        svc.delete_conversation(only.id).await.unwrap();
        assert!(svc.current_conversation_id().await.is_none());
        assert!(svc.list().await.is_empty());
    }
}
