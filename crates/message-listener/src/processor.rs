//! Update processor: routes messages to one worker task per user.
//!
//! Messages from the same user are handled strictly in arrival order by that
//! user's worker; different users are handled concurrently. A worker that sees
//! no message for `worker_idle_timeout` exits and is reaped.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::{Stream, StreamExt};
use questionnaire::UserId;
use telegram_client::{TelegramError, Update};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::error::ListenerError;
use crate::handler::{Outcome, QuestionnaireHandler};
use crate::message::IncomingMessage;
use crate::sender::Messenger;
use crate::store::ResultStore;

/// Configuration for the message processor.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Whether to process messages sent in group chats.
    pub process_groups: bool,

    /// Whether to process messages sent in private chats.
    pub process_direct: bool,

    /// How long a user's worker waits for another message before exiting.
    pub worker_idle_timeout: Duration,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            process_groups: true,
            process_direct: true,
            worker_idle_timeout: Duration::from_secs(300),
        }
    }
}

/// Sending side of one user's worker.
struct WorkerHandle {
    tx: mpsc::UnboundedSender<IncomingMessage>,
    /// Held by the running worker. A replacement waits on it so the old
    /// worker's queue is drained first.
    turn: Arc<Mutex<()>>,
}

impl WorkerHandle {
    /// Whether a worker task still holds (or is waiting for) the turn.
    fn is_alive(&self) -> bool {
        Arc::strong_count(&self.turn) > 1
    }
}

/// Dispatches incoming updates to per-user workers.
pub struct MessageProcessor<M, S>
where
    M: Messenger + 'static,
    S: ResultStore + 'static,
{
    handler: Arc<QuestionnaireHandler<M, S>>,
    config: ProcessorConfig,
    workers: HashMap<UserId, WorkerHandle>,
    tasks: JoinSet<()>,
}

impl<M, S> MessageProcessor<M, S>
where
    M: Messenger + 'static,
    S: ResultStore + 'static,
{
    /// Create a new message processor.
    pub fn new(handler: QuestionnaireHandler<M, S>, config: ProcessorConfig) -> Self {
        Self {
            handler: Arc::new(handler),
            config,
            workers: HashMap::new(),
            tasks: JoinSet::new(),
        }
    }

    /// Create a processor with default configuration.
    pub fn with_defaults(handler: QuestionnaireHandler<M, S>) -> Self {
        Self::new(handler, ProcessorConfig::default())
    }

    /// Get a reference to the handler.
    pub fn handler(&self) -> &QuestionnaireHandler<M, S> {
        &self.handler
    }

    /// Number of users with a running worker.
    pub fn worker_count(&self) -> usize {
        self.workers.values().filter(|w| w.is_alive()).count()
    }

    /// Forget workers that exited after going idle. Returns how many were removed.
    pub fn reap_idle(&mut self) -> usize {
        let mut finished = 0;
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(e) = result {
                error!("Worker task failed: {}", e);
            }
            finished += 1;
        }
        if finished == 0 {
            return 0;
        }

        let before = self.workers.len();
        self.workers.retain(|_, w| w.is_alive());
        let reaped = before - self.workers.len();
        if reaped > 0 {
            debug!("Reaped {} idle workers", reaped);
        }
        reaped
    }

    /// Check if we should process this message.
    fn should_process(&self, msg: &IncomingMessage) -> Result<(), String> {
        if msg.is_group && !self.config.process_groups {
            return Err("group messages disabled".to_string());
        }
        if !msg.is_group && !self.config.process_direct {
            return Err("direct messages disabled".to_string());
        }
        Ok(())
    }

    /// Queue one update for its sender's worker.
    ///
    /// Returns whether the update was accepted.
    pub fn dispatch(&mut self, update: &Update) -> bool {
        let msg = match IncomingMessage::from_update(update)
            .and_then(|msg| self.should_process(&msg).map(|()| msg))
        {
            Ok(msg) => msg,
            Err(reason) => {
                debug!("Skipping update {}: {}", update.update_id, reason);
                return false;
            }
        };

        self.enqueue(msg)
    }

    /// Queue one message for its sender's worker, starting the worker if needed.
    pub fn enqueue(&mut self, msg: IncomingMessage) -> bool {
        self.reap_idle();
        let user_id = msg.user_id;

        let (msg, turn) = match self.workers.get(&user_id) {
            Some(worker) => match worker.tx.send(msg) {
                Ok(()) => return true,
                Err(mpsc::error::SendError(msg)) => {
                    debug!("Worker for user {} went idle, restarting it", user_id);
                    (msg, Arc::clone(&worker.turn))
                }
            },
            None => (msg, Arc::default()),
        };

        let worker = self.spawn_worker(user_id, turn);
        let accepted = worker.tx.send(msg).is_ok();
        if !accepted {
            warn!("Worker for user {} refused a message", user_id);
        }
        self.workers.insert(user_id, worker);
        accepted
    }

    fn spawn_worker(&mut self, user_id: UserId, turn: Arc<Mutex<()>>) -> WorkerHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let handler = Arc::clone(&self.handler);
        let idle = self.config.worker_idle_timeout;
        self.tasks
            .spawn(run_worker(handler, user_id, rx, Arc::clone(&turn), idle));
        debug!("Started worker for user {}", user_id);
        WorkerHandle { tx, turn }
    }

    /// Stop accepting messages, let every worker drain its queue, and drop
    /// unfinished sessions.
    pub async fn shutdown(mut self) {
        let workers = self.workers.len();
        self.workers.clear();

        while let Some(result) = self.tasks.join_next().await {
            if let Err(e) = result {
                error!("Worker task failed: {}", e);
            }
        }

        self.handler.sessions().clear().await;
        info!("Message processor stopped ({} workers)", workers);
    }

    /// Run the processor over `updates` until the stream ends.
    pub async fn run<St>(self, updates: St) -> Result<(), ListenerError>
    where
        St: Stream<Item = Result<Update, TelegramError>> + Unpin,
    {
        self.run_with_shutdown(updates, futures::future::pending::<()>())
            .await
    }

    /// Run the processor with graceful shutdown support.
    ///
    /// This method runs until either:
    /// - The provided shutdown signal completes
    /// - The update stream ends
    ///
    /// In both cases queued messages are handled before it returns.
    pub async fn run_with_shutdown<St, F>(
        mut self,
        mut updates: St,
        shutdown_signal: F,
    ) -> Result<(), ListenerError>
    where
        St: Stream<Item = Result<Update, TelegramError>> + Unpin,
        F: std::future::Future<Output = ()>,
    {
        info!("Starting message processor (graceful shutdown enabled)");

        tokio::pin!(shutdown_signal);

        let result = loop {
            tokio::select! {
                biased;

                () = &mut shutdown_signal => {
                    info!("Shutdown signal received, stopping message processor");
                    break Ok(());
                }

                next = updates.next() => {
                    match next {
                        Some(Ok(update)) => {
                            self.dispatch(&update);
                        }
                        Some(Err(e)) => {
                            // Polling retries on its own
                            error!("Update stream error: {}", e);
                        }
                        None => {
                            warn!("Update stream ended");
                            break Err(ListenerError::StreamEnded);
                        }
                    }
                }
            }
        };

        self.shutdown().await;
        result
    }
}

async fn run_worker<M, S>(
    handler: Arc<QuestionnaireHandler<M, S>>,
    user_id: UserId,
    mut rx: mpsc::UnboundedReceiver<IncomingMessage>,
    turn: Arc<Mutex<()>>,
    idle: Duration,
) where
    M: Messenger,
    S: ResultStore,
{
    let _turn = turn.lock_owned().await;

    loop {
        match tokio::time::timeout(idle, rx.recv()).await {
            Ok(Some(msg)) => handle_one(&handler, user_id, &msg).await,
            Ok(None) => break,
            Err(_) => {
                // Refuse new messages, then finish what slipped in
                rx.close();
                while let Some(msg) = rx.recv().await {
                    handle_one(&handler, user_id, &msg).await;
                }
                debug!("Worker for user {} idle for {:?}", user_id, idle);
                break;
            }
        }
    }
    debug!("Worker for user {} stopped", user_id);
}

async fn handle_one<M, S>(
    handler: &QuestionnaireHandler<M, S>,
    user_id: UserId,
    msg: &IncomingMessage,
) where
    M: Messenger,
    S: ResultStore,
{
    match handler.handle(msg).await {
        Ok(Outcome::Completed {
            persisted,
            report_sent,
        }) => {
            info!(
                "Finished questionnaire for user {} (persisted={}, report_sent={})",
                user_id, persisted, report_sent
            );
        }
        Ok(outcome) => {
            debug!("Handled message from user {}: {:?}", user_id, outcome);
        }
        Err(e) => {
            // Log but continue processing
            warn!("Error handling message from user {}: {}", user_id, e);
        }
    }
}
