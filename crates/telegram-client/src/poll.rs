//! Long-polling stream of incoming updates.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::stream::{self, Stream};
use tracing::{debug, info, warn};

use crate::client::TelegramClient;
use crate::error::TelegramError;
use crate::types::Update;

/// Configuration for polling and retrying after failed polls.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Long-poll timeout per `getUpdates` call.
    pub timeout: Duration,
    /// Maximum number of consecutive failed polls (None = infinite).
    pub max_retries: Option<u32>,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Backoff multiplier for each retry.
    pub backoff_multiplier: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout: crate::config::DEFAULT_POLL_TIMEOUT,
            max_retries: None,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl PollConfig {
    /// Calculate delay for a given retry attempt (0-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi(attempt as i32);
        let delay = Duration::from_millis(delay_ms as u64);
        delay.min(self.max_delay)
    }

    /// Check if we should retry after the given number of consecutive failures.
    pub fn should_retry(&self, failures: u32) -> bool {
        self.max_retries.map_or(true, |max| failures <= max)
    }
}

struct PollState {
    client: TelegramClient,
    config: PollConfig,
    offset: Option<i64>,
    pending: VecDeque<Update>,
    failures: u32,
}

/// A stream of incoming updates.
///
/// Each `getUpdates` call confirms the previous batch by advancing the
/// offset past the highest `update_id` seen. Failed polls are yielded as
/// errors and retried with exponential backoff.
pub struct UpdateStream {
    inner: Pin<Box<dyn Stream<Item = Result<Update, TelegramError>> + Send>>,
}

impl UpdateStream {
    /// Create a new update stream with default polling configuration.
    pub fn new(client: &TelegramClient) -> Self {
        let config = PollConfig {
            timeout: client.config().poll_timeout,
            ..PollConfig::default()
        };
        Self::with_config(client, config)
    }

    /// Create a new update stream with custom polling configuration.
    pub fn with_config(client: &TelegramClient, config: PollConfig) -> Self {
        info!(
            "Starting long polling (timeout {:?}) against {}",
            config.timeout,
            client.config().api_url
        );

        let state = PollState {
            client: client.clone(),
            config,
            offset: None,
            pending: VecDeque::new(),
            failures: 0,
        };

        Self {
            inner: Box::pin(stream::unfold(state, next_update)),
        }
    }
}

async fn next_update(mut state: PollState) -> Option<(Result<Update, TelegramError>, PollState)> {
    loop {
        if let Some(update) = state.pending.pop_front() {
            return Some((Ok(update), state));
        }

        if state.failures > 0 {
            if !state.config.should_retry(state.failures) {
                warn!("Giving up after {} failed polls", state.failures);
                return None;
            }
            let delay = state.config.delay_for_attempt(state.failures - 1);
            debug!("Retrying poll in {:?}", delay);
            tokio::time::sleep(delay).await;
        }

        match state
            .client
            .get_updates(state.offset, state.config.timeout)
            .await
        {
            Ok(updates) => {
                if state.failures > 0 {
                    info!("Polling restored after {} failures", state.failures);
                }
                state.failures = 0;
                if let Some(last) = updates.last() {
                    state.offset = Some(last.update_id + 1);
                    debug!("Received {} updates", updates.len());
                }
                state.pending.extend(updates);
            }
            Err(e) => {
                state.failures += 1;
                return Some((Err(e), state));
            }
        }
    }
}

impl Stream for UpdateStream {
    type Item = Result<Update, TelegramError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// Create an update stream from a TelegramClient.
pub fn subscribe(client: &TelegramClient) -> UpdateStream {
    UpdateStream::new(client)
}

/// Create an update stream with custom polling configuration.
pub fn subscribe_with_config(client: &TelegramClient, config: PollConfig) -> UpdateStream {
    UpdateStream::with_config(client, config)
}
