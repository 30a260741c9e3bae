use super::{BrokerError, ExchangeDeclaration, ExchangeKind, MessageBroker, QueueDeclaration};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A message accepted by [`InMemoryBroker::publish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub exchange: String,
    pub routing_key: String,
    pub payload: Vec<u8>,
}

impl PublishedMessage {
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.payload)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub queue: String,
    pub exchange: String,
    pub routing_key: String,
}

/// Messages kept per queue (and in the publish log) by [`InMemoryBroker::new`].
pub const DEFAULT_RETENTION: usize = 1024;

#[derive(Debug)]
struct MemoryQueue {
    declaration: QueueDeclaration,
    messages: VecDeque<Vec<u8>>,
}

#[derive(Debug, Default)]
struct MemoryBrokerState {
    exchanges: HashMap<String, ExchangeDeclaration>,
    queues: HashMap<String, MemoryQueue>,
    bindings: Vec<Binding>,
    published: VecDeque<PublishedMessage>,
}

/// In-process broker with AMQP topic/fanout routing semantics.
///
/// Nothing consumes its queues, so each queue and the publish log keep at
/// most `retention` messages and drop the oldest beyond that. Tests inspect
/// these; the service runs with a retention of zero when no external broker
/// is configured.
#[derive(Debug)]
pub struct InMemoryBroker {
    state: Mutex<MemoryBrokerState>,
    retention: usize,
    closed: AtomicBool,
    reject_publishes: AtomicBool,
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self::with_retention(DEFAULT_RETENTION)
    }
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Broker that keeps at most `retention` messages per buffer.
    pub fn with_retention(retention: usize) -> Self {
        Self {
            state: Mutex::default(),
            retention,
            closed: AtomicBool::new(false),
            reject_publishes: AtomicBool::new(false),
        }
    }

    fn state(&self) -> MutexGuard<'_, MemoryBrokerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_open(&self) -> Result<(), BrokerError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(BrokerError::NotConnected);
        }
        Ok(())
    }

    /// Make every subsequent publish fail until reset.
    pub fn set_reject_publishes(&self, reject: bool) {
        self.reject_publishes.store(reject, Ordering::Release);
    }

    pub fn published(&self) -> Vec<PublishedMessage> {
        self.state().published.iter().cloned().collect()
    }

    pub fn exchange(&self, name: &str) -> Option<ExchangeDeclaration> {
        self.state().exchanges.get(name).cloned()
    }

    pub fn queue(&self, name: &str) -> Option<QueueDeclaration> {
        self.state()
            .queues
            .get(name)
            .map(|queue| queue.declaration.clone())
    }

    pub fn bindings(&self) -> Vec<Binding> {
        self.state().bindings.clone()
    }

    /// Retained payloads delivered to a queue, oldest first.
    pub fn queue_messages(&self, name: &str) -> Vec<Vec<u8>> {
        self.state()
            .queues
            .get(name)
            .map(|queue| queue.messages.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

#[async_trait]
impl MessageBroker for InMemoryBroker {
    async fn declare_exchange(&self, exchange: &ExchangeDeclaration) -> Result<(), BrokerError> {
        self.ensure_open()?;
        let mut state = self.state();
        if let Some(existing) = state.exchanges.get(&exchange.name) {
            if existing.kind != exchange.kind {
                return Err(BrokerError::ExchangeKindMismatch {
                    name: exchange.name.clone(),
                    existing: existing.kind,
                });
            }
            return Ok(());
        }
        state
            .exchanges
            .insert(exchange.name.clone(), exchange.clone());
        Ok(())
    }

    async fn declare_queue(&self, queue: &QueueDeclaration) -> Result<(), BrokerError> {
        self.ensure_open()?;
        self.state()
            .queues
            .entry(queue.name.clone())
            .or_insert_with(|| MemoryQueue {
                declaration: queue.clone(),
                messages: VecDeque::new(),
            });
        Ok(())
    }

    async fn bind_queue(
        &self,
        queue: &str,
        exchange: &str,
        routing_key: &str,
    ) -> Result<(), BrokerError> {
        self.ensure_open()?;
        let mut state = self.state();
        if !state.queues.contains_key(queue) {
            return Err(BrokerError::UnknownQueue(queue.to_string()));
        }
        if !state.exchanges.contains_key(exchange) {
            return Err(BrokerError::UnknownExchange(exchange.to_string()));
        }

        let binding = Binding {
            queue: queue.to_string(),
            exchange: exchange.to_string(),
            routing_key: routing_key.to_string(),
        };
        if !state.bindings.contains(&binding) {
            state.bindings.push(binding);
        }
        Ok(())
    }

    async fn publish(
        &self,
        exchange: &str,
        routing_key: &str,
        payload: &[u8],
    ) -> Result<(), BrokerError> {
        self.ensure_open()?;
        if self.reject_publishes.load(Ordering::Acquire) {
            return Err(BrokerError::Rejected(format!(
                "exchange {exchange} refused the message"
            )));
        }

        let mut state = self.state();
        let kind = state
            .exchanges
            .get(exchange)
            .map(|declared| declared.kind)
            .ok_or_else(|| BrokerError::UnknownExchange(exchange.to_string()))?;

        let targets: Vec<String> = state
            .bindings
            .iter()
            .filter(|binding| binding.exchange == exchange)
            .filter(|binding| match kind {
                ExchangeKind::Fanout => true,
                ExchangeKind::Topic => topic_matches(&binding.routing_key, routing_key),
            })
            .map(|binding| binding.queue.clone())
            .collect();

        tracing::debug!(
            exchange,
            routing_key,
            queues = targets.len(),
            "Routed message in-process"
        );

        let retention = self.retention;
        for target in &targets {
            if let Some(queue) = state.queues.get_mut(target) {
                retain(&mut queue.messages, payload.to_vec(), retention);
            }
        }

        let message = PublishedMessage {
            exchange: exchange.to_string(),
            routing_key: routing_key.to_string(),
            payload: payload.to_vec(),
        };
        retain(&mut state.published, message, retention);
        Ok(())
    }

    async fn close(&self) -> Result<(), BrokerError> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}

fn retain<T>(buffer: &mut VecDeque<T>, item: T, limit: usize) {
    if limit == 0 {
        return;
    }
    while buffer.len() >= limit {
        buffer.pop_front();
    }
    buffer.push_back(item);
}

/// Match a routing key against a topic binding pattern.
///
/// Words are separated by `.`; `*` matches exactly one word and `#` matches
/// zero or more words.
pub(crate) fn topic_matches(pattern: &str, routing_key: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('.').collect();
    let key: Vec<&str> = routing_key.split('.').collect();
    match_words(&pattern, &key)
}

fn match_words(pattern: &[&str], key: &[&str]) -> bool {
    match pattern.split_first() {
        None => key.is_empty(),
        Some((&"#", rest)) => (0..=key.len()).any(|skip| match_words(rest, &key[skip..])),
        Some((&word, rest)) => match key.split_first() {
            Some((&head, tail)) if word == "*" || word == head => match_words(rest, tail),
            _ => false,
        },
    }
}
