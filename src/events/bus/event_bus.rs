// src/events/bus/event_bus.rs
//
// Typed, synchronous publish/subscribe.
//
// - `emit` runs every subscriber of that event type on the caller's thread,
//   in subscription order, before returning
// - A panicking subscriber is logged and skipped
// - Emissions are recorded in a bounded log; the oldest entries fall off

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use crate::events::types::DomainEvent;

/// Emissions kept in the log before the oldest are dropped
pub const EVENT_LOG_CAPACITY: usize = 1024;

type Subscriber = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// One recorded emission
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    /// Subscribers that received the event
    pub handler_count: usize,
}

/// Shared event bus; clones publish to the same subscribers
#[derive(Clone)]
pub struct EventBus {
    subscribers: Arc<RwLock<HashMap<TypeId, Vec<Subscriber>>>>,
    event_log: Arc<RwLock<VecDeque<EventLogEntry>>>,
    log_capacity: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_log_capacity(EVENT_LOG_CAPACITY)
    }

    pub fn with_log_capacity(log_capacity: usize) -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(HashMap::new())),
            event_log: Arc::new(RwLock::new(VecDeque::new())),
            log_capacity,
        }
    }

    /// Register `handler` for every future `E`
    ///
    /// Subscribers are expected to be registered during wiring, before the
    /// first emission. A handler must not subscribe from inside `emit`.
    ///
    /// ```ignore
    /// bus.subscribe::<QueryStabilized, _>(|event| {
    ///     log::info!("Search settled on {}", event.query);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let subscriber: Subscriber = Box::new(move |event: &dyn Any| match event.downcast_ref::<E>() {
            Some(event) => handler(event),
            None => log::error!("Event type mismatch for {}", std::any::type_name::<E>()),
        });

        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(TypeId::of::<E>())
            .or_default()
            .push(subscriber);
    }

    /// Record `event` and deliver it to its subscribers
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let subscribers = self.subscribers.read().unwrap_or_else(PoisonError::into_inner);
        let targets = subscribers.get(&TypeId::of::<E>());
        let handler_count = targets.map_or(0, Vec::len);

        log::debug!(
            "[EVENT] {} ({}) -> {} subscribers",
            event.event_type(),
            event.event_id(),
            handler_count
        );
        self.record(EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count,
        });

        for (index, subscriber) in targets.into_iter().flatten().enumerate() {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                subscriber(&event as &dyn Any);
            }));

            if outcome.is_err() {
                log::error!(
                    "Subscriber {} for {} panicked; continuing",
                    index,
                    event.event_type()
                );
            }
        }
    }

    fn record(&self, entry: EventLogEntry) {
        let mut log = self.event_log.write().unwrap_or_else(PoisonError::into_inner);
        if self.log_capacity == 0 {
            return;
        }
        while log.len() >= self.log_capacity {
            log.pop_front();
        }
        log.push_back(entry);
    }

    /// Logged emissions, oldest first
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.event_log
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Logged emissions of one event type
    pub fn emitted_count(&self, event_type: &str) -> usize {
        self.event_log
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|entry| entry.event_type == event_type)
            .count()
    }

    pub fn clear_event_log(&self) {
        self.event_log.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
