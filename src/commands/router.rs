//! # Inbound command handling.
//!
//! [`CommandRouter`] is the boundary the transport layer calls when a user
//! issues `/start`, `/subscribe`, or `/unsubscribe`. Each entry point mutates
//! (or inspects) the subscriber store and **always** returns reply text — a
//! command is never answered with silence, including when persistence fails.
//!
//! Router calls run concurrently with broadcast ticks; all serialization
//! happens inside the store, so the router itself holds no locks.

use std::sync::Arc;

use crate::events::{Bus, Event, EventKind};
use crate::store::{SubscriberId, SubscriberStore};

/// Reply for `/start`.
const REPLY_START: &str = "Welcome! Use /subscribe to get book excerpts.";
/// Reply for a first-time `/subscribe`.
const REPLY_SUBSCRIBED: &str = "You're subscribed! Excerpts are on the way.";
/// Reply for `/subscribe` from an existing member.
const REPLY_ALREADY_SUBSCRIBED: &str = "You're already subscribed!";
/// Reply for `/unsubscribe` from a member.
const REPLY_UNSUBSCRIBED: &str = "You've been unsubscribed. No more excerpts!";
/// Reply for `/unsubscribe` from a non-member.
const REPLY_NOT_SUBSCRIBED: &str = "You're not subscribed, so nothing to unsubscribe from!";
/// Reply when a membership change could not be persisted.
const REPLY_STORE_FAILED: &str = "Something went wrong on our side. Please try again later.";

/// One of the commands the core understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `/start` — greeting, no state change.
    Start,
    /// `/subscribe` — join the broadcast.
    Subscribe,
    /// `/unsubscribe` — leave the broadcast.
    Unsubscribe,
}

impl Command {
    /// Parses the leading token of an inbound message into a command.
    ///
    /// Anything that is not one of the three known commands returns `None`;
    /// what to do with such messages is the transport layer's business.
    pub fn parse(text: &str) -> Option<Self> {
        let token = text.trim().split_whitespace().next()?;
        match token {
            "/start" => Some(Command::Start),
            "/subscribe" => Some(Command::Subscribe),
            "/unsubscribe" => Some(Command::Unsubscribe),
            _ => None,
        }
    }
}

/// Routes inbound commands to subscriber-store mutations and builds replies.
#[derive(Clone)]
pub struct CommandRouter {
    store: Arc<dyn SubscriberStore>,
    bus: Bus,
}

impl CommandRouter {
    /// Creates a router over the given store, publishing membership events
    /// to `bus`.
    pub fn new(store: Arc<dyn SubscriberStore>, bus: Bus) -> Self {
        Self { store, bus }
    }

    /// Dispatches a parsed command for the subscriber it came from.
    pub async fn dispatch(&self, command: Command, from: &SubscriberId) -> String {
        match command {
            Command::Start => self.on_start(from).await,
            Command::Subscribe => self.on_subscribe(from).await,
            Command::Unsubscribe => self.on_unsubscribe(from).await,
        }
    }

    /// Handles `/start`.
    pub async fn on_start(&self, _from: &SubscriberId) -> String {
        REPLY_START.to_string()
    }

    /// Handles `/subscribe`.
    ///
    /// Delegates to [`SubscriberStore::add`]; distinct replies for "now
    /// subscribed" and "already subscribed". A persistence failure leaves
    /// membership unchanged, publishes [`EventKind::StoreWriteFailed`], and
    /// tells the user to retry.
    pub async fn on_subscribe(&self, from: &SubscriberId) -> String {
        match self.store.add(from).await {
            Ok(true) => {
                self.bus.publish(
                    Event::new(EventKind::SubscriberAdded).with_subscriber(from.as_str()),
                );
                REPLY_SUBSCRIBED.to_string()
            }
            Ok(false) => REPLY_ALREADY_SUBSCRIBED.to_string(),
            Err(err) => {
                self.publish_store_failure(from, &err.to_string());
                REPLY_STORE_FAILED.to_string()
            }
        }
    }

    /// Handles `/unsubscribe`.
    ///
    /// Delegates to [`SubscriberStore::remove`]; distinct replies for "now
    /// unsubscribed" and "was not subscribed". Persistence failures behave as
    /// in [`CommandRouter::on_subscribe`].
    pub async fn on_unsubscribe(&self, from: &SubscriberId) -> String {
        match self.store.remove(from).await {
            Ok(true) => {
                self.bus.publish(
                    Event::new(EventKind::SubscriberRemoved).with_subscriber(from.as_str()),
                );
                REPLY_UNSUBSCRIBED.to_string()
            }
            Ok(false) => REPLY_NOT_SUBSCRIBED.to_string(),
            Err(err) => {
                self.publish_store_failure(from, &err.to_string());
                REPLY_STORE_FAILED.to_string()
            }
        }
    }

    fn publish_store_failure(&self, from: &SubscriberId, reason: &str) {
        self.bus.publish(
            Event::new(EventKind::StoreWriteFailed)
                .with_subscriber(from.as_str())
                .with_reason(reason.to_string()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::SubscriberSet;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("  /subscribe  "), Some(Command::Subscribe));
        assert_eq!(
            Command::parse("/unsubscribe please"),
            Some(Command::Unsubscribe)
        );
    }

    #[test]
    fn test_parse_rejects_unknown_input() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse("/stop"), None);
    }

    /// In-memory store; `fail_writes` makes every mutation surface an error.
    struct MemStore {
        set: Mutex<SubscriberSet>,
        fail_writes: bool,
    }

    impl MemStore {
        fn new(fail_writes: bool) -> Arc<Self> {
            Arc::new(Self {
                set: Mutex::new(SubscriberSet::new()),
                fail_writes,
            })
        }

        fn write_error() -> StoreError {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            ))
        }
    }

    #[async_trait]
    impl SubscriberStore for MemStore {
        async fn add(&self, id: &SubscriberId) -> Result<bool, StoreError> {
            if self.fail_writes {
                return Err(Self::write_error());
            }
            Ok(self.set.lock().await.insert(id.clone()))
        }

        async fn remove(&self, id: &SubscriberId) -> Result<bool, StoreError> {
            if self.fail_writes {
                return Err(Self::write_error());
            }
            Ok(self.set.lock().await.remove(id))
        }

        async fn list(&self) -> SubscriberSet {
            self.set.lock().await.clone()
        }
    }

    fn router(fail_writes: bool) -> (CommandRouter, Bus) {
        let bus = Bus::new(16);
        (
            CommandRouter::new(MemStore::new(fail_writes), bus.clone()),
            bus,
        )
    }

    #[tokio::test]
    async fn test_subscribe_replies_distinguish_new_and_existing() {
        let (router, _bus) = router(false);
        let id = SubscriberId::from("42");

        assert_eq!(router.on_subscribe(&id).await, REPLY_SUBSCRIBED);
        assert_eq!(router.on_subscribe(&id).await, REPLY_ALREADY_SUBSCRIBED);
    }

    #[tokio::test]
    async fn test_unsubscribe_replies_distinguish_member_and_stranger() {
        let (router, _bus) = router(false);
        let id = SubscriberId::from("42");

        assert_eq!(router.on_unsubscribe(&id).await, REPLY_NOT_SUBSCRIBED);
        router.on_subscribe(&id).await;
        assert_eq!(router.on_unsubscribe(&id).await, REPLY_UNSUBSCRIBED);
    }

    #[tokio::test]
    async fn test_start_always_greets() {
        let (router, _bus) = router(false);
        assert_eq!(
            router.dispatch(Command::Start, &"7".into()).await,
            REPLY_START
        );
    }

    #[tokio::test]
    async fn test_store_failure_replies_and_publishes() {
        let (router, bus) = router(true);
        let mut rx = bus.subscribe();

        let reply = router.on_subscribe(&"42".into()).await;
        assert_eq!(reply, REPLY_STORE_FAILED);

        let ev = rx.recv().await.expect("recv");
        assert_eq!(ev.kind, EventKind::StoreWriteFailed);
        assert_eq!(ev.subscriber.as_deref(), Some("42"));
        assert!(ev.reason.as_deref().unwrap_or_default().contains("disk full"));
    }

    #[tokio::test]
    async fn test_membership_events_are_published() {
        let (router, bus) = router(false);
        let mut rx = bus.subscribe();
        let id = SubscriberId::from("9");

        router.on_subscribe(&id).await;
        assert_eq!(rx.recv().await.expect("recv").kind, EventKind::SubscriberAdded);

        router.on_unsubscribe(&id).await;
        assert_eq!(
            rx.recv().await.expect("recv").kind,
            EventKind::SubscriberRemoved
        );
    }
}
