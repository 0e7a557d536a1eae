//! # Demo: stdout_broadcast
//!
//! A complete broadcaster wired to a stdout "transport": excerpts are parsed
//! from an inline blob, two subscribers are registered through the command
//! router, and the scheduler pushes one excerpt per second until Ctrl-C.
//!
//! Shows how to:
//! - Build a [`QuoteCycler`] from parsed content.
//! - Implement the [`Transport`] trait.
//! - Drive subscriptions through [`CommandRouter`].
//! - Run [`Broadcaster::run`] with the built-in [`LogWriter`] observer.
//!
//! ## Run
//! ```bash
//! cargo run --example stdout_broadcast --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quotecast::{
    Broadcaster, Command, Config, JsonFileStore, LogWriter, Observer, QuoteCycler, SendError,
    SubscriberId, Transport,
};

const BOOK: &str = "\
The cat sat on the mat.

Only the mad ones matter. |||> J. Kerouac (almost)

So it goes. |||> K. Vonnegut";

struct StdoutTransport;

#[async_trait]
impl Transport for StdoutTransport {
    async fn send(&self, to: &SubscriberId, text: &str) -> Result<(), SendError> {
        println!("--> [{to}] {text}");
        Ok(())
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let mut cfg = Config::default();
    cfg.interval = Duration::from_secs(1);
    cfg.grace = Duration::from_secs(5);

    let store = Arc::new(JsonFileStore::new(
        std::env::temp_dir().join("quotecast-demo-subscribers.json"),
    ));
    let observers: Vec<Arc<dyn Observer>> = vec![Arc::new(LogWriter)];

    let caster = Broadcaster::new(
        cfg,
        QuoteCycler::new(quotecast::content::parse(BOOK)),
        store,
        Arc::new(StdoutTransport),
        observers,
    );

    // Simulate two inbound /subscribe commands before the loop starts.
    let router = caster.router();
    for id in ["alice", "bob"] {
        let cmd = Command::parse("/subscribe").expect("known command");
        let reply = router.dispatch(cmd, &id.into()).await;
        println!("<-- [{id}] {reply}");
    }

    println!("broadcasting every second; Ctrl-C to stop");
    caster.run().await?;
    Ok(())
}
