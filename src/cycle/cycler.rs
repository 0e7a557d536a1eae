//! # QuoteCycler: deterministic rotation over a shuffled permutation.
//!
//! Owns a shuffled deck of excerpts and an exclusive cursor. Each draw
//! returns the excerpt under the cursor and advances it; reaching the end of
//! the deck reshuffles in place and resets the cursor.
//!
//! ## Rules
//! - Over any `len` consecutive draws, every excerpt is returned exactly once
//!   (one full cycle); the order is re-randomized independently each cycle.
//! - The reshuffle is a **trailing** action: the draw that lands on the cycle
//!   boundary receives the *last* excerpt of the old permutation, and only
//!   the next draw sees the new one. Because cycles shuffle independently,
//!   that next draw may repeat the boundary value.
//! - A draw against an empty deck returns the sentinel and has no side
//!   effects.
//! - The whole draw executes as one mutual-exclusion region, so concurrent
//!   callers observe a total order over draws.
//!
//! State is memory-only: each process start rebuilds the deck from the full
//! [`ExcerptSet`] with a fresh shuffle.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::content::{Excerpt, ExcerptSet};

/// Deck state guarded by the cycler's mutex.
struct Deck {
    excerpts: Vec<Excerpt>,
    cursor: usize,
    rng: StdRng,
}

/// Rotates through a content set without repeats inside a cycle.
///
/// Cheap to clone; clones share the same deck and cursor.
#[derive(Clone)]
pub struct QuoteCycler {
    inner: Arc<Mutex<Deck>>,
}

impl QuoteCycler {
    /// Creates a cycler over `set` with an entropy-seeded shuffle.
    pub fn new(set: ExcerptSet) -> Self {
        Self::with_rng(set, StdRng::from_entropy())
    }

    /// Creates a cycler with a caller-supplied RNG.
    ///
    /// A seeded `StdRng` makes the permutation (and every reshuffle)
    /// reproducible, which the unit tests rely on.
    pub fn with_rng(set: ExcerptSet, mut rng: StdRng) -> Self {
        let mut excerpts = set.into_vec();
        excerpts.shuffle(&mut rng);
        Self {
            inner: Arc::new(Mutex::new(Deck {
                excerpts,
                cursor: 0,
                rng,
            })),
        }
    }

    /// Draws the next excerpt.
    ///
    /// Empty deck → [`Excerpt::sentinel`], no cursor movement. Otherwise the
    /// excerpt under the cursor is returned; if that draw consumed the last
    /// slot, the deck is reshuffled and the cursor reset before the call
    /// returns.
    pub fn next(&self) -> Excerpt {
        let mut deck = self.lock();
        if deck.excerpts.is_empty() {
            return Excerpt::sentinel();
        }

        let drawn = deck.excerpts[deck.cursor].clone();
        deck.cursor += 1;
        if deck.cursor == deck.excerpts.len() {
            let Deck { excerpts, rng, .. } = &mut *deck;
            excerpts.shuffle(rng);
            deck.cursor = 0;
        }
        drawn
    }

    /// Number of excerpts in the deck.
    pub fn len(&self) -> usize {
        self.lock().excerpts.len()
    }

    /// Whether the deck holds no excerpts.
    pub fn is_empty(&self) -> bool {
        self.lock().excerpts.is_empty()
    }

    /// Locks the deck, recovering from a poisoned mutex.
    ///
    /// Draws never panic while holding the lock, but a recovered deck is
    /// still coherent (cursor stays in bounds), so poisoning is not fatal.
    fn lock(&self) -> std::sync::MutexGuard<'_, Deck> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for QuoteCycler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let deck = self.lock();
        f.debug_struct("QuoteCycler")
            .field("len", &deck.excerpts.len())
            .field("cursor", &deck.cursor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn set_of(texts: &[&str]) -> ExcerptSet {
        texts.iter().map(Excerpt::bare).collect()
    }

    fn seeded(texts: &[&str], seed: u64) -> QuoteCycler {
        QuoteCycler::with_rng(set_of(texts), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_full_cycle_returns_each_excerpt_once() {
        let texts = ["a", "b", "c", "d", "e"];
        let cycler = seeded(&texts, 7);

        let drawn: HashSet<String> = (0..texts.len())
            .map(|_| cycler.next().as_str().to_string())
            .collect();
        assert_eq!(drawn.len(), texts.len());
        for t in texts {
            assert!(drawn.contains(t), "missing {t}");
        }
    }

    #[test]
    fn test_every_cycle_is_complete_over_many_cycles() {
        let texts = ["a", "b", "c"];
        let cycler = seeded(&texts, 42);

        for cycle in 0..10 {
            let drawn: HashSet<String> = (0..texts.len())
                .map(|_| cycler.next().as_str().to_string())
                .collect();
            assert_eq!(drawn.len(), texts.len(), "cycle {cycle} incomplete");
        }
    }

    #[test]
    fn test_empty_deck_always_returns_sentinel() {
        let cycler = QuoteCycler::new(ExcerptSet::default());
        for _ in 0..5 {
            assert_eq!(cycler.next().as_str(), crate::content::SENTINEL_TEXT);
        }
    }

    #[test]
    fn test_reshuffle_boundary_covers_both_then_restarts() {
        let cycler = seeded(&["x", "y"], 3);

        let first: HashSet<String> = (0..2)
            .map(|_| cycler.next().as_str().to_string())
            .collect();
        assert_eq!(first.len(), 2);

        // The third draw opens an independent permutation; it may legally
        // repeat the second draw's value, but must come from the deck.
        let third = cycler.next();
        assert!(first.contains(third.as_str()));
    }

    #[test]
    fn test_single_excerpt_repeats_every_draw() {
        let cycler = seeded(&["only"], 1);
        for _ in 0..4 {
            assert_eq!(cycler.next().as_str(), "only");
        }
    }

    #[test]
    fn test_clones_share_the_cursor() {
        let cycler = seeded(&["a", "b"], 9);
        let other = cycler.clone();

        let mut drawn = HashSet::new();
        drawn.insert(cycler.next().as_str().to_string());
        drawn.insert(other.next().as_str().to_string());
        assert_eq!(drawn.len(), 2, "clones must advance the same cursor");
    }
}
