//! # Deck Model
//!
//! Immutable representation of a decklist: a mainboard and a sideboard,
//! each an ordered list of (count, card name) entries.
//!
//! Card names are exact, case-sensitive identifiers matching whatever card
//! database the surrounding application uses; the core never validates them
//! against a catalog. Decks are constructed once from parsed decklist text
//! or API payloads and never mutated afterwards; every numeric comparison
//! works off the merged count views built here.

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Card name → total copies. Uses a version-stable hasher so map behavior
/// is identical across builds; any ordering that matters is sorted
/// explicitly downstream.
pub type CardCounts = FxHashMap<String, u32>;

/// A single decklist line: `count` copies of `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub count: u32,
    pub name: String,
}

impl DeckEntry {
    pub fn new(count: u32, name: impl Into<String>) -> Self {
        debug_assert!(count > 0, "deck entries carry positive counts");
        Self {
            count,
            name: name.into(),
        }
    }
}

/// An immutable deck. Fields are private; the list views and merged count
/// views are the only way to read it back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Deck {
    mainboard: Vec<DeckEntry>,
    sideboard: Vec<DeckEntry>,
}

impl Deck {
    pub fn new(mainboard: Vec<DeckEntry>, sideboard: Vec<DeckEntry>) -> Self {
        Self {
            mainboard,
            sideboard,
        }
    }

    /// Boundary conversion helper for callers holding plain
    /// (count, name) pairs, e.g. a decklist parser.
    pub fn from_pairs(mainboard: &[(u32, &str)], sideboard: &[(u32, &str)]) -> Self {
        let build = |pairs: &[(u32, &str)]| {
            pairs
                .iter()
                .map(|&(count, name)| DeckEntry::new(count, name))
                .collect()
        };
        Self::new(build(mainboard), build(sideboard))
    }

    pub fn mainboard(&self) -> &[DeckEntry] {
        &self.mainboard
    }

    pub fn sideboard(&self) -> &[DeckEntry] {
        &self.sideboard
    }

    /// Mainboard as a card → total copies map. Duplicate entries for the
    /// same card (decklists sometimes split a playset across lines) are
    /// merged by summing.
    pub fn mainboard_counts(&self) -> CardCounts {
        Self::merge_counts(&self.mainboard)
    }

    /// Sideboard as a card → total copies map.
    pub fn sideboard_counts(&self) -> CardCounts {
        Self::merge_counts(&self.sideboard)
    }

    pub fn mainboard_total(&self) -> u32 {
        self.mainboard.iter().map(|e| e.count).sum()
    }

    pub fn sideboard_total(&self) -> u32 {
        self.sideboard.iter().map(|e| e.count).sum()
    }

    /// True when the card appears in the mainboard or the sideboard.
    pub fn contains(&self, name: &str) -> bool {
        self.mainboard.iter().any(|e| e.name == name) || self.sideboard.iter().any(|e| e.name == name)
    }

    /// Total copies across both boards.
    pub fn copies_of(&self, name: &str) -> u32 {
        self.mainboard
            .iter()
            .chain(self.sideboard.iter())
            .filter(|e| e.name == name)
            .map(|e| e.count)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.mainboard.is_empty() && self.sideboard.is_empty()
    }

    /// Mainboard differences against another deck, for ad-hoc deck diffing.
    /// All three lists come back sorted by card name.
    pub fn diff(&self, other: &Deck) -> DeckDiff {
        let ours = self.mainboard_counts();
        let theirs = other.mainboard_counts();

        let mut removed = vec![];
        let mut added = vec![];
        let mut changed = vec![];

        for (name, &count) in &ours {
            match theirs.get(name) {
                None => removed.push((name.clone(), count)),
                Some(&their_count) if their_count != count => {
                    changed.push((name.clone(), count, their_count))
                }
                Some(_) => {}
            }
        }
        for (name, &count) in &theirs {
            if !ours.contains_key(name) {
                added.push((name.clone(), count));
            }
        }

        removed.sort();
        added.sort();
        changed.sort();
        DeckDiff {
            removed,
            added,
            changed,
        }
    }

    fn merge_counts(entries: &[DeckEntry]) -> CardCounts {
        let mut counts = CardCounts::default();
        for entry in entries {
            *counts.entry(entry.name.clone()).or_insert(0) += entry.count;
        }
        counts
    }
}

/// Mainboard delta between two decks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeckDiff {
    /// Cards only in the left deck: (name, copies).
    pub removed: Vec<(String, u32)>,
    /// Cards only in the right deck: (name, copies).
    pub added: Vec<(String, u32)>,
    /// Cards in both at different counts: (name, left copies, right copies).
    pub changed: Vec<(String, u32, u32)>,
}

impl DeckDiff {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.changed.is_empty()
    }
}
