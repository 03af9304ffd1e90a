//! # mg_core - Deck Similarity & Archetype Classification Engine
//!
//! This library assigns archetype labels to trading-card decklists by
//! comparing them against reference decklists and structural rules, and
//! rolls classified decks into metagame share statistics.
//!
//! ## Features
//! - Fully deterministic: same catalog + same deck = same label, bit-identical scores
//! - Weighted cosine similarity over normalized card-count vectors
//! - Structural fast path for archetypes with unambiguous card signatures
//! - Legality filtering via per-archetype must-have/must-not-have rules
//! - Metagame aggregation with a stable, snapshot-friendly output order
//!
//! The crate is a pure computation core: no I/O, no network, no shared
//! mutable state. The surrounding application scrapes/parses decklists and
//! archetype configuration, hands them in as [`Deck`] and
//! [`ArchetypeCatalog`] values, and persists whatever comes back.

pub mod catalog;
pub mod classify;
pub mod deck;
pub mod detect;
pub mod error;
pub mod meta;
pub mod normalize;
pub mod similarity;

// Re-export the public surface.
pub use catalog::{ArchetypeCatalog, ArchetypeRuleSet, LabeledDeck, LabeledPool};
pub use classify::{thresholds, Classification, Classifier, ConfidenceBand, UNCLASSIFIED_LABEL};
pub use deck::{CardCounts, Deck, DeckDiff, DeckEntry};
pub use detect::{StructuralPredicate, StructuralRule, StructuralRules};
pub use error::{CatalogError, Result};
pub use meta::{aggregate, MetaShare, RawShare};
pub use normalize::{canonical_name, normalize_counts};
pub use similarity::{similarity, similarity_with, CombinePolicy, DeckProfile, SimilarityWeights};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
