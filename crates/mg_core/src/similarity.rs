//! # Similarity Engine
//!
//! Bounded similarity score in [0,1] between two decks: cosine similarity
//! over normalized card-count vectors, computed separately for mainboard
//! and sideboard, then combined.
//!
//! ## Determinism
//!
//! Vector dimensions are the union of card names in the two boards, ordered
//! lexicographically. The ordering is part of the contract: scores are
//! bit-identical across runs and platforms for the same pair of decks.
//!
//! ## Degenerate boards
//!
//! - Two empty boards are identical: similarity 1.0.
//! - A zero vector against a populated one is maximally dissimilar:
//!   similarity 0.0, never an error.
//! - A board weight of exactly 0 short-circuits that board to 1.0, so a
//!   sideboard weight of 0 makes sideboard differences irrelevant.

use crate::deck::{CardCounts, Deck};
use crate::normalize::normalize_counts;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Relative weight of each board in the combined score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
    pub mainboard: f64,
    pub sideboard: f64,
}

impl Default for SimilarityWeights {
    /// Mainboard weighted 3:1 over sideboard.
    fn default() -> Self {
        Self {
            mainboard: 3.0,
            sideboard: 1.0,
        }
    }
}

/// How the two board scores fold into one deck score.
///
/// `WeightedAverage` is the canonical policy and what the classifier uses.
/// `Product` is a named alternate for callers that want a sideboard
/// mismatch to be punishing rather than merely discounted; the two are not
/// numerically equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinePolicy {
    /// `(Wm*Sm + Ws*Ss) / (Wm+Ws)`
    WeightedAverage,
    /// `Sm * Ss`
    Product,
}

impl Default for CombinePolicy {
    fn default() -> Self {
        CombinePolicy::WeightedAverage
    }
}

/// A deck's normalized count maps, ready for repeated comparison.
///
/// Building a profile runs card-name normalization once; the classifier
/// caches one per reference deck per catalog load so batch passes do not
/// renormalize on every comparison.
#[derive(Debug, Clone)]
pub struct DeckProfile {
    mainboard: CardCounts,
    sideboard: CardCounts,
}

impl DeckProfile {
    pub fn of(deck: &Deck) -> Self {
        Self {
            mainboard: normalize_counts(&deck.mainboard_counts()),
            sideboard: normalize_counts(&deck.sideboard_counts()),
        }
    }

    /// Combined similarity against another profile. Symmetric in its
    /// arguments; exactly 1.0 for profiles of identical decks.
    pub fn similarity_to(
        &self,
        other: &DeckProfile,
        weights: &SimilarityWeights,
        policy: CombinePolicy,
    ) -> f64 {
        let main = board_similarity(&self.mainboard, &other.mainboard, weights.mainboard);
        let side = board_similarity(&self.sideboard, &other.sideboard, weights.sideboard);
        combine(main, side, weights, policy)
    }
}

/// Similarity between two decks with default weights (3:1) and the
/// weighted-average combine policy.
///
/// # Examples
/// ```
/// use mg_core::{similarity, Deck};
///
/// let deck = Deck::from_pairs(&[(4, "Lightning Bolt"), (16, "Mountain")], &[]);
/// assert_eq!(similarity(&deck, &deck), 1.0);
/// ```
pub fn similarity(a: &Deck, b: &Deck) -> f64 {
    similarity_with(a, b, &SimilarityWeights::default(), CombinePolicy::WeightedAverage)
}

/// Similarity between two decks under explicit weights and combine policy.
pub fn similarity_with(
    a: &Deck,
    b: &Deck,
    weights: &SimilarityWeights,
    policy: CombinePolicy,
) -> f64 {
    DeckProfile::of(a).similarity_to(&DeckProfile::of(b), weights, policy)
}

fn combine(main: f64, side: f64, weights: &SimilarityWeights, policy: CombinePolicy) -> f64 {
    debug_assert!(weights.mainboard >= 0.0 && weights.sideboard >= 0.0);
    match policy {
        CombinePolicy::WeightedAverage => {
            let total = weights.mainboard + weights.sideboard;
            if total == 0.0 {
                // Both boards short-circuited; nothing left to compare.
                return 1.0;
            }
            (weights.mainboard * main + weights.sideboard * side) / total
        }
        CombinePolicy::Product => main * side,
    }
}

fn board_similarity(a: &CardCounts, b: &CardCounts, weight: f64) -> f64 {
    if weight == 0.0 {
        return 1.0;
    }
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let (va, vb) = union_vectors(a, b);
    if va == vb {
        // Identical boards score exactly 1.0, free of rounding noise.
        return 1.0;
    }
    let denom = va.norm() * vb.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (va.dot(&vb) / denom).clamp(0.0, 1.0)
}

/// Equal-length count vectors over the union of card names, zero-filled
/// where a card is absent, dimensions in lexicographic name order.
fn union_vectors(a: &CardCounts, b: &CardCounts) -> (DVector<f64>, DVector<f64>) {
    let mut names: Vec<&str> = a.keys().map(String::as_str).collect();
    for name in b.keys() {
        if !a.contains_key(name.as_str()) {
            names.push(name);
        }
    }
    names.sort_unstable();

    let count = |m: &CardCounts, name: &str| m.get(name).copied().unwrap_or(0) as f64;
    let va = DVector::from_iterator(names.len(), names.iter().map(|n| count(a, n)));
    let vb = DVector::from_iterator(names.len(), names.iter().map(|n| count(b, n)));
    (va, vb)
}
