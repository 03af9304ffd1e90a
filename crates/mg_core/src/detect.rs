//! # Structural Rule Detector
//!
//! Fast pre-classification pass for archetypes with unambiguous card
//! signatures. Some archetypes are defined by a card combination more than
//! by list shape (the Urza land trio, an artifact-land core); when the
//! reference pool for such an archetype is thin, nearest-neighbor search
//! can misfile decks that a two-line presence check nails. A structural
//! match yields maximum confidence without consulting any reference deck.
//!
//! Rules are plain data evaluated in their declared order (a tagged list,
//! not a lookup table) so the first-match-wins behavior is deterministic
//! and loadable from configuration. No similarity math is involved.

use crate::catalog::{ArchetypeCatalog, ArchetypeRuleSet};
use crate::deck::Deck;
use serde::{Deserialize, Serialize};

/// Card-membership predicate over a deck. Copies are counted across
/// mainboard and sideboard combined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralPredicate {
    /// Every listed card appears in the deck.
    ContainsAll(Vec<String>),
    /// At least one listed card appears in the deck.
    ContainsAny(Vec<String>),
    /// Total copies across the listed cards reach `count`.
    ContainsAtLeast { count: u32, cards: Vec<String> },
    /// Every sub-predicate holds.
    AllOf(Vec<StructuralPredicate>),
}

impl StructuralPredicate {
    pub fn matches(&self, deck: &Deck) -> bool {
        match self {
            StructuralPredicate::ContainsAll(cards) => {
                cards.iter().all(|card| deck.contains(card))
            }
            StructuralPredicate::ContainsAny(cards) => {
                cards.iter().any(|card| deck.contains(card))
            }
            StructuralPredicate::ContainsAtLeast { count, cards } => {
                cards.iter().map(|card| deck.copies_of(card)).sum::<u32>() >= *count
            }
            StructuralPredicate::AllOf(predicates) => {
                predicates.iter().all(|predicate| predicate.matches(deck))
            }
        }
    }
}

/// One detector entry: when `predicate` matches a deck, the deck is
/// `archetype`, provided the archetype's own legality filter agrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralRule {
    pub archetype: String,
    pub predicate: StructuralPredicate,
}

impl StructuralRule {
    pub fn new(archetype: impl Into<String>, predicate: StructuralPredicate) -> Self {
        Self {
            archetype: archetype.into(),
            predicate,
        }
    }
}

/// Ordered registry of structural rules. Evaluation order is declaration
/// order; the first rule whose predicate matches and whose archetype
/// passes the legality check wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralRules {
    rules: Vec<StructuralRule>,
}

impl StructuralRules {
    pub fn new(rules: Vec<StructuralRule>) -> Self {
        Self { rules }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[StructuralRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First structurally matching, legality-passing archetype for `deck`,
    /// or None when no rule fires. A rule naming an archetype missing from
    /// the catalog is skipped with a warning rather than treated as fatal.
    pub fn detect<'a>(
        &self,
        deck: &Deck,
        catalog: &'a ArchetypeCatalog,
    ) -> Option<&'a ArchetypeRuleSet> {
        for rule in &self.rules {
            if !rule.predicate.matches(deck) {
                continue;
            }
            match catalog.get(&rule.archetype) {
                Some(archetype) if archetype.is_eligible(deck) => {
                    log::debug!("structural rule fired: {}", rule.archetype);
                    return Some(archetype);
                }
                Some(_) => {
                    log::debug!(
                        "structural rule '{}' matched but deck fails legality",
                        rule.archetype
                    );
                }
                None => {
                    log::warn!(
                        "structural rule references unknown archetype '{}'",
                        rule.archetype
                    );
                }
            }
        }
        None
    }
}
