//! # Archetype Catalog
//!
//! Read-only reference data for a classification pass: the archetype rule
//! sets loaded from configuration, plus the growing pool of previously
//! labeled decks used as extra positive evidence.
//!
//! A catalog is validated eagerly when it is built. A rule set that no deck
//! could ever legally match (a card required and forbidden at once, a
//! reference deck that fails its own archetype's legality filter) is a
//! configuration error surfaced at load time, not a silent dead entry
//! discovered mid-classification.

use crate::deck::Deck;
use crate::error::{CatalogError, Result};
use crate::similarity::DeckProfile;
use serde::{Deserialize, Serialize};

/// A named bundle of matching constraints for one archetype.
///
/// `notes` is free-text metadata for humans; the algorithm never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeRuleSet {
    pub name: String,
    /// Alternate names treated as equivalent to `name`.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Optional grouping tag ("Aggro", "Control", ...).
    #[serde(default)]
    pub family: Option<String>,
    /// Cards that must all appear in a qualifying deck.
    #[serde(default)]
    pub must_have_cards: Vec<String>,
    /// Cards that must not appear in a qualifying deck.
    #[serde(default)]
    pub must_not_have_cards: Vec<String>,
    /// Canonical exemplar decklists used as similarity anchors.
    #[serde(default)]
    pub reference_decks: Vec<Deck>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ArchetypeRuleSet {
    /// A rule set with no constraints and no references, to be filled in
    /// field by field. Mostly useful in tests and programmatic catalogs.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: vec![],
            family: None,
            must_have_cards: vec![],
            must_not_have_cards: vec![],
            reference_decks: vec![],
            notes: None,
        }
    }

    /// Exact match against the primary name or any alias.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }

    /// Legality filter: every must-have card present (either board), no
    /// must-not-have card present. A deck failing this can never be
    /// labeled with this archetype, regardless of numeric similarity.
    pub fn is_eligible(&self, deck: &Deck) -> bool {
        self.must_have_cards.iter().all(|card| deck.contains(card))
            && !self.must_not_have_cards.iter().any(|card| deck.contains(card))
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        for card in &self.must_have_cards {
            if self.must_not_have_cards.contains(card) {
                return Err(CatalogError::ConflictingCardRules {
                    archetype: self.name.clone(),
                    card: card.clone(),
                });
            }
        }
        for (index, reference) in self.reference_decks.iter().enumerate() {
            if !self.is_eligible(reference) {
                return Err(CatalogError::SelfIneligibleReference {
                    archetype: self.name.clone(),
                    index,
                });
            }
        }
        Ok(())
    }
}

/// Validated, declared-order collection of archetype rule sets.
///
/// Iteration order is the declared order, which makes classifier
/// tie-breaking reproducible. The catalog is immutable after construction;
/// concurrent reads need no locking.
#[derive(Debug, Clone)]
pub struct ArchetypeCatalog {
    archetypes: Vec<ArchetypeRuleSet>,
}

impl ArchetypeCatalog {
    pub fn new(archetypes: Vec<ArchetypeRuleSet>) -> Result<Self> {
        let mut seen: Vec<&str> = Vec::new();
        for archetype in &archetypes {
            archetype.validate()?;
            for name in std::iter::once(archetype.name.as_str())
                .chain(archetype.aliases.iter().map(String::as_str))
            {
                if seen.contains(&name) {
                    return Err(CatalogError::DuplicateName {
                        name: name.to_string(),
                    });
                }
                seen.push(name);
            }
        }
        log::debug!("archetype catalog loaded: {} archetypes", archetypes.len());
        Ok(Self { archetypes })
    }

    /// Load a catalog from a JSON array of rule sets, as supplied by the
    /// surrounding application's configuration store.
    pub fn from_json(json: &str) -> Result<Self> {
        let archetypes: Vec<ArchetypeRuleSet> = serde_json::from_str(json)?;
        Self::new(archetypes)
    }

    pub fn archetypes(&self) -> &[ArchetypeRuleSet] {
        &self.archetypes
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchetypeRuleSet> {
        self.archetypes.iter()
    }

    /// Look up by primary name or alias.
    pub fn get(&self, name: &str) -> Option<&ArchetypeRuleSet> {
        self.archetypes.iter().find(|a| a.matches_name(name))
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }
}

/// A deck carrying the archetype name it was previously classified as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledDeck {
    pub deck: Deck,
    pub archetype: String,
}

/// Append-only pool of labeled decks, used as positive evidence beyond an
/// archetype's own reference decks. Each deck's similarity profile is
/// computed once at push time and reused across every comparison.
#[derive(Debug, Clone, Default)]
pub struct LabeledPool {
    entries: Vec<(LabeledDeck, DeckProfile)>,
}

impl LabeledPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, deck: Deck, archetype: impl Into<String>) {
        let profile = DeckProfile::of(&deck);
        self.entries.push((
            LabeledDeck {
                deck,
                archetype: archetype.into(),
            },
            profile,
        ));
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabeledDeck> {
        self.entries.iter().map(|(labeled, _)| labeled)
    }

    pub(crate) fn entries(&self) -> &[(LabeledDeck, DeckProfile)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
