//! # Classifier
//!
//! Resolves a deck to its best-matching archetype and a confidence score.
//!
//! The pipeline per deck:
//! 1. legality filter: archetypes whose must-have/must-not-have rules the
//!    deck violates are out, whatever the numbers say;
//! 2. structural fast path: an unambiguous card-signature match returns
//!    immediately at confidence 1.0;
//! 3. nearest-neighbor search over every eligible archetype's reference
//!    decks and the labeled pool; the single best similarity wins and
//!    doubles as the confidence.
//!
//! The classifier never errors on "no match": it returns the unclassified
//! sentinel at confidence 0 and leaves the accept/reject decision to the
//! caller (see [`thresholds`] for the conventional cutoffs).
//!
//! A classifier instance is an immutable snapshot over a borrowed catalog:
//! reference-deck profiles are normalized once in the constructor and
//! cached for the classifier's lifetime, which is also the cache's
//! invalidation scope: load a new catalog, build a new classifier.
//! `&Classifier` is freely shareable across threads.

use crate::catalog::{ArchetypeCatalog, ArchetypeRuleSet, LabeledPool};
use crate::deck::Deck;
use crate::detect::StructuralRules;
use crate::similarity::{CombinePolicy, DeckProfile, SimilarityWeights};
use rayon::prelude::*;

/// Label reported for decks that resemble no known archetype.
pub const UNCLASSIFIED_LABEL: &str = "Brew";

/// Conventional confidence cutoffs applied by callers. The classifier
/// itself is agnostic to what "acceptable" means.
pub mod thresholds {
    /// Below this, a deck is treated as an unclassifiable brew.
    pub const BREW_CUTOFF: f64 = 0.30;
    /// At or above this, a label is trusted without manual review.
    pub const AUTO_ACCEPT: f64 = 0.78;
}

/// Caller-side acceptance band for a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    /// Trust the label as-is.
    Accept,
    /// Plausible label, flag for manual review.
    Review,
    /// Unclassifiable brew.
    Brew,
}

impl ConfidenceBand {
    pub fn of(confidence: f64) -> Self {
        if confidence < thresholds::BREW_CUTOFF {
            ConfidenceBand::Brew
        } else if confidence >= thresholds::AUTO_ACCEPT {
            ConfidenceBand::Accept
        } else {
            ConfidenceBand::Review
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            ConfidenceBand::Accept => "Accept",
            ConfidenceBand::Review => "Needs Review",
            ConfidenceBand::Brew => "Brew",
        }
    }
}

/// Outcome of classifying one deck. Produced fresh per call.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<'a> {
    /// The matched rule set, or None for the unclassified sentinel.
    pub archetype: Option<&'a ArchetypeRuleSet>,
    /// Best similarity seen, in [0,1]. Exactly 1.0 for structural matches.
    pub confidence: f64,
}

impl<'a> Classification<'a> {
    pub fn unclassified() -> Self {
        Self {
            archetype: None,
            confidence: 0.0,
        }
    }

    /// The archetype name, or [`UNCLASSIFIED_LABEL`].
    pub fn label(&self) -> &'a str {
        self.archetype
            .map_or(UNCLASSIFIED_LABEL, |archetype| archetype.name.as_str())
    }

    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::of(self.confidence)
    }
}

/// Archetype classifier over a catalog snapshot.
pub struct Classifier<'a> {
    catalog: &'a ArchetypeCatalog,
    rules: StructuralRules,
    weights: SimilarityWeights,
    policy: CombinePolicy,
    /// Normalized profiles for each archetype's reference decks, indexed
    /// parallel to the catalog. Built once per catalog load.
    reference_profiles: Vec<Vec<DeckProfile>>,
}

impl<'a> Classifier<'a> {
    pub fn new(catalog: &'a ArchetypeCatalog) -> Self {
        let reference_profiles = catalog
            .iter()
            .map(|archetype| archetype.reference_decks.iter().map(DeckProfile::of).collect())
            .collect();
        Self {
            catalog,
            rules: StructuralRules::empty(),
            weights: SimilarityWeights::default(),
            policy: CombinePolicy::WeightedAverage,
            reference_profiles,
        }
    }

    pub fn with_rules(mut self, rules: StructuralRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_weights(mut self, weights: SimilarityWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_policy(mut self, policy: CombinePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalog(&self) -> &'a ArchetypeCatalog {
        self.catalog
    }

    /// Classify one deck against the catalog and the labeled pool.
    pub fn classify(&self, deck: &Deck, pool: &LabeledPool) -> Classification<'a> {
        let archetypes = self.catalog.archetypes();
        let eligible: Vec<usize> = (0..archetypes.len())
            .filter(|&i| archetypes[i].is_eligible(deck))
            .collect();
        if eligible.is_empty() {
            log::debug!("no archetype passes the legality filter");
            return Classification::unclassified();
        }

        if let Some(archetype) = self.rules.detect(deck, self.catalog) {
            return Classification {
                archetype: Some(archetype),
                confidence: 1.0,
            };
        }

        let profile = DeckProfile::of(deck);
        let mut best: Option<&'a ArchetypeRuleSet> = None;
        let mut best_score = 0.0_f64;

        // Strict `>` keeps the first archetype reaching the maximum, in
        // declared catalog order, so ties break reproducibly.
        for &i in &eligible {
            for reference in &self.reference_profiles[i] {
                let score = profile.similarity_to(reference, &self.weights, self.policy);
                if score > best_score {
                    best = Some(&archetypes[i]);
                    best_score = score;
                }
            }
        }

        for (labeled, labeled_profile) in pool.entries() {
            let archetype = match self.catalog.get(&labeled.archetype) {
                Some(archetype) => archetype,
                None => {
                    log::warn!(
                        "labeled deck references unknown archetype '{}'",
                        labeled.archetype
                    );
                    continue;
                }
            };
            if !archetype.is_eligible(deck) {
                continue;
            }
            let score = profile.similarity_to(labeled_profile, &self.weights, self.policy);
            if score > best_score {
                best = Some(archetype);
                best_score = score;
            }
        }

        match best {
            Some(archetype) => Classification {
                archetype: Some(archetype),
                confidence: best_score,
            },
            None => Classification::unclassified(),
        }
    }

    /// Classify a batch of decks in parallel. Output order matches input
    /// order; each classification only reads the shared catalog and pool.
    pub fn classify_batch(&self, decks: &[Deck], pool: &LabeledPool) -> Vec<Classification<'a>> {
        decks
            .par_iter()
            .map(|deck| self.classify(deck, pool))
            .collect()
    }
}
