//! # Metagame Aggregator
//!
//! Rolls a meta snapshot of per-source (observed share, deck) pairs into
//! percentage statistics per archetype. Each deck is classified, shares
//! resolving to the same archetype are merged, and the result is sorted by
//! archetype name so snapshot-style consumers see a stable order.
//!
//! Shares classified below [`thresholds::BREW_CUTOFF`] land in the "Brew"
//! bucket with their confidence inverted: a very low similarity to every
//! known archetype is reported as very high confidence of being an
//! unclassifiable brew. The inversion is deliberate, observable behavior:
//! `accuracy` reads as "confidence in the label", and for Brew the label
//! claims unclassifiability.

use crate::catalog::LabeledPool;
use crate::classify::{thresholds, Classifier, UNCLASSIFIED_LABEL};
use crate::deck::Deck;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One observed share of a meta snapshot, as supplied by a collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawShare {
    /// Identifier of the contributing source (site, league, event).
    pub source: String,
    /// Observed percentage of the field.
    pub share: f64,
    pub deck: Deck,
}

impl RawShare {
    pub fn new(source: impl Into<String>, share: f64, deck: Deck) -> Self {
        Self {
            source: source.into(),
            share,
            deck,
        }
    }
}

/// Merged share for one archetype across sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaShare {
    pub archetype: String,
    /// Summed observed percentage across contributing sources.
    pub share: f64,
    /// Every source that contributed to this archetype, in input order.
    pub sources: Vec<String>,
    /// Mean classification confidence. For the Brew bucket this is the
    /// inverted figure: confidence that the decks match nothing known.
    pub accuracy: f64,
}

/// Classify every share's deck and merge shares by resolved archetype.
///
/// Shares that resolve to the same archetype are merged into one
/// [`MetaShare`]: sources unioned, percentages summed, accuracies
/// averaged. A single-source archetype passes through unchanged. Output
/// is sorted by archetype name.
pub fn aggregate(
    classifier: &Classifier,
    pool: &LabeledPool,
    shares: &[RawShare],
) -> Vec<MetaShare> {
    let labels: Vec<(String, f64)> = shares
        .par_iter()
        .map(|raw| {
            let result = classifier.classify(&raw.deck, pool);
            if result.confidence < thresholds::BREW_CUTOFF {
                log::debug!(
                    "share from '{}' below brew cutoff ({:.3}), relabeling",
                    raw.source,
                    result.confidence
                );
                (UNCLASSIFIED_LABEL.to_string(), 1.0 - result.confidence)
            } else {
                (result.label().to_string(), result.confidence)
            }
        })
        .collect();

    // Merge in first-seen order; the final sort fixes the output order.
    let mut merged: Vec<(String, f64, Vec<String>, Vec<f64>)> = Vec::new();
    for (raw, (label, accuracy)) in shares.iter().zip(labels) {
        if let Some(index) = merged.iter().position(|entry| entry.0 == label) {
            let entry = &mut merged[index];
            entry.1 += raw.share;
            entry.2.push(raw.source.clone());
            entry.3.push(accuracy);
        } else {
            merged.push((label, raw.share, vec![raw.source.clone()], vec![accuracy]));
        }
    }

    let mut out: Vec<MetaShare> = merged
        .into_iter()
        .map(|(archetype, share, sources, accuracies)| {
            let accuracy = accuracies.iter().sum::<f64>() / accuracies.len() as f64;
            MetaShare {
                archetype,
                share,
                sources,
                accuracy,
            }
        })
        .collect();
    out.sort_by(|a, b| a.archetype.cmp(&b.archetype));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ArchetypeCatalog, ArchetypeRuleSet};

    fn burn_reference() -> Deck {
        Deck::from_pairs(
            &[(4, "Lightning Bolt"), (4, "Lava Spike"), (4, "Rift Bolt"), (18, "Mountain")],
            &[(4, "Smash to Smithereens")],
        )
    }

    fn delver_reference() -> Deck {
        Deck::from_pairs(
            &[(4, "Delver of Secrets"), (4, "Ponder"), (4, "Counterspell"), (17, "Island")],
            &[(4, "Hydroblast")],
        )
    }

    fn catalog() -> ArchetypeCatalog {
        let mut burn = ArchetypeRuleSet::named("Burn");
        burn.must_have_cards = vec!["Lightning Bolt".to_string()];
        burn.reference_decks = vec![burn_reference()];

        let mut delver = ArchetypeRuleSet::named("Delver");
        delver.must_have_cards = vec!["Delver of Secrets".to_string()];
        delver.reference_decks = vec![delver_reference()];

        ArchetypeCatalog::new(vec![burn, delver]).unwrap()
    }

    #[test]
    fn test_grouping_sums_shares_and_unions_sources() {
        let catalog = catalog();
        let classifier = Classifier::new(&catalog);
        let pool = LabeledPool::new();

        let shares = vec![
            RawShare::new("mtgo-league", 10.0, burn_reference()),
            RawShare::new("mtgo-challenge", 5.0, burn_reference()),
            RawShare::new("goldfish", 2.0, burn_reference()),
        ];
        let result = aggregate(&classifier, &pool, &shares);

        assert_eq!(result.len(), 1);
        let burn = &result[0];
        assert_eq!(burn.archetype, "Burn");
        assert_eq!(burn.share, 17.0);
        assert_eq!(burn.sources, vec!["mtgo-league", "mtgo-challenge", "goldfish"]);
        assert_eq!(burn.accuracy, 1.0, "exact reference copies classify at full confidence");
    }

    #[test]
    fn test_single_share_passes_through() {
        let catalog = catalog();
        let classifier = Classifier::new(&catalog);
        let pool = LabeledPool::new();

        let shares = vec![RawShare::new("goldfish", 4.5, delver_reference())];
        let result = aggregate(&classifier, &pool, &shares);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].archetype, "Delver");
        assert_eq!(result[0].share, 4.5);
        assert_eq!(result[0].sources, vec!["goldfish"]);
    }

    #[test]
    fn test_low_confidence_inverts_into_brew() {
        let catalog = catalog();
        let classifier = Classifier::new(&catalog);
        let pool = LabeledPool::new();

        // Eligible for Burn (carries a Bolt) but numerically nothing like
        // it, so the classification lands far below the brew cutoff.
        let stranger = Deck::from_pairs(&[(1, "Lightning Bolt"), (30, "Swamp")], &[(4, "Duress")]);
        let direct = classifier.classify(&stranger, &pool);
        assert!(direct.confidence > 0.0);
        assert!(direct.confidence < thresholds::BREW_CUTOFF);

        let result = aggregate(&classifier, &pool, &[RawShare::new("mtgo", 3.0, stranger)]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].archetype, UNCLASSIFIED_LABEL);
        assert_eq!(result[0].accuracy, 1.0 - direct.confidence, "brew accuracy is the inverted confidence");
    }

    #[test]
    fn test_no_match_is_full_confidence_brew() {
        let catalog = catalog();
        let classifier = Classifier::new(&catalog);
        let pool = LabeledPool::new();

        // Nothing eligible: confidence 0, inverted to exactly 1.
        let shares = vec![RawShare::new("mtgo", 2.0, Deck::from_pairs(&[(40, "Plains")], &[]))];
        let result = aggregate(&classifier, &pool, &shares);

        assert_eq!(result[0].archetype, UNCLASSIFIED_LABEL);
        assert_eq!(result[0].accuracy, 1.0);
    }

    #[test]
    fn test_output_sorted_by_archetype_name() {
        let catalog = catalog();
        let classifier = Classifier::new(&catalog);
        let pool = LabeledPool::new();

        let shares = vec![
            RawShare::new("s1", 4.5, delver_reference()),
            RawShare::new("s2", 10.0, burn_reference()),
            RawShare::new("s3", 1.5, Deck::from_pairs(&[(40, "Plains")], &[])),
        ];
        let result = aggregate(&classifier, &pool, &shares);

        let names: Vec<&str> = result.iter().map(|m| m.archetype.as_str()).collect();
        assert_eq!(names, vec!["Brew", "Burn", "Delver"]);
    }

    #[test]
    fn test_empty_snapshot() {
        let catalog = catalog();
        let classifier = Classifier::new(&catalog);
        assert!(aggregate(&classifier, &LabeledPool::new(), &[]).is_empty());
    }

    #[test]
    fn test_meta_snapshot_output() {
        let catalog = catalog();
        let classifier = Classifier::new(&catalog);
        let pool = LabeledPool::new();

        let shares = vec![
            RawShare::new("mtgo-1", 10.0, burn_reference()),
            RawShare::new("mtgo-2", 5.0, burn_reference()),
            RawShare::new("goldfish", 2.0, burn_reference()),
            RawShare::new("mtgo-3", 4.5, delver_reference()),
            RawShare::new("mtgo-4", 1.5, Deck::from_pairs(&[(40, "Plains")], &[])),
        ];
        let result = aggregate(&classifier, &pool, &shares);

        let lines: Vec<String> = result
            .iter()
            .map(|m| {
                format!(
                    "{} {:.1}% acc {:.2} [{}]",
                    m.archetype,
                    m.share,
                    m.accuracy,
                    m.sources.join(", ")
                )
            })
            .collect();

        insta::assert_debug_snapshot!(lines, @r###"
        [
            "Brew 1.5% acc 1.00 [mtgo-4]",
            "Burn 17.0% acc 1.00 [mtgo-1, mtgo-2, goldfish]",
            "Delver 4.5% acc 1.00 [mtgo-3]",
        ]
        "###);
    }
}
