//! # Card Normalizer
//!
//! Folds known equivalence classes of card names into one canonical name
//! before any similarity math runs. Without this, two copies of the same
//! strategic card under different print names (a snow-wrapped basic, an
//! old-border functional twin) register as unrelated features and drag the
//! similarity score down.
//!
//! Folds applied:
//! - the five snow-covered basic lands fold into their plain basics;
//! - "Blue Elemental Blast" folds into "Hydroblast" and
//!   "Red Elemental Blast" into "Pyroblast" (older printing into the
//!   canonical functional reprint).
//!
//! Normalization redistributes copies, it never discards or invents them:
//! the total card count of a mapping is preserved exactly.

use crate::deck::CardCounts;
use fxhash::FxHashMap;
use once_cell::sync::Lazy;

/// Folded name → canonical name.
const NAME_FOLDS: [(&str, &str); 7] = [
    ("Snow-Covered Plains", "Plains"),
    ("Snow-Covered Island", "Island"),
    ("Snow-Covered Swamp", "Swamp"),
    ("Snow-Covered Mountain", "Mountain"),
    ("Snow-Covered Forest", "Forest"),
    ("Blue Elemental Blast", "Hydroblast"),
    ("Red Elemental Blast", "Pyroblast"),
];

static FOLD_TABLE: Lazy<FxHashMap<&'static str, &'static str>> =
    Lazy::new(|| NAME_FOLDS.iter().copied().collect());

/// Canonical form of a card name. Names outside the fold table come back
/// unchanged.
pub fn canonical_name(name: &str) -> &str {
    FOLD_TABLE.get(name).copied().unwrap_or(name)
}

/// Rewrite a card-count mapping into canonical form.
///
/// Pure function: the input is never mutated. Quantities of folded names
/// are summed into their canonical entry, so the output carries no
/// duplicate logical cards and the same total count as the input.
///
/// # Examples
/// ```
/// use mg_core::normalize_counts;
/// use mg_core::CardCounts;
///
/// let mut counts = CardCounts::default();
/// counts.insert("Snow-Covered Island".to_string(), 2);
/// counts.insert("Island".to_string(), 1);
///
/// let normalized = normalize_counts(&counts);
/// assert_eq!(normalized.get("Island"), Some(&3));
/// assert_eq!(normalized.get("Snow-Covered Island"), None);
/// ```
pub fn normalize_counts(counts: &CardCounts) -> CardCounts {
    let mut out = CardCounts::default();
    for (name, &count) in counts {
        *out.entry(canonical_name(name).to_string()).or_insert(0) += count;
    }
    out
}
