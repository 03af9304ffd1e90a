use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Configuration errors surfaced when an archetype catalog is loaded.
///
/// A malformed rule set is rejected eagerly at load time so a bad
/// configuration can never be discovered halfway through a classification
/// pass.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("archetype '{archetype}' lists '{card}' as both must-have and must-not-have")]
    ConflictingCardRules { archetype: String, card: String },

    #[error("archetype '{archetype}' reference deck #{index} fails its own legality rules")]
    SelfIneligibleReference { archetype: String, index: usize },

    #[error("duplicate archetype name or alias: '{name}'")]
    DuplicateName { name: String },

    #[error("empty archetype name")]
    EmptyName,

    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
