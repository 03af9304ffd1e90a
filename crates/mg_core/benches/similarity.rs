// benches/similarity.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mg_core::{
    similarity, ArchetypeCatalog, ArchetypeRuleSet, Classifier, Deck, LabeledPool,
};

fn burn_deck() -> Deck {
    Deck::from_pairs(
        &[
            (4, "Lightning Bolt"),
            (4, "Lava Spike"),
            (4, "Rift Bolt"),
            (4, "Goblin Guide"),
            (4, "Monastery Swiftspear"),
            (4, "Searing Blaze"),
            (4, "Eidolon of the Great Revel"),
            (4, "Skewer the Critics"),
            (4, "Fireblast"),
            (4, "Lightning Strike"),
            (20, "Mountain"),
        ],
        &[
            (4, "Smash to Smithereens"),
            (4, "Red Elemental Blast"),
            (4, "Exquisite Firecraft"),
            (3, "Roiling Vortex"),
        ],
    )
}

fn delver_deck() -> Deck {
    Deck::from_pairs(
        &[
            (4, "Delver of Secrets"),
            (4, "Ponder"),
            (4, "Preordain"),
            (4, "Brainstorm"),
            (4, "Counterspell"),
            (4, "Daze"),
            (4, "Spellstutter Sprite"),
            (4, "Ninja of the Deep Hours"),
            (4, "Faerie Seer"),
            (10, "Snow-Covered Island"),
            (14, "Island"),
        ],
        &[
            (4, "Blue Elemental Blast"),
            (4, "Annul"),
            (4, "Dispel"),
            (3, "Relic of Progenitus"),
        ],
    )
}

fn build_catalog() -> ArchetypeCatalog {
    let mut burn = ArchetypeRuleSet::named("Burn");
    burn.must_have_cards = vec!["Lightning Bolt".to_string()];
    burn.reference_decks = vec![burn_deck()];

    let mut delver = ArchetypeRuleSet::named("Delver");
    delver.must_have_cards = vec!["Delver of Secrets".to_string()];
    delver.reference_decks = vec![delver_deck()];

    ArchetypeCatalog::new(vec![burn, delver]).expect("valid catalog")
}

fn bench_similarity(c: &mut Criterion) {
    let a = burn_deck();
    let b = delver_deck();

    c.bench_function("similarity_60_15", |bench| {
        bench.iter(|| black_box(similarity(black_box(&a), black_box(&b))))
    });
}

fn bench_classify(c: &mut Criterion) {
    let catalog = build_catalog();
    let classifier = Classifier::new(&catalog);
    let pool = LabeledPool::new();
    let deck = burn_deck();

    c.bench_function("classify_two_archetypes", |bench| {
        bench.iter(|| {
            let result = classifier.classify(black_box(&deck), &pool);
            black_box(result.confidence)
        })
    });
}

criterion_group!(benches, bench_similarity, bench_classify);
criterion_main!(benches);
