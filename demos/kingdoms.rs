/// Kingdoms demo — names a handful of realms, then derives the
/// adjective and resident forms for each.
///
/// Run with: cargo run --example kingdoms

use namelore::core::derivation::DerivationEngine;
use namelore::core::generator::NameGenerator;
use namelore::core::rules::Ruleset;
use namelore::core::store::SyllableStore;
use namelore::schema::request::{GenerationRequest, NameKind, StructuralConstraints};

fn main() {
    let store = SyllableStore::load_from_ron(std::path::Path::new(
        "lexicon_data/fantasy/syllables.ron",
    ))
    .expect("Failed to load fantasy syllables");

    let ruleset = Ruleset::load_from_ron(std::path::Path::new(
        "lexicon_data/rulesets/fantasy.ron",
    ))
    .expect("Failed to load fantasy ruleset");

    let generator = NameGenerator::new(store).with_derivation(DerivationEngine::new(ruleset));

    println!("=== Five kingdoms ===\n");

    for seed in 0..5u64 {
        let place_request = GenerationRequest::for_kind(NameKind::Place)
            .with_seed(2026 + seed)
            .with_constraints(StructuralConstraints::syllables(2, 3));
        let place = generator
            .generate(&place_request)
            .expect("place generation failed");

        let adjective = generator
            .generate(
                &GenerationRequest::for_kind(NameKind::PlaceAdjective)
                    .with_base_name(&place.name),
            )
            .expect("adjective derivation failed");

        let resident = generator
            .generate(
                &GenerationRequest::for_kind(NameKind::PlaceResident)
                    .with_base_name(&place.name),
            )
            .expect("resident derivation failed");

        println!("The Kingdom of {}", place.name);
        println!("  built from:  {}", place.metadata.used_syllables.join(" + "));
        println!("  adjective:   {}", adjective.name);
        println!("  resident:    {}", resident.name);
        println!(
            "  feel:        hardness {:.2}, antiquity {:.2}, mysticism {:.2}",
            place.impression.hardness, place.impression.antiquity, place.impression.mysticism
        );
        println!();
    }
}
