/// The name generator: request dispatch plus the syllable-chaining
/// algorithm.
///
/// A request carrying a non-empty base name is routed to the derivation
/// engine (when one is configured); everything else is generated fresh
/// by chaining syllables from the store under positional and euphony
/// constraints.

use thiserror::Error;

use crate::core::derivation::{DerivationEngine, DeriveError};
use crate::core::random::{RandomError, SeededRandom};
use crate::core::store::SyllableStore;
use crate::schema::impression::ImpressionVector;
use crate::schema::request::{
    GenerationMetadata, GenerationRequest, GenerationResult, StructuralConstraints,
};
use crate::schema::syllable::Syllable;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// The candidate set ran dry at some position; the syllable data is
    /// malformed or over-constrained. Fatal to the call, never retried.
    #[error("no viable syllable at position {position}")]
    NoViableSyllable { position: usize },
    #[error(transparent)]
    Random(#[from] RandomError),
    #[error(transparent)]
    Derive(#[from] DeriveError),
}

/// Top-level generation entry point. Stateless across calls; every call
/// owns its own RNG.
#[derive(Debug)]
pub struct NameGenerator {
    store: SyllableStore,
    derivation: Option<DerivationEngine>,
}

impl NameGenerator {
    pub fn new(store: SyllableStore) -> Self {
        Self {
            store,
            derivation: None,
        }
    }

    /// Attach a derivation engine for base-name requests.
    pub fn with_derivation(mut self, engine: DerivationEngine) -> Self {
        self.derivation = Some(engine);
        self
    }

    pub fn store(&self) -> &SyllableStore {
        &self.store
    }

    /// Generate a name for `request`.
    ///
    /// A non-empty `base_name` together with a configured derivation
    /// engine takes the derivation path; otherwise the syllable path
    /// runs with `request.seed` (or an entropy seed when absent).
    pub fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerateError> {
        if let (Some(base_name), Some(engine)) =
            (request.base_name.as_deref(), self.derivation.as_ref())
        {
            if !base_name.is_empty() {
                return Ok(engine.derive(base_name, request)?);
            }
        }
        self.generate_from_syllables(request)
    }

    fn generate_from_syllables(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerateError> {
        let mut rng = match request.seed {
            Some(seed) => SeededRandom::new(seed),
            None => SeededRandom::from_entropy(),
        };

        let default_constraints = StructuralConstraints::default();
        let constraints = request.constraints.as_ref().unwrap_or(&default_constraints);
        let count = Self::syllable_count(constraints, &mut rng);

        let chosen = self.select_syllables(count, &mut rng)?;
        let name = combine(&chosen);
        let impression = ImpressionVector::mean(chosen.iter().map(|s| &s.impression));

        Ok(GenerationResult {
            name,
            impression,
            metadata: GenerationMetadata {
                applied_rules: Vec::new(),
                used_syllables: chosen.iter().map(|s| s.pattern.clone()).collect(),
                ruleset_id: String::new(),
            },
        })
    }

    /// Uniform draw from `[min, max]` inclusive; defaults 2..=3.
    fn syllable_count(constraints: &StructuralConstraints, rng: &mut SeededRandom) -> usize {
        let min = constraints.min_syllables.unwrap_or(2);
        let max = constraints.max_syllables.unwrap_or(3);
        rng.range(min, max + 1)
    }

    fn select_syllables(
        &self,
        count: usize,
        rng: &mut SeededRandom,
    ) -> Result<Vec<&Syllable>, GenerateError> {
        let mut chosen: Vec<&Syllable> = Vec::with_capacity(count);

        for position in 0..count {
            let mut candidates: Vec<&Syllable> = if position == 0 {
                self.store.initial_candidates()
            } else if position == count - 1 {
                // Final position: prefer followers that may close a
                // name, but relax to all followers when none qualify.
                let followers = self.store.followers(chosen[position - 1]);
                let finals: Vec<&Syllable> = followers
                    .iter()
                    .copied()
                    .filter(|s| s.constraints.can_be_final)
                    .collect();
                if finals.is_empty() {
                    followers
                } else {
                    finals
                }
            } else {
                self.store.followers(chosen[position - 1])
            };

            // Euphony refinement past the first position.
            if position > 0 {
                let previous = chosen[position - 1];

                // No immediate repetition.
                candidates.retain(|s| s.id != previous.id);

                // After a vowel-final syllable, prefer consonant-initial
                // followers — but only when that leaves a candidate.
                if previous.structure.ends_with_vowel() {
                    let consonant_start: Vec<&Syllable> = candidates
                        .iter()
                        .copied()
                        .filter(|s| !s.structure.starts_with_vowel())
                        .collect();
                    if !consonant_start.is_empty() {
                        candidates = consonant_start;
                    }
                }
            }

            if candidates.is_empty() {
                return Err(GenerateError::NoViableSyllable { position });
            }

            let selected = rng.choose_weighted(&candidates, |s| s.weight)?;
            chosen.push(*selected);
        }

        Ok(chosen)
    }
}

/// Concatenate the surface patterns and upper-case the first character.
fn combine(syllables: &[&Syllable]) -> String {
    let raw: String = syllables.iter().map(|s| s.pattern.as_str()).collect();
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::{DerivationRule, Ruleset};
    use crate::schema::request::NameKind;
    use crate::schema::syllable::{PhoneticConstraints, SyllableStructure};

    fn syllable(id: &str, onset: &str, nucleus: &str, coda: &str) -> Syllable {
        Syllable {
            id: id.to_string(),
            pattern: format!("{onset}{nucleus}{coda}"),
            structure: SyllableStructure::new(onset, nucleus, coda),
            impression: ImpressionVector {
                hardness: 0.5,
                ..Default::default()
            },
            constraints: PhoneticConstraints::default(),
            weight: 1.0,
        }
    }

    fn small_store() -> SyllableStore {
        let mut store = SyllableStore::new();
        store.add(syllable("kar", "k", "a", "r")).unwrap();
        store.add(syllable("tho", "th", "o", "")).unwrap();
        store.add(syllable("lin", "l", "i", "n")).unwrap();
        store.add(syllable("dor", "d", "o", "r")).unwrap();
        store.add(syllable("mir", "m", "i", "r")).unwrap();
        store
    }

    fn request(seed: u64) -> GenerationRequest {
        GenerationRequest::for_kind(NameKind::Place).with_seed(seed)
    }

    #[test]
    fn generates_a_capitalized_name() {
        let generator = NameGenerator::new(small_store());
        let result = generator.generate(&request(42)).unwrap();
        assert!(!result.name.is_empty());
        assert!(result.name.chars().next().unwrap().is_uppercase());
        assert!(result.metadata.applied_rules.is_empty());
        assert!(result.metadata.ruleset_id.is_empty());
    }

    #[test]
    fn same_seed_same_name() {
        let generator = NameGenerator::new(small_store());
        let a = generator.generate(&request(7)).unwrap();
        let b = generator.generate(&request(7)).unwrap();
        assert_eq!(a.name, b.name);
        assert_eq!(a.impression, b.impression);
        assert_eq!(a.metadata, b.metadata);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let generator = NameGenerator::new(small_store());
        let reference = generator.generate(&request(0)).unwrap();
        let mut found_different = false;
        for seed in 1..40 {
            if generator.generate(&request(seed)).unwrap().name != reference.name {
                found_different = true;
                break;
            }
        }
        assert!(found_different, "expected seed variation");
    }

    #[test]
    fn fixed_count_constraint_is_respected() {
        let generator = NameGenerator::new(small_store());
        for k in 1..=4 {
            let req = request(11).with_constraints(StructuralConstraints::syllables(k, k));
            let result = generator.generate(&req).unwrap();
            assert_eq!(result.metadata.used_syllables.len(), k);
        }
    }

    #[test]
    fn default_count_is_two_or_three() {
        let generator = NameGenerator::new(small_store());
        for seed in 0..50 {
            let result = generator.generate(&request(seed)).unwrap();
            let used = result.metadata.used_syllables.len();
            assert!((2..=3).contains(&used), "got {} syllables", used);
        }
    }

    #[test]
    fn no_immediate_repetition() {
        let mut store = small_store();
        // Crank one weight up to make repetition tempting.
        let mut heavy = syllable("kar", "k", "a", "r");
        heavy.weight = 50.0;
        store.add(heavy).unwrap();
        let generator = NameGenerator::new(store);

        for seed in 0..80 {
            let req = request(seed).with_constraints(StructuralConstraints::syllables(4, 4));
            let result = generator.generate(&req).unwrap();
            let used = &result.metadata.used_syllables;
            for pair in used.windows(2) {
                assert_ne!(pair[0], pair[1], "repeated syllable in {:?}", used);
            }
        }
    }

    #[test]
    fn vowel_final_prefers_consonant_start() {
        let mut store = SyllableStore::new();
        // "tho" ends in a vowel; "el" starts with one, "lin" does not.
        store.add(syllable("tho", "th", "o", "")).unwrap();
        store.add(syllable("el", "", "e", "l")).unwrap();
        store.add(syllable("lin", "l", "i", "n")).unwrap();
        let generator = NameGenerator::new(store);

        for seed in 0..60 {
            let req = request(seed).with_constraints(StructuralConstraints::syllables(2, 2));
            let result = generator.generate(&req).unwrap();
            if result.metadata.used_syllables[0] == "tho" {
                assert_ne!(
                    result.metadata.used_syllables[1], "el",
                    "vowel clash after vowel-final syllable"
                );
            }
        }
    }

    #[test]
    fn vowel_filter_never_empties_candidates() {
        let mut store = SyllableStore::new();
        let mut tho = syllable("tho", "th", "o", "");
        tho.constraints.can_follow = vec!["el".to_string()];
        store.add(tho).unwrap();
        // The only follower starts with a vowel; the filter must relax.
        let mut el = syllable("el", "", "e", "l");
        el.constraints.can_be_initial = false;
        store.add(el).unwrap();
        let generator = NameGenerator::new(store);

        let req = request(3).with_constraints(StructuralConstraints::syllables(2, 2));
        let result = generator.generate(&req).unwrap();
        assert_eq!(result.metadata.used_syllables, vec!["tho", "el"]);
    }

    #[test]
    fn final_position_prefers_final_capable_followers() {
        let mut store = SyllableStore::new();
        store.add(syllable("kar", "k", "a", "r")).unwrap();
        let mut interior = syllable("ra", "r", "a", "");
        interior.constraints.can_be_initial = false;
        interior.constraints.can_be_final = false;
        store.add(interior).unwrap();
        let mut closer = syllable("dor", "d", "o", "r");
        closer.constraints.can_be_initial = false;
        store.add(closer).unwrap();
        let generator = NameGenerator::new(store);

        for seed in 0..40 {
            let req = request(seed).with_constraints(StructuralConstraints::syllables(2, 2));
            let result = generator.generate(&req).unwrap();
            // Last syllable is always the final-capable one.
            assert_eq!(result.metadata.used_syllables.last().unwrap(), "dor");
        }
    }

    #[test]
    fn final_capability_relaxes_when_no_follower_qualifies() {
        let mut store = SyllableStore::new();
        let mut opener = syllable("kar", "k", "a", "r");
        opener.constraints.can_follow = vec!["ra".to_string()];
        store.add(opener).unwrap();
        let mut ra = syllable("ra", "r", "a", "");
        ra.constraints.can_be_initial = false;
        ra.constraints.can_be_final = false;
        store.add(ra).unwrap();
        let generator = NameGenerator::new(store);

        let req = request(5).with_constraints(StructuralConstraints::syllables(2, 2));
        let result = generator.generate(&req).unwrap();
        assert_eq!(result.metadata.used_syllables, vec!["kar", "ra"]);
        assert_eq!(result.name, "Karra");
    }

    #[test]
    fn empty_store_fails_at_position_zero() {
        let generator = NameGenerator::new(SyllableStore::new());
        let err = generator.generate(&request(1)).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::NoViableSyllable { position: 0 }
        ));
    }

    #[test]
    fn no_initial_capable_syllable_fails_at_position_zero() {
        let mut store = SyllableStore::new();
        let mut s = syllable("dor", "d", "o", "r");
        s.constraints.can_be_initial = false;
        store.add(s).unwrap();
        let generator = NameGenerator::new(store);
        let err = generator.generate(&request(1)).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::NoViableSyllable { position: 0 }
        ));
    }

    #[test]
    fn impression_is_mean_of_used_syllables() {
        let mut store = SyllableStore::new();
        let mut a = syllable("kar", "k", "a", "r");
        a.impression = ImpressionVector {
            hardness: 1.0,
            ..Default::default()
        };
        let mut b = syllable("lin", "l", "i", "n");
        b.impression = ImpressionVector {
            hardness: 0.0,
            mysticism: 0.6,
            ..Default::default()
        };
        store.add(a).unwrap();
        store.add(b).unwrap();
        let generator = NameGenerator::new(store);

        let req = request(2).with_constraints(StructuralConstraints::syllables(2, 2));
        let result = generator.generate(&req).unwrap();
        assert!((result.impression.hardness - 0.5).abs() < 1e-6);
        assert!((result.impression.mysticism - 0.3).abs() < 1e-6);
    }

    #[test]
    fn base_name_routes_to_derivation() {
        let mut ruleset = Ruleset::new("fantasy", "Fantasy");
        ruleset.add_rule(DerivationRule::new("or-adj", r"^(.+)or$", "$1orian").unwrap());
        let generator =
            NameGenerator::new(small_store()).with_derivation(DerivationEngine::new(ruleset));

        let req = GenerationRequest::for_kind(NameKind::PlaceAdjective)
            .with_base_name("Valdor")
            .with_seed(1);
        let result = generator.generate(&req).unwrap();
        assert_eq!(result.name, "Valdorian");
        assert_eq!(result.metadata.ruleset_id, "fantasy");
    }

    #[test]
    fn empty_base_name_takes_syllable_path() {
        let ruleset = Ruleset::new("fantasy", "Fantasy");
        let generator =
            NameGenerator::new(small_store()).with_derivation(DerivationEngine::new(ruleset));

        let mut req = request(4);
        req.base_name = Some(String::new());
        let result = generator.generate(&req).unwrap();
        assert!(!result.metadata.used_syllables.is_empty());
        assert!(result.metadata.ruleset_id.is_empty());
    }

    #[test]
    fn base_name_without_engine_takes_syllable_path() {
        let generator = NameGenerator::new(small_store());
        let req = request(4).with_base_name("Valdor");
        let result = generator.generate(&req).unwrap();
        assert_ne!(result.name, "Valdorian");
        assert!(!result.metadata.used_syllables.is_empty());
    }

    #[test]
    fn missing_seed_still_generates() {
        let generator = NameGenerator::new(small_store());
        let req = GenerationRequest::for_kind(NameKind::Place);
        let result = generator.generate(&req).unwrap();
        assert!(!result.name.is_empty());
    }
}
