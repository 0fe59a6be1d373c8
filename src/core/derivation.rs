/// Derivation engine — applies the single best-matching ruleset rule to
/// transform an existing name.

use thiserror::Error;

use crate::core::rules::Ruleset;
use crate::schema::request::{
    GenerationMetadata, GenerationRequest, GenerationResult, NameKind,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeriveError {
    #[error("base name must not be empty")]
    EmptyBaseName,
}

/// Owns a [`Ruleset`] and derives related names from existing ones.
#[derive(Debug)]
pub struct DerivationEngine {
    ruleset: Ruleset,
}

impl DerivationEngine {
    pub fn new(ruleset: Ruleset) -> Self {
        Self { ruleset }
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Derive a name of `kind` from `base_name` without assembling a
    /// full request by hand.
    pub fn derive_as(
        &self,
        base_name: &str,
        kind: NameKind,
        seed: Option<u64>,
    ) -> Result<GenerationResult, DeriveError> {
        let mut request = GenerationRequest::for_kind(kind).with_base_name(base_name);
        request.seed = seed;
        self.derive(base_name, &request)
    }

    /// Transform `base_name` with the best applicable rule.
    ///
    /// With no applicable rule the name passes through unchanged and
    /// the result carries the ruleset's default impression. When a rule
    /// fires, its shift is added onto the default impression with each
    /// dimension saturating into `0.0..=1.0`.
    pub fn derive(
        &self,
        base_name: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, DeriveError> {
        if base_name.is_empty() {
            return Err(DeriveError::EmptyBaseName);
        }

        let Some(rule) = self.ruleset.best(base_name, request) else {
            return Ok(GenerationResult {
                name: base_name.to_string(),
                impression: self.ruleset.default_impression,
                metadata: GenerationMetadata {
                    applied_rules: Vec::new(),
                    used_syllables: Vec::new(),
                    ruleset_id: self.ruleset.id.clone(),
                },
            });
        };

        Ok(GenerationResult {
            name: rule.apply(base_name),
            impression: self.ruleset.default_impression.shifted(rule.impression_shift),
            metadata: GenerationMetadata {
                applied_rules: vec![rule.name.clone()],
                used_syllables: Vec::new(),
                ruleset_id: self.ruleset.id.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::{DerivationRule, RuleCondition};
    use crate::schema::impression::ImpressionVector;

    fn adjective_ruleset() -> Ruleset {
        let mut ruleset = Ruleset::new("fantasy", "Fantasy Derivation");
        ruleset.default_impression = ImpressionVector {
            formality: 0.5,
            antiquity: 0.6,
            ..Default::default()
        };
        ruleset.add_rule(
            DerivationRule::new("Place to Adjective (-or)", r"^(.+)or$", "$1orian")
                .unwrap()
                .with_priority(2.0)
                .with_shift(ImpressionVector {
                    formality: 0.3,
                    antiquity: 0.1,
                    ..Default::default()
                }),
        );
        ruleset
    }

    #[test]
    fn derive_applies_best_rule() {
        let engine = DerivationEngine::new(adjective_ruleset());
        let request = GenerationRequest::for_kind(NameKind::PlaceAdjective);
        let result = engine.derive("Valdor", &request).unwrap();
        assert_eq!(result.name, "Valdorian");
        assert_eq!(result.metadata.applied_rules, vec!["Place to Adjective (-or)"]);
        assert_eq!(result.metadata.ruleset_id, "fantasy");
        assert!(result.metadata.used_syllables.is_empty());
    }

    #[test]
    fn derive_shifts_and_clamps_impression() {
        let engine = DerivationEngine::new(adjective_ruleset());
        let request = GenerationRequest::for_kind(NameKind::PlaceAdjective);
        let result = engine.derive("Valdor", &request).unwrap();
        // 0.5 + 0.3 within range, 0.6 + 0.1 within range.
        assert!((result.impression.formality - 0.8).abs() < 1e-6);
        assert!((result.impression.antiquity - 0.7).abs() < 1e-6);
    }

    #[test]
    fn shift_saturates_at_one() {
        let mut ruleset = Ruleset::new("sat", "Saturation");
        ruleset.default_impression = ImpressionVector {
            formality: 0.9,
            ..Default::default()
        };
        ruleset.add_rule(
            DerivationRule::new("boost", r"^(.+)$", "$1")
                .unwrap()
                .with_shift(ImpressionVector {
                    formality: 0.5,
                    ..Default::default()
                }),
        );
        let engine = DerivationEngine::new(ruleset);
        let request = GenerationRequest::for_kind(NameKind::Place);
        let result = engine.derive("Anywhere", &request).unwrap();
        assert_eq!(result.impression.formality, 1.0);
    }

    #[test]
    fn no_applicable_rule_passes_name_through() {
        let engine = DerivationEngine::new(adjective_ruleset());
        let request = GenerationRequest::for_kind(NameKind::PlaceAdjective);
        let result = engine.derive("Karthal", &request).unwrap();
        assert_eq!(result.name, "Karthal");
        assert!(result.metadata.applied_rules.is_empty());
        assert_eq!(result.metadata.ruleset_id, "fantasy");
        // Default impression, unshifted.
        assert!((result.impression.formality - 0.5).abs() < 1e-6);
    }

    #[test]
    fn empty_base_name_is_an_error() {
        let engine = DerivationEngine::new(adjective_ruleset());
        let request = GenerationRequest::for_kind(NameKind::PlaceAdjective);
        let err = engine.derive("", &request).unwrap_err();
        assert_eq!(err, DeriveError::EmptyBaseName);
    }

    #[test]
    fn derive_as_builds_the_request() {
        let engine = DerivationEngine::new(adjective_ruleset());
        let result = engine
            .derive_as("Valdor", NameKind::PlaceAdjective, Some(9))
            .unwrap();
        assert_eq!(result.name, "Valdorian");
    }

    #[test]
    fn kind_gated_rule_ignored_for_other_kinds() {
        let mut ruleset = Ruleset::new("gated", "Gated");
        ruleset.add_rule(
            DerivationRule::new("resident", r"^(.+)al$", "$1alan")
                .unwrap()
                .with_condition(RuleCondition::for_kind(NameKind::PlaceResident)),
        );
        let engine = DerivationEngine::new(ruleset);

        let resident = engine
            .derive("Karthal", &GenerationRequest::for_kind(NameKind::PlaceResident))
            .unwrap();
        assert_eq!(resident.name, "Karthalan");

        let adjective = engine
            .derive("Karthal", &GenerationRequest::for_kind(NameKind::PlaceAdjective))
            .unwrap();
        assert_eq!(adjective.name, "Karthal");
        assert!(adjective.metadata.applied_rules.is_empty());
    }
}
