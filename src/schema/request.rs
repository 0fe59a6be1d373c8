use serde::{Deserialize, Serialize};

use super::impression::ImpressionVector;

/// What kind of name is being asked for.
///
/// Only rule conditions interpret this; the syllable algorithm itself
/// is kind-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameKind {
    Person,
    Place,
    /// Adjective form of a place name (England → English).
    PlaceAdjective,
    /// Resident form of a place name (Rome → Roman).
    PlaceResident,
    Title,
    Artifact,
    Organization,
}

impl Default for NameKind {
    fn default() -> Self {
        Self::Place
    }
}

/// Structural constraints on a generated name.
///
/// The generator consumes only `min_syllables`/`max_syllables`; the
/// remaining fields are accepted for forward compatibility and are
/// currently inert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralConstraints {
    #[serde(default)]
    pub min_syllables: Option<usize>,
    #[serde(default)]
    pub max_syllables: Option<usize>,
    /// Preferred character length (inert).
    #[serde(default)]
    pub preferred_length: Option<usize>,
    /// Whether consonant clusters are allowed (inert).
    #[serde(default = "default_true")]
    pub allow_consonant_clusters: bool,
    /// Whether vowel harmony is required (inert).
    #[serde(default)]
    pub require_vowel_harmony: bool,
    /// Forced name prefix (inert).
    #[serde(default)]
    pub must_start_with: Option<String>,
    /// Forced name suffix (inert).
    #[serde(default)]
    pub must_end_with: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for StructuralConstraints {
    fn default() -> Self {
        Self {
            min_syllables: None,
            max_syllables: None,
            preferred_length: None,
            allow_consonant_clusters: true,
            require_vowel_harmony: false,
            must_start_with: None,
            must_end_with: None,
        }
    }
}

impl StructuralConstraints {
    /// Constraints fixing the syllable count range.
    pub fn syllables(min: usize, max: usize) -> Self {
        Self {
            min_syllables: Some(min),
            max_syllables: Some(max),
            ..Default::default()
        }
    }
}

/// A single generation request. Created fresh per call; carries no
/// state beyond it.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub kind: NameKind,
    /// Ruleset to prefer when several are configured (reserved).
    pub ruleset_id: Option<String>,
    /// Desired impression to match (reserved for future matching).
    pub target_impression: Option<ImpressionVector>,
    pub constraints: Option<StructuralConstraints>,
    /// RNG seed; absent means a non-reproducible entropy seed.
    pub seed: Option<u64>,
    /// Existing name to derive from instead of generating fresh.
    pub base_name: Option<String>,
}

impl GenerationRequest {
    pub fn for_kind(kind: NameKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_constraints(mut self, constraints: StructuralConstraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    pub fn with_base_name(mut self, base_name: &str) -> Self {
        self.base_name = Some(base_name.to_string());
        self
    }

    pub fn with_target_impression(mut self, target: ImpressionVector) -> Self {
        self.target_impression = Some(target);
        self
    }
}

/// How a result came to be.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationMetadata {
    /// Names of derivation rules applied, in order. Empty on the
    /// syllable path.
    pub applied_rules: Vec<String>,
    /// Surface patterns of the syllables used, in order. Empty on the
    /// derivation path.
    pub used_syllables: Vec<String>,
    /// Id of the ruleset consulted; empty on the syllable path.
    pub ruleset_id: String,
}

/// The outcome of a single generation call.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub name: String,
    pub impression: ImpressionVector,
    pub metadata: GenerationMetadata,
}
