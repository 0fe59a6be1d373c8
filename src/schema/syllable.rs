use serde::{Deserialize, Serialize};

use super::impression::ImpressionVector;

/// The internal phonetic shape of a syllable: consonant opening,
/// vowel core, consonant closing. Any part may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyllableStructure {
    /// Opening consonant(s): "k", "th", "str".
    #[serde(default)]
    pub onset: String,
    /// Vowel core: "a", "o", "ei".
    #[serde(default)]
    pub nucleus: String,
    /// Closing consonant(s): "r", "th", "nt".
    #[serde(default)]
    pub coda: String,
}

impl SyllableStructure {
    pub fn new(onset: &str, nucleus: &str, coda: &str) -> Self {
        Self {
            onset: onset.to_string(),
            nucleus: nucleus.to_string(),
            coda: coda.to_string(),
        }
    }

    /// Shape label built from the non-empty parts: "CVC", "CV", "VC", "V".
    pub fn structure_type(&self) -> String {
        let mut ty = String::new();
        if !self.onset.is_empty() {
            ty.push('C');
        }
        if !self.nucleus.is_empty() {
            ty.push('V');
        }
        if !self.coda.is_empty() {
            ty.push('C');
        }
        ty
    }

    /// The parts joined back into a string fragment.
    pub fn pattern(&self) -> String {
        format!("{}{}{}", self.onset, self.nucleus, self.coda)
    }

    /// True when the syllable ends on its vowel core (no coda).
    pub fn ends_with_vowel(&self) -> bool {
        self.coda.is_empty() && !self.nucleus.is_empty()
    }

    /// True when the syllable opens on its vowel core (no onset).
    pub fn starts_with_vowel(&self) -> bool {
        self.onset.is_empty() && !self.nucleus.is_empty()
    }
}

/// Placement and adjacency constraints for a syllable.
///
/// A non-empty `can_follow` list is authoritative: only listed syllables
/// (that exist in the store) may come next. Otherwise anything outside
/// `cannot_follow` may come next.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneticConstraints {
    /// Explicit allow-list of successor syllable ids.
    #[serde(default)]
    pub can_follow: Vec<String>,
    /// Deny-list of successor syllable ids, consulted only when
    /// `can_follow` is empty.
    #[serde(default)]
    pub cannot_follow: Vec<String>,
    /// May this syllable open a name?
    #[serde(default = "default_true")]
    pub can_be_initial: bool,
    /// May this syllable close a name?
    #[serde(default = "default_true")]
    pub can_be_final: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PhoneticConstraints {
    fn default() -> Self {
        Self {
            can_follow: Vec::new(),
            cannot_follow: Vec::new(),
            can_be_initial: true,
            can_be_final: true,
        }
    }
}

/// An atomic phonetic unit the generator chains into names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Syllable {
    /// Unique key within a store. Must be non-empty.
    pub id: String,
    /// Surface fragment emitted into names: "kar", "tho", "lin".
    pub pattern: String,
    #[serde(default)]
    pub structure: SyllableStructure,
    #[serde(default)]
    pub impression: ImpressionVector,
    #[serde(default)]
    pub constraints: PhoneticConstraints,
    /// Selection weight for weighted random picks.
    #[serde(default = "default_weight")]
    pub weight: f32,
}

fn default_weight() -> f32 {
    1.0
}
