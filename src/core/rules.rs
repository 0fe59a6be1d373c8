/// Derivation rules — regex pattern/replace pairs that transform an
/// existing name into a related form, collected into prioritized
/// rulesets.

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::schema::impression::ImpressionVector;
use crate::schema::request::{GenerationRequest, NameKind};

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid match pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Extra applicability check over (candidate name, request).
pub type Predicate = Box<dyn Fn(&str, &GenerationRequest) -> bool + Send + Sync>;

/// A conjunction of optional checks gating a rule. An absent condition
/// is always satisfied.
#[derive(Default)]
pub struct RuleCondition {
    /// The request's kind must equal this, when set.
    pub required_kind: Option<NameKind>,
    /// Arbitrary extra predicate, when set.
    pub predicate: Option<Predicate>,
}

impl RuleCondition {
    pub fn for_kind(kind: NameKind) -> Self {
        Self {
            required_kind: Some(kind),
            predicate: None,
        }
    }

    pub fn with_predicate(
        mut self,
        predicate: impl Fn(&str, &GenerationRequest) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    pub fn is_satisfied(&self, name: &str, request: &GenerationRequest) -> bool {
        if let Some(kind) = self.required_kind {
            if request.kind != kind {
                return false;
            }
        }
        if let Some(ref predicate) = self.predicate {
            if !predicate(name, request) {
                return false;
            }
        }
        true
    }
}

impl fmt::Debug for RuleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleCondition")
            .field("required_kind", &self.required_kind)
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// A single pattern/replace derivation rule.
#[derive(Debug)]
pub struct DerivationRule {
    pub name: String,
    matcher: Regex,
    replacement: String,
    pub condition: Option<RuleCondition>,
    /// Added onto the ruleset's default impression when this rule fires.
    pub impression_shift: ImpressionVector,
    /// Higher wins; ties keep append order.
    pub priority: f32,
}

impl DerivationRule {
    /// Compile a rule from a match pattern and a replace template.
    ///
    /// Matching is case-insensitive. The template may reference capture
    /// groups as `$1` or `${1}`.
    pub fn new(name: &str, pattern: &str, replace: &str) -> Result<Self, RuleError> {
        let matcher = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            name: name.to_string(),
            matcher,
            replacement: brace_group_refs(replace),
            condition: None,
            impression_shift: ImpressionVector::zero(),
            priority: 0.0,
        })
    }

    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_condition(mut self, condition: RuleCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_shift(mut self, shift: ImpressionVector) -> Self {
        self.impression_shift = shift;
        self
    }

    /// Does this rule match `name` and pass its condition for `request`?
    pub fn can_apply(&self, name: &str, request: &GenerationRequest) -> bool {
        if !self.matcher.is_match(name) {
            return false;
        }
        match self.condition {
            Some(ref condition) => condition.is_satisfied(name, request),
            None => true,
        }
    }

    /// Substitute every match of the pattern in `name` with the replace
    /// template.
    pub fn apply(&self, name: &str) -> String {
        self.matcher
            .replace_all(name, self.replacement.as_str())
            .into_owned()
    }
}

/// Rewrite bare `$1` group references into `${1}` so that templates
/// like `$1orian` substitute group 1 followed by the literal suffix
/// instead of looking up a group named "1orian".
fn brace_group_refs(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            // `$$` stays an escaped dollar.
            Some('$') => {
                out.push_str("$$");
                chars.next();
            }
            Some(d) if d.is_ascii_digit() => {
                out.push_str("${");
                while let Some(d) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    out.push(*d);
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push('$'),
        }
    }
    out
}

/// An ordered, prioritized collection of derivation rules plus a
/// baseline impression.
#[derive(Debug, Default)]
pub struct Ruleset {
    pub id: String,
    pub name: String,
    pub description: String,
    rules: Vec<DerivationRule>,
    pub default_impression: ImpressionVector,
}

// RON deserialization helpers — data files flatten the condition down
// to a required kind; custom predicates are attached in code only.

#[derive(Debug, Deserialize)]
struct RonRule {
    name: String,
    pattern: String,
    replace: String,
    #[serde(default)]
    priority: f32,
    #[serde(default)]
    required_kind: Option<NameKind>,
    #[serde(default)]
    impression_shift: ImpressionVector,
}

#[derive(Debug, Deserialize)]
struct RonRuleset {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    default_impression: ImpressionVector,
    rules: Vec<RonRule>,
}

impl Ruleset {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Load a ruleset from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Self, RuleError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a ruleset from a RON string, compiling each rule.
    pub fn parse_ron(input: &str) -> Result<Self, RuleError> {
        let raw: RonRuleset = ron::from_str(input)?;
        let mut ruleset = Ruleset::new(&raw.id, &raw.name);
        ruleset.description = raw.description;
        ruleset.default_impression = raw.default_impression;
        for rule in raw.rules {
            let mut compiled = DerivationRule::new(&rule.name, &rule.pattern, &rule.replace)?
                .with_priority(rule.priority)
                .with_shift(rule.impression_shift);
            if let Some(kind) = rule.required_kind {
                compiled = compiled.with_condition(RuleCondition::for_kind(kind));
            }
            ruleset.add_rule(compiled);
        }
        Ok(ruleset)
    }

    /// Append a rule. No dedup, no validation beyond later use.
    pub fn add_rule(&mut self, rule: DerivationRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[DerivationRule] {
        &self.rules
    }

    /// Rules applicable to `name` under `request`, highest priority
    /// first; ties keep append order.
    pub fn applicable(&self, name: &str, request: &GenerationRequest) -> Vec<&DerivationRule> {
        let mut matching: Vec<&DerivationRule> = self
            .rules
            .iter()
            .filter(|rule| rule.can_apply(name, request))
            .collect();
        // Stable sort, so equal priorities preserve append order.
        matching.sort_by(|a, b| b.priority.total_cmp(&a.priority));
        matching
    }

    /// The highest-priority applicable rule, if any.
    pub fn best(&self, name: &str, request: &GenerationRequest) -> Option<&DerivationRule> {
        self.applicable(name, request).into_iter().next()
    }
}
