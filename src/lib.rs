//! Namelore — procedural fantasy name generation for games.
//!
//! Builds proper names (places, persons, derived adjectives and resident
//! forms) at runtime by chaining phonetic syllable units under adjacency
//! and euphony constraints, or by transforming existing names through
//! prioritized regex derivation rules, all deterministically reproducible
//! from a seed.

pub mod core;
pub mod schema;
