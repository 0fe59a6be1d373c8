pub mod derivation;
pub mod generator;
pub mod random;
pub mod rules;
pub mod store;
