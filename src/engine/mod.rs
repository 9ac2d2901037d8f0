//! Exchange and QSO scoring built on the [`crate::core`] algorithms.

/// Cross-log candidate ranking and greedy pairing.
pub mod crossmatch;
/// Per-exchange call, serial and multiplier scoring.
pub mod exchange;
/// Strict reconciliation predicate.
pub mod full_match;
/// QSO-level likelihood and classifier features.
pub mod qso_match;
/// Metric vector and classifier trait.
pub mod traits;
