//! Leaf string algorithms: confusable-character relation, Jaro-Winkler
//! distance, and Morse rendering.

/// Sparse symmetric relation of confusable characters.
pub mod adjacency;
/// Jaro-Winkler distance with adjacency soft credit.
pub mod distance;
/// Morse-code transliteration.
pub mod morse;
