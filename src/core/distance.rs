//! Jaro-Winkler similarity with partial credit for confusable characters.

use super::adjacency::AdjacencyMatrix;

/// Longest common prefix that earns the Winkler boost.
const MAX_PREFIX: usize = 4;
/// Running score added for a position with only an adjacent match.
const SOFT_MATCH_SCORE: f64 = 3.0;
/// Divisor applied to the accumulated soft score.
const SOFT_MATCH_SCALE: f64 = 10.0;

/// Tuning for [`distance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceOptions<'a> {
    /// Winkler prefix boost factor; keep `weight * 4 <= 1` for a result in `[0, 1]`.
    pub weight: f64,
    /// Minimum Jaro score eligible for the prefix boost.
    pub threshold: f64,
    /// Relation consulted for soft matches, if any.
    pub adjacency: Option<&'a AdjacencyMatrix>,
}

impl Default for DistanceOptions<'_> {
    fn default() -> Self {
        Self {
            weight: 0.1,
            threshold: 0.7,
            adjacency: None,
        }
    }
}

impl<'a> DistanceOptions<'a> {
    /// Same weights, consulting `adjacency` for soft matches.
    pub fn with_adjacency(self, adjacency: &'a AdjacencyMatrix) -> Self {
        Self {
            adjacency: Some(adjacency),
            ..self
        }
    }
}

/// Jaro-Winkler similarity of two byte strings, in `[0, 1]`.
///
/// The shorter string is always scanned against the longer one, with the
/// byte-wise smaller string first when lengths tie, so argument order does
/// not matter. Each position of the shorter string looks for an
/// exact match inside a window of `len(longer) / 2 - 1`; an exact match seen
/// out of order counts as a transposition. A position with no exact match but
/// an adjacent character in its window contributes `0.3` to the similarity
/// numerator when `opts.adjacency` is set.
///
/// ```
/// use qsomatch::core::distance::{distance, DistanceOptions};
///
/// let d = distance(b"MARTHA", b"MARHTA", &DistanceOptions::default());
/// assert!((d - 0.961).abs() < 1e-3);
/// ```
pub fn distance(s1: &[u8], s2: &[u8], opts: &DistanceOptions<'_>) -> f64 {
    let swap = s1.len() > s2.len() || (s1.len() == s2.len() && s1 > s2);
    let (s1, s2) = if swap { (s2, s1) } else { (s1, s2) };
    if s1.is_empty() {
        return 0.0;
    }

    let window = (s2.len() / 2).saturating_sub(1);
    let max_index = s2.len() - 1;

    let mut matches = 0usize;
    let mut transpositions = 0usize;
    let mut soft_score = 0.0f64;
    let mut previous: Option<usize> = None;

    for (i, &c) in s1.iter().enumerate() {
        let left = i.saturating_sub(window);
        let right = (i + window).min(max_index);
        let mut matched = false;
        let mut in_order = false;
        let mut soft = false;

        for (j, &d) in s2.iter().enumerate().take(right + 1).skip(left) {
            if c == d {
                matched = true;
                if !in_order && previous.is_none_or(|p| j > p) {
                    previous = Some(j);
                    in_order = true;
                }
            } else if opts.adjacency.is_some_and(|adj| adj.contains(c, d)) {
                soft = true;
            }
        }

        if matched {
            matches += 1;
            if !in_order {
                transpositions += 1;
            }
        } else if soft {
            soft_score += SOFT_MATCH_SCORE;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    let m = matches as f64;
    let mut similarity = m;
    if opts.adjacency.is_some() {
        similarity += soft_score / SOFT_MATCH_SCALE;
    }
    let jaro = (similarity / s1.len() as f64
        + similarity / s2.len() as f64
        + (m - transpositions as f64) / m)
        / 3.0;

    if jaro < opts.threshold {
        return jaro;
    }
    let prefix = s1
        .iter()
        .zip(s2)
        .take(MAX_PREFIX)
        .take_while(|(a, b)| a == b)
        .count();
    jaro + prefix as f64 * opts.weight * (1.0 - jaro)
}
