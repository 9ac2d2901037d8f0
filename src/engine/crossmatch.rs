use hashbrown::{HashMap, HashSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    config::MatchConfig,
    qso::QsoRecord,
    types::QsoId,
};

use super::{
    full_match::is_full_match,
    qso_match::{QsoMatcher, QsoScore},
    traits::{MatchClassifier, MetricVector},
};

/// How well one side of an accepted pair logged the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    /// Passed the strict reconciliation check.
    Full,
    /// Accepted as the same contact with copying errors.
    Partial,
}

/// A pair of QSOs from different logs that may be the same contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// QSO scored as the left side.
    pub a: QsoId,
    /// QSO scored as the right side.
    pub b: QsoId,
    /// Combined likelihood.
    pub score: QsoScore,
    /// Classifier features.
    pub metrics: MetricVector,
}

/// An accepted candidate with per-side labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedPair {
    /// Left QSO.
    pub a: QsoId,
    /// Right QSO.
    pub b: QsoId,
    /// Whether `a` fully matched `b`.
    pub a_type: MatchType,
    /// Whether `b` fully matched `a`.
    pub b_type: MatchType,
    /// Combined likelihood.
    pub score: QsoScore,
}

/// Result of walking a ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    /// Pairs accepted by the classifier, best first.
    pub matched: Vec<MatchedPair>,
    /// Rejected candidates whose QSOs are both still unmatched.
    pub review: Vec<Candidate>,
}

/// Ranks and pairs QSOs across logs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossMatcher<'a> {
    matcher: QsoMatcher<'a>,
    candidate_floor: f64,
    full_match_minutes: i64,
}

impl Default for CrossMatcher<'_> {
    fn default() -> Self {
        Self::from_config(&MatchConfig::default())
    }
}

impl<'a> CrossMatcher<'a> {
    /// Cross matcher with scoring, candidate floor and labeling tolerance
    /// taken from `cfg`.
    pub fn from_config(cfg: &MatchConfig) -> Self {
        Self {
            matcher: QsoMatcher::from_config(cfg),
            candidate_floor: cfg.candidate_floor,
            full_match_minutes: cfg.full_match_minutes,
        }
    }

    /// Replaces the QSO matcher, e.g. to score with a custom adjacency table.
    pub fn with_matcher(self, matcher: QsoMatcher<'a>) -> Self {
        Self { matcher, ..self }
    }

    /// QSO matcher used for ranking.
    pub fn matcher(&self) -> &QsoMatcher<'a> {
        &self.matcher
    }

    /// Scores every pair of QSOs from different logs and returns those above
    /// the candidate floor, best first.
    ///
    /// Pairs are scored in parallel; ties are ordered by ids so the ranking
    /// is deterministic.
    pub fn rank(&self, records: &[QsoRecord]) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = (0..records.len())
            .into_par_iter()
            .flat_map_iter(move |i| {
                let a = &records[i];
                records[..i].iter().filter_map(move |b| {
                    if a.log_id == b.log_id {
                        return None;
                    }
                    let score = self.matcher.probably_match(a, b);
                    (score.overall > self.candidate_floor).then(|| Candidate {
                        a: a.id,
                        b: b.id,
                        score,
                        metrics: self.matcher.metrics(a, b),
                    })
                })
            })
            .collect();

        candidates.sort_by(|x, y| {
            y.score
                .overall
                .total_cmp(&x.score.overall)
                .then(x.a.cmp(&y.a))
                .then(x.b.cmp(&y.b))
        });
        tracing::debug!(records = records.len(), candidates = candidates.len(), "ranked QSO pairs");
        candidates
    }

    /// Greedily accepts candidates in rank order. Each QSO joins at most one
    /// pair; candidates touching an already matched QSO are skipped.
    pub fn pair<C: MatchClassifier + ?Sized>(
        &self,
        records: &[QsoRecord],
        candidates: Vec<Candidate>,
        classifier: &C,
    ) -> Pairing {
        let by_id: HashMap<QsoId, &QsoRecord> = records.iter().map(|r| (r.id, r)).collect();
        let mut claimed: HashSet<QsoId> = HashSet::new();
        let mut out = Pairing::default();

        for cand in candidates {
            if claimed.contains(&cand.a) || claimed.contains(&cand.b) {
                continue;
            }
            let (Some(a), Some(b)) = (by_id.get(&cand.a), by_id.get(&cand.b)) else {
                continue;
            };
            if !classifier.is_match(&cand.metrics) {
                out.review.push(cand);
                continue;
            }
            claimed.insert(cand.a);
            claimed.insert(cand.b);
            out.matched.push(MatchedPair {
                a: cand.a,
                b: cand.b,
                a_type: self.label(a, b),
                b_type: self.label(b, a),
                score: cand.score,
            });
        }

        // A rejected candidate may have lost a QSO to a later acceptance.
        out.review
            .retain(|c| !claimed.contains(&c.a) && !claimed.contains(&c.b));
        out
    }

    /// Ranks then pairs in one pass.
    pub fn run<C: MatchClassifier + ?Sized>(&self, records: &[QsoRecord], classifier: &C) -> Pairing {
        let candidates = self.rank(records);
        let total = candidates.len();
        let pairing = self.pair(records, candidates, classifier);
        tracing::info!(
            records = records.len(),
            candidates = total,
            matched = pairing.matched.len(),
            review = pairing.review.len(),
            "cross match complete"
        );
        pairing
    }

    fn label(&self, a: &QsoRecord, b: &QsoRecord) -> MatchType {
        if is_full_match(a, b, self.full_match_minutes) {
            MatchType::Full
        } else {
            MatchType::Partial
        }
    }
}
