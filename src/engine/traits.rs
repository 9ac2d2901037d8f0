use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;

/// Number of metrics handed to a [`MatchClassifier`].
pub const METRIC_COUNT: usize = 11;

/// Position of each metric inside a [`MetricVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Overall score of `a.sent` against `b.received`.
    ForwardOverall = 0,
    /// Call score of `a.sent` against `b.received`.
    ForwardCall,
    /// Overall score of `a.received` against `b.sent`.
    ReverseOverall,
    /// Call score of `a.received` against `b.sent`.
    ReverseCall,
    /// Serial score of `a.sent` against `b.received`.
    ForwardSerial,
    /// Serial score of `a.received` against `b.sent`.
    ReverseSerial,
    /// Multiplier score of `a.sent` against `b.received`.
    ForwardMultiplier,
    /// Multiplier score of `a.received` against `b.sent`.
    ReverseMultiplier,
    /// 1 when both QSOs share a band, else 0.
    SameBand,
    /// 1 when both QSOs share a mode, else 0.
    SameMode,
    /// Hill score of the time difference.
    Time,
}

/// Ordered feature vector describing one candidate QSO pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricVector(pub [f64; METRIC_COUNT]);

impl MetricVector {
    /// Value at `metric`.
    pub fn get(&self, metric: Metric) -> f64 {
        self.0[metric as usize]
    }

    /// Metrics as a slice, in classifier order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Decides whether a candidate pair is a match from its metrics.
///
/// Implementations wrap a trained model; they must be pure so candidates can
/// be classified from any thread.
pub trait MatchClassifier: Send + Sync {
    /// True when the pair described by `metrics` is the same contact.
    fn is_match(&self, metrics: &MetricVector) -> bool;
}

/// Rule-based classifier mirroring the operator workflow: accept when the
/// recombined overall metric and the call product clear fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdClassifier {
    /// Lowest recombined overall metric accepted.
    pub min_overall: f64,
    /// Lowest product of the two call-only metrics accepted.
    pub min_call: f64,
    /// Factor folded in when the band indicator is zero.
    pub band_mismatch_factor: f64,
    /// Factor folded in when the mode indicator is zero.
    pub mode_mismatch_factor: f64,
}

impl ThresholdClassifier {
    /// Classifier using the acceptance thresholds and mismatch factors of `cfg`.
    pub fn from_config(cfg: &MatchConfig) -> Self {
        Self {
            min_overall: cfg.accept_overall,
            min_call: cfg.accept_call,
            band_mismatch_factor: cfg.band_mismatch_factor,
            mode_mismatch_factor: cfg.mode_mismatch_factor,
        }
    }
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        Self::from_config(&MatchConfig::default())
    }
}

impl MatchClassifier for ThresholdClassifier {
    fn is_match(&self, metrics: &MetricVector) -> bool {
        let factor = |metric: Metric, mismatch: f64| if metrics.get(metric) > 0.0 { 1.0 } else { mismatch };
        let overall = metrics.get(Metric::ForwardOverall)
            * metrics.get(Metric::ReverseOverall)
            * factor(Metric::SameBand, self.band_mismatch_factor)
            * factor(Metric::SameMode, self.mode_mismatch_factor)
            * metrics.get(Metric::Time);
        let call = metrics.get(Metric::ForwardCall) * metrics.get(Metric::ReverseCall);
        overall >= self.min_overall && call >= self.min_call
    }
}
