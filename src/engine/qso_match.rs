use serde::{Deserialize, Serialize};

use crate::{
    config::MatchConfig,
    qso::QsoRecord,
    types::Mode,
};

use super::{
    exchange::{ExchangeMatcher, hill},
    traits::{METRIC_COUNT, MetricVector},
};

/// Likelihood that two QSOs from different logs are the same contact.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QsoScore {
    /// Both exchange directions, band, mode and time combined.
    pub overall: f64,
    /// Product of the two call-only scores.
    pub call: f64,
}

/// Scores whole QSO pairs by comparing each side's sent exchange with the
/// other side's received exchange.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QsoMatcher<'a> {
    exchange: ExchangeMatcher<'a>,
    band_mismatch_factor: f64,
    mode_mismatch_factor: f64,
    time_full_secs: f64,
    time_none_secs: f64,
}

impl Default for QsoMatcher<'_> {
    fn default() -> Self {
        Self::from_config(&MatchConfig::default())
    }
}

impl<'a> QsoMatcher<'a> {
    /// Matcher tuned from a [`MatchConfig`].
    pub fn from_config(cfg: &MatchConfig) -> Self {
        Self {
            exchange: ExchangeMatcher::from_config(cfg),
            band_mismatch_factor: cfg.band_mismatch_factor,
            mode_mismatch_factor: cfg.mode_mismatch_factor,
            time_full_secs: cfg.time_full_secs as f64,
            time_none_secs: cfg.time_none_secs as f64,
        }
    }

    /// Replaces the exchange matcher, e.g. to consult an adjacency relation.
    pub fn with_exchange(self, exchange: ExchangeMatcher<'a>) -> Self {
        Self { exchange, ..self }
    }

    /// Exchange matcher used for both directions.
    pub fn exchange(&self) -> &ExchangeMatcher<'a> {
        &self.exchange
    }

    /// The Morse channel is used when either side operated CW.
    pub fn use_cw(a: &QsoRecord, b: &QsoRecord) -> bool {
        a.mode == Mode::CW || b.mode == Mode::CW
    }

    /// Overall and call-only likelihoods for `a` and `b`.
    ///
    /// QSOs from the same log never match each other, so their overall score
    /// is zero; the call score is still reported.
    pub fn probably_match(&self, a: &QsoRecord, b: &QsoRecord) -> QsoScore {
        let use_cw = Self::use_cw(a, b);
        let forward = self.exchange.score(&a.sent, &b.received, use_cw);
        let reverse = self.exchange.score(&a.received, &b.sent, use_cw);
        let call = forward.call * reverse.call;
        if a.log_id == b.log_id {
            return QsoScore { overall: 0.0, call };
        }
        let overall = forward.overall
            * reverse.overall
            * self.band_factor(a, b)
            * self.mode_factor(a, b)
            * self.time_score(a, b);
        QsoScore { overall, call }
    }

    /// Product of the call-only scores in both directions.
    pub fn call_probability(&self, a: &QsoRecord, b: &QsoRecord) -> f64 {
        let use_cw = Self::use_cw(a, b);
        self.exchange.call_score(&a.sent, &b.received, use_cw)
            * self.exchange.call_score(&a.received, &b.sent, use_cw)
    }

    /// Feature vector for a trained classifier, in [`super::traits::Metric`] order.
    pub fn metrics(&self, a: &QsoRecord, b: &QsoRecord) -> MetricVector {
        let use_cw = Self::use_cw(a, b);
        let ex = &self.exchange;
        let forward = ex.score(&a.sent, &b.received, use_cw);
        let reverse = ex.score(&a.received, &b.sent, use_cw);
        let values: [f64; METRIC_COUNT] = [
            forward.overall,
            forward.call,
            reverse.overall,
            reverse.call,
            ex.serial_score(a.sent.serial_value(), b.received.serial_value(), use_cw),
            ex.serial_score(a.received.serial_value(), b.sent.serial_value(), use_cw),
            ex.multiplier_score(&a.sent, &b.received, use_cw),
            ex.multiplier_score(&a.received, &b.sent, use_cw),
            indicator(a.band == b.band),
            indicator(a.mode == b.mode),
            self.time_score(a, b),
        ];
        MetricVector(values)
    }

    fn band_factor(&self, a: &QsoRecord, b: &QsoRecord) -> f64 {
        if a.band == b.band { 1.0 } else { self.band_mismatch_factor }
    }

    fn mode_factor(&self, a: &QsoRecord, b: &QsoRecord) -> f64 {
        if a.mode == b.mode { 1.0 } else { self.mode_mismatch_factor }
    }

    fn time_score(&self, a: &QsoRecord, b: &QsoRecord) -> f64 {
        let delta = (a.timestamp - b.timestamp).num_milliseconds() as f64 / 1000.0;
        hill(delta, self.time_full_secs, self.time_none_secs)
    }
}

fn indicator(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}
