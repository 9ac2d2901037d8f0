//! Probability that a sent exchange and a received exchange describe the
//! same contact.

use serde::{Deserialize, Serialize};

use crate::{
    config::MatchConfig,
    core::{
        distance::{DistanceOptions, distance},
        morse::to_cw,
    },
    qso::Exchange,
};

/// Result of comparing one sent exchange against one received exchange.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExchangeScore {
    /// Product of the call, serial and multiplier scores.
    pub overall: f64,
    /// Call score alone.
    pub call: f64,
}

/// Piecewise-linear "hill": 1 up to `full`, 0 from `none`, linear between.
///
/// `value` is taken by magnitude. Callers keep `full < none`.
pub fn hill(value: f64, full: f64, none: f64) -> f64 {
    let value = value.abs();
    if value <= full {
        1.0
    } else if value >= none {
        0.0
    } else {
        1.0 - (value - full) / (none - full)
    }
}

/// Deduplicated candidate spellings for a primary/secondary field pair.
///
/// `secondary` is only kept when present and different from `primary`.
pub fn pack<'s>(primary: Option<&'s str>, secondary: Option<&'s str>) -> Vec<&'s str> {
    let mut list = Vec::with_capacity(2);
    if let Some(p) = primary {
        list.push(p);
    }
    if let Some(s) = secondary {
        if primary != Some(s) {
            list.push(s);
        }
    }
    list
}

/// Scores exchanges field by field with Jaro-Winkler distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeMatcher<'a> {
    options: DistanceOptions<'a>,
    serial_full: f64,
    serial_none: f64,
}

impl Default for ExchangeMatcher<'_> {
    fn default() -> Self {
        Self {
            options: DistanceOptions::default(),
            serial_full: 1.0,
            serial_none: 10.0,
        }
    }
}

impl<'a> ExchangeMatcher<'a> {
    /// Matcher using the given distance options and default serial bounds.
    pub fn new(options: DistanceOptions<'a>) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Matcher tuned from a [`MatchConfig`].
    pub fn from_config(cfg: &MatchConfig) -> Self {
        Self {
            options: cfg.distance_options(),
            serial_full: f64::from(cfg.serial_full),
            serial_none: f64::from(cfg.serial_none),
        }
    }

    /// Distance options used for every field comparison.
    pub fn options(&self) -> &DistanceOptions<'a> {
        &self.options
    }

    /// Best distance over every left/right candidate pair, also trying the
    /// Morse renderings when `use_cw` is set. Zero when either side is empty.
    pub fn best_match(&self, left: &[&str], right: &[&str], use_cw: bool) -> f64 {
        let right_cw: Vec<String> = if use_cw {
            right.iter().map(|r| to_cw(r.as_bytes())).collect()
        } else {
            Vec::new()
        };
        let mut best = 0.0f64;
        for l in left {
            let l_cw = use_cw.then(|| to_cw(l.as_bytes()));
            for (j, r) in right.iter().enumerate() {
                best = best.max(distance(l.as_bytes(), r.as_bytes(), &self.options));
                if let Some(l_cw) = &l_cw {
                    best = best.max(distance(l_cw.as_bytes(), right_cw[j].as_bytes(), &self.options));
                }
            }
        }
        best
    }

    /// Hill score of the serial difference alone.
    pub fn serial_hill(&self, sent: i64, received: i64) -> f64 {
        hill((sent - received) as f64, self.serial_full, self.serial_none)
    }

    /// Serial score: the better of the difference hill and the distance
    /// between the decimal renderings (and their Morse forms under `use_cw`).
    pub fn serial_score(&self, sent: i64, received: i64, use_cw: bool) -> f64 {
        let left = sent.to_string();
        let right = received.to_string();
        let mut score = self
            .serial_hill(sent, received)
            .max(distance(left.as_bytes(), right.as_bytes(), &self.options));
        if use_cw {
            let left_cw = to_cw(left.as_bytes());
            let right_cw = to_cw(right.as_bytes());
            score = score.max(distance(left_cw.as_bytes(), right_cw.as_bytes(), &self.options));
        }
        score
    }

    /// Best match between the basecall/callsign candidates of two exchanges.
    pub fn call_score(&self, sent: &Exchange, received: &Exchange, use_cw: bool) -> f64 {
        self.best_match(
            &pack(sent.basecall.as_deref(), sent.callsign.as_deref()),
            &pack(received.basecall.as_deref(), received.callsign.as_deref()),
            use_cw,
        )
    }

    /// Best match between the multiplier/location candidates of two exchanges.
    pub fn multiplier_score(&self, sent: &Exchange, received: &Exchange, use_cw: bool) -> f64 {
        self.best_match(
            &pack(sent.multiplier.as_deref(), sent.location.as_deref()),
            &pack(received.multiplier.as_deref(), received.location.as_deref()),
            use_cw,
        )
    }

    /// Multiplies call, serial and multiplier scores, stopping at the first
    /// zero factor.
    pub fn score(&self, sent: &Exchange, received: &Exchange, use_cw: bool) -> ExchangeScore {
        let call = self.call_score(sent, received, use_cw);
        if call == 0.0 {
            return ExchangeScore { overall: 0.0, call };
        }
        let overall = call * self.serial_score(sent.serial_value(), received.serial_value(), use_cw);
        if overall == 0.0 {
            return ExchangeScore { overall, call };
        }
        ExchangeScore {
            overall: overall * self.multiplier_score(sent, received, use_cw),
            call,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hill_is_linear_between_bounds() {
        assert_eq!(hill(0.0, 1.0, 10.0), 1.0);
        assert_eq!(hill(-1.0, 1.0, 10.0), 1.0);
        assert!((hill(5.5, 1.0, 10.0) - 0.5).abs() < 1e-12);
        assert_eq!(hill(10.0, 1.0, 10.0), 0.0);
        assert_eq!(hill(1e9, 1.0, 10.0), 0.0);
    }

    #[test]
    fn pack_keeps_secondary_without_primary() {
        assert_eq!(pack(None, Some("K1ABC")), vec!["K1ABC"]);
        assert!(pack(None, None).is_empty());
    }
}
