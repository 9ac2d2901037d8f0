//! Tunable constants for scoring and cross matching.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    core::distance::DistanceOptions,
    error::{QsoMatchError, Result},
};

/// Scoring configuration, loadable from JSON.
///
/// Missing keys take their defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Winkler prefix boost factor.
    pub weight: f64,
    /// Minimum Jaro score eligible for the prefix boost.
    pub threshold: f64,
    /// Serial difference still scored as a full match.
    pub serial_full: u32,
    /// Serial difference at and beyond which the hill score is zero.
    pub serial_none: u32,
    /// Time difference in seconds still scored as a full match.
    pub time_full_secs: i64,
    /// Time difference in seconds at and beyond which the hill score is zero.
    pub time_none_secs: i64,
    /// Factor applied when the two QSOs were logged on different bands.
    pub band_mismatch_factor: f64,
    /// Factor applied when the two QSOs were logged in different modes.
    pub mode_mismatch_factor: f64,
    /// Overall metric a pair must exceed to be kept as a candidate.
    pub candidate_floor: f64,
    /// Overall metric at which the threshold classifier accepts.
    pub accept_overall: f64,
    /// Call-only metric at which the threshold classifier accepts.
    pub accept_call: f64,
    /// Time tolerance in minutes for labeling accepted pairs as full matches.
    pub full_match_minutes: i64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            weight: 0.1,
            threshold: 0.7,
            serial_full: 1,
            serial_none: 10,
            time_full_secs: 15 * 60,
            time_none_secs: 24 * 60 * 60,
            band_mismatch_factor: 0.90,
            mode_mismatch_factor: 0.90,
            candidate_floor: 0.20,
            accept_overall: 0.5,
            accept_call: 0.8,
            full_match_minutes: 15,
        }
    }
}

impl MatchConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let cfg = Self::from_json_str(&text)?;
        tracing::info!(path = %path.display(), "loaded match configuration");
        Ok(cfg)
    }

    /// Rejects configurations that would make a hill function degenerate or a
    /// factor non-finite. A `weight` above 0.25 is allowed.
    pub fn validate(&self) -> Result<()> {
        if self.serial_full >= self.serial_none {
            return Err(QsoMatchError::InvalidArgument(format!(
                "serial_full ({}) must be below serial_none ({})",
                self.serial_full, self.serial_none
            )));
        }
        if self.time_full_secs < 0 || self.time_full_secs >= self.time_none_secs {
            return Err(QsoMatchError::InvalidArgument(format!(
                "time_full_secs ({}) must be non-negative and below time_none_secs ({})",
                self.time_full_secs, self.time_none_secs
            )));
        }
        let factors = [
            ("weight", self.weight),
            ("threshold", self.threshold),
            ("band_mismatch_factor", self.band_mismatch_factor),
            ("mode_mismatch_factor", self.mode_mismatch_factor),
            ("candidate_floor", self.candidate_floor),
            ("accept_overall", self.accept_overall),
            ("accept_call", self.accept_call),
        ];
        if let Some((name, value)) = factors.iter().find(|(_, v)| !v.is_finite()) {
            return Err(QsoMatchError::InvalidArgument(format!("{name} is not finite: {value}")));
        }
        if self.full_match_minutes < 0 {
            return Err(QsoMatchError::InvalidArgument(format!(
                "full_match_minutes must be non-negative, got {}",
                self.full_match_minutes
            )));
        }
        Ok(())
    }

    /// Distance options carrying this configuration's Winkler tuning.
    pub fn distance_options(&self) -> DistanceOptions<'static> {
        DistanceOptions {
            weight: self.weight,
            threshold: self.threshold,
            adjacency: None,
        }
    }
}
