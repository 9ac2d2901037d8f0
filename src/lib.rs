//! Probabilistic matching of contest QSOs logged independently by both
//! stations, tolerant of miscopied calls, serials and multipliers.
//!
//! # Examples
//!
//! Scoring one exchange against another with [`engine::exchange::ExchangeMatcher`]:
//! ```
//! use qsomatch::{engine::exchange::ExchangeMatcher, qso::Exchange};
//!
//! let sent = Exchange {
//!     serial: Some(42),
//!     callsign: Some("K1ABC".to_string()),
//!     basecall: Some("K1ABC".to_string()),
//!     multiplier: Some("MA".to_string()),
//!     location: Some("MA".to_string()),
//! };
//! let copied = Exchange { serial: Some(43), ..sent.clone() };
//!
//! let score = ExchangeMatcher::default().score(&sent, &copied, false);
//! assert_eq!(score.call, 1.0);
//! assert_eq!(score.overall, 1.0);
//! ```
//!
//! Cross matching whole logs with [`engine::crossmatch::CrossMatcher`]:
//! ```no_run
//! use qsomatch::{
//!     config::MatchConfig,
//!     engine::{crossmatch::CrossMatcher, traits::ThresholdClassifier},
//!     qso::QsoRecord,
//! };
//!
//! # fn load() -> Vec<QsoRecord> { Vec::new() }
//! let cfg = MatchConfig::from_json_file("match.json").expect("config");
//! let records = load();
//! let pairing = CrossMatcher::from_config(&cfg).run(&records, &ThresholdClassifier::from_config(&cfg));
//! for pair in &pairing.matched {
//!     println!("{} <-> {} {:?}/{:?}", pair.a, pair.b, pair.a_type, pair.b_type);
//! }
//! ```
#![deny(missing_docs)]

/// Tunable scoring constants.
pub mod config;
/// Character relation, string distance and Morse rendering.
pub mod core;
/// Exchange and QSO scoring, full-match check and cross matching.
pub mod engine;
/// Crate error type.
pub mod error;
/// QSO records, exchanges and ingestion.
pub mod qso;
/// Shared primitive types and enums.
pub mod types;
