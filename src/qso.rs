//! QSO domain record, exchange, and ingestion draft types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    types::{Band, Frequency, LogId, Mode, QsoId},
};

/// Buffer size for callsign fields; stored text keeps at most one byte less.
pub const MAX_CALLSIGN_CHARS: usize = 12;
/// Buffer size for multiplier fields; stored text keeps at most one byte less.
pub const MAX_MULTIPLIER_CHARS: usize = 20;

/// Serial value standing in for "no serial" in sentinel-encoded form.
pub const ABSENT_SERIAL: i64 = -1;

/// One side of a contact: what a station sent, or what it copied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Exchange {
    /// Serial number.
    pub serial: Option<u32>,
    /// Callsign as logged.
    pub callsign: Option<String>,
    /// Callsign with contest prefix/suffix removed.
    pub basecall: Option<String>,
    /// Canonical multiplier name.
    pub multiplier: Option<String>,
    /// Multiplier name as logged.
    pub location: Option<String>,
}

impl Exchange {
    /// Serial in sentinel-encoded form, [`ABSENT_SERIAL`] when missing.
    pub fn serial_value(&self) -> i64 {
        self.serial.map_or(ABSENT_SERIAL, i64::from)
    }

    /// Builds an exchange from raw optional text, applying the ingestion
    /// rules: empty text is absent and over-long text is truncated.
    pub fn ingest(draft: ExchangeDraft) -> Self {
        Self {
            serial: draft.serial.and_then(ingest_serial),
            callsign: ingest_text(draft.callsign, MAX_CALLSIGN_CHARS, "callsign"),
            basecall: ingest_text(draft.basecall, MAX_CALLSIGN_CHARS, "basecall"),
            multiplier: ingest_text(draft.multiplier, MAX_MULTIPLIER_CHARS, "multiplier"),
            location: ingest_text(draft.location, MAX_MULTIPLIER_CHARS, "location"),
        }
    }

    fn summary(&self) -> String {
        format!(
            "{:<7} {:<7} {:>4} {:<4} {:<4}",
            text(&self.basecall),
            text(&self.callsign),
            self.serial_value(),
            text(&self.multiplier),
            text(&self.location),
        )
    }
}

/// Raw, unvalidated exchange fields as they arrive from a log parser.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExchangeDraft {
    /// Serial number; negative values mean "none". Values above `u32::MAX`
    /// are also treated as absent.
    pub serial: Option<i64>,
    /// Callsign as logged.
    pub callsign: Option<String>,
    /// Callsign with contest prefix/suffix removed.
    pub basecall: Option<String>,
    /// Canonical multiplier name.
    pub multiplier: Option<String>,
    /// Multiplier name as logged.
    pub location: Option<String>,
}

/// Fully materialized, read-only QSO record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QsoRecord {
    /// Unique QSO identifier.
    pub id: QsoId,
    /// Log in which this QSO appears.
    pub log_id: LogId,
    /// Frequency number as logged.
    pub frequency: Frequency,
    /// Band bucket.
    pub band: Band,
    /// Mode bucket.
    pub mode: Mode,
    /// Date and time of the QSO.
    pub timestamp: DateTime<Utc>,
    /// Exchange sent by the logging station.
    pub sent: Exchange,
    /// Exchange copied by the logging station.
    pub received: Exchange,
}

/// Insert payload with string band and mode, validated by [`QsoRecord::ingest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QsoDraft {
    /// Unique QSO identifier.
    pub id: QsoId,
    /// Log in which this QSO appears.
    pub log_id: LogId,
    /// Frequency number as logged.
    pub frequency: Frequency,
    /// Band name, e.g. `"20m"` or `"432"`.
    pub band: String,
    /// Two-letter mode code, e.g. `"CW"`.
    pub mode: String,
    /// Date and time of the QSO.
    pub timestamp: DateTime<Utc>,
    /// Exchange sent by the logging station.
    pub sent: ExchangeDraft,
    /// Exchange copied by the logging station.
    pub received: ExchangeDraft,
}

impl QsoRecord {
    /// Validates band and mode and normalizes both exchanges.
    ///
    /// Unrecognized band or mode strings reject the whole record.
    pub fn ingest(draft: QsoDraft) -> Result<Self> {
        let band = draft.band.parse::<Band>().inspect_err(|_| {
            tracing::warn!(qso_id = draft.id, band = %draft.band, "rejecting QSO with unknown band");
        })?;
        let mode = draft.mode.parse::<Mode>().inspect_err(|_| {
            tracing::warn!(qso_id = draft.id, mode = %draft.mode, "rejecting QSO with unknown mode");
        })?;
        Ok(Self {
            id: draft.id,
            log_id: draft.log_id,
            frequency: draft.frequency,
            band,
            mode,
            timestamp: draft.timestamp,
            sent: Exchange::ingest(draft.sent),
            received: Exchange::ingest(draft.received),
        })
    }

    /// Cabrillo-style line: frequency, band, mode, date, sent then received.
    pub fn basic_line(&self) -> String {
        format!(
            "{:>5} {:<4} {:<2} {} {} {}",
            self.frequency,
            self.band.as_str(),
            self.mode.as_str(),
            self.timestamp.format("%Y-%m-%d"),
            self.sent.summary(),
            self.received.summary(),
        )
    }

    /// Summary line prefixed with QSO and log ids.
    ///
    /// The received exchange prints first unless `reversed` is set.
    pub fn to_line(&self, reversed: bool) -> String {
        let (left, right) = if reversed {
            (&self.sent, &self.received)
        } else {
            (&self.received, &self.sent)
        };
        format!(
            "{:>7} {:>5} {:>5} {:<4} {:<2} {} {} {}",
            self.id,
            self.log_id,
            self.frequency,
            self.band.as_str(),
            self.mode.as_str(),
            self.timestamp.format("%Y-%m-%d"),
            left.summary(),
            right.summary(),
        )
    }
}

fn text(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}

fn ingest_serial(raw: i64) -> Option<u32> {
    if raw < 0 {
        return None;
    }
    let serial = u32::try_from(raw).ok();
    if serial.is_none() {
        tracing::debug!(serial = raw, "dropping out-of-range serial");
    }
    serial
}

fn ingest_text(raw: Option<String>, max_chars: usize, field: &'static str) -> Option<String> {
    let mut value = raw.filter(|s| !s.is_empty())?;
    if value.len() >= max_chars {
        let mut keep = max_chars - 1;
        while !value.is_char_boundary(keep) {
            keep -= 1;
        }
        tracing::debug!(field, len = value.len(), keep, "truncating over-long exchange field");
        value.truncate(keep);
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_to_one_less_than_buffer() {
        let out = ingest_text(Some("ABCDEFGHIJKLMNOP".into()), MAX_CALLSIGN_CHARS, "callsign");
        assert_eq!(out.as_deref(), Some("ABCDEFGHIJK"));
        let exact = ingest_text(Some("ABCDEFGHIJK".into()), MAX_CALLSIGN_CHARS, "callsign");
        assert_eq!(exact.as_deref(), Some("ABCDEFGHIJK"));
    }

    #[test]
    fn truncation_backs_off_to_char_boundary() {
        // 10 ASCII bytes then a two-byte character straddling the cut.
        let out = ingest_text(Some("ABCDEFGHIJé".into()), MAX_CALLSIGN_CHARS, "callsign");
        assert_eq!(out.as_deref(), Some("ABCDEFGHIJ"));
    }

    #[test]
    fn empty_text_and_negative_serial_are_absent() {
        let ex = Exchange::ingest(ExchangeDraft {
            serial: Some(-1),
            callsign: Some(String::new()),
            ..ExchangeDraft::default()
        });
        assert_eq!(ex, Exchange::default());
        assert_eq!(ex.serial_value(), ABSENT_SERIAL);
    }

    #[test]
    fn out_of_range_serial_is_absent() {
        assert_eq!(ingest_serial(i64::from(u32::MAX) + 1), None);
        assert_eq!(ingest_serial(i64::from(u32::MAX)), Some(u32::MAX));
        assert_eq!(ingest_serial(42), Some(42));
    }
}
