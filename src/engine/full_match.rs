//! Strict, non-fuzzy reconciliation of two logged QSOs.

use chrono::TimeDelta;

use crate::qso::QsoRecord;

/// True when `a` correctly logged `b` within `tolerance_minutes`.
///
/// Holds for the same record, or when band and mode agree, the timestamps are
/// at most `tolerance_minutes * 60` seconds apart, the serial `a` copied is
/// within one of the serial `b` sent, and the basecall and multiplier `a`
/// copied equal exactly what `b` sent. It does not require `b` to have copied
/// `a` correctly, so the relation is not symmetric.
pub fn is_full_match(a: &QsoRecord, b: &QsoRecord, tolerance_minutes: i64) -> bool {
    if std::ptr::eq(a, b) || a == b {
        return true;
    }
    a.band == b.band
        && a.mode == b.mode
        && within(a.timestamp - b.timestamp, tolerance_minutes)
        && (a.received.serial_value() - b.sent.serial_value()).abs() <= 1
        && a.received.basecall == b.sent.basecall
        && a.received.multiplier == b.sent.multiplier
}

// A tolerance too large for `TimeDelta` admits every gap.
fn within(gap: TimeDelta, minutes: i64) -> bool {
    TimeDelta::try_minutes(minutes).is_none_or(|limit| gap.abs() <= limit)
}
