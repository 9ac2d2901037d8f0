use chrono::{DateTime, Duration, Utc};

use qsomatch::{
    engine::{
        crossmatch::{CrossMatcher, MatchType},
        full_match::is_full_match,
        qso_match::QsoMatcher,
        traits::{MatchClassifier, Metric, MetricVector, ThresholdClassifier},
    },
    qso::{Exchange, QsoRecord},
    types::{Band, LogId, Mode, QsoId},
};

fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_710_612_000, 0).unwrap()
}

fn exch(call: &str, serial: u32, mult: &str) -> Exchange {
    Exchange {
        serial: Some(serial),
        callsign: Some(call.to_string()),
        basecall: Some(call.to_string()),
        multiplier: Some(mult.to_string()),
        location: Some(mult.to_string()),
    }
}

fn qso(id: QsoId, log_id: LogId, offset_secs: i64, sent: Exchange, received: Exchange) -> QsoRecord {
    QsoRecord {
        id,
        log_id,
        frequency: 14_025,
        band: Band::B20m,
        mode: Mode::Phone,
        timestamp: base_time() + Duration::seconds(offset_secs),
        sent,
        received,
    }
}

struct RejectAll;

impl MatchClassifier for RejectAll {
    fn is_match(&self, _metrics: &MetricVector) -> bool {
        false
    }
}

#[test]
fn full_match_tolerance_boundary_is_inclusive() {
    let a = qso(1, 1, 0, exch("K1ABC", 5, "MA"), exch("W9XYZ", 12, "IL"));
    let on_edge = qso(2, 2, 30 * 60, exch("W9XYZ", 12, "IL"), exch("K1ABC", 5, "MA"));
    let past_edge = qso(3, 2, 30 * 60 + 1, exch("W9XYZ", 12, "IL"), exch("K1ABC", 5, "MA"));
    assert!(is_full_match(&a, &on_edge, 30));
    assert!(!is_full_match(&a, &past_edge, 30));
}

#[test]
fn full_match_tolerance_counts_sub_second_gaps() {
    let a = qso(1, 1, 0, exch("K1ABC", 5, "MA"), exch("W9XYZ", 12, "IL"));
    let mut b = qso(2, 2, 30 * 60, exch("W9XYZ", 12, "IL"), exch("K1ABC", 5, "MA"));
    b.timestamp += Duration::milliseconds(500);
    assert!(!is_full_match(&a, &b, 30));
    assert!(!is_full_match(&b, &a, 30));

    b.timestamp = base_time() + Duration::seconds(30 * 60) - Duration::milliseconds(500);
    assert!(is_full_match(&a, &b, 30));
}

#[test]
fn time_score_keeps_sub_second_precision() {
    let m = QsoMatcher::default();
    let a = qso(1, 1, 0, exch("K1ABC", 5, "MA"), exch("W9XYZ", 12, "IL"));
    let mut b = qso(2, 2, 15 * 60, exch("W9XYZ", 12, "IL"), exch("K1ABC", 5, "MA"));
    assert_eq!(m.metrics(&a, &b).get(Metric::Time), 1.0);
    b.timestamp += Duration::milliseconds(500);
    assert!(m.metrics(&a, &b).get(Metric::Time) < 1.0);
}

#[test]
fn full_match_is_strict_on_copied_fields() {
    let a = qso(1, 1, 0, exch("K1ABC", 5, "MA"), exch("W9XYZ", 12, "IL"));
    let serial_off_by_one = qso(2, 2, 0, exch("W9XYZ", 13, "IL"), exch("K1ABC", 5, "MA"));
    let serial_off_by_two = qso(3, 2, 0, exch("W9XYZ", 14, "IL"), exch("K1ABC", 5, "MA"));
    let wrong_mult = qso(4, 2, 0, exch("W9XYZ", 12, "IN"), exch("K1ABC", 5, "MA"));
    let wrong_band = QsoRecord {
        band: Band::B40m,
        ..qso(5, 2, 0, exch("W9XYZ", 12, "IL"), exch("K1ABC", 5, "MA"))
    };
    assert!(is_full_match(&a, &serial_off_by_one, 0));
    assert!(!is_full_match(&a, &serial_off_by_two, 0));
    assert!(!is_full_match(&a, &wrong_mult, 0));
    assert!(!is_full_match(&a, &wrong_band, 0));
    assert!(is_full_match(&a, &a, 0));
}

#[test]
fn full_match_only_checks_what_a_copied() {
    let a = qso(1, 1, 0, exch("K1ABC", 5, "MA"), exch("W9XYZ", 12, "IL"));
    let b = qso(2, 2, 0, exch("W9XYZ", 12, "IL"), exch("K1ABD", 5, "MA"));
    assert!(is_full_match(&a, &b, 0));
    assert!(!is_full_match(&b, &a, 0));
}

#[test]
fn same_log_never_matches() {
    let a = qso(1, 1, 0, exch("K1ABC", 5, "MA"), exch("W9XYZ", 12, "IL"));
    let b = qso(2, 1, 0, exch("W9XYZ", 12, "IL"), exch("K1ABC", 5, "MA"));
    let score = QsoMatcher::default().probably_match(&a, &b);
    assert_eq!(score.overall, 0.0);
    assert_eq!(score.call, 1.0);
}

#[test]
fn band_and_time_differences_discount_the_score() {
    let m = QsoMatcher::default();
    let a = qso(1, 1, 0, exch("K1ABC", 5, "MA"), exch("W9XYZ", 12, "IL"));
    let b = QsoRecord {
        band: Band::B40m,
        ..qso(2, 2, 0, exch("W9XYZ", 12, "IL"), exch("K1ABC", 5, "MA"))
    };
    assert!((m.probably_match(&a, &b).overall - 0.9).abs() < 1e-12);

    let late = qso(3, 2, 24 * 60 * 60, exch("W9XYZ", 12, "IL"), exch("K1ABC", 5, "MA"));
    assert_eq!(m.probably_match(&a, &late).overall, 0.0);
    assert_eq!(m.call_probability(&a, &late), 1.0);
}

#[test]
fn metric_vector_for_a_clean_pair() {
    let a = qso(1, 1, 0, exch("K1ABC", 5, "MA"), exch("W9XYZ", 12, "IL"));
    let b = qso(2, 2, 0, exch("W9XYZ", 12, "IL"), exch("K1ABC", 5, "MA"));
    let metrics = QsoMatcher::default().metrics(&a, &b);
    assert_eq!(metrics.as_slice().len(), 11);
    assert!(metrics.as_slice().iter().all(|&v| v == 1.0));
    assert!(ThresholdClassifier::default().is_match(&metrics));
}

#[test]
fn metric_vector_orders_directions() {
    let a = qso(1, 1, 0, exch("K1ABC", 5, "MA"), exch("W9XYZ", 12, "IL"));
    let b = QsoRecord {
        mode: Mode::FM,
        ..qso(2, 2, 0, exch("W9XYZ", 12, "IL"), exch("K1ABC", 60, "MA"))
    };
    let metrics = QsoMatcher::default().metrics(&a, &b);
    assert_eq!(metrics.get(Metric::ForwardSerial), 0.0);
    assert_eq!(metrics.get(Metric::ForwardOverall), 0.0);
    assert_eq!(metrics.get(Metric::ReverseSerial), 1.0);
    assert_eq!(metrics.get(Metric::ReverseOverall), 1.0);
    assert_eq!(metrics.get(Metric::SameMode), 0.0);
    assert_eq!(metrics.get(Metric::SameBand), 1.0);
}

#[test]
fn rank_keeps_cross_log_pairs_above_floor() {
    let records = vec![
        qso(1, 1, 0, exch("K1ABC", 5, "MA"), exch("W9XYZ", 12, "IL")),
        qso(2, 2, 0, exch("W9XYZ", 12, "IL"), exch("K1ABC", 5, "MA")),
        qso(3, 2, 300, exch("W9XYZ", 13, "IL"), exch("N5QQ", 7, "TX")),
    ];
    let candidates = CrossMatcher::default().rank(&records);
    assert_eq!(candidates.len(), 1);
    assert_eq!((candidates[0].a, candidates[0].b), (2, 1));
    assert_eq!(candidates[0].score.overall, 1.0);
}

#[test]
fn pairing_labels_each_side() {
    let records = vec![
        qso(1, 1, 0, exch("K1ABC", 5, "MA"), exch("W9XYZ", 12, "IL")),
        qso(2, 2, 0, exch("W9XYZ", 12, "IL"), exch("K1ABD", 5, "MA")),
    ];
    let pairing = CrossMatcher::default().run(&records, &ThresholdClassifier::default());
    assert_eq!(pairing.matched.len(), 1);
    let pair = &pairing.matched[0];
    assert_eq!((pair.a, pair.b), (2, 1));
    assert_eq!(pair.a_type, MatchType::Partial);
    assert_eq!(pair.b_type, MatchType::Full);
    assert!(pairing.review.is_empty());
}

#[test]
fn accepted_pair_outside_fifteen_minutes_is_partial() {
    let records = vec![
        qso(1, 1, 0, exch("K1ABC", 5, "MA"), exch("W9XYZ", 12, "IL")),
        qso(2, 2, 20 * 60, exch("W9XYZ", 12, "IL"), exch("K1ABC", 5, "MA")),
    ];
    let pairing = CrossMatcher::default().run(&records, &ThresholdClassifier::default());
    assert_eq!(pairing.matched.len(), 1);
    assert_eq!(pairing.matched[0].a_type, MatchType::Partial);
    assert_eq!(pairing.matched[0].b_type, MatchType::Partial);
}

#[test]
fn each_qso_joins_at_most_one_pair() {
    let records = vec![
        qso(1, 1, 0, exch("K1ABC", 5, "MA"), exch("W9XYZ", 12, "IL")),
        qso(2, 2, 0, exch("W9XYZ", 12, "IL"), exch("K1ABC", 5, "MA")),
        qso(3, 3, 1200, exch("W9XYZ", 12, "IL"), exch("K1ABC", 5, "MA")),
    ];
    let matcher = CrossMatcher::default();
    let candidates = matcher.rank(&records);
    assert_eq!(candidates.len(), 2);
    assert!(candidates[0].score.overall > candidates[1].score.overall);

    let pairing = matcher.pair(&records, candidates, &ThresholdClassifier::default());
    assert_eq!(pairing.matched.len(), 1);
    assert_eq!((pairing.matched[0].a, pairing.matched[0].b), (2, 1));
    assert!(pairing.review.is_empty());
}

#[test]
fn rejected_candidates_go_to_review() {
    let records = vec![
        qso(1, 1, 0, exch("K1ABC", 5, "MA"), exch("W9XYZ", 12, "IL")),
        qso(2, 2, 0, exch("W9XYZ", 12, "IL"), exch("K1ABC", 5, "MA")),
    ];
    let pairing = CrossMatcher::default().run(&records, &RejectAll);
    assert!(pairing.matched.is_empty());
    assert_eq!(pairing.review.len(), 1);
}
