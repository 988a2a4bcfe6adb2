//! Loading behaviour across calls
//!
//! Accumulation of several bodies into one parser, the logging `load`
//! wrapper, and option round-trips through a parsed file.

use touchstone_core::frequency::FrequencyUnit;
use touchstone_core::touchstone::{Options, Touchstone, TouchstoneError};
use touchstone_core::Datapoint;

const TEST_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/data");

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("touchstone_core=debug")
        .try_init();
}

#[test]
fn test_incremental_loading_appends_in_call_order() {
    let mut ts = Touchstone::new();
    ts.load_from_text("! first\n# GHZ S RI\n1 0.1 0.0\n2 0.2 0.0\n")
        .unwrap();
    ts.load_from_text("! second\n# GHZ S RI\n3 0.3 0.0\n4 0.4 0.0\n")
        .unwrap();

    let re: Vec<f64> = ts.s11data().iter().map(|p| p.re).collect();
    assert_eq!(re, [0.1, 0.2, 0.3, 0.4]);
    assert_eq!(ts.comments(), ["! first", "! second"]);
}

/// Each call restarts the ascending check and the column count
#[test]
fn test_each_call_checks_independently() {
    let mut ts = Touchstone::new();
    ts.load_from_text("# MHZ S RI\n10 1 0 0 0\n").unwrap();
    ts.load_from_text("# MHZ S RI\n5 2 0\n").unwrap();

    assert_eq!(ts.s11data().len(), 2);
    assert_eq!(ts.s21data().len(), 1);
    assert_eq!(ts.s11data()[1], Datapoint::new(5e6, 2.0, 0.0));
}

/// Later option lines override earlier settings, unmentioned ones persist
#[test]
fn test_options_carry_over_between_loads() {
    let mut ts = Touchstone::new();
    ts.load_from_text("# MHZ S RI R 75\n1 0 0\n").unwrap();
    ts.load_from_text("# HZ\n1 1 0\n").unwrap();

    assert_eq!(ts.opts().unit, FrequencyUnit::Hz);
    assert_eq!(ts.opts().resistance, 75);
    assert_eq!(ts.s11data()[1], Datapoint::new(1.0, 1.0, 0.0));
}

#[test]
fn test_load_reports_success() {
    init_logging();
    let mut ts = Touchstone::with_filename(format!("{}/short.s1p", TEST_DATA_DIR));
    assert!(ts.load());
    assert_eq!(ts.nfreq(), 3);
    assert!(ts.filename().is_some());
}

#[test]
fn test_load_reports_io_failure_without_touching_state() {
    init_logging();
    let mut ts = Touchstone::new();
    ts.load_from_text("! kept\n# GHZ S RI\n1 0.5 0.5\n").unwrap();

    ts.set_filename(format!("{}/missing.s1p", TEST_DATA_DIR));
    assert!(!ts.load());
    assert_eq!(ts.nfreq(), 1);
    assert_eq!(ts.comments(), ["! kept"]);
}

#[test]
fn test_load_reports_parse_failure_and_keeps_points() {
    init_logging();
    let mut ts = Touchstone::with_filename(format!("{}/descending.s2p", TEST_DATA_DIR));
    assert!(!ts.load());
    // the two ascending lines were appended before the bad one
    assert_eq!(ts.nfreq(), 2);
    assert_eq!(ts.s22data().len(), 2);
}

#[test]
fn test_load_without_filename() {
    init_logging();
    let mut ts = Touchstone::new();
    assert!(!ts.load());
}

#[test]
fn test_option_round_trip_through_file_header() {
    let ts: Touchstone = "# khz y db r 300\n1 0 0\n".parse().unwrap();
    let header = ts.opts().to_string();
    assert_eq!(header, "# KHZ Y DB R 300");

    let back: Options = header.parse().unwrap();
    assert_eq!(&back, ts.opts());
}

#[test]
fn test_bad_option_line_rejects_file() {
    let mut ts = Touchstone::new();
    let err = ts
        .load_from_text("! c\n# XHZ S MA R 50\n1 0 0\n")
        .unwrap_err();
    assert!(matches!(err, TouchstoneError::Format { .. }));
    assert!(ts.is_empty());
}
