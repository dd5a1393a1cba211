//! Unblock: restore backups, comment out entries without one, respect #freeblock windows.

mod common;

use common::{at, lines};
use freeblock::hosts::TimeWindow;
use freeblock::reconcile::{Change, Reconciler};
use freeblock::TimingViolation;

const DOMAINS: &[&str] = &["google.com", "example.com", "internal.example.com", "github.com"];

fn unblock(records: &[&str]) -> Vec<String> {
    Reconciler::default()
        .unblock(DOMAINS, &lines(records), &at(12, 0))
        .expect("no time window")
        .lines
}

#[test]
fn backup_address_is_restored() {
    assert_eq!(
        unblock(&[" 0.0.0.0 google.com # 1.1.1.1"]),
        vec![" 1.1.1.1 google.com"]
    );
}

#[test]
fn block_then_unblock_restores_original() {
    let reconciler = Reconciler::default();
    let original = lines(&[" 1.1.1.1 google.com", "93.184.216.34\texample.com www.example.com"]);

    let blocked = reconciler.block(&["google.com", "www.example.com"], &original);
    assert_eq!(
        blocked.lines,
        vec![
            " 0.0.0.0 google.com # 1.1.1.1",
            "0.0.0.0\texample.com www.example.com # 93.184.216.34",
        ]
    );

    let unblocked = reconciler
        .unblock(&["google.com", "www.example.com"], &blocked.lines, &at(9, 0))
        .unwrap();
    assert_eq!(unblocked.lines, original);
}

#[test]
fn restored_address_of_different_length() {
    assert_eq!(
        unblock(&["0.0.0.0 example.com # 2606:2800:220:1:248:1893:25c8:1946"]),
        vec!["2606:2800:220:1:248:1893:25c8:1946 example.com"]
    );
}

#[test]
fn entry_without_backup_is_commented_out() {
    let result = Reconciler::default()
        .unblock(DOMAINS, &lines(&["0.0.0.0 github.com"]), &at(12, 0))
        .unwrap();
    assert_eq!(result.lines, vec!["#0.0.0.0 github.com"]);
    assert_eq!(
        result.changes,
        vec![Change::CommentedOut {
            line: 1,
            domain: "github.com".to_string()
        }]
    );
}

#[test]
fn unusable_backup_comments_out() {
    assert_eq!(
        unblock(&[
            "0.0.0.0 google.com # blocked for focus",
            "0.0.0.0 example.com # 1.1.1.1 2.2.2.2",
            "0.0.0.0 github.com # not-an-ip",
        ]),
        vec![
            "#0.0.0.0 google.com # blocked for focus",
            "#0.0.0.0 example.com # 1.1.1.1 2.2.2.2",
            "#0.0.0.0 github.com # not-an-ip",
        ]
    );
}

#[test]
fn open_entries_are_left_alone() {
    let result = Reconciler::default()
        .unblock(DOMAINS, &lines(&["1.1.1.1 google.com # 0.0.0.0"]), &at(12, 0))
        .unwrap();
    assert_eq!(result.lines, vec!["1.1.1.1 google.com # 0.0.0.0"]);
    assert_eq!(
        result.changes,
        vec![Change::AlreadyOpen {
            line: 1,
            domain: "google.com".to_string()
        }]
    );
}

#[test]
fn commented_blocked_entry_stays_commented() {
    assert_eq!(unblock(&[" # 0.0.0.0 google.com"]), vec![" # 0.0.0.0 google.com"]);
}

#[test]
fn unknown_domains_are_not_added() {
    let records = ["127.0.0.1 localhost", "", "# Host addresses"];
    assert_eq!(unblock(&records), lines(&records));
}

#[test]
fn aliases_on_one_line_transition_together() {
    let result = Reconciler::default()
        .unblock(&["google"], &lines(&["0.0.0.0 google.com google # 1.1.1.1"]), &at(12, 0))
        .unwrap();
    assert_eq!(result.lines, vec!["1.1.1.1 google.com google"]);
}

#[test]
fn directive_stays_after_restore() {
    assert_eq!(
        unblock(&["0.0.0.0 google.com #freeblock:08-10 # 1.1.1.1"]),
        vec!["1.1.1.1 google.com #freeblock:08-10"]
    );
}

#[test]
fn inside_time_window_fails() {
    let records = lines(&[
        "127.0.0.1 localhost",
        "0.0.0.0 example.com # 93.184.216.34",
        "0.0.0.0 google.com #freeblock:08-17 # 1.1.1.1",
    ]);
    let err = Reconciler::default()
        .unblock(DOMAINS, &records, &at(12, 0))
        .unwrap_err();
    assert_eq!(
        err,
        TimingViolation {
            line: 3,
            domain: "google.com".to_string(),
            window: TimeWindow { start: 8, end: 17 },
            now: at(12, 0),
        }
    );
    assert_eq!(
        err.to_string(),
        "it's 12:00 and line 3 of the hosts file disallows unblocking google.com from 08:00 to 17:00"
    );
}

#[test]
fn window_bounds() {
    let records = lines(&["0.0.0.0 google.com #freeblock:08-17 # 1.1.1.1"]);
    let reconciler = Reconciler::default();

    assert!(reconciler.unblock(DOMAINS, &records, &at(7, 59)).is_ok());
    assert!(reconciler.unblock(DOMAINS, &records, &at(8, 0)).is_err());
    assert!(reconciler.unblock(DOMAINS, &records, &at(16, 59)).is_err());

    let after = reconciler.unblock(DOMAINS, &records, &at(17, 1)).unwrap();
    assert_eq!(after.lines, vec!["1.1.1.1 google.com #freeblock:08-17"]);
}

#[test]
fn single_hour_window_message() {
    let records = lines(&["0.0.0.0 google.com #freeblock:06-07 # 1.1.1.1"]);
    let err = Reconciler::default()
        .unblock(DOMAINS, &records, &at(6, 30))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "it's 06:30 and line 1 of the hosts file disallows unblocking google.com from 06:00 to 07:00"
    );
}

#[test]
fn window_on_open_entry_still_fails() {
    let records = lines(&["1.1.1.1 github.com #freeblock:00-24"]);
    let err = Reconciler::default()
        .unblock(DOMAINS, &records, &at(23, 45))
        .unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(err.domain, "github.com");
}

#[test]
fn malformed_directive_is_ignored() {
    assert_eq!(
        unblock(&["0.0.0.0 google.com #freeblock:08-17-20 # 1.1.1.1"]),
        vec!["1.1.1.1 google.com #freeblock:08-17-20"]
    );
}

#[test]
fn window_on_unrequested_domain_is_ignored() {
    let records = ["0.0.0.0 twitter.com #freeblock:00-24"];
    assert_eq!(unblock(&records), lines(&records));
}
