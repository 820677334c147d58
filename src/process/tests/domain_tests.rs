//! Unit tests for process domain types.

use crate::process::domain::{Process, ProcessDomainError, ProcessId, ProcessName};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("")]
#[case("   ")]
fn blank_process_name_is_rejected(#[case] input: &str) {
    assert_eq!(ProcessName::new(input), Err(ProcessDomainError::EmptyName));
}

#[rstest]
fn process_name_is_trimmed() {
    let name = ProcessName::new("  Purchase approval ").expect("valid name");
    assert_eq!(name.as_str(), "Purchase approval");
}

#[rstest]
fn overlong_process_name_is_rejected() {
    let input = "p".repeat(256);
    assert_eq!(ProcessName::new(input), Err(ProcessDomainError::NameTooLong));
}

#[rstest]
fn blank_description_is_dropped() {
    let name = ProcessName::new("Onboarding").expect("valid name");
    let process = Process::new(name, Some("   ".to_owned()), &DefaultClock);
    assert_eq!(process.description(), None);
}

#[rstest]
fn process_id_round_trips_through_display() {
    let id = ProcessId::new();
    let parsed: ProcessId = id.to_string().parse().expect("valid uuid");
    assert_eq!(parsed, id);
}

#[rstest]
fn malformed_process_id_fails_to_parse() {
    assert!("not-a-uid".parse::<ProcessId>().is_err());
}
