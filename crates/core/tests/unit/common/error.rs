use std::io;

use pipedash_core::DashboardError;
use pipedash_core::Phase;
use pipedash_core::common::ErrorKind;
use rstest::rstest;

fn transport() -> DashboardError {
    DashboardError::transport("request send", io::Error::from(io::ErrorKind::BrokenPipe))
}

#[rstest]
#[case::transport(transport(), ErrorKind::Transport, true)]
#[case::simulator(DashboardError::Simulator("bad opcode".into()), ErrorKind::Simulator, false)]
#[case::shape(DashboardError::Shape("short".into()), ErrorKind::Shape, false)]
#[case::queue_full(DashboardError::QueueFull(8), ErrorKind::Coordination, false)]
#[case::transition(
    DashboardError::InvalidTransition { from: Phase::Idle, to: Phase::Rendering },
    ErrorKind::Coordination,
    false
)]
#[case::config(DashboardError::Config("x".into()), ErrorKind::Config, false)]
fn test_kind_and_retry_policy(
    #[case] error: DashboardError,
    #[case] kind: ErrorKind,
    #[case] retryable: bool,
) {
    assert_eq!(error.kind(), kind);
    assert_eq!(error.is_retryable(), retryable);
}

#[test]
fn test_transport_message_names_context() {
    let msg = transport().to_string();
    assert!(msg.starts_with("transport failure during request send"), "{msg}");
}

#[test]
fn test_transition_message_uses_phase_names() {
    let err = DashboardError::InvalidTransition {
        from: Phase::Idle,
        to: Phase::Rendering,
    };
    assert_eq!(err.to_string(), "illegal coordinator transition idle -> rendering");
}

#[test]
fn test_json_syntax_error_is_shape() {
    let err: DashboardError = serde_json::from_str::<u32>("{not json").unwrap_err().into();
    assert_eq!(err.kind(), ErrorKind::Shape);
}

#[test]
fn test_json_eof_is_transport() {
    let err: DashboardError = serde_json::from_str::<Vec<u32>>("[1, 2").unwrap_err().into();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.is_retryable());
}

#[test]
fn test_json_data_error_is_shape() {
    let err: DashboardError = serde_json::from_str::<u32>("\"seven\"").unwrap_err().into();
    assert_eq!(err.kind(), ErrorKind::Shape);
}
