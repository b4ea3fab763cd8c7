use std::io;

use mockall::predicate::eq;
use pipedash_core::DashboardError;
use pipedash_core::common::ErrorKind;
use pipedash_core::link::{Command, CommandDispatcher, Reply, Request};

use crate::common::builder::SnapshotBuilder;
use crate::common::mocks::{FakeSimulator, MockLink};

#[test]
fn test_ack_resolves() {
    let mut link = MockLink::new();
    link.expect_exchange()
        .with(eq(Request::Advance))
        .times(1)
        .returning(|_| Ok(Reply::Ack));

    CommandDispatcher::new(&mut link).dispatch(&Command::Advance).unwrap();
}

#[test]
fn test_load_sends_program_text() {
    let mut link = MockLink::new();
    link.expect_exchange()
        .with(eq(Request::Load {
            program: "hlt".into(),
        }))
        .times(1)
        .returning(|_| Ok(Reply::Ack));

    CommandDispatcher::new(&mut link)
        .dispatch(&Command::Load("hlt".into()))
        .unwrap();
}

#[test]
fn test_simulator_error_is_reported() {
    let mut link = MockLink::new();
    link.expect_exchange().times(1).returning(|_| {
        Ok(Reply::Error {
            message: "line 1: cannot assemble".into(),
        })
    });

    let err = CommandDispatcher::new(&mut link)
        .dispatch(&Command::Load("???".into()))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Simulator);
    assert!(err.to_string().contains("cannot assemble"));
}

#[test]
fn test_state_reply_is_shape_error() {
    let mut link = MockLink::new();
    link.expect_exchange().times(1).returning(|_| {
        Ok(Reply::State {
            snapshot: Box::new(SnapshotBuilder::new().build()),
        })
    });

    let err = CommandDispatcher::new(&mut link)
        .dispatch(&Command::Reset)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
}

#[test]
fn test_transport_failure_is_not_retried() {
    let mut link = MockLink::new();
    link.expect_exchange().times(1).returning(|_| {
        Err(DashboardError::transport(
            "request send",
            io::Error::from(io::ErrorKind::ConnectionRefused),
        ))
    });

    let err = CommandDispatcher::new(&mut link)
        .dispatch(&Command::Run)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[test]
fn test_advance_moves_fake_simulator_one_cycle() {
    let mut sim = FakeSimulator::new();
    CommandDispatcher::new(&mut sim).dispatch(&Command::Advance).unwrap();
    assert_eq!(sim.cycles(), 1);
    assert_eq!(sim.commands(), vec![Request::Advance]);
}
