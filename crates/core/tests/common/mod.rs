
/// Coordinator harness backed by the fake simulator.
pub mod harness;

/// Fake simulator, mocked link, and recording sink.
pub mod mocks;
