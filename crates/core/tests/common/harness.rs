use std::sync::Once;

use pipedash_core::config::DashboardConfig;
use pipedash_core::link::Command;
use pipedash_core::{Action, ViewCoordinator};

use crate::common::mocks::{FakeSimulator, RecordingSink};

static TRACING: Once = Once::new();

/// Routes library logs to the test writer; `RUST_LOG` selects the level.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A coordinator wired to the in-process fake simulator.
pub struct TestContext {
    pub coordinator: ViewCoordinator<FakeSimulator, RecordingSink>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(DashboardConfig::default())
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        init_tracing();
        Self {
            coordinator: ViewCoordinator::new(FakeSimulator::new(), RecordingSink::default(), config),
        }
    }

    pub fn sim(&self) -> &FakeSimulator {
        self.coordinator.link()
    }

    pub fn sim_mut(&mut self) -> &mut FakeSimulator {
        self.coordinator.link_mut()
    }

    pub fn sink(&self) -> &RecordingSink {
        self.coordinator.sink()
    }

    /// Performs a command and panics if the refresh fails.
    pub fn command(&mut self, command: Command) -> &mut Self {
        self.coordinator
            .perform(Action::Command(command))
            .expect("refresh failed");
        self
    }

    pub fn load(&mut self, program: &str) -> &mut Self {
        self.command(Command::Load(program.to_string()))
    }
}
