pub mod link;

pub use link::MockLink;
pub use simulator::FakeSimulator;
pub use sink::RecordingSink;
