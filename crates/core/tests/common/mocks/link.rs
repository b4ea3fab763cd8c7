use mockall::mock;
use pipedash_core::Result;
use pipedash_core::link::{Reply, Request, SimulatorLink};

mock! {
    pub Link {}
    impl SimulatorLink for Link {
        fn exchange(&mut self, request: &Request) -> Result<Reply>;
    }
}
