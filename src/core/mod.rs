pub mod probe;

pub use probe::{BatchProber, Endpoint, ReachabilityStatus, StatusMap};
