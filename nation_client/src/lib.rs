pub mod encode;
pub mod format;
pub mod remote;
pub mod store;
pub mod sync;

pub use remote::{ClientError, HttpSimulationApi, SimulationApi, SERVICE_UNAVAILABLE};
pub use store::{SyncEvent, ViewStore};
pub use sync::{Synchronizer, DEFAULT_POLL_INTERVAL};
