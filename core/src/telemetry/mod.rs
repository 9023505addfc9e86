pub mod log;
pub mod metrics;

pub use self::log::{ActivityEntry, ActivityLog, Severity};
pub use self::metrics::{RouteHealth, SyncMetrics};
