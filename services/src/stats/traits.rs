//! Stats storage trait.

use super::snapshot::StatsSnapshot;
use std::future::Future;

/// Read access to the game records behind the stat tables.
///
/// The tables are small, so implementations hand out a whole
/// [`StatsSnapshot`] and aggregation happens in memory.
pub trait StatsStorage: Clone + Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    fn is_connected(&self) -> impl Future<Output = bool> + Send;

    fn snapshot(&self) -> impl Future<Output = Result<StatsSnapshot, Self::Error>> + Send;
}
