//! The single shared travel-estimate slot every widget reads and writes.

mod memory;

pub use memory::MemoryEstimateStore;

use crate::components::departure::TravelEstimate;
use crate::error::BoardResult;
use async_trait::async_trait;

/// Key holding the latest travel-duration display string
pub const ESTIMATE_KEY: &str = "eventETA";

/// Shared slot for the most recent travel estimate.
///
/// Last write wins; there is no versioning. `None` means no lookup has
/// completed yet and must never be read as a zero-minute trip.
#[async_trait]
pub trait EstimateStore: Send + Sync {
    async fn get(&self) -> BoardResult<Option<TravelEstimate>>;

    async fn set(&self, estimate: TravelEstimate) -> BoardResult<()>;

    /// Forget the estimate, e.g. when there is no event today
    async fn clear(&self) -> BoardResult<()>;
}
