use super::EstimateStore;
use crate::components::departure::TravelEstimate;
use crate::error::BoardResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local estimate slot
#[derive(Debug, Clone, Default)]
pub struct MemoryEstimateStore {
    slot: Arc<RwLock<Option<TravelEstimate>>>,
}

impl MemoryEstimateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EstimateStore for MemoryEstimateStore {
    async fn get(&self) -> BoardResult<Option<TravelEstimate>> {
        Ok(self.slot.read().await.clone())
    }

    async fn set(&self, estimate: TravelEstimate) -> BoardResult<()> {
        *self.slot.write().await = Some(estimate);
        Ok(())
    }

    async fn clear(&self) -> BoardResult<()> {
        *self.slot.write().await = None;
        Ok(())
    }
}
