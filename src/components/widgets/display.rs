use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Slot names the widget pages expose
pub mod slots {
    pub const EVENT_NAME: &str = "eventNameValue";
    pub const GUEST_COUNT: &str = "guestCountValue";
    pub const END_TIME: &str = "endTimeValue";
    pub const DEPARTURE_TIME: &str = "departureTimeValue";
    pub const ETA: &str = "eta";
    pub const MAP_FRAME: &str = "mapFrame";
    pub const COUNTDOWN: &str = "countdownDisplay";
}

/// The named output slots of one widget page
#[derive(Debug, Clone)]
pub struct DisplayPage {
    name: &'static str,
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl DisplayPage {
    pub fn new(name: &'static str, slot_names: &[&str]) -> Self {
        let slots = slot_names
            .iter()
            .map(|slot| (slot.to_string(), String::new()))
            .collect();
        Self {
            name,
            slots: Arc::new(RwLock::new(slots)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Show text in a slot; slots this page does not have are left alone
    pub async fn write(&self, slot: &str, text: impl Into<String>) {
        let text = text.into();
        let mut slots = self.slots.write().await;
        match slots.get_mut(slot) {
            Some(current) => {
                info!(page = self.name, slot, value = %text, "Display updated");
                *current = text;
            }
            None => debug!(page = self.name, slot, "No such slot on page, skipping"),
        }
    }

    pub async fn read(&self, slot: &str) -> Option<String> {
        self.slots.read().await.get(slot).cloned()
    }

    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.slots.read().await.clone()
    }
}
