// src/file/snapshot.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage slot holding the last saved growth recommendations.
pub const SNAPSHOT_KEY: &str = "growth_recommendations";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSnapshot {
    pub markup: String,
    pub saved_at: DateTime<Utc>,
}

impl RecommendationSnapshot {
    pub fn capture(markup: String) -> Self {
        Self {
            markup,
            saved_at: Utc::now(),
        }
    }

    pub fn store(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SNAPSHOT_KEY, self);
        storage.flush();
        tracing::info!("Saved recommendations snapshot ({} bytes)", self.markup.len());
    }

    pub fn load(storage: &dyn eframe::Storage) -> Option<Self> {
        eframe::get_value(storage, SNAPSHOT_KEY)
    }
}
