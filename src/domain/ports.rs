use crate::domain::model::{CatalogResource, LearningPathResult, UserPreferences};
use crate::utils::error::{EduError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Read access to form inputs by element id.
pub trait FormFields {
    fn field_value(&self, id: &str) -> Option<String>;
}

impl FormFields for HashMap<String, String> {
    fn field_value(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

impl FormFields for HashMap<&str, &str> {
    fn field_value(&self, id: &str) -> Option<String> {
        self.get(id).map(|v| v.to_string())
    }
}

pub trait CatalogSource: Send + Sync {
    fn describe(&self) -> String;
    fn load_catalog(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<CatalogResource>>> + Send;
}

/// Maps a preference profile to a ranked learning path.
///
/// `load_data` runs once before the first call to
/// `generate_learning_sequence`, which never fails: an empty catalog or a
/// profile nothing matches produces an empty path.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn load_data(&mut self) -> Result<()>;
    fn generate_learning_sequence(&self, preferences: &UserPreferences) -> LearningPathResult;
}

pub trait ResultRenderer: Send + Sync {
    fn render_loading(&self) -> String;
    fn render_results(&self, result: &LearningPathResult) -> String;
    fn render_error(&self, error: &EduError) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn min_loading_duration(&self) -> Duration;
    fn time_reference_minutes(&self) -> u32;
}
