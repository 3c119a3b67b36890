pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::{AnyCatalog, BundledCatalog, FileCatalog, HttpCatalog, InMemoryCatalog};
pub use config::AppConfig;
pub use crate::core::{
    app::{EduVisionApp, SubmissionOutcome},
    extractor::PreferenceExtractor,
    panel::ResultsPanel,
    recommender::ContentRecommender,
    renderer::HtmlRenderer,
};
pub use domain::model::{
    CatalogResource, Difficulty, LearningPathResult, LearningResource, LearningStyle,
    UserPreferences,
};
pub use domain::ports::{CatalogSource, ConfigProvider, FormFields, Recommender, ResultRenderer};
pub use utils::error::{EduError, Result};
