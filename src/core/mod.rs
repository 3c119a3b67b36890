pub mod app;
pub mod extractor;
pub mod panel;
pub mod recommender;
pub mod renderer;

pub use crate::domain::model::{
    CatalogResource, LearningPathResult, LearningResource, UserPreferences,
};
pub use crate::domain::ports::{
    CatalogSource, ConfigProvider, FormFields, Recommender, ResultRenderer,
};
pub use crate::utils::error::Result;
