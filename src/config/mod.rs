#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, OutputFormat};
pub use toml_config::{AppConfig, CatalogConfig, CatalogSourceKind, DisplayConfig, RecommenderConfig};
