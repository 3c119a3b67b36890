use crate::config::toml_config::{AppConfig, CatalogConfig};
use crate::domain::model::element_ids;
use crate::domain::ports::FormFields;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markup of the results container only
    Html,
    /// Standalone HTML document
    Page,
    /// The learning path as JSON
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "eduvision")]
#[command(about = "Personalized learning path recommendations")]
pub struct CliConfig {
    /// Comma separated topics, e.g. "python, machine learning"
    #[arg(long, default_value = "")]
    pub interests: String,

    #[arg(long, default_value = "beginner")]
    pub difficulty: String,

    /// visual, kinesthetic or theoretical
    #[arg(long, default_value = "visual")]
    pub learning_style: String,

    /// Time budget in minutes
    #[arg(long, default_value = "120")]
    pub available_time: String,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Catalog location: "bundled", a .json/.csv file or an http(s) URL
    #[arg(long)]
    pub catalog: Option<String>,

    /// Override the minimum loading display time
    #[arg(long)]
    pub min_loading_ms: Option<u64>,

    #[arg(long, value_enum, default_value = "html")]
    pub format: OutputFormat,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// 將命令列參數覆蓋到檔案配置上
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(location) = &self.catalog {
            tracing::info!("🔧 Catalog overridden to: {}", location);
            config.catalog = CatalogConfig::from_location(location);
        }
        if let Some(ms) = self.min_loading_ms {
            config.display.min_loading_ms = ms;
        }
    }
}

// 命令列參數扮演表單欄位
impl FormFields for CliConfig {
    fn field_value(&self, id: &str) -> Option<String> {
        match id {
            element_ids::INTERESTS => Some(self.interests.clone()),
            element_ids::DIFFICULTY => Some(self.difficulty.clone()),
            element_ids::LEARNING_STYLE => Some(self.learning_style.clone()),
            element_ids::AVAILABLE_TIME => Some(self.available_time.clone()),
            _ => None,
        }
    }
}
