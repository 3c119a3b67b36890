use crate::config::toml_config::{CatalogConfig, CatalogSourceKind};
use crate::domain::model::{CatalogResource, Difficulty, LearningStyle};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{EduError, Result};
use crate::utils::validation;
use reqwest::Client;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

pub fn parse_json_catalog(bytes: &[u8]) -> Result<Vec<CatalogResource>> {
    let resources: Vec<CatalogResource> = serde_json::from_slice(bytes)?;
    check_catalog(resources)
}

// CSV 的 tags 欄位以分號分隔
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    title: String,
    description: String,
    subject: String,
    difficulty: Difficulty,
    estimated_time: u32,
    learning_style: String,
    #[serde(default)]
    tags: String,
}

impl From<CsvRow> for CatalogResource {
    fn from(row: CsvRow) -> Self {
        Self {
            title: row.title,
            description: row.description,
            subject: row.subject,
            difficulty: row.difficulty,
            estimated_time: row.estimated_time,
            learning_style: LearningStyle::from(row.learning_style),
            tags: row
                .tags
                .split(';')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

pub fn parse_csv_catalog(bytes: &[u8]) -> Result<Vec<CatalogResource>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut resources = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        resources.push(row?.into());
    }
    check_catalog(resources)
}

fn check_catalog(resources: Vec<CatalogResource>) -> Result<Vec<CatalogResource>> {
    if let Some(index) = resources.iter().position(|r| r.title.trim().is_empty()) {
        return Err(EduError::CatalogError {
            message: format!("entry {} has an empty title", index),
        });
    }
    Ok(resources)
}

#[derive(Debug, Clone, Default)]
pub struct BundledCatalog;

impl CatalogSource for BundledCatalog {
    fn describe(&self) -> String {
        "bundled catalog".to_string()
    }

    async fn load_catalog(&self) -> Result<Vec<CatalogResource>> {
        parse_json_catalog(BUNDLED_CATALOG.as_bytes())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    resources: Vec<CatalogResource>,
}

impl InMemoryCatalog {
    pub fn new(resources: Vec<CatalogResource>) -> Self {
        Self { resources }
    }
}

impl CatalogSource for InMemoryCatalog {
    fn describe(&self) -> String {
        format!("in-memory catalog ({} resources)", self.resources.len())
    }

    async fn load_catalog(&self) -> Result<Vec<CatalogResource>> {
        Ok(self.resources.clone())
    }
}

#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_csv(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false)
    }
}

impl CatalogSource for FileCatalog {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn load_catalog(&self) -> Result<Vec<CatalogResource>> {
        tracing::debug!("Reading catalog file: {}", self.path.display());
        let data = tokio::fs::read(&self.path).await?;

        if Self::is_csv(&self.path) {
            parse_csv_catalog(&data)
        } else {
            parse_json_catalog(&data)
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpCatalog {
    url: String,
    client: Client,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl CatalogSource for HttpCatalog {
    fn describe(&self) -> String {
        format!("url {}", self.url)
    }

    async fn load_catalog(&self) -> Result<Vec<CatalogResource>> {
        tracing::debug!("Making catalog request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        tracing::debug!("Catalog response status: {}", response.status());

        let body = response.error_for_status()?.bytes().await?;
        parse_json_catalog(&body)
    }
}

/// Catalog source selected at runtime from configuration.
#[derive(Debug, Clone)]
pub enum AnyCatalog {
    Bundled(BundledCatalog),
    File(FileCatalog),
    Http(HttpCatalog),
    InMemory(InMemoryCatalog),
}

impl AnyCatalog {
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        match config.source {
            CatalogSourceKind::Bundled => Ok(AnyCatalog::Bundled(BundledCatalog)),
            CatalogSourceKind::File => {
                let path = validation::validate_required_field("catalog.path", &config.path)?;
                Ok(AnyCatalog::File(FileCatalog::new(path)))
            }
            CatalogSourceKind::Http => {
                let url = validation::validate_required_field("catalog.url", &config.url)?;
                Ok(AnyCatalog::Http(HttpCatalog::new(url.clone(), config.timeout())?))
            }
        }
    }
}

impl CatalogSource for AnyCatalog {
    fn describe(&self) -> String {
        match self {
            AnyCatalog::Bundled(c) => c.describe(),
            AnyCatalog::File(c) => c.describe(),
            AnyCatalog::Http(c) => c.describe(),
            AnyCatalog::InMemory(c) => c.describe(),
        }
    }

    async fn load_catalog(&self) -> Result<Vec<CatalogResource>> {
        match self {
            AnyCatalog::Bundled(c) => c.load_catalog().await,
            AnyCatalog::File(c) => c.load_catalog().await,
            AnyCatalog::Http(c) => c.load_catalog().await,
            AnyCatalog::InMemory(c) => c.load_catalog().await,
        }
    }
}
