use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EduError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CATALOG_EXTENSIONS: &[&str] = &["json", "csv"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub recommender: RecommenderConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSourceKind {
    #[default]
    Bundled,
    File,
    Http,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub source: CatalogSourceKind,
    pub path: Option<String>,
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl CatalogConfig {
    /// 由單一位置字串推斷來源：http(s) 網址、"bundled" 或本地檔案
    pub fn from_location(location: &str) -> Self {
        let location = location.trim();
        if location.eq_ignore_ascii_case("bundled") {
            Self::default()
        } else if location.starts_with("http://") || location.starts_with("https://") {
            Self {
                source: CatalogSourceKind::Http,
                url: Some(location.to_string()),
                ..Self::default()
            }
        } else {
            Self {
                source: CatalogSourceKind::File,
                path: Some(location.to_string()),
                ..Self::default()
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(30))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub max_resources: usize,
    pub min_similarity: f64,
    pub interest_weight: f64,
    pub difficulty_weight: f64,
    pub style_weight: f64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            max_resources: 10,
            min_similarity: 0.1,
            interest_weight: 0.6,
            difficulty_weight: 0.25,
            style_weight: 0.15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub min_loading_ms: u64,
    pub time_reference_minutes: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            min_loading_ms: 1000,
            time_reference_minutes: 240,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EduError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EduError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EduError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        match self.catalog.source {
            CatalogSourceKind::Bundled => {}
            CatalogSourceKind::File => {
                let path = validation::validate_required_field("catalog.path", &self.catalog.path)?;
                validation::validate_path("catalog.path", path)?;
                validation::validate_catalog_extension("catalog.path", path, CATALOG_EXTENSIONS)?;
            }
            CatalogSourceKind::Http => {
                let url = validation::validate_required_field("catalog.url", &self.catalog.url)?;
                validation::validate_url("catalog.url", url)?;
            }
        }

        let rec = &self.recommender;
        validation::validate_positive_number("recommender.max_resources", rec.max_resources, 1)?;
        validation::validate_range("recommender.min_similarity", rec.min_similarity, 0.0, 1.0)?;
        validation::validate_range("recommender.interest_weight", rec.interest_weight, 0.0, 1.0)?;
        validation::validate_range("recommender.difficulty_weight", rec.difficulty_weight, 0.0, 1.0)?;
        validation::validate_range("recommender.style_weight", rec.style_weight, 0.0, 1.0)?;

        let weight_sum = rec.interest_weight + rec.difficulty_weight + rec.style_weight;
        if weight_sum <= 0.0 {
            return Err(EduError::InvalidConfigValueError {
                field: "recommender".to_string(),
                value: weight_sum.to_string(),
                reason: "At least one weight must be greater than zero".to_string(),
            });
        }

        validation::validate_positive_number(
            "display.time_reference_minutes",
            self.display.time_reference_minutes as usize,
            1,
        )?;

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn min_loading_duration(&self) -> Duration {
        Duration::from_millis(self.display.min_loading_ms)
    }

    fn time_reference_minutes(&self) -> u32 {
        self.display.time_reference_minutes
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.catalog.source, CatalogSourceKind::Bundled);
        assert_eq!(config.recommender.max_resources, 10);
        assert_eq!(config.min_loading_duration(), Duration::from_millis(1000));
        assert_eq!(config.time_reference_minutes(), 240);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[catalog]
source = "file"
path = "./data/catalog.csv"

[recommender]
max_resources = 4
min_similarity = 0.25
interest_weight = 0.7
difficulty_weight = 0.2
style_weight = 0.1

[display]
min_loading_ms = 0
time_reference_minutes = 180
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.catalog.source, CatalogSourceKind::File);
        assert_eq!(config.catalog.path.as_deref(), Some("./data/catalog.csv"));
        assert_eq!(config.recommender.max_resources, 4);
        assert_eq!(config.min_loading_duration(), Duration::ZERO);
        assert_eq!(config.time_reference_minutes(), 180);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("EDUVISION_TEST_CATALOG_URL", "https://catalog.example.com/items.json");

        let toml_content = r#"
[catalog]
source = "http"
url = "${EDUVISION_TEST_CATALOG_URL}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.catalog.url.as_deref(),
            Some("https://catalog.example.com/items.json")
        );

        std::env::remove_var("EDUVISION_TEST_CATALOG_URL");
    }

    #[test]
    fn test_config_validation() {
        let missing_path = AppConfig::from_toml_str("[catalog]\nsource = \"file\"\n").unwrap();
        assert!(matches!(
            missing_path.validate(),
            Err(EduError::MissingConfigError { .. })
        ));

        let bad_url = AppConfig::from_toml_str("[catalog]\nsource = \"http\"\nurl = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_weights = AppConfig::from_toml_str(
            "[recommender]\ninterest_weight = 0.0\ndifficulty_weight = 0.0\nstyle_weight = 0.0\n",
        )
        .unwrap();
        assert!(bad_weights.validate().is_err());
    }

    #[test]
    fn test_catalog_location_detection() {
        assert_eq!(CatalogConfig::from_location("bundled").source, CatalogSourceKind::Bundled);
        assert_eq!(
            CatalogConfig::from_location("https://example.com/c.json").source,
            CatalogSourceKind::Http
        );
        let file = CatalogConfig::from_location("courses.csv");
        assert_eq!(file.source, CatalogSourceKind::File);
        assert_eq!(file.path.as_deref(), Some("courses.csv"));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[display]\nmin_loading_ms = 250\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.display.min_loading_ms, 250);
        assert_eq!(config.display.time_reference_minutes, 240);
    }
}
