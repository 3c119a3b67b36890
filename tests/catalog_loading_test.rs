use anyhow::Result;
use eduvision::config::CatalogSourceKind;
use eduvision::utils::validation::Validate;
use eduvision::{
    AnyCatalog, AppConfig, CatalogSource, ContentRecommender, Difficulty, EduError, EduVisionApp,
    FileCatalog, HtmlRenderer, HttpCatalog, LearningStyle, Recommender,
};
use httpmock::prelude::*;
use std::collections::HashMap;
use std::time::Duration;
use tempfile::TempDir;

const CSV_CATALOG: &str = "title,description,subject,difficulty,estimatedTime,learningStyle,tags
Rust Basics,Ownership and borrowing,Programming,beginner,45,visual,rust;systems
Async Rust,Futures and executors,Programming,Advanced,90,theoretical,rust;async
Pottery,Shape clay by hand,Arts,beginner,60,kinesthetic,crafts
";

fn json_catalog() -> serde_json::Value {
    serde_json::json!([
        {
            "title": "Rust Basics",
            "description": "Ownership and borrowing",
            "subject": "Programming",
            "difficulty": "beginner",
            "estimatedTime": 45,
            "learningStyle": "visual",
            "tags": ["rust"]
        },
        {
            "title": "Rust Audio Course",
            "description": "Listen on the go",
            "subject": "Programming",
            "difficulty": "Beginner",
            "estimatedTime": 30,
            "learningStyle": "auditory"
        }
    ])
}

#[tokio::test]
async fn test_file_catalog_reads_csv_and_json() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let csv_path = temp_dir.path().join("catalog.csv");
    tokio::fs::write(&csv_path, CSV_CATALOG).await?;
    let csv_resources = FileCatalog::new(&csv_path).load_catalog().await?;
    assert_eq!(csv_resources.len(), 3);
    assert_eq!(csv_resources[1].tags, vec!["rust", "async"]);
    assert_eq!(csv_resources[1].difficulty, Difficulty::Advanced);

    let json_path = temp_dir.path().join("catalog.json");
    tokio::fs::write(&json_path, serde_json::to_vec(&json_catalog())?).await?;
    let json_resources = FileCatalog::new(&json_path).load_catalog().await?;
    assert_eq!(json_resources.len(), 2);
    assert_eq!(
        json_resources[1].learning_style,
        LearningStyle::Other("auditory".to_string())
    );
    assert!(json_resources[1].tags.is_empty());
    assert_eq!(json_resources[1].difficulty, Difficulty::Beginner);
    Ok(())
}

#[tokio::test]
async fn test_missing_catalog_file_fails_initialization() {
    let config = AppConfig::default();
    let recommender = ContentRecommender::new(
        FileCatalog::new("/definitely/not/here/catalog.json"),
        config.recommender.clone(),
    );

    let result = EduVisionApp::initialize(recommender, HtmlRenderer::default(), &config).await;
    assert!(matches!(result, Err(EduError::IoError(_))));
}

#[tokio::test]
async fn test_http_catalog_feeds_recommender() -> Result<()> {
    let server = MockServer::start();
    let catalog_mock = server.mock(|when, then| {
        when.method(GET).path("/catalog.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json_catalog());
    });

    let catalog = HttpCatalog::new(server.url("/catalog.json"), Duration::from_secs(5))?;
    let mut recommender = ContentRecommender::new(catalog, Default::default());
    recommender.load_data().await?;
    catalog_mock.assert();

    let prefs = eduvision::UserPreferences {
        interests: vec!["rust".to_string()],
        difficulty: eduvision::Difficulty::Beginner,
        learning_style: LearningStyle::Visual,
        available_time: 60,
    };
    let result = recommender.generate_learning_sequence(&prefs);

    assert_eq!(result.learning_path()[0].title, "Rust Basics");
    assert_eq!(result.resources_count(), 1);
    assert_eq!(result.total_estimated_time(), 45);
    Ok(())
}

#[tokio::test]
async fn test_http_catalog_server_error() -> Result<()> {
    let server = MockServer::start();
    let catalog_mock = server.mock(|when, then| {
        when.method(GET).path("/broken");
        then.status(500);
    });

    let catalog = HttpCatalog::new(server.url("/broken"), Duration::from_secs(5))?;
    let err = catalog.load_catalog().await.unwrap_err();

    catalog_mock.assert();
    assert!(matches!(err, EduError::HttpError(_)));
    assert_eq!(err.severity(), eduvision::utils::error::ErrorSeverity::Medium);
    Ok(())
}

#[tokio::test]
async fn test_toml_config_drives_end_to_end_flow() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let csv_path = temp_dir.path().join("courses.csv");
    tokio::fs::write(&csv_path, CSV_CATALOG).await?;

    let config_content = format!(
        r#"
[catalog]
source = "file"
path = "{}"

[recommender]
max_resources = 2

[display]
min_loading_ms = 0
time_reference_minutes = 90
"#,
        csv_path.to_str().unwrap().replace('\\', "/")
    );
    let config_path = temp_dir.path().join("eduvision.toml");
    tokio::fs::write(&config_path, config_content).await?;

    let config = AppConfig::from_file(&config_path)?;
    config.validate()?;
    assert_eq!(config.catalog.source, CatalogSourceKind::File);

    let catalog = AnyCatalog::from_config(&config.catalog)?;
    let recommender = ContentRecommender::new(catalog, config.recommender.clone());
    let app = EduVisionApp::initialize(recommender, HtmlRenderer::from_config(&config), &config).await?;

    let form: HashMap<&str, &str> = HashMap::from([
        ("interests", "rust"),
        ("difficulty", "beginner"),
        ("learningStyle", "visual"),
        ("availableTime", "200"),
    ]);
    let outcome = app.handle_submit(&form).await?;
    let result = outcome.result().expect("rendered");

    assert_eq!(result.resources_count(), 2);
    assert_eq!(result.learning_path()[0].title, "Rust Basics");
    assert_eq!(result.total_estimated_time(), 135);

    // 135 / 90 分鐘超過基準，進度條封頂
    let html = app.panel_snapshot().html().to_string();
    assert!(html.contains("style=\"width: 100%\""));
    Ok(())
}
