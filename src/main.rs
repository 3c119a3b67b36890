use clap::Parser;
use eduvision::utils::error::ErrorSeverity;
use eduvision::utils::{logger, validation::Validate};
use eduvision::{
    AnyCatalog, AppConfig, CliConfig, ContentRecommender, EduError, EduVisionApp, HtmlRenderer,
    OutputFormat, SubmissionOutcome,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting eduvision");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Recommendation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> Result<(), EduError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AppConfig::from_file(path)?
        }
        None => AppConfig::default(),
    };

    // 應用命令列覆蓋設定
    cli.apply_overrides(&mut config);
    config.validate()?;

    let catalog = AnyCatalog::from_config(&config.catalog)?;
    let recommender = ContentRecommender::new(catalog, config.recommender.clone());
    let renderer = HtmlRenderer::from_config(&config);

    let app = EduVisionApp::initialize(recommender, renderer, &config).await?;
    let outcome = app.handle_submit(cli).await?;

    let output = match (cli.format, &outcome) {
        (OutputFormat::Json, SubmissionOutcome::Rendered { result, .. }) => {
            serde_json::to_string_pretty(result)?
        }
        (OutputFormat::Page, _) => app.renderer().render_page(&app.panel_snapshot()),
        _ => app.panel_snapshot().html().to_string(),
    };

    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, output).await?;
            tracing::info!("📁 Output saved to: {}", path);
            println!("✅ Learning path saved to: {}", path);
        }
        None => println!("{}", output),
    }

    Ok(())
}
