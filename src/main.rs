use clap::Parser;
use health_tracker::server::{self, state::AppState};
use health_tracker::utils::error::ErrorSeverity;
use health_tracker::utils::{logger, validation::Validate};
use health_tracker::CliConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 載入配置
    let config = match cli.load_server_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger(config.logging.verbose);
    } else {
        logger::init_cli_logger(config.logging.verbose);
    }

    tracing::info!("Starting health-tracker server");
    if cli.config_file_exists() {
        tracing::info!("📁 Configuration loaded from: {}", cli.config);
    } else {
        tracing::info!("📁 No config file at '{}', using defaults and environment", cli.config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if cli.check {
        let state = AppState::from_config(&config).await?;
        let names = state.symptoms.list_symptom_names().await?;
        tracing::info!("✅ Configuration valid, catalog has {} symptoms", names.len());
        println!("✅ Configuration valid, catalog has {} symptoms", names.len());
        return Ok(());
    }

    if let Err(e) = server::start_server(&config).await {
        tracing::error!(
            "❌ Server failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}
