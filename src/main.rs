use clap::Parser;
use huge_json::utils::logger;
use huge_json::{CliConfig, GeneratorConfig, GeneratorEngine, LocalStorage};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting huge-json");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = GeneratorEngine::new_with_monitoring(
        LocalStorage::new(),
        GeneratorConfig::from(&config),
        config.monitor,
    );

    // 錯誤已由 engine 記錄，這裡只決定退出碼
    if let Err(e) = engine.run().await {
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}
