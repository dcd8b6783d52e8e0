use clap::Parser;
use docsplice::utils::{logger, validation::Validate};
use docsplice::{CliConfig, LocalStorage, SpliceEngine, SplicePipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting docsplice CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和管道
    let storage = LocalStorage::new(".".to_string());
    let check_only = config.check;
    let pipeline = SplicePipeline::new(storage, config);

    // 創建引擎並運行
    let engine = SpliceEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(target_path) => {
            if check_only {
                tracing::info!("✅ Target document is up to date");
                println!("✅ Target document is up to date: {}", target_path);
            } else {
                tracing::info!("✅ Splice completed successfully!");
                tracing::info!("📁 Target updated: {}", target_path);
                println!("✅ Splice completed successfully!");
                println!("📁 Target updated: {}", target_path);
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Splice failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                docsplice::utils::error::ErrorSeverity::Low => 0,
                docsplice::utils::error::ErrorSeverity::Medium => 2,
                docsplice::utils::error::ErrorSeverity::High => 1,
                docsplice::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
