use anyhow::Context;
use clap::Parser;
use docsplice::core::{merge, ConfigProvider};
use docsplice::utils::{logger, validation::Validate};
use docsplice::{LocalStorage, SpliceEngine, SplicePipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-splice")]
#[command(about = "Doc splice tool with TOML job configuration")]
struct Args {
    /// Path to TOML job configuration file
    #[arg(short, long, default_value = "docsplice.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON logs (for CI log collectors)
    #[arg(long)]
    log_json: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override check mode from config
    #[arg(long)]
    check: Option<bool>,

    /// Dry run - show what would be merged without touching the target
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_ci_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based doc splice tool");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(check) = args.check {
        config.set_check(check);
        tracing::info!("🔧 Check mode overridden to: {}", check);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和管道
    let storage = LocalStorage::new(".".to_string());
    let check_only = config.check_only();
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Job: {}", config.job.name);
    if let Some(description) = &config.job.description {
        println!("  Description: {}", description);
    }
    println!("  Fragments: {} files", config.fragment_files().len());
    println!("  Target: {}", config.target_file());
    println!(
        "  Declaration: const {}={{...}};",
        config.declaration_name()
    );
    println!("  End anchor: {}", config.end_anchor());

    if config.check_only() {
        println!("  🔎 CHECK MODE (no write)");
    }

    if let Some(report) = config.report_json() {
        println!("  Report: {}", report);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    println!("🔍 Dry Run Analysis:");
    println!();

    // 片段分析
    println!("📄 Fragment Analysis:");
    let mut total_entries = 0usize;
    for path in config.fragment_files() {
        match std::fs::read_to_string(path) {
            Ok(text) => match merge::extract_payload(&text) {
                Some(payload) => {
                    let entries = merge::count_entries(&payload);
                    total_entries += entries;
                    println!("  {}: {} entries ({} bytes)", path, entries, payload.len());
                }
                None => println!("  {}: ⚠️ no brace-delimited payload", path),
            },
            Err(e) => println!("  {}: ⚠️ unreadable ({})", path, e),
        }
    }
    println!("  Total entries: {}", total_entries);

    // 目標文件分析
    println!();
    println!("🎯 Target Analysis:");
    let document = std::fs::read_to_string(config.target_file())
        .with_context(|| format!("read target `{}`", config.target_file()))?;
    let marker = merge::start_marker(config.declaration_name());
    println!(
        "  Start marker `{}`: {}",
        marker,
        if document.contains(&marker) {
            "found"
        } else {
            "❌ MISSING"
        }
    );
    let anchor_count = document.matches(config.end_anchor()).count();
    println!(
        "  End anchor `{}`: {} occurrence(s)",
        config.end_anchor(),
        anchor_count
    );

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
