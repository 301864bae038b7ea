use anyhow::Context;
use clap::Parser;
use domain_cart::app::{render_event, Reply, Session};
use domain_cart::utils::error::{CartError, ErrorSeverity};
use domain_cart::utils::{logger, validation::Validate};
use domain_cart::{CartManager, CliConfig, ConfigProvider, HttpAvailabilityProber, TomlConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting domain-cart");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = TomlConfig::from_file(&path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            run(config).await
        }
        None => run(cli).await,
    }
}

fn exit_code(e: &CartError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

async fn run<C: ConfigProvider + Validate>(config: C) -> anyhow::Result<()> {
    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }

    let prober = HttpAvailabilityProber::from_config(&config)?;
    tracing::info!(
        "✅ Checking availability at {} ({} domains required)",
        prober.endpoint(),
        config.required_domains()
    );

    let manager = CartManager::from_config(prober, &config);
    let mut events = manager.subscribe();
    let session = Session::new(manager);

    // 背景印出可用性檢查結果
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Some(line) = render_event(&event) {
                        println!("{}", line);
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!("Skipped {} cart notifications", missed);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    println!(
        "Build a cart of {} available domains. Type 'help' for commands.",
        config.required_domains()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match session.handle_line(&line).await {
            Reply::Output(text) if text.is_empty() => {}
            Reply::Output(text) => println!("{}", text),
            Reply::Quit => break,
        }
    }

    printer.abort();
    tracing::info!("👋 Leaving with {}", session.manager().summary().await);
    Ok(())
}
