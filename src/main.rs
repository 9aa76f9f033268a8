use anyhow::Context;
use clap::Parser;
use iss_tracker::config::LogFormat;
use iss_tracker::core::ConfigProvider;
use iss_tracker::utils::{logger, validation::Validate};
use iss_tracker::{api, build_tracker, CliConfig, TomlConfig};
use std::sync::Arc;
use tokio::net::TcpListener;

struct Settings {
    provider: Box<dyn ConfigProvider>,
    log_format: LogFormat,
    verbose: bool,
    /// 設定檔路徑；有值時命令列旗標 (除 --verbose) 不生效
    config_path: Option<String>,
}

fn load_settings(cli: CliConfig) -> iss_tracker::Result<Settings> {
    match cli.config.clone() {
        Some(path) => {
            let file_config = TomlConfig::from_file(&path)?;
            file_config.validate()?;
            Ok(Settings {
                log_format: file_config.log_format(),
                verbose: cli.verbose || file_config.verbose(),
                provider: Box::new(file_config),
                config_path: Some(path),
            })
        }
        None => {
            cli.validate()?;
            Ok(Settings {
                log_format: cli.log_format,
                verbose: cli.verbose,
                provider: Box::new(cli),
                config_path: None,
            })
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入並驗證配置
    let settings = match load_settings(cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    match settings.log_format {
        LogFormat::Compact => logger::init_cli_logger(settings.verbose),
        LogFormat::Json => logger::init_json_logger(settings.verbose),
    }

    tracing::info!("Starting iss-tracker");
    if let Some(path) = &settings.config_path {
        tracing::info!(
            "Settings loaded from {}; command line flags other than --verbose are ignored",
            path
        );
    }
    tracing::debug!("Feed URL: {}", settings.provider.feed_url());

    let tracker = build_tracker(settings.provider.as_ref())
        .context("failed to build the HTTP client")?;
    let app = api::router(Arc::new(tracker));

    let bind_address = settings.provider.bind_address();
    let listener = TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;

    api::serve(listener, app).await?;

    tracing::info!("✅ Server stopped");
    Ok(())
}
