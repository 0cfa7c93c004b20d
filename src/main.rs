use clap::Parser;
use confirmed_drugs::config::LogFormat;
use confirmed_drugs::utils::error::{ErrorSeverity, FilterError};
use confirmed_drugs::utils::{logger, validation::Validate};
use confirmed_drugs::{run_pipeline, CliConfig};

fn report_failure(context: &str, e: &FilterError) -> i32 {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 依錯誤嚴重程度決定退出碼
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Text => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting filter-confirmed-drugs");
    tracing::debug!("CLI config: {:?}", cli);

    let toml = match cli.load_toml().and_then(|toml| {
        if let Some(config) = &toml {
            config.validate()?;
        }
        Ok(toml)
    }) {
        Ok(toml) => toml,
        Err(e) => std::process::exit(report_failure("Configuration validation failed", &e)),
    };

    let config = cli.pipeline_config(toml.as_ref());
    let monitor_enabled = cli.monitor_enabled(toml.as_ref());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    match run_pipeline(config, monitor_enabled, cli.dry_run).await {
        Ok(outcome) => {
            tracing::info!(
                "✅ Filter completed: {} confirmed of {} ingredients",
                outcome.stats.confirmed,
                outcome.stats.total_input
            );
        }
        Err(e) => {
            let exit_code = report_failure("Filter failed", &e);
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}
