use chrono::{DurationRound, NaiveDateTime, TimeDelta, Utc};
use clap::Parser;
use park_reserve::core::ConfigProvider;
use park_reserve::domain::model::BookingRequest;
use park_reserve::utils::error::{BookingError, ErrorSeverity, Result};
use park_reserve::utils::output::{self, SessionReport};
use park_reserve::utils::{logger, validation::Validate};
use park_reserve::{BookingWorkflow, CliConfig, InMemoryBookingService, TomlConfig};

const START_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入 TOML 配置 (如有指定)
    let toml_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => None,
    };

    // 初始化日誌
    if let Some(config) = toml_config.as_ref().filter(|c| c.json_logging()) {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting park-reserve");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match toml_config {
        Some(config) => {
            tracing::info!("📁 Using venue settings from {}", config.venue_name());
            run(&cli, config).await
        }
        None => run(&cli, cli.clone()).await,
    };

    match result {
        Ok(rendered) => {
            print!("{}", rendered);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ park-reserve failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}

async fn run<C>(cli: &CliConfig, config: C) -> Result<String>
where
    C: ConfigProvider + Validate,
{
    cli.validate()?;
    config.validate()?;

    let mut workflow = BookingWorkflow::new(InMemoryBookingService::new(), config);
    let initial = workflow.stats();
    tracing::info!(
        "🅿️ Venue {}: {} slots, {} free ({:.1}% occupied)",
        workflow.venue_id(),
        initial.total_slots,
        initial.free_slots,
        initial.occupancy_rate
    );

    let quote = match &cli.slot {
        Some(number) => Some(workflow.quote_for(number, cli.duration)?),
        None => None,
    };

    let booking = match (&cli.slot, cli.book) {
        (Some(number), true) => {
            let request = BookingRequest {
                venue_id: workflow.venue_id().to_string(),
                slot_number: workflow.slot(number)?.number.clone(),
                start: parse_start(cli.start.as_deref())?,
                duration: cli.duration,
            };
            Some(workflow.confirm(&request).await?)
        }
        _ => None,
    };

    let report = SessionReport {
        venue: workflow.venue_id(),
        slots: workflow.slots(),
        stats: workflow.stats(),
        quote: quote.as_ref(),
        booking: booking.as_ref(),
    };
    output::render(&report, cli.format)
}

/// 未指定開始時間時，使用下一個整點
fn parse_start(value: Option<&str>) -> Result<NaiveDateTime> {
    match value {
        Some(raw) => START_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .ok_or_else(|| BookingError::ValidationError {
                field: "start".to_string(),
                reason: format!("cannot parse '{}', expected YYYY-MM-DDTHH:MM", raw),
            }),
        None => {
            let now = Utc::now().naive_utc();
            let hour = TimeDelta::hours(1);
            now.duration_trunc(hour)
                .map(|truncated| truncated + hour)
                .map_err(|e| BookingError::ValidationError {
                    field: "start".to_string(),
                    reason: e.to_string(),
                })
        }
    }
}
