use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

/// RUST_LOG 優先，否則只放行本 crate 的指定等級
fn crate_filter(level: &str, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("park_reserve=debug,info")
        } else {
            EnvFilter::new(format!("park_reserve={}", level.to_ascii_lowercase()))
        }
    })
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(crate_filter(DEFAULT_LEVEL, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// JSON 格式，等級取自 TOML 的 [logging] level
pub fn init_json_logger(level: Option<&str>) {
    tracing_subscriber::registry()
        .with(crate_filter(level.unwrap_or(DEFAULT_LEVEL), false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .json()
                .with_current_span(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_filter_uses_configured_level() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert!(crate_filter("WARN", false).to_string().contains("park_reserve=warn"));
        assert!(crate_filter("info", true).to_string().contains("park_reserve=debug"));
    }
}
