//! Telemetry initialization shared by both binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Telemetry configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to the startup event.
    pub service: &'static str,
    /// Enable JSON logging (for production).
    pub json_logs: bool,
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl TelemetryConfig {
    /// Load configuration from `LOG_FORMAT`.
    ///
    /// The default filter logs the calling crate and this one at debug.
    pub fn from_env(service: &'static str) -> Self {
        Self {
            service,
            json_logs: wants_json(std::env::var("LOG_FORMAT").ok().as_deref()),
            default_filter: default_filter(service),
        }
    }
}

fn wants_json(log_format: Option<&str>) -> bool {
    log_format.is_some_and(|v| v.trim().eq_ignore_ascii_case("json"))
}

fn default_filter(service: &str) -> String {
    format!("info,{}=debug,hitcount_infra=debug", service.replace('-', "_"))
}

/// Initialize the global tracing subscriber.
pub fn init_telemetry(config: &TelemetryConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    tracing::info!(
        service = config.service,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_only_when_asked_for() {
        assert!(wants_json(Some("json")));
        assert!(wants_json(Some(" JSON ")));
        assert!(!wants_json(Some("pretty")));
        assert!(!wants_json(None));
    }

    #[test]
    fn default_filter_uses_crate_target_names() {
        assert_eq!(
            default_filter("counter-api"),
            "info,counter_api=debug,hitcount_infra=debug"
        );
        assert_eq!(default_filter("web"), "info,web=debug,hitcount_infra=debug");
    }
}
