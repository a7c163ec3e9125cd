use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "imobifx=debug,tower_http=debug";
const PRODUCTION_FILTER: &str = "imobifx=info,tower_http=info";

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// `log_format = "json"` emits one JSON object per event; anything else uses the
/// compact console format.
pub fn init_telemetry(log_format: &str, production: bool) -> Result<(), anyhow::Error> {
    let default_filter = if production {
        PRODUCTION_FILTER
    } else {
        DEFAULT_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        let console_fmt = tracing_subscriber::fmt::layer().event_format(
            Format::default()
                .compact()
                .with_target(false)
                .without_time(),
        );
        tracing_subscriber::registry()
            .with(filter)
            .with(console_fmt)
            .try_init()?;
    }

    tracing::debug!(log_format = %log_format, "Tracing initialized");
    Ok(())
}
