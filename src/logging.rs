//! Tracing subscriber setup

use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::config::LoggingConfig;

/// Build the env filter: `RUST_LOG` wins, then the configured level
pub fn filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "portfolio_pulse={},tower_http=info",
            config.level
        ))
    })
}

/// Run `f` with a temporary stderr subscriber at the default level.
///
/// Loading the config happens before [`init`] can know the configured
/// format, so its warnings are routed here instead of being dropped.
pub fn during_startup<T>(f: impl FnOnce() -> T) -> T {
    scoped(filter(&LoggingConfig::default()), std::io::stderr, f)
}

fn scoped<W, T>(filter: EnvFilter, writer: W, f: impl FnOnce() -> T) -> T
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::with_default(subscriber, f)
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init(config: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(filter(config));

    match config.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        "pretty" => registry.with(tracing_subscriber::fmt::layer()).init(),
        other => {
            registry.with(tracing_subscriber::fmt::layer()).init();
            tracing::warn!("Unknown log format {:?}, using pretty", other);
        }
    }
}
