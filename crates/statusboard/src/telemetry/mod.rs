use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn default_level() -> Level {
    if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

fn crate_filter(level: Level) -> EnvFilter {
    EnvFilter::new(format!("statusboard={level},statusboard_protocol={level}"))
}

/// Installs the global compact formatter.
///
/// An explicit `level` wins over `RUST_LOG`; without either the build
/// profile decides.
pub fn init_subscriber(level: Option<Level>) {
    let filter = match level {
        Some(level) => crate_filter(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| crate_filter(default_level())),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_level(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
