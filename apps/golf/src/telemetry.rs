use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,sea_orm=warn,sqlx=warn";

/// Install a JSON subscriber filtered by `RUST_LOG`, else [`DEFAULT_FILTER`].
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_FILTER);
}

/// Like [`init_tracing`] with a caller-chosen fallback filter.
///
/// `RUST_LOG` still wins when set. Returns quietly if a global subscriber is
/// already installed.
pub fn init_tracing_with_default(default_filter: &str) {
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(
            fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .with_thread_ids(false)
                .with_ansi(false)
                .json(),
        )
        .try_init()
        .ok();
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}
