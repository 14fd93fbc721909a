//! Tracing subscriber setup for hosts and demos.
//!
//! Widgets only emit `tracing` events. Hosts that want to see them call
//! [`init_tracing`] once at startup; calling it again is harmless.

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "error,rangeseek_components=info";

/// Installs a fmt subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_FILTER);
}

/// Installs a fmt subscriber, falling back to `fallback` when `RUST_LOG` is
/// unset or cannot be parsed.
pub fn init_tracing_with(fallback: &str) {
    #[cfg(target_os = "android")]
    {
        let _ = fallback;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_max_level(tracing::Level::INFO)
            .try_init();
    }

    #[cfg(not(target_os = "android"))]
    {
        let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => match tracing_subscriber::EnvFilter::try_new(fallback) {
                Ok(filter) => filter,
                Err(_) => tracing_subscriber::EnvFilter::new("error"),
            },
        };

        let _ = tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    }
}
