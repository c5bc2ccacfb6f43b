use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber for hosts embedding the generator.
///
/// `RUST_LOG` wins when set; otherwise this crate logs at `rust_log`. A
/// subscriber that is already installed is left in place.
pub fn init_tracing(rust_log: &str) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
