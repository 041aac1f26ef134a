//! Structured logging setup

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize the global tracing subscriber.
///
/// `level` is the base directive ("info", "debug", ...); `RUST_LOG` style
/// directives layered on top quiet noisy dependencies.
pub fn init_logging(level: &str) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let mut filter = EnvFilter::new(level);

    // Connection-level chatter from the HTTP stack is rarely useful.
    for directive in ["hyper=warn", "reqwest=warn"] {
        match directive.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => tracing::warn!("Failed to parse log directive {}: {}", directive, e),
        }
    }

    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
}
