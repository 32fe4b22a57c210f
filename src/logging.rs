use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Install the global subscriber. RUST_LOG takes precedence over `log_level`.
///
/// Calling this again after a subscriber is set is a no-op.
pub fn init_tracing(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // Logs go to stderr so stdout only carries the session report
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    if let Err(e) = Registry::default().with(env_filter).with(stderr_layer).try_init() {
        let msg = e.to_string();
        if !msg.contains("already been set") {
            eprintln!("Failed to initialize tracing: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tracing("info");
        init_tracing("debug");
    }
}
