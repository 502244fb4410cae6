use std::io::IsTerminal;
use std::sync::OnceLock;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Install the global fmt subscriber once per process
///
/// Filtering follows `RUST_LOG` and falls back to `info`. Repeated calls are
/// no-ops; if another subscriber is already installed it stays in place and
/// the refusal is logged at debug level through it.
pub fn init_tracing() {
    if INITIALISED.set(()).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    // An embedding binary may already have installed its own subscriber
    if let Err(err) = Registry::default().with(filter).with(fmt_layer).try_init() {
        tracing::debug!("keeping existing tracing subscriber: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_keeps_existing_subscriber() {
        // Installs a global default first; init must then not panic
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        init_tracing();
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing();
        init_tracing();
        tracing::info!("tracing initialised twice without panicking");
    }
}
