use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static SUBSCRIBER_INIT: std::sync::Once = std::sync::Once::new();

/// Configure and initialize logging for the simulation.
///
/// Safe to call more than once; only the first call installs the subscriber.
pub fn setup_logging() {
    SUBSCRIBER_INIT.call_once(|| {
        // Allow RUST_LOG to override levels; default to info for our crate and warn elsewhere
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("warn,{name}=info", name = env!("CARGO_CRATE_NAME"))));

        let result = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .with(ErrorLayer::default())
            .try_init();

        if let Err(error) = result {
            // Another subscriber was installed first (e.g. by a test harness); keep it.
            eprintln!("logging already initialized: {error}");
        }
    });
}
