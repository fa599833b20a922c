use aprs_display_core::{ConfigError, ConfigSource, ConfigStore, EnvConfigSource, FileConfigSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,aprs_display_core=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("APRS display starting...");

    // Configuration: a JSON file when a path is given, the process
    // environment otherwise. Loading happens exactly once, before the
    // network, display, and clock tasks would come up.
    let store = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            load_or_report(&FileConfigSource::new(path))?
        }
        None => {
            tracing::info!("Loading configuration from the process environment");
            load_or_report(&EnvConfigSource::new())?
        }
    };

    if store.is_wifi_configured() {
        tracing::info!("WiFi: will join {:?}", store.wifi_credentials().ssid);
    } else {
        tracing::warn!("WiFi not configured; network join disabled");
    }

    let aprs = store.aprs_identity();
    tracing::info!(
        "APRS: watching {} with filter {:?}",
        aprs.their_call,
        aprs.filter
    );
    if store.is_aprs_uplink_configured() {
        tracing::info!("APRS-IS uplink enabled as {}", aprs.my_call);
    } else {
        tracing::info!("APRS-IS uplink disabled (no passcode)");
    }

    tracing::info!("Clock timezone: {}", store.timezone_location());
    tracing::info!("Configuration valid; ready to hand off to collaborators");

    Ok(())
}

/// Load the configuration, reporting every violation before failing.
///
/// Validation failures are fatal to startup: each violated field is logged
/// so the operator can fix the whole configuration in one pass.
fn load_or_report<S: ConfigSource>(source: &S) -> anyhow::Result<ConfigStore> {
    match ConfigStore::load(source) {
        Ok(store) => Ok(store),
        Err(ConfigError::Invalid(violations)) => {
            for violation in &violations {
                tracing::error!("{}", violation);
            }
            anyhow::bail!("configuration invalid: {} problem(s) found", violations.len())
        }
        Err(e) => Err(e.into()),
    }
}
