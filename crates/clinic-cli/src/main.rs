//! Clinic bootstrap binary.
//!
//! Loads configuration, initializes structured logging, opens the database
//! pool, applies pending migrations, and prints the stored appointments as
//! JSON.
//!
//! Usage: `clinic-cli [CONFIG_PATH] [CLIENT_ID]`. With a client id, only that
//! client's appointments are printed, followed by the client's
//! appointment/pet relationship.

mod config;

use clinic_appointments::{AppointmentError, AppointmentStore};
use clinic_types::ClientId;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("CLINIC_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

fn resolve_client_id() -> Option<ClientId> {
    let raw = std::env::args().nth(2)?;
    match raw.trim().parse() {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::warn!(value = %raw, "ignoring client id argument that is not an integer");
            None
        }
    }
}

/// Collects the listing (and, for a single client, the relationship view)
/// into one JSON document.
fn report(store: &AppointmentStore, client_id: Option<ClientId>) -> Result<Value, AppointmentError> {
    match client_id {
        Some(client_id) => {
            let appointments = store.list_for_client(client_id)?;
            let relationship = store.get_appt_client_pet(client_id)?;
            Ok(json!({
                "client_id": client_id,
                "appointments": appointments,
                "relationship": relationship,
            }))
        }
        None => Ok(json!({ "appointments": store.list()? })),
    }
}

fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration, check the config file syntax");

    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    let pool = clinic_db::create_pool(&config.database.path, config.database.runtime_settings())
        .expect("failed to create database pool, check database.path in config");

    {
        let conn = pool
            .get()
            .expect("failed to get database connection for migrations");
        let applied = clinic_db::run_migrations(&conn).expect("failed to run database migrations");
        if applied > 0 {
            tracing::info!(count = applied, "applied database migrations");
        }
    }

    let store = AppointmentStore::new(pool);
    match report(&store, resolve_client_id()) {
        Ok(value) => println!("{value:#}"),
        Err(e) => {
            tracing::error!(error = %e, "failed to read appointments");
            std::process::exit(1);
        }
    }
}
