//! driftfield backdrop window.
//!
//! Usage: `driftfield [config.json]`
//!
//! Without a config file (or if it cannot be read) the default field is
//! shown. Set `RUST_LOG` to adjust logging, e.g. `RUST_LOG=driftfield=debug`.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use driftfield::{Backdrop, FieldConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wgpu=warn,naga=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match env::args().nth(1).map(PathBuf::from) {
        Some(path) => match FieldConfig::load(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {:?}: {}", path, e);
                tracing::warn!("Using default configuration.");
                FieldConfig::default()
            }
        },
        None => FieldConfig::default(),
    };

    match Backdrop::new().with_config(config).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
