use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};

use groupdrive::{Config, FileStorage, GroupStore, WebServer};

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let (config, load_error) = match Config::load_with_env(CONFIG_PATH) {
        Ok(config) => (config, None),
        Err(e) => {
            let mut config = Config::default();
            config.apply_env_overrides();
            (config, Some(e))
        }
    };

    // Initialize logging
    if let Err(e) = groupdrive::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        groupdrive::logging::init_console_only(&config.logging.level);
    }

    if let Some(e) = load_error {
        warn!("Failed to load {CONFIG_PATH}: {e}. Using default configuration.");
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    info!("groupdrive - group file sharing server");

    let storage = match FileStorage::new(&config.storage.uploads_path) {
        Ok(storage) => storage,
        Err(e) => {
            error!(
                "Failed to initialize file storage at {}: {e}",
                config.storage.uploads_path
            );
            return ExitCode::FAILURE;
        }
    };
    info!("File storage initialized at: {}", config.storage.uploads_path);

    let store = Arc::new(
        GroupStore::new(storage).with_max_code_attempts(config.groups.max_code_attempts),
    );

    let server = match WebServer::new(&config.web, &config.storage, store) {
        Ok(server) => server,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
