use anyhow::Result;
use std::net::{IpAddr, SocketAddr};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use prompt_image_relay::{build_app, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("prompt_image_relay=debug,tower_http=debug")),
        )
        .init();

    let mut config = load_config()?;
    config.apply_env_fallbacks();
    config.validate()?;

    let app_state = AppState::new(config.clone())?;
    app_state.image_store.ensure_dir()?;
    info!(
        "Translator: {}, image generator: {}, output dir: {}",
        app_state.translator.name(),
        app_state.image_generator.name(),
        app_state.image_store.output_dir().display()
    );

    let app = build_app(app_state);

    let host: IpAddr = config.system.host.parse()?;
    let addr = SocketAddr::new(host, config.system.port);
    info!("Starting server on {} (debug={})", addr, config.system.debug);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Try `$CONFIG_PATH`, then `conf.yaml`/`conf.json` in the working directory and
/// next to the executable; fall back to built-in defaults.
fn load_config() -> Result<Config> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));

    if let Ok(path) = std::env::var("CONFIG_PATH") {
        // An explicit path must load
        return Config::load(&path);
    }

    let mut candidates = vec!["conf.yaml".to_string(), "conf.json".to_string()];
    if let Some(dir) = exe_dir {
        for name in ["conf.yaml", "conf.json"] {
            if let Some(p) = dir.join(name).to_str() {
                candidates.push(p.to_string());
            }
        }
    }

    for path in &candidates {
        if std::path::Path::new(path).exists() {
            let config = Config::load(path)?;
            info!("Loaded configuration from: {}", path);
            return Ok(config);
        }
        debug!("No config at {}", path);
    }

    warn!("No config file found (tried {:?}); using defaults", candidates);
    Ok(Config::default())
}
