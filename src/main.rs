mod config;
mod errors;
mod files;
mod logging;
mod manager;
mod mcp;
mod security;
mod server;
mod session;
mod tools;


use crate::config::{Config, ConfigSource};
use crate::manager::FileManager;
use crate::security::AllowListOracle;
use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut config_path = PathBuf::from("fileward.toml");
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                if i >= args.len() { eprintln!("--config requires a path"); std::process::exit(2); }
                config_path = PathBuf::from(&args[i]);
            }
            _ => {}
        }
        i += 1;
    }

    let (cfg, origin) = Config::load_or_init(&config_path).context("loading config")?;
    logging::init(&cfg.logging.level);
    if origin == ConfigSource::Initialized {
        info!(path = %config_path.display(), "wrote default config");
    }
    cfg.validate().context("validating config")?;

    let oracle = Arc::new(AllowListOracle::from_config(&cfg));
    let manager = FileManager::from_config(&cfg, oracle).context("resolving root_dir")?;
    let root = manager.root().to_path_buf();
    let addr = format!("{}:{}", cfg.server.bind_addr, cfg.server.port);
    let state = server::AppState::new(cfg, manager);

    info!(
        addr = %addr,
        root = %root.display(),
        base_path = %state.cfg.server.base_path,
        tools = ?state.registry.list_names(),
        "fileward ready"
    );

    server::serve(state).await
}
