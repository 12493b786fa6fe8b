mod cli;

use clap::Parser;
use cli::Cli;
use kanban_core::AppConfig;
use kanban_domain::BoardController;
use kanban_persistence::{FileStore, KeyValueStore, MemoryStore, StorageGateway, STORAGE_KEY};
use kanban_tui::{components::Banner, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("KANBAN_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let key = config.effective_storage_key(STORAGE_KEY).to_string();

    if cli.ephemeral {
        tracing::info!("Ephemeral session, nothing will be saved");
        let gateway = StorageGateway::with_key(MemoryStore::new(), key);
        let banner = Banner::info("Ephemeral session: changes are not saved");
        return run(gateway, &cli, &config, Some(banner)).await;
    }

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.effective_data_dir());
    let store = FileStore::new(&data_dir);
    tracing::info!("Using data directory {}", store.dir().display());

    let gateway = StorageGateway::with_key(store, key);
    run(gateway, &cli, &config, None).await
}

async fn run<S: KeyValueStore>(
    gateway: StorageGateway<S>,
    cli: &Cli,
    config: &AppConfig,
    banner: Option<Banner>,
) -> anyhow::Result<()> {
    let controller = BoardController::load(gateway).await;

    if cli.print {
        println!("{}", serde_json::to_string_pretty(controller.board())?);
        return Ok(());
    }

    let mut app = App::new(controller).with_banner_ttl(config.banner_ttl());
    if let Some(banner) = banner {
        app.show_banner(banner);
    }
    app.run().await?;
    Ok(())
}
