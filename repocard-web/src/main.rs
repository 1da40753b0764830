//! Repocard Web Server
//!
//! Serves aggregate statistics for public GitHub repositories as PNG cards.

use clap::Parser;
use repocard_core::CardConfig;
use repocard_web::server::CardServerBuilder;
use repocard_web::{init_logging, WebConfig};
use std::path::PathBuf;

/// Repocard - repository statistics as rendered image cards
#[derive(Parser)]
#[command(name = "repocard-web")]
#[command(about = "Serve repository statistics as PNG cards")]
#[command(version)]
struct Args {
    /// Server host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// Enable development mode
    #[arg(long)]
    dev: bool,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for cloned working copies
    #[arg(long)]
    repos_dir: Option<PathBuf>,

    /// Directory for cached stats
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    std::env::set_var(
        "RUST_LOG",
        format!("repocard_web={},tower_http=debug", args.log_level),
    );
    init_logging();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Web configuration: env first, CLI overrides
    let mut config = WebConfig::from_env();
    config.host = args.host;
    config.port = args.port;
    config.dev_mode = args.dev;

    // Service configuration: file if given, defaults otherwise, CLI overrides
    let mut card_config = match &args.config {
        Some(path) => match CardConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => CardConfig::default(),
    };

    if let Some(repos_dir) = args.repos_dir {
        card_config.storage.repos_dir = repos_dir;
    }
    if let Some(cache_dir) = args.cache_dir {
        card_config.storage.cache_dir = cache_dir;
    }

    if let Err(e) = card_config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    println!("Starting repocard web server");
    println!("Server: http://{}:{}", config.host, config.port);
    println!("Repos dir: {}", card_config.storage.repos_dir.display());
    println!("Cache dir: {}", card_config.storage.cache_dir.display());

    let server = match CardServerBuilder::new()
        .host(config.host.clone())
        .port(config.port)
        .dev_mode(config.dev_mode)
        .card_config(card_config)
        .build()
    {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to build server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        eprintln!("Server failed to start: {}", e);
        std::process::exit(1);
    }
}
