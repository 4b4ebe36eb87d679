//! sitekit - personal site backend
//!
//! Serves a cached Last.fm now-playing endpoint and estimates read times for
//! markdown posts.

use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{info, warn, LevelFilter};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use sitekit::cache::CacheManager;
use sitekit::cli::{Cli, Command, ServeArgs};
use sitekit::lastfm::LastfmClient;
use sitekit::now_playing::NowPlayingService;
use sitekit::read_time::read_time;
use sitekit::server;

/// Logs go to stderr so `read-time` output stays clean on stdout.
fn init_logging(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .add_filter_allow_str("sitekit")
        .build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

async fn run_server(args: ServeArgs) -> sitekit::Result<()> {
    let server_config = args.server_config();
    let lastfm_config = args.lastfm_config();

    let cache = match &server_config.cache_dir {
        Some(dir) => CacheManager::with_dir(dir.clone()),
        None => CacheManager::new_or_local(),
    };
    info!("Caching API responses in {}", cache.dir().display());

    if lastfm_config.credentials().is_err() {
        warn!("Last.fm credentials not set; /api/lastfm will answer 500");
    }

    let client = LastfmClient::new();
    info!("Fetching now playing from {}", client.base_url());

    let service = NowPlayingService::new(lastfm_config, client, cache);
    server::serve(&server_config, service).await
}

fn read_input(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        io::read_to_string(io::stdin())
    } else {
        std::fs::read_to_string(path)
    }
}

fn print_read_times(files: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    for path in files {
        let content = read_input(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        println!("{}: {}", path.display(), read_time(&content));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level.into());

    match cli.command {
        Command::Serve(args) => run_server(args).await?,
        Command::ReadTime { files } => print_read_times(&files)?,
    }

    Ok(())
}
