//! Command-line interface parsing for sitekit
//!
//! Settings for the server may come from flags or the environment. Missing
//! Last.fm credentials are not a startup error: the endpoint reports them
//! per request instead.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use crate::config::{LastfmConfig, ServerConfig, DEFAULT_BIND};

/// Personal site backend: read-time estimates and a Last.fm now-playing endpoint
#[derive(Parser, Debug)]
#[command(name = "sitekit")]
#[command(version)]
pub struct Cli {
    /// Log verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Print read-time estimates for markdown files ("-" reads stdin)
    ReadTime {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "SITEKIT_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Directory for cached API responses
    #[arg(long, env = "SITEKIT_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Last.fm API key
    #[arg(long, env = "LASTFM_API_KEY", hide_env_values = true)]
    pub lastfm_api_key: Option<String>,

    /// Last.fm account to show
    #[arg(long, env = "LASTFM_USERNAME")]
    pub lastfm_username: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl ServeArgs {
    pub fn lastfm_config(&self) -> LastfmConfig {
        LastfmConfig::new(self.lastfm_api_key.clone(), self.lastfm_username.clone())
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind: self.bind,
            cache_dir: self.cache_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_read_time() {
        let cli = Cli::try_parse_from(["sitekit", "read-time", "a.md", "b.md"]).unwrap();
        match cli.command {
            Command::ReadTime { files } => {
                assert_eq!(files, vec![PathBuf::from("a.md"), PathBuf::from("b.md")]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.log_level, LogLevel::Info);
    }

    #[test]
    fn test_cli_read_time_requires_files() {
        assert!(Cli::try_parse_from(["sitekit", "read-time"]).is_err());
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["sitekit"]).is_err());
    }

    #[test]
    fn test_cli_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "sitekit",
            "--log-level",
            "debug",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--cache-dir",
            "/tmp/cache",
            "--lastfm-api-key",
            "key",
            "--lastfm-username",
            "someone",
        ])
        .unwrap();

        assert_eq!(cli.log_level, LogLevel::Debug);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        let server = args.server_config();
        assert_eq!(server.bind, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(server.cache_dir, Some(PathBuf::from("/tmp/cache")));

        let creds = args.lastfm_config().credentials().unwrap();
        assert_eq!(creds.api_key, "key");
        assert_eq!(creds.username, "someone");
    }

    #[test]
    fn test_cli_rejects_bad_bind() {
        assert!(Cli::try_parse_from(["sitekit", "serve", "--bind", "not-an-addr"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["sitekit", "--log-level", "loud", "serve"]).is_err());
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LevelFilter::from(LogLevel::Off), LevelFilter::Off);
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::Warn);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }
}
