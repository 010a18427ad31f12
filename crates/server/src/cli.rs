//! Command-line overrides for the loaded configuration.

use std::path::PathBuf;

use clap::Parser;
use snipbox_core::AppConfig;

/// Short-lived text snippets over HTTP.
#[derive(Debug, Parser)]
#[command(name = "snipbox", version)]
pub struct Cli {
    /// Address to listen on, e.g. 127.0.0.1:4000.
    #[arg(long)]
    pub addr: Option<String>,

    /// Path to the SQLite database file.
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Directory of page, layout and partial templates.
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Directory served under /static/.
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

impl Cli {
    /// Flags given on the command line win over every other source.
    pub fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(addr) = self.addr {
            config.addr = addr;
        }
        if let Some(db) = self.db {
            config.db_path = db;
        }
        if let Some(templates) = self.templates {
            config.template_dir = templates;
        }
        if let Some(static_dir) = self.static_dir {
            config.static_dir = static_dir;
        }
        config
    }
}
