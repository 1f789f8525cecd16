//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for flatlinker using clap's derive macros.

use clap::{Parser, Subcommand};

use crate::config::ConfigOverrides;

/// flatlinker - a URL shortener that keeps each link as a file
#[derive(Parser, Debug)]
#[command(name = "flatlinker")]
#[command(version)]
#[command(about = "A URL shortener that stores every link as a plain file", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml, optional)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    /// Port to serve shorturl on
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Directory to store data in
    #[arg(long, global = true)]
    pub data_folder: Option<String>,

    /// Secret key to authenticate POST requests
    #[arg(long, global = true)]
    pub secret_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Add a short link
    ///
    /// Usage: add [HASH] <URL>
    /// - If only URL provided, generates a random key
    /// - If both provided, writes (or overwrites) the given key
    Add {
        /// Positional args: [hash] <url>
        #[arg(required = true, num_args = 1..=2)]
        args: Vec<String>,
    },

    /// Print the URL stored under a key
    Get {
        /// Key to look up
        key: String,
    },

    /// Print a sample configuration file
    GenerateConfig,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            port: self.port,
            data_folder: self.data_folder.clone(),
            secret_key: self.secret_key.clone(),
        }
    }
}
