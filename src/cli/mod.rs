// CLI module for mathops
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// mathops - Math operations API with an LLM-backed chat endpoint
#[derive(Parser, Debug)]
#[command(name = "mathops", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.mathops/config.toml)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Address to bind the HTTP server to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Provider credential; /chat is disabled without it
    #[arg(long, env = "LLM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}
