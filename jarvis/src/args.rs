use std::path::PathBuf;

use clap::Parser;

/// Jarvis LLM gateway
#[derive(Debug, Parser)]
#[command(name = "jarvis", about = "Multi-provider LLM gateway with streaming and fallback")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "jarvis.toml", env = "JARVIS_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "JARVIS_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
