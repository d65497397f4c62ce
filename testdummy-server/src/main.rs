//! TestDummy Binary
//!
//! Controllable HTTP test double configured through `TESTDUMMY_*` variables.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use testdummy_config::ConfigLoader;
use testdummy_logging::init_logging_from_config;
use testdummy_server::Server;

#[derive(Parser)]
#[command(author, version = testdummy_core::VERSION, about, long_about = None)]
struct Cli {
    /// Configuration file path (environment variables still override it)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Server bind address, overriding TESTDUMMY_BIND_ADDRESS
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::new().load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
        config.server.socket_addr()?;
    }

    if cli.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    init_logging_from_config(&config.logging)?;

    Server::new(config).start().await
}
