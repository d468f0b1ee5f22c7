//! Blog server entry point.

use blog_server::{run, CliArgs, ServerConfig, ServerError};
use clap::Parser;
use log::error;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    if let Err(err) = blog_core::init_logging(&args.log_level, args.log_dir.as_deref())
        .map_err(ServerError::Logging)
    {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    if let Err(err) = run(ServerConfig::from(&args)).await {
        error!("event=server_exit module=server status=error error={err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
