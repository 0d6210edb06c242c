use anyhow::Result;
use clap::Parser as _;

mod cli;
mod config;
mod session;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli::Cli {
        config_file,
        command,
    } = cli::Cli::parse();
    let cfg = config::Config::try_load_from_file_or_default(config_file)?;
    cli::run(command, cfg).await
}
