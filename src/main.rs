use anyhow::Result;
use clap::Parser;
use snowfall_matrix::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    snowfall_matrix::run(cli).await
}
