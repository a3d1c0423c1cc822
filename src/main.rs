use anyhow::Result;
use meetbook::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
