use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    jokenpo::cli::run_cli().await
}
