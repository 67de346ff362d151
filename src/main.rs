use anyhow::Result;
use resume_match::cli::interface::run_cli_interface;

#[tokio::main]
async fn main() -> Result<()> {
    run_cli_interface().await?;
    Ok(())
}
