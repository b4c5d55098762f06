/// Runs one update-check session and exits.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    collect_and_run_lib::run().await?;
    Ok(())
}
