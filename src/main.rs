use anyhow::Result;

fn main() -> Result<()> {
    reclaim_cli::run_cli()
}
