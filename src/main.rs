use anyhow::Result;

fn main() -> Result<()> {
    cli_scaffold::cli::run()
}
