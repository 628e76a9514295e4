//! Entry point for the `cartaz` binary.

fn main() -> eyre::Result<()> {
    cartaz_cli::run()?;
    Ok(())
}
