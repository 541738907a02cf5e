// src/bin/cli.rs
use contrib_chart::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
