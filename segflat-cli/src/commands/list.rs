//! List command implementation

use super::ListCommands;
use anyhow::Result;
use segflat_core::{builtin_fixtures, EntryPoint};
use std::io::{self, Write};

/// Execute a list subcommand
pub fn execute(subcommand: &ListCommands) -> Result<()> {
    let stdout = io::stdout();
    write_listing(subcommand, &mut stdout.lock())
}

fn write_listing<W: Write>(subcommand: &ListCommands, out: &mut W) -> Result<()> {
    match subcommand {
        ListCommands::Entries => {
            writeln!(out, "Available entry points:")?;
            for entry in EntryPoint::ALL {
                writeln!(out, "  {:<22} {}", entry.name(), entry.signature())?;
            }
        }
        ListCommands::Fixtures => {
            writeln!(out, "Built-in fixtures:")?;
            for fixture in builtin_fixtures() {
                writeln!(out, "  {:<22} {}", fixture.entry.name(), fixture.name)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
