//! Tones command.

use anyhow::Result;
use brandkb_core::BrandTone;
use colored::Colorize;

/// List the available brand tones.
pub fn execute() -> Result<()> {
    for tone in BrandTone::ALL {
        println!("{} {}", tone.label().bold(), format!("({})", tone.as_str()).dimmed());
        println!("  {}", tone.description());
        println!("  e.g. {}", tone.examples().join(" · ").dimmed());
        println!();
    }
    Ok(())
}
