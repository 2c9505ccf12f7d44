//! Load-then-save command

use anyhow::{Context, Result};
use glade_scene::{load_level, save_level};

pub fn run(input: &str, output: &str) -> Result<()> {
    let scene = load_level(input).with_context(|| format!("failed to load level {input}"))?;
    save_level(output, &scene).with_context(|| format!("failed to write level {output}"))?;
    println!("Wrote {} -> {}", input, output);
    Ok(())
}
