use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use propforge_generator::bootstrap::attributes_source;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AttributesArgs {
    /// File to write (prints to stdout when omitted)
    #[arg(short, long)]
    pub out: Option<String>,
}

pub fn attributes(args: AttributesArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let source = attributes_source(config.line_ending);

    match args.out {
        Some(out) => {
            let output_file = PathBuf::from(cwd).join(out);
            if let Some(parent) = output_file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_file, source)?;
            println!("  {} {}", "✓".green(), output_file.display());
        }
        None => print!("{}", source),
    }

    Ok(())
}
